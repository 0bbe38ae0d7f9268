//! Union-find cluster construction over fingerprinted files.
//!
//! Files are merged into the same cluster whenever an accepted similarity
//! pair (or an exact-digest group) connects them. Clusters are the
//! connected components of that relation: membership is transitive by
//! design, so a chain A~B~C lands in one cluster even when A and C alone
//! exceed the threshold. Union-find makes membership invariant to the
//! order pairs are processed.
//!
//! The structure is an arena of integer indices (one slot per file) rather
//! than pointer-based nodes; merges are performed single-threaded after
//! parallel scoring completes.

use ahash::AHashMap;
use petgraph::unionfind::UnionFind;

/// Builds connected-component clusters from accepted similarity pairs.
#[derive(Debug)]
pub struct ClusterBuilder {
    sets: UnionFind<usize>,
    len: usize,
}

impl ClusterBuilder {
    /// Create a builder with one disjoint set per file index.
    pub fn new(len: usize) -> Self {
        Self {
            sets: UnionFind::new(len),
            len,
        }
    }

    /// Merge the sets containing `a` and `b`.
    pub fn union(&mut self, a: usize, b: usize) {
        self.sets.union(a, b);
    }

    /// Merge every member of a group into one set. Used for exact-digest
    /// groups, which bypass banding entirely.
    pub fn union_group(&mut self, members: &[usize]) {
        for window in members.windows(2) {
            self.sets.union(window[0], window[1]);
        }
    }

    /// Extract all connected components, singletons included. Members of
    /// each component are in ascending index order, and components are
    /// ordered by their smallest member, so the result is deterministic.
    pub fn into_components(mut self) -> Vec<Vec<usize>> {
        let mut by_root: AHashMap<usize, Vec<usize>> = AHashMap::with_capacity(self.len);
        for index in 0..self.len {
            let root = self.sets.find_mut(index);
            by_root.entry(root).or_default().push(index);
        }

        let mut components: Vec<Vec<usize>> = by_root.into_values().collect();
        components.sort_unstable_by_key(|members| members[0]);
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_pairs_form_one_cluster() {
        let mut builder = ClusterBuilder::new(4);
        builder.union(0, 1);
        builder.union(1, 2);

        let components = builder.into_components();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn membership_is_invariant_to_pair_order() {
        let pairs = [(0, 1), (2, 3), (1, 2), (4, 5)];

        let mut forward = ClusterBuilder::new(6);
        for (a, b) in pairs {
            forward.union(a, b);
        }

        let mut reversed = ClusterBuilder::new(6);
        for (a, b) in pairs.iter().rev() {
            reversed.union(*a, *b);
        }

        assert_eq!(forward.into_components(), reversed.into_components());
    }

    #[test]
    fn exact_groups_merge_all_members() {
        let mut builder = ClusterBuilder::new(5);
        builder.union_group(&[0, 2, 4]);

        let components = builder.into_components();
        assert_eq!(components, vec![vec![0, 2, 4], vec![1], vec![3]]);
    }

    #[test]
    fn empty_builder_yields_no_components() {
        assert!(ClusterBuilder::new(0).into_components().is_empty());
    }
}
