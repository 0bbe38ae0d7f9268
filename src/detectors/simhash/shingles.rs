//! Shingle extraction over raw byte content.
//!
//! A shingle is an overlapping byte window of fixed size `k`, advanced one
//! byte at a time. Shingles are the atomic unit of similarity: a small edit
//! disturbs only the windows that overlap it, leaving the rest of the
//! shingle set intact.

/// Lazy iterator over overlapping byte windows of fixed size.
///
/// Content shorter than the window size yields exactly one shingle equal to
/// the whole content; empty content yields no shingles.
#[derive(Debug, Clone)]
pub struct ShingleIter<'a> {
    content: &'a [u8],
    size: usize,
    pos: usize,
    done: bool,
}

impl<'a> ShingleIter<'a> {
    /// Create an iterator over `content` with windows of `size` bytes.
    pub fn new(content: &'a [u8], size: usize) -> Self {
        debug_assert!(size > 0, "shingle size must be positive");
        Self {
            content,
            size,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for ShingleIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.done || self.content.is_empty() {
            return None;
        }

        // Short content degenerates to a single whole-content shingle.
        if self.content.len() <= self.size {
            self.done = true;
            return Some(self.content);
        }

        if self.pos + self.size > self.content.len() {
            self.done = true;
            return None;
        }

        let window = &self.content[self.pos..self.pos + self.size];
        self.pos += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done || self.content.is_empty() {
            return (0, Some(0));
        }
        let remaining = if self.content.len() <= self.size {
            1
        } else {
            self.content.len() - self.size + 1 - self.pos
        };
        (remaining, Some(remaining))
    }
}
