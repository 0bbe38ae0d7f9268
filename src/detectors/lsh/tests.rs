use super::*;

fn fp(word: u64) -> Fingerprint {
    Fingerprint::from_words(vec![word], 64)
}

#[test]
fn candidate_pair_is_ordered() {
    assert_eq!(CandidatePair::new(5, 2), CandidatePair::new(2, 5));
    assert_eq!(CandidatePair::new(5, 2).a, 2);
}

#[test]
fn shared_band_always_produces_a_candidate() {
    // Low 16 bits identical (band 0), every other band different.
    let fingerprints = vec![fp(0x0000_0000_0000_ffff), fp(0xffff_ffff_ffff_ffff)];
    let index = BandIndex::build(&fingerprints, 4, 64);

    let pairs = index.candidate_pairs();
    assert_eq!(pairs, vec![CandidatePair::new(0, 1)]);
}

#[test]
fn disjoint_bands_produce_no_candidates() {
    // No 16-bit band agrees between the two.
    let fingerprints = vec![fp(0x1111_2222_3333_4444), fp(0x5555_6666_7777_8888)];
    let index = BandIndex::build(&fingerprints, 4, 64);

    assert!(index.candidate_pairs().is_empty());
}

#[test]
fn identical_fingerprints_pair_exactly_once() {
    // All four bands collide; the pair must still be reported once.
    let fingerprints = vec![fp(0xdead_beef_dead_beef), fp(0xdead_beef_dead_beef)];
    let index = BandIndex::build(&fingerprints, 4, 64);

    assert_eq!(index.candidate_pairs(), vec![CandidatePair::new(0, 1)]);
}

#[test]
fn buckets_expand_to_all_member_pairs() {
    // Three fingerprints sharing band 0.
    let fingerprints = vec![
        fp(0x0100_0000_0000_00aa),
        fp(0x0200_0000_0000_00aa),
        fp(0x0300_0000_0000_00aa),
    ];
    let index = BandIndex::build(&fingerprints, 4, 64);

    let pairs = index.candidate_pairs();
    assert_eq!(
        pairs,
        vec![
            CandidatePair::new(0, 1),
            CandidatePair::new(0, 2),
            CandidatePair::new(1, 2),
        ]
    );
}

#[test]
fn wide_fingerprints_band_across_word_boundaries() {
    // 128-bit fingerprints, two 64-bit bands.
    let a = Fingerprint::from_words(vec![0x1234, u64::MAX], 128);
    let b = Fingerprint::from_words(vec![0x1234, 0], 128);
    let c = Fingerprint::from_words(vec![0x9999, 1], 128);

    let index = BandIndex::build(&[a, b, c], 2, 128);
    assert_eq!(index.band_width(), 64);

    // a and b share band 0; c shares nothing.
    assert_eq!(index.candidate_pairs(), vec![CandidatePair::new(0, 1)]);
}

#[test]
fn empty_input_builds_an_empty_index() {
    let index = BandIndex::build(&[], 4, 64);
    assert_eq!(index.bucket_count(), 0);
    assert!(index.candidate_pairs().is_empty());
}
