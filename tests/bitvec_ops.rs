use std::cmp::Ordering;
use trellis::bitvec::BitVec;
use trellis::error::TrellisError;

#[test]
fn round_trip_across_word_boundaries() {
    for size in [1usize, 63, 64, 65, 130] {
        let mut v = BitVec::make(size).unwrap();
        for i in [0, size / 2, size - 1] {
            v.put(i, true).unwrap();
            assert!(v.get(i).unwrap(), "bit {} should read back set (size {})", i, size);
            v.put(i, false).unwrap();
            assert!(!v.get(i).unwrap(), "bit {} should read back clear (size {})", i, size);
        }
    }
}

#[test]
fn zero_size_is_rejected() {
    assert!(matches!(BitVec::make(0), Err(TrellisError::EmptyDomain)));
}

#[test]
fn out_of_range_access_is_a_domain_error() {
    let mut v = BitVec::make(10).unwrap();
    assert!(matches!(v.get(10), Err(TrellisError::Domain(_))));
    assert!(matches!(v.put(99, true), Err(TrellisError::Domain(_))));
}

#[test]
fn fill_masks_unused_high_bits() {
    let mut v = BitVec::make(70).unwrap();
    v.fill();
    assert_eq!(v.count(), 70, "fill must only set valid bits");
    v.complement();
    assert_eq!(v.count(), 0, "complement of full must be empty");
    assert!(v.is_empty());
}

#[test]
fn complement_is_involutive() {
    let mut v = BitVec::make(100).unwrap();
    v.put(3, true).unwrap();
    v.put(64, true).unwrap();
    let original = v.clone();
    v.complement();
    assert_eq!(v.count(), 98);
    v.complement();
    assert_eq!(v, original, "double complement must restore the vector");
}

#[test]
fn set_ops_word_wise() {
    let mut a = BitVec::make(130).unwrap();
    let mut b = BitVec::make(130).unwrap();
    for i in [0, 5, 64, 129] {
        a.put(i, true).unwrap();
    }
    for i in [5, 64, 70] {
        b.put(i, true).unwrap();
    }

    let mut u = a.clone();
    u.union(&b).unwrap();
    assert_eq!(u.members(), vec![0, 5, 64, 70, 129]);

    let mut i = a.clone();
    i.inter(&b).unwrap();
    assert_eq!(i.members(), vec![5, 64]);

    let mut m = a.clone();
    m.minus(&b).unwrap();
    assert_eq!(m.members(), vec![0, 129]);

    let mut d = a.clone();
    d.diff(&b).unwrap();
    assert_eq!(d.members(), vec![0, 70, 129]);

    assert_eq!(b.members(), vec![5, 64, 70], "argument must stay unchanged");
}

#[test]
fn mismatched_sizes_are_rejected() {
    let mut a = BitVec::make(64).unwrap();
    let b = BitVec::make(65).unwrap();
    assert!(matches!(a.union(&b), Err(TrellisError::SizeMismatch { expected: 64, actual: 65 })));
    assert!(matches!(a.compare(&b), Err(TrellisError::SizeMismatch { .. })));
}

#[test]
fn compare_is_unsigned_on_the_top_bit() {
    // The vector holding the highest bit of a word must rank greater, which
    // on a signed word type would come out negative.
    let mut high = BitVec::make(64).unwrap();
    high.put(63, true).unwrap();
    let mut low = BitVec::make(64).unwrap();
    low.put(0, true).unwrap();
    assert_eq!(high.compare(&low).unwrap(), Ordering::Greater);
    assert_eq!(low.compare(&high).unwrap(), Ordering::Less);
}

#[test]
fn compare_scans_words_from_the_highest_down() {
    let mut upper_word = BitVec::make(128).unwrap();
    upper_word.put(64, true).unwrap();
    let mut lower_word = BitVec::make(128).unwrap();
    for i in 0..64 {
        lower_word.put(i, true).unwrap();
    }
    assert_eq!(
        upper_word.compare(&lower_word).unwrap(),
        Ordering::Greater,
        "a single bit in a higher word outranks a full lower word"
    );
    assert_eq!(upper_word.compare(&upper_word.clone()).unwrap(), Ordering::Equal);
}

#[test]
fn subset_predicates() {
    let mut a = BitVec::make(66).unwrap();
    a.put(1, true).unwrap();
    a.put(65, true).unwrap();
    let mut b = a.clone();
    b.put(7, true).unwrap();
    assert!(a.le(&b).unwrap());
    assert!(a.lt(&b).unwrap());
    assert!(!b.le(&a).unwrap());
    assert!(a.le(&a.clone()).unwrap());
    assert!(!a.lt(&a.clone()).unwrap());
}

#[test]
fn fold_visits_bits_in_ascending_order() {
    let mut v = BitVec::make(200).unwrap();
    for i in [199, 3, 64, 128, 0] {
        v.put(i, true).unwrap();
    }
    let seen = v.fold(Vec::new(), |i, mut acc| {
        acc.push(i);
        acc
    });
    assert_eq!(seen, vec![0, 3, 64, 128, 199]);
    assert_eq!(v.members(), seen);
}

#[test]
fn clear_empties_the_vector() {
    let mut v = BitVec::make(40).unwrap();
    v.fill();
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.count(), 0);
}
