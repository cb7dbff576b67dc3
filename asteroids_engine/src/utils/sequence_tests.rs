use super::*;

// ============================================================================
// Growth tests
// ============================================================================

#[test]
fn test_new_is_empty() {
    let seq: Sequence<u32> = Sequence::new();
    assert!(seq.is_empty());
    assert_eq!(seq.len(), 0);
    assert!(seq.capacity() >= INITIAL_CAPACITY);
}

#[test]
fn test_push_past_capacity_keeps_order() {
    let mut seq = Sequence::with_capacity(4);
    let capacity = seq.capacity();

    for i in 0..=capacity {
        seq.push(i);
    }

    assert_eq!(seq.len(), capacity + 1);
    for i in 0..=capacity {
        assert_eq!(seq[i], i);
    }
    assert_eq!(seq.last(), Some(&capacity));
}

#[test]
fn test_growth_doubles_capacity() {
    let mut seq = Sequence::with_capacity(4);
    let capacity = seq.capacity();
    for i in 0..capacity {
        seq.push(i);
    }
    assert_eq!(seq.capacity(), capacity);

    seq.push(capacity);
    assert!(seq.capacity() >= capacity * 2);
}

#[test]
fn test_zero_capacity_request_still_grows() {
    let mut seq = Sequence::with_capacity(0);
    seq.push('a');
    seq.push('b');
    assert_eq!(seq.as_slice(), &['a', 'b']);
}

// ============================================================================
// Erase tests
// ============================================================================

#[test]
fn test_erase_shifts_left() {
    let mut seq: Sequence<i32> = [10, 20, 30, 40].into_iter().collect();

    assert_eq!(seq.erase(1), Some(20));
    assert_eq!(seq.as_slice(), &[10, 30, 40]);

    assert_eq!(seq.erase(2), Some(40));
    assert_eq!(seq.as_slice(), &[10, 30]);
}

#[test]
fn test_erase_out_of_range_is_noop() {
    let mut seq: Sequence<i32> = [1, 2].into_iter().collect();
    assert_eq!(seq.erase(2), None);
    assert_eq!(seq.erase(usize::MAX), None);
    assert_eq!(seq.len(), 2);
}

#[test]
fn test_erase_while_iterating_by_index_visits_everything() {
    // Same loop shape as the quadtree re-homing pass
    let mut seq: Sequence<i32> = (0..10).collect();
    let mut removed = Vec::new();
    let mut i = 0;
    while i < seq.len() {
        if seq[i] % 2 == 0 {
            removed.push(seq.erase(i).unwrap());
        } else {
            i += 1;
        }
    }
    assert_eq!(removed, vec![0, 2, 4, 6, 8]);
    assert_eq!(seq.as_slice(), &[1, 3, 5, 7, 9]);
}

#[test]
fn test_reverse_sweep_erase() {
    // Same loop shape as the deferred compaction sweep
    let mut seq: Sequence<i32> = (0..6).collect();
    for i in (0..seq.len()).rev() {
        if seq[i] % 3 == 0 {
            seq.erase(i);
        }
    }
    assert_eq!(seq.as_slice(), &[1, 2, 4, 5]);
}

// ============================================================================
// Clear / access tests
// ============================================================================

#[test]
fn test_clear_keeps_capacity() {
    let mut seq: Sequence<u64> = (0..50).collect();
    let capacity = seq.capacity();

    seq.clear();

    assert!(seq.is_empty());
    assert_eq!(seq.capacity(), capacity);
}

#[test]
fn test_index_mut_and_get() {
    let mut seq: Sequence<i32> = [1, 2, 3].into_iter().collect();
    seq[1] = 20;
    if let Some(v) = seq.get_mut(2) {
        *v = 30;
    }
    assert_eq!(seq.get(1), Some(&20));
    assert_eq!(seq.get(2), Some(&30));
    assert_eq!(seq.get(3), None);
    assert!(seq.contains(&30));
    assert!(!seq.contains(&3));
}

#[test]
#[should_panic]
fn test_index_out_of_range_panics() {
    let seq: Sequence<i32> = Sequence::new();
    let _ = seq[0];
}

#[test]
fn test_into_iter_by_ref_and_value() {
    let seq: Sequence<i32> = [3, 1, 2].into_iter().collect();
    let by_ref: Vec<i32> = (&seq).into_iter().copied().collect();
    let by_value: Vec<i32> = seq.into_iter().collect();
    assert_eq!(by_ref, vec![3, 1, 2]);
    assert_eq!(by_value, vec![3, 1, 2]);
}
