//! Tests for the allocation guard, raw buffers and growth policy.

#![allow(clippy::unwrap_used, reason = "tests unwrap known-good allocations")]

use pretty_assertions::assert_eq;

use super::*;

// ── Size computation ────────────────────────────────────────────────────

#[test]
fn request_bytes_multiplies_count_by_size() {
    assert_eq!(request_bytes(0, 8), Ok(0));
    assert_eq!(request_bytes(10, 8), Ok(80));
    assert_eq!(request_bytes(3, 24), Ok(72));
}

#[test]
fn request_bytes_rejects_product_overflow() {
    assert_eq!(
        request_bytes(usize::MAX / 2, 3),
        Err(AllocError::SizeOverflow {
            count: usize::MAX / 2,
            elem_size: 3
        })
    );
}

#[test]
fn request_bytes_rejects_sizes_above_isize_max() {
    let count = (usize::MAX >> 1) + 1;
    assert!(matches!(
        request_bytes(count, 1),
        Err(AllocError::SizeOverflow { .. })
    ));
    assert_eq!(request_bytes(usize::MAX >> 1, 1), Ok(usize::MAX >> 1));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn two_pow_62_words_overflows() {
    assert_eq!(
        array_layout::<u64>(1 << 62),
        Err(AllocError::SizeOverflow {
            count: 1 << 62,
            elem_size: 8
        })
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn two_pow_58_words_is_representable() {
    let layout = array_layout::<u64>(1 << 58).map(|l| l.size());
    assert_eq!(layout, Ok(1 << 61));
}

#[test]
fn max_elements_respects_element_size() {
    assert_eq!(max_elements::<u8>(), usize::MAX >> 1);
    assert_eq!(max_elements::<u64>(), (usize::MAX >> 1) / 8);
    assert_eq!(max_elements::<()>(), usize::MAX);
}

// ── Raw buffers ─────────────────────────────────────────────────────────

#[test]
fn new_buffer_does_not_allocate() {
    let buf = RawBuf::<u64>::new();
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn with_capacity_allocates_exactly() {
    let buf = RawBuf::<u64>::with_capacity(7);
    assert_eq!(buf.map(|b| b.capacity()), Ok(7));
}

#[test]
fn grow_preserves_existing_slots() {
    let mut buf = RawBuf::<u64>::with_capacity(4).unwrap();
    for i in 0..4 {
        // SAFETY: i < capacity
        unsafe { buf.as_mut_ptr().add(i).write(i as u64 * 10) };
    }
    buf.grow_exact(1000).unwrap();
    assert_eq!(buf.capacity(), 1000);
    for i in 0..4 {
        // SAFETY: slots 0..4 were written before growth
        let v = unsafe { buf.as_ptr().add(i).read() };
        assert_eq!(v, i as u64 * 10);
    }
}

#[test]
fn grow_to_smaller_capacity_is_noop() {
    let mut buf = RawBuf::<u32>::with_capacity(16).unwrap();
    buf.grow_exact(8).unwrap();
    assert_eq!(buf.capacity(), 16);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn allocator_refusal_is_out_of_memory() {
    let err = RawBuf::<u64>::with_capacity(1 << 58).unwrap_err();
    assert_eq!(err, AllocError::OutOfMemory { bytes: 1 << 61 });
}

#[cfg(target_pointer_width = "64")]
#[test]
fn failed_growth_keeps_old_buffer() {
    let mut buf = RawBuf::<u64>::with_capacity(2).unwrap();
    // SAFETY: both slots are within capacity
    unsafe {
        buf.as_mut_ptr().write(11);
        buf.as_mut_ptr().add(1).write(22);
    }
    assert!(buf.grow_exact(1 << 58).is_err());
    assert!(buf.grow_exact(1 << 62).is_err());
    assert_eq!(buf.capacity(), 2);
    // SAFETY: slots were written above and the buffer was not replaced
    let (a, b) = unsafe { (buf.as_ptr().read(), buf.as_ptr().add(1).read()) };
    assert_eq!((a, b), (11, 22));
}

// ── Growth policy ───────────────────────────────────────────────────────

#[test]
fn first_growth_jumps_to_min_capacity() {
    let policy = GrowthPolicy::default();
    assert_eq!(policy.next_capacity(0, 1, usize::MAX), 4);
}

#[test]
fn sufficient_capacity_is_unchanged() {
    let policy = GrowthPolicy::default();
    assert_eq!(policy.next_capacity(8, 8, usize::MAX), 8);
    assert_eq!(policy.next_capacity(8, 3, usize::MAX), 8);
}

#[test]
fn growth_is_geometric() {
    let max = usize::MAX;
    let double = GrowthPolicy::new(4, GrowthFactor::Double);
    let three_halves = GrowthPolicy::new(4, GrowthFactor::ThreeHalves);
    let five_quarters = GrowthPolicy::new(4, GrowthFactor::FiveQuarters);
    assert_eq!(double.next_capacity(64, 65, max), 128);
    assert_eq!(three_halves.next_capacity(64, 65, max), 96);
    assert_eq!(five_quarters.next_capacity(64, 65, max), 80);
}

#[test]
fn large_requirement_wins_over_factor() {
    let policy = GrowthPolicy::default();
    assert_eq!(policy.next_capacity(4, 1000, usize::MAX), 1000);
}

#[test]
fn growth_is_clamped_to_max_but_not_below_required() {
    let policy = GrowthPolicy::default();
    assert_eq!(policy.next_capacity(600, 601, 1000), 1000);
    assert_eq!(policy.next_capacity(600, 2000, 1000), 2000);
}
