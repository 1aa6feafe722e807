use dynarray::{DynArray, DynArrayError};

fn sample() -> DynArray<i32> {
    [10, 20, 30].into_iter().collect()
}

#[test]
fn test_error_at_out_of_range() {
    let mut array = sample();

    assert_eq!(
        array.at(3).unwrap_err(),
        DynArrayError::OutOfRange {
            index: 3,
            length: 3
        }
    );
    assert_eq!(
        array.at_mut(10).unwrap_err(),
        DynArrayError::OutOfRange {
            index: 10,
            length: 3
        }
    );
    assert!(DynArray::<i32>::new().at(0).is_err());
}

#[test]
fn test_error_insert_past_end() {
    let mut array = sample();
    let capacity = array.capacity();

    assert_eq!(
        array.insert(4, 0).unwrap_err(),
        DynArrayError::OutOfRange {
            index: 4,
            length: 3
        }
    );
    assert_eq!(array, [10, 20, 30]);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn test_error_erase_out_of_range() {
    let mut array = sample();

    assert_eq!(
        array.erase(3).unwrap_err(),
        DynArrayError::OutOfRange {
            index: 3,
            length: 3
        }
    );
    assert!(array.remove(5).is_err());
    assert_eq!(array, [10, 20, 30]);
}

#[test]
fn test_error_erase_range_rejections() {
    let mut array = sample();

    let rejected = [(3, 3), (3, 4), (0, 4), (1, 1), (2, 1), (5, 9)];
    for (first, last) in rejected {
        assert_eq!(
            array.erase_range(first, last).unwrap_err(),
            DynArrayError::RangeOutOfBounds {
                first,
                last,
                length: 3
            },
            "range {first}..{last} should be rejected"
        );
    }
    assert_eq!(array, [10, 20, 30]);
}

#[test]
fn test_error_empty_array_operations() {
    let mut array = DynArray::<i32>::new();

    // Plain pop is a silent no-op.
    assert_eq!(array.pop_back(), None);
    assert_eq!(array.len(), 0);

    assert_eq!(
        array.try_pop_back().unwrap_err(),
        DynArrayError::EmptyContainer
    );
}

#[test]
fn test_error_capacity_overflow() {
    let err = DynArray::<u64>::with_capacity(usize::MAX).unwrap_err();
    assert_eq!(
        err,
        DynArrayError::CapacityOverflow {
            requested: usize::MAX
        }
    );
}

#[test]
fn test_failed_reserve_leaves_array_intact() {
    let mut array = sample();
    let capacity = array.capacity();

    assert!(matches!(
        array.reserve(usize::MAX),
        Err(DynArrayError::CapacityOverflow { .. })
    ));
    assert_eq!(array, [10, 20, 30]);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn test_allocation_failure_leaves_array_intact() {
    let mut array: DynArray<u64> = (0..5).collect();
    let capacity = array.capacity();
    let huge = isize::MAX as usize / std::mem::size_of::<u64>();

    match array.reserve(huge).unwrap_err() {
        DynArrayError::AllocationFailure { bytes } => {
            assert_eq!(bytes, huge * std::mem::size_of::<u64>());
        }
        other => panic!("Expected AllocationFailure, got {other:?}"),
    }

    assert_eq!(array, [0, 1, 2, 3, 4]);
    assert_eq!(array.capacity(), capacity);
    array.push_back(5).unwrap();
    assert_eq!(array.len(), 6);
}

#[test]
fn test_error_messages_quality() {
    let array = sample();

    let message = format!("{}", array.at(7).unwrap_err());
    assert!(message.contains("index 7"));
    assert!(message.contains("length 3"));

    let message = format!(
        "{}",
        DynArrayError::RangeOutOfBounds {
            first: 2,
            last: 1,
            length: 3
        }
    );
    assert!(message.contains("2..1"));

    let message = format!("{}", DynArrayError::AllocationFailure { bytes: 4096 });
    assert!(message.contains("4096 bytes"));
}

#[test]
fn test_error_types_implement_standard_traits() {
    let error = DynArrayError::EmptyContainer;

    let debug_str = format!("{:?}", error);
    assert!(!debug_str.is_empty());

    let display_str = format!("{}", error);
    assert!(!display_str.is_empty());

    let cloned = error.clone();
    assert_eq!(error, cloned);
    assert_ne!(error, DynArrayError::AllocationFailure { bytes: 1 });

    let _: &dyn core::error::Error = &error;
}

#[test]
fn test_comprehensive_error_scenarios() {
    let errors = [
        DynArrayError::OutOfRange {
            index: 5,
            length: 2,
        },
        DynArrayError::RangeOutOfBounds {
            first: 1,
            last: 9,
            length: 4,
        },
        DynArrayError::AllocationFailure { bytes: 1 << 40 },
        DynArrayError::CapacityOverflow {
            requested: usize::MAX,
        },
        DynArrayError::EmptyContainer,
    ];

    for error in &errors {
        let message = format!("{}", error);
        assert!(
            message.len() > 10,
            "Error message should be descriptive for {:?}",
            error
        );
    }
}

#[cfg(feature = "std")]
#[test]
fn test_error_boxes_as_std_error() {
    let mut array = DynArray::<i32>::new();
    let result: Result<i32, Box<dyn std::error::Error + Send + Sync>> =
        array.try_pop_back().map_err(Into::into);

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Operation on empty array");
    assert!(err.source().is_none());
}
