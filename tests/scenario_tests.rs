use dynarray::DynArray;

fn contents(array: &DynArray<i32>) -> Vec<i32> {
    array.iter().copied().collect()
}

#[test]
fn test_full_lifecycle_scenario() {
    let mut array = DynArray::new();
    assert!(array.is_empty());

    array.push_back(10).unwrap();
    array.push_back(20).unwrap();
    array.push_back(30).unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(contents(&array), [10, 20, 30]);

    array.insert(1, 15).unwrap();
    assert_eq!(array.len(), 4);
    assert_eq!(contents(&array), [10, 15, 20, 30]);

    array.erase(2).unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(contents(&array), [10, 15, 30]);

    array.push_back(40).unwrap();
    array.push_back(50).unwrap();
    assert_eq!(contents(&array), [10, 15, 30, 40, 50]);

    array.erase_range(1, 4).unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(contents(&array), [10, 50]);

    let capacity = array.capacity();
    array.clear();
    assert!(array.is_empty());
    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn test_scenario_capacity_trace() {
    let mut array = DynArray::new();
    assert_eq!(array.capacity(), 0);

    array.push_back(10).unwrap();
    assert_eq!(array.capacity(), 1);
    array.push_back(20).unwrap();
    assert_eq!(array.capacity(), 2);
    array.push_back(30).unwrap();
    assert_eq!(array.capacity(), 4);

    array.insert(1, 15).unwrap();
    assert_eq!(array.capacity(), 4);

    array.erase(2).unwrap();
    array.push_back(40).unwrap();
    array.push_back(50).unwrap();
    assert_eq!(array.capacity(), 8);
}

#[test]
fn test_scenario_with_owned_strings() {
    let mut array = DynArray::new();
    for word in ["ten", "twenty", "thirty"] {
        array.push_back(word.to_string()).unwrap();
    }
    array.insert(1, "fifteen".to_string()).unwrap();
    array.erase(2).unwrap();
    array.push_back("forty".to_string()).unwrap();
    array.push_back("fifty".to_string()).unwrap();
    array.erase_range(1, 4).unwrap();

    assert_eq!(array, ["ten", "fifty"]);

    array.clear();
    assert!(array.is_empty());
}
