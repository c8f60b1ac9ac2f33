// ChainedMap integration tests.
//
// Exercised through the public surface only:
// - Round trip: put then get returns the stored value; absent keys are None.
// - Growth: the table doubles once the load factor passes 0.75 and every
//   entry survives the rehash.
// - Ownership: copies are deep; clear keeps the bucket array.
// - Diagnostics: traverse/describe text is byte-exact.
use hash_tables::{ChainedMap, TableError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const FRUITS: [(&str, i32); 5] = [
    ("apple", 10),
    ("banana", 20),
    ("cherry", 30),
    ("date", 40),
    ("elderberry", 50),
];

// Test: five fruits into a five-bucket map.
// Verifies: capacity ends at 10 and all five values are retrievable.
#[test]
fn fruit_scenario_grows_to_ten_buckets() {
    init_logging();
    let mut m = ChainedMap::new(5).expect("capacity 5");
    for (k, v) in FRUITS {
        m.put(k, v).unwrap();
    }
    assert_eq!(m.capacity(), 10);
    assert_eq!(m.len(), 5);
    for (k, v) in FRUITS {
        assert_eq!(m.get(k), Some(v), "{k}");
        assert!(m.contains(k));
    }
    assert_eq!(m.load_factor(), 0.5);
}

// Test: growth threshold is strict.
// Verifies: exactly 0.75 does not grow, the next put does.
#[test]
fn threshold_is_strictly_greater_than() {
    let mut m = ChainedMap::new(4).unwrap();
    for i in 0..3 {
        m.put(&format!("k{i}"), i).unwrap();
    }
    assert_eq!(m.capacity(), 4);
    assert_eq!(m.traverse().rsplit(" : ").next(), Some("0.75\n"));
    m.put("k3", 3).unwrap();
    assert_eq!(m.capacity(), 8);
}

#[test]
fn invalid_capacity_is_rejected() {
    assert!(matches!(ChainedMap::new(0), Err(TableError::InvalidCapacity)));
}

#[test]
fn huge_capacity_reports_alloc_failure() {
    match ChainedMap::new(usize::MAX) {
        Err(TableError::AllocFailed { requested }) => assert_eq!(requested, usize::MAX),
        other => panic!("unexpected result: {:?}", other.map(|m| m.capacity())),
    }
}

// Test: update versus insert.
// Verifies: re-put returns the old value and does not change len.
#[test]
fn reput_updates_value() {
    let mut m = ChainedMap::new(8).unwrap();
    assert_eq!(m.put("k", 1).unwrap(), None);
    assert_eq!(m.put("k", 2).unwrap(), Some(1));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(2));
}

#[test]
fn pop_then_reinsert() {
    let mut m = ChainedMap::new(3).unwrap();
    for (k, v) in FRUITS {
        m.put(k, v).unwrap();
    }
    assert_eq!(m.pop("cherry"), Some(30));
    assert_eq!(m.pop("cherry"), None);
    assert!(!m.contains("cherry"));
    assert_eq!(m.len(), 4);
    m.put("cherry", 31).unwrap();
    assert_eq!(m.get("cherry"), Some(31));
    assert_eq!(m.len(), 5);
}

// Test: copy independence in both directions.
#[test]
fn copy_and_source_diverge() {
    let mut a = ChainedMap::new(5).unwrap();
    for (k, v) in FRUITS {
        a.put(k, v).unwrap();
    }
    let mut b = a.copy();
    assert_eq!(a.traverse(), b.traverse());

    a.clear();
    assert!(a.is_empty());
    assert_eq!(b.len(), 5);

    b.put("apple", 0).unwrap();
    a.put("apple", 1).unwrap();
    assert_eq!(a.get("apple"), Some(1));
    assert_eq!(b.get("apple"), Some(0));
}

// Test: snapshots are owned and consistent with each other.
#[test]
fn snapshots_line_up() {
    let mut m = ChainedMap::new(16).unwrap();
    for (k, v) in FRUITS {
        m.put(k, v).unwrap();
    }
    let keys = m.keys();
    let values = m.values();
    let items = m.items();
    assert_eq!(items.len(), 5);
    for (i, (k, v)) in items.iter().enumerate() {
        assert_eq!(&keys[i], k);
        assert_eq!(values[i], *v);
    }
    m.clear();
    // Snapshots outlive the entries they were taken from.
    assert_eq!(keys.len(), 5);
}

#[test]
fn diagnostics_are_byte_exact() {
    let mut m = ChainedMap::new(5).unwrap();
    assert_eq!(m.traverse(), "{ } : 0.00\n");
    assert_eq!(m.describe().to_string(), "0 | \n1 | \n2 | \n3 | \n4 | \n");
    m.put("date", 40).unwrap();
    m.put("elderberry", 50).unwrap();
    assert_eq!(m.to_string(), "{ date:40 elderberry:50 } : 0.40\n");
    assert_eq!(
        m.describe().to_string(),
        "0 | {date,40} -> \n1 | {elderberry,50} -> \n2 | \n3 | \n4 | \n"
    );
}

// Test: many keys through many doublings.
#[test]
fn bulk_insert_and_lookup() {
    init_logging();
    let mut m = ChainedMap::new(1).unwrap();
    for i in 0..5_000 {
        m.put(&format!("k{i:05}"), i).unwrap();
    }
    assert_eq!(m.len(), 5_000);
    assert_eq!(m.capacity(), 8_192);
    for i in (0..5_000).step_by(7) {
        assert_eq!(m.get(&format!("k{i:05}")), Some(i));
    }
    assert_eq!(m.get("k99999"), None);
}
