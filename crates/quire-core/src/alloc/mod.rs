//! Hash collections used across Quire.
//!
//! Re-exports of the AHash-backed map and set. Lookups in the docking engine
//! (tab ownership, duplicate detection) are keyed by short strings where AHash
//! is noticeably faster than SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        assert!(set.insert("tab-a"));
        assert!(!set.insert("tab-a"));
        assert!(set.contains("tab-a"));
    }
}
