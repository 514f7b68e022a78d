//! Read-only view over named-capture results
//!
//! [`CaptureMap`] is the associative surface of a parser: capture-group name
//! to the ordered substrings that group matched. Every read accessor first
//! checks that a pattern was configured at construction, then blocks until
//! the match stage has published, then reads the immutable backing map. The
//! map can never be mutated through this type.

use crate::error::{Error, Result};
use crate::stage::StageCell;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;

/// Backing map: capture-group name → captured substrings in occurrence order.
///
/// An `IndexMap` keeps key enumeration deterministic (pattern definition
/// order), so two parses of the same document and pattern enumerate
/// identically.
pub type CaptureIndex = IndexMap<String, Vec<String>>;

/// Blocking, read-only associative view over the match stage's output.
pub struct CaptureMap {
    /// `None` when the parser was constructed without a pattern.
    stage: Option<Arc<StageCell<CaptureIndex>>>,
}

impl CaptureMap {
    pub(crate) fn new(stage: Option<Arc<StageCell<CaptureIndex>>>) -> Self {
        Self { stage }
    }

    /// Guard, wait, read. Shared by every accessor so the "no pattern"
    /// check and the fault re-surfacing behave identically everywhere.
    fn index(&self) -> Result<&CaptureIndex> {
        let stage = self.stage.as_deref().ok_or(Error::NoPattern)?;
        stage.wait().map_err(|fault| Error::Extraction {
            reason: fault.reason,
        })
    }

    /// Wait up to `timeout` for the match stage to publish.
    ///
    /// Succeeds immediately once results are ready; after that, the ordinary
    /// accessors no longer block. Fails with [`Error::Timeout`] when the
    /// bound elapses first.
    pub fn ready_within(&self, timeout: Duration) -> Result<()> {
        let stage = self.stage.as_deref().ok_or(Error::NoPattern)?;
        match stage.wait_for(timeout) {
            Some(Ok(_)) => Ok(()),
            Some(Err(fault)) => Err(Error::Extraction {
                reason: fault.reason,
            }),
            None => Err(Error::Timeout { waited: timeout }),
        }
    }

    /// Captures for one group, in left-to-right occurrence order.
    ///
    /// `Ok(None)` means the group name is absent (unknown group, or the
    /// pattern matched nowhere in the text).
    pub fn get(&self, name: &str) -> Result<Option<&[String]>> {
        Ok(self.index()?.get(name).map(Vec::as_slice))
    }

    /// Whether `name` is a populated group key.
    pub fn contains_key(&self, name: &str) -> Result<bool> {
        Ok(self.index()?.contains_key(name))
    }

    /// All group names, in pattern definition order.
    pub fn keys(&self) -> Result<Vec<&str>> {
        Ok(self.index()?.keys().map(String::as_str).collect())
    }

    /// All capture sequences, in the same order as [`Self::keys`].
    pub fn values(&self) -> Result<Vec<&[String]>> {
        Ok(self.index()?.values().map(Vec::as_slice).collect())
    }

    /// Iterate `(group name, captures)` entries.
    pub fn iter(&self) -> Result<impl Iterator<Item = (&str, &[String])>> {
        Ok(self
            .index()?
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice())))
    }

    /// Number of group keys.
    pub fn len(&self) -> Result<usize> {
        Ok(self.index()?.len())
    }

    /// Whether there are no group keys (pattern matched nowhere).
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.index()?.is_empty())
    }

    /// Owned copy of the whole map, e.g. for serialization.
    pub fn snapshot(&self) -> Result<CaptureIndex> {
        Ok(self.index()?.clone())
    }

    /// Always fails: the view is read-only.
    pub fn insert(&self, _name: &str, _values: Vec<String>) -> Result<()> {
        Err(Error::ReadOnly)
    }

    /// Always fails: the view is read-only.
    pub fn remove(&self, _name: &str) -> Result<()> {
        Err(Error::ReadOnly)
    }

    /// Always fails: the view is read-only.
    pub fn clear(&self) -> Result<()> {
        Err(Error::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageFault;
    use pretty_assertions::assert_eq;

    fn published(index: CaptureIndex) -> CaptureMap {
        let stage = Arc::new(StageCell::new());
        stage.publish(Ok(index));
        CaptureMap::new(Some(stage))
    }

    fn sample() -> CaptureMap {
        let mut index = CaptureIndex::new();
        index.insert(
            "word".to_string(),
            vec!["alpha".to_string(), "beta".to_string()],
        );
        index.insert("digit".to_string(), Vec::new());
        published(index)
    }

    #[test]
    fn test_no_pattern_guard_is_consistent_across_accessors() {
        let map = CaptureMap::new(None);

        assert!(matches!(map.get("word"), Err(Error::NoPattern)));
        assert!(matches!(map.contains_key("word"), Err(Error::NoPattern)));
        assert!(matches!(map.keys(), Err(Error::NoPattern)));
        assert!(matches!(map.values(), Err(Error::NoPattern)));
        assert!(matches!(map.len(), Err(Error::NoPattern)));
        assert!(matches!(map.is_empty(), Err(Error::NoPattern)));
        assert!(matches!(map.snapshot(), Err(Error::NoPattern)));
        assert!(map.iter().is_err());
        assert!(matches!(
            map.ready_within(Duration::from_millis(1)),
            Err(Error::NoPattern)
        ));
    }

    #[test]
    fn test_lookup_and_enumeration() {
        let map = sample();

        assert_eq!(
            map.get("word").unwrap(),
            Some(&["alpha".to_string(), "beta".to_string()][..])
        );
        assert_eq!(map.get("digit").unwrap(), Some(&[][..]));
        assert_eq!(map.get("missing").unwrap(), None);

        assert!(map.contains_key("digit").unwrap());
        assert!(!map.contains_key("missing").unwrap());

        assert_eq!(map.keys().unwrap(), vec!["word", "digit"]);
        assert_eq!(map.len().unwrap(), 2);
        assert!(!map.is_empty().unwrap());

        let entries: Vec<(String, usize)> = map
            .iter()
            .unwrap()
            .map(|(name, values)| (name.to_string(), values.len()))
            .collect();
        assert_eq!(
            entries,
            vec![("word".to_string(), 2), ("digit".to_string(), 0)]
        );
    }

    #[test]
    fn test_mutations_always_fail_read_only() {
        let map = sample();

        assert!(matches!(
            map.insert("word", vec!["x".to_string()]),
            Err(Error::ReadOnly)
        ));
        assert!(matches!(map.remove("word"), Err(Error::ReadOnly)));
        assert!(matches!(map.clear(), Err(Error::ReadOnly)));

        // The backing map is untouched.
        assert_eq!(map.len().unwrap(), 2);
    }

    #[test]
    fn test_faulted_stage_resurfaces_on_every_accessor() {
        let stage: Arc<StageCell<CaptureIndex>> = Arc::new(StageCell::new());
        stage.publish(Err(StageFault::new("page 3 unreadable")));
        let map = CaptureMap::new(Some(stage));

        for _ in 0..2 {
            match map.keys() {
                Err(Error::Extraction { reason }) => assert_eq!(reason, "page 3 unreadable"),
                other => panic!("expected extraction fault, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_ready_within_times_out_on_pending_stage() {
        let stage: Arc<StageCell<CaptureIndex>> = Arc::new(StageCell::new());
        let map = CaptureMap::new(Some(stage));

        assert!(matches!(
            map.ready_within(Duration::from_millis(10)),
            Err(Error::Timeout { .. })
        ));
    }

    #[test]
    fn test_empty_map_when_pattern_matched_nowhere() {
        let map = published(CaptureIndex::new());
        assert!(map.is_empty().unwrap());
        assert_eq!(map.len().unwrap(), 0);
        assert!(map.keys().unwrap().is_empty());
    }
}
