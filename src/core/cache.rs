//! Lazily built, per-version index cache.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::index::IndexedDataset;
use crate::dataset::{DataVersion, Dataset};

/// Owns a dataset and builds each corpus version's index at most once.
///
/// Concurrent first calls for the same version block on a single build.
/// Built indexes are shared through `Arc` and never mutated.
#[derive(Debug)]
pub struct IndexCache {
    dataset: Arc<Dataset>,
    v1: OnceCell<Arc<IndexedDataset>>,
    v2: OnceCell<Arc<IndexedDataset>>,
}

impl IndexCache {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_shared(Arc::new(dataset))
    }

    pub fn with_shared(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            v1: OnceCell::new(),
            v2: OnceCell::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The index for `version`, built on first request.
    pub fn get(&self, version: DataVersion) -> Arc<IndexedDataset> {
        let slot = self.slot(version);
        if let Some(index) = slot.get() {
            tracing::trace!(%version, "index cache hit");
            return Arc::clone(index);
        }
        Arc::clone(slot.get_or_init(|| {
            tracing::debug!(%version, "index cache miss, building");
            Arc::new(IndexedDataset::build(&self.dataset, version))
        }))
    }

    pub fn is_built(&self, version: DataVersion) -> bool {
        self.slot(version).get().is_some()
    }

    /// Drop every built index. The next `get` rebuilds.
    pub fn reset(&mut self) {
        self.v1.take();
        self.v2.take();
        tracing::debug!("index cache reset");
    }

    fn slot(&self, version: DataVersion) -> &OnceCell<Arc<IndexedDataset>> {
        match version {
            DataVersion::V1 => &self.v1,
            DataVersion::V2 => &self.v2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::suggest::{suggest, Weights};
    use crate::dataset::{ContextSource, CorporaSource, DatasetSource, Emoji};
    use std::collections::BTreeMap;
    use std::thread;

    fn cache() -> IndexCache {
        IndexCache::new(
            Dataset::from_source(DatasetSource {
                emoji: vec![Emoji::new("rocket", "🚀"), Emoji::new("tada", "🎉")],
                context: CorporaSource {
                    v1: vec![ContextSource::new(&["launch"], &["rocket"])],
                    v2: vec![ContextSource::new(&["party"], &["tada"])],
                },
                word: BTreeMap::new(),
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_builds_once_per_version() {
        let cache = cache();
        assert!(!cache.is_built(DataVersion::V1));

        let first = cache.get(DataVersion::V1);
        let second = cache.get(DataVersion::V1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_built(DataVersion::V1));
        assert!(!cache.is_built(DataVersion::V2));
    }

    #[test]
    fn test_versions_do_not_mix() {
        let cache = cache();
        let weights = Weights::default();
        let v1 = cache.get(DataVersion::V1);
        let v2 = cache.get(DataVersion::V2);

        assert_eq!(suggest("launch party", &v1, &weights).len(), 1);
        assert_eq!(suggest("launch party", &v1, &weights)[0].id, "rocket");
        assert_eq!(suggest("launch party", &v2, &weights)[0].id, "tada");
        assert_eq!(v1.version(), DataVersion::V1);
        assert_eq!(v2.version(), DataVersion::V2);
    }

    #[test]
    fn test_reset_rebuilds() {
        let mut cache = cache();
        let before = cache.get(DataVersion::V2);
        cache.reset();
        assert!(!cache.is_built(DataVersion::V2));
        let after = cache.get(DataVersion::V2);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_concurrent_first_get_shares_instance() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get(DataVersion::V2))
            })
            .collect();
        let indexes: Vec<Arc<IndexedDataset>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(indexes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
