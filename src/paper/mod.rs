mod stitch;

use slotmap::SlotMap;

use crate::geometry::path::Path;
use crate::math::GeometryConfig;

slotmap::new_key_type! {
    /// Stable handle to a path stored on a [`Paper`].
    pub struct PathKey;
}

/// The canvas-level collection of path fragments.
///
/// Paths are stored in a slot map so that keys held elsewhere (the
/// pen's current path, a caller's bookmark) simply stop resolving when
/// stitching merges their path away, instead of dangling. A separate
/// list keeps draw order.
#[derive(Debug, Default)]
pub struct Paper {
    config: GeometryConfig,
    paths: SlotMap<PathKey, Path>,
    order: Vec<PathKey>,
}

impl Paper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: GeometryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Paths in draw order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.order.iter().filter_map(|key| self.paths.get(*key))
    }

    #[must_use]
    pub fn path(&self, key: PathKey) -> Option<&Path> {
        self.paths.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: PathKey) -> bool {
        self.paths.contains_key(key)
    }

    pub(crate) fn path_mut(&mut self, key: PathKey) -> Option<&mut Path> {
        self.paths.get_mut(key)
    }

    pub(crate) fn insert_path(&mut self, path: Path) -> PathKey {
        let key = self.paths.insert(path);
        self.order.push(key);
        key
    }

    pub(crate) fn remove_path(&mut self, key: PathKey) -> Option<Path> {
        let path = self.paths.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(path)
    }

    /// Reconnects path fragments that share endpoints into maximal
    /// continuous paths, closing loops where a fragment chain meets
    /// itself. Only mutually unique endpoint coincidences stitch;
    /// three or more paths meeting at one point stay apart.
    pub fn join_paths(&mut self) {
        stitch::join_paths(self);
    }

    /// Fuses redundant collinear segments in every path.
    pub fn fuse_paths(&mut self) {
        let config = self.config;
        for path in self.paths.values_mut() {
            path.fuse(&config);
        }
    }
}
