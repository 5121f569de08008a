//! The output directory and the names of the files written to it.

use crate::{csv, error::PlotError};
use deriv_compute::numerical::Sample;
use log::{debug, info};
use rand::Rng;
use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, ErrorKind},
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "png")]
use crate::graph::Graph;

/// How many fresh ids to try before giving up on finding an unused file name.
const MAX_ATTEMPTS: usize = 16;

/// A source of ids for artifact names.
///
/// Every call should return an id that the same generator has not returned before. The store
/// still refuses to overwrite an existing file, so an id that collides with a file from an
/// earlier run only costs another call.
pub trait IdGenerator: Send + Sync {
    /// Returns the next id.
    fn next_id(&self) -> String;
}

/// Numbers artifacts `1`, `2`, `3`, and so on.
#[derive(Debug)]
pub struct CounterIds(AtomicU64);

impl CounterIds {
    /// Creates a counter whose first id is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }
}

impl Default for CounterIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for CounterIds {
    fn next_id(&self) -> String {
        self.0.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Names artifacts by the time they were created, e.g. `1718000000000-0-3fa2`.
///
/// The millisecond timestamp is followed by a counter that is unique within the process and a
/// random suffix that separates processes started in the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIds {
    counter: AtomicU64,
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        let suffix: u16 = rand::thread_rng().gen();
        format!("{}-{}-{:04x}", millis, count, suffix)
    }
}

/// The directory that plots and data files are written to.
///
/// Create it once with [`ArtifactStore::init`] and share it; saving only needs `&self`.
pub struct ArtifactStore {
    dir: PathBuf,
    ids: Box<dyn IdGenerator>,
}

impl ArtifactStore {
    /// Creates the output directory, if it does not exist yet, and returns a store that writes
    /// into it.
    pub fn init(dir: impl Into<PathBuf>, ids: impl IdGenerator + 'static) -> Result<Self, PlotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("writing artifacts to `{}`", dir.display());
        Ok(Self { dir, ids: Box::new(ids) })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates a new file named `plot_<id>.<extension>`, picking ids until one is unused.
    fn create(&self, extension: &str) -> Result<(PathBuf, File), PlotError> {
        for _ in 0..MAX_ATTEMPTS {
            let path = self.dir.join(format!("plot_{}.{}", self.ids.next_id(), extension));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    debug!("`{}` already exists, trying another id", path.display());
                },
                Err(err) => return Err(err.into()),
            }
        }

        Err(PlotError::NameExhausted(self.dir.display().to_string(), MAX_ATTEMPTS))
    }

    /// Writes the samples as a new CSV file and returns its path.
    pub fn save_csv(&self, samples: &[Sample]) -> Result<PathBuf, PlotError> {
        let (path, file) = self.create("csv")?;
        csv::write_samples(samples, BufWriter::new(file))?;
        info!("wrote {} sample(s) to `{}`", samples.len(), path.display());
        Ok(path)
    }

    /// Draws the graph as a new PNG file and returns its path.
    #[cfg(feature = "png")]
    pub fn save_png(&self, graph: &Graph) -> Result<PathBuf, PlotError> {
        let surface = graph.draw()?;
        let (path, mut file) = self.create("png")?;
        surface.write_to_png(&mut file)?;
        info!("wrote plot to `{}`", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use super::*;

    /// A fresh directory under the system temporary directory.
    fn scratch_dir() -> PathBuf {
        let name: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!("deriv-graph-test-{:x}", name))
    }

    /// Always returns the same id.
    struct FixedId;

    impl IdGenerator for FixedId {
        fn next_id(&self) -> String {
            String::from("same")
        }
    }

    #[test]
    fn counter_ids() {
        let ids = CounterIds::default();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(CounterIds::starting_at(10).next_id(), "10");
    }

    #[test]
    fn timestamp_ids_are_unique() {
        let ids = TimestampIds::default();
        let set = (0..1000).map(|_| ids.next_id()).collect::<HashSet<_>>();
        assert_eq!(set.len(), 1000);
    }

    #[test]
    fn init_creates_directory() {
        let dir = scratch_dir().join("nested");
        let store = ArtifactStore::init(&dir, CounterIds::default()).unwrap();
        assert!(store.dir().is_dir());

        let path = store.save_csv(&[Sample { x: 0.0, y: 5.0 }]).unwrap();
        assert_eq!(path, dir.join("plot_1.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "x,y\n0,5\n");

        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn concurrent_saves_never_collide() {
        let dir = scratch_dir();
        let store = ArtifactStore::init(&dir, TimestampIds::default()).unwrap();
        let samples = [Sample { x: 1.0, y: 2.0 }];

        let paths = std::thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| scope.spawn(|| store.save_csv(&samples).unwrap()))
                .collect::<Vec<_>>();
            handles.into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<HashSet<_>>()
        });
        assert_eq!(paths.len(), 8);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = scratch_dir();
        let store = ArtifactStore::init(&dir, FixedId).unwrap();
        store.save_csv(&[]).unwrap();

        let err = store.save_csv(&[]).unwrap_err();
        assert!(matches!(err, PlotError::NameExhausted(_, MAX_ATTEMPTS)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
