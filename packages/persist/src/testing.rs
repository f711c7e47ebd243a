//! Fakes for exercising stores without a disk or a thread pool.
//!
//! Available in this crate's tests and, for other crates, behind the
//! `test-utils` feature.

use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use trunk_directory::{FileSystem, PathResolver, RootedLocations};

use crate::{Codec, CodecError, DecodeVisitor, Dispatcher, Job, OutputFormat, Work};

#[derive(Clone, Debug)]
enum Entry {
    Dir,
    File(Vec<u8>),
}

/// An in-memory `FileSystem`.
///
/// Paths are compared literally; no normalization happens. Directories must
/// exist before files are written into them, as on a real disk.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, Entry>>>,
    fail_writes: Arc<Mutex<Option<io::ErrorKind>>>,
    fail_reads: Arc<Mutex<Option<io::ErrorKind>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that keeps every role below `/memory` in this filesystem.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(
            Arc::new(RootedLocations::new("/memory")),
            Arc::new(self.clone()),
        )
    }

    /// Make every later write fail with `kind`.
    pub fn fail_writes_with(self, kind: io::ErrorKind) -> Self {
        *self.fail_writes.lock().unwrap() = Some(kind);
        self
    }

    /// Make every later read fail with `kind`.
    pub fn fail_reads_with(self, kind: io::ErrorKind) -> Self {
        *self.fail_reads.lock().unwrap() = Some(kind);
        self
    }

    /// The contents of the file at `path`, if there is one.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Every file path, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.lock().unwrap().get(path), Some(Entry::Dir))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        for ancestor in ancestors.into_iter().rev() {
            match entries.get(ancestor) {
                Some(Entry::Dir) => {}
                Some(Entry::File(_)) => {
                    return Err(io::Error::other(format!(
                        "{} is not a directory",
                        ancestor.display()
                    )))
                }
                None => {
                    entries.insert(ancestor.to_path_buf(), Entry::Dir);
                }
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if let Some(kind) = *self.fail_reads.lock().unwrap() {
            return Err(io::Error::new(kind, "injected read failure"));
        }
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(bytes)) => Ok(bytes.clone()),
            Some(Entry::Dir) => Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(kind) = *self.fail_writes.lock().unwrap() {
            return Err(io::Error::new(kind, "injected write failure"));
        }
        let mut entries = self.entries.lock().unwrap();
        let parent = path.parent().ok_or_else(|| not_found(path))?;
        if !matches!(entries.get(parent), Some(Entry::Dir)) {
            return Err(not_found(parent));
        }
        if matches!(entries.get(path), Some(Entry::Dir)) {
            return Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            )));
        }
        entries.insert(path.to_path_buf(), Entry::File(bytes.to_vec()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(Entry::File(_)) => {
                entries.remove(path);
                Ok(())
            }
            _ => Err(not_found(path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if !matches!(entries.get(path), Some(Entry::Dir)) {
            return Err(not_found(path));
        }
        entries.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

/// A `Dispatcher` that only queues; tests decide when each side runs.
#[derive(Clone, Default)]
pub struct ManualDispatcher {
    background: Arc<Mutex<VecDeque<Work>>>,
    foreground: Arc<Mutex<VecDeque<Job>>>,
}

impl ManualDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_background(&self) -> usize {
        self.background.lock().unwrap().len()
    }

    pub fn pending_foreground(&self) -> usize {
        self.foreground.lock().unwrap().len()
    }

    /// Run queued background work, queueing the completions. Returns how many ran.
    pub fn run_background(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.background.lock().unwrap().pop_front();
            let Some(work) = next else {
                return ran;
            };
            let job = work();
            self.foreground.lock().unwrap().push_back(job);
            ran += 1;
        }
    }

    /// Run queued completions. Returns how many ran.
    pub fn run_foreground(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.foreground.lock().unwrap().pop_front();
            let Some(job) = next else {
                return ran;
            };
            job();
            ran += 1;
        }
    }

    /// Run everything queued on both sides.
    pub fn run_all(&self) -> usize {
        self.run_background();
        self.run_foreground()
    }
}

impl Dispatcher for ManualDispatcher {
    fn dispatch(&self, work: Work) {
        self.background.lock().unwrap().push_back(work);
    }
}

/// A `Codec` that fails every call.
#[derive(Clone, Debug)]
pub struct FailingCodec {
    message: String,
}

impl FailingCodec {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Codec for FailingCodec {
    fn encode(
        &self,
        _value: &dyn erased_serde::Serialize,
        _output: OutputFormat,
    ) -> Result<Vec<u8>, CodecError> {
        Err(CodecError::Other {
            message: self.message.clone(),
        })
    }

    fn decode<'de>(
        &self,
        _bytes: &'de [u8],
        _visit: &mut DecodeVisitor<'_, 'de>,
    ) -> Result<(), CodecError> {
        Err(CodecError::Other {
            message: self.message.clone(),
        })
    }
}
