//! The persistent store.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use trunk_directory::{DirectorySelector, FileSystem, PathResolver};

use crate::{
    dates, Codec, CodecError, DateEncoding, Dispatcher, EncodingOptions, ForegroundHandle, Job,
    JsonCodec, OutputFormat, StoreError, TokioDispatcher,
};

/// Appended to every filename handed to the store.
pub const FILE_EXTENSION: &str = "json";

/// Saves serde values as JSON files and loads them back.
///
/// A record lives at `resolve(directory)/<filename>.json` and the file holds
/// nothing but the encoded value: no header, checksum or version. Loading a
/// record back into the type it was saved from yields an equal value.
///
/// # Concurrency
///
/// The synchronous operations run entirely on the calling thread. The
/// `_async` twins copy their inputs and the current `EncodingOptions` into a
/// background job and deliver the result to a callback on the foreground
/// context, exactly once. Async operations are scheduled independently, so two
/// of them may complete in either order. Nothing guards concurrent writers to
/// the same file: the last write to land wins.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = PersistentStore::rooted(dir.path(), foreground.handle())?;
/// store.save(&vec!["scissors", "matches", "tape"], "junk", &DirectorySelector::documents())?;
/// let junk: Vec<String> = store.load("junk", &DirectorySelector::documents())?;
/// ```
pub struct PersistentStore {
    engine: Engine,
    dispatcher: Arc<dyn Dispatcher>,
}

impl PersistentStore {
    pub fn new(
        resolver: PathResolver,
        codec: Arc<dyn Codec>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            engine: Engine {
                resolver,
                codec,
                options: EncodingOptions::default(),
            },
            dispatcher,
        }
    }

    /// The current user's platform directories, JSON on the local disk and a
    /// tokio background pool completing onto `foreground`.
    pub fn platform(foreground: ForegroundHandle) -> io::Result<Self> {
        Ok(Self::new(
            PathResolver::platform(),
            Arc::new(JsonCodec),
            Arc::new(TokioDispatcher::new(foreground)?),
        ))
    }

    /// Like `platform`, with every directory role kept below `root`.
    pub fn rooted(root: impl Into<PathBuf>, foreground: ForegroundHandle) -> io::Result<Self> {
        Ok(Self::new(
            PathResolver::rooted(root),
            Arc::new(JsonCodec),
            Arc::new(TokioDispatcher::new(foreground)?),
        ))
    }

    pub fn with_options(mut self, options: EncodingOptions) -> Self {
        self.engine.options = options;
        self
    }

    pub fn with_output_format(mut self, output: OutputFormat) -> Self {
        self.engine.options.output = output;
        self
    }

    pub fn with_date_encoding(mut self, dates: DateEncoding) -> Self {
        self.engine.options.dates = dates;
        self
    }

    pub fn options(&self) -> EncodingOptions {
        self.engine.options
    }

    pub fn set_options(&mut self, options: EncodingOptions) {
        self.engine.options = options;
    }

    pub fn set_output_format(&mut self, output: OutputFormat) {
        self.engine.options.output = output;
    }

    pub fn set_date_encoding(&mut self, dates: DateEncoding) {
        self.engine.options.dates = dates;
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.engine.resolver
    }

    /// Where `save` would put `filename`. Resolving may create the directory.
    pub fn file_path(
        &self,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<PathBuf, StoreError> {
        self.engine.file_path(filename, directory)
    }

    /// Whether a record named `filename` exists in `directory`.
    pub fn exists(&self, filename: &str, directory: &DirectorySelector) -> Result<bool, StoreError> {
        let path = self.engine.file_path(filename, directory)?;
        Ok(self.engine.filesystem().exists(&path))
    }

    /// Encode `value` and write it to `directory/<filename>.json`, replacing any
    /// previous contents.
    ///
    /// The write is not atomic: if it fails the file may be missing, truncated
    /// or unchanged.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<(), StoreError> {
        self.engine.save(value, filename, directory)
    }

    /// Read `directory/<filename>.json` and decode it as a `T`.
    pub fn load<T: DeserializeOwned>(
        &self,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<T, StoreError> {
        self.engine.load(filename, directory)
    }

    /// Remove the single file `directory/<filename>.json`.
    pub fn delete(&self, filename: &str, directory: &DirectorySelector) -> Result<(), StoreError> {
        self.engine.delete(filename, directory)
    }

    /// Remove the resolved directory and everything beneath it.
    pub fn delete_directory(&self, directory: &DirectorySelector) -> Result<(), StoreError> {
        self.engine.delete_directory(directory)
    }

    /// `save` on a background worker; `on_complete` gets the result on the
    /// foreground context.
    pub fn save_async<T, F>(
        &self,
        value: T,
        filename: impl Into<String>,
        directory: DirectorySelector,
        on_complete: F,
    ) where
        T: Serialize + Send + 'static,
        F: FnOnce(Result<(), StoreError>) + Send + 'static,
    {
        let filename = filename.into();
        self.run_async(
            move |engine| engine.save(&value, &filename, &directory),
            on_complete,
        );
    }

    /// `load` on a background worker; `on_complete` gets the result on the
    /// foreground context.
    pub fn load_async<T, F>(
        &self,
        filename: impl Into<String>,
        directory: DirectorySelector,
        on_complete: F,
    ) where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, StoreError>) + Send + 'static,
    {
        let filename = filename.into();
        self.run_async(
            move |engine| engine.load(&filename, &directory),
            on_complete,
        );
    }

    /// `delete` on a background worker.
    pub fn delete_async<F>(
        &self,
        filename: impl Into<String>,
        directory: DirectorySelector,
        on_complete: F,
    ) where
        F: FnOnce(Result<(), StoreError>) + Send + 'static,
    {
        let filename = filename.into();
        self.run_async(
            move |engine| engine.delete(&filename, &directory),
            on_complete,
        );
    }

    /// `delete_directory` on a background worker.
    pub fn delete_directory_async<F>(&self, directory: DirectorySelector, on_complete: F)
    where
        F: FnOnce(Result<(), StoreError>) + Send + 'static,
    {
        self.run_async(
            move |engine| engine.delete_directory(&directory),
            on_complete,
        );
    }

    fn run_async<R, Op, F>(&self, operation: Op, on_complete: F)
    where
        R: Send + 'static,
        Op: FnOnce(&Engine) -> Result<R, StoreError> + Send + 'static,
        F: FnOnce(Result<R, StoreError>) + Send + 'static,
    {
        // The job owns a snapshot of the store's state, never the store itself.
        let engine = self.engine.clone();
        self.dispatcher.dispatch(Box::new(move || -> Job {
            let result = operation(&engine);
            Box::new(move || on_complete(result))
        }));
    }
}

/// Everything a single operation needs, cheap to clone into a background job.
#[derive(Clone)]
struct Engine {
    resolver: PathResolver,
    codec: Arc<dyn Codec>,
    options: EncodingOptions,
}

impl Engine {
    fn filesystem(&self) -> &Arc<dyn FileSystem> {
        self.resolver.filesystem()
    }

    fn file_path(
        &self,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<PathBuf, StoreError> {
        validate_filename(filename)?;
        let dir = self.resolver.resolve(directory)?;
        Ok(record_path(&dir, filename))
    }

    fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<(), StoreError> {
        validate_filename(filename)?;
        let dir = self.resolver.resolve(directory)?;
        let bytes = self.encode(value)?;
        let path = record_path(&dir, filename);

        log::debug!("Writing {}...", path.display());
        self.filesystem()
            .write(&path, &bytes)
            .map_err(|source| StoreError::WriteFailed { path, source })
    }

    fn load<T: DeserializeOwned>(
        &self,
        filename: &str,
        directory: &DirectorySelector,
    ) -> Result<T, StoreError> {
        let path = self.file_path(filename, directory)?;

        log::debug!("Reading {}...", path.display());
        let bytes = match self.filesystem().read(&path) {
            Ok(bytes) => bytes,
            Err(source) => return Err(StoreError::ReadFailed { path, source }),
        };

        self.decode(&bytes)
            .map_err(|source| StoreError::DecodingFailed { path, source })
    }

    fn delete(&self, filename: &str, directory: &DirectorySelector) -> Result<(), StoreError> {
        let path = self.file_path(filename, directory)?;

        log::debug!("Deleting {}...", path.display());
        self.filesystem()
            .remove_file(&path)
            .map_err(|source| StoreError::DeleteFailed { path, source })
    }

    fn delete_directory(&self, directory: &DirectorySelector) -> Result<(), StoreError> {
        let path = self.resolver.resolve(directory)?;
        if *directory == DirectorySelector::Temp(None) {
            return Err(StoreError::ProtectedDirectory { path });
        }

        log::debug!("Deleting directory {}...", path.display());
        self.filesystem()
            .remove_dir_all(&path)
            .map_err(|source| StoreError::DeleteFailed { path, source })
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, StoreError> {
        let erased: &dyn erased_serde::Serialize = &value;
        dates::scoped(self.options.dates, || self.codec.encode(erased, self.options.output))
            .map_err(|source| StoreError::EncodingFailed { source })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let mut decoded = None;
        dates::scoped(self.options.dates, || {
            self.codec.decode(bytes, &mut |de| {
                decoded = Some(erased_serde::deserialize::<T>(de)?);
                Ok(())
            })
        })?;
        decoded.ok_or_else(|| CodecError::Other {
            message: "codec produced no value".to_string(),
        })
    }
}

fn record_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!("{}.{}", filename, FILE_EXTENSION))
}

fn validate_filename(filename: &str) -> Result<(), StoreError> {
    let message = if filename.is_empty() {
        "filename is empty"
    } else if filename == "." || filename == ".." {
        "filename may not be a relative directory"
    } else if filename.contains(['/', '\\']) {
        "filename may not contain path separators"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidFilename {
        filename: filename.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCodec, ManualDispatcher, MemoryFileSystem};
    use crate::ForegroundQueue;
    use serde::Deserialize;
    use std::sync::Mutex;
    use std::time::Duration;
    use trunk_directory::DirectoryError;
    use trunk_json_value::JsonValue;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Drawer {
        label: String,
        items: Vec<String>,
        depth_cm: f64,
    }

    fn drawer() -> Drawer {
        Drawer {
            label: "junk".to_string(),
            items: vec![
                "scissors".to_string(),
                "matches".to_string(),
                "tape".to_string(),
            ],
            depth_cm: 12.5,
        }
    }

    struct MemoryStore {
        fs: MemoryFileSystem,
        dispatcher: ManualDispatcher,
        store: PersistentStore,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self::with_fs(MemoryFileSystem::new())
        }

        fn with_fs(fs: MemoryFileSystem) -> Self {
            Self::with_codec(fs, Arc::new(JsonCodec))
        }

        fn with_codec(fs: MemoryFileSystem, codec: Arc<dyn Codec>) -> Self {
            let dispatcher = ManualDispatcher::new();
            let store = PersistentStore::new(fs.resolver(), codec, Arc::new(dispatcher.clone()));
            Self {
                fs,
                dispatcher,
                store,
            }
        }
    }

    #[test]
    fn save_then_load() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();

        t.store.save(&drawer(), "drawer", &docs).unwrap();
        let loaded: Drawer = t.store.load("drawer", &docs).unwrap();

        assert_eq!(loaded, drawer());
        assert_eq!(
            t.fs.files(),
            vec![PathBuf::from("/memory/documents/drawer.json")]
        );
    }

    #[test]
    fn wide_integers_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Ledger {
            total: u128,
            debt: i128,
        }

        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        let ledger = Ledger {
            total: u64::MAX as u128 + 1,
            debt: i64::MIN as i128 - 1,
        };

        t.store.save(&ledger, "ledger", &docs).unwrap();
        assert_eq!(
            t.fs.contents(Path::new("/memory/documents/ledger.json"))
                .unwrap(),
            br#"{"total":18446744073709551616,"debt":-9223372036854775809}"#
        );
        assert_eq!(t.store.load::<Ledger>("ledger", &docs).unwrap(), ledger);

        t.store.save(&u128::MAX, "max", &docs).unwrap();
        assert_eq!(t.store.load::<u128>("max", &docs).unwrap(), u128::MAX);
    }

    #[test]
    fn stored_file_is_just_the_value() {
        let t = MemoryStore::new();
        t.store
            .save(&vec![1, 2, 3], "numbers", &DirectorySelector::caches_at("n"))
            .unwrap();

        let bytes = t
            .fs
            .contents(Path::new("/memory/caches/n/numbers.json"))
            .unwrap();
        assert_eq!(bytes, b"[1,2,3]");
    }

    #[test]
    fn save_overwrites() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();

        t.store.save("first", "note", &docs).unwrap();
        t.store.save("second", "note", &docs).unwrap();

        assert_eq!(t.store.load::<String>("note", &docs).unwrap(), "second");
    }

    #[test]
    fn load_missing_file_is_read_failed() {
        let t = MemoryStore::new();

        let err = t
            .store
            .load::<Drawer>("absent", &DirectorySelector::documents())
            .unwrap_err();

        assert!(matches!(err, StoreError::ReadFailed { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn load_with_wrong_type_is_decoding_failed() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        t.store.save(&drawer(), "drawer", &docs).unwrap();

        let err = t.store.load::<Vec<u32>>("drawer", &docs).unwrap_err();

        match err {
            StoreError::DecodingFailed { path, .. } => {
                assert_eq!(path, PathBuf::from("/memory/documents/drawer.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn write_failure_propagates() {
        let t = MemoryStore::with_fs(
            MemoryFileSystem::new().fail_writes_with(io::ErrorKind::PermissionDenied),
        );

        let err = t
            .store
            .save(&drawer(), "drawer", &DirectorySelector::documents())
            .unwrap_err();

        assert!(matches!(err, StoreError::WriteFailed { .. }));
        assert!(t.fs.files().is_empty());
    }

    #[test]
    fn read_failure_propagates() {
        let fs = MemoryFileSystem::new();
        let t = MemoryStore::with_fs(fs.clone());
        t.store
            .save(&drawer(), "drawer", &DirectorySelector::documents())
            .unwrap();
        let t = MemoryStore::with_fs(fs.fail_reads_with(io::ErrorKind::PermissionDenied));

        let err = t
            .store
            .load::<Drawer>("drawer", &DirectorySelector::documents())
            .unwrap_err();

        assert!(matches!(err, StoreError::ReadFailed { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn codec_failures_are_reported_per_direction() {
        let t = MemoryStore::with_codec(
            MemoryFileSystem::new(),
            Arc::new(FailingCodec::new("codec offline")),
        );
        let docs = DirectorySelector::documents();

        let err = t.store.save(&drawer(), "drawer", &docs).unwrap_err();
        assert!(matches!(err, StoreError::EncodingFailed { .. }));
        assert!(err.to_string().contains("codec offline"));

        t.fs.write(Path::new("/memory/documents/drawer.json"), b"{}")
            .unwrap();
        let err = t.store.load::<Drawer>("drawer", &docs).unwrap_err();
        assert!(matches!(err, StoreError::DecodingFailed { .. }));
    }

    #[test]
    fn unserializable_value_is_encoding_failed() {
        let t = MemoryStore::new();
        let value = JsonValue::from(vec![JsonValue::Double(f64::NAN)]);

        let err = t
            .store
            .save(&value, "nan", &DirectorySelector::documents())
            .unwrap_err();

        assert!(matches!(err, StoreError::EncodingFailed { .. }));
    }

    #[test]
    fn directory_errors_surface() {
        let fs = MemoryFileSystem::new();
        // A file where the documents directory should be.
        fs.create_dir_all(Path::new("/memory")).unwrap();
        fs.write(Path::new("/memory/documents"), b"").unwrap();
        let t = MemoryStore::with_fs(fs);

        let err = t
            .store
            .save(&drawer(), "drawer", &DirectorySelector::documents_at("sub"))
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Directory(DirectoryError::UnableToCreateDirectory { .. })
        ));

        // The file sits exactly where the directory resolves to.
        let err = t
            .store
            .save(&drawer(), "drawer", &DirectorySelector::documents())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Directory(DirectoryError::UnableToCreateDirectory { .. })
        ));
        assert_eq!(
            t.fs.contents(Path::new("/memory/documents")).unwrap(),
            b""
        );
    }

    #[test]
    fn invalid_filenames_are_rejected_before_touching_disk() {
        let t = MemoryStore::new();

        for filename in ["", ".", "..", "a/b", "a\\b"] {
            let err = t
                .store
                .save(&1, filename, &DirectorySelector::documents())
                .unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidFilename { .. }),
                "{:?} should be rejected",
                filename
            );
        }
        assert!(!t.fs.exists(Path::new("/memory/documents")));
    }

    #[test]
    fn delete_removes_only_the_target() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        t.store.save(&1, "f", &docs).unwrap();
        t.store.save(&2, "g", &docs).unwrap();

        t.store.delete("f", &docs).unwrap();

        assert!(t.store.load::<i32>("f", &docs).unwrap_err().is_not_found());
        assert_eq!(t.store.load::<i32>("g", &docs).unwrap(), 2);
        assert!(!t.store.exists("f", &docs).unwrap());
        assert!(t.store.exists("g", &docs).unwrap());
    }

    #[test]
    fn delete_missing_file_fails() {
        let t = MemoryStore::new();

        let err = t
            .store
            .delete("ghost", &DirectorySelector::documents())
            .unwrap_err();

        assert!(matches!(err, StoreError::DeleteFailed { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_directory_removes_tree() {
        let t = MemoryStore::new();
        let exports = DirectorySelector::documents_at("exports");
        let nested = DirectorySelector::documents_at("exports/2024");
        let other = DirectorySelector::documents_at("other");
        t.store.save(&1, "a", &exports).unwrap();
        t.store.save(&2, "b", &nested).unwrap();
        t.store.save(&3, "c", &other).unwrap();

        t.store.delete_directory(&exports).unwrap();

        assert_eq!(
            t.fs.files(),
            vec![PathBuf::from("/memory/documents/other/c.json")]
        );
        assert!(matches!(
            t.store.load::<i32>("a", &exports),
            Err(StoreError::ReadFailed { .. })
        ));
    }

    #[test]
    fn delete_directory_of_missing_directory_succeeds() {
        let t = MemoryStore::new();
        t.store
            .delete_directory(&DirectorySelector::caches_at("never-written"))
            .unwrap();
        assert!(!t.fs.exists(Path::new("/memory/caches/never-written")));
    }

    #[test]
    fn bare_temp_root_is_protected() {
        let t = MemoryStore::new();
        let err = t
            .store
            .delete_directory(&DirectorySelector::temp())
            .unwrap_err();
        assert!(matches!(err, StoreError::ProtectedDirectory { .. }));
    }

    #[test]
    fn pretty_and_compact_output() {
        let mut t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        let path = Path::new("/memory/documents/drawer.json");

        t.store.save(&drawer(), "drawer", &docs).unwrap();
        let compact = t.fs.contents(path).unwrap();
        assert!(!compact.contains(&b'\n'));
        assert!(!compact.windows(2).any(|w| w == b": "));

        t.store.set_output_format(OutputFormat::Pretty);
        t.store.save(&drawer(), "drawer", &docs).unwrap();
        let pretty = String::from_utf8(t.fs.contents(path).unwrap()).unwrap();
        assert!(pretty.contains("\n  \"label\": \"junk\""));

        assert_eq!(t.store.load::<Drawer>("drawer", &docs).unwrap(), drawer());
    }

    #[test]
    fn date_encoding_follows_options() {
        use chrono::{DateTime, TimeZone, Utc};

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Receipt {
            #[serde(with = "crate::dates")]
            issued: DateTime<Utc>,
        }

        let receipt = Receipt {
            issued: Utc.with_ymd_and_hms(2001, 1, 2, 0, 0, 0).unwrap(),
        };
        let mut t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        let path = Path::new("/memory/documents/receipt.json");

        t.store.save(&receipt, "receipt", &docs).unwrap();
        assert_eq!(t.fs.contents(path).unwrap(), br#"{"issued":86400.0}"#);
        assert_eq!(t.store.load::<Receipt>("receipt", &docs).unwrap(), receipt);

        t.store.set_date_encoding(DateEncoding::Iso8601);
        // Files written earlier keep their encoding.
        assert!(t.store.load::<Receipt>("receipt", &docs).is_err());

        t.store.save(&receipt, "receipt", &docs).unwrap();
        assert_eq!(
            t.fs.contents(path).unwrap(),
            br#"{"issued":"2001-01-02T00:00:00Z"}"#
        );
        assert_eq!(t.store.load::<Receipt>("receipt", &docs).unwrap(), receipt);
    }

    #[test]
    fn async_save_completes_only_on_foreground() {
        let t = MemoryStore::new();
        let result = Arc::new(Mutex::new(None));

        let slot = result.clone();
        t.store
            .save_async(drawer(), "drawer", DirectorySelector::documents(), move |r| {
                *slot.lock().unwrap() = Some(r);
            });

        // Nothing happens on the calling thread.
        assert!(result.lock().unwrap().is_none());
        assert!(t.fs.files().is_empty());

        t.dispatcher.run_background();
        assert_eq!(t.fs.files().len(), 1);
        assert!(result.lock().unwrap().is_none());

        assert_eq!(t.dispatcher.run_foreground(), 1);
        assert!(matches!(*result.lock().unwrap(), Some(Ok(()))));
    }

    #[test]
    fn async_load_matches_sync_load() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents();
        t.store.save(&drawer(), "drawer", &docs).unwrap();
        let loaded = Arc::new(Mutex::new(Vec::new()));

        for name in ["drawer", "missing"] {
            let loaded = loaded.clone();
            t.store
                .load_async::<Drawer, _>(name, docs.clone(), move |r| {
                    loaded.lock().unwrap().push(r);
                });
        }
        assert_eq!(t.dispatcher.run_all(), 2);

        let loaded = loaded.lock().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].as_ref().unwrap(), &drawer());
        assert!(matches!(loaded[1], Err(StoreError::ReadFailed { .. })));
    }

    #[test]
    fn async_operations_snapshot_options() {
        let mut t = MemoryStore::new();
        let done = Arc::new(Mutex::new(0));

        let counter = done.clone();
        t.store
            .save_async(vec![1], "snap", DirectorySelector::documents(), move |r| {
                r.unwrap();
                *counter.lock().unwrap() += 1;
            });
        t.store.set_output_format(OutputFormat::Pretty);
        t.dispatcher.run_all();

        assert_eq!(*done.lock().unwrap(), 1);
        assert_eq!(
            t.fs.contents(Path::new("/memory/documents/snap.json")).unwrap(),
            b"[1]"
        );
    }

    #[test]
    fn async_deletes() {
        let t = MemoryStore::new();
        let docs = DirectorySelector::documents_at("d");
        t.store.save(&1, "f", &docs).unwrap();
        let results = Arc::new(Mutex::new(Vec::new()));

        let r = results.clone();
        t.store.delete_async("f", docs.clone(), move |res| {
            r.lock().unwrap().push(res.is_ok());
        });
        let r = results.clone();
        t.store.delete_directory_async(docs.clone(), move |res| {
            r.lock().unwrap().push(res.is_ok());
        });
        t.dispatcher.run_all();

        assert_eq!(*results.lock().unwrap(), vec![true, true]);
        assert!(t.fs.files().is_empty());
    }

    #[test]
    fn rooted_store_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let foreground = ForegroundQueue::new();
        let store = PersistentStore::rooted(dir.path(), foreground.handle())
            .unwrap()
            .with_output_format(OutputFormat::Pretty);
        let support = DirectorySelector::application_support();

        store.save(&drawer(), "drawer", &support).unwrap();
        assert!(dir.path().join("application-support/drawer.json").is_file());

        let received = Arc::new(Mutex::new(None));
        let slot = received.clone();
        store.load_async::<Drawer, _>("drawer", support, move |r| {
            *slot.lock().unwrap() = Some(r);
        });

        assert!(foreground.run_until(
            || received.lock().unwrap().is_some(),
            Duration::from_secs(5)
        ));
        let received = received.lock().unwrap().take().unwrap();
        assert_eq!(received.unwrap(), drawer());
    }
}
