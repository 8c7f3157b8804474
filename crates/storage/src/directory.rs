//! Directory-backed contact store
//!
//! One JSON document per contact, named `<id>.json`, inside a store
//! directory. Every document is fsynced before `save_all` returns, so a
//! save costs roughly one file create + write + fsync per contact.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   3f1c...e9.json
//!   8a07...12.json
//! ```

use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xport_core::{ContactId, ContactRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::ContactStore;

const DOCUMENT_EXTENSION: &str = "json";

/// File-per-contact store, advertised as `"directory"`
///
/// # Thread Safety
///
/// Mutations are serialized via parking_lot::Mutex. Reads take no lock.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl DirectoryStore {
    /// Open (creating if needed) a store rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        info!(target: "xport::store", path = ?root, "opened directory store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, id: &ContactId) -> PathBuf {
        self.root.join(format!("{}.{}", id, DOCUMENT_EXTENSION))
    }

    fn write_document(&self, id: &ContactId, record: &ContactRecord) -> StoreResult<()> {
        let file = File::create(self.document_path(id))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    fn read_document(&self, id: &ContactId) -> StoreResult<ContactRecord> {
        let file = match File::open(self.document_path(id)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(*id))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl ContactStore for DirectoryStore {
    fn backend_name(&self) -> &'static str {
        "directory"
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        let _guard = self.write_lock.lock();
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let id = ContactId::new();
            self.write_document(&id, record)?;
            ids.push(id);
        }
        debug!(target: "xport::store", backend = "directory", count = ids.len(), "saved contacts");
        Ok(ids)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        ids.iter().map(|id| self.read_document(id)).collect()
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        if let Some(missing) = ids.iter().find(|id| !self.document_path(id).is_file()) {
            return Err(StoreError::NotFound(*missing));
        }
        for id in ids {
            fs::remove_file(self.document_path(id))?;
        }
        debug!(target: "xport::store", backend = "directory", count = ids.len(), "deleted contacts");
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn is_persistent(&self) -> bool {
        true
    }
}
