//! # Filesystem-backed credential store
//!
//! [`FileStore`] is a [`CredentialStore`] implementation that persists the
//! session trio to the local filesystem. It is used on desktop builds (and
//! native test runs) to keep the user logged in across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── credentials.json     # {"accessToken": "...", "refreshToken": "...", "user": "{...}"}
//! ```
//!
//! Every write rewrites the whole map, so a batch (`set_many`/`remove_many`)
//! lands in a single file write.
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/flock/` |
//! | Linux | `~/.local/share/flock/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\flock\` |

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::credentials::CredentialStore;

const FILE_NAME: &str = "credentials.json";

/// Filesystem-backed CredentialStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn path(&self) -> PathBuf {
        self.base.join(FILE_NAME)
    }

    fn load(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(self.path()) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {}: {}", FILE_NAME, e);
            BTreeMap::new()
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) {
        if entries.is_empty() {
            let _ = std::fs::remove_file(self.path());
            return;
        }
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::error!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        match serde_json::to_string_pretty(entries) {
            Ok(json) => {
                if let Err(e) = std::fs::write(self.path(), json) {
                    tracing::error!("Failed to write {}: {}", FILE_NAME, e);
                }
            }
            Err(e) => tracing::error!("Failed to encode credentials: {}", e),
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.write(&entries);
        }
    }

    fn set_many(&self, batch: &[(&str, String)]) {
        let mut entries = self.load();
        for (key, value) in batch {
            entries.insert(key.to_string(), value.clone());
        }
        self.write(&entries);
    }

    fn remove_many(&self, keys: &[&str]) {
        let mut entries = self.load();
        for key in keys {
            entries.remove(*key);
        }
        self.write(&entries);
    }
}
