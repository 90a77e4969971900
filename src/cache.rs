use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    /// Milliseconds since the Unix epoch
    stored_at: u64,
}

type Entries = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Converted page text keyed by page title.
///
/// Readers only ever see complete values. Entries older than the TTL are
/// treated as absent. When a snapshot path is set, every insert schedules a
/// background write of the whole cache to that file.
#[derive(Debug, Clone)]
pub struct DetailCache {
    entries: Entries,
    ttl: Option<Duration>,
    snapshot: Option<PathBuf>,
    persist_lock: Arc<Mutex<()>>,
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DetailCache {
    /// In-memory cache; `ttl` of `None` keeps entries forever
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            snapshot: None,
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Cache persisted to `path`, starting from the snapshot already there.
    ///
    /// A missing or unreadable snapshot starts an empty cache. Background
    /// writes after [`put`](Self::put) need a tokio runtime; without one
    /// nothing is written until [`flush`](Self::flush) runs inside a runtime.
    pub fn with_snapshot(path: impl AsRef<Path>, ttl: Option<Duration>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&contents) {
                Ok(entries) => {
                    ::log::debug!("Loaded {} cached pages from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    ::log::warn!("Ignoring unreadable cache {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                ::log::warn!("Failed to read cache {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            entries: Arc::new(RwLock::new(entries)),
            ttl,
            snapshot: Some(path),
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Look up a title, evicting it if it has expired
    pub async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !self.is_expired(entry) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| self.is_expired(entry)) {
            ::log::debug!("Cache entry expired: {}", key);
            entries.remove(key);
        }
        None
    }

    /// Store a converted value and schedule persistence without waiting for it
    pub async fn put(&self, key: &str, value: String) {
        {
            let mut entries = self.entries.write().await;
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    stored_at: now_millis(),
                },
            );
        }

        let Some(path) = self.snapshot.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            ::log::warn!(
                "No tokio runtime, not persisting cache to {} until flush",
                path.display()
            );
            return;
        };

        let entries = Arc::clone(&self.entries);
        let lock = Arc::clone(&self.persist_lock);
        runtime.spawn(async move {
            if let Err(e) = write_snapshot(&entries, &lock, &path).await {
                ::log::warn!("Failed to persist cache to {}: {}", path.display(), e);
            }
        });
    }

    /// Write the snapshot now and wait for it, if the cache has one
    pub async fn flush(&self) -> std::io::Result<()> {
        match &self.snapshot {
            Some(path) => write_snapshot(&self.entries, &self.persist_lock, path).await,
            None => Ok(()),
        }
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        match self.ttl {
            Some(ttl) => {
                let age = Duration::from_millis(now_millis().saturating_sub(entry.stored_at));
                age >= ttl
            }
            None => false,
        }
    }
}

/// Serialize the entries under the persist lock so the newest state lands last
async fn write_snapshot(entries: &Entries, lock: &Mutex<()>, path: &Path) -> std::io::Result<()> {
    let _guard = lock.lock().await;
    let json = {
        let entries = entries.read().await;
        serde_json::to_string(&*entries)?
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
