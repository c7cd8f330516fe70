use crate::utils::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Key the favorite keywords are stored under.
pub const FAVORITES_KEY: &str = "favoriteKeywords";

/// Small string key/value persistence, the way a browser's local storage works.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Keeps all keys in one JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Lowercase keywords marking dishes the reader likes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    keywords: Vec<String>,
}

impl Favorites {
    /// Parses comma separated input such as `"svíčková, Guláš"`.
    pub fn parse(input: &str) -> Self {
        Self {
            keywords: input
                .split(',')
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches(&self, item_name: &str) -> bool {
        let name = item_name.to_lowercase();
        self.keywords.iter().any(|keyword| name.contains(keyword.as_str()))
    }

    /// Reads the stored keywords. A missing or unreadable value means no
    /// favorites.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        let Some(raw) = store.get(FAVORITES_KEY)? else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keywords) => Ok(Self { keywords }),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring stored favorites: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<()> {
        store.set(FAVORITES_KEY, serde_json::to_string(&self.keywords)?)
    }
}

impl std::fmt::Display for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keywords.join(", "))
    }
}
