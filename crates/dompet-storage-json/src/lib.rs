//! Filesystem-backed JSON persistence for the books.
//!
//! Each top-level collection lives under its own key as a
//! full-collection snapshot (`wallets.json`, `transactions.json`, …);
//! writes are read-modify-write of the whole collection, never row
//! level. Files are written atomically via a temp file and rename.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use dompet_core::{BooksStorage, CoreError};
use dompet_domain::{Books, BudgetView};

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

const WALLETS_KEY: &str = "wallets";
const CATEGORIES_KEY: &str = "categories";
const TRANSACTIONS_KEY: &str = "transactions";
const BUDGETS_KEY: &str = "budgets";
const RECURRING_KEY: &str = "recurring";
const DEBTS_KEY: &str = "debts";
const SHOPPING_LISTS_KEY: &str = "shopping_lists";
const TEMPLATES_KEY: &str = "templates";
const META_KEY: &str = "meta";

const ALL_KEYS: [&str; 9] = [
    WALLETS_KEY,
    CATEGORIES_KEY,
    TRANSACTIONS_KEY,
    BUDGETS_KEY,
    RECURRING_KEY,
    DEBTS_KEY,
    SHOPPING_LISTS_KEY,
    TEMPLATES_KEY,
    META_KEY,
];

/// Everything on the books that is not a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BooksMeta {
    budget_view: BudgetView,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// JSON snapshot store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStorage {
    data_dir: PathBuf,
}

impl JsonSnapshotStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Roots the store at the user-configured data directory.
    pub fn from_config(config: &dompet_config::Config) -> Result<Self, CoreError> {
        Self::new(config.resolve_data_root())
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", key, SNAPSHOT_EXTENSION))
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let data =
            serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn read_meta(&self) -> Result<Option<BooksMeta>, CoreError> {
        let path = self.key_path(META_KEY);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|err| CoreError::Serde(err.to_string()))
    }
}

impl BooksStorage for JsonSnapshotStorage {
    fn save_books(&self, books: &Books) -> Result<(), CoreError> {
        self.write_key(WALLETS_KEY, &books.wallets)?;
        self.write_key(CATEGORIES_KEY, &books.categories)?;
        self.write_key(TRANSACTIONS_KEY, &books.transactions)?;
        self.write_key(BUDGETS_KEY, &books.budgets)?;
        self.write_key(RECURRING_KEY, &books.recurring)?;
        self.write_key(DEBTS_KEY, &books.debts)?;
        self.write_key(SHOPPING_LISTS_KEY, &books.shopping_lists)?;
        self.write_key(TEMPLATES_KEY, &books.templates)?;
        self.write_key(
            META_KEY,
            &BooksMeta {
                budget_view: books.budget_view,
                created_at: books.created_at,
                updated_at: books.updated_at,
            },
        )
    }

    fn load_books(&self) -> Result<Books, CoreError> {
        let mut books = match self.read_meta()? {
            Some(meta) => {
                let mut books = Books::new(meta.created_at);
                books.budget_view = meta.budget_view;
                books.updated_at = meta.updated_at;
                books
            }
            None => Books::new(Utc::now()),
        };
        books.wallets = self.read_collection(WALLETS_KEY)?;
        books.categories = self.read_collection(CATEGORIES_KEY)?;
        books.transactions = self.read_collection(TRANSACTIONS_KEY)?;
        books.budgets = self.read_collection(BUDGETS_KEY)?;
        books.recurring = self.read_collection(RECURRING_KEY)?;
        books.debts = self.read_collection(DEBTS_KEY)?;
        books.shopping_lists = self.read_collection(SHOPPING_LISTS_KEY)?;
        books.templates = self.read_collection(TEMPLATES_KEY)?;
        Ok(books)
    }

    fn clear_all(&self) -> Result<(), CoreError> {
        for key in ALL_KEYS {
            let path = self.key_path(key);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
