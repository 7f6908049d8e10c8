use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    /// Default currency offered for new wallets and budgets.
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for the persisted books.
    /// Defaults to `~/Documents/Dompet`.
    pub data_root: Option<PathBuf>,

    #[serde(default)]
    pub load_demo_on_first_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "id-ID".into(),
            currency: "IDR".into(),
            data_root: None,
            load_demo_on_first_run: false,
        }
    }
}

impl Config {
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Dompet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_root_wins() {
        let config = Config {
            data_root: Some(PathBuf::from("/tmp/dompet-data")),
            ..Config::default()
        };
        assert_eq!(config.resolve_data_root(), PathBuf::from("/tmp/dompet-data"));
    }

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.currency, "IDR");
        assert!(!config.load_demo_on_first_run);
    }
}
