//! Config directory bootstrap and YAML loading.
//!
//! The config directory holds the three documents an invoice run reads:
//!
//! | File | Contents |
//! |------|----------|
//! | `me.yml` | [`IssuerProfile`] |
//! | `client.yml` | [`ClientProfile`] |
//! | `translations.yml` | [`TranslationTable`] |
//!
//! Missing files are created from built-in templates on first run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::{ClientProfile, InvoiceData, IssuerProfile, TranslationTable};

/// Name of the per-user config directory inside the home directory.
pub const CONFIG_DIR_NAME: &str = ".invoice-generator";
pub const ISSUER_FILE: &str = "me.yml";
pub const CLIENT_FILE: &str = "client.yml";
pub const TRANSLATIONS_FILE: &str = "translations.yml";

/// Starter documents written by [`ConfigDir::init`], keyed by file name.
pub const TEMPLATES: [(&str, &str); 3] = [
    (ISSUER_FILE, include_str!("../../templates/me.yml")),
    (CLIENT_FILE, include_str!("../../templates/client.yml")),
    (TRANSLATIONS_FILE, include_str!("../../templates/translations.yml")),
];

/// Errors while preparing or reading the config directory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `$HOME` could not be determined.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// Reading, writing or creating a path failed.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document does not match its expected schema.
    #[error("malformed YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A directory holding `me.yml`, `client.yml` and `translations.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    path: PathBuf,
}

impl ConfigDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.invoice-generator`
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Create the directory and any missing documents from templates.
    /// Existing files are never touched. Returns the files created.
    pub fn init(&self) -> Result<Vec<PathBuf>, ConfigError> {
        if !self.path.exists() {
            fs::create_dir_all(&self.path).map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;
            log::info!("Config directory created: {}", self.path.display());
        }

        let mut created = Vec::new();
        for (name, template) in TEMPLATES {
            let path = self.file(name);
            if path.exists() {
                continue;
            }
            fs::write(&path, template).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            log::info!("Created template {}", path.display());
            created.push(path);
        }
        Ok(created)
    }

    pub fn load_issuer(&self) -> Result<IssuerProfile, ConfigError> {
        self.read_yaml(ISSUER_FILE)
    }

    pub fn load_client(&self) -> Result<ClientProfile, ConfigError> {
        self.read_yaml(CLIENT_FILE)
    }

    pub fn load_translations(&self) -> Result<TranslationTable, ConfigError> {
        self.read_yaml(TRANSLATIONS_FILE)
    }

    /// Load all three documents into one snapshot.
    pub fn load(&self) -> Result<InvoiceData, ConfigError> {
        Ok(InvoiceData {
            issuer: self.load_issuer()?,
            client: self.load_client()?,
            translations: self.load_translations()?,
        })
    }

    fn read_yaml<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        let path = self.file(name);
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let value = from_yaml_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded {}", path.display());
        Ok(value)
    }
}

/// Parse one document from a YAML string.
pub fn from_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys;

    #[test]
    fn templates_parse() {
        let issuer: IssuerProfile = from_yaml_str(TEMPLATES[0].1).unwrap();
        assert_eq!(issuer.address.zip, "10115");

        let client: ClientProfile = from_yaml_str(TEMPLATES[1].1).unwrap();
        assert_eq!(client.days_to_pay, 14);
        assert_eq!(client.items.len(), 2);

        let translations: TranslationTable = from_yaml_str(TEMPLATES[2].1).unwrap();
        for language in ["EN", "DE"] {
            assert!(
                translations.missing_keys(language).is_empty(),
                "{language} template lacks keys"
            );
        }
        assert_eq!(keys::ALL.len(), 18);
    }

    #[test]
    fn days_to_pay_defaults_to_fourteen() {
        let yaml = r#"
year: 2024
month: 1
invoice_id: "3"
vat_percentage: 19
items: []
company:
  name: ACME
  address: { street: Main 1, zip: "1000", place: Town }
"#;
        let client: ClientProfile = from_yaml_str(yaml).unwrap();
        assert_eq!(client.days_to_pay, 14);
        assert_eq!(client.company.vat_id, None);
    }
}
