use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::VerifyError;

pub const DEFAULT_LANGUAGE: &str = "eng";

/// OCR engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tesseract language code(s), e.g. `eng` or `eng+hin`.
    pub language: String,
    /// Directory holding the `.traineddata` files. `None` lets Tesseract
    /// use its compiled-in default.
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: DEFAULT_LANGUAGE.to_string(),
            tessdata_dir: None,
        }
    }
}

impl Config {
    /// Read `TESSDATA_PREFIX` and `IDSCAN_OCR_LANG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(lang) = lookup("IDSCAN_OCR_LANG").filter(|v| !v.trim().is_empty()) {
            config.language = lang.trim().to_string();
        }
        if let Some(dir) = lookup("TESSDATA_PREFIX").filter(|v| !v.trim().is_empty()) {
            config.tessdata_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Load a JSON config file. Absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, VerifyError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| VerifyError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| VerifyError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn with_overrides(mut self, language: Option<String>, tessdata_dir: Option<PathBuf>) -> Self {
        if let Some(language) = language {
            self.language = language;
        }
        if tessdata_dir.is_some() {
            self.tessdata_dir = tessdata_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_lookup() {
        let config = Config::from_lookup(|key| match key {
            "IDSCAN_OCR_LANG" => Some("eng+hin".to_string()),
            "TESSDATA_PREFIX" => Some("/usr/share/tessdata".to_string()),
            _ => None,
        });
        assert_eq!(config.language, "eng+hin");
        assert_eq!(config.tessdata_dir, Some(PathBuf::from("/usr/share/tessdata")));

        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"language": "hin"}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.language, "hin");
        assert_eq!(config.tessdata_dir, None);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "language = eng").unwrap();
        assert!(matches!(Config::load(file.path()), Err(VerifyError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("hin".to_string()), None);
        assert_eq!(config.language, "hin");
        assert_eq!(config.tessdata_dir, None);
    }
}
