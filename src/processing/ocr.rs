use crate::config::Config;
use crate::utils::VerifyError;
use image::{GrayImage, ImageFormat};
use log::debug;
use tesseract::Tesseract;

/// Turns a normalized single-channel image into raw text.
///
/// Implementations must not keep per-request state: one recognizer is shared
/// by every request a `DocumentVerifier` serves.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &GrayImage) -> Result<String, VerifyError>;
}

/// Tesseract-backed recognizer. A fresh engine is created for every call.
pub struct TesseractRecognizer {
    language: String,
    tessdata_dir: Option<String>,
}

impl TesseractRecognizer {
    pub fn new(config: &Config) -> Self {
        TesseractRecognizer {
            language: config.language.clone(),
            tessdata_dir: config
                .tessdata_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String, VerifyError> {
        // Dropped (and deleted) on every return path below.
        let temp_file = tempfile::Builder::new()
            .prefix("idscan-")
            .suffix(".png")
            .tempfile()?;

        image
            .save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| VerifyError::Recognition(format!("Failed to write normalized image: {}", e)))?;

        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| VerifyError::Recognition("Temporary path is not valid UTF-8".to_string()))?;

        let mut tess = Tesseract::new(self.tessdata_dir.as_deref(), Some(&self.language))
            .map_err(|e| VerifyError::Recognition(format!("Tesseract init error: {}", e)))?
            .set_image(path_str)
            .map_err(|e| VerifyError::Recognition(format!("Tesseract set image error: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| VerifyError::Recognition(format!("Tesseract error: {}", e)))?;

        debug!("Tesseract ({}) returned {} bytes of text", self.language, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_recognizer_takes_settings_from_config() {
        let config = Config {
            language: "hin".to_string(),
            tessdata_dir: Some(PathBuf::from("/opt/tessdata")),
        };
        let recognizer = TesseractRecognizer::new(&config);
        assert_eq!(recognizer.language, "hin");
        assert_eq!(recognizer.tessdata_dir.as_deref(), Some("/opt/tessdata"));
    }
}
