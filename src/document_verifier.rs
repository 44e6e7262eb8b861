use crate::config::Config;
use crate::models::*;
use crate::processing::{clean_lines, FieldExtractor, ImageProcessor, TesseractRecognizer, TextRecognizer};
use crate::utils::VerifyError;
use crate::validation::IdentifierValidator;
use log::{debug, error, info};
use sha2::{Digest, Sha256};
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const UNKNOWN_TYPE_FEEDBACK: &str = "Unknown document type";

/// Result of the text stages alone, without an identifier decision.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub lines: Vec<String>,
    pub details: ExtractedDetails,
}

pub struct DocumentVerifier<R: TextRecognizer = TesseractRecognizer> {
    recognizer: R,
}

impl DocumentVerifier<TesseractRecognizer> {
    pub fn new(config: &Config) -> Self {
        DocumentVerifier {
            recognizer: TesseractRecognizer::new(config),
        }
    }
}

impl<R: TextRecognizer> DocumentVerifier<R> {
    pub fn with_recognizer(recognizer: R) -> Self {
        DocumentVerifier { recognizer }
    }

    /// Verify one request. Never fails: every error, and any panic from the
    /// pipeline, comes back as a `Rejected` result.
    pub fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        match catch_unwind(AssertUnwindSafe(|| self.try_verify(request))) {
            Ok(Ok(result)) => {
                info!(
                    "Verification of {} document finished: {:?}",
                    request.document_type.trim(),
                    result.status
                );
                result
            }
            Ok(Err(err)) if err.is_input_error() => {
                error!("Rejected malformed request: {}", err);
                VerificationResult::rejected(err.to_string())
            }
            Ok(Err(err)) => {
                error!("Error verifying document: {}", err);
                VerificationResult::rejected(format!("Server error: {}", err))
            }
            Err(panic) => {
                let cause = panic_message(panic.as_ref());
                error!("Verification pipeline panicked: {}", cause);
                VerificationResult::rejected(format!("Server error: {}", cause))
            }
        }
    }

    fn try_verify(&self, request: &VerificationRequest) -> Result<VerificationResult, VerifyError> {
        if request.image.is_empty() {
            return Err(VerifyError::MissingField("image"));
        }
        if request.document_type.trim().is_empty() {
            return Err(VerifyError::MissingField("document_type"));
        }
        if request.user_input.trim().is_empty() {
            return Err(VerifyError::MissingField("user_input"));
        }

        let document_type = match request.document_type.parse::<DocumentType>() {
            Ok(document_type) => document_type,
            Err(_) => return Ok(VerificationResult::rejected(UNKNOWN_TYPE_FEEDBACK)),
        };

        info!(
            "Verifying {} document (image sha256={:x}, {} bytes)",
            document_type,
            Sha256::digest(&request.image),
            request.image.len()
        );

        let text = self.recognize_bytes(&request.image)?;
        Ok(Self::verify_text(document_type, &text, &request.user_input))
    }

    /// Decode, normalize and recognize an uploaded image.
    pub fn recognize_bytes(&self, image_data: &[u8]) -> Result<String, VerifyError> {
        let normalized = ImageProcessor::process_bytes(image_data)?;
        let text = self.recognizer.recognize(&normalized)?;
        debug!("OCR text extracted:\n{}", text);
        Ok(text)
    }

    /// Run the line cleaner and field extractor over an uploaded image.
    pub fn extract(&self, image_data: &[u8]) -> Result<Extraction, VerifyError> {
        let text = self.recognize_bytes(image_data)?;
        Ok(Self::extract_text(&text))
    }

    pub fn extract_text(text: &str) -> Extraction {
        let lines = clean_lines(text);
        let details = FieldExtractor::extract(&lines);
        Extraction { lines, details }
    }

    /// Everything after recognition: clean, extract, validate.
    /// Details ride along only on a `Verified` result.
    pub fn verify_text(document_type: DocumentType, text: &str, user_input: &str) -> VerificationResult {
        let Extraction { lines, details } = Self::extract_text(text);

        match IdentifierValidator::find_match(document_type, &lines, user_input) {
            Some(value) => VerificationResult::verified(document_type.verified_feedback(&value), details),
            None => VerificationResult::rejected(document_type.rejected_feedback()),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal failure".to_string()
    }
}
