use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::VerifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Aadhaar,
    Pan,
    Apaar,
}

impl DocumentType {
    /// Feedback for a line that passed both the format and the equality check.
    pub fn verified_feedback(&self, value: &str) -> String {
        match self {
            DocumentType::Aadhaar => format!("Valid Aadhaar detected: {}", value),
            DocumentType::Pan => format!("Valid PAN detected: {}", value),
            DocumentType::Apaar => format!("Valid APAAR ID detected: {}", value),
        }
    }

    pub fn rejected_feedback(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "No valid Aadhaar number detected or mismatch with input",
            DocumentType::Pan => "No valid PAN number detected or mismatch with input",
            DocumentType::Apaar => "No valid APAAR ID detected or mismatch with input",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentType::Aadhaar => write!(f, "aadhaar"),
            DocumentType::Pan => write!(f, "pan"),
            DocumentType::Apaar => write!(f, "apaar"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aadhaar" => Ok(DocumentType::Aadhaar),
            "pan" => Ok(DocumentType::Pan),
            "apaar" => Ok(DocumentType::Apaar),
            _ => Err(UnknownDocumentType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Map a matched gender token onto the fixed three-way lookup.
    /// Anything that is not a male or female token is `Other`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "male" | "m" | "पुरुष" => Gender::Male,
            "female" | "f" | "महिला" | "स्त्री" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Fields pulled out of the recognized text. A `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl ExtractedDetails {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.dob.is_none() && self.gender.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ExtractedDetails>,
}

impl VerificationResult {
    pub fn verified(feedback: String, details: ExtractedDetails) -> Self {
        VerificationResult {
            status: VerificationStatus::Verified,
            feedback,
            details: Some(details),
        }
    }

    pub fn rejected(feedback: impl Into<String>) -> Self {
        VerificationResult {
            status: VerificationStatus::Rejected,
            feedback: feedback.into(),
            details: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }
}

/// One verification request. The document type stays a raw tag so that an
/// unknown type can be reported as a normal rejection.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub image: Vec<u8>,
    pub document_type: String,
    pub user_input: String,
}

impl VerificationRequest {
    pub fn new(image: Vec<u8>, document_type: impl Into<String>, user_input: impl Into<String>) -> Self {
        VerificationRequest {
            image,
            document_type: document_type.into(),
            user_input: user_input.into(),
        }
    }
}

/// JSON form of a request, with the image carried as standard base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub document_type: String,
    pub user_input: String,
    pub image_base64: String,
}

impl RequestEnvelope {
    pub fn into_request(self) -> Result<VerificationRequest, VerifyError> {
        let image = STANDARD
            .decode(self.image_base64.trim())
            .map_err(|e| VerifyError::InvalidRequest(format!("image_base64 is not valid base64: {}", e)))?;
        Ok(VerificationRequest::new(image, self.document_type, self.user_input))
    }
}
