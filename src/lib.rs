pub mod config;
pub mod document_verifier;
pub mod models;
pub mod processing;
pub mod session;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use document_verifier::DocumentVerifier;
pub use models::{DocumentType, ExtractedDetails, Gender, VerificationRequest, VerificationResult, VerificationStatus};
pub use session::{OtpChannel, VerificationSession};
