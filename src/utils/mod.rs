pub mod error;

pub use error::{SessionError, VerifyError};
