// Single-person verification session with an OTP stub.
//
// There is no delivery channel: `request_otp` hands the code back to the
// caller, which is expected to pass it on out of band.
use log::{debug, info};
use ring::rand::{SecureRandom, SystemRandom};
use std::collections::HashMap;
use std::fmt;

use crate::utils::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpChannel {
    Aadhaar,
    Pan,
    DrivingLicense,
}

impl OtpChannel {
    fn accepts_number(&self, number: &str) -> bool {
        let length = number.chars().count();
        match self {
            OtpChannel::Aadhaar => length == 12,
            OtpChannel::Pan => length == 10,
            OtpChannel::DrivingLicense => length >= 8,
        }
    }
}

impl fmt::Display for OtpChannel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OtpChannel::Aadhaar => write!(f, "Aadhaar"),
            OtpChannel::Pan => write!(f, "PAN"),
            OtpChannel::DrivingLicense => write!(f, "Driving License"),
        }
    }
}

#[derive(Debug, Clone)]
struct OtpRecord {
    code: String,
    verified: bool,
}

pub struct VerificationSession {
    active_user: Option<String>,
    otps: HashMap<OtpChannel, OtpRecord>,
    rng: SystemRandom,
}

impl VerificationSession {
    pub fn new() -> Self {
        VerificationSession {
            active_user: None,
            otps: HashMap::new(),
            rng: SystemRandom::new(),
        }
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    /// The first client to claim the session holds it until `reset`.
    pub fn claim(&mut self, client: &str) -> Result<(), SessionError> {
        match &self.active_user {
            None => {
                info!("Verification session claimed");
                self.active_user = Some(client.to_string());
                Ok(())
            }
            Some(active) if active == client => Ok(()),
            Some(_) => Err(SessionError::Locked),
        }
    }

    /// Issue a fresh 6-digit code for the channel, replacing any earlier one.
    pub fn request_otp(&mut self, channel: OtpChannel, number: &str) -> Result<String, SessionError> {
        if !channel.accepts_number(number.trim()) {
            return Err(SessionError::InvalidNumber(channel));
        }

        let code = self.generate_code()?;
        self.otps.insert(
            channel,
            OtpRecord {
                code: code.clone(),
                verified: false,
            },
        );
        debug!("Issued {} OTP", channel);
        Ok(code)
    }

    pub fn confirm_otp(&mut self, channel: OtpChannel, otp: &str) -> Result<(), SessionError> {
        match self.otps.get_mut(&channel) {
            Some(record) if record.code == otp => {
                record.verified = true;
                info!("{} verified via OTP", channel);
                Ok(())
            }
            _ => Err(SessionError::InvalidOtp(channel)),
        }
    }

    pub fn is_verified(&self, channel: OtpChannel) -> bool {
        self.otps.get(&channel).map_or(false, |record| record.verified)
    }

    /// Release the lock and forget every code so the next person can start.
    pub fn reset(&mut self) {
        self.active_user = None;
        self.otps.clear();
        info!("Verification session reset");
    }

    // 100000..=999999
    fn generate_code(&self) -> Result<String, SessionError> {
        let mut bytes = [0u8; 4];
        self.rng.fill(&mut bytes).map_err(|_| SessionError::Rng)?;
        let value = 100_000 + u32::from_le_bytes(bytes) % 900_000;
        Ok(value.to_string())
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_user_lock() {
        let mut session = VerificationSession::new();
        assert_eq!(session.claim("10.0.0.1"), Ok(()));
        assert_eq!(session.claim("10.0.0.1"), Ok(()));
        assert_eq!(session.claim("10.0.0.2"), Err(SessionError::Locked));
        assert_eq!(session.active_user(), Some("10.0.0.1"));

        session.reset();
        assert_eq!(session.active_user(), None);
        assert_eq!(session.claim("10.0.0.2"), Ok(()));
    }

    #[test]
    fn test_otp_round_trip() {
        let mut session = VerificationSession::new();
        let code = session.request_otp(OtpChannel::Aadhaar, "123456789012").unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(!session.is_verified(OtpChannel::Aadhaar));

        assert_eq!(
            session.confirm_otp(OtpChannel::Aadhaar, "not-it"),
            Err(SessionError::InvalidOtp(OtpChannel::Aadhaar))
        );
        assert_eq!(session.confirm_otp(OtpChannel::Aadhaar, &code), Ok(()));
        assert!(session.is_verified(OtpChannel::Aadhaar));
        assert!(!session.is_verified(OtpChannel::Pan));
    }

    #[test]
    fn test_number_length_rules() {
        let mut session = VerificationSession::new();
        assert_eq!(
            session.request_otp(OtpChannel::Aadhaar, "12345"),
            Err(SessionError::InvalidNumber(OtpChannel::Aadhaar))
        );
        assert!(session.request_otp(OtpChannel::Pan, "ABCDE1234F").is_ok());
        assert_eq!(
            session.request_otp(OtpChannel::Pan, "ABCDE1234"),
            Err(SessionError::InvalidNumber(OtpChannel::Pan))
        );
        assert!(session.request_otp(OtpChannel::DrivingLicense, "MH1220110012345").is_ok());
        assert_eq!(
            session.request_otp(OtpChannel::DrivingLicense, "MH12"),
            Err(SessionError::InvalidNumber(OtpChannel::DrivingLicense))
        );
    }

    #[test]
    fn test_codes_stay_six_digits() {
        let session = VerificationSession::new();
        for _ in 0..200 {
            let value: u32 = session.generate_code().unwrap().parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_otp_without_request_is_rejected() {
        let mut session = VerificationSession::new();
        assert_eq!(
            session.confirm_otp(OtpChannel::Pan, "123456"),
            Err(SessionError::InvalidOtp(OtpChannel::Pan))
        );
    }

    #[test]
    fn test_reset_clears_codes() {
        let mut session = VerificationSession::new();
        let code = session.request_otp(OtpChannel::Pan, "ABCDE1234F").unwrap();
        session.confirm_otp(OtpChannel::Pan, &code).unwrap();
        session.reset();
        assert!(!session.is_verified(OtpChannel::Pan));
        assert!(session.confirm_otp(OtpChannel::Pan, &code).is_err());
    }
}
