use crate::models::DocumentType;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref AADHAAR_PATTERN: Regex = Regex::new(r"^[0-9]{4} [0-9]{4} [0-9]{4}$").unwrap();
    static ref PAN_PATTERN: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
    static ref APAAR_PATTERN: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
}

pub struct IdentifierValidator;

impl IdentifierValidator {
    /// Scan lines in order and return the value of the first line that both
    /// has the document's strict format and equals the user's input.
    pub fn find_match(document_type: DocumentType, lines: &[String], user_input: &str) -> Option<String> {
        lines
            .iter()
            .find_map(|line| Self::check_line(document_type, line, user_input))
    }

    /// The matched value to report, or `None` if the line fails either check.
    pub fn check_line(document_type: DocumentType, line: &str, user_input: &str) -> Option<String> {
        match document_type {
            DocumentType::Aadhaar => {
                if AADHAAR_PATTERN.is_match(line) && strip_spaces(line) == strip_spaces(user_input) {
                    Some(line.to_string())
                } else {
                    None
                }
            }
            DocumentType::Pan => {
                if PAN_PATTERN.is_match(line) && line == user_input {
                    Some(line.to_string())
                } else {
                    None
                }
            }
            DocumentType::Apaar => {
                let digits: String = line.chars().filter(|c| c.is_ascii_digit()).collect();
                if APAAR_PATTERN.is_match(&digits) && digits == user_input {
                    Some(digits)
                } else {
                    None
                }
            }
        }
    }
}

fn strip_spaces(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_aadhaar_ignores_spaces_in_comparison() {
        let input = lines(&["Government of India", "1234 5678 9012"]);
        for user_input in ["123456789012", "1234 5678 9012", " 1234  5678 9012 "] {
            assert_eq!(
                IdentifierValidator::find_match(DocumentType::Aadhaar, &input, user_input).as_deref(),
                Some("1234 5678 9012")
            );
        }
    }

    #[test]
    fn test_aadhaar_requires_grouped_format() {
        let input = lines(&["123456789012", "1234-5678-9012", "VID: 1234 5678 9012"]);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Aadhaar, &input, "123456789012"), None);
    }

    #[test]
    fn test_aadhaar_mismatch() {
        let input = lines(&["1234 5678 9012"]);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Aadhaar, &input, "123456789013"), None);
    }

    #[test]
    fn test_pan_is_exact() {
        let input = lines(&["INCOME TAX DEPARTMENT", "ABCDE1234F"]);
        assert_eq!(
            IdentifierValidator::find_match(DocumentType::Pan, &input, "ABCDE1234F").as_deref(),
            Some("ABCDE1234F")
        );
        assert_eq!(IdentifierValidator::find_match(DocumentType::Pan, &input, "abcde1234f"), None);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Pan, &input, "ABCDE 1234F"), None);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Pan, &input, " ABCDE1234F"), None);
    }

    #[test]
    fn test_pan_format_checked_on_line() {
        let input = lines(&["abcde1234f"]);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Pan, &input, "abcde1234f"), None);
    }

    #[test]
    fn test_apaar_strips_non_digits() {
        let input = lines(&["APAAR ID", "1234-5678-9012"]);
        assert_eq!(
            IdentifierValidator::find_match(DocumentType::Apaar, &input, "123456789012").as_deref(),
            Some("123456789012")
        );
    }

    #[test]
    fn test_apaar_needs_exactly_twelve_digits() {
        let input = lines(&["1234 5678 9012 3", "DOB 12/03/1990"]);
        assert_eq!(IdentifierValidator::find_match(DocumentType::Apaar, &input, "1234567890123"), None);
    }

    #[test]
    fn test_first_matching_line_wins() {
        let input = lines(&["ID 1234 5678 9012", "1234.5678.9012"]);
        assert_eq!(
            IdentifierValidator::find_match(DocumentType::Apaar, &input, "123456789012").as_deref(),
            Some("123456789012")
        );
        assert_eq!(
            IdentifierValidator::check_line(DocumentType::Apaar, "ID 1234 5678 9012", "123456789012").as_deref(),
            Some("123456789012")
        );
    }
}
