//! Email syntax validation backed by the `validator` crate.

use validator::ValidateEmail;

use crate::error::Result;
use crate::presentation::protocols::EmailValidator;

/// HTML5 / RFC 5322 syntax check, no network involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailValidatorAdapter;

impl EmailValidatorAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl EmailValidator for EmailValidatorAdapter {
    fn is_valid(&self, email: &str) -> Result<bool> {
        Ok(email.validate_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        let sut = EmailValidatorAdapter::new();

        assert!(sut.is_valid("valid_email@mail.com").unwrap());
        assert!(sut.is_valid("first.last+tag@sub.example.org").unwrap());
    }

    #[test]
    fn test_invalid_emails() {
        let sut = EmailValidatorAdapter::new();

        for email in ["", "invalid_email", "@mail.com", "a@", "a b@mail.com"] {
            assert!(!sut.is_valid(email).unwrap(), "{email} accepted");
        }
    }
}
