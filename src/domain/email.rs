//! EmailAddress value object.

use super::errors::{Field, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Something, an '@', something, a '.', something. Not anchored.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email shape regex is valid"));

/// A type-safe wrapper for email addresses submitted through the site forms.
///
/// The shape check only asks for a non-whitespace run,
/// an '@', another run, a '.', and a final run. It says nothing about
/// deliverability.
///
/// # Example
///
/// ```
/// use sanduich_site::domain::EmailAddress;
///
/// let email = EmailAddress::parse("user@example.com").unwrap();
/// assert_eq!(email.as_str(), "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse a raw form value.
    ///
    /// # Errors
    ///
    /// - `ValidationError::Required(Field::Email)` if the value is blank
    /// - `ValidationError::InvalidFormat(Field::Email)` if it lacks the
    ///   `local@domain.tld` shape
    pub fn parse(email: &str) -> Result<Self, ValidationError> {
        let trimmed = email.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Required(Field::Email));
        }

        if !Self::is_valid(email) {
            return Err(ValidationError::InvalidFormat(Field::Email));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Shape check against the raw value.
    pub fn is_valid(email: &str) -> bool {
        EMAIL_SHAPE.is_match(email)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::parse("user@example.com").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_validates_format() {
        assert!(EmailAddress::parse("not-an-email").is_err());
        assert!(EmailAddress::parse("@example.com").is_err());
        assert!(EmailAddress::parse("user@").is_err());
        assert!(EmailAddress::parse("user@domain").is_err());
        assert!(EmailAddress::parse("user.name@domain").is_err());
        assert!(EmailAddress::parse("user@example.").is_err());
        assert!(EmailAddress::parse("a@b.c").is_ok());
        assert!(EmailAddress::parse("user.name+tag@example.co.uk").is_ok());
    }

    #[test]
    fn test_blank_is_required_not_invalid() {
        assert_eq!(
            EmailAddress::parse("   "),
            Err(ValidationError::Required(Field::Email))
        );
        assert_eq!(
            EmailAddress::parse("nope"),
            Err(ValidationError::InvalidFormat(Field::Email))
        );
    }

    #[test]
    fn test_permissive_shape() {
        // Not RFC validation: a double '@' still has the required shape
        assert!(EmailAddress::parse("user@@example.com").is_ok());
        assert!(EmailAddress::parse("user @example.com").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let email = EmailAddress::parse("  user@example.com ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_serialization() {
        let email = EmailAddress::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
    }

    #[test]
    fn test_email_deserialization_invalid_fails() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }
}
