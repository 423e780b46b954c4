//! Domain validation errors.

use std::fmt;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }
}

/// Errors that can occur during form field validation.
///
/// Always local and synchronous; the user recovers by correcting the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The field is empty after trimming.
    Required(Field),

    /// The field is present but does not have the expected shape.
    InvalidFormat(Field),
}

impl ValidationError {
    /// The field that failed.
    pub fn field(&self) -> Field {
        match self {
            Self::Required(field) | Self::InvalidFormat(field) => *field,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::InvalidFormat(Field::Email) => write!(f, "Please enter a valid email"),
            Self::InvalidFormat(field) => {
                write!(f, "Please enter a valid {}", field.label().to_lowercase())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
