//! Domain value objects and form validation.
//!
//! Everything here is pure and deterministic: no I/O, no clocks. The value
//! objects validate at construction time so a submission that exists has
//! already passed every check.

pub mod email;
pub mod errors;
pub mod required;

pub use email::EmailAddress;
pub use errors::{Field, ValidationError};
pub use required::RequiredText;
