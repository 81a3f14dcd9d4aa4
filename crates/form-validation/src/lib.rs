//! # Form Validation
//!
//! Runs an ordered list of [`Rule`]s against each declared field and keeps
//! the first failing message per field.
//!
//! ```rust
//! use form_validation::{rules, FormValidator};
//! use std::collections::HashMap;
//!
//! let mut validator = FormValidator::new([
//!     ("username", vec![rules::required(), rules::min_length(3)]),
//!     ("email", vec![rules::required(), rules::email()]),
//! ]);
//!
//! let values = HashMap::from([("username", "al"), ("email", "al@example.com")]);
//! assert!(!validator.validate(&values));
//! assert_eq!(
//!     validator.field_error("username"),
//!     Some("Debe tener al menos 3 caracteres")
//! );
//! assert!(!validator.has_error("email"));
//! ```

mod rule;
pub mod rules;
mod validator;

pub use rule::{Rule, RuleOutcome};
pub use validator::{validate_field, FieldValues, FormValidator, ValidationErrors};
