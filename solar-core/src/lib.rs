pub mod calculations;
pub mod form;
pub mod models;

pub use form::{FieldError, FieldErrorKind, FormAction, FormSession, ValidationError};
pub use models::*;
