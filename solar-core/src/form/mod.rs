//! Form state management for the estimator.
//!
//! The UI never mutates form values directly. It sends a [`FormAction`] to
//! [`FormSession::apply`] and renders the session that comes back.

mod action;
mod session;
mod validation;

pub use action::FormAction;
pub use session::FormSession;
pub use validation::{FieldError, FieldErrorKind, ValidationError, validate};
