use serde::{Deserialize, Serialize};

use crate::FormField;

/// A user interaction with the estimator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormAction {
    /// The text of a numeric input changed.
    Edit { field: FormField, value: String },

    /// A city was picked from the selector.
    SelectCity(String),

    /// The user asked for an estimate.
    Calculate,
}

impl FormAction {
    pub fn edit(
        field: FormField,
        value: impl Into<String>,
    ) -> Self {
        Self::Edit {
            field,
            value: value.into(),
        }
    }

    pub fn select_city(name: impl Into<String>) -> Self {
        Self::SelectCity(name.into())
    }
}
