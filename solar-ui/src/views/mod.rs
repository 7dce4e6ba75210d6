//! Cursive views of the estimator.

mod estimator_form;
mod results_panel;
mod status_bar;

pub use estimator_form::show_estimator_form;
pub use results_panel::{NO_RESULT_TEXT, format_errors, format_results};
