mod calculation_result;
mod city;
mod form_state;

pub use calculation_result::{Accommodation, CalculationResult};
pub use city::{City, CityTable, CityTableError};
pub use form_state::{FormField, FormState};

pub(crate) use form_state::is_provided;
