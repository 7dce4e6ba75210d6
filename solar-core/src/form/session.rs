use tracing::{debug, info, warn};

use super::{FieldError, FieldErrorKind, FormAction, validate};
use crate::calculations::{CalculationError, EstimatorConfig, SolarEstimator};
use crate::{CalculationResult, CityTable, FormField, FormState};

/// Everything one estimator form owns: the city table, the raw inputs, the
/// last successful result and the inline errors of the last failed attempt.
///
/// Sessions are values. [`FormSession::apply`] consumes a session and returns
/// the next one, so the rendering layer only ever swaps whole states.
///
/// Once a result exists it is only ever replaced by a newer one; a failed
/// calculation or a later edit never clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    cities: CityTable,
    form: FormState,
    result: Option<CalculationResult>,
    errors: Vec<FieldError>,
}

impl FormSession {
    /// A fresh form over `cities`, with the first city selected and no result.
    pub fn new(cities: CityTable) -> Self {
        let form = FormState::new(&cities);
        Self {
            cities,
            form,
            result: None,
            errors: Vec::new(),
        }
    }

    pub fn cities(&self) -> &CityTable {
        &self.cities
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Errors from the last failed calculation that are still relevant.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn errors_for(
        &self,
        field: FormField,
    ) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Reduces `action` into the next session.
    pub fn apply(
        self,
        action: FormAction,
    ) -> Self {
        debug!(?action, "applying form action");
        match action {
            FormAction::Edit { field, value } => self.edit(field, value),
            FormAction::SelectCity(name) => self.select_city(name),
            FormAction::Calculate => self.calculate(),
        }
    }

    fn edit(
        mut self,
        field: FormField,
        value: String,
    ) -> Self {
        self.form = self.form.with_text(field, value);
        self.errors.retain(|e| !field.covers(e.field));
        self
    }

    /// Changing the city leaves the stored result untouched; its irradiance
    /// stays that of the city it was calculated for.
    fn select_city(
        mut self,
        name: String,
    ) -> Self {
        if !self.cities.contains(&name) {
            warn!(city = %name, "ignoring selection of a city missing from the table");
            return self;
        }
        self.form.selected_city = name;
        self.errors.retain(|e| e.field != FormField::City);
        self
    }

    /// Validates the form and, on success, swaps in a new result.
    ///
    /// On failure, including values too large to multiply out, the form and
    /// the previous result stay exactly as they were; only the inline errors
    /// change.
    fn calculate(mut self) -> Self {
        let input = match validate(&self.form, &self.cities) {
            Ok(input) => input,
            Err(e) => {
                warn!(problems = e.errors.len(), "form validation failed");
                for error in &e.errors {
                    debug!(%error, "validation error");
                }
                self.errors = e.errors;
                return self;
            }
        };

        let estimator = SolarEstimator::new(EstimatorConfig::default(), &self.cities);
        match estimator.calculate(&input) {
            Ok(result) => {
                info!(
                    city = %result.selected_city,
                    can_accommodate = %result.can_accommodate,
                    production_kwh = %result.rounded_annual_production(),
                    "estimate ready"
                );
                self.result = Some(result);
                self.errors.clear();
            }
            Err(CalculationError::UnknownCity(city)) => {
                warn!(%city, "no irradiance for selected city");
                self.errors = vec![FieldError::new(
                    FormField::City,
                    FieldErrorKind::UnknownCity,
                )];
            }
            Err(CalculationError::Overflow(field)) => {
                warn!(%field, "value too large to estimate with");
                self.errors = vec![FieldError::new(field, FieldErrorKind::TooLarge)];
            }
        }

        self
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(CityTable::reference())
    }
}
