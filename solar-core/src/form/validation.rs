use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::{EnergyUsage, EstimatorInput};
use crate::models::is_provided;
use crate::{CityTable, FormField, FormState};

/// What is wrong with a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldErrorKind {
    Required,
    NotANumber,
    Negative,
    NotAWholeNumber,
    TooLarge,
    UnknownCity,
}

/// A problem tied to one form field, shown next to that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(
        field: FormField,
        kind: FieldErrorKind,
    ) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match (self.field, self.kind) {
            (FormField::EnergyUsage, FieldErrorKind::Required) => {
                f.write_str("Enter either annual or monthly energy usage")
            }
            (field, FieldErrorKind::Required) => write!(f, "{field} is required"),
            (field, FieldErrorKind::NotANumber) => write!(f, "{field} must be a number"),
            (field, FieldErrorKind::Negative) => write!(f, "{field} must not be negative"),
            (field, FieldErrorKind::NotAWholeNumber) => {
                write!(f, "{field} must be a whole number")
            }
            (field, FieldErrorKind::TooLarge) => write!(f, "{field} is too large"),
            (field, FieldErrorKind::UnknownCity) => write!(f, "{field} is not in the city list"),
        }
    }
}

/// The form could not be turned into an estimate.
///
/// Holds one entry per offending field, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please fill in all required fields ({} problem(s) found)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Parses the raw form into typed estimator input.
///
/// Rules:
/// - annual or monthly energy is required; annual wins if both are filled
/// - roof area, panel area, panel wattage and number of panels are required
/// - every supplied value must be a non-negative number
/// - number of panels must be a whole number
/// - the selected city must exist in `cities`
///
/// All fields are checked, so the error lists every problem at once.
pub fn validate(
    form: &FormState,
    cities: &CityTable,
) -> Result<EstimatorInput, ValidationError> {
    let mut errors = Vec::new();

    let energy = if is_provided(&form.annual_energy) {
        parse_quantity(FormField::AnnualEnergy, &form.annual_energy, &mut errors)
            .map(EnergyUsage::Annual)
    } else if is_provided(&form.monthly_energy) {
        parse_quantity(FormField::MonthlyEnergy, &form.monthly_energy, &mut errors)
            .map(EnergyUsage::Monthly)
    } else {
        errors.push(FieldError::new(
            FormField::EnergyUsage,
            FieldErrorKind::Required,
        ));
        None
    };

    if !cities.contains(&form.selected_city) {
        errors.push(FieldError::new(FormField::City, FieldErrorKind::UnknownCity));
    }

    let roof_area = required_quantity(FormField::RoofArea, &form.roof_area, &mut errors);
    let panel_area = required_quantity(FormField::PanelArea, &form.panel_area, &mut errors);
    let panel_wattage =
        required_quantity(FormField::PanelWattage, &form.panel_wattage, &mut errors);
    let number_of_panels =
        required_count(FormField::NumberOfPanels, &form.number_of_panels, &mut errors);

    match (energy, roof_area, panel_area, panel_wattage, number_of_panels) {
        (
            Some(energy),
            Some(roof_area),
            Some(panel_area),
            Some(panel_wattage),
            Some(number_of_panels),
        ) if errors.is_empty() => Ok(EstimatorInput {
            energy,
            city: form.selected_city.clone(),
            roof_area,
            panel_area,
            panel_wattage,
            number_of_panels,
        }),
        _ => Err(ValidationError { errors }),
    }
}

fn required_quantity(
    field: FormField,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    if !is_provided(value) {
        errors.push(FieldError::new(field, FieldErrorKind::Required));
        return None;
    }
    parse_quantity(field, value, errors)
}

fn parse_quantity(
    field: FormField,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match Decimal::from_str(value.trim()) {
        Ok(v) if v < Decimal::ZERO => {
            errors.push(FieldError::new(field, FieldErrorKind::Negative));
            None
        }
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(FieldError::new(field, FieldErrorKind::NotANumber));
            None
        }
    }
}

fn required_count(
    field: FormField,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let quantity = required_quantity(field, value, errors)?;

    if !quantity.fract().is_zero() {
        errors.push(FieldError::new(field, FieldErrorKind::NotAWholeNumber));
        return None;
    }

    match quantity.to_u32() {
        Some(count) => Some(count),
        None => {
            errors.push(FieldError::new(field, FieldErrorKind::TooLarge));
            None
        }
    }
}
