//! One-shot estimates for the `calc` subcommand.
//!
//! A request is replayed through the same [`FormSession`] the interactive
//! form uses, so both paths validate and calculate identically.

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use solar_core::{
    CalculationResult, CityTable, FieldError, FieldErrorKind, FormAction, FormField, FormSession,
    ValidationError,
};
use tracing::debug;

use crate::views::format_results;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The results panel as plain text.
    #[default]
    Text,
    /// The full result as pretty-printed JSON.
    Json,
}

/// Raw form values from the command line; `None` leaves a field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimateRequest {
    pub annual_energy: Option<String>,
    pub monthly_energy: Option<String>,
    /// Defaults to the first city of the table.
    pub city: Option<String>,
    pub roof_area: Option<String>,
    pub panel_area: Option<String>,
    pub panel_wattage: Option<String>,
    pub number_of_panels: Option<String>,
}

impl EstimateRequest {
    /// The form interactions equivalent to this request, ending in Calculate.
    fn actions(&self) -> Vec<FormAction> {
        let texts = [
            (FormField::AnnualEnergy, &self.annual_energy),
            (FormField::MonthlyEnergy, &self.monthly_energy),
            (FormField::RoofArea, &self.roof_area),
            (FormField::PanelArea, &self.panel_area),
            (FormField::PanelWattage, &self.panel_wattage),
            (FormField::NumberOfPanels, &self.number_of_panels),
        ];

        let mut actions: Vec<FormAction> = texts
            .into_iter()
            .filter_map(|(field, value)| value.as_ref().map(|v| FormAction::edit(field, v)))
            .collect();
        if let Some(city) = &self.city {
            actions.push(FormAction::select_city(city));
        }
        actions.push(FormAction::Calculate);
        actions
    }
}

/// Runs `request` against `cities`.
///
/// An unknown `--city` is an error here rather than silently falling back
/// to the default selection.
pub fn estimate(
    cities: CityTable,
    request: &EstimateRequest,
) -> Result<CalculationResult, ValidationError> {
    if let Some(city) = &request.city {
        if !cities.contains(city) {
            return Err(ValidationError {
                errors: vec![FieldError::new(FormField::City, FieldErrorKind::UnknownCity)],
            });
        }
    }

    let session = request
        .actions()
        .into_iter()
        .fold(FormSession::new(cities), FormSession::apply);

    match session.result() {
        Some(result) => Ok(result.clone()),
        None => {
            debug!(problems = session.errors().len(), "no estimate produced");
            Err(ValidationError {
                errors: session.errors().to_vec(),
            })
        }
    }
}

/// JSON shape of a finished estimate.
#[derive(Debug, Serialize)]
struct EstimateReport<'a> {
    #[serde(flatten)]
    result: &'a CalculationResult,
    rounded_annual_production: Decimal,
}

/// Renders a result in the requested format.
pub fn render(
    result: &CalculationResult,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_results(Some(result))),
        OutputFormat::Json => serde_json::to_string_pretty(&EstimateReport {
            result,
            rounded_annual_production: result.rounded_annual_production(),
        }),
    }
}

/// Lists the city table, one `name  irradiance` row per city.
pub fn render_cities(cities: &CityTable) -> String {
    let width = cities.names().map(str::len).max().unwrap_or(0);
    cities
        .iter()
        .map(|c| format!("{:width$}  {} kWh/m²/day", c.name, c.irradiance))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use solar_core::City;

    use super::*;

    fn milan_request() -> EstimateRequest {
        EstimateRequest {
            annual_energy: Some("1200".to_string()),
            roof_area: Some("50".to_string()),
            panel_area: Some("1.8".to_string()),
            panel_wattage: Some("350".to_string()),
            number_of_panels: Some("10".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn request_without_city_uses_first_city() {
        let result = estimate(CityTable::reference(), &milan_request()).unwrap();

        assert_eq!(result.selected_city, "Milan");
        assert_eq!(result.rounded_annual_production(), dec!(21927.38));
    }

    #[test]
    fn request_city_is_selected() {
        let request = EstimateRequest {
            city: Some("Venice".to_string()),
            ..milan_request()
        };

        let result = estimate(CityTable::reference(), &request).unwrap();

        assert_eq!(result.irradiance, dec!(4.21));
    }

    #[test]
    fn unknown_city_is_reported() {
        let request = EstimateRequest {
            city: Some("Atlantis".to_string()),
            ..milan_request()
        };

        let err = estimate(CityTable::reference(), &request).unwrap_err();

        assert_eq!(
            err.errors,
            vec![FieldError::new(FormField::City, FieldErrorKind::UnknownCity)]
        );
    }

    #[test]
    fn missing_values_are_reported() {
        let request = EstimateRequest {
            roof_area: None,
            number_of_panels: Some("ten".to_string()),
            ..milan_request()
        };

        let err = estimate(CityTable::reference(), &request).unwrap_err();

        assert_eq!(
            err.errors,
            vec![
                FieldError::new(FormField::RoofArea, FieldErrorKind::Required),
                FieldError::new(FormField::NumberOfPanels, FieldErrorKind::NotANumber),
            ]
        );
    }

    #[test]
    fn json_includes_rounded_production() {
        let result = estimate(CityTable::reference(), &milan_request()).unwrap();

        let json = render(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selected_city"], "Milan");
        assert_eq!(value["can_accommodate"], "Yes");
        assert_eq!(value["number_of_panels"], 10);
        assert_eq!(value["rounded_annual_production"], "21927.38");
    }

    #[test]
    fn text_matches_results_panel() {
        let result = estimate(CityTable::reference(), &milan_request()).unwrap();

        assert_eq!(
            render(&result, OutputFormat::Text).unwrap(),
            format_results(Some(&result))
        );
    }

    #[test]
    fn cities_are_listed_in_table_order() {
        let table = CityTable::new(vec![
            City::new("Palermo", dec!(5.20)),
            City::new("Bari", dec!(4.90)),
        ])
        .unwrap();

        assert_eq!(
            render_cities(&table),
            "Palermo  5.20 kWh/m²/day\nBari     4.90 kWh/m²/day"
        );
    }
}
