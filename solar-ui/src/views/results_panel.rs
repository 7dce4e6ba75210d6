//! Text of the results and inline-error panels.
//!
//! Everything here is a pure function of a [`CalculationResult`] or a list of
//! [`FieldError`]s, so the layout can be checked without a terminal.

use rust_decimal::Decimal;
use solar_core::{CalculationResult, FieldError};

/// Shown before the first successful calculation.
pub const NO_RESULT_TEXT: &str = "Fill in the form and press Calculate.";

/// Formats the results panel for `result`.
///
/// The roof-fit details only appear when the array fits; the production
/// estimate is always shown, rounded to two decimals.
pub fn format_results(result: Option<&CalculationResult>) -> String {
    let Some(r) = result else {
        return NO_RESULT_TEXT.to_string();
    };

    let mut lines = vec![
        "Calculation Results".to_string(),
        row("Total annual energy:", format!("{} kWh", r.total_annual_energy)),
        row("Selected city:", r.selected_city.clone()),
        row("Irradiance:", format!("{} kWh/m²/day", r.irradiance)),
        row("Roof area:", format!("{} m²", r.roof_area)),
        row("Panel area:", format!("{} m²", r.panel_area)),
        row("Panel wattage:", format!("{} W", r.panel_wattage)),
        row("Number of panels:", r.number_of_panels.to_string()),
        String::new(),
        row(
            "Can the system be accommodated on the roof:",
            r.can_accommodate.to_string(),
        ),
    ];

    if r.can_accommodate.fits() {
        lines.push(row("Total panel area:", format!("{} m²", plain(r.total_panel_area))));
        lines.push(row(
            "Total panel wattage:",
            format!("{} W", plain(r.total_panel_wattage)),
        ));
    }

    lines.push(String::new());
    lines.push(row(
        "Estimated annual production:",
        format!("{:.2} kWh", r.rounded_annual_production()),
    ));

    lines.join("\n")
}

/// Formats the inline errors, one per line; empty when there are none.
pub fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("! {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn row(
    label: &str,
    value: String,
) -> String {
    format!("{label:29} {value}")
}

/// Derived quantities carry the scale of their inputs ("18.0"); show them
/// without trailing zeros.
fn plain(value: Decimal) -> Decimal {
    value.normalize()
}
