//! End-to-end checks of the estimator form through its public API.
//!
//! Each test drives a [`FormSession`] the way the UI does: a sequence of
//! actions, then assertions on the session that comes back.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use solar_core::{
    Accommodation, City, CityTable, FieldErrorKind, FormAction, FormField, FormSession,
};

fn run(actions: Vec<FormAction>) -> FormSession {
    actions
        .into_iter()
        .fold(FormSession::default(), FormSession::apply)
}

fn roof_and_panels(
    roof: &str,
    panel_area: &str,
    panels: &str,
) -> Vec<FormAction> {
    vec![
        FormAction::edit(FormField::RoofArea, roof),
        FormAction::edit(FormField::PanelArea, panel_area),
        FormAction::edit(FormField::PanelWattage, "350"),
        FormAction::edit(FormField::NumberOfPanels, panels),
    ]
}

#[test]
fn annual_scenario_from_milan() {
    let mut actions = vec![FormAction::edit(FormField::AnnualEnergy, "1200")];
    actions.extend(roof_and_panels("50", "1.8", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);
    let result = session.result().expect("calculation should succeed");

    assert_eq!(result.total_annual_energy, dec!(1200));
    assert_eq!(result.selected_city, "Milan");
    assert_eq!(result.irradiance, dec!(4.45));
    assert_eq!(result.total_panel_area, dec!(18));
    assert_eq!(result.can_accommodate, Accommodation::Yes);
    assert_eq!(result.total_panel_wattage, dec!(3500));
    assert_eq!(result.rounded_annual_production().to_string(), "21927.38");
}

#[test]
fn monthly_usage_is_annualised() {
    let mut actions = vec![FormAction::edit(FormField::MonthlyEnergy, "100")];
    actions.extend(roof_and_panels("50", "1.8", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);

    assert_eq!(session.result().unwrap().total_annual_energy, dec!(1200));
}

#[test]
fn panels_exactly_filling_the_roof_fit() {
    let mut actions = vec![FormAction::edit(FormField::AnnualEnergy, "1200")];
    actions.extend(roof_and_panels("50", "5", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);

    assert_eq!(
        session.result().unwrap().can_accommodate,
        Accommodation::Yes
    );
}

#[test]
fn oversized_array_does_not_fit() {
    let mut actions = vec![FormAction::edit(FormField::AnnualEnergy, "1200")];
    actions.extend(roof_and_panels("50", "10", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);
    let result = session.result().unwrap();

    assert_eq!(result.total_panel_area, dec!(100));
    assert_eq!(result.can_accommodate, Accommodation::No);
}

#[test]
fn missing_fields_leave_result_unset() {
    let mut actions = roof_and_panels("50", "1.8", "");
    actions.push(FormAction::Calculate);

    let session = run(actions);

    assert!(!session.has_result());
    let kinds: Vec<_> = session.errors().iter().map(|e| (e.field, e.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (FormField::EnergyUsage, FieldErrorKind::Required),
            (FormField::NumberOfPanels, FieldErrorKind::Required),
        ]
    );
}

#[test]
fn mutual_exclusion_through_the_session() {
    let session = run(vec![
        FormAction::edit(FormField::AnnualEnergy, "1200"),
        FormAction::edit(FormField::MonthlyEnergy, "100"),
    ]);
    assert_eq!(session.form().annual_energy, "");
    assert_eq!(session.form().monthly_energy, "100");

    let session = session.apply(FormAction::edit(FormField::AnnualEnergy, ""));
    assert_eq!(session.form().monthly_energy, "100");
}

#[test]
fn city_switch_keeps_stale_irradiance_until_recalculated() {
    let mut actions = vec![FormAction::edit(FormField::AnnualEnergy, "1200")];
    actions.extend(roof_and_panels("50", "1.8", "10"));
    actions.push(FormAction::Calculate);
    actions.push(FormAction::select_city("Bologna"));

    let session = run(actions);
    assert_eq!(session.result().unwrap().irradiance, dec!(4.45));

    let session = session.apply(FormAction::Calculate);
    assert_eq!(session.result().unwrap().irradiance, dec!(4.58));
    assert_eq!(session.result().unwrap().selected_city, "Bologna");
}

#[test]
fn custom_city_table_defaults_to_its_first_entry() {
    let cities = CityTable::new(vec![
        City::new("Palermo", dec!(5.2)),
        City::new("Naples", dec!(5.01)),
    ])
    .unwrap();

    let session = FormSession::new(cities)
        .apply(FormAction::edit(FormField::AnnualEnergy, "3000"))
        .apply(FormAction::edit(FormField::RoofArea, "20"))
        .apply(FormAction::edit(FormField::PanelArea, "2"))
        .apply(FormAction::edit(FormField::PanelWattage, "400"))
        .apply(FormAction::edit(FormField::NumberOfPanels, "5"))
        .apply(FormAction::Calculate);

    let result = session.result().unwrap();
    assert_eq!(result.selected_city, "Palermo");
    // 5.2 × 10 × 365 × 0.75
    assert_eq!(result.estimated_annual_production, dec!(14235));
}

#[test]
fn huge_panel_area_is_reported_not_fatal() {
    let mut actions = vec![FormAction::edit(FormField::AnnualEnergy, "1200")];
    actions.extend(roof_and_panels("50", "79228162514264337593543950335", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);

    assert!(!session.has_result());
    assert_eq!(
        session.errors().iter().map(|e| (e.field, e.kind)).collect::<Vec<_>>(),
        vec![(FormField::PanelArea, FieldErrorKind::TooLarge)]
    );

    // The form stays usable: fix the value and calculate again.
    let session = session
        .apply(FormAction::edit(FormField::PanelArea, "1.8"))
        .apply(FormAction::Calculate);
    assert_eq!(session.result().unwrap().total_panel_area, dec!(18));
}

#[test]
fn huge_monthly_energy_is_reported_not_fatal() {
    let mut actions = vec![FormAction::edit(
        FormField::MonthlyEnergy,
        "9000000000000000000000000000",
    )];
    actions.extend(roof_and_panels("50", "1.8", "10"));
    actions.push(FormAction::Calculate);

    let session = run(actions);

    assert!(!session.has_result());
    assert_eq!(
        session.errors().iter().map(|e| (e.field, e.kind)).collect::<Vec<_>>(),
        vec![(FormField::MonthlyEnergy, FieldErrorKind::TooLarge)]
    );
}
