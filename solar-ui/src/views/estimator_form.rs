//! The estimator form.
//!
//! The [`FormSession`] lives in the Cursive user data. Every widget callback
//! turns into a [`FormAction`], the session is swapped for the reduced one,
//! and the widgets are refreshed from it. Widgets never hold state of their
//! own beyond the text being typed.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, SelectView, TextView};
use solar_core::{FormAction, FormField, FormSession};
use tracing::warn;

use super::results_panel::{format_errors, format_results};
use super::status_bar::{build_status_bar, hints};

const CITY_SELECT: &str = "city";
const ERRORS_VIEW: &str = "errors";
const RESULTS_VIEW: &str = "results";

const FIELD_WIDTH: usize = 14;

struct TextInput {
    field: FormField,
    name: &'static str,
    label: &'static str,
}

static ENERGY_INPUTS: [TextInput; 2] = [
    TextInput {
        field: FormField::AnnualEnergy,
        name: "annual_energy",
        label: "Annual energy (kWh):",
    },
    TextInput {
        field: FormField::MonthlyEnergy,
        name: "monthly_energy",
        label: "Monthly energy (kWh):",
    },
];

static ARRAY_INPUTS: [TextInput; 4] = [
    TextInput {
        field: FormField::RoofArea,
        name: "roof_area",
        label: "Roof area (m²):",
    },
    TextInput {
        field: FormField::PanelArea,
        name: "panel_area",
        label: "Panel area (m²):",
    },
    TextInput {
        field: FormField::PanelWattage,
        name: "panel_wattage",
        label: "Panel wattage (W):",
    },
    TextInput {
        field: FormField::NumberOfPanels,
        name: "number_of_panels",
        label: "Number of panels:",
    },
];

fn text_inputs() -> impl Iterator<Item = &'static TextInput> {
    ENERGY_INPUTS.iter().chain(ARRAY_INPUTS.iter())
}

/// Display the estimator form for the session stored in `siv`.
pub fn show_estimator_form(siv: &mut Cursive) {
    let Some((texts, cities, selected)) = siv.with_user_data(|s: &mut FormSession| {
        let texts: Vec<String> = text_inputs()
            .map(|input| s.form().text(input.field).unwrap_or_default().to_string())
            .collect();
        let cities: Vec<String> = s.cities().names().map(str::to_string).collect();
        (texts, cities, s.form().selected_city.clone())
    }) else {
        warn!("no form session installed, nothing to show");
        return;
    };

    let mut rows = LinearLayout::vertical();
    let mut texts = texts.into_iter();

    for input in &ENERGY_INPUTS {
        let content = texts.next().unwrap_or_default();
        rows.add_child(field_row(input.label, text_field(input, &content)));
    }
    rows.add_child(field_row("City:", city_select(&cities, &selected)));
    for input in &ARRAY_INPUTS {
        let content = texts.next().unwrap_or_default();
        rows.add_child(field_row(input.label, text_field(input, &content)));
    }

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ENTER, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(rows)
        .child(TextView::new("─".repeat(50)))
        .child(TextView::new("").with_name(ERRORS_VIEW))
        .child(TextView::new(format_results(None)).with_name(RESULTS_VIEW))
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Solar Estimator")
        .button("Calculate", on_calculate)
        .button("Quit", |s| s.quit())
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);
    refresh(siv);
}

fn text_field(
    input: &'static TextInput,
    content: &str,
) -> impl cursive::View {
    let field = input.field;
    EditView::new()
        .content(content)
        .on_edit(move |s, text, _| on_edit(s, field, text))
        .on_submit(|s, _| on_calculate(s))
        .with_name(input.name)
        .fixed_width(FIELD_WIDTH)
}

fn city_select(
    cities: &[String],
    selected: &str,
) -> impl cursive::View {
    let mut select = SelectView::<String>::new().popup();
    select.add_all_str(cities.iter().cloned());
    if let Some(index) = cities.iter().position(|c| c == selected) {
        let _ = select.set_selection(index);
    }

    select
        .on_submit(|s: &mut Cursive, name: &String| {
            dispatch(s, FormAction::select_city(name.clone()))
        })
        .with_name(CITY_SELECT)
        .fixed_width(FIELD_WIDTH)
}

/// Create a labeled field row.
fn field_row<V: cursive::View>(
    label: &str,
    field: V,
) -> LinearLayout {
    LinearLayout::horizontal()
        .child(TextView::new(format!("{label:22} ")))
        .child(field)
}

fn on_edit(
    siv: &mut Cursive,
    field: FormField,
    text: &str,
) {
    dispatch(siv, FormAction::edit(field, text));
    sync_text_fields(siv);
}

fn on_calculate(siv: &mut Cursive) {
    dispatch(siv, FormAction::Calculate);
}

/// Swap the session for the one reduced by `action`, then redraw.
fn dispatch(
    siv: &mut Cursive,
    action: FormAction,
) {
    match siv.take_user_data::<FormSession>() {
        Some(session) => siv.set_user_data(session.apply(action)),
        None => warn!(?action, "dropping action, no form session installed"),
    }
    refresh(siv);
}

/// Copy the session's text back into edit views that disagree with it, which
/// is how a cleared energy field becomes visible.
fn sync_text_fields(siv: &mut Cursive) {
    let Some(texts) = siv.with_user_data(|s: &mut FormSession| {
        text_inputs()
            .map(|input| {
                let text = s.form().text(input.field).unwrap_or_default();
                (input.name, text.to_string())
            })
            .collect::<Vec<_>>()
    }) else {
        return;
    };

    for (name, text) in texts {
        siv.call_on_name(name, |v: &mut EditView| {
            if v.get_content().as_str() != text {
                // Dropping the callback keeps on_edit from firing again.
                let _ = v.set_content(text);
            }
        });
    }
}

fn refresh(siv: &mut Cursive) {
    let Some((errors, results)) = siv.with_user_data(|s: &mut FormSession| {
        (format_errors(s.errors()), format_results(s.result()))
    }) else {
        return;
    };

    siv.call_on_name(ERRORS_VIEW, |v: &mut TextView| v.set_content(errors));
    siv.call_on_name(RESULTS_VIEW, |v: &mut TextView| v.set_content(results));
}
