use std::fmt;

use serde::{Deserialize, Serialize};

use super::CityTable;

/// Identifies an input of the estimator form.
///
/// `EnergyUsage` stands for the annual/monthly pair as a whole; it is the
/// field a "no consumption entered" error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    AnnualEnergy,
    MonthlyEnergy,
    EnergyUsage,
    City,
    RoofArea,
    PanelArea,
    PanelWattage,
    NumberOfPanels,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AnnualEnergy => "Annual energy",
            Self::MonthlyEnergy => "Monthly energy",
            Self::EnergyUsage => "Energy usage",
            Self::City => "City",
            Self::RoofArea => "Roof area",
            Self::PanelArea => "Panel area",
            Self::PanelWattage => "Panel wattage",
            Self::NumberOfPanels => "Number of panels",
        }
    }

    fn is_energy(&self) -> bool {
        matches!(
            self,
            Self::AnnualEnergy | Self::MonthlyEnergy | Self::EnergyUsage
        )
    }

    /// Whether an error reported against `other` should be cleared when this
    /// field is edited. An edit to either energy field settles the whole pair.
    pub fn covers(
        &self,
        other: FormField,
    ) -> bool {
        *self == other || (self.is_energy() && other.is_energy())
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values of the estimator form, exactly as the user typed them.
///
/// A field whose text is empty or whitespace-only counts as "not provided".
/// Annual and monthly energy are mutually exclusive: [`FormState::with_text`]
/// clears one whenever the other receives a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub annual_energy: String,
    pub monthly_energy: String,
    pub selected_city: String,
    pub roof_area: String,
    pub panel_area: String,
    pub panel_wattage: String,
    pub number_of_panels: String,
}

impl FormState {
    /// An empty form with the first city of `cities` selected.
    pub fn new(cities: &CityTable) -> Self {
        Self {
            annual_energy: String::new(),
            monthly_energy: String::new(),
            selected_city: cities.first().name.clone(),
            roof_area: String::new(),
            panel_area: String::new(),
            panel_wattage: String::new(),
            number_of_panels: String::new(),
        }
    }

    /// Returns a copy of the form with `field` set to `value`.
    ///
    /// Writing a non-empty energy value clears the other energy field.
    /// `City` and `EnergyUsage` are not text inputs and leave the form as is.
    pub fn with_text(
        mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        let provided = is_provided(&value);

        match field {
            FormField::AnnualEnergy => {
                self.annual_energy = value;
                if provided {
                    self.monthly_energy.clear();
                }
            }
            FormField::MonthlyEnergy => {
                self.monthly_energy = value;
                if provided {
                    self.annual_energy.clear();
                }
            }
            FormField::RoofArea => self.roof_area = value,
            FormField::PanelArea => self.panel_area = value,
            FormField::PanelWattage => self.panel_wattage = value,
            FormField::NumberOfPanels => self.number_of_panels = value,
            FormField::City | FormField::EnergyUsage => {}
        }

        self
    }

    /// The text currently held by `field`, if it is a text input.
    pub fn text(
        &self,
        field: FormField,
    ) -> Option<&str> {
        match field {
            FormField::AnnualEnergy => Some(&self.annual_energy),
            FormField::MonthlyEnergy => Some(&self.monthly_energy),
            FormField::City => Some(&self.selected_city),
            FormField::RoofArea => Some(&self.roof_area),
            FormField::PanelArea => Some(&self.panel_area),
            FormField::PanelWattage => Some(&self.panel_wattage),
            FormField::NumberOfPanels => Some(&self.number_of_panels),
            FormField::EnergyUsage => None,
        }
    }
}

/// Whether a raw input counts as filled in.
pub(crate) fn is_provided(value: &str) -> bool {
    !value.trim().is_empty()
}
