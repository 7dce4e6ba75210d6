use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Whether the requested panels fit on the roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accommodation {
    Yes,
    No,
}

impl Accommodation {
    pub fn fits(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Accommodation {
    fn from(fits: bool) -> Self {
        if fits { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("Yes"),
            Self::No => f.write_str("No"),
        }
    }
}

/// Snapshot produced by a successful calculation.
///
/// Input values carry through unrounded. The snapshot is never edited: a new
/// calculation replaces it as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Yearly consumption in kWh, either as entered or monthly × 12.
    pub total_annual_energy: Decimal,
    pub selected_city: String,
    /// kWh/m²/day of the selected city at calculation time.
    pub irradiance: Decimal,
    pub roof_area: Decimal,
    pub panel_area: Decimal,
    pub panel_wattage: Decimal,
    pub number_of_panels: u32,
    pub can_accommodate: Accommodation,
    /// Panel area × number of panels, in m².
    pub total_panel_area: Decimal,
    /// Panel wattage × number of panels, in W.
    pub total_panel_wattage: Decimal,
    /// Yearly production in kWh, full precision.
    pub estimated_annual_production: Decimal,
}

impl CalculationResult {
    /// Estimated production rounded to two decimal places for display.
    pub fn rounded_annual_production(&self) -> Decimal {
        round_half_up(self.estimated_annual_production)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn accommodation_from_bool() {
        assert_eq!(Accommodation::from(true), Accommodation::Yes);
        assert_eq!(Accommodation::from(false), Accommodation::No);
        assert!(Accommodation::Yes.fits());
        assert!(!Accommodation::No.fits());
    }

    #[test]
    fn accommodation_displays_yes_or_no() {
        assert_eq!(Accommodation::Yes.to_string(), "Yes");
        assert_eq!(Accommodation::No.to_string(), "No");
    }

    #[test]
    fn rounded_production_keeps_two_decimals() {
        let result = CalculationResult {
            total_annual_energy: dec!(1200),
            selected_city: "Milan".to_string(),
            irradiance: dec!(4.45),
            roof_area: dec!(50),
            panel_area: dec!(1.8),
            panel_wattage: dec!(350),
            number_of_panels: 10,
            can_accommodate: Accommodation::Yes,
            total_panel_area: dec!(18.0),
            total_panel_wattage: dec!(3500),
            estimated_annual_production: dec!(21927.37500),
        };

        assert_eq!(result.rounded_annual_production().to_string(), "21927.38");
    }
}
