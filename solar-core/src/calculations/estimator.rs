//! Roof accommodation and production estimate.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total annual energy: annual usage, or monthly usage × 12 |
//! | 2    | Total panel area: panel area × number of panels |
//! | 3    | Accommodation: Yes when total panel area ≤ roof area |
//! | 4    | Total panel wattage: panel wattage × number of panels |
//! | 5    | Production: irradiance × total panel area × 365 × 0.75 |
//!
//! The 0.75 derating factor folds inverter loss, shading, soiling and
//! temperature into one multiplier. Units of step 5 are
//! kWh/m²/day × m² × days/year = kWh/year.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use solar_core::calculations::{EnergyUsage, EstimatorConfig, EstimatorInput, SolarEstimator};
//! use solar_core::{Accommodation, CityTable};
//!
//! let cities = CityTable::reference();
//! let estimator = SolarEstimator::new(EstimatorConfig::default(), &cities);
//!
//! let input = EstimatorInput {
//!     energy: EnergyUsage::Annual(dec!(1200)),
//!     city: "Milan".to_string(),
//!     roof_area: dec!(50),
//!     panel_area: dec!(1.8),
//!     panel_wattage: dec!(350),
//!     number_of_panels: 10,
//! };
//!
//! let result = estimator.calculate(&input).unwrap();
//!
//! assert_eq!(result.total_panel_area, dec!(18));
//! assert_eq!(result.can_accommodate, Accommodation::Yes);
//! assert_eq!(result.total_panel_wattage, dec!(3500));
//! assert_eq!(result.estimated_annual_production, dec!(21927.375));
//! assert_eq!(result.rounded_annual_production(), dec!(21927.38));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::scale_by_count;
use crate::{Accommodation, CalculationResult, CityTable, FormField};

/// Errors that can occur while estimating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The selected city is not in the lookup table.
    #[error("no irradiance data for city '{0}'")]
    UnknownCity(String),

    /// A product of the inputs exceeds what a `Decimal` can hold. Carries the
    /// field whose value drove it out of range.
    #[error("{0} is too large to calculate with")]
    Overflow(FormField),
}

/// Fixed factors of the production formula.
///
/// These are not user settings: [`EstimatorConfig::default`] is the only way
/// to obtain one, so the factors are always 365, 12 and 0.75.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimatorConfig {
    /// Days of sunshine exposure per year.
    days_per_year: Decimal,

    /// Months per year, for annualising monthly consumption.
    months_per_year: Decimal,

    /// Aggregate real-world system losses applied to theoretical output.
    derating_factor: Decimal,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            days_per_year: Decimal::from(365),
            months_per_year: Decimal::from(12),
            derating_factor: Decimal::new(75, 2),
        }
    }
}

impl EstimatorConfig {
    pub fn days_per_year(&self) -> Decimal {
        self.days_per_year
    }

    pub fn months_per_year(&self) -> Decimal {
        self.months_per_year
    }

    pub fn derating_factor(&self) -> Decimal {
        self.derating_factor
    }
}

/// The consumption figure the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUsage {
    /// kWh per year.
    Annual(Decimal),
    /// kWh per month.
    Monthly(Decimal),
}

/// Validated, typed inputs of one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorInput {
    pub energy: EnergyUsage,
    pub city: String,
    /// m²
    pub roof_area: Decimal,
    /// m² per panel
    pub panel_area: Decimal,
    /// W per panel
    pub panel_wattage: Decimal,
    pub number_of_panels: u32,
}

/// Calculator for the solar estimate.
///
/// Pure: the same input against the same table always yields the same
/// [`CalculationResult`].
#[derive(Debug, Clone)]
pub struct SolarEstimator<'a> {
    config: EstimatorConfig,
    cities: &'a CityTable,
}

impl<'a> SolarEstimator<'a> {
    pub fn new(
        config: EstimatorConfig,
        cities: &'a CityTable,
    ) -> Self {
        Self { config, cities }
    }

    /// Runs every calculation step and returns the result snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the input city has no entry in the
    /// table or an intermediate product overflows.
    pub fn calculate(
        &self,
        input: &EstimatorInput,
    ) -> Result<CalculationResult, CalculationError> {
        let irradiance = self
            .cities
            .irradiance(&input.city)
            .ok_or_else(|| CalculationError::UnknownCity(input.city.clone()))?;

        let total_annual_energy = self.total_annual_energy(input.energy)?;
        let total_panel_area = scale_by_count(input.panel_area, input.number_of_panels)
            .ok_or(CalculationError::Overflow(FormField::PanelArea))?;
        let can_accommodate = self.can_accommodate(total_panel_area, input.roof_area);
        let total_panel_wattage = scale_by_count(input.panel_wattage, input.number_of_panels)
            .ok_or(CalculationError::Overflow(FormField::PanelWattage))?;
        let estimated_annual_production =
            self.estimated_annual_production(irradiance, total_panel_area)?;

        debug!(
            city = %input.city,
            %irradiance,
            %total_panel_area,
            roof_area = %input.roof_area,
            %can_accommodate,
            %estimated_annual_production,
            "estimate calculated"
        );

        Ok(CalculationResult {
            total_annual_energy,
            selected_city: input.city.clone(),
            irradiance,
            roof_area: input.roof_area,
            panel_area: input.panel_area,
            panel_wattage: input.panel_wattage,
            number_of_panels: input.number_of_panels,
            can_accommodate,
            total_panel_area,
            total_panel_wattage,
            estimated_annual_production,
        })
    }

    fn total_annual_energy(
        &self,
        energy: EnergyUsage,
    ) -> Result<Decimal, CalculationError> {
        match energy {
            EnergyUsage::Annual(annual) => Ok(annual),
            EnergyUsage::Monthly(monthly) => monthly
                .checked_mul(self.config.months_per_year)
                .ok_or(CalculationError::Overflow(FormField::MonthlyEnergy)),
        }
    }

    /// The panels fit when their footprint does not exceed the roof, boundary included.
    fn can_accommodate(
        &self,
        total_panel_area: Decimal,
        roof_area: Decimal,
    ) -> Accommodation {
        Accommodation::from(total_panel_area <= roof_area)
    }

    /// Irradiance is bounded by the city table, so an overflow here is
    /// charged to the panel area.
    fn estimated_annual_production(
        &self,
        irradiance: Decimal,
        total_panel_area: Decimal,
    ) -> Result<Decimal, CalculationError> {
        irradiance
            .checked_mul(total_panel_area)
            .and_then(|v| v.checked_mul(self.config.days_per_year))
            .and_then(|v| v.checked_mul(self.config.derating_factor))
            .ok_or(CalculationError::Overflow(FormField::PanelArea))
    }
}
