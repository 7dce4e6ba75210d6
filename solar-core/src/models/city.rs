use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A city and its average daily solar irradiance in kWh/m²/day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub irradiance: Decimal,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        irradiance: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            irradiance,
        }
    }
}

/// Errors raised when building a [`CityTable`] from user-supplied data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CityTableError {
    #[error("city table must contain at least one city")]
    Empty,

    #[error("city name must not be blank")]
    BlankName,

    #[error("city '{0}' appears more than once")]
    DuplicateName(String),

    #[error("irradiance for '{name}' must be positive, got {irradiance}")]
    InvalidIrradiance { name: String, irradiance: Decimal },
}

/// Ordered, immutable lookup table of cities.
///
/// The first entry is the default selection of a new form. Lookups are by
/// exact name and walk the table linearly; the table is small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityTable {
    cities: Vec<City>,
}

impl CityTable {
    /// Builds a table from the given cities, rejecting empty tables, blank or
    /// repeated names, and non-positive irradiance values.
    pub fn new(cities: Vec<City>) -> Result<Self, CityTableError> {
        if cities.is_empty() {
            return Err(CityTableError::Empty);
        }

        let mut seen = HashSet::new();
        for city in &cities {
            if city.name.trim().is_empty() {
                return Err(CityTableError::BlankName);
            }
            if !seen.insert(city.name.as_str()) {
                return Err(CityTableError::DuplicateName(city.name.clone()));
            }
            if city.irradiance <= Decimal::ZERO {
                return Err(CityTableError::InvalidIrradiance {
                    name: city.name.clone(),
                    irradiance: city.irradiance,
                });
            }
        }

        Ok(Self { cities })
    }

    /// The built-in reference data.
    pub fn reference() -> Self {
        Self {
            cities: vec![
                City::new("Milan", Decimal::new(445, 2)),
                City::new("Venice", Decimal::new(421, 2)),
                City::new("Rome", Decimal::new(497, 2)),
                City::new("Florence", Decimal::new(451, 2)),
                City::new("Bologna", Decimal::new(458, 2)),
            ],
        }
    }

    /// The default selection.
    pub fn first(&self) -> &City {
        // `new` and `reference` both guarantee at least one entry.
        &self.cities[0]
    }

    pub fn find(
        &self,
        name: &str,
    ) -> Option<&City> {
        self.cities.iter().find(|city| city.name == name)
    }

    pub fn irradiance(
        &self,
        name: &str,
    ) -> Option<Decimal> {
        self.find(name).map(|city| city.irradiance)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|city| city.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn reference_table_lists_cities_in_order() {
        let table = CityTable::reference();

        let names: Vec<_> = table.names().collect();

        assert_eq!(names, vec!["Milan", "Venice", "Rome", "Florence", "Bologna"]);
    }

    #[test]
    fn first_city_is_milan() {
        let table = CityTable::reference();

        assert_eq!(table.first(), &City::new("Milan", dec!(4.45)));
    }

    #[test]
    fn irradiance_matches_reference_values() {
        let table = CityTable::reference();

        assert_eq!(table.irradiance("Venice"), Some(dec!(4.21)));
        assert_eq!(table.irradiance("Rome"), Some(dec!(4.97)));
        assert_eq!(table.irradiance("Florence"), Some(dec!(4.51)));
        assert_eq!(table.irradiance("Bologna"), Some(dec!(4.58)));
    }

    #[test]
    fn lookup_is_exact_match() {
        let table = CityTable::reference();

        assert_eq!(table.irradiance("milan"), None);
        assert_eq!(table.irradiance("Milan "), None);
        assert!(!table.contains("Naples"));
    }

    #[test]
    fn new_rejects_empty_table() {
        assert_eq!(CityTable::new(Vec::new()), Err(CityTableError::Empty));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let result = CityTable::new(vec![
            City::new("Turin", dec!(4.30)),
            City::new("Turin", dec!(4.40)),
        ]);

        assert_eq!(
            result,
            Err(CityTableError::DuplicateName("Turin".to_string()))
        );
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = CityTable::new(vec![City::new("  ", dec!(4.30))]);

        assert_eq!(result, Err(CityTableError::BlankName));
    }

    #[test]
    fn new_rejects_zero_irradiance() {
        let result = CityTable::new(vec![City::new("Turin", dec!(0))]);

        assert_eq!(
            result,
            Err(CityTableError::InvalidIrradiance {
                name: "Turin".to_string(),
                irradiance: dec!(0),
            })
        );
    }

    #[test]
    fn new_accepts_custom_table() {
        let table = CityTable::new(vec![
            City::new("Palermo", dec!(5.20)),
            City::new("Naples", dec!(5.01)),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.first().name, "Palermo");
        assert_eq!(table.irradiance("Naples"), Some(dec!(5.01)));
    }
}
