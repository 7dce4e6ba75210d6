//! Solar estimate calculations.
//!
//! This module holds the arithmetic behind the estimator form: annual
//! consumption, roof accommodation, and yearly production from irradiance.

pub mod common;
pub mod estimator;

pub use estimator::{
    CalculationError, EnergyUsage, EstimatorConfig, EstimatorInput, SolarEstimator,
};
