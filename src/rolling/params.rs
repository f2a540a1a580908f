//! rolling::params — string-facing parameters of a rolling call.
//!
//! Purpose
//! -------
//! Collect the call parameters in the form callers usually hold them (unit,
//! interval type and parallelism as names) and validate them in a single
//! step into the typed [`WindowSpec`] and [`EstimationConfig`] used by the
//! driver.
//!
//! Key behaviors
//! -------------
//! - Defaults: no confidence, keep NAs, `"basic"`, 1000 replicates,
//!   `"none"`, one worker, no seed.
//! - [`RollingParams::build`] checks the unit before anything else, so an
//!   unknown unit is reported even when other parameters are also invalid.
//!   The interval type is checked next, then the remaining settings.
//!
//! Conventions
//! -----------
//! - Setters consume and return `self` so parameters read as one chain.
use crate::{
    bootstrap::config::{EstimationConfig, IntervalType, Parallelism},
    rolling::errors::RollingResult,
    window::spec::WindowSpec,
};

/// RollingParams — unvalidated rolling-call parameters.
///
/// Fields
/// ------
/// - `unit`, `span`: lookback window (`"days"`, `10.0`, ...).
/// - `confidence`: optional level in `(0, 1)`; unset means mean only.
/// - `drop_na`: remove `NaN`s from each window before estimating.
/// - `interval_type`: `"norm"`, `"basic"`, `"stud"`, `"perc"` or `"bca"`.
/// - `replicates`: bootstrap resamples per row.
/// - `parallelism`: `"none"`, `"multicore"` or `"snow"`.
/// - `workers`: worker count for the parallel strategies.
/// - `seed`: optional base seed for reproducible intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingParams {
    pub unit: String,
    pub span: f64,
    pub confidence: Option<f64>,
    pub drop_na: bool,
    pub interval_type: String,
    pub replicates: usize,
    pub parallelism: String,
    pub workers: usize,
    pub seed: Option<u64>,
}

impl RollingParams {
    /// Parameters for a `span`-`unit` window with every other setting at
    /// its default.
    pub fn new(unit: &str, span: f64) -> Self {
        RollingParams {
            unit: unit.to_string(),
            span,
            confidence: None,
            drop_na: false,
            interval_type: "basic".to_string(),
            replicates: 1000,
            parallelism: "none".to_string(),
            workers: 1,
            seed: None,
        }
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn drop_na(mut self, drop_na: bool) -> Self {
        self.drop_na = drop_na;
        self
    }

    pub fn interval_type(mut self, interval_type: &str) -> Self {
        self.interval_type = interval_type.to_string();
        self
    }

    pub fn replicates(mut self, replicates: usize) -> Self {
        self.replicates = replicates;
        self
    }

    pub fn parallelism(mut self, parallelism: &str) -> Self {
        self.parallelism = parallelism.to_string();
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate into a window spec and an estimator configuration.
    ///
    /// Errors
    /// ------
    /// - `RollingError::Window(InvalidUnit | InvalidSpan)`.
    /// - `RollingError::Estimator(InvalidIntervalType | InvalidParallelism |
    ///   InvalidConfidence | InvalidReplicates | InvalidWorkerCount)`.
    pub fn build(&self) -> RollingResult<(WindowSpec, EstimationConfig)> {
        let spec = WindowSpec::parse(&self.unit, self.span)?;
        let interval_type: IntervalType = self.interval_type.parse()?;
        let parallelism: Parallelism = self.parallelism.parse()?;
        let config = EstimationConfig::new(
            self.confidence, self.drop_na, interval_type, self.replicates, parallelism,
            self.workers, self.seed,
        )?;
        Ok((spec, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bootstrap::errors::EstimatorError,
        rolling::errors::RollingError,
        window::{errors::WindowError, units::WindowUnit},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults and setter chaining.
    // - Validation order (unit first, then interval type).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify defaults build into the documented configuration.
    //
    // Given
    // -----
    // - `RollingParams::new("days", 10.0)`.
    //
    // Expect
    // ------
    // - Days/10 spec and `EstimationConfig::default()`.
    fn defaults_build_default_config() {
        let (spec, config) = RollingParams::new("days", 10.0).build().expect("valid params");

        assert_eq!(spec.unit(), WindowUnit::Days);
        assert_eq!(spec.span(), 10.0);
        assert_eq!(config, EstimationConfig::default());
    }

    #[test]
    // Purpose
    // -------
    // Verify chained setters reach the typed configuration.
    //
    // Given
    // -----
    // - Confidence 0.9, drop NA, `"bca"`, 250 replicates, `"snow"`, 4
    //   workers, seed 3.
    //
    // Expect
    // ------
    // - The same values in the built `EstimationConfig`.
    fn setters_flow_into_config() {
        let (_, config) = RollingParams::new("hours", 2.0)
            .confidence(0.9)
            .drop_na(true)
            .interval_type("bca")
            .replicates(250)
            .parallelism("snow")
            .workers(4)
            .seed(3)
            .build()
            .expect("valid params");

        assert_eq!(config.confidence, Some(0.9));
        assert!(config.drop_na);
        assert_eq!(config.interval_type, IntervalType::Bca);
        assert_eq!(config.replicates, 250);
        assert_eq!(config.parallelism, Parallelism::Snow);
        assert_eq!(config.workers, 4);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an unknown unit wins over other invalid parameters, and the
    // interval type is checked before numeric settings.
    //
    // Given
    // -----
    // - Unit `"bogus"` with interval type `"wald"`; then a valid unit with
    //   `"wald"` and zero replicates.
    //
    // Expect
    // ------
    // - `InvalidUnit`, then `InvalidIntervalType`.
    fn unit_is_validated_first() {
        let err = RollingParams::new("bogus", 1.0).interval_type("wald").build().unwrap_err();
        assert_eq!(err, RollingError::Window(WindowError::InvalidUnit { name: "bogus".into() }));

        let err =
            RollingParams::new("days", 1.0).interval_type("wald").replicates(0).build().unwrap_err();
        assert!(matches!(
            err,
            RollingError::Estimator(EstimatorError::InvalidIntervalType { .. })
        ));
    }
}
