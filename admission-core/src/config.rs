//! Engine configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::{AggregateWeights, WeightsError};

/// Latency simulated before a calculated aggregate becomes available.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Highest score the entry test allows.
pub const DEFAULT_ENTRY_TEST_MAX: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("entry test maximum must be positive, got {0}")]
    InvalidEntryTestMax(Decimal),

    #[error(transparent)]
    Weights(#[from] WeightsError),
}

/// Tunable parameters for a [`FormEngine`](crate::engine::FormEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long a calculation is held back before its result is reported.
    pub delay: Duration,
    /// Upper bound for `entryTestObtained`, also used as the entry test total.
    pub entry_test_max: Decimal,
    pub weights: AggregateWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            entry_test_max: DEFAULT_ENTRY_TEST_MAX,
            weights: AggregateWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_entry_test_max(
        mut self,
        max: Decimal,
    ) -> Self {
        self.entry_test_max = max;
        self
    }

    pub fn with_weights(
        mut self,
        weights: AggregateWeights,
    ) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the entry test maximum is not positive or the
    /// weights are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_test_max <= Decimal::ZERO {
            return Err(ConfigError::InvalidEntryTestMax(self.entry_test_max));
        }
        self.weights.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();

        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.entry_test_max, dec!(100));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builders_override_defaults() {
        let config = EngineConfig::default()
            .with_delay(Duration::ZERO)
            .with_entry_test_max(dec!(200));

        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.entry_test_max, dec!(200));
    }

    #[test]
    fn zero_entry_test_max_is_rejected() {
        let config = EngineConfig::default().with_entry_test_max(Decimal::ZERO);

        assert_eq!(config.validate(), Err(ConfigError::InvalidEntryTestMax(Decimal::ZERO)));
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let config = EngineConfig::default().with_weights(AggregateWeights {
            matric: dec!(0.5),
            inter: dec!(0.5),
            entry_test: dec!(0.5),
        });

        assert_eq!(
            config.validate(),
            Err(ConfigError::Weights(WeightsError::SumNotOne(dec!(1.5))))
        );
    }
}
