use crate::errors::{PricerError, PricerResult};
use crate::models::{DiscountConvention, PayoffConvention};
use crate::state::PricingParameters;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(PricerError::Config(format!("unknown output format: {other}"))),
        }
    }
}

/// Run configuration. Every field has a default, so with no environment the
/// binary prices the fixed scenario: S=245.10, K=250, T=0.083, r=4.2%,
/// sigma=69.6%, 1,000,000 samples, 5 trials.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub sample_count: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    pub payoff: PayoffConvention,
    pub discount: DiscountConvention,
    pub output: OutputFormat,
    pub pullback_current_price: f64,
    pub pullback_open_price: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spot: 245.10,
            strike: 250.0,
            maturity: 0.083,
            risk_free_rate: 0.042,
            volatility: 0.696,
            sample_count: 1_000_000,
            trials: 5,
            seed: None,
            payoff: PayoffConvention::Legacy,
            discount: DiscountConvention::Legacy,
            output: OutputFormat::Text,
            pullback_current_price: 18.59,
            pullback_open_price: 19.0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys keep
    /// their defaults; set but unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> PricerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();

        let trials = parse_or(&lookup, "PRICER_TRIALS", d.trials)?;
        if trials < 1 {
            return Err(PricerError::Config("PRICER_TRIALS: must be >= 1".into()));
        }

        Ok(Self {
            spot: parse_or(&lookup, "PRICER_SPOT", d.spot)?,
            strike: parse_or(&lookup, "PRICER_STRIKE", d.strike)?,
            maturity: parse_or(&lookup, "PRICER_MATURITY", d.maturity)?,
            risk_free_rate: parse_or(&lookup, "PRICER_RISK_FREE_RATE", d.risk_free_rate)?,
            volatility: parse_or(&lookup, "PRICER_VOLATILITY", d.volatility)?,
            sample_count: parse_or(&lookup, "PRICER_SAMPLES", d.sample_count)?,
            trials,
            seed: parse_opt(&lookup, "PRICER_SEED")?,
            payoff: parse_or(&lookup, "PRICER_PAYOFF", d.payoff)?,
            discount: parse_or(&lookup, "PRICER_DISCOUNT", d.discount)?,
            output: parse_or(&lookup, "PRICER_OUTPUT", d.output)?,
            pullback_current_price: parse_or(&lookup, "PULLBACK_CURRENT_PRICE", d.pullback_current_price)?,
            pullback_open_price: parse_or(&lookup, "PULLBACK_OPEN_PRICE", d.pullback_open_price)?,
        })
    }

    /// Validated pricing parameters for this run.
    pub fn pricing_parameters(&self) -> PricerResult<PricingParameters> {
        PricingParameters::new(
            self.spot,
            self.strike,
            self.maturity,
            self.risk_free_rate,
            self.volatility,
            self.sample_count,
        )
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> PricerResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| PricerError::Config(format!("{key}: {e}"))),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> PricerResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_fixed_scenario() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.spot, 245.10);
        assert_eq!(cfg.strike, 250.0);
        assert_eq!(cfg.maturity, 0.083);
        assert_eq!(cfg.risk_free_rate, 0.042);
        assert_eq!(cfg.volatility, 0.696);
        assert_eq!(cfg.sample_count, 1_000_000);
        assert_eq!(cfg.trials, 5);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.payoff, PayoffConvention::Legacy);
        assert_eq!(cfg.discount, DiscountConvention::Legacy);
        assert_eq!(cfg.output, OutputFormat::Text);
        assert_eq!(cfg.pullback_current_price, 18.59);
        assert_eq!(cfg.pullback_open_price, 19.0);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("PRICER_SEED", "42"),
            ("PRICER_SAMPLES", "1000"),
            ("PRICER_PAYOFF", "standard"),
            ("PRICER_DISCOUNT", "standard"),
            ("PRICER_OUTPUT", "json"),
        ]))
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.sample_count, 1000);
        assert_eq!(cfg.payoff, PayoffConvention::Standard);
        assert_eq!(cfg.discount, DiscountConvention::Standard);
        assert_eq!(cfg.output, OutputFormat::Json);
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("PRICER_SPOT", "abc")])).unwrap_err();
        assert!(matches!(err, PricerError::Config(ref m) if m.starts_with("PRICER_SPOT")));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PRICER_TRIALS", "0")])).unwrap_err();
        assert!(matches!(err, PricerError::Config(_)));
    }

    #[test]
    fn test_invalid_pricing_parameters_surface() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRICER_VOLATILITY", "-0.2")])).unwrap();
        let err = cfg.pricing_parameters().unwrap_err();
        assert!(matches!(err, PricerError::InvalidParameter { name: "volatility", .. }));
    }
}
