pub mod black_scholes;
pub mod monte_carlo;

use crate::errors::PricerError;
use crate::rng::PricerRng;
use crate::state::OptionKind;
use std::str::FromStr;

/// One pricing call's result plus its Monte Carlo standard error.
/// Closed-form pricers report `std_error = 0` and `samples = 0`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PriceEstimate {
    pub price: f64,
    pub std_error: f64,
    pub samples: usize,
}

/// All pricers implement this trait.
/// `estimate` consumes entropy from `rng` only; no other state is touched.
/// Send + Sync required so one pricer can be shared across trial workers.
pub trait OptionPricer: Send + Sync {
    fn name(&self) -> &'static str;

    fn estimate(&self, kind: OptionKind, rng: &mut PricerRng) -> PriceEstimate;

    #[inline]
    fn price(&self, kind: OptionKind, rng: &mut PricerRng) -> f64 {
        self.estimate(kind, rng).price
    }

    #[inline]
    fn price_call(&self, rng: &mut PricerRng) -> f64 {
        self.price(OptionKind::Call, rng)
    }

    #[inline]
    fn price_put(&self, rng: &mut PricerRng) -> f64 {
        self.price(OptionKind::Put, rng)
    }
}

/// Which level the simulated terminal price is compared against.
///
/// `Legacy` compares against spot, i.e. call = max(0, S_T - S) and
/// put = max(0, S - S_T). That is not the textbook payoff but it is what the
/// published prices were produced with, so it stays the default.
/// `Standard` uses the strike: max(0, S_T - K) / max(0, K - S_T).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffConvention {
    #[default]
    Legacy,
    Standard,
}

/// `Legacy` discounts with exp(-r * sigma); `Standard` with exp(-r * T).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountConvention {
    #[default]
    Legacy,
    Standard,
}

impl FromStr for PayoffConvention {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "spot" => Ok(Self::Legacy),
            "standard" | "strike" => Ok(Self::Standard),
            other => Err(PricerError::Config(format!("unknown payoff convention: {other}"))),
        }
    }
}

impl FromStr for DiscountConvention {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "volatility" => Ok(Self::Legacy),
            "standard" | "maturity" => Ok(Self::Standard),
            other => Err(PricerError::Config(format!("unknown discount convention: {other}"))),
        }
    }
}
