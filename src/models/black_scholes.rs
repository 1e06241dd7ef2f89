use crate::models::{OptionPricer, PriceEstimate};
use crate::rng::PricerRng;
use crate::state::{OptionKind, PricingParameters};
use statrs::distribution::{ContinuousCDF, Normal};

/// Black-Scholes closed-form European option pricing.
///
/// C = S * Phi(d1) - K * e^{-rT} * Phi(d2)
/// P = K * e^{-rT} * Phi(-d2) - S * Phi(-d1)
///
/// where d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// and d2 = d1 - sigma * sqrt(T).
///
/// Strike-referenced and discounted with e^{-rT}, so it is the reference the
/// Monte Carlo pricer converges to under the standard conventions.
pub struct BlackScholesPricer {
    params: PricingParameters,
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl BlackScholesPricer {
    pub fn new(params: PricingParameters) -> Self {
        Self {
            params,
            normal: Normal::standard(),
        }
    }

    pub fn call_price(&self) -> f64 {
        let p = &self.params;
        let df = (-p.risk_free_rate * p.maturity).exp();

        // Guard: zero variance collapses to discounted intrinsic on the forward
        if p.vol_sqrt_t < 1e-12 {
            let forward = p.spot * (p.risk_free_rate * p.maturity).exp();
            return df * (forward - p.strike).max(0.0);
        }

        let (d1, d2) = self.d1_d2();
        p.spot * self.normal.cdf(d1) - p.strike * df * self.normal.cdf(d2)
    }

    pub fn put_price(&self) -> f64 {
        let p = &self.params;
        let df = (-p.risk_free_rate * p.maturity).exp();

        if p.vol_sqrt_t < 1e-12 {
            let forward = p.spot * (p.risk_free_rate * p.maturity).exp();
            return df * (p.strike - forward).max(0.0);
        }

        let (d1, d2) = self.d1_d2();
        p.strike * df * self.normal.cdf(-d2) - p.spot * self.normal.cdf(-d1)
    }

    #[inline]
    fn d1_d2(&self) -> (f64, f64) {
        let p = &self.params;
        let ln_s_k = (p.spot / p.strike).ln();
        let half_sigma_sq = 0.5 * p.volatility * p.volatility;
        let d1 = (ln_s_k + (p.risk_free_rate + half_sigma_sq) * p.maturity) / p.vol_sqrt_t;
        (d1, d1 - p.vol_sqrt_t)
    }
}

impl OptionPricer for BlackScholesPricer {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    /// Deterministic: the random source is left untouched.
    fn estimate(&self, kind: OptionKind, _rng: &mut PricerRng) -> PriceEstimate {
        let price = match kind {
            OptionKind::Call => self.call_price(),
            OptionKind::Put => self.put_price(),
        };
        PriceEstimate {
            price,
            std_error: 0.0,
            samples: 0,
        }
    }
}
