use crate::models::{DiscountConvention, OptionPricer, PayoffConvention, PriceEstimate};
use crate::rng::PricerRng;
use crate::state::{OptionKind, PricingParameters};

/// Monte Carlo European option pricer under risk-neutral GBM.
///
/// S_T = S * exp(T * (r - sigma^2/2) + sigma * sqrt(T) * z),  z ~ N(0, 1)
///
/// price = D * mean(max(0, g_i))
///
/// where g_i = S_T_i - X (call) or X - S_T_i (put), X is the reference level
/// chosen by the payoff convention, and D the discount factor chosen by the
/// discount convention. Each call draws its own fresh batch.
#[derive(Debug, Clone)]
pub struct MonteCarloOptionPricer {
    params: PricingParameters,
    payoff: PayoffConvention,
    discount: DiscountConvention,
}

impl MonteCarloOptionPricer {
    /// Pricer with the legacy conventions.
    pub fn new(params: PricingParameters) -> Self {
        Self::with_conventions(params, PayoffConvention::default(), DiscountConvention::default())
    }

    pub fn with_conventions(
        params: PricingParameters,
        payoff: PayoffConvention,
        discount: DiscountConvention,
    ) -> Self {
        Self {
            params,
            payoff,
            discount,
        }
    }

    #[inline]
    fn reference_level(&self) -> f64 {
        match self.payoff {
            PayoffConvention::Legacy => self.params.spot,
            PayoffConvention::Standard => self.params.strike,
        }
    }

    #[inline]
    pub fn discount_factor(&self) -> f64 {
        let p = &self.params;
        match self.discount {
            DiscountConvention::Legacy => (-1.0 * p.risk_free_rate * p.volatility).exp(),
            DiscountConvention::Standard => (-1.0 * p.risk_free_rate * p.maturity).exp(),
        }
    }
}

impl OptionPricer for MonteCarloOptionPricer {
    #[inline]
    fn name(&self) -> &'static str {
        "Monte-Carlo"
    }

    /// Draws a batch, prices it, and reports the standard error of the mean.
    fn estimate(&self, kind: OptionKind, rng: &mut PricerRng) -> PriceEstimate {
        let n = self.params.sample_count;
        let mut batch = vec![0.0; n];
        rng.fill_normal(&mut batch);

        let reference = self.reference_level();
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for &z in &batch {
            let s_t = self.params.terminal_price(z);
            let g = match kind {
                OptionKind::Call => s_t - reference,
                OptionKind::Put => reference - s_t,
            };
            let payoff = g.max(0.0);
            sum += payoff;
            sum_sq += payoff * payoff;
        }

        let nf = n as f64;
        let average = sum / nf;
        let df = self.discount_factor();

        // Overflowed payoffs give inf - inf = NaN here; keep it rather than report 0
        let std_error = if n > 1 {
            let var = (sum_sq - nf * average * average) / (nf - 1.0);
            let var = if var < 0.0 { 0.0 } else { var };
            df * (var / nf).sqrt()
        } else {
            0.0
        };

        PriceEstimate {
            price: df * average,
            std_error,
            samples: n,
        }
    }
}
