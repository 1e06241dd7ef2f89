use crate::errors::{PricerError, PricerResult};
use portable_atomic::{AtomicU64, Ordering};

// ── Option side ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

// ── Pricing parameters (immutable, validated, stack-allocated) ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PricingParameters {
    pub spot: f64,
    pub strike: f64,
    /// Years to maturity
    pub maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub sample_count: usize,
    // Precomputed
    #[serde(skip)]
    pub drift_t: f64,
    #[serde(skip)]
    pub vol_sqrt_t: f64,
}

impl PricingParameters {
    /// Validates every field once; the result is read-only afterwards.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
        sample_count: usize,
    ) -> PricerResult<Self> {
        require_finite("spot", spot)?;
        require_finite("strike", strike)?;
        require_finite("maturity", maturity)?;
        require_finite("risk_free_rate", risk_free_rate)?;
        require_finite("volatility", volatility)?;

        if spot <= 0.0 {
            return Err(PricerError::invalid("spot", format!("must be > 0, got {spot}")));
        }
        if strike <= 0.0 {
            return Err(PricerError::invalid("strike", format!("must be > 0, got {strike}")));
        }
        if maturity <= 0.0 {
            return Err(PricerError::invalid("maturity", format!("must be > 0, got {maturity}")));
        }
        if volatility < 0.0 {
            return Err(PricerError::invalid(
                "volatility",
                format!("must be >= 0, got {volatility}"),
            ));
        }
        if sample_count < 1 {
            return Err(PricerError::invalid("sample_count", "must be >= 1, got 0"));
        }

        // ln(S_T/S) = T * (r - sigma^2/2) + sigma * sqrt(T) * z
        let drift_t = maturity * (risk_free_rate - 0.5 * volatility * volatility);
        let vol_sqrt_t = volatility * maturity.sqrt();

        Ok(Self {
            spot,
            strike,
            maturity,
            risk_free_rate,
            volatility,
            sample_count,
            drift_t,
            vol_sqrt_t,
        })
    }

    /// Terminal price under risk-neutral GBM for one standard-normal draw.
    #[inline]
    pub fn terminal_price(&self, z: f64) -> f64 {
        self.spot * (self.drift_t + self.vol_sqrt_t * z).exp()
    }
}

fn require_finite(name: &'static str, value: f64) -> PricerResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricerError::invalid(name, format!("must be finite, got {value}")))
    }
}

// ── Performance Counters (lock-free, shared across trial workers) ──

pub struct PerfCounters {
    pub pricing_calls: AtomicU64,
    pub samples_drawn: AtomicU64,
    pub trials_completed: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            pricing_calls: AtomicU64::new(0),
            samples_drawn: AtomicU64::new(0),
            trials_completed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_pricing_call(&self, samples: usize) {
        self.pricing_calls.fetch_add(1, Ordering::Relaxed);
        self.samples_drawn.fetch_add(samples as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.pricing_calls.load(Ordering::Relaxed),
            self.samples_drawn.load(Ordering::Relaxed),
            self.trials_completed.load(Ordering::Relaxed),
        )
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}
