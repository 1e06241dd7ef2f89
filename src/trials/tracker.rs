//! Trial aggregation.
//! All functions are pure -- they take a finished run and return summary values.

use crate::trials::runner::TrialRun;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub call_mean: f64,
    pub put_mean: f64,
    /// Standard error of the mean across trials (0 with fewer than 2 trials)
    pub call_std_error: f64,
    pub put_std_error: f64,
}

impl TrialSummary {
    /// Price of one contract covering 100 shares.
    #[inline]
    pub fn call_dollars(&self) -> f64 {
        self.call_mean * 100.0
    }

    #[inline]
    pub fn put_dollars(&self) -> f64 {
        self.put_mean * 100.0
    }
}

pub fn summarize(run: &TrialRun) -> TrialSummary {
    TrialSummary {
        trials: run.trials(),
        call_mean: mean(&run.call_prices),
        put_mean: mean(&run.put_prices),
        call_std_error: std_error(&run.call_prices),
        put_std_error: std_error(&run.put_prices),
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn std_error(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (nf - 1.0);
    (var / nf).sqrt()
}
