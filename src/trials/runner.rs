use crate::models::{OptionPricer, PriceEstimate};
use crate::rng::PricerRng;
use crate::state::{OptionKind, PerfCounters};
use portable_atomic::Ordering;
use rayon::prelude::*;
use smallvec::SmallVec;

/// Per-trial prices, in trial order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrialRun {
    pub pricer: &'static str,
    /// Seed of the master stream every trial stream was derived from
    pub seed: u64,
    pub call_prices: SmallVec<[f64; 8]>,
    pub put_prices: SmallVec<[f64; 8]>,
    /// Within-batch standard error of each pricing call
    pub call_std_errors: SmallVec<[f64; 8]>,
    pub put_std_errors: SmallVec<[f64; 8]>,
}

impl TrialRun {
    #[inline]
    pub fn trials(&self) -> usize {
        self.call_prices.len()
    }
}

/// Run `trials` independent call+put pricings.
///
/// Trial streams are derived up front from `master`, in order, so the output
/// depends only on the master seed and not on how rayon schedules the work.
/// Each worker owns its stream; the only shared writes are the atomic counters.
pub fn run_trials(
    pricer: &dyn OptionPricer,
    trials: usize,
    master: &mut PricerRng,
    counters: &PerfCounters,
) -> TrialRun {
    let streams: Vec<PricerRng> = (0..trials).map(|_| master.derive_stream()).collect();

    let results: Vec<(PriceEstimate, PriceEstimate)> = streams
        .into_par_iter()
        .enumerate()
        .map(|(trial, mut rng)| {
            let call = price_one(pricer, OptionKind::Call, trial, &mut rng, counters);
            let put = price_one(pricer, OptionKind::Put, trial, &mut rng, counters);
            counters.trials_completed.fetch_add(1, Ordering::Relaxed);
            (call, put)
        })
        .collect();

    let mut run = TrialRun {
        pricer: pricer.name(),
        seed: master.seed(),
        call_prices: SmallVec::with_capacity(trials),
        put_prices: SmallVec::with_capacity(trials),
        call_std_errors: SmallVec::with_capacity(trials),
        put_std_errors: SmallVec::with_capacity(trials),
    };
    for (call, put) in results {
        run.call_prices.push(call.price);
        run.call_std_errors.push(call.std_error);
        run.put_prices.push(put.price);
        run.put_std_errors.push(put.std_error);
    }
    run
}

fn price_one(
    pricer: &dyn OptionPricer,
    kind: OptionKind,
    trial: usize,
    rng: &mut PricerRng,
    counters: &PerfCounters,
) -> PriceEstimate {
    let est = pricer.estimate(kind, rng);
    counters.record_pricing_call(est.samples);
    tracing::debug!(
        trial = trial,
        kind = %kind,
        stream_seed = rng.seed(),
        price = est.price,
        std_error = est.std_error,
        "pricing call complete"
    );
    est
}
