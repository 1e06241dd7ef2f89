mod config;
mod errors;
mod models;
mod report;
mod rng;
mod signals;
mod state;
mod trials;

use crate::config::{AppConfig, OutputFormat};
use crate::errors::PricerResult;
use crate::models::black_scholes::BlackScholesPricer;
use crate::models::monte_carlo::MonteCarloOptionPricer;
use crate::rng::PricerRng;
use crate::signals::pullback;
use crate::state::PerfCounters;
use crate::trials::{runner, tracker};

fn main() {
    // Structured logging on stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("mc_option_pricer starting");

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cfg) {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}

fn run(cfg: &AppConfig) -> PricerResult<()> {
    let params = cfg.pricing_parameters()?;
    tracing::info!(
        spot = params.spot,
        strike = params.strike,
        maturity = params.maturity,
        rate = params.risk_free_rate,
        vol = params.volatility,
        samples = params.sample_count,
        trials = cfg.trials,
        payoff = ?cfg.payoff,
        discount = ?cfg.discount,
        "pricing parameters"
    );

    let pricer = MonteCarloOptionPricer::with_conventions(params, cfg.payoff, cfg.discount);

    let mut master = match cfg.seed {
        Some(seed) => PricerRng::from_seed(seed),
        None => PricerRng::from_entropy(),
    };
    tracing::info!(seed = master.seed(), "random source ready");

    let counters = PerfCounters::new();
    let run = runner::run_trials(&pricer, cfg.trials, &mut master, &counters);
    let summary = tracker::summarize(&run);

    let (calls, samples, trials) = counters.snapshot();
    tracing::info!(
        pricing_calls = calls,
        samples_drawn = samples,
        trials = trials,
        call_se = summary.call_std_error,
        put_se = summary.put_std_error,
        "trials complete"
    );

    let reference = BlackScholesPricer::new(params);
    tracing::debug!(
        bs_call = reference.call_price(),
        bs_put = reference.put_price(),
        "black-scholes reference (strike, exp(-rT))"
    );

    match cfg.output {
        OutputFormat::Text => {
            let mut stdout = std::io::stdout().lock();
            let signal = report::write_text_report(
                &mut stdout,
                &summary,
                cfg.pullback_current_price,
                cfg.pullback_open_price,
            )?;
            log_pullback(cfg, &signal);
        }
        OutputFormat::Json => {
            let signal =
                pullback::pullback_price(cfg.pullback_current_price, cfg.pullback_open_price)?;
            log_pullback(cfg, &signal);
            let json = report::json_report(&run, &summary, cfg.payoff, cfg.discount, &signal)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn log_pullback(cfg: &AppConfig, signal: &pullback::PullbackSignal) {
    tracing::info!(
        current = cfg.pullback_current_price,
        open = cfg.pullback_open_price,
        ratio = signal.rounded_ratio(),
        pullback = signal.is_pullback(),
        "pullback check"
    );
}
