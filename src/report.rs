use crate::errors::PricerResult;
use crate::models::{DiscountConvention, PayoffConvention};
use crate::signals::pullback::{format_rounded, pullback_price, PullbackSignal};
use crate::trials::runner::TrialRun;
use crate::trials::tracker::TrialSummary;
use std::io::Write;

/// Report lines for the pricing summary, in print order.
pub fn pricing_lines(summary: &TrialSummary) -> [String; 4] {
    [
        format!("Call Option price: {}", format_rounded(summary.call_mean, 2)),
        format!("Call Price in dollars: {}", format_rounded(summary.call_dollars(), 2)),
        format!("Put option price: {}", format_rounded(summary.put_mean, 2)),
        format!("Put Price in dollars: {}", format_rounded(summary.put_dollars(), 2)),
    ]
}

/// Headline followed by the ratio rounded to 4 decimals.
pub fn pullback_lines(signal: &PullbackSignal) -> [String; 2] {
    [signal.headline().to_string(), signal.ratio_text()]
}

/// Writes the price lines, then runs the pullback check and writes its lines.
/// A failing check still leaves the price lines written.
pub fn write_text_report<W: Write>(
    out: &mut W,
    summary: &TrialSummary,
    current_price: f64,
    open_price: f64,
) -> PricerResult<PullbackSignal> {
    for line in pricing_lines(summary) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    let signal = pullback_price(current_price, open_price)?;
    for line in pullback_lines(&signal) {
        writeln!(out, "{line}")?;
    }
    Ok(signal)
}

#[derive(Debug, serde::Serialize)]
struct JsonReport<'a> {
    seed: u64,
    payoff_convention: PayoffConvention,
    discount_convention: DiscountConvention,
    summary: &'a TrialSummary,
    call_prices: &'a [f64],
    put_prices: &'a [f64],
    call_std_errors: &'a [f64],
    put_std_errors: &'a [f64],
    pullback: &'a PullbackSignal,
}

pub fn json_report(
    run: &TrialRun,
    summary: &TrialSummary,
    payoff: PayoffConvention,
    discount: DiscountConvention,
    pullback: &PullbackSignal,
) -> PricerResult<String> {
    let report = JsonReport {
        seed: run.seed,
        payoff_convention: payoff,
        discount_convention: discount,
        summary,
        call_prices: &run.call_prices,
        put_prices: &run.put_prices,
        call_std_errors: &run.call_std_errors,
        put_std_errors: &run.put_std_errors,
        pullback,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PricerError;
    use smallvec::smallvec;

    fn summary() -> TrialSummary {
        TrialSummary {
            trials: 5,
            call_mean: 12.3456,
            put_mean: 0.5,
            call_std_error: 0.01,
            put_std_error: 0.01,
        }
    }

    #[test]
    fn test_pricing_lines() {
        let lines = pricing_lines(&summary());
        assert_eq!(lines[0], "Call Option price: 12.35");
        assert_eq!(lines[1], "Call Price in dollars: 1234.56");
        assert_eq!(lines[2], "Put option price: 0.5");
        assert_eq!(lines[3], "Put Price in dollars: 50.0");
    }

    #[test]
    fn test_pricing_lines_round_exact_ties_to_even() {
        let s = TrialSummary {
            call_mean: 0.5,
            put_mean: 0.125,
            ..summary()
        };
        let lines = pricing_lines(&s);
        assert_eq!(lines[0], "Call Option price: 0.5");
        assert_eq!(lines[1], "Call Price in dollars: 50.0");
        assert_eq!(lines[2], "Put option price: 0.12");
        assert_eq!(lines[3], "Put Price in dollars: 12.5");
    }

    #[test]
    fn test_pullback_lines() {
        let lines = pullback_lines(&pullback_price(18.59, 19.0).unwrap());
        assert_eq!(lines, ["No pullback".to_string(), "-0.0216".to_string()]);
        let lines = pullback_lines(&pullback_price(19.95, 19.0).unwrap());
        assert_eq!(lines, ["Pullback, open long position".to_string(), "0.05".to_string()]);
        let lines = pullback_lines(&pullback_price(19.0, 19.0).unwrap());
        assert_eq!(lines, ["No pullback".to_string(), "0.0".to_string()]);
    }

    #[test]
    fn test_text_report_full_output() {
        let mut buf = Vec::new();
        let signal = write_text_report(&mut buf, &summary(), 18.59, 19.0).unwrap();
        assert!(!signal.is_pullback());
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Call Option price: 12.35");
        assert_eq!(lines[4], "No pullback");
        assert_eq!(lines[5], "-0.0216");
    }

    #[test]
    fn test_text_report_prices_written_before_pullback_error() {
        let mut buf = Vec::new();
        let err = write_text_report(&mut buf, &summary(), 18.59, 0.0).unwrap_err();
        assert!(matches!(err, PricerError::Division(_)));
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "Put Price in dollars: 50.0");
    }

    #[test]
    fn test_json_report_shape() {
        let run = TrialRun {
            pricer: "Monte-Carlo",
            seed: 9,
            call_prices: smallvec![1.0, 2.0],
            put_prices: smallvec![3.0, 4.0],
            call_std_errors: smallvec![0.1, 0.2],
            put_std_errors: smallvec![0.3, 0.4],
        };
        let signal = pullback_price(18.59, 19.0).unwrap();
        let out = json_report(
            &run,
            &summary(),
            PayoffConvention::Legacy,
            DiscountConvention::Standard,
            &signal,
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["seed"], 9);
        assert_eq!(v["payoff_convention"], "legacy");
        assert_eq!(v["discount_convention"], "standard");
        assert_eq!(v["summary"]["trials"], 5);
        assert_eq!(v["put_prices"][1], 4.0);
        assert_eq!(v["call_std_errors"][0], 0.1);
        assert_eq!(v["put_std_errors"][1], 0.4);
        assert_eq!(v["pullback"]["signal"], "no_pullback");
    }
}
