//! Pullback detection.
//!
//! ratio = current / open - 1
//!
//! ratio >= PULLBACK_THRESHOLD (inclusive) signals a long entry.
//! Pure function, no side effects; the caller decides how to report it.

use crate::errors::{PricerError, PricerResult};

/// Move relative to the open that counts as a pullback.
pub const PULLBACK_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum PullbackSignal {
    Pullback { ratio: f64 },
    NoPullback { ratio: f64 },
}

impl PullbackSignal {
    #[inline]
    pub fn is_pullback(&self) -> bool {
        matches!(self, PullbackSignal::Pullback { .. })
    }

    /// Raw, unrounded ratio.
    #[inline]
    pub fn ratio(&self) -> f64 {
        match *self {
            PullbackSignal::Pullback { ratio } | PullbackSignal::NoPullback { ratio } => ratio,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            PullbackSignal::Pullback { .. } => "Pullback, open long position",
            PullbackSignal::NoPullback { .. } => "No pullback",
        }
    }

    /// Ratio rounded to 4 decimals for display.
    #[inline]
    pub fn rounded_ratio(&self) -> f64 {
        round_to(self.ratio(), 4)
    }

    /// Rounded ratio as printed.
    pub fn ratio_text(&self) -> String {
        format_rounded(self.ratio(), 4)
    }
}

/// Classify a current/open price pair.
pub fn pullback_price(current_price: f64, open_price: f64) -> PricerResult<PullbackSignal> {
    if open_price == 0.0 {
        return Err(PricerError::Division(format!(
            "pullback ratio undefined for open price 0 (current {current_price})"
        )));
    }

    let ratio = current_price / open_price - 1.0;

    if ratio >= PULLBACK_THRESHOLD {
        Ok(PullbackSignal::Pullback { ratio })
    } else {
        Ok(PullbackSignal::NoPullback { ratio })
    }
}

/// Round to `decimals` places on the exact binary value (ties to even),
/// so 0.125 rounds to 0.12 rather than 0.13.
#[inline]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// `round_to` rendered for display: trailing zeros trimmed, but always at
/// least one fractional digit (`50.0`, `0.05`, `-0.0216`).
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let mut s = format!("{value:.decimals$}");
    if !value.is_finite() {
        return s;
    }
    if decimals == 0 {
        s.push_str(".0");
        return s;
    }
    let trimmed = s.trim_end_matches('0').len();
    s.truncate(trimmed);
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_pullback() {
        let signal = pullback_price(19.95, 19.0).unwrap();
        assert!(signal.is_pullback());
        assert_eq!(signal.headline(), "Pullback, open long position");
        assert_eq!(signal.rounded_ratio(), 0.05);
        assert_eq!(signal.ratio_text(), "0.05");
    }

    #[test]
    fn test_flat_price_prints_zero_with_decimal() {
        let signal = pullback_price(19.0, 19.0).unwrap();
        assert!(!signal.is_pullback());
        assert_eq!(signal.ratio_text(), "0.0");
    }

    #[test]
    fn test_small_drop_no_pullback() {
        let signal = pullback_price(18.59, 19.0).unwrap();
        assert!(!signal.is_pullback());
        assert_eq!(signal.headline(), "No pullback");
        assert_eq!(signal.ratio_text(), "-0.0216");
    }

    #[test]
    fn test_zero_open_is_division_error() {
        for current in [0.0, 18.59, -3.0] {
            let err = pullback_price(current, 0.0).unwrap_err();
            assert!(matches!(err, PricerError::Division(_)));
        }
    }

    #[test]
    fn test_large_rally() {
        let signal = pullback_price(30.0, 20.0).unwrap();
        assert!(signal.is_pullback());
        assert_eq!(signal.rounded_ratio(), 0.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(-0.021578, 4), -0.0216);
        // exact binary tie rounds to even
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(50.0, 2), "50.0");
        assert_eq!(format_rounded(0.0, 4), "0.0");
        assert_eq!(format_rounded(0.125, 2), "0.12");
        assert_eq!(format_rounded(1234.5, 2), "1234.5");
        assert_eq!(format_rounded(12.3456, 2), "12.35");
        assert_eq!(format_rounded(-0.02157894736842103, 4), "-0.0216");
        assert_eq!(format_rounded(7.4, 0), "7.0");
    }
}
