// src/test_util.rs

use crate::{Bar, Series};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON` (absolute near zero).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs().max(1.0) * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Convenience: bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: f64, time: u64) -> Bar {
    Bar::new(time, close, close, close, close, 0.0)
}

pub fn ohlc(open: f64, high: f64, low: f64, close: f64, time: u64) -> Bar {
    Bar::new(time, open, high, low, close, 0.0)
}

/// Series of close-only bars at timestamps `0..`.
pub fn closes(values: &[f64]) -> Series {
    let bars: Vec<Bar> = (0u64..).zip(values).map(|(t, &c)| bar(c, t)).collect();
    Series::from_bars(&bars).expect("timestamps are increasing")
}
