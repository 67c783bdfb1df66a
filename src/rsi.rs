use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Result, Series, Smoothing};

/// Relative Strength Index (RSI), written as `rsi`.
///
/// Measures the speed and magnitude of recent price changes on a 0–100
/// scale. Values above 70 are conventionally considered overbought; below
/// 30, oversold.
///
/// ```text
/// delta[i] = close[i] − close[i − 1]          absent at row 0
/// gain     = max(delta, 0),  loss = max(−delta, 0)
/// avg_gain = smooth(gain, length),  avg_loss = smooth(loss, length)
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// With [`Smoothing::Simple`] (the default) the averages are rolling means,
/// so the first value appears at row `length`.
///
/// Degenerate windows resolve to defined values instead of `NaN`/`inf`:
/// - no losses but some gains: `100`;
/// - no movement at all: `50`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Rsi {
    length: NonZero<usize>,
    smoothing: Smoothing,
}

impl Rsi {
    /// RSI on closing price with simple (rolling mean) averages.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::with_smoothing(length, Smoothing::Simple)
    }

    #[must_use]
    pub fn with_smoothing(length: NonZero<usize>, smoothing: Smoothing) -> Self {
        Self {
            length,
            smoothing,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    #[inline]
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Converts average gain and loss into an RSI value in `[0, 100]`.
    #[must_use]
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for Rsi {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["rsi".to_owned()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;

        let deltas = std::iter::once(None)
            .chain(close.windows(2).map(|w| Some(w[1]? - w[0]?)))
            .take(close.len());
        let (gains, losses): (Vec<_>, Vec<_>) = deltas
            .map(|delta| (delta.map(|d| d.max(0.0)), delta.map(|d| (-d).max(0.0))))
            .unzip();

        let avg_gain = self.smoothing.apply(&gains, self.length);
        let avg_loss = self.smoothing.apply(&losses, self.length);

        let rsi = avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(g, l)| Some(Self::from_averages((*g)?, (*l)?)))
            .collect();

        Ok(vec![("rsi".to_owned(), rsi)])
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, close, {})", self.length, self.smoothing)
    }
}
