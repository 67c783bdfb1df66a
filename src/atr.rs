use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Result, Series, Smoothing};

/// True Range (`tr`) and Average True Range (`atr`).
///
/// ```text
/// tr[i]  = max(high[i] − low[i], |high[i] − close[i − 1]|, |low[i] − close[i − 1]|)
/// atr[i] = smooth(tr, length)
/// ```
///
/// `tr` is absent at row 0, where there is no previous close, so with
/// [`Smoothing::Simple`] the first `atr` appears at row `length`. Both
/// columns are non-negative wherever defined.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Atr {
    length: NonZero<usize>,
    smoothing: Smoothing,
}

impl Atr {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
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
}

fn true_range(high: f64, low: f64, previous_close: f64) -> f64 {
    (high - low)
        .max((high - previous_close).abs())
        .max((low - previous_close).abs())
}

impl Indicator for Atr {
    fn inputs(&self) -> Vec<String> {
        [RawColumn::High, RawColumn::Low, RawColumn::Close]
            .map(|c| c.name().to_owned())
            .to_vec()
    }

    fn outputs(&self) -> Vec<String> {
        vec!["tr".to_owned(), "atr".to_owned()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let high = series.input(self, RawColumn::High.name())?;
        let low = series.input(self, RawColumn::Low.name())?;
        let close = series.input(self, RawColumn::Close.name())?;

        let tr: Vec<_> = (0..close.len())
            .map(|i| {
                let previous_close = close[i.checked_sub(1)?]?;
                Some(true_range(high[i]?, low[i]?, previous_close))
            })
            .collect();
        let atr = self.smoothing.apply(&tr, self.length);

        Ok(vec![("tr".to_owned(), tr), ("atr".to_owned(), atr)])
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({}, {})", self.length, self.smoothing)
    }
}
