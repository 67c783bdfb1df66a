use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Result, Series};

/// Momentum and Rate of Change over a fixed lookback.
///
/// ```text
/// momentum[i] = close[i] − close[i − length]
/// roc[i]      = (close[i] / close[i − length] − 1) × 100
/// ```
///
/// Both are absent for `i < length`. `roc` is also absent where the
/// reference close is zero.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Momentum {
    length: usize,
}

impl Momentum {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Momentum {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["momentum".to_owned(), "roc".to_owned()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;

        let pairs: Vec<_> = (0..close.len())
            .map(|i| Some((close[i]?, close[i.checked_sub(self.length)?]?)))
            .collect();

        let momentum = pairs
            .iter()
            .map(|pair| pair.map(|(current, past)| current - past))
            .collect();
        let roc = pairs
            .iter()
            .map(|pair| {
                let (current, past) = (*pair)?;
                (past != 0.0).then(|| (current / past - 1.0) * 100.0)
            })
            .collect();

        Ok(vec![("momentum".to_owned(), momentum), ("roc".to_owned(), roc)])
    }
}

impl Display for Momentum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Momentum({}, close)", self.length)
    }
}
