use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Reduction, Result, Series, rolling};

/// Percentage distance of close from the trailing high and low.
///
/// ```text
/// dist_from_high_{n}[i] = (close[i] / max(high[i − n + 1 ..= i]) − 1) × 100
/// dist_from_low_{n}[i]  = (close[i] / min(low[i − n + 1 ..= i]) − 1) × 100
/// ```
///
/// Absent for the first `n - 1` rows and where the extreme is zero.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RangeDistance {
    length: NonZero<usize>,
}

impl RangeDistance {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    fn high_column(&self) -> String {
        format!("dist_from_high_{}", self.length)
    }

    fn low_column(&self) -> String {
        format!("dist_from_low_{}", self.length)
    }
}

fn distance(close: &[Option<f64>], extreme: &[Option<f64>]) -> Vec<Option<f64>> {
    close
        .iter()
        .zip(extreme)
        .map(|(c, e)| {
            let (c, e) = ((*c)?, (*e)?);
            (e != 0.0).then(|| (c / e - 1.0) * 100.0)
        })
        .collect()
}

impl Indicator for RangeDistance {
    fn inputs(&self) -> Vec<String> {
        [RawColumn::High, RawColumn::Low, RawColumn::Close]
            .map(|c| c.name().to_owned())
            .to_vec()
    }

    fn outputs(&self) -> Vec<String> {
        vec![self.high_column(), self.low_column()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let high = series.input(self, RawColumn::High.name())?;
        let low = series.input(self, RawColumn::Low.name())?;
        let close = series.input(self, RawColumn::Close.name())?;

        let highest = rolling(high, self.length, Reduction::Max);
        let lowest = rolling(low, self.length, Reduction::Min);

        Ok(vec![
            (self.high_column(), distance(close, &highest)),
            (self.low_column(), distance(close, &lowest)),
        ])
    }
}

impl Display for RangeDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RangeDistance({})", self.length)
    }
}
