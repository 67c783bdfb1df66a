use std::{fmt::Display, num::NonZero};

use crate::{Column, Indicator, Output, RawColumn, Result, Series};

/// Exponential moving average of a column.
///
/// Uses the standard smoothing factor `α = 2 / (length + 1)` and is seeded
/// with the first present value, so there is no warm-up gap:
///
/// ```text
/// ema[0] = x[0]
/// ema[i] = α × x[i] + (1 − α) × ema[i − 1]
/// ```
///
/// Leading absent inputs stay absent. An absent input after seeding yields
/// an absent output and leaves the recursion at its previous value.
///
/// # Example
///
/// ```
/// use quantedge_frame::ema;
///
/// // α = 0.5
/// let values = [Some(2.0), Some(4.0), Some(8.0)];
/// assert_eq!(ema(&values, 3), vec![Some(2.0), Some(3.0), Some(5.5)]);
/// ```
#[must_use]
pub fn ema(values: &[Option<f64>], length: usize) -> Column {
    #[allow(clippy::cast_precision_loss)]
    let alpha = 2.0 / (length + 1) as f64;
    let mut previous: Option<f64> = None;

    values
        .iter()
        .map(|&value| {
            let value = value?;
            let current = match previous {
                Some(prev) => alpha.mul_add(value - prev, prev),
                None => value,
            };
            previous = Some(current);
            Some(current)
        })
        .collect()
}

/// Exponential Moving Average (EMA) of closing price, written as
/// `ema_{length}`.
///
/// See [`ema`] for the recursion. Defined from the first row.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Ema {
    length: usize,
}

impl Ema {
    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
        }
    }

    /// Name of the EMA column for a length.
    #[must_use]
    pub fn column(length: usize) -> String {
        format!("ema_{length}")
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Ema {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned()]
    }

    fn outputs(&self) -> Vec<String> {
        vec![Self::column(self.length)]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;

        Ok(vec![(Self::column(self.length), ema(close, self.length))])
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, close)", self.length)
    }
}
