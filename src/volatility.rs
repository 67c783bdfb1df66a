use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Reduction, Result, Series, rolling};

/// Rolling volatility of one-bar percentage returns, written as
/// `volatility`.
///
/// ```text
/// return[i]     = close[i] / close[i − 1] − 1          absent at row 0
/// volatility[i] = σ(return[i − length + 1 ..= i]) × 100
/// ```
///
/// `σ` is the population deviation (ddof = 0). The first value appears at
/// row `length`. A return over a zero close is absent, which makes every
/// window containing it absent; a window of equal returns gives `0`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Volatility {
    length: NonZero<usize>,
}

impl Volatility {
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
}

impl Indicator for Volatility {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["volatility".to_owned()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;

        let returns: Vec<_> = std::iter::once(None)
            .chain(close.windows(2).map(|w| {
                let (previous, current) = (w[0]?, w[1]?);
                (previous != 0.0).then(|| current / previous - 1.0)
            }))
            .take(close.len())
            .collect();

        let volatility = rolling(&returns, self.length, Reduction::StdDev)
            .into_iter()
            .map(|std| std.map(|s| s * 100.0))
            .collect();

        Ok(vec![("volatility".to_owned(), volatility)])
    }
}

impl Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Volatility({}, close)", self.length)
    }
}
