use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Result, Series, Sma};

/// Ratio of close to its simple moving average, written as
/// `price_to_sma_{length}`.
///
/// Reads `sma_{length}`. Absent where the SMA is absent or zero.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct PriceToSma {
    length: usize,
}

impl PriceToSma {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
        }
    }

    /// Name of the ratio column for a length.
    #[must_use]
    pub fn column(length: usize) -> String {
        format!("price_to_sma_{length}")
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for PriceToSma {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned(), Sma::column(self.length)]
    }

    fn outputs(&self) -> Vec<String> {
        vec![Self::column(self.length)]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;
        let sma = series.input(self, &Sma::column(self.length))?;

        let ratio = close
            .iter()
            .zip(sma)
            .map(|(c, s)| {
                let (c, s) = ((*c)?, (*s)?);
                (s != 0.0).then(|| c / s)
            })
            .collect();

        Ok(vec![(Self::column(self.length), ratio)])
    }
}

impl Display for PriceToSma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceToSMA({})", self.length)
    }
}
