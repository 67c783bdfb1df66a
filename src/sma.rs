use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, RawColumn, Reduction, Result, Series, rolling};

/// Simple Moving Average (SMA).
///
/// Unweighted mean of the last *n* values of a source column, where *n* is
/// the configured length. Absent for the first `length - 1` rows.
///
/// ```text
/// sma[i] = mean(source[i - length + 1 ..= i])
/// ```
///
/// [`Sma::close`] writes `sma_{length}`; [`Sma::volume`] writes `volume_sma`.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Sma {
    length: NonZero<usize>,
    source: RawColumn,
    output: String,
}

impl Sma {
    /// SMA of closing price, written as `sma_{length}`.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self {
            length,
            source: RawColumn::Close,
            output: Self::column(length.get()),
        }
    }

    /// SMA of volume, written as `volume_sma`.
    #[must_use]
    pub fn volume(length: NonZero<usize>) -> Self {
        Self {
            length,
            source: RawColumn::Volume,
            output: "volume_sma".to_owned(),
        }
    }

    /// Name of the close SMA column for a length.
    #[must_use]
    pub fn column(length: usize) -> String {
        format!("sma_{length}")
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }
}

impl Indicator for Sma {
    fn inputs(&self) -> Vec<String> {
        vec![self.source.name().to_owned()]
    }

    fn outputs(&self) -> Vec<String> {
        vec![self.output.clone()]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let source = series.input(self, self.source.name())?;

        Ok(vec![(
            self.output.clone(),
            rolling(source, self.length, Reduction::Mean),
        )])
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.length, self.source)
    }
}
