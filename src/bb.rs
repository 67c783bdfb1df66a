use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{Indicator, Output, RawColumn, Reduction, Result, Series, Sma, rolling};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a positive, non-NaN `f64`. The constructor panics if the value is
/// zero, negative, or NaN.
///
/// Defaults to `2.0` (the standard Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "std_dev must not be NaN");
        assert!(value > 0.0, "std_dev must be positive");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

impl Display for StdDev {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bollinger Bands.
///
/// The middle band is read from the `sma_{length}` column, so the matching
/// [`Sma`] must run first. The deviation is the population standard
/// deviation (ddof = 0) of the trailing `length` closes.
///
/// ```text
/// bollinger_mid   = sma_{length}
/// bollinger_std   = σ(close[i − length + 1 ..= i])
/// bollinger_upper = mid + k × σ
/// bollinger_lower = mid − k × σ
/// ```
///
/// All four columns are absent for the first `length - 1` rows. A constant
/// window has `σ = 0` and the bands collapse onto the middle.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Bollinger {
    length: NonZero<usize>,
    std_dev: StdDev,
}

impl Bollinger {
    /// Bollinger Bands with a custom length and `2σ` bands.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::with_std_dev(length, StdDev::default())
    }

    #[must_use]
    pub fn with_std_dev(length: NonZero<usize>, std_dev: StdDev) -> Self {
        Self {
            length,
            std_dev,
        }
    }

    /// BB(20, close, 2σ), the standard setting.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn default_20() -> Self {
        Self::close(NonZero::new(20).unwrap())
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    /// Multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> StdDev {
        self.std_dev
    }
}

impl Indicator for Bollinger {
    fn inputs(&self) -> Vec<String> {
        vec![RawColumn::Close.name().to_owned(), Sma::column(self.length.get())]
    }

    fn outputs(&self) -> Vec<String> {
        [
            "bollinger_mid",
            "bollinger_std",
            "bollinger_upper",
            "bollinger_lower",
        ]
        .map(str::to_owned)
        .to_vec()
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let close = series.input(self, RawColumn::Close.name())?;
        let mid = series.input(self, &Sma::column(self.length.get()))?.to_vec();

        let std = rolling(close, self.length, Reduction::StdDev);
        let k = self.std_dev.value();

        let band = |sign: f64| -> Vec<_> {
            mid.iter()
                .zip(&std)
                .map(|(m, s)| Some((sign * k).mul_add((*s)?, (*m)?)))
                .collect()
        };
        let upper = band(1.0);
        let lower = band(-1.0);

        Ok(vec![
            ("bollinger_mid".to_owned(), mid),
            ("bollinger_std".to_owned(), std),
            ("bollinger_upper".to_owned(), upper),
            ("bollinger_lower".to_owned(), lower),
        ])
    }
}

impl Display for Bollinger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB({}, close, {})", self.length, self.std_dev)
    }
}
