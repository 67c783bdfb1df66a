use std::{fmt::Display, num::NonZero};

use crate::{Ema, Indicator, Output, Result, Series, ema};

/// Moving Average Convergence/Divergence (MACD).
///
/// Reads the `ema_{fast}` and `ema_{slow}` columns, so the matching
/// [`Ema`] steps must run first. Writes three columns:
///
/// ```text
/// macd        = ema_fast − ema_slow
/// macd_signal = EMA(macd, signal)      seeded at the first macd value
/// macd_hist   = macd − macd_signal
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    #[must_use]
    pub fn new(fast: NonZero<usize>, slow: NonZero<usize>, signal: NonZero<usize>) -> Self {
        Self {
            fast: fast.get(),
            slow: slow.get(),
            signal: signal.get(),
        }
    }

    /// MACD(12, 26, 9).
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn default_12_26_9() -> Self {
        Self::new(
            NonZero::new(12).unwrap(),
            NonZero::new(26).unwrap(),
            NonZero::new(9).unwrap(),
        )
    }

    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }
}

impl Indicator for Macd {
    fn inputs(&self) -> Vec<String> {
        vec![Ema::column(self.fast), Ema::column(self.slow)]
    }

    fn outputs(&self) -> Vec<String> {
        ["macd", "macd_signal", "macd_hist"]
            .map(str::to_owned)
            .to_vec()
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let fast = series.input(self, &Ema::column(self.fast))?;
        let slow = series.input(self, &Ema::column(self.slow))?;

        let macd: Vec<_> = fast
            .iter()
            .zip(slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal = ema(&macd, self.signal);
        let hist = macd
            .iter()
            .zip(&signal)
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect();

        Ok(vec![
            ("macd".to_owned(), macd),
            ("macd_signal".to_owned(), signal),
            ("macd_hist".to_owned(), hist),
        ])
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MACD({}, {}, {})", self.fast, self.slow, self.signal)
    }
}
