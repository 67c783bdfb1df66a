use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Output, Result, Series, Sma};

/// Crossover signal between a fast and a slow SMA, written as
/// `sma_{fast}_{slow}_cross`.
///
/// ```text
///  1   fast[i] > slow[i]  and  fast[i − 1] ≤ slow[i − 1]
/// −1   fast[i] < slow[i]  and  fast[i − 1] ≥ slow[i − 1]
///  0   otherwise
/// ```
///
/// Rows where either the current or the previous pair is absent are `0`, so
/// the column itself is never absent.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaCrossover {
    fast: usize,
    slow: usize,
}

impl SmaCrossover {
    #[must_use]
    pub fn new(fast: NonZero<usize>, slow: NonZero<usize>) -> Self {
        Self {
            fast: fast.get(),
            slow: slow.get(),
        }
    }

    /// Name of the crossover column for a pair of lengths.
    #[must_use]
    pub fn column(fast: usize, slow: usize) -> String {
        format!("sma_{fast}_{slow}_cross")
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
}

/// Signal for one bar given the previous and current `(fast, slow)` pairs.
fn signal(previous: (f64, f64), current: (f64, f64)) -> f64 {
    let ((prev_fast, prev_slow), (fast, slow)) = (previous, current);

    if fast > slow && prev_fast <= prev_slow {
        1.0
    } else if fast < slow && prev_fast >= prev_slow {
        -1.0
    } else {
        0.0
    }
}

impl Indicator for SmaCrossover {
    fn inputs(&self) -> Vec<String> {
        vec![Sma::column(self.fast), Sma::column(self.slow)]
    }

    fn outputs(&self) -> Vec<String> {
        vec![Self::column(self.fast, self.slow)]
    }

    fn compute(&self, series: &Series) -> Result<Vec<Output>> {
        let fast = series.input(self, &Sma::column(self.fast))?;
        let slow = series.input(self, &Sma::column(self.slow))?;

        let pair = |i: usize| Some((fast[i]?, slow[i]?));
        let cross = (0..fast.len())
            .map(|i| {
                let previous = i.checked_sub(1).and_then(pair);
                let value = match (previous, pair(i)) {
                    (Some(previous), Some(current)) => signal(previous, current),
                    _ => 0.0,
                };
                Some(value)
            })
            .collect();

        Ok(vec![(Self::column(self.fast, self.slow), cross)])
    }
}

impl Display for SmaCrossover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMACross({}, {})", self.fast, self.slow)
    }
}
