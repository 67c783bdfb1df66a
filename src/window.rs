use std::{collections::VecDeque, num::NonZero};

use crate::Column;

/// Reduction applied to every trailing window by [`rolling`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Reduction {
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Population standard deviation (divides by the window length).
    StdDev,
    Max,
    Min,
}

/// Trailing window over an optional-valued column.
///
/// Holds the last `size` values pushed, absent ones included. The window is
/// ready once it is full and contains no absent value.
#[derive(Clone, Debug)]
pub(crate) struct RollingWindow {
    size: usize,
    window: VecDeque<Option<f64>>,
    /// Number of absent values currently in the window.
    absent: usize,
}

impl RollingWindow {
    pub fn new(size: NonZero<usize>) -> Self {
        let size = size.get();

        Self {
            size,
            window: VecDeque::with_capacity(size),
            absent: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, value: Option<f64>) {
        if self.window.len() == self.size
            && let Some(None) = self.window.pop_front()
        {
            self.absent -= 1;
        }

        if value.is_none() {
            self.absent += 1;
        }
        self.window.push_back(value);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.window.len() == self.size && self.absent == 0
    }

    /// Reduces the current window contents, `None` until ready.
    ///
    /// Each call folds the whole window rather than maintaining running
    /// totals, so sums over zeros are exactly zero and no rounding drift
    /// builds up over long series.
    pub fn reduce(&self, reduction: Reduction) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }

        let values = self.window.iter().flatten().copied();

        #[allow(clippy::cast_precision_loss)]
        let length = self.size as f64;

        let result = match reduction {
            Reduction::Sum => values.sum(),
            Reduction::Mean => values.sum::<f64>() / length,
            Reduction::StdDev => {
                // shifted by the first value so equal values give exactly 0
                let first = self.window.front().copied().flatten()?;
                let shifted = values.map(|v| v - first);
                let mean = shifted.clone().sum::<f64>() / length;
                let variance = shifted.map(|d| (d - mean) * (d - mean)).sum::<f64>() / length;
                variance.sqrt()
            }
            Reduction::Max => values.fold(f64::NEG_INFINITY, f64::max),
            Reduction::Min => values.fold(f64::INFINITY, f64::min),
        };

        Some(result)
    }
}

/// Applies `reduction` over the trailing, inclusive window of `size` values
/// ending at each row.
///
/// Row `i` is absent when `i < size - 1` or when any value in
/// `values[i + 1 - size..=i]` is absent. A window of equal values has a
/// standard deviation of exactly `0.0`.
///
/// # Example
///
/// ```
/// use quantedge_frame::{Reduction, rolling};
/// use std::num::NonZero;
///
/// let closes = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
/// assert_eq!(
///     rolling(&closes, NonZero::new(3).unwrap(), Reduction::Mean),
///     vec![None, None, Some(2.0), Some(3.0)],
/// );
/// ```
#[must_use]
pub fn rolling(values: &[Option<f64>], size: NonZero<usize>, reduction: Reduction) -> Column {
    let mut window = RollingWindow::new(size);

    values
        .iter()
        .map(|&value| {
            window.push(value);
            window.reduce(reduction)
        })
        .collect()
}
