use crate::{Column, Result, Series, window::RollingWindow, window::Reduction};

use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

/// A named output column produced by an [`Indicator`].
pub type Output = (String, Column);

/// A technical indicator computed over a whole [`Series`].
///
/// Indicators are stateless value types: everything they need is in their
/// parameters and in the columns they read. Computing twice over the same
/// series gives the same columns.
///
/// The trait is object safe so that a pipeline can hold a heterogeneous,
/// ordered list of `Box<dyn Indicator>`.
///
/// # Example
///
/// ```
/// use quantedge_frame::{Bar, Indicator, Series, Sma};
/// use std::num::NonZero;
///
/// let bars: Vec<Bar> = (0..4)
///     .map(|i| Bar::new(i, 1.0, 1.0, 1.0, (i + 1) as f64, 0.0))
///     .collect();
/// let mut series = Series::from_bars(&bars)?;
///
/// let sma = Sma::close(NonZero::new(3).unwrap());
/// sma.apply(&mut series)?;
///
/// assert_eq!(
///     series.get_column("sma_3")?,
///     &[None, None, Some(2.0), Some(3.0)],
/// );
/// # Ok::<(), quantedge_frame::SeriesError>(())
/// ```
pub trait Indicator: Display + Debug {
    /// Columns read by [`compute`](Indicator::compute).
    fn inputs(&self) -> Vec<String>;

    /// Columns written by [`apply`](Indicator::apply), in output order.
    fn outputs(&self) -> Vec<String>;

    /// Computes the output columns without modifying the series.
    ///
    /// # Errors
    ///
    /// [`SeriesError::MissingDependency`](crate::SeriesError::MissingDependency)
    /// if an input column is not present.
    fn compute(&self, series: &Series) -> Result<Vec<Output>>;

    /// Computes the output columns and appends them to the series.
    ///
    /// # Errors
    ///
    /// Propagates [`compute`](Indicator::compute) errors, and
    /// [`SeriesError::DuplicateColumn`](crate::SeriesError::DuplicateColumn)
    /// if an output column already exists.
    fn apply(&self, series: &mut Series) -> Result<()> {
        for (name, values) in self.compute(series)? {
            series.append_column(name, values)?;
        }
        Ok(())
    }
}

/// Averaging method for indicators built on a mean of recent values
/// ([`Rsi`](crate::Rsi), [`Atr`](crate::Atr)).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Smoothing {
    /// Rolling arithmetic mean over the trailing window.
    #[default]
    Simple,
    /// Wilder's smoothing: seeded with the mean of the first full window,
    /// then `avg = (prev_avg × (length − 1) + value) / length`.
    Wilder,
}

impl Display for Smoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Smoothing {
    /// Averages `values` with the given window length.
    ///
    /// Both methods are absent until the first full window without absent
    /// values. After Wilder seeding, an absent value yields an absent output
    /// and leaves the running average unchanged.
    pub(crate) fn apply(self, values: &[Option<f64>], length: NonZero<usize>) -> Column {
        match self {
            Self::Simple => crate::rolling(values, length, Reduction::Mean),
            Self::Wilder => wilder(values, length),
        }
    }
}

fn wilder(values: &[Option<f64>], length: NonZero<usize>) -> Column {
    #[allow(clippy::cast_precision_loss)]
    let (length_f, length_minus_one) = (length.get() as f64, (length.get() - 1) as f64);

    let mut seed = Some(RollingWindow::new(length));
    let mut average = 0.0;

    values
        .iter()
        .map(|&value| {
            if let Some(window) = &mut seed {
                window.push(value);
                let mean = window.reduce(Reduction::Mean)?;
                average = mean;
                seed = None;
                return Some(average);
            }

            let value = value?;
            average = length_minus_one.mul_add(average, value) / length_f;
            Some(average)
        })
        .collect()
}
