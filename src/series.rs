use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{Ohlcv, RawColumn, Result, SeriesError, Timestamp};

/// Values of one column, one entry per row. `None` marks a value that is not
/// (yet) computable at that row, e.g. inside an indicator's warm-up period.
pub type Column = Vec<Option<f64>>;

/// Ordered, time-indexed table of bars plus derived columns.
///
/// Rows are addressed by position `0..N`, in strictly increasing timestamp
/// order. Columns are addressed by name and kept in insertion order. Columns
/// can only be appended, never replaced or removed, and every column has
/// exactly [`row_count`](Series::row_count) values.
///
/// # Example
///
/// ```
/// use quantedge_frame::{Bar, Series};
///
/// let bars = [
///     Bar::new(1, 10.0, 11.0, 9.0, 10.5, 100.0),
///     Bar::new(2, 10.5, 12.0, 10.0, 11.5, 120.0),
/// ];
/// let mut series = Series::from_bars(&bars)?;
///
/// series.append_column("spread", vec![Some(2.0), Some(2.0)])?;
/// assert_eq!(series.get_column("close")?, &[Some(10.5), Some(11.5)]);
/// assert_eq!(series.row_count(), 2);
/// # Ok::<(), quantedge_frame::SeriesError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Series {
    timestamps: Vec<Timestamp>,
    columns: IndexMap<String, Column>,
}

impl Series {
    /// Creates a series with the given row timestamps and no columns.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnorderedTimestamps`] if timestamps are not strictly
    /// increasing.
    pub fn with_timestamps(timestamps: Vec<Timestamp>) -> Result<Self> {
        if let Some(index) = timestamps.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SeriesError::UnorderedTimestamps {
                index: index + 1,
                previous: timestamps[index],
                current: timestamps[index + 1],
            });
        }

        Ok(Self {
            timestamps,
            columns: IndexMap::new(),
        })
    }

    /// Builds a series from bars, storing the [`RawColumn`]s.
    ///
    /// Non-finite raw values are stored as absent. Bars whose high/low do not
    /// bracket open and close are accepted but logged.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnorderedTimestamps`] if bar open times are not strictly
    /// increasing.
    pub fn from_bars<B: Ohlcv>(bars: &[B]) -> Result<Self> {
        let mut series = Self::with_timestamps(bars.iter().map(Ohlcv::open_time).collect())?;

        for (row, bar) in bars.iter().enumerate() {
            if !bar.is_consistent() {
                warn!(
                    row,
                    open_time = bar.open_time(),
                    "bar high/low do not bracket open and close"
                );
            }
        }

        for raw in RawColumn::ALL {
            series.append_column(raw.name(), bars.iter().map(|b| raw.extract(b)).collect())?;
        }

        Ok(series)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Row timestamps.
    #[inline]
    #[must_use]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Appends a new column.
    ///
    /// # Errors
    ///
    /// - [`SeriesError::LengthMismatch`] if `values` does not have one entry
    ///   per row.
    /// - [`SeriesError::DuplicateColumn`] if `name` is already taken.
    pub fn append_column(&mut self, name: impl Into<String>, values: Column) -> Result<()> {
        let name = name.into();

        if values.len() != self.row_count() {
            return Err(SeriesError::LengthMismatch {
                column: name,
                expected: self.row_count(),
                actual: values.len(),
            });
        }

        if self.columns.contains_key(&name) {
            return Err(SeriesError::DuplicateColumn(name));
        }

        self.columns.insert(name, values);
        Ok(())
    }

    /// Returns the values of a column.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnknownColumn`] if no such column exists.
    pub fn get_column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SeriesError::UnknownColumn(name.to_owned()))
    }

    /// Returns a single value, `Ok(None)` when absent at that row or when
    /// `row` is out of range.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnknownColumn`] if no such column exists.
    pub fn value(&self, name: &str, row: usize) -> Result<Option<f64>> {
        Ok(self.get_column(name)?.get(row).copied().flatten())
    }

    /// Removes every row where any column is absent.
    ///
    /// Returns a new series with re-compacted row indices, preserving the
    /// relative order of the kept rows. Idempotent.
    #[must_use]
    pub fn drop_incomplete_rows(&self) -> Series {
        let keep: Vec<usize> = (0..self.row_count())
            .filter(|&row| self.columns.values().all(|column| column[row].is_some()))
            .collect();

        debug!(
            kept = keep.len(),
            dropped = self.row_count() - keep.len(),
            "dropped incomplete rows"
        );

        Series {
            timestamps: keep.iter().map(|&row| self.timestamps[row]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), keep.iter().map(|&row| column[row]).collect()))
                .collect(),
        }
    }

    /// Projects the series onto the given columns, in the given order.
    ///
    /// # Errors
    ///
    /// - [`SeriesError::UnknownColumn`] if any name is unknown.
    /// - [`SeriesError::DuplicateColumn`] if a name is requested twice.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Series> {
        let mut columns = IndexMap::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let values = self.get_column(name)?.to_vec();
            if columns.insert(name.to_owned(), values).is_some() {
                return Err(SeriesError::DuplicateColumn(name.to_owned()));
            }
        }

        Ok(Series {
            timestamps: self.timestamps.clone(),
            columns,
        })
    }

    /// Reads a column an indicator depends on.
    pub(crate) fn input(&self, indicator: &impl ToString, name: &str) -> Result<&[Option<f64>]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SeriesError::missing_dependency(indicator.to_string(), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{bar, ohlc};

    fn series(closes: &[f64]) -> Series {
        let bars: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(c, i as u64))
            .collect();
        Series::from_bars(&bars).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn stores_raw_columns_in_order() {
            let s = series(&[1.0, 2.0]);
            let names: Vec<_> = s.column_names().collect();
            assert_eq!(names, ["open", "high", "low", "close", "volume"]);
        }

        #[test]
        fn row_count_matches_bars() {
            let s = series(&[1.0, 2.0, 3.0]);
            assert_eq!(s.row_count(), 3);
            assert_eq!(s.timestamps(), &[0, 1, 2]);
        }

        #[test]
        fn empty_bars_give_empty_series() {
            let s = series(&[]);
            assert!(s.is_empty());
            assert_eq!(s.get_column("close").unwrap(), &[] as &[Option<f64>]);
        }

        #[test]
        fn rejects_repeated_timestamp() {
            let bars = [bar(1.0, 5), bar(2.0, 6), bar(3.0, 6)];
            assert_eq!(
                Series::from_bars(&bars),
                Err(SeriesError::UnorderedTimestamps {
                    index: 2,
                    previous: 6,
                    current: 6,
                })
            );
        }

        #[test]
        fn rejects_decreasing_timestamp() {
            let err = Series::with_timestamps(vec![3, 2]).unwrap_err();
            assert!(matches!(
                err,
                SeriesError::UnorderedTimestamps { index: 1, .. }
            ));
        }

        #[test]
        fn non_finite_raw_value_is_absent() {
            let bars = [bar(1.0, 1), bar(f64::NAN, 2)];
            let s = Series::from_bars(&bars).unwrap();
            assert_eq!(s.get_column("close").unwrap(), &[Some(1.0), None]);
        }

        #[test]
        fn accepts_inconsistent_bar() {
            // high below close is logged, not rejected
            let bars = [ohlc(10.0, 10.5, 9.0, 11.0, 1)];
            assert!(Series::from_bars(&bars).is_ok());
        }
    }

    mod append {
        use super::*;

        #[test]
        fn adds_column() {
            let mut s = series(&[1.0, 2.0]);
            s.append_column("x", vec![None, Some(3.0)]).unwrap();
            assert_eq!(s.get_column("x").unwrap(), &[None, Some(3.0)]);
            assert_eq!(s.column_names().last(), Some("x"));
        }

        #[test]
        fn rejects_wrong_length() {
            let mut s = series(&[1.0, 2.0]);
            assert_eq!(
                s.append_column("x", vec![Some(1.0)]),
                Err(SeriesError::LengthMismatch {
                    column: "x".into(),
                    expected: 2,
                    actual: 1,
                })
            );
            assert!(!s.contains("x"));
        }

        #[test]
        fn rejects_duplicate_name() {
            let mut s = series(&[1.0]);
            assert_eq!(
                s.append_column("close", vec![Some(9.0)]),
                Err(SeriesError::DuplicateColumn("close".into()))
            );
            assert_eq!(s.get_column("close").unwrap(), &[Some(1.0)]);
        }

        #[test]
        fn works_on_timestamp_only_series() {
            let mut s = Series::with_timestamps(vec![1, 2, 3]).unwrap();
            s.append_column("x", vec![Some(1.0); 3]).unwrap();
            assert_eq!(s.column_names().count(), 1);
        }
    }

    mod read {
        use super::*;

        #[test]
        fn unknown_column() {
            let s = series(&[1.0]);
            assert_eq!(
                s.get_column("sma_5"),
                Err(SeriesError::UnknownColumn("sma_5".into()))
            );
        }

        #[test]
        fn value_at_row() {
            let s = series(&[1.0, 2.0]);
            assert_eq!(s.value("close", 1), Ok(Some(2.0)));
            assert_eq!(s.value("close", 5), Ok(None));
        }

        #[test]
        fn input_reports_missing_dependency() {
            let s = series(&[1.0]);
            assert_eq!(
                s.input(&"MACD", "ema_12"),
                Err(SeriesError::missing_dependency("MACD", "ema_12"))
            );
        }
    }

    mod drop_incomplete {
        use super::*;

        #[test]
        fn removes_rows_with_any_absent_value() {
            let mut s = series(&[1.0, 2.0, 3.0, 4.0]);
            s.append_column("a", vec![None, Some(1.0), Some(1.0), Some(1.0)])
                .unwrap();
            s.append_column("b", vec![Some(1.0), Some(1.0), None, Some(1.0)])
                .unwrap();

            let dropped = s.drop_incomplete_rows();

            assert_eq!(dropped.row_count(), 2);
            assert_eq!(dropped.timestamps(), &[1, 3]);
            assert_eq!(dropped.get_column("close").unwrap(), &[Some(2.0), Some(4.0)]);
        }

        #[test]
        fn keeps_column_order() {
            let mut s = series(&[1.0]);
            s.append_column("z", vec![Some(0.0)]).unwrap();
            s.append_column("a", vec![Some(0.0)]).unwrap();
            let names: Vec<_> = s.drop_incomplete_rows().column_names().map(str::to_owned).collect();
            assert_eq!(names, ["open", "high", "low", "close", "volume", "z", "a"]);
        }

        #[test]
        fn idempotent() {
            let mut s = series(&[1.0, 2.0, 3.0]);
            s.append_column("a", vec![None, Some(1.0), None]).unwrap();
            let once = s.drop_incomplete_rows();
            assert_eq!(once.drop_incomplete_rows(), once);
        }

        #[test]
        fn all_rows_incomplete_gives_empty_series() {
            let mut s = series(&[1.0, 2.0]);
            s.append_column("a", vec![None, None]).unwrap();
            let dropped = s.drop_incomplete_rows();
            assert!(dropped.is_empty());
            assert!(dropped.contains("a"));
        }

        #[test]
        fn leaves_original_untouched() {
            let mut s = series(&[1.0, 2.0]);
            s.append_column("a", vec![None, Some(1.0)]).unwrap();
            let _ = s.drop_incomplete_rows();
            assert_eq!(s.row_count(), 2);
        }
    }

    mod select {
        use super::*;

        #[test]
        fn projects_in_requested_order() {
            let s = series(&[1.0, 2.0]);
            let projected = s.select(&["volume", "close"]).unwrap();
            let names: Vec<_> = projected.column_names().collect();
            assert_eq!(names, ["volume", "close"]);
            assert_eq!(projected.timestamps(), s.timestamps());
        }

        #[test]
        fn unknown_name_fails() {
            let s = series(&[1.0]);
            assert_eq!(
                s.select(&["close", "rsi"]),
                Err(SeriesError::UnknownColumn("rsi".into()))
            );
        }

        #[test]
        fn repeated_name_is_duplicate() {
            let s = series(&[1.0]);
            assert_eq!(
                s.select(&["close", "volume", "close"]),
                Err(SeriesError::DuplicateColumn("close".into()))
            );
        }
    }
}
