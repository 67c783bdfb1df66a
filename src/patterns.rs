//! Candlestick and indicator-event pattern detection over an augmented
//! [`Series`].

use std::fmt::Display;

use tracing::debug;

use crate::{RawColumn, Result, Series, Sma};

/// Directional reading of a detected pattern.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternKind {
    /// Open and close nearly equal relative to the bar range.
    Doji,
    /// Bullish bar with a long lower shadow and almost no upper shadow.
    Hammer,
    BullishEngulfing,
    BearishEngulfing,
    /// `macd` crosses above `macd_signal`.
    MacdBullishCross,
    /// `macd` crosses below `macd_signal`.
    MacdBearishCross,
    /// `sma_50` crosses above `sma_200`.
    GoldenCross,
    /// `sma_50` crosses below `sma_200`.
    DeathCross,
    RsiOverbought,
    RsiOversold,
}

impl PatternKind {
    #[must_use]
    pub fn bias(self) -> Bias {
        match self {
            Self::Doji => Bias::Neutral,
            Self::Hammer
            | Self::BullishEngulfing
            | Self::MacdBullishCross
            | Self::GoldenCross
            | Self::RsiOversold => Bias::Bullish,
            Self::BearishEngulfing
            | Self::MacdBearishCross
            | Self::DeathCross
            | Self::RsiOverbought => Bias::Bearish,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Doji => "Doji",
            Self::Hammer => "Hammer",
            Self::BullishEngulfing => "Bullish Engulfing",
            Self::BearishEngulfing => "Bearish Engulfing",
            Self::MacdBullishCross => "MACD Bullish Cross",
            Self::MacdBearishCross => "MACD Bearish Cross",
            Self::GoldenCross => "Golden Cross",
            Self::DeathCross => "Death Cross",
            Self::RsiOverbought => "RSI Overbought",
            Self::RsiOversold => "RSI Oversold",
        }
    }
}

impl Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A pattern found at one or more consecutive rows.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    kind: PatternKind,
    bias: Bias,
    rows: Vec<usize>,
}

impl Pattern {
    fn new(kind: PatternKind, rows: Vec<usize>) -> Self {
        Self {
            kind,
            bias: kind.bias(),
            rows,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn bias(&self) -> Bias {
        self.bias
    }

    /// Row indices the pattern spans, ascending.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

/// Enabled detectors and RSI thresholds for [`detect`].
///
/// Every detector is enabled by default, with the conventional RSI levels
/// of 70 and 30.
///
/// ```
/// use quantedge_frame::PatternConfig;
///
/// let candles_only = PatternConfig {
///     macd_cross: false,
///     golden_cross: false,
///     death_cross: false,
///     overbought: false,
///     oversold: false,
///     ..PatternConfig::default()
/// };
/// assert!(candles_only.doji);
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct PatternConfig {
    pub doji: bool,
    pub hammer: bool,
    /// Both bullish and bearish engulfing.
    pub engulfing: bool,
    /// Both MACD crossing directions.
    pub macd_cross: bool,
    pub golden_cross: bool,
    pub death_cross: bool,
    pub overbought: bool,
    pub oversold: bool,
    /// RSI strictly above this level is overbought.
    pub overbought_level: f64,
    /// RSI strictly below this level is oversold.
    pub oversold_level: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            doji: true,
            hammer: true,
            engulfing: true,
            macd_cross: true,
            golden_cross: true,
            death_cross: true,
            overbought: true,
            oversold: true,
            overbought_level: 70.0,
            oversold_level: 30.0,
        }
    }
}

#[derive(Clone, Copy)]
struct Candle {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Candle {
    fn body(self) -> f64 {
        (self.open - self.close).abs()
    }

    fn is_bullish(self) -> bool {
        self.close > self.open
    }

    fn is_bearish(self) -> bool {
        self.close < self.open
    }
}

fn candles(series: &Series, kind: PatternKind) -> Result<Vec<Option<Candle>>> {
    let open = series.input(&kind, RawColumn::Open.name())?;
    let high = series.input(&kind, RawColumn::High.name())?;
    let low = series.input(&kind, RawColumn::Low.name())?;
    let close = series.input(&kind, RawColumn::Close.name())?;

    Ok((0..series.row_count())
        .map(|i| {
            Some(Candle {
                open: open[i]?,
                high: high[i]?,
                low: low[i]?,
                close: close[i]?,
            })
        })
        .collect())
}

fn single_bar(
    series: &Series,
    kind: PatternKind,
    matches: impl Fn(Candle) -> bool,
) -> Result<Vec<Pattern>> {
    Ok(candles(series, kind)?
        .into_iter()
        .enumerate()
        .filter_map(|(i, candle)| candle.filter(|&c| matches(c)).map(|_| Pattern::new(kind, vec![i])))
        .collect())
}

fn is_doji(c: Candle) -> bool {
    let range = c.high - c.low;
    range > 0.0 && c.body() / range < 0.1
}

fn is_hammer(c: Candle) -> bool {
    let body = c.body();
    let lower_shadow = c.open.min(c.close) - c.low;
    let upper_shadow = c.high - c.open.max(c.close);
    c.is_bullish() && lower_shadow > 2.0 * body && upper_shadow < 0.1 * body
}

fn engulfing(series: &Series, kind: PatternKind) -> Result<Vec<Pattern>> {
    let bullish = kind == PatternKind::BullishEngulfing;
    let candles = candles(series, kind)?;

    Ok(candles
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let (previous, current) = (pair[0]?, pair[1]?);
            let found = if bullish {
                previous.is_bearish()
                    && current.is_bullish()
                    && current.open < previous.close
                    && current.close > previous.open
            } else {
                previous.is_bullish()
                    && current.is_bearish()
                    && current.open > previous.close
                    && current.close < previous.open
            };
            found.then(|| Pattern::new(kind, vec![i, i + 1]))
        })
        .collect())
}

/// Rows where `line` moves from strictly below to strictly above `reference`
/// (`upward`), or the reverse.
fn crosses(
    series: &Series,
    kind: PatternKind,
    line: &str,
    reference: &str,
    upward: bool,
) -> Result<Vec<Pattern>> {
    let line = series.input(&kind, line)?;
    let reference = series.input(&kind, reference)?;
    let spread = |i: usize| Some(line[i]? - reference[i]?);

    Ok((1..series.row_count())
        .filter(|&i| {
            match (spread(i - 1), spread(i)) {
                (Some(before), Some(after)) if upward => before < 0.0 && after > 0.0,
                (Some(before), Some(after)) => before > 0.0 && after < 0.0,
                _ => false,
            }
        })
        .map(|i| Pattern::new(kind, vec![i]))
        .collect())
}

fn rsi_levels(
    series: &Series,
    kind: PatternKind,
    matches: impl Fn(f64) -> bool,
) -> Result<Vec<Pattern>> {
    Ok(series
        .input(&kind, "rsi")?
        .iter()
        .enumerate()
        .filter(|(_, rsi)| rsi.is_some_and(&matches))
        .map(|(i, _)| Pattern::new(kind, vec![i]))
        .collect())
}

/// Scans `series` with every detector enabled in `config`.
///
/// Patterns are grouped by detector, in the order of [`PatternKind`], and
/// ascending by row within a detector. Rows where a detector's inputs are
/// absent are skipped.
///
/// # Errors
///
/// [`SeriesError::MissingDependency`](crate::SeriesError::MissingDependency)
/// if an enabled detector's column has not been computed: the raw OHLC
/// columns for candle patterns, `macd`/`macd_signal`, `sma_50`/`sma_200` or
/// `rsi`.
pub fn detect(series: &Series, config: &PatternConfig) -> Result<Vec<Pattern>> {
    let (sma_50, sma_200) = (Sma::column(50), Sma::column(200));
    let mut patterns = Vec::new();

    if config.doji {
        patterns.extend(single_bar(series, PatternKind::Doji, is_doji)?);
    }
    if config.hammer {
        patterns.extend(single_bar(series, PatternKind::Hammer, is_hammer)?);
    }
    if config.engulfing {
        patterns.extend(engulfing(series, PatternKind::BullishEngulfing)?);
        patterns.extend(engulfing(series, PatternKind::BearishEngulfing)?);
    }
    if config.macd_cross {
        for (kind, upward) in [
            (PatternKind::MacdBullishCross, true),
            (PatternKind::MacdBearishCross, false),
        ] {
            patterns.extend(crosses(series, kind, "macd", "macd_signal", upward)?);
        }
    }
    if config.golden_cross {
        patterns.extend(crosses(series, PatternKind::GoldenCross, &sma_50, &sma_200, true)?);
    }
    if config.death_cross {
        patterns.extend(crosses(series, PatternKind::DeathCross, &sma_50, &sma_200, false)?);
    }
    if config.overbought {
        let level = config.overbought_level;
        patterns.extend(rsi_levels(series, PatternKind::RsiOverbought, |rsi| rsi > level)?);
    }
    if config.oversold {
        let level = config.oversold_level;
        patterns.extend(rsi_levels(series, PatternKind::RsiOversold, |rsi| rsi < level)?);
    }

    debug!(rows = series.row_count(), found = patterns.len(), "pattern scan complete");

    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesError;
    use crate::test_util::ohlc;

    fn only(configure: impl FnOnce(&mut PatternConfig)) -> PatternConfig {
        let mut config = PatternConfig {
            doji: false,
            hammer: false,
            engulfing: false,
            macd_cross: false,
            golden_cross: false,
            death_cross: false,
            overbought: false,
            oversold: false,
            ..PatternConfig::default()
        };
        configure(&mut config);
        config
    }

    fn rows_of(patterns: &[Pattern], kind: PatternKind) -> Vec<Vec<usize>> {
        patterns
            .iter()
            .filter(|p| p.kind() == kind)
            .map(|p| p.rows().to_vec())
            .collect()
    }

    fn with_columns(rows: usize, columns: &[(&str, Vec<Option<f64>>)]) -> Series {
        let mut series = Series::with_timestamps((0..rows as u64).collect()).unwrap();
        for (name, values) in columns {
            series.append_column(*name, values.clone()).unwrap();
        }
        series
    }

    mod candles {
        use super::*;

        fn detect_bars(bars: &[crate::Bar], config: &PatternConfig) -> Vec<Pattern> {
            detect(&Series::from_bars(bars).unwrap(), config).unwrap()
        }

        #[test]
        fn doji() {
            let bars = [
                ohlc(10.0, 12.0, 8.0, 10.1, 0), // body 0.1, range 4
                ohlc(10.0, 12.0, 8.0, 11.5, 1), // body 1.5
                ohlc(10.0, 10.0, 10.0, 10.0, 2), // zero range, skipped
            ];
            let found = detect_bars(&bars, &only(|c| c.doji = true));
            assert_eq!(rows_of(&found, PatternKind::Doji), [vec![0]]);
            assert_eq!(found[0].bias(), Bias::Neutral);
        }

        #[test]
        fn hammer() {
            let bars = [
                ohlc(10.0, 11.0, 7.0, 11.0, 0),  // body 1, lower 3, upper 0
                ohlc(11.0, 11.0, 7.0, 10.0, 1),  // bearish
                ohlc(10.0, 12.0, 7.0, 11.0, 2),  // upper shadow 1
            ];
            let found = detect_bars(&bars, &only(|c| c.hammer = true));
            assert_eq!(rows_of(&found, PatternKind::Hammer), [vec![0]]);
            assert_eq!(found[0].bias(), Bias::Bullish);
        }

        #[test]
        fn engulfing() {
            let bars = [
                ohlc(10.0, 10.5, 8.5, 9.0, 0),  // bearish
                ohlc(8.5, 11.5, 8.0, 11.0, 1),  // bullish, engulfs
                ohlc(11.5, 12.0, 8.0, 8.0, 2),  // bearish, engulfs
            ];
            let found = detect_bars(&bars, &only(|c| c.engulfing = true));
            assert_eq!(rows_of(&found, PatternKind::BullishEngulfing), [vec![0, 1]]);
            assert_eq!(rows_of(&found, PatternKind::BearishEngulfing), [vec![1, 2]]);
        }

        #[test]
        fn absent_raw_value_is_skipped() {
            let bars = [ohlc(10.0, 12.0, 8.0, f64::NAN, 0)];
            assert!(detect_bars(&bars, &only(|c| c.doji = true)).is_empty());
        }
    }

    mod crosses {
        use super::*;

        #[test]
        fn macd_crosses_are_strict() {
            let series = with_columns(
                5,
                &[
                    ("macd", vec![Some(-1.0), Some(1.0), Some(0.0), Some(-1.0), Some(1.0)]),
                    ("macd_signal", vec![Some(0.0); 5]),
                ],
            );
            let found = detect(&series, &only(|c| c.macd_cross = true)).unwrap();

            // row 2 touches the signal, row 3 continues down from it
            assert_eq!(rows_of(&found, PatternKind::MacdBullishCross), [vec![1], vec![4]]);
            assert!(rows_of(&found, PatternKind::MacdBearishCross).is_empty());
        }

        #[test]
        fn golden_and_death_cross() {
            let series = with_columns(
                4,
                &[
                    ("sma_50", vec![None, Some(9.0), Some(11.0), Some(9.0)]),
                    ("sma_200", vec![None, Some(10.0), Some(10.0), Some(10.0)]),
                ],
            );
            let found = detect(
                &series,
                &only(|c| {
                    c.golden_cross = true;
                    c.death_cross = true;
                }),
            )
            .unwrap();

            assert_eq!(rows_of(&found, PatternKind::GoldenCross), [vec![2]]);
            assert_eq!(rows_of(&found, PatternKind::DeathCross), [vec![3]]);
            assert_eq!(found[1].bias(), Bias::Bearish);
        }

        #[test]
        fn missing_column_is_missing_dependency() {
            let series = with_columns(2, &[("sma_50", vec![None, None])]);
            assert_eq!(
                detect(&series, &only(|c| c.golden_cross = true)),
                Err(SeriesError::missing_dependency("Golden Cross", "sma_200"))
            );
        }
    }

    mod rsi {
        use super::*;

        #[test]
        fn thresholds_are_strict() {
            let series = with_columns(
                5,
                &[("rsi", vec![None, Some(70.0), Some(75.0), Some(30.0), Some(25.0)])],
            );
            let found = detect(
                &series,
                &only(|c| {
                    c.overbought = true;
                    c.oversold = true;
                }),
            )
            .unwrap();

            assert_eq!(rows_of(&found, PatternKind::RsiOverbought), [vec![2]]);
            assert_eq!(rows_of(&found, PatternKind::RsiOversold), [vec![4]]);
        }

        #[test]
        fn custom_levels() {
            let series = with_columns(2, &[("rsi", vec![Some(65.0), Some(55.0)])]);
            let config = only(|c| {
                c.overbought = true;
                c.overbought_level = 60.0;
            });
            let found = detect(&series, &config).unwrap();
            assert_eq!(rows_of(&found, PatternKind::RsiOverbought), [vec![0]]);
        }
    }

    mod config {
        use super::*;

        #[test]
        fn disabled_detectors_need_no_columns() {
            let series = Series::with_timestamps(vec![1, 2, 3]).unwrap();
            assert_eq!(detect(&series, &only(|_| {})), Ok(vec![]));
        }

        #[test]
        fn default_enables_everything() {
            let config = PatternConfig::default();
            assert!(config.doji && config.hammer && config.engulfing && config.macd_cross);
            assert!(config.golden_cross && config.death_cross);
            assert!(config.overbought && config.oversold);
        }

        #[test]
        fn kind_display() {
            assert_eq!(PatternKind::BullishEngulfing.to_string(), "Bullish Engulfing");
            assert_eq!(PatternKind::RsiOversold.bias(), Bias::Bullish);
        }

        #[cfg(feature = "serde")]
        #[test]
        fn pattern_serde_round_trip() {
            let pattern = Pattern::new(PatternKind::BearishEngulfing, vec![3, 4]);
            let json = serde_json::to_string(&pattern).unwrap();
            assert_eq!(
                json,
                r#"{"kind":"BearishEngulfing","bias":"Bearish","rows":[3,4]}"#
            );
            assert_eq!(serde_json::from_str::<Pattern>(&json).unwrap(), pattern);
        }
    }
}
