use tracing::debug;

use crate::{
    Atr, Bollinger, Ema, EngineConfig, Indicator, Macd, Momentum, Ohlcv, PriceToSma,
    RangeDistance, Result, Rsi, Series, Sma, SmaCrossover, Volatility,
};

/// Runs the full indicator pipeline over a [`Series`].
///
/// Steps execute in a fixed order in which every step reads only raw
/// columns or columns written by earlier steps:
///
/// 1. SMA of close for every configured period
/// 2. EMA of close for every configured period
/// 3. MACD
/// 4. RSI
/// 5. Bollinger Bands
/// 6. True Range and ATR
/// 7. Momentum and ROC
/// 8. Volume SMA
/// 9. Price-to-SMA ratios
/// 10. SMA crossover signal
/// 11. Volatility
/// 12. Distance from high/low
///
/// # Example
///
/// ```
/// use quantedge_frame::{Bar, Engine, EngineConfig};
///
/// let bars: Vec<Bar> = (0..300)
///     .map(|i| {
///         let close = 100.0 + (i as f64 * 0.1).sin();
///         Bar::new(i, close, close + 1.0, close - 1.0, close, 1_000.0)
///     })
///     .collect();
///
/// let series = Engine::new(EngineConfig::default()).process(&bars)?;
///
/// // rows before sma_200 is defined are dropped
/// assert_eq!(series.row_count(), 101);
/// assert!(series.contains("macd_hist"));
/// # Ok::<(), quantedge_frame::SeriesError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The pipeline as an ordered list of indicators.
    #[must_use]
    pub fn steps(&self) -> Vec<Box<dyn Indicator>> {
        let config = &self.config;
        let mut steps: Vec<Box<dyn Indicator>> = Vec::new();

        for &length in config.sma_periods() {
            steps.push(Box::new(Sma::close(length)));
        }
        for &length in config.ema_periods() {
            steps.push(Box::new(Ema::close(length)));
        }

        let macd = config.macd();
        steps.push(Box::new(Macd::new(macd.fast, macd.slow, macd.signal)));

        let (rsi, rsi_smoothing) = config.rsi();
        steps.push(Box::new(Rsi::with_smoothing(rsi, rsi_smoothing)));

        let (bollinger, std_dev) = config.bollinger();
        steps.push(Box::new(Bollinger::with_std_dev(bollinger, std_dev)));

        let (atr, atr_smoothing) = config.atr();
        steps.push(Box::new(Atr::with_smoothing(atr, atr_smoothing)));

        steps.push(Box::new(Momentum::new(config.momentum())));
        steps.push(Box::new(Sma::volume(config.volume_sma())));

        for &length in config.price_to_sma_periods() {
            steps.push(Box::new(PriceToSma::new(length)));
        }

        let (fast, slow) = config.crossover();
        steps.push(Box::new(SmaCrossover::new(fast, slow)));

        steps.push(Box::new(Volatility::new(config.volatility())));
        steps.push(Box::new(RangeDistance::new(config.range())));

        steps
    }

    /// Names of every column the pipeline writes, in order.
    #[must_use]
    pub fn output_columns(&self) -> Vec<String> {
        self.steps().iter().flat_map(|step| step.outputs()).collect()
    }

    /// Appends every derived column to `series`.
    ///
    /// # Errors
    ///
    /// [`SeriesError::MissingDependency`](crate::SeriesError::MissingDependency)
    /// if a raw column is missing, and
    /// [`SeriesError::DuplicateColumn`](crate::SeriesError::DuplicateColumn)
    /// if the series already holds a derived column.
    pub fn run(&self, series: &mut Series) -> Result<()> {
        debug!(rows = series.row_count(), config = %self.config, "running pipeline");

        for step in self.steps() {
            debug!(indicator = %step, columns = ?step.outputs(), "computing");
            step.apply(series)?;
        }

        Ok(())
    }

    /// Builds a series from `bars`, runs the pipeline and drops every row
    /// with an absent value.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnorderedTimestamps`](crate::SeriesError::UnorderedTimestamps)
    /// if bar open times are not strictly increasing.
    pub fn process<B: Ohlcv>(&self, bars: &[B]) -> Result<Series> {
        let mut series = Series::from_bars(bars)?;
        self.run(&mut series)?;
        Ok(series.drop_incomplete_rows())
    }
}
