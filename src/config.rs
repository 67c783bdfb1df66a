use std::{fmt::Display, num::NonZero};

use crate::{Smoothing, StdDev};

const fn period(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("period must be non-zero")
}

const DEFAULT_SMA_PERIODS: [NonZero<usize>; 5] =
    [period(5), period(10), period(20), period(50), period(200)];
const DEFAULT_EMA_PERIODS: [NonZero<usize>; 7] = [
    period(5),
    period(10),
    period(20),
    period(50),
    period(200),
    period(12),
    period(26),
];
const DEFAULT_RATIO_PERIODS: [NonZero<usize>; 2] = [period(20), period(50)];

/// MACD line and signal lengths.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdPeriods {
    pub fast: NonZero<usize>,
    pub slow: NonZero<usize>,
    pub signal: NonZero<usize>,
}

/// Parameters of every step in the [`Engine`](crate::Engine) pipeline.
///
/// Built with [`EngineConfig::builder`]. The defaults reproduce the classic
/// dashboard set: SMA 5/10/20/50/200, EMA 5/10/20/50/200/12/26,
/// MACD(12, 26, 9), RSI 14, Bollinger 20 × 2σ, ATR 14, momentum 10,
/// volume SMA 20, price-to-SMA 20/50, SMA 20/50 crossover, volatility 20 and
/// 20-bar range distance.
///
/// [`build`](EngineConfigBuilder::build) adds every SMA and EMA period that
/// a later step reads, so the configured pipeline is always complete.
///
/// # Example
///
/// ```
/// use quantedge_frame::EngineConfig;
/// use std::num::NonZero;
///
/// let config = EngineConfig::builder()
///     .sma_periods([NonZero::new(10).unwrap()])
///     .bollinger(NonZero::new(20).unwrap())
///     .build();
///
/// // sma_20 is required by the Bollinger middle band
/// assert!(config.sma_periods().contains(&NonZero::new(20).unwrap()));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct EngineConfig {
    sma_periods: Vec<NonZero<usize>>,
    ema_periods: Vec<NonZero<usize>>,
    macd: MacdPeriods,
    rsi: NonZero<usize>,
    rsi_smoothing: Smoothing,
    bollinger: NonZero<usize>,
    bollinger_std_dev: StdDev,
    atr: NonZero<usize>,
    atr_smoothing: Smoothing,
    momentum: NonZero<usize>,
    volume_sma: NonZero<usize>,
    price_to_sma_periods: Vec<NonZero<usize>>,
    crossover: (NonZero<usize>, NonZero<usize>),
    volatility: NonZero<usize>,
    range: NonZero<usize>,
}

impl EngineConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// SMA periods, in pipeline order, including those added for dependent
    /// steps.
    #[must_use]
    pub fn sma_periods(&self) -> &[NonZero<usize>] {
        &self.sma_periods
    }

    /// EMA periods, in pipeline order, including the MACD fast and slow
    /// periods.
    #[must_use]
    pub fn ema_periods(&self) -> &[NonZero<usize>] {
        &self.ema_periods
    }

    #[must_use]
    pub fn macd(&self) -> MacdPeriods {
        self.macd
    }

    #[must_use]
    pub fn rsi(&self) -> (NonZero<usize>, Smoothing) {
        (self.rsi, self.rsi_smoothing)
    }

    #[must_use]
    pub fn bollinger(&self) -> (NonZero<usize>, StdDev) {
        (self.bollinger, self.bollinger_std_dev)
    }

    #[must_use]
    pub fn atr(&self) -> (NonZero<usize>, Smoothing) {
        (self.atr, self.atr_smoothing)
    }

    #[must_use]
    pub fn momentum(&self) -> NonZero<usize> {
        self.momentum
    }

    #[must_use]
    pub fn volume_sma(&self) -> NonZero<usize> {
        self.volume_sma
    }

    #[must_use]
    pub fn price_to_sma_periods(&self) -> &[NonZero<usize>] {
        &self.price_to_sma_periods
    }

    /// Fast and slow SMA periods of the crossover signal.
    #[must_use]
    pub fn crossover(&self) -> (NonZero<usize>, NonZero<usize>) {
        self.crossover
    }

    #[must_use]
    pub fn volatility(&self) -> NonZero<usize> {
        self.volatility
    }

    #[must_use]
    pub fn range(&self) -> NonZero<usize> {
        self.range
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn join(periods: &[NonZero<usize>]) -> String {
    periods
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EngineConfig(sma: [{}], ema: [{}], macd: ({}, {}, {}), rsi: ({}, {}), \
             bb: ({}, {}), atr: ({}, {}), momentum: {}, volume_sma: {}, \
             price_to_sma: [{}], cross: ({}, {}), volatility: {}, range: {})",
            join(&self.sma_periods),
            join(&self.ema_periods),
            self.macd.fast,
            self.macd.slow,
            self.macd.signal,
            self.rsi,
            self.rsi_smoothing,
            self.bollinger,
            self.bollinger_std_dev,
            self.atr,
            self.atr_smoothing,
            self.momentum,
            self.volume_sma,
            join(&self.price_to_sma_periods),
            self.crossover.0,
            self.crossover.1,
            self.volatility,
            self.range,
        )
    }
}

/// Builder for [`EngineConfig`].
///
/// Starts from the default parameters; every setter replaces one of them.
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig {
                sma_periods: DEFAULT_SMA_PERIODS.to_vec(),
                ema_periods: DEFAULT_EMA_PERIODS.to_vec(),
                macd: MacdPeriods {
                    fast: period(12),
                    slow: period(26),
                    signal: period(9),
                },
                rsi: period(14),
                rsi_smoothing: Smoothing::Simple,
                bollinger: period(20),
                bollinger_std_dev: StdDev::default(),
                atr: period(14),
                atr_smoothing: Smoothing::Simple,
                momentum: period(10),
                volume_sma: period(20),
                price_to_sma_periods: DEFAULT_RATIO_PERIODS.to_vec(),
                crossover: (period(20), period(50)),
                volatility: period(20),
                range: period(20),
            },
        }
    }

    #[must_use]
    pub fn sma_periods(mut self, periods: impl IntoIterator<Item = NonZero<usize>>) -> Self {
        self.config.sma_periods = periods.into_iter().collect();
        self
    }

    #[must_use]
    pub fn ema_periods(mut self, periods: impl IntoIterator<Item = NonZero<usize>>) -> Self {
        self.config.ema_periods = periods.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn macd(
        mut self,
        fast: NonZero<usize>,
        slow: NonZero<usize>,
        signal: NonZero<usize>,
    ) -> Self {
        self.config.macd = MacdPeriods { fast, slow, signal };
        self
    }

    #[inline]
    #[must_use]
    pub fn rsi(mut self, length: NonZero<usize>) -> Self {
        self.config.rsi = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn rsi_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.config.rsi_smoothing = smoothing;
        self
    }

    #[inline]
    #[must_use]
    pub fn bollinger(mut self, length: NonZero<usize>) -> Self {
        self.config.bollinger = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn bollinger_std_dev(mut self, std_dev: StdDev) -> Self {
        self.config.bollinger_std_dev = std_dev;
        self
    }

    #[inline]
    #[must_use]
    pub fn atr(mut self, length: NonZero<usize>) -> Self {
        self.config.atr = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn atr_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.config.atr_smoothing = smoothing;
        self
    }

    #[inline]
    #[must_use]
    pub fn momentum(mut self, length: NonZero<usize>) -> Self {
        self.config.momentum = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn volume_sma(mut self, length: NonZero<usize>) -> Self {
        self.config.volume_sma = length;
        self
    }

    #[must_use]
    pub fn price_to_sma_periods(
        mut self,
        periods: impl IntoIterator<Item = NonZero<usize>>,
    ) -> Self {
        self.config.price_to_sma_periods = periods.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn crossover(mut self, fast: NonZero<usize>, slow: NonZero<usize>) -> Self {
        self.config.crossover = (fast, slow);
        self
    }

    #[inline]
    #[must_use]
    pub fn volatility(mut self, length: NonZero<usize>) -> Self {
        self.config.volatility = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn range(mut self, length: NonZero<usize>) -> Self {
        self.config.range = length;
        self
    }

    /// Finishes the configuration.
    ///
    /// Duplicate periods are removed (first occurrence wins). SMA periods
    /// read by Bollinger, the price ratios and the crossover, and the EMA
    /// periods read by MACD, are appended if missing.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        let mut config = self.config;

        let sma_required = [config.bollinger]
            .into_iter()
            .chain(config.price_to_sma_periods.iter().copied())
            .chain([config.crossover.0, config.crossover.1]);
        config.sma_periods = unique(config.sma_periods.into_iter().chain(sma_required));

        let ema_required = [config.macd.fast, config.macd.slow];
        config.ema_periods = unique(config.ema_periods.into_iter().chain(ema_required));

        config.price_to_sma_periods = unique(config.price_to_sma_periods);

        config
    }
}

fn unique(periods: impl IntoIterator<Item = NonZero<usize>>) -> Vec<NonZero<usize>> {
    let mut seen = Vec::new();
    for period in periods {
        if !seen.contains(&period) {
            seen.push(period);
        }
    }
    seen
}
