//! Batch technical indicators over OHLCV series.
//!
//! A [`Series`] holds a time-ordered run of bars as named columns of
//! optional values. Indicators read existing columns and append new ones;
//! a value is `None` wherever it is not yet computable, e.g. inside an
//! indicator's warm-up window.
//!
//! The [`Engine`] runs the whole pipeline in dependency order (SMA, EMA,
//! MACD, RSI, Bollinger Bands, ATR, momentum, volume SMA, price-to-SMA
//! ratios, SMA crossover, volatility and range distance), configured by
//! [`EngineConfig`]. Each step is also usable on its own through the
//! [`Indicator`] trait.
//!
//! ```
//! use quantedge_frame::{Bar, Engine, EngineConfig, Preset};
//! use std::num::NonZero;
//!
//! let bars: Vec<Bar> = (0..60)
//!     .map(|i| {
//!         let close = 100.0 + i as f64;
//!         Bar::new(i, close - 0.5, close + 1.0, close - 1.0, close, 500.0)
//!     })
//!     .collect();
//!
//! let nz = |n: usize| NonZero::new(n).unwrap();
//! let config = EngineConfig::builder()
//!     .sma_periods([nz(5), nz(20)])
//!     .ema_periods([nz(5), nz(20)])
//!     .price_to_sma_periods([nz(20)])
//!     .crossover(nz(5), nz(20))
//!     .build();
//!
//! let series = Engine::new(config).process(&bars)?;
//! assert_eq!(series.row_count(), 40);
//!
//! let momentum = Preset::Momentum.apply(&series)?;
//! assert!(momentum.get_column("rsi")?.iter().all(|rsi| *rsi == Some(100.0)));
//! # Ok::<(), quantedge_frame::SeriesError>(())
//! ```

mod atr;
mod bb;
mod config;
mod crossover;
mod ema;
mod engine;
mod error;
mod indicator;
mod macd;
mod momentum;
mod ohlcv;
pub mod patterns;
mod preset;
mod range;
mod ratio;
mod raw_column;
mod rsi;
mod series;
mod sma;
mod volatility;
mod window;

pub use crate::config::{EngineConfig, EngineConfigBuilder, MacdPeriods};
pub use crate::engine::Engine;
pub use crate::error::{Result, SeriesError};
pub use crate::indicator::{Indicator, Output, Smoothing};
pub use crate::ohlcv::{Bar, Ohlcv, Price, Timestamp};
pub use crate::patterns::{Bias, Pattern, PatternConfig, PatternKind};
pub use crate::preset::Preset;
pub use crate::raw_column::RawColumn;
pub use crate::series::{Column, Series};
pub use crate::window::{Reduction, rolling};

pub use crate::atr::Atr;
pub use crate::bb::{Bollinger, StdDev};
pub use crate::crossover::SmaCrossover;
pub use crate::ema::{Ema, ema};
pub use crate::macd::Macd;
pub use crate::momentum::Momentum;
pub use crate::range::RangeDistance;
pub use crate::ratio::PriceToSma;
pub use crate::rsi::Rsi;
pub use crate::sma::Sma;
pub use crate::volatility::Volatility;

#[cfg(test)]
mod test_util;
