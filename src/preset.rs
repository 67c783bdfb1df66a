use std::fmt::Display;

use crate::{Result, Series};

/// Named group of columns for a common charting view.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Preset {
    /// Close with SMA 20/50 and the Bollinger envelope.
    #[default]
    Default,
    TrendFollowing,
    Momentum,
    Volatility,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Default,
        Preset::TrendFollowing,
        Preset::Momentum,
        Preset::Volatility,
    ];

    /// Column names shown by this preset, in display order.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Default => &[
                "close",
                "sma_20",
                "sma_50",
                "bollinger_upper",
                "bollinger_lower",
            ],
            Self::TrendFollowing => &["close", "sma_20", "sma_50", "sma_200", "ema_20", "ema_50"],
            Self::Momentum => &["close", "rsi", "macd", "macd_signal", "macd_hist"],
            Self::Volatility => &[
                "close",
                "bollinger_upper",
                "bollinger_mid",
                "bollinger_lower",
                "atr",
                "volatility",
            ],
        }
    }

    /// Projects `series` onto this preset's columns.
    ///
    /// # Errors
    ///
    /// [`SeriesError::UnknownColumn`](crate::SeriesError::UnknownColumn) if a
    /// preset column has not been computed.
    pub fn apply(self, series: &Series) -> Result<Series> {
        series.select(self.columns())
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Default => "Default",
            Self::TrendFollowing => "Trend Following",
            Self::Momentum => "Momentum",
            Self::Volatility => "Volatility",
        })
    }
}
