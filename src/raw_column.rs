use crate::Ohlcv;

use std::fmt::{Debug, Display};

/// Raw bar field stored as a column of a [`Series`](crate::Series).
///
/// Every series built from bars carries these five columns under the names
/// returned by [`name`](RawColumn::name).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum RawColumn {
    /// Opening price, column `open`.
    Open,
    /// Highest price, column `high`.
    High,
    /// Lowest price, column `low`.
    Low,
    /// Closing price, column `close`.
    Close,
    /// Traded volume, column `volume`.
    Volume,
}

impl RawColumn {
    /// All raw columns in storage order.
    pub const ALL: [RawColumn; 5] = [
        RawColumn::Open,
        RawColumn::High,
        RawColumn::Low,
        RawColumn::Close,
        RawColumn::Volume,
    ];

    /// Column name in the series.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Reads the field from a bar. Non-finite values are absent.
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Option<f64> {
        let value = match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
            Self::Volume => ohlcv.volume(),
        };

        value.is_finite().then_some(value)
    }
}

impl Display for RawColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
