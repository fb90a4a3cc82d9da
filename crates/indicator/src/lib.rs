//! 技术指标库。
//!
//! 所有函数均为无状态纯函数：输入按时间升序排列的序列，输出最后一根 K 线上的指标值
//! （SMA/EMA 输出整条序列）。数据不足时返回约定的中性哨兵值，从不报错。

pub mod aggregate;
pub mod bollinger;
pub mod extra;
pub mod kdj;
pub mod ma;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod volume;

pub use aggregate::PeriodAggregator;
pub use bollinger::bollinger;
pub use extra::{amplitude, turnover_rate};
pub use kdj::kdj;
pub use ma::{ema, ma_cross, sma};
pub use macd::macd;
pub use obv::obv;
pub use rsi::rsi;
pub use volume::volume_trend;

/// 窗口长度、计数等 usize 转为 f64。
pub(crate) fn len_f64(n: usize) -> f64 {
    u32::try_from(n).map(f64::from).unwrap_or(f64::from(u32::MAX))
}
