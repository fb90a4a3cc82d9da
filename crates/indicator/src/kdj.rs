use stockstar_core::indicator::entity::KdjValue;
use stockstar_core::market::entity::PriceBar;

/// 高低点重合（零振幅窗口）时使用的中性 RSV。
pub const NEUTRAL_RSV: f64 = 50.0;

/// # Summary
/// KDJ 随机指标。
///
/// # Logic
/// 1. K 线不足 `period` 根时返回 50/50/50。
/// 2. 对每个长度为 `period` 的尾随窗口计算
///    `RSV = (close − 最低价) / (最高价 − 最低价) · 100`；最高价等于最低价时 RSV 取 50。
/// 3. K/D/J 从 50 起步，按时间顺序依次迭代：
///    `K = ⅔K + ⅓RSV`，`D = ⅔D + ⅓K`，`J = 3K − 2D`。
///
/// # Arguments
/// * `bars`: K 线序列。
/// * `period`: RSV 窗口长度，常用 9。
///
/// # Returns
/// 最后一根 K 线上的 K、D、J。
pub fn kdj(bars: &[PriceBar], period: usize) -> KdjValue {
    if period == 0 || bars.len() < period {
        return KdjValue::NEUTRAL;
    }

    let mut value = KdjValue::NEUTRAL;
    for window in bars.windows(period) {
        let Some(last) = window.last() else {
            continue;
        };
        let high_max = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let low_min = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let range = high_max - low_min;
        let rsv = if range > 0.0 {
            (last.close - low_min) / range * 100.0
        } else {
            NEUTRAL_RSV
        };

        let k = 2.0 / 3.0 * value.k + 1.0 / 3.0 * rsv;
        let d = 2.0 / 3.0 * value.d + 1.0 / 3.0 * k;
        value = KdjValue { k, d, j: 3.0 * k - 2.0 * d };
    }
    value
}
