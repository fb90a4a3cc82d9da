use crate::len_f64;

/// # Summary
/// 相对强弱指标 (RSI)。
///
/// # Logic
/// 1. 收盘价不足 `period + 1` 根时返回 0。
/// 2. 前 `period` 个涨跌幅的平均涨幅、平均跌幅作为初值。
/// 3. 初值平均跌幅恰为 0 时直接饱和为 100，不再平滑。
/// 4. 之后每个涨跌幅按 Wilder 方式平滑：`avg = (avg·(period−1) + delta) / period`。
/// 5. 平滑后平均跌幅为 0 同样返回 100，否则 `100 − 100/(1+RS)`。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 周期，常用 14。
///
/// # Returns
/// `[0, 100]` 区间内的 RSI 值。
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return 0.0;
    }

    let p = len_f64(period);
    let split = |change: f64| if change > 0.0 { (change, 0.0) } else { (0.0, -change) };

    let (gains, losses) = closes[..=period]
        .windows(2)
        .map(|w| split(w[1] - w[0]))
        .fold((0.0, 0.0), |(g, l), (up, down)| (g + up, l + down));
    let mut avg_gain = gains / p;
    let mut avg_loss = losses / p;
    if avg_loss == 0.0 {
        return 100.0;
    }

    for w in closes[period..].windows(2) {
        let (up, down) = split(w[1] - w[0]);
        avg_gain = (avg_gain * (p - 1.0) + up) / p;
        avg_loss = (avg_loss * (p - 1.0) + down) / p;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
