use crate::ma::ema;
use stockstar_core::indicator::entity::MacdValue;

/// # Summary
/// 计算最后一根 K 线上的 MACD。
///
/// # Logic
/// 1. 收盘价不足 `long` 根时返回全零结果。
/// 2. `DIF = EMA(short) − EMA(long)`，`DEA = EMA(DIF, signal)`。
/// 3. `MACD 柱 = 2 · (DIF − DEA)`，取最后一个下标。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `short` / `long` / `signal`: 常用参数为 12 / 26 / 9。
///
/// # Returns
/// 最后一根 K 线的 DIF、DEA 与柱值。
pub fn macd(closes: &[f64], short: usize, long: usize, signal: usize) -> MacdValue {
    if closes.is_empty() || closes.len() < long {
        return MacdValue::default();
    }

    let short_ema = ema(closes, short);
    let long_ema = ema(closes, long);
    let diff: Vec<f64> = short_ema.iter().zip(&long_ema).map(|(s, l)| s - l).collect();
    let dea = ema(&diff, signal);

    match (diff.last(), dea.last()) {
        (Some(&value), Some(&signal)) => MacdValue {
            value,
            signal,
            histogram: 2.0 * (value - signal),
        },
        _ => MacdValue::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_insufficient_is_zeroed() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        assert_eq!(macd(&closes, 12, 26, 9), MacdValue::default());
    }

    #[test]
    fn test_macd_uptrend_positive() {
        let closes: Vec<f64> = (1..=60).map(f64::from).collect();
        let m = macd(&closes, 12, 26, 9);
        assert!(m.value > 0.0);
        assert!(m.histogram > 0.0);
        assert!((m.histogram - 2.0 * (m.value - m.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let closes = vec![10.0; 40];
        let m = macd(&closes, 12, 26, 9);
        assert!(m.value.abs() < 1e-12);
        assert!(m.histogram.abs() < 1e-12);
    }
}
