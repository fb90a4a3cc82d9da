use crate::len_f64;
use stockstar_core::indicator::entity::BollingerBands;

/// # Summary
/// 布林带。
///
/// # Logic
/// 1. 收盘价不足 `period` 根时返回全零三轨。
/// 2. 中轨为最近 `period` 根收盘价的均值。
/// 3. 标准差取总体标准差（除以 `period`），上下轨为 `中轨 ± k·σ`。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 窗口长度，常用 20。
/// * `k`: 标准差倍数，常用 2。
pub fn bollinger(closes: &[f64], period: usize, k: f64) -> BollingerBands {
    if period == 0 || closes.len() < period {
        return BollingerBands::default();
    }

    let window = &closes[closes.len() - period..];
    let n = len_f64(period);
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    let width = k.abs() * variance.sqrt();

    BollingerBands {
        upper: mean + width,
        middle: mean,
        lower: mean - width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_population_stddev() {
        // 均值 5，总体方差 4，σ = 2
        let bands = bollinger(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8, 2.0);
        assert!((bands.middle - 5.0).abs() < 1e-12);
        assert!((bands.upper - 9.0).abs() < 1e-12);
        assert!((bands.lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_uses_trailing_window() {
        let bands = bollinger(&[100.0, 1.0, 1.0], 2, 2.0);
        assert_eq!(bands.middle, 1.0);
        assert_eq!(bands.upper, 1.0);
    }

    #[test]
    fn test_bollinger_insufficient_is_zeroed() {
        let bands = bollinger(&[1.0; 19], 20, 2.0);
        assert_eq!(bands, BollingerBands::default());
        assert!(!bands.is_computed());
    }
}
