use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use stockstar_core::common::Period;
use stockstar_core::indicator::entity::{KdjValue, MaCross, VolumeTrend};
use stockstar_core::market::entity::{PriceBar, PriceSeries};
use stockstar_indicator::{PeriodAggregator, bollinger, kdj, obv, rsi, volume_trend};

/// # Summary
/// 按收盘价与成交量生成连续交易日的 K 线，高低点各偏离实体 0.5。
fn bars_from(closes: &[f64], volumes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: start.checked_add_days(Days::new(u64::try_from(i).unwrap())).unwrap(),
                open,
                close,
                high: open.max(close) + 0.5,
                low: (open.min(close) - 0.5).max(0.0),
                volume,
                amount: None,
            }
        })
        .collect()
}

/// 确定性伪随机价格序列（线性同余），用于性质测试。
fn noisy_closes(seed: u32, len: usize) -> Vec<f64> {
    let mut state = seed;
    let mut price = 20.0;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let step = f64::from((state >> 16) % 200) / 100.0 - 1.0;
        price = (price + step).max(1.0);
        out.push(price);
    }
    out
}

#[test]
fn test_rsi_stays_within_bounds() {
    for seed in 1..50 {
        let closes = noisy_closes(seed, 80);
        let value = rsi(&closes, 14);
        assert!((0.0..=100.0).contains(&value), "seed {seed}: rsi {value}");
    }
}

#[test]
fn test_bollinger_band_ordering() {
    for seed in 1..50 {
        let closes = noisy_closes(seed, 40);
        let bands = bollinger(&closes, 20, 2.0);
        assert!(bands.lower <= bands.middle && bands.middle <= bands.upper);
    }
}

#[test]
fn test_obv_two_bar_examples() {
    let rising = bars_from(&[10.0, 12.0], &[100.0, 50.0]);
    assert_eq!(obv(&rising), 50.0);

    let falling = bars_from(&[10.0, 8.0], &[100.0, 50.0]);
    assert_eq!(obv(&falling), -50.0);

    let flat = bars_from(&[10.0, 10.0], &[100.0, 50.0]);
    assert_eq!(obv(&flat), 0.0);

    assert_eq!(obv(&rising[..1]), 0.0);
}

#[test]
fn test_kdj_finite_and_trends_up_on_rising_closes() {
    for seed in 1..20 {
        let closes = noisy_closes(seed, 60);
        let bars = bars_from(&closes, &vec![1_000.0; closes.len()]);
        let v = kdj(&bars, 9);
        assert!(v.k.is_finite() && v.d.is_finite() && v.j.is_finite());
    }

    // 收盘价即最高价，RSV 恒为 100，K 逐步逼近 100
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let rising: Vec<PriceBar> = (0..40u32)
        .map(|i| {
            let close = 10.0 + f64::from(i);
            PriceBar {
                date: start.checked_add_days(Days::new(u64::from(i))).unwrap(),
                open: close - 0.5,
                close,
                high: close,
                low: close - 1.0,
                volume: 1_000.0,
                amount: None,
            }
        })
        .collect();
    let short = kdj(&rising[..12], 9);
    let long = kdj(&rising, 9);
    assert!(long.k > short.k);
    assert!(long.k > 99.0);
}

#[test]
fn test_kdj_degenerate_window_is_neutral() {
    let bars = bars_from(&[10.0; 12], &[1_000.0; 12]);
    let flat: Vec<PriceBar> = bars
        .into_iter()
        .map(|mut b| {
            b.high = b.close;
            b.low = b.close;
            b
        })
        .collect();
    let v = kdj(&flat, 9);
    assert!((v.k - 50.0).abs() < 1e-9);
    assert!((v.d - 50.0).abs() < 1e-9);
    assert!((v.j - 50.0).abs() < 1e-9);
    assert_eq!(kdj(&flat[..5], 9), KdjValue::NEUTRAL);
}

#[test]
fn test_volume_trend_classification() {
    let closes: Vec<f64> = (0..30u32).map(|i| 10.0 + f64::from(i) * 0.1).collect();

    let rising: Vec<f64> = (0..30u32).map(|i| 1_000.0 + 100.0 * f64::from(i)).collect();
    assert_eq!(volume_trend(&bars_from(&closes, &rising)), VolumeTrend::StrongUp);

    let falling: Vec<f64> = rising.iter().rev().copied().collect();
    assert_eq!(volume_trend(&bars_from(&closes, &falling)), VolumeTrend::StrongDown);

    let flat = vec![1_000.0; 30];
    assert_eq!(volume_trend(&bars_from(&closes, &flat)), VolumeTrend::Flat);

    assert_eq!(
        volume_trend(&bars_from(&closes[..29], &rising[..29])),
        VolumeTrend::Insufficient
    );
}

#[test]
fn test_volume_trend_single_verdict_is_plain_up() {
    let closes = vec![10.0; 30];
    // 每根放量 1 手：斜率 1 超过阈值，但近 10 根相对前 20 根均量只高出约 1.5%
    let volumes: Vec<f64> = (0..30u32).map(|i| 1_000.0 + f64::from(i)).collect();
    assert_eq!(volume_trend(&bars_from(&closes, &volumes)), VolumeTrend::Up);
}

#[test]
fn test_aggregate_detects_golden_and_dead_cross() {
    let aggregator = PeriodAggregator::default();

    let mut up = vec![10.0; 24];
    up.push(12.0);
    let series = PriceSeries::new(bars_from(&up, &vec![1_000.0; up.len()])).unwrap();
    let bundle = aggregator.aggregate(&series, None).unwrap();
    assert_eq!(bundle.ma_cross, MaCross::Golden);

    let mut down = vec![10.0; 24];
    down.push(8.0);
    let series = PriceSeries::new(bars_from(&down, &vec![1_000.0; down.len()])).unwrap();
    let bundle = aggregator.aggregate(&series, None).unwrap();
    assert_eq!(bundle.ma_cross, MaCross::Dead);
}

#[test]
fn test_aggregate_short_series_uses_sentinels() {
    let aggregator = PeriodAggregator::default();
    let series = PriceSeries::new(bars_from(&[10.0, 11.0, 12.0], &[100.0, 200.0, 300.0])).unwrap();
    let bundle = aggregator.aggregate(&series, Some(1_000_000.0)).unwrap();

    assert_eq!(bundle.ma_cross, MaCross::None);
    assert_eq!(bundle.rsi, 0.0);
    assert_eq!(bundle.macd.histogram, 0.0);
    assert!(!bundle.boll.is_computed());
    assert_eq!(bundle.obv, 500.0);
    assert_eq!(bundle.volume_trend, VolumeTrend::Insufficient);
    assert_eq!(bundle.kdj, KdjValue::NEUTRAL);
    assert_eq!(bundle.amplitude, None);
    // 300 手 = 30000 股 / 100 万股 = 3%
    assert_eq!(bundle.turnover_rate, Some(3.0));

    assert!(aggregator.aggregate(&PriceSeries::empty(), None).is_none());
}

#[test]
fn test_aggregate_periods_skips_empty() {
    let aggregator = PeriodAggregator::default();
    let closes = noisy_closes(7, 60);
    let daily = PriceSeries::new(bars_from(&closes, &vec![1_000.0; closes.len()])).unwrap();

    let mut input = BTreeMap::new();
    input.insert(Period::Daily, daily);
    input.insert(Period::Weekly, PriceSeries::empty());

    let out = aggregator.aggregate_periods(&input, None);
    assert!(out.contains_key(&Period::Daily));
    assert!(!out.contains_key(&Period::Weekly));
    assert!(out[&Period::Daily].boll.is_computed());
}
