use crate::len_f64;
use stockstar_core::indicator::entity::VolumeTrend;
use stockstar_core::market::entity::PriceBar;

/// 量能趋势判定需要的最少 K 线根数。
pub const TREND_WINDOW: usize = 30;
/// 与前段均量对比的近段长度。
pub const RECENT_WINDOW: usize = 10;
/// 回归斜率阈值。
pub const SLOPE_THRESHOLD: f64 = 0.1;
/// 近段/前段均量相对差阈值。
pub const RATIO_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    fn classify(value: f64, threshold: f64) -> Self {
        if value > threshold {
            Direction::Up
        } else if value < -threshold {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

/// 成交量对下标做最小二乘拟合的斜率，分母为 0 时返回 0。
fn regression_slope(values: &[f64]) -> f64 {
    let n = len_f64(values.len());
    let (x_sum, y_sum, xy_sum, xx_sum) = values.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(xs, ys, xys, xxs), (i, &y)| {
            let x = len_f64(i);
            (xs + x, ys + y, xys + x * y, xxs + x * x)
        },
    );

    let denominator = n * xx_sum - x_sum * x_sum;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * xy_sum - x_sum * y_sum) / denominator
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / len_f64(values.len())
}

/// # Summary
/// 成交量趋势综合判定。
///
/// # Logic
/// 1. K 线不足 30 根返回 `Insufficient`。
/// 2. 取最近 30 根成交量：
///    - 判定一：对下标做线性回归，斜率与 ±0.1 比较；
///    - 判定二：最近 10 根均量相对前 20 根均量的变化率与 ±0.1 比较（前段均量为 0 时，近段有量视为上升，否则持平）。
/// 3. 两者皆升为强烈递增，皆降为强烈递减；仅有上升为递增，仅有下降为递减；其余为震荡。
pub fn volume_trend(bars: &[PriceBar]) -> VolumeTrend {
    if bars.len() < TREND_WINDOW {
        return VolumeTrend::Insufficient;
    }

    let volumes: Vec<f64> = bars[bars.len() - TREND_WINDOW..].iter().map(|b| b.volume).collect();
    let by_slope = Direction::classify(regression_slope(&volumes), SLOPE_THRESHOLD);

    let (base, recent) = volumes.split_at(TREND_WINDOW - RECENT_WINDOW);
    let base_avg = mean(base);
    let by_average = if base_avg == 0.0 {
        // 停牌后复牌：前段无量
        if mean(recent) > 0.0 { Direction::Up } else { Direction::Flat }
    } else {
        Direction::classify((mean(recent) - base_avg) / base_avg, RATIO_THRESHOLD)
    };

    let verdicts = [by_slope, by_average];
    let ups = verdicts.iter().filter(|d| **d == Direction::Up).count();
    let downs = verdicts.iter().filter(|d| **d == Direction::Down).count();
    match (ups, downs) {
        (2, _) => VolumeTrend::StrongUp,
        (_, 2) => VolumeTrend::StrongDown,
        (1, 0) => VolumeTrend::Up,
        (0, 1) => VolumeTrend::Down,
        _ => VolumeTrend::Flat,
    }
}
