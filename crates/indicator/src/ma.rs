use crate::len_f64;
use stockstar_core::indicator::entity::MaCross;

/// # Summary
/// 简单移动平均线 (SMA)。
///
/// # Logic
/// 1. 维护一个滑动窗口和，逐个加入新值、移出窗口外的旧值。
/// 2. 下标 `i >= period - 1` 时输出窗口均值，之前输出 None。
///
/// # Arguments
/// * `values`: 输入序列（通常为收盘价）。
/// * `period`: 窗口长度，为 0 时全部输出 None。
///
/// # Returns
/// 与输入等长的序列，窗口未满的位置为 None。
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let divisor = len_f64(period);
    let mut sum = 0.0;
    let mut out = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }
        out.push((i + 1 >= period).then_some(sum / divisor));
    }
    out
}

/// # Summary
/// 指数移动平均线 (EMA)。
///
/// # Logic
/// 以第一个元素为种子，`ema[i] = α·x[i] + (1−α)·ema[i−1]`，`α = 2/(period+1)`。
/// 每个下标都有定义（没有预热缺口），因此序列前段会偏向种子值。
///
/// # Arguments
/// * `values`: 输入序列。
/// * `period`: 平滑周期。
///
/// # Returns
/// 与输入等长的 EMA 序列。
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (len_f64(period) + 1.0);
    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    for &value in values {
        let next = match out.last() {
            Some(&prev) => alpha * value + (1.0 - alpha) * prev,
            None => value,
        };
        out.push(next);
    }
    out
}

/// # Summary
/// 判断短期均线与长期均线在最后两个对齐点上是否发生金叉或死叉。
///
/// # Logic
/// 1. 两条序列按尾部对齐，各取最后两个值。
/// 2. 任一取值为 None 或点数不足 2 个时视为无交叉。
/// 3. 短线由 `<=` 长线变为 `>` 长线为金叉；由 `>=` 变为 `<` 为死叉。
///
/// # Arguments
/// * `short`: 短期 SMA 序列。
/// * `long`: 长期 SMA 序列。
pub fn ma_cross(short: &[Option<f64>], long: &[Option<f64>]) -> MaCross {
    let ([.., prev_short, curr_short], [.., prev_long, curr_long]) = (short, long) else {
        return MaCross::None;
    };

    match (prev_short, curr_short, prev_long, curr_long) {
        (Some(ps), Some(cs), Some(pl), Some(cl)) => {
            if ps <= pl && cs > cl {
                MaCross::Golden
            } else if ps >= pl && cs < cl {
                MaCross::Dead
            } else {
                MaCross::None
            }
        }
        _ => MaCross::None,
    }
}
