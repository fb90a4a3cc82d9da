use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use stockstar_core::market::entity::PriceBar;

/// 成交量单位换算：1 手 = 100 股。
const SHARES_PER_LOT: Decimal = Decimal::ONE_HUNDRED;

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// 保留两位小数（四舍五入，远离零）。
fn round2(value: Decimal) -> Option<f64> {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// # Summary
/// 近 `days` 根 K 线的平均振幅 (%)。
///
/// # Logic
/// 1. K 线总数不足 `days + 1` 根时返回 None（首根也需要前收盘价做分母）。
/// 2. 对最近 `days` 根中的每一根，以完整序列中紧邻其前的一根收盘价为分母，
///    计算 `(最高价 − 最低价) / 前收盘价 · 100`；前收盘价为 0 的 K 线跳过。
/// 3. 以十进制定点运算求均值并保留两位小数；全部被跳过时返回 None。
///
/// # Arguments
/// * `bars`: K 线序列。
/// * `days`: 统计天数，常用 5。
pub fn amplitude(bars: &[PriceBar], days: usize) -> Option<f64> {
    if days == 0 || bars.len() < days + 1 {
        return None;
    }

    let start = bars.len() - days;
    let mut total = Decimal::ZERO;
    let mut count = 0u32;
    for pair in bars[start - 1..].windows(2) {
        let (prev, day) = (&pair[0], &pair[1]);
        let prev_close = to_decimal(prev.close)?;
        if prev_close.is_zero() {
            continue;
        }
        let range = to_decimal(day.high)?.checked_sub(to_decimal(day.low)?)?;
        let value = range.checked_div(prev_close)?.checked_mul(Decimal::ONE_HUNDRED)?;
        total = total.checked_add(value)?;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    round2(total.checked_div(Decimal::from(count))?)
}

/// # Summary
/// 最新一根 K 线的换手率 (%)。
///
/// # Logic
/// 1. 未提供流通股本或序列为空时返回 None。
/// 2. 最新成交量为 0 时返回 0；流通股本非正数（零分母）时同样返回 0。
/// 3. `换手率 = 成交量(手) × 100 / 流通股本(股) × 100`，保留两位小数。
///
/// # Arguments
/// * `bars`: K 线序列，成交量单位为手。
/// * `float_shares`: 流通股本，单位为股。
pub fn turnover_rate(bars: &[PriceBar], float_shares: Option<f64>) -> Option<f64> {
    let float_shares = float_shares?;
    let latest = bars.last()?;

    if latest.volume == 0.0 || !float_shares.is_finite() || float_shares <= 0.0 {
        return Some(0.0);
    }

    let shares_traded = to_decimal(latest.volume)?.checked_mul(SHARES_PER_LOT)?;
    let rate = shares_traded
        .checked_div(to_decimal(float_shares)?)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    round2(rate)
}
