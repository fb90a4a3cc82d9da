use stockstar_core::market::entity::PriceBar;

/// # Summary
/// 能量潮 (OBV)。
///
/// # Logic
/// 收盘价较前一根上涨则累加成交量，下跌则扣减，持平不变。不足 2 根返回 0。
pub fn obv(bars: &[PriceBar]) -> f64 {
    bars.windows(2).fold(0.0, |acc, w| {
        let (prev, curr) = (&w[0], &w[1]);
        if curr.close > prev.close {
            acc + curr.volume
        } else if curr.close < prev.close {
            acc - curr.volume
        } else {
            acc
        }
    })
}
