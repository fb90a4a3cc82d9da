use stockstar_core::indicator::entity::{IndicatorBundle, MaCross};

/// # Summary
/// 把单周期指标包转写为一段中文解读。
///
/// # Logic
/// 依次描述：均线交叉、MACD 柱方向与 DIF 数值、RSI 区间、布林三轨、OBV 方向、
/// 量能趋势、KDJ 的 J 值极端与 K/D 交叉（K>D 且 D>20 看多，K<D 且 D<80 谨慎）。
///
/// # Arguments
/// * `bundle`: 指标包，`None` 表示该周期无数据。
/// * `label`: 周期名称，例如“日线”。
pub fn interpret(bundle: Option<&IndicatorBundle>, label: &str) -> String {
    let Some(b) = bundle else {
        return format!("{label}数据不足，暂无解读。");
    };

    let mut text = format!("{label}指标解读：");

    text.push_str(match b.ma_cross {
        MaCross::Golden => "短期均线上穿长期均线，形成金叉，短线趋势转强。",
        MaCross::Dead => "短期均线下穿长期均线，形成死叉，短线趋势转弱。",
        MaCross::None => "均线未出现交叉信号。",
    });

    let side = if b.macd.histogram > 0.0 { "红柱，多头占优" } else { "绿柱或零轴，空头占优" };
    text.push_str(&format!("MACD 为{side}，DIF {:.2}。", b.macd.value));

    if b.rsi > 70.0 {
        text.push_str("RSI 进入超买区，注意回调。");
    } else if b.rsi < 30.0 {
        text.push_str("RSI 处于超卖区，存在反弹可能。");
    } else {
        text.push_str(&format!("RSI {:.2}，处于正常区间。", b.rsi));
    }

    if b.boll.is_computed() {
        text.push_str(&format!(
            "布林带上轨 {:.2}、中轨 {:.2}、下轨 {:.2}。",
            b.boll.upper, b.boll.middle, b.boll.lower
        ));
    }

    text.push_str(if b.obv > 0.0 { "OBV 为正，资金净流入。" } else { "OBV 不为正，资金偏流出。" });

    if b.volume_trend.is_increasing() {
        text.push_str("成交量放大，交投转向活跃。");
    } else if b.volume_trend.is_decreasing() {
        text.push_str("成交量萎缩，上涨动能减弱。");
    } else {
        text.push_str(&format!("量能{}。", b.volume_trend));
    }

    let (k, d, j) = (b.kdj.k, b.kdj.d, b.kdj.j);
    if j > 100.0 {
        text.push_str("KDJ 的 J 值高于 100，短线过热。");
    } else if j < 0.0 {
        text.push_str("KDJ 的 J 值低于 0，短线超跌。");
    } else {
        text.push_str("KDJ 处于常规波动区间。");
    }
    if k > d && d > 20.0 {
        text.push_str("K 线位于 D 线上方，短线偏多。");
    } else if k < d && d < 80.0 {
        text.push_str("K 线位于 D 线下方，短线宜谨慎。");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockstar_core::indicator::entity::VolumeTrend;

    #[test]
    fn test_missing_bundle() {
        assert_eq!(interpret(None, "月线"), "月线数据不足，暂无解读。");
    }

    #[test]
    fn test_bullish_phrases() {
        let mut b = IndicatorBundle::neutral();
        b.ma_cross = MaCross::Golden;
        b.macd.value = 0.456;
        b.macd.histogram = 0.2;
        b.rsi = 55.0;
        b.obv = 10.0;
        b.volume_trend = VolumeTrend::StrongUp;
        b.kdj.k = 70.0;
        b.kdj.d = 60.0;
        b.kdj.j = 90.0;

        let text = interpret(Some(&b), "日线");
        assert!(text.starts_with("日线指标解读："));
        assert!(text.contains("金叉"));
        assert!(text.contains("DIF 0.46"));
        assert!(text.contains("RSI 55.00"));
        assert!(text.contains("资金净流入"));
        assert!(text.contains("成交量放大"));
        assert!(text.contains("短线偏多"));
        assert!(!text.contains("布林带"));
    }

    #[test]
    fn test_bearish_phrases() {
        let mut b = IndicatorBundle::neutral();
        b.ma_cross = MaCross::Dead;
        b.rsi = 80.0;
        b.boll.upper = 12.0;
        b.boll.middle = 10.0;
        b.boll.lower = 8.0;
        b.kdj.k = 40.0;
        b.kdj.d = 50.0;
        b.kdj.j = 105.0;

        let text = interpret(Some(&b), "周线");
        assert!(text.contains("死叉"));
        assert!(text.contains("超买"));
        assert!(text.contains("上轨 12.00"));
        assert!(text.contains("过热"));
        assert!(text.contains("宜谨慎"));
    }
}
