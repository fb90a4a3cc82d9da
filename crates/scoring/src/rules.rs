use stockstar_core::indicator::entity::{IndicatorBundle, MaCross};

/// 规则谓词：只读取指标包，不产生副作用。
pub type Predicate = fn(&IndicatorBundle) -> bool;

/// # Summary
/// 评分规则：谓词成立时为总分贡献固定增量。
///
/// # Invariants
/// - 规则之间互不依赖，求和结果与规则顺序无关。
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    // 规则标识，用于解释与调参
    pub name: &'static str,
    // 谓词成立时的分数增量
    pub delta: i32,
    pub predicate: Predicate,
}

impl Rule {
    pub fn applies(&self, bundle: &IndicatorBundle) -> bool {
        (self.predicate)(bundle)
    }
}

/// # Summary
/// 标准评分规则表。
///
/// # Invariants
/// - 同一指标上的互斥区间（RSI 区间、KDJ 金叉/死叉、振幅、换手率）不会同时命中。
/// - 振幅、换手率缺失 (None) 时不触发任何相关规则。
pub const STANDARD_RULES: &[Rule] = &[
    Rule {
        name: "golden_cross",
        delta: 30,
        predicate: |b| b.ma_cross == MaCross::Golden,
    },
    Rule {
        name: "dead_cross",
        delta: -20,
        predicate: |b| b.ma_cross == MaCross::Dead,
    },
    Rule {
        name: "macd_histogram_positive",
        delta: 20,
        predicate: |b| b.macd.histogram > 0.0,
    },
    Rule {
        name: "rsi_strong",
        delta: 20,
        predicate: |b| b.rsi > 50.0 && b.rsi < 70.0,
    },
    Rule {
        name: "rsi_overbought",
        delta: 10,
        predicate: |b| b.rsi >= 70.0,
    },
    Rule {
        name: "obv_positive",
        delta: 10,
        predicate: |b| b.obv > 0.0,
    },
    Rule {
        name: "volume_increasing",
        delta: 10,
        predicate: |b| b.volume_trend.is_increasing(),
    },
    Rule {
        name: "volume_decreasing",
        delta: -10,
        predicate: |b| b.volume_trend.is_decreasing(),
    },
    Rule {
        name: "boll_middle_present",
        delta: 10,
        predicate: |b| b.boll.is_computed(),
    },
    Rule {
        name: "kdj_bullish",
        delta: 15,
        predicate: |b| b.kdj.k > b.kdj.d && b.kdj.j < 100.0,
    },
    Rule {
        name: "kdj_bearish",
        delta: -15,
        predicate: |b| b.kdj.k < b.kdj.d && b.kdj.j > 0.0,
    },
    Rule {
        name: "kdj_j_overbought",
        delta: -10,
        predicate: |b| b.kdj.j > 100.0,
    },
    Rule {
        name: "kdj_j_oversold",
        delta: 10,
        predicate: |b| b.kdj.j < 0.0,
    },
    Rule {
        name: "amplitude_calm",
        delta: 5,
        predicate: |b| b.amplitude.is_some_and(|a| a < 5.0),
    },
    Rule {
        name: "amplitude_wild",
        delta: -5,
        predicate: |b| b.amplitude.is_some_and(|a| a > 15.0),
    },
    Rule {
        name: "turnover_healthy",
        delta: 5,
        predicate: |b| b.turnover_rate.is_some_and(|t| t > 1.0 && t < 10.0),
    },
    Rule {
        name: "turnover_illiquid",
        delta: -5,
        predicate: |b| b.turnover_rate.is_some_and(|t| t <= 1.0),
    },
    Rule {
        name: "turnover_overheated",
        delta: -5,
        predicate: |b| b.turnover_rate.is_some_and(|t| t > 20.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use stockstar_core::indicator::entity::{KdjValue, VolumeTrend};

    /// 在中性指标包上做一次修改。
    fn bundle_with(edit: impl FnOnce(&mut IndicatorBundle)) -> IndicatorBundle {
        let mut bundle = IndicatorBundle::neutral();
        edit(&mut bundle);
        bundle
    }

    fn fired(bundle: &IndicatorBundle) -> Vec<(&'static str, i32)> {
        STANDARD_RULES
            .iter()
            .filter(|r| r.applies(bundle))
            .map(|r| (r.name, r.delta))
            .collect()
    }

    fn kdj(k: f64, d: f64, j: f64) -> KdjValue {
        KdjValue { k, d, j }
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = STANDARD_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STANDARD_RULES.len());
    }

    #[test]
    fn test_neutral_bundle_fires_nothing() {
        let neutral = IndicatorBundle::neutral();
        let fired: Vec<&str> = STANDARD_RULES
            .iter()
            .filter(|r| r.applies(&neutral))
            .map(|r| r.name)
            .collect();
        assert!(fired.is_empty(), "unexpected rules: {fired:?}");
    }

    #[test]
    fn test_turnover_gap_between_ten_and_twenty_is_neutral() {
        let mut bundle = IndicatorBundle::neutral();
        bundle.turnover_rate = Some(15.0);
        assert!(!STANDARD_RULES.iter().any(|r| r.name.starts_with("turnover") && r.applies(&bundle)));
    }

    #[test]
    fn test_each_rule_fires_alone_with_its_delta() {
        let cases: Vec<(IndicatorBundle, &str, i32)> = vec![
            (bundle_with(|b| b.ma_cross = MaCross::Golden), "golden_cross", 30),
            (bundle_with(|b| b.ma_cross = MaCross::Dead), "dead_cross", -20),
            (bundle_with(|b| b.macd.histogram = 0.01), "macd_histogram_positive", 20),
            (bundle_with(|b| b.rsi = 60.0), "rsi_strong", 20),
            (bundle_with(|b| b.rsi = 75.0), "rsi_overbought", 10),
            (bundle_with(|b| b.obv = 1.0), "obv_positive", 10),
            (bundle_with(|b| b.volume_trend = VolumeTrend::Up), "volume_increasing", 10),
            (bundle_with(|b| b.volume_trend = VolumeTrend::StrongUp), "volume_increasing", 10),
            (bundle_with(|b| b.volume_trend = VolumeTrend::Down), "volume_decreasing", -10),
            (bundle_with(|b| b.volume_trend = VolumeTrend::StrongDown), "volume_decreasing", -10),
            (bundle_with(|b| b.boll.middle = 10.0), "boll_middle_present", 10),
            (bundle_with(|b| b.kdj = kdj(60.0, 50.0, 80.0)), "kdj_bullish", 15),
            (bundle_with(|b| b.kdj = kdj(40.0, 50.0, 20.0)), "kdj_bearish", -15),
            (bundle_with(|b| b.kdj = kdj(50.0, 50.0, 101.0)), "kdj_j_overbought", -10),
            (bundle_with(|b| b.kdj = kdj(50.0, 50.0, -1.0)), "kdj_j_oversold", 10),
            (bundle_with(|b| b.amplitude = Some(4.99)), "amplitude_calm", 5),
            (bundle_with(|b| b.amplitude = Some(15.01)), "amplitude_wild", -5),
            (bundle_with(|b| b.turnover_rate = Some(5.0)), "turnover_healthy", 5),
            (bundle_with(|b| b.turnover_rate = Some(0.5)), "turnover_illiquid", -5),
            (bundle_with(|b| b.turnover_rate = Some(20.01)), "turnover_overheated", -5),
        ];

        for (bundle, name, delta) in &cases {
            assert_eq!(fired(bundle), vec![(*name, *delta)], "case {name}");
        }

        // 每条规则至少被一个用例覆盖
        for rule in STANDARD_RULES {
            assert!(cases.iter().any(|(_, name, _)| *name == rule.name), "uncovered rule {}", rule.name);
        }
    }

    #[test]
    fn test_interval_edges() {
        let cases: Vec<(IndicatorBundle, Vec<(&str, i32)>)> = vec![
            // RSI：(50, 70) 开区间为强势，70 起算超买
            (bundle_with(|b| b.rsi = 50.0), vec![]),
            (bundle_with(|b| b.rsi = 50.01), vec![("rsi_strong", 20)]),
            (bundle_with(|b| b.rsi = 70.0), vec![("rsi_overbought", 10)]),
            // 换手率：1 归入低迷，10 与 20 均不触发
            (bundle_with(|b| b.turnover_rate = Some(1.0)), vec![("turnover_illiquid", -5)]),
            (bundle_with(|b| b.turnover_rate = Some(1.01)), vec![("turnover_healthy", 5)]),
            (bundle_with(|b| b.turnover_rate = Some(10.0)), vec![]),
            (bundle_with(|b| b.turnover_rate = Some(20.0)), vec![]),
            // 振幅：5 与 15 均不触发
            (bundle_with(|b| b.amplitude = Some(5.0)), vec![]),
            (bundle_with(|b| b.amplitude = Some(15.0)), vec![]),
            // J 值：0 与 100 均不触发极值规则
            (bundle_with(|b| b.kdj = kdj(50.0, 50.0, 0.0)), vec![]),
            (bundle_with(|b| b.kdj = kdj(50.0, 50.0, 100.0)), vec![]),
            // K>D 但 J 达到 100 时不算看多
            (bundle_with(|b| b.kdj = kdj(60.0, 50.0, 100.0)), vec![]),
            // K<D 但 J 为 0 时不算看空
            (bundle_with(|b| b.kdj = kdj(40.0, 50.0, 0.0)), vec![]),
            // 柱线为 0 不算红柱
            (bundle_with(|b| b.macd.histogram = 0.0), vec![]),
        ];

        for (i, (bundle, expected)) in cases.iter().enumerate() {
            assert_eq!(&fired(bundle), expected, "edge case #{i}");
        }
    }
}
