use crate::rules::{Rule, STANDARD_RULES};
use serde::Serialize;
use stockstar_core::indicator::entity::IndicatorBundle;
use stockstar_core::scoring::entity::{MAX_SCORE, ScoreResult};

/// 命中的规则及其分数增量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub name: &'static str,
    pub delta: i32,
}

/// # Summary
/// 单周期评分引擎，对指标包逐条执行规则表并累加增量。
///
/// # Invariants
/// - 纯函数语义：同一指标包总是得到同一结果。
/// - 输出分数钳制在 `[0, 100]`。
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    rules: Vec<Rule>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }
}

impl ScoringEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 未钳制的规则增量总和。
    pub fn raw_total(&self, bundle: &IndicatorBundle) -> i32 {
        self.rules
            .iter()
            .filter(|rule| rule.applies(bundle))
            .map(|rule| rule.delta)
            .sum()
    }

    /// # Summary
    /// 计算单周期评分。
    ///
    /// # Logic
    /// 1. 累加所有命中规则的增量。
    /// 2. 钳制到 `[0, 100]`。
    /// 3. 推导星级（最低 1 星）与推荐等级。
    pub fn score(&self, bundle: &IndicatorBundle) -> ScoreResult {
        let clamped = self.raw_total(bundle).clamp(0, i32::from(MAX_SCORE));
        ScoreResult::from_score(u8::try_from(clamped).unwrap_or(MAX_SCORE))
    }

    /// 列出命中的规则，按规则表顺序排列。
    pub fn explain(&self, bundle: &IndicatorBundle) -> Vec<RuleHit> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(bundle))
            .map(|rule| RuleHit {
                name: rule.name,
                delta: rule.delta,
            })
            .collect()
    }
}
