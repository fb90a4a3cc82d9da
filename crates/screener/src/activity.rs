use stockstar_core::screener::entity::{ActiveStock, StockSnapshot, WeightVector};
use tracing::debug;

/// # Summary
/// 活跃度打分器：对量比、换手率、成交金额、振幅四个原始字段做加权求和。
///
/// # Invariants
/// - 权重由构造方显式传入，打分器本身不持有任何全局状态。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityScorer {
    weights: WeightVector,
}

impl ActivityScorer {
    pub fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// # Summary
    /// 计算单只股票的活跃度得分。
    ///
    /// # Logic
    /// `量比·w1 + 换手率·w2 + 成交金额·w3 + 振幅·w4`，缺失字段按 0 处理。
    pub fn score(&self, stock: &StockSnapshot) -> f64 {
        stock
            .activity_fields()
            .iter()
            .zip(self.weights.as_array())
            .map(|(field, weight)| field * weight)
            .sum()
    }

    /// # Summary
    /// 活跃度筛选。
    ///
    /// # Logic
    /// 1. 对每只股票打分，保留得分不低于 `threshold` 的股票。
    /// 2. 按得分降序排序（同分保持原有顺序）。
    /// 3. 截断到前 `limit` 只。
    ///
    /// # Arguments
    /// * `stocks`: 候选股票池。
    /// * `threshold`: 活跃度下限，含边界。
    /// * `limit`: 最多保留的数量。
    pub fn filter_active(&self, stocks: &[StockSnapshot], threshold: f64, limit: usize) -> Vec<ActiveStock> {
        let mut active: Vec<ActiveStock> = stocks
            .iter()
            .filter_map(|stock| {
                let activity_score = self.score(stock);
                (activity_score >= threshold).then(|| ActiveStock {
                    stock: stock.clone(),
                    activity_score,
                })
            })
            .collect();

        active.sort_by(|a, b| b.activity_score.total_cmp(&a.activity_score));
        active.truncate(limit);

        debug!(
            weights = %self.weights,
            total = stocks.len(),
            kept = active.len(),
            threshold,
            "activity filter applied"
        );
        active
    }
}
