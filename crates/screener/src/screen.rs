use crate::activity::ActivityScorer;
use crate::universe::load_universe;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use stockstar_core::config::{ActivityConfig, ScreenConfig};
use stockstar_core::market::port::StockUniverse;
use stockstar_core::screener::entity::{ActiveStock, ScreenedStock, StockSnapshot};
use stockstar_core::screener::error::ScreenError;
use stockstar_core::screener::port::{ReportSink, StockEvaluator};
use tracing::{debug, info, warn};

/// # Summary
/// 多因子选股器：活跃度筛选 + 技术评分筛选。
///
/// # Invariants
/// - 评估失败或无评分的股票直接剔除，不影响其他股票。
/// - 输出按技术评分降序，同分保持活跃度排序。
pub struct MultiFactorScreener {
    // 下游评估端口
    evaluator: Arc<dyn StockEvaluator>,
    activity: ActivityConfig,
    screen: ScreenConfig,
}

impl MultiFactorScreener {
    pub fn new(evaluator: Arc<dyn StockEvaluator>, activity: ActivityConfig, screen: ScreenConfig) -> Self {
        Self {
            evaluator,
            activity,
            screen,
        }
    }

    /// 使用配置权重的活跃度打分器。
    pub fn scorer(&self) -> ActivityScorer {
        ActivityScorer::new(self.activity.weights)
    }

    /// # Summary
    /// 对已初筛的股票池执行多因子筛选。
    ///
    /// # Logic
    /// 1. 活跃度不低于 `activity.threshold`，按活跃度降序取前 `activity.top_n` 只。
    /// 2. 以 `screen.concurrency` 的并发度逐只评估。
    /// 3. 保留评分不低于 `screen.min_score` 的股票，按评分降序排序。
    pub async fn screen(&self, stocks: &[StockSnapshot]) -> Vec<ScreenedStock> {
        let active = self
            .scorer()
            .filter_active(stocks, self.activity.threshold, self.activity.top_n);
        info!(active = active.len(), "activity screen finished");

        let total = active.len();
        let evaluated: Vec<Option<ScreenedStock>> = stream::iter(active.into_iter().enumerate())
            .map(|(i, candidate)| self.evaluate_one(i, total, candidate))
            .buffered(self.screen.concurrency.max(1))
            .collect()
            .await;

        let mut results: Vec<ScreenedStock> = evaluated
            .into_iter()
            .flatten()
            .filter(|s| s.result.score >= self.screen.min_score)
            .collect();
        results.sort_by(|a, b| b.result.score.cmp(&a.result.score));

        info!(
            selected = results.len(),
            min_score = self.screen.min_score,
            "multi-factor screen finished"
        );
        results
    }

    /// # Summary
    /// 完整选股流程：拉取股票池 → 初筛 → 多因子筛选 → 导出。
    ///
    /// # Arguments
    /// * `source`: 股票池端口。
    /// * `sink`: 结果导出端口。
    ///
    /// # Returns
    /// 成功返回最终候选列表；获取股票池或导出失败返回 ScreenError。
    pub async fn run(&self, source: &dyn StockUniverse, sink: &dyn ReportSink) -> Result<Vec<ScreenedStock>, ScreenError> {
        let universe = load_universe(source, &self.scorer(), self.activity.universe_threshold).await?;
        let results = self.screen(&universe).await;
        sink.export(&results).await?;
        if let Some(top) = results.first() {
            info!(symbol = %top.stock.symbol, name = %top.stock.name, score = top.result.score, "top pick");
        }
        Ok(results)
    }

    async fn evaluate_one(&self, i: usize, total: usize, candidate: ActiveStock) -> Option<ScreenedStock> {
        debug!(progress = i + 1, total, symbol = %candidate.stock.symbol, "evaluating stock");
        match self.evaluator.evaluate(&candidate.stock).await {
            Ok(Some(result)) => Some(ScreenedStock {
                stock: candidate.stock,
                activity_score: candidate.activity_score,
                result,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(symbol = %candidate.stock.symbol, error = %e, "stock evaluation failed, skipping");
                None
            }
        }
    }
}
