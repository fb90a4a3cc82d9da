use crate::market::error::MarketError;
use crate::scoring::entity::ScoreResult;
use crate::screener::entity::{ScreenedStock, StockSnapshot};
use crate::screener::error::ScreenError;
use async_trait::async_trait;

/// # Summary
/// 单只股票的下游分析管线（拉取行情 → 指标 → 评分）。
///
/// # Invariants
/// - 评估结果只取决于股票本身，与活跃度权重无关，调用方可以缓存。
/// - 数据不足以评分时返回 `Ok(None)`，而非错误。
#[async_trait]
pub trait StockEvaluator: Send + Sync {
    /// # Summary
    /// 评估单只股票。
    ///
    /// # Arguments
    /// * `stock`: 股票池快照。
    ///
    /// # Returns
    /// 成功返回评分结果（无数据时为 None），行情获取失败返回 MarketError。
    async fn evaluate(&self, stock: &StockSnapshot) -> Result<Option<ScoreResult>, MarketError>;
}

/// # Summary
/// 选股结果导出端口（报表、表格等外部协作方）。
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// 导出按评分降序排列的最终候选列表。
    async fn export(&self, results: &[ScreenedStock]) -> Result<(), ScreenError>;
}
