use crate::common::Period;
use crate::market::entity::PriceSeries;
use crate::market::error::MarketError;
use crate::screener::entity::StockSnapshot;
use async_trait::async_trait;

/// # Summary
/// K 线数据提供者接口（外部数据获取协作方）。
///
/// # Invariants
/// - 返回的序列必须已按时间升序排列。
/// - "没有数据" 以空序列表达，而不是错误。
#[async_trait]
pub trait KlineProvider: Send + Sync {
    /// # Summary
    /// 获取指定证券在指定周期下最近的 K 线序列。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `period`: 日线/周线/月线。
    /// * `limit`: 最多返回的 K 线根数。
    ///
    /// # Returns
    /// 成功返回 K 线序列（可能为空），失败返回 MarketError。
    async fn fetch_series(
        &self,
        symbol: &str,
        period: Period,
        limit: usize,
    ) -> Result<PriceSeries, MarketError>;

    /// # Summary
    /// 获取证券的流通股本（单位: 股）。
    ///
    /// # Returns
    /// 数据源未提供时返回 `Ok(None)`。
    async fn fetch_float_shares(&self, symbol: &str) -> Result<Option<f64>, MarketError>;
}

/// # Summary
/// 股票池提供者接口，返回带原始活跃度字段的全市场快照。
#[async_trait]
pub trait StockUniverse: Send + Sync {
    /// 获取当前股票池快照列表。
    async fn list_stocks(&self) -> Result<Vec<StockSnapshot>, MarketError>;
}
