use crate::eastmoney::{klt, parse_float_shares, parse_kline_payload, parse_stock_list, secid};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use stockstar_core::common::Period;
use stockstar_core::config::DataConfig;
use stockstar_core::market::entity::PriceSeries;
use stockstar_core::market::error::MarketError;
use stockstar_core::market::port::{KlineProvider, StockUniverse};
use stockstar_core::screener::entity::StockSnapshot;
use tracing::{debug, warn};

const LIST_FILE: &str = "list.json";
const KLINE_DIR: &str = "kline";
const QUOTE_DIR: &str = "quote";

/// # Summary
/// 基于本地数据目录的行情提供者，读取预先保存的东方财富报文。
///
/// # Invariants
/// - 目录布局：
///   - `list.json`：股票列表报文。
///   - `kline/{secid}_{klt}.json`：K 线报文，例如 `kline/1.600519_101.json`。
///   - `quote/{secid}.json`：个股快照报文（流通股本）。
/// - 文件不存在表示"没有数据"：K 线返回空序列，流通股本返回 None。
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kline_path(&self, symbol: &str, period: Period) -> PathBuf {
        self.root
            .join(KLINE_DIR)
            .join(format!("{}_{}.json", secid(symbol), klt(period)))
    }

    pub fn quote_path(&self, symbol: &str) -> PathBuf {
        self.root.join(QUOTE_DIR).join(format!("{}.json", secid(symbol)))
    }

    pub fn list_path(&self) -> PathBuf {
        self.root.join(LIST_FILE)
    }

    /// 读取报文；文件不存在时返回 `Ok(None)`。
    async fn read_optional(path: &Path) -> Result<Option<String>, MarketError> {
        match tokio::fs::read_to_string(path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MarketError::Unknown(format!("{}: {}", path.display(), e))),
        }
    }
}

#[async_trait]
impl KlineProvider for JsonDirProvider {
    /// # Summary
    /// 读取本地 K 线报文。
    ///
    /// # Logic
    /// 1. 按证券 ID 与周期代码定位文件，不存在时返回空序列。
    /// 2. 解析报文并截取最近 `limit` 根。
    async fn fetch_series(&self, symbol: &str, period: Period, limit: usize) -> Result<PriceSeries, MarketError> {
        let path = self.kline_path(symbol, period);
        let Some(body) = Self::read_optional(&path).await? else {
            warn!(symbol, %period, path = %path.display(), "kline payload not found");
            return Ok(PriceSeries::empty());
        };

        let series = parse_kline_payload(&body)?.tail(limit);
        debug!(symbol, %period, bars = series.len(), "kline payload loaded");
        Ok(series)
    }

    async fn fetch_float_shares(&self, symbol: &str) -> Result<Option<f64>, MarketError> {
        match Self::read_optional(&self.quote_path(symbol)).await? {
            Some(body) => parse_float_shares(&body),
            None => {
                debug!(symbol, "quote payload not found, float shares unavailable");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl StockUniverse for JsonDirProvider {
    /// 读取 `list.json`；文件不存在返回 `MarketError::NotFound`。
    async fn list_stocks(&self) -> Result<Vec<StockSnapshot>, MarketError> {
        let body = Self::read_optional(&self.list_path())
            .await?
            .ok_or(MarketError::NotFound)?;
        let stocks = parse_stock_list(&body)?;
        debug!(count = stocks.len(), "stock list loaded");
        Ok(stocks)
    }
}
