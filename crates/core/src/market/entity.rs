use crate::market::error::MarketError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 K 线数据实体，记录一个交易周期内的行情波动。
///
/// # Invariants
/// - 所有数值字段非负且有限。
/// - `high >= max(open, close) >= min(open, close) >= low`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    // 交易日期 (周线/月线为该周期最后一个交易日)
    pub date: NaiveDate,
    // 开盘价
    pub open: f64,
    // 收盘价
    pub close: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 成交量 (单位: 手)
    pub volume: f64,
    // 成交额 (单位: 元)，部分数据源不提供
    #[serde(default)]
    pub amount: Option<f64>,
}

impl PriceBar {
    /// # Summary
    /// 校验单根 K 线的价格与数量约束。
    ///
    /// # Logic
    /// 1. 检查 OHLCV 及成交额均为有限非负数。
    /// 2. 检查最高价不低于开收盘价，最低价不高于开收盘价。
    ///
    /// # Returns
    /// 合法返回 Ok，否则返回 `MarketError::InvalidSeries`。
    pub fn validate(&self) -> Result<(), MarketError> {
        let fields = [
            ("open", self.open),
            ("close", self.close),
            ("high", self.high),
            ("low", self.low),
            ("volume", self.volume),
            ("amount", self.amount.unwrap_or(0.0)),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(MarketError::InvalidSeries(format!(
                "{}: {} must be finite and non-negative, got {}",
                self.date, name, value
            )));
        }

        let body_high = self.open.max(self.close);
        let body_low = self.open.min(self.close);
        if self.high < body_high || self.low > body_low {
            return Err(MarketError::InvalidSeries(format!(
                "{}: high/low {}/{} do not enclose open/close {}/{}",
                self.date, self.high, self.low, self.open, self.close
            )));
        }
        Ok(())
    }
}

/// # Summary
/// 按时间升序排列的 K 线序列。
///
/// # Invariants
/// - 日期严格递增（无重复日期）。
/// - 每根 K 线均满足 `PriceBar::validate`。
/// - 序列长度决定了哪些指标可计算，长度不足不视为错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// # Summary
    /// 构造并校验 K 线序列。
    ///
    /// # Logic
    /// 1. 逐根校验价格约束。
    /// 2. 检查相邻 K 线日期严格递增。
    ///
    /// # Arguments
    /// * `bars`: 按时间升序排列的 K 线列表。
    ///
    /// # Returns
    /// 成功返回序列，违反约束返回 `MarketError::InvalidSeries`。
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, MarketError> {
        for bar in &bars {
            bar.validate()?;
        }
        if let Some(pair) = bars.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(MarketError::InvalidSeries(format!(
                "dates must be strictly ascending: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { bars })
    }

    /// 空序列，代表数据源未返回任何数据。
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// 收盘价序列。
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 仅保留最近 `limit` 根 K 线。
    pub fn tail(&self, limit: usize) -> Self {
        let start = self.bars.len().saturating_sub(limit);
        Self {
            bars: self.bars[start..].to_vec(),
        }
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = MarketError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}
