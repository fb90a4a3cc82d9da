use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 证券标的实体，代表系统关注的特定 A 股股票。
///
/// # Invariants
/// - `symbol` 必须是 6 位交易代码（例如: 600519, 002152）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    // 股票代码
    pub symbol: String,
    // 交易所代码 (SH / SZ)
    pub exchange: Option<String>,
}

impl Stock {
    /// # Summary
    /// 依据 A 股代码规则推断交易所并创建标的。
    ///
    /// # Logic
    /// 1. 以 `6` 开头的代码归属上交所 (SH)。
    /// 2. 其余代码归属深交所 (SZ)。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 带有交易所信息的标的实体。
    pub fn a_share(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let exchange = if symbol.starts_with('6') { "SH" } else { "SZ" };
        Self {
            symbol,
            exchange: Some(exchange.to_string()),
        }
    }

    /// 行情接口使用的市场前缀 (上交所 1，深交所 0)。
    pub fn market_prefix(&self) -> u8 {
        match self.exchange.as_deref() {
            Some("SH") => 1,
            _ => 0,
        }
    }
}

/// # Summary
/// 评分周期枚举，定义参与多周期评分的 K 线跨度。
///
/// # Invariants
/// - 周期顺序固定为 日线 → 周线 → 月线。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    // 日线
    Daily,
    // 周线
    Weekly,
    // 月线
    Monthly,
}

impl Period {
    /// 全部周期，按综合评分的权重顺序排列。
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// 行情接口的 K 线类型编码 (klt)。
    pub fn kline_code(self) -> u16 {
        match self {
            Period::Daily => 101,
            Period::Weekly => 102,
            Period::Monthly => 103,
        }
    }

    /// 中文展示名称。
    pub fn label(self) -> &'static str {
        match self {
            Period::Daily => "日线",
            Period::Weekly => "周线",
            Period::Monthly => "月线",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" | "101" => Ok(Period::Daily),
            "weekly" | "1w" | "102" => Ok(Period::Weekly),
            "monthly" | "1mo" | "103" => Ok(Period::Monthly),
            _ => Err(format!("Unknown Period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Daily => write!(f, "daily"),
            Period::Weekly => write!(f, "weekly"),
            Period::Monthly => write!(f, "monthly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("daily".parse::<Period>(), Ok(Period::Daily));
        assert_eq!("102".parse::<Period>(), Ok(Period::Weekly));
        assert_eq!("1MO".parse::<Period>(), Ok(Period::Monthly));
        assert!("hourly".parse::<Period>().is_err());
        assert_eq!(Period::Monthly.to_string(), "monthly");
        assert_eq!(Period::Weekly.kline_code(), 102);
    }

    #[test]
    fn test_a_share_exchange_inference() {
        let sh = Stock::a_share("600519");
        assert_eq!(sh.exchange.as_deref(), Some("SH"));
        assert_eq!(sh.market_prefix(), 1);

        let sz = Stock::a_share("002152");
        assert_eq!(sz.exchange.as_deref(), Some("SZ"));
        assert_eq!(sz.market_prefix(), 0);
    }
}
