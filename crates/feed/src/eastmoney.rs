use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use stockstar_core::common::{Period, Stock};
use stockstar_core::market::entity::{PriceBar, PriceSeries};
use stockstar_core::market::error::MarketError;
use stockstar_core::screener::entity::StockSnapshot;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// # Summary
/// 东方财富证券 ID：`{市场前缀}.{代码}`，例如 `1.600519`、`0.002152`。
pub fn secid(symbol: &str) -> String {
    format!("{}.{}", Stock::a_share(symbol).market_prefix(), symbol)
}

/// 报文文件名中使用的 K 线周期代码 (klt)。
pub fn klt(period: Period) -> u16 {
    period.kline_code()
}

/// # Summary
/// K 线接口响应顶层结构。
#[derive(Deserialize, Debug)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Deserialize, Debug)]
struct KlineData {
    // 每根 K 线一行逗号分隔的字符串
    klines: Option<Vec<String>>,
}

/// # Summary
/// 股票列表接口响应顶层结构。
#[derive(Deserialize, Debug)]
struct ListResponse {
    data: Option<ListData>,
}

#[derive(Deserialize, Debug)]
struct ListData {
    diff: Vec<RawListItem>,
}

/// # Summary
/// 股票列表中的单条原始记录，字段按东方财富 f 编号映射。
#[derive(Deserialize, Debug)]
struct RawListItem {
    #[serde(rename = "f12")]
    code: String,
    #[serde(rename = "f14")]
    name: String,
    #[serde(rename = "f2", default, deserialize_with = "lenient_f64")]
    price: Option<f64>,
    #[serde(rename = "f3", default, deserialize_with = "lenient_f64")]
    change_pct: Option<f64>,
    #[serde(rename = "f62", default, deserialize_with = "lenient_f64")]
    volume_ratio: Option<f64>,
    #[serde(rename = "f7", default, deserialize_with = "lenient_f64")]
    turnover: Option<f64>,
    #[serde(rename = "f8", default, deserialize_with = "lenient_f64")]
    turnover_value: Option<f64>,
    #[serde(rename = "f9", default, deserialize_with = "lenient_f64")]
    amplitude: Option<f64>,
}

impl From<RawListItem> for StockSnapshot {
    fn from(raw: RawListItem) -> Self {
        Self {
            symbol: raw.code,
            name: raw.name,
            price: raw.price,
            change_pct: raw.change_pct,
            volume_ratio: raw.volume_ratio,
            turnover: raw.turnover,
            turnover_value: raw.turnover_value,
            amplitude: raw.amplitude,
        }
    }
}

/// # Summary
/// 个股快照接口响应，仅取流通股本。
#[derive(Deserialize, Debug)]
struct QuoteResponse {
    data: Option<QuoteData>,
}

#[derive(Deserialize, Debug)]
struct QuoteData {
    // 流通股本（股）
    #[serde(rename = "f85", default, deserialize_with = "lenient_f64")]
    float_shares: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// 数值字段可能是数字、数字字符串或占位符 `"-"`；无法解析的一律视为缺失。
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(v)) => Some(v),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

fn parse_number(field: &str, name: &str, line: &str) -> Result<f64, MarketError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| MarketError::Parse(format!("invalid {} in kline '{}': {}", name, line, e)))
}

/// # Summary
/// 解析单行 K 线字符串。
///
/// # Logic
/// 1. 按逗号切分，前 7 列依次为：日期、开盘、收盘、最高、最低、成交量（手）、成交额（元）。
/// 2. 其余列（振幅、涨跌幅等）忽略。
/// 3. 成交额缺失或无法解析时置为 None。
///
/// # Arguments
/// * `line`: 形如 `2024-01-02,10.00,10.50,10.80,9.90,12345,12960000.00,...` 的字符串。
pub fn parse_kline_line(line: &str) -> Result<PriceBar, MarketError> {
    let fields: Vec<&str> = line.split(',').collect();
    let [date, open, close, high, low, volume, rest @ ..] = fields.as_slice() else {
        return Err(MarketError::Parse(format!("kline '{}' has fewer than 6 fields", line)));
    };

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|e| MarketError::Parse(format!("invalid date in kline '{}': {}", line, e)))?;

    Ok(PriceBar {
        date,
        open: parse_number(open, "open", line)?,
        close: parse_number(close, "close", line)?,
        high: parse_number(high, "high", line)?,
        low: parse_number(low, "low", line)?,
        volume: parse_number(volume, "volume", line)?,
        amount: rest.first().and_then(|a| a.trim().parse::<f64>().ok()),
    })
}

/// # Summary
/// 解析 K 线接口报文为 K 线序列。
///
/// # Logic
/// 1. `data` 或 `klines` 为空时返回空序列（该周期无数据）。
/// 2. 逐行解析，任一行非法即返回解析错误。
/// 3. 构造 `PriceSeries`，校验时间顺序与价格约束。
pub fn parse_kline_payload(body: &str) -> Result<PriceSeries, MarketError> {
    let resp: KlineResponse = serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;

    let Some(lines) = resp.data.and_then(|d| d.klines) else {
        debug!("kline payload carries no data");
        return Ok(PriceSeries::empty());
    };

    let bars = lines
        .iter()
        .map(|line| parse_kline_line(line))
        .collect::<Result<Vec<_>, _>>()?;
    PriceSeries::new(bars)
}

/// # Summary
/// 解析股票列表接口报文。
///
/// # Returns
/// 成功返回快照列表；报文缺少 `data` 时返回 `MarketError::NotFound`。
pub fn parse_stock_list(body: &str) -> Result<Vec<StockSnapshot>, MarketError> {
    let resp: ListResponse = serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;
    let data = resp.data.ok_or(MarketError::NotFound)?;
    Ok(data.diff.into_iter().map(StockSnapshot::from).collect())
}

/// # Summary
/// 解析个股快照报文中的流通股本。
///
/// # Returns
/// 字段缺失、为 0 或非数值时返回 `Ok(None)`。
pub fn parse_float_shares(body: &str) -> Result<Option<f64>, MarketError> {
    let resp: QuoteResponse = serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;
    Ok(resp
        .data
        .and_then(|d| d.float_shares)
        .filter(|shares| *shares > 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secid_prefix() {
        assert_eq!(secid("600519"), "1.600519");
        assert_eq!(secid("002152"), "0.002152");
        assert_eq!(secid("300750"), "0.300750");
    }

    #[test]
    fn test_parse_kline_line() {
        let bar = parse_kline_line("2024-01-02,10.00,10.50,10.80,9.90,12345,12960000.00,9.09,5.00,0.50,1.20").unwrap();
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bar.open, 10.0);
        assert_eq!(bar.close, 10.5);
        assert_eq!(bar.high, 10.8);
        assert_eq!(bar.low, 9.9);
        assert_eq!(bar.volume, 12345.0);
        assert_eq!(bar.amount, Some(12_960_000.0));
    }

    #[test]
    fn test_parse_kline_line_without_amount() {
        let bar = parse_kline_line("2024-01-02,10,10,10,10,0").unwrap();
        assert_eq!(bar.amount, None);
    }

    #[test]
    fn test_parse_kline_line_errors() {
        assert!(matches!(parse_kline_line("2024-01-02,10,10"), Err(MarketError::Parse(_))));
        assert!(matches!(parse_kline_line("20240102,10,10,10,10,1"), Err(MarketError::Parse(_))));
        assert!(matches!(parse_kline_line("2024-01-02,x,10,10,10,1"), Err(MarketError::Parse(_))));
    }

    #[test]
    fn test_parse_payload_without_data_is_empty() {
        assert!(parse_kline_payload(r#"{"rc":0,"data":null}"#).unwrap().is_empty());
        assert!(parse_kline_payload(r#"{"data":{"code":"600519","klines":null}}"#).unwrap().is_empty());
        assert!(matches!(parse_kline_payload("not json"), Err(MarketError::Parse(_))));
    }

    #[test]
    fn test_parse_payload_rejects_unordered_dates() {
        let body = r#"{"data":{"klines":["2024-01-03,10,10,10,10,1,1","2024-01-02,10,10,10,10,1,1"]}}"#;
        assert!(matches!(parse_kline_payload(body), Err(MarketError::InvalidSeries(_))));
    }

    #[test]
    fn test_parse_stock_list_lenient_numbers() {
        let body = r#"{"data":{"total":2,"diff":[
            {"f12":"600519","f14":"贵州茅台","f2":1688.0,"f3":1.2,"f62":1.5,"f7":0.35,"f8":"2.1","f9":2.4},
            {"f12":"000001","f14":"平安银行","f2":"-","f3":"-","f62":"-","f7":"-","f8":"-","f9":"-"}
        ]}}"#;
        let stocks = parse_stock_list(body).unwrap();
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].symbol, "600519");
        assert_eq!(stocks[0].volume_ratio, Some(1.5));
        assert_eq!(stocks[0].turnover_value, Some(2.1));
        assert_eq!(stocks[1].price, None);
        assert_eq!(stocks[1].amplitude, None);
        assert_eq!(stocks[1].activity_fields(), [0.0; 4]);

        assert_eq!(parse_stock_list(r#"{"data":null}"#), Err(MarketError::NotFound));
    }

    #[test]
    fn test_parse_float_shares() {
        assert_eq!(
            parse_float_shares(r#"{"data":{"f58":"贵州茅台","f85":1256197800}}"#).unwrap(),
            Some(1_256_197_800.0)
        );
        assert_eq!(parse_float_shares(r#"{"data":{"f58":"停牌","f85":0}}"#).unwrap(), None);
        assert_eq!(parse_float_shares(r#"{"data":null}"#).unwrap(), None);
    }
}
