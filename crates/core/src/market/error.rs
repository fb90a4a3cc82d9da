use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，处理网络、解析、数据缺失及序列校验等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    // 网络层错误，包含底层客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式或 K 线字段不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的数据未找到
    #[error("Data not found")]
    NotFound,
    // K 线序列违反时间顺序或价格约束
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
