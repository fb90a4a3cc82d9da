use crate::market::error::MarketError;
use thiserror::Error;

/// # Summary
/// 权重向量校验错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    // 分量为负数或非有限值
    #[error("Weight component {name} must be finite and non-negative, got {value}")]
    InvalidComponent { name: &'static str, value: f64 },
    // 分量之和偏离 1 超出容差
    #[error("Weight sum {sum} deviates from 1 by more than {tolerance}")]
    InvalidSum { sum: f64, tolerance: f64 },
}

/// # Summary
/// 选股流程错误枚举。
#[derive(Error, Debug)]
pub enum ScreenError {
    // 获取股票池或行情失败
    #[error("Market error: {0}")]
    Market(#[from] MarketError),
    // 结果导出失败
    #[error("Export error: {0}")]
    Export(String),
}
