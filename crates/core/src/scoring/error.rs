use crate::common::Period;
use thiserror::Error;

/// # Summary
/// 评分域错误枚举。
///
/// # Invariants
/// - 仅用于违反前置条件的调用，单个指标数据不足不属于错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    // 多周期综合评分缺少某个周期的评分
    #[error("Missing score for period: {0}")]
    MissingPeriod(Period),
}
