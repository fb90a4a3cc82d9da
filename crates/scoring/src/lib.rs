//! 评分引擎。
//!
//! 规则表 (`rules`) 是唯一的评分依据；`engine` 负责把指标包折算为分数、星级与推荐等级，
//! `combiner` 负责日/周/月三周期的固定权重综合，`analyzer` 把行情端口、指标聚合与评分串成完整管线。

pub mod analyzer;
pub mod combiner;
pub mod engine;
pub mod interpret;
pub mod rules;

pub use analyzer::{MultiPeriodAnalyzer, PeriodAnalysis, StockAnalysis};
pub use combiner::MultiPeriodCombiner;
pub use engine::{RuleHit, ScoringEngine};
pub use interpret::interpret;
pub use rules::{Rule, STANDARD_RULES};
