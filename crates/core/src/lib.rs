//! StockStar 领域核心。
//!
//! 只包含值对象、端口契约（async trait）、错误枚举与配置，
//! 不依赖任何具体的数据源或计算实现。

pub mod common;
pub mod config;
pub mod indicator;
pub mod market;
pub mod scoring;
pub mod screener;
