//! 数据边界适配层。
//!
//! `eastmoney` 把东方财富接口形态的 JSON 报文解析为领域实体，
//! `dir` 以本地保存的报文目录实现 `KlineProvider` 与 `StockUniverse` 端口。

pub mod dir;
pub mod eastmoney;

pub use dir::JsonDirProvider;
