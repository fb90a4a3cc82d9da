//! 选股层。
//!
//! 自上而下：`universe` 负责板块与股票池初筛，`activity` 负责活跃度打分与排序截断，
//! `screen` 把活跃股票交给下游评估端口做多因子筛选，`grid`/`optimizer` 在候选权重网格上搜索活跃度权重。

pub mod activity;
pub mod grid;
pub mod optimizer;
pub mod screen;
pub mod universe;

pub use activity::ActivityScorer;
pub use grid::WeightGrid;
pub use optimizer::{CandidateScore, TuningReport, WeightOptimizer};
pub use screen::MultiFactorScreener;
pub use universe::{is_main_board, load_universe};
