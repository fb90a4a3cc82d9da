use crate::activity::ActivityScorer;
use crate::grid::WeightGrid;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use stockstar_core::config::TunerConfig;
use stockstar_core::screener::entity::{StockSnapshot, WeightVector};
use stockstar_core::screener::port::StockEvaluator;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// 多因子筛选与调参使用的活跃度下限。
pub const DEFAULT_ACTIVITY_THRESHOLD: f64 = 0.4;

/// # Summary
/// 单组权重的调参结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    // 在网格枚举中的序号，用于同分时的先后判定
    pub index: usize,
    pub weights: WeightVector,
    // 幸存股票的平均技术评分
    pub mean_score: f64,
    // 通过活跃度筛选且评分非零的股票数
    pub survivors: usize,
}

/// # Summary
/// 一次完整调参的汇总报告。
///
/// # Invariants
/// - `candidates` 按枚举序号升序排列。
/// - `best` 为平均分最高的候选，同分取枚举序号最小者。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TuningReport {
    pub candidates: Vec<CandidateScore>,
    // 没有任何幸存股票而被跳过的组合数
    pub skipped: usize,
    // 因超过截止时间而未评估的组合数
    pub unevaluated: usize,
    pub best: Option<CandidateScore>,
}

enum TupleOutcome {
    Scored(CandidateScore),
    NoSurvivors,
    PastDeadline,
}

/// # Summary
/// 活跃度权重优化器：在候选网格上搜索使下游平均技术评分最高的权重向量。
///
/// # Invariants
/// - 单只股票的评估与权重无关，同一个优化器实例内每只股票最多评估一次。
/// - 评估失败只记录告警并视为无评分，不会中断整个搜索。
pub struct WeightOptimizer {
    // 下游评估端口（多周期分析管线）
    evaluator: Arc<dyn StockEvaluator>,
    config: TunerConfig,
    // 活跃度下限
    threshold: f64,
    // 股票代码 -> 评估得分（None 表示无评分）
    memo: DashMap<String, Arc<OnceCell<Option<u8>>>>,
}

impl WeightOptimizer {
    pub fn new(evaluator: Arc<dyn StockEvaluator>, config: TunerConfig) -> Self {
        Self {
            evaluator,
            config,
            threshold: DEFAULT_ACTIVITY_THRESHOLD,
            memo: DashMap::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// 本优化器实际评估过的股票数。
    pub fn evaluated_symbols(&self) -> usize {
        self.memo.len()
    }

    /// # Summary
    /// 执行网格搜索。
    ///
    /// # Logic
    /// 1. 由配置构建候选网格，按枚举序号并发评估各组权重（并发度 `tuner.concurrency`）。
    /// 2. 每组权重：活跃度筛选 → 评估每只股票 → 统计评分非零的幸存股票与平均分。
    /// 3. 幸存为 0 的组合跳过；若设置了截止时间，开始评估前已超时的组合不再评估。
    /// 4. 归约出平均分最高的组合，同分保留枚举序号最小者。
    ///
    /// # Arguments
    /// * `universe`: 经过初筛的股票池。
    ///
    /// # Returns
    /// 调参报告；股票池为空时 `best` 为 None。
    pub async fn optimize(&self, universe: &[StockSnapshot]) -> TuningReport {
        let grid = WeightGrid::new(self.config.candidates.clone(), self.config.tolerance);
        let deadline = self
            .config
            .deadline_secs
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        info!(
            universe = universe.len(),
            candidates = ?self.config.candidates,
            threshold = self.threshold,
            "weight tuning started"
        );

        let mut outcomes: Vec<(usize, TupleOutcome)> = stream::iter(grid.iter().enumerate())
            .map(|(index, weights)| async move {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    return (index, TupleOutcome::PastDeadline);
                }
                (index, self.evaluate_tuple(index, weights, universe).await)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut report = TuningReport::default();
        for (_, outcome) in outcomes {
            match outcome {
                TupleOutcome::Scored(candidate) => {
                    let better = report
                        .best
                        .as_ref()
                        .is_none_or(|best| candidate.mean_score > best.mean_score);
                    if better {
                        report.best = Some(candidate.clone());
                    }
                    report.candidates.push(candidate);
                }
                TupleOutcome::NoSurvivors => report.skipped += 1,
                TupleOutcome::PastDeadline => report.unevaluated += 1,
            }
        }

        if report.unevaluated > 0 {
            warn!(unevaluated = report.unevaluated, "tuning deadline reached, remaining combinations not evaluated");
        }
        match &report.best {
            Some(best) => info!(
                weights = %best.weights,
                mean_score = best.mean_score,
                survivors = best.survivors,
                evaluated = report.candidates.len(),
                skipped = report.skipped,
                "weight tuning finished"
            ),
            None => info!(skipped = report.skipped, "no combination produced survivors"),
        }
        report
    }

    async fn evaluate_tuple(&self, index: usize, weights: WeightVector, universe: &[StockSnapshot]) -> TupleOutcome {
        let scorer = ActivityScorer::new(weights);
        let active: Vec<&StockSnapshot> = universe
            .iter()
            .filter(|stock| scorer.score(stock) >= self.threshold)
            .collect();

        let scores: Vec<Option<u8>> = stream::iter(active)
            .map(|stock| self.evaluate_cached(stock))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let survivors: Vec<u32> = scores
            .into_iter()
            .flatten()
            .filter(|&score| score > 0)
            .map(u32::from)
            .collect();

        if survivors.is_empty() {
            debug!(index, weights = %weights, "no stock survived, skipping combination");
            return TupleOutcome::NoSurvivors;
        }

        let total: u32 = survivors.iter().sum();
        let count = u32::try_from(survivors.len()).unwrap_or(u32::MAX);
        let mean_score = f64::from(total) / f64::from(count);
        info!(index, weights = %weights, mean_score, survivors = survivors.len(), "combination evaluated");

        TupleOutcome::Scored(CandidateScore {
            index,
            weights,
            mean_score,
            survivors: survivors.len(),
        })
    }

    /// 评估单只股票，结果按代码缓存；并发请求同一代码时只触发一次评估。
    async fn evaluate_cached(&self, stock: &StockSnapshot) -> Option<u8> {
        let cell = Arc::clone(&self.memo.entry(stock.symbol.clone()).or_default());
        *cell
            .get_or_init(|| async {
                match self.evaluator.evaluate(stock).await {
                    Ok(result) => result.map(|r| r.score),
                    Err(e) => {
                        warn!(symbol = %stock.symbol, error = %e, "stock evaluation failed");
                        None
                    }
                }
            })
            .await
    }
}
