use crate::combiner::MultiPeriodCombiner;
use crate::engine::{RuleHit, ScoringEngine};
use crate::interpret::interpret;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use stockstar_core::common::Period;
use stockstar_core::config::AppConfig;
use stockstar_core::indicator::entity::IndicatorBundle;
use stockstar_core::market::entity::{PriceBar, PriceSeries};
use stockstar_core::market::error::MarketError;
use stockstar_core::market::port::KlineProvider;
use stockstar_core::scoring::entity::{FinalResult, ScoreResult};
use stockstar_core::screener::entity::StockSnapshot;
use stockstar_core::screener::port::StockEvaluator;
use stockstar_indicator::PeriodAggregator;
use tracing::{debug, info, warn};

/// 默认每个周期拉取的 K 线根数。
pub const DEFAULT_BAR_LIMIT: usize = 100;

/// # Summary
/// 单个周期的分析明细。
#[derive(Debug, Clone, Serialize)]
pub struct PeriodAnalysis {
    pub period: Period,
    // 该周期是否有行情数据；无数据时 bundle 为中性值
    pub has_data: bool,
    pub bundle: IndicatorBundle,
    pub score: ScoreResult,
    pub hits: Vec<RuleHit>,
    pub interpretation: String,
}

/// # Summary
/// 单只股票的多周期分析结果。
///
/// # Invariants
/// - `periods` 恒含日/周/月三个周期。
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub float_shares: Option<f64>,
    // 日线最新一根 K 线
    pub latest_bar: Option<PriceBar>,
    pub periods: BTreeMap<Period, PeriodAnalysis>,
    pub final_result: FinalResult,
}

impl StockAnalysis {
    /// 是否至少有一个周期拿到了行情数据。
    pub fn has_any_data(&self) -> bool {
        self.periods.values().any(|p| p.has_data)
    }

    pub fn period(&self, period: Period) -> Option<&PeriodAnalysis> {
        self.periods.get(&period)
    }
}

/// # Summary
/// 多周期分析管线：行情端口 → 指标聚合 → 单周期评分 → 多周期综合 → 解读。
///
/// # Invariants
/// - 只依赖 `KlineProvider` 端口，具体数据源由构造方注入。
/// - 分析结果只取决于股票代码与行情数据，可被调用方缓存。
pub struct MultiPeriodAnalyzer {
    // 行情数据端口
    provider: Arc<dyn KlineProvider>,
    aggregator: PeriodAggregator,
    engine: ScoringEngine,
    combiner: MultiPeriodCombiner,
    // 每个周期拉取的 K 线根数
    bar_limit: usize,
}

impl MultiPeriodAnalyzer {
    /// # Summary
    /// 以默认指标参数与标准规则表创建分析器。
    pub fn new(provider: Arc<dyn KlineProvider>) -> Self {
        Self {
            provider,
            aggregator: PeriodAggregator::default(),
            engine: ScoringEngine::default(),
            combiner: MultiPeriodCombiner,
            bar_limit: DEFAULT_BAR_LIMIT,
        }
    }

    /// # Summary
    /// 按应用配置创建分析器：指标参数取 `indicator` 段，K 线根数取 `analysis.bar_limit`。
    pub fn from_config(provider: Arc<dyn KlineProvider>, config: &AppConfig) -> Self {
        Self::new(provider)
            .with_aggregator(PeriodAggregator::new(config.indicator.clone()))
            .with_bar_limit(config.analysis.bar_limit)
    }

    pub fn with_aggregator(mut self, aggregator: PeriodAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_engine(mut self, engine: ScoringEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_bar_limit(mut self, bar_limit: usize) -> Self {
        self.bar_limit = bar_limit;
        self
    }

    /// # Summary
    /// 分析单只股票。
    ///
    /// # Logic
    /// 1. 获取流通股本；失败只告警，换手率随之缺失。
    /// 2. 并发拉取日/周/月三条 K 线序列，任一失败即返回错误。
    /// 3. 逐周期聚合指标；无数据的周期以中性指标包代替并告警。
    /// 4. 逐周期评分、生成命中规则与中文解读。
    /// 5. 按固定权重合成综合评分。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 成功返回完整分析结果，行情拉取失败返回 MarketError。
    pub async fn analyze(&self, symbol: &str) -> Result<StockAnalysis, MarketError> {
        let float_shares = match self.provider.fetch_float_shares(symbol).await {
            Ok(shares) => shares,
            Err(e) => {
                warn!(symbol, error = %e, "failed to fetch float shares, turnover unavailable");
                None
            }
        };

        let fetches = Period::ALL.iter().map(|&period| async move {
            let series = self.provider.fetch_series(symbol, period, self.bar_limit).await?;
            Ok::<(Period, PriceSeries), MarketError>((period, series))
        });
        let series: BTreeMap<Period, PriceSeries> = try_join_all(fetches).await?.into_iter().collect();

        let latest_bar = series.get(&Period::Daily).and_then(|s| s.last().cloned());
        let bundles = self.aggregator.aggregate_periods(&series, float_shares);

        let mut periods = BTreeMap::new();
        for period in Period::ALL {
            let found = bundles.get(&period);
            if found.is_none() {
                warn!(symbol, %period, "no bars for period, scoring neutral indicators");
            }
            let bundle = found.cloned().unwrap_or_else(IndicatorBundle::neutral);
            let score = self.engine.score(&bundle);
            debug!(symbol, %period, score = score.score, "period scored");
            periods.insert(
                period,
                PeriodAnalysis {
                    period,
                    has_data: found.is_some(),
                    hits: self.engine.explain(&bundle),
                    interpretation: interpret(found, period.label()),
                    score,
                    bundle,
                },
            );
        }

        let score_of = |period: Period| {
            periods
                .get(&period)
                .map(|p| p.score)
                .unwrap_or_else(|| ScoreResult::from_score(0))
        };
        let final_result = self.combiner.combine(
            score_of(Period::Daily),
            score_of(Period::Weekly),
            score_of(Period::Monthly),
        );

        info!(
            symbol,
            score = final_result.score,
            star = final_result.star,
            tier = %final_result.tier,
            "stock analyzed"
        );

        Ok(StockAnalysis {
            symbol: symbol.to_string(),
            float_shares,
            latest_bar,
            periods,
            final_result,
        })
    }
}

#[async_trait]
impl StockEvaluator for MultiPeriodAnalyzer {
    /// # Summary
    /// 以综合评分作为评估指标。
    ///
    /// # Logic
    /// 三个周期都没有数据时返回 None；否则把综合分映射为 `ScoreResult`（最低 1 星）。
    async fn evaluate(&self, stock: &StockSnapshot) -> Result<Option<ScoreResult>, MarketError> {
        let analysis = self.analyze(&stock.symbol).await?;
        if !analysis.has_any_data() {
            debug!(symbol = %stock.symbol, "no data in any period, skipping evaluation");
            return Ok(None);
        }
        Ok(Some(ScoreResult::from_score(analysis.final_result.score)))
    }
}
