use crate::indicator::entity::IndicatorParams;
use crate::screener::entity::{WEIGHT_SUM_TOLERANCE, WeightVector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 环境变量覆盖前缀，例如 `STOCKSTAR__TUNER__CONCURRENCY=16`。
pub const ENV_PREFIX: &str = "STOCKSTAR";

/// # Summary
/// 配置加载错误。
#[derive(Error, Debug)]
pub enum ConfigError {
    // 配置源读取或反序列化失败（含权重向量校验失败）
    #[error("Config load error: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub indicator: IndicatorParams,
    pub activity: ActivityConfig,
    pub screen: ScreenConfig,
    pub analysis: AnalysisConfig,
    pub tuner: TunerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    // 本地行情数据目录
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// 活跃度筛选配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    // 活跃度打分权重
    pub weights: WeightVector,
    // 多因子筛选与调参使用的活跃度阈值
    pub threshold: f64,
    // 股票池初筛使用的活跃度阈值
    pub universe_threshold: f64,
    // 活跃度筛选后保留的最大数量
    pub top_n: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            threshold: 0.4,
            universe_threshold: 0.3,
            top_n: 600,
        }
    }
}

/// 多因子筛选配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    // 技术评分入选下限
    pub min_score: u8,
    // 单只股票分析的并发数
    pub concurrency: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            min_score: 60,
            concurrency: 8,
        }
    }
}

/// 单股多周期分析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // 每个周期拉取的 K 线根数
    pub bar_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { bar_limit: 100 }
    }
}

/// 权重自动调参配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    // 每个权重分量的候选取值
    pub candidates: Vec<f64>,
    // 权重之和允许偏离 1 的容差
    pub tolerance: f64,
    // 同时评估的权重组合数
    pub concurrency: usize,
    // 可选的整体耗时上限（秒），按整组权重粒度生效
    pub deadline_secs: Option<u64>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            candidates: vec![0.1, 0.3, 0.5, 0.7, 0.9],
            tolerance: WEIGHT_SUM_TOLERANCE,
            concurrency: 8,
            deadline_secs: None,
        }
    }
}

impl AppConfig {
    /// # Summary
    /// 加载应用配置。
    ///
    /// # Logic
    /// 1. 以各配置段的默认值为基础。
    /// 2. 若提供了配置文件路径，则叠加该文件（格式由扩展名推断）。
    /// 3. 叠加 `STOCKSTAR__段__键` 形式的环境变量覆盖。
    /// 4. 反序列化，权重向量在此步骤完成校验。
    ///
    /// # Arguments
    /// * `path`: 可选的配置文件路径。
    ///
    /// # Returns
    /// 成功返回 AppConfig，失败返回 ConfigError。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tuner.candidates"),
        );

        let config = builder.build()?.try_deserialize::<AppConfig>()?;
        tracing::debug!(
            weights = %config.activity.weights,
            threshold = config.activity.threshold,
            "config loaded"
        );
        Ok(config)
    }
}
