use crate::scoring::entity::ScoreResult;
use crate::screener::error::WeightError;
use serde::{Deserialize, Serialize};

/// 权重之和允许偏离 1 的默认容差。
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// # Summary
/// 活跃度打分使用的四维权重向量。
///
/// # Invariants
/// - 四个分量均为有限非负数。
/// - `|sum - 1| <= 0.01`（或构造时显式指定的容差）。
/// - 反序列化时同样执行校验，非法配置无法进入系统。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightFields")]
pub struct WeightVector {
    // 量比权重
    vol_ratio: f64,
    // 换手率权重
    turnover: f64,
    // 成交金额权重
    turnover_val: f64,
    // 振幅权重
    amplitude: f64,
}

#[derive(Deserialize)]
struct WeightFields {
    vol_ratio: f64,
    turnover: f64,
    turnover_val: f64,
    amplitude: f64,
}

impl TryFrom<WeightFields> for WeightVector {
    type Error = WeightError;

    fn try_from(w: WeightFields) -> Result<Self, Self::Error> {
        WeightVector::new(w.vol_ratio, w.turnover, w.turnover_val, w.amplitude)
    }
}

impl WeightVector {
    /// # Summary
    /// 使用默认容差 0.01 构造并校验权重向量。
    ///
    /// # Returns
    /// 合法返回权重向量，否则返回 `WeightError`。
    pub fn new(
        vol_ratio: f64,
        turnover: f64,
        turnover_val: f64,
        amplitude: f64,
    ) -> Result<Self, WeightError> {
        Self::with_tolerance([vol_ratio, turnover, turnover_val, amplitude], WEIGHT_SUM_TOLERANCE)
    }

    /// # Summary
    /// 以指定容差构造并校验权重向量。
    ///
    /// # Logic
    /// 1. 逐个检查分量为有限非负数。
    /// 2. 检查分量之和与 1 的偏差不超过容差。
    ///
    /// # Arguments
    /// * `components`: `[量比, 换手率, 成交金额, 振幅]`。
    /// * `tolerance`: 允许的和偏差。
    pub fn with_tolerance(components: [f64; 4], tolerance: f64) -> Result<Self, WeightError> {
        const NAMES: [&str; 4] = ["vol_ratio", "turnover", "turnover_val", "amplitude"];
        for (name, value) in NAMES.iter().zip(components) {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightError::InvalidComponent { name, value });
            }
        }

        let sum: f64 = components.iter().sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(WeightError::InvalidSum { sum, tolerance });
        }

        let [vol_ratio, turnover, turnover_val, amplitude] = components;
        Ok(Self {
            vol_ratio,
            turnover,
            turnover_val,
            amplitude,
        })
    }

    pub fn vol_ratio(&self) -> f64 {
        self.vol_ratio
    }

    pub fn turnover(&self) -> f64 {
        self.turnover
    }

    pub fn turnover_val(&self) -> f64 {
        self.turnover_val
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// `[量比, 换手率, 成交金额, 振幅]`，与 `StockSnapshot::activity_fields` 顺序一致。
    pub fn as_array(&self) -> [f64; 4] {
        [self.vol_ratio, self.turnover, self.turnover_val, self.amplitude]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

impl Default for WeightVector {
    /// 全局默认权重：振幅最重要，其余各占一成。
    fn default() -> Self {
        Self {
            vol_ratio: 0.1,
            turnover: 0.1,
            turnover_val: 0.1,
            amplitude: 0.7,
        }
    }
}

impl std::fmt::Display for WeightVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "volRatio={:.2}, turnover={:.2}, turnoverVal={:.2}, amplitude={:.2}",
            self.vol_ratio, self.turnover, self.turnover_val, self.amplitude
        )
    }
}

/// # Summary
/// 股票池中单只股票的行情快照。
///
/// # Invariants
/// - 由边界适配器从数据源原始字段填充，字段名具有明确语义。
/// - 原始活跃度字段缺失时为 None，打分时按 0 处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    // 股票代码
    pub symbol: String,
    // 股票名称
    pub name: String,
    // 最新价
    #[serde(default)]
    pub price: Option<f64>,
    // 涨跌幅 (%)
    #[serde(default)]
    pub change_pct: Option<f64>,
    // 量比
    #[serde(default)]
    pub volume_ratio: Option<f64>,
    // 换手率 (%)
    #[serde(default)]
    pub turnover: Option<f64>,
    // 成交金额指标
    #[serde(default)]
    pub turnover_value: Option<f64>,
    // 振幅 (%)
    #[serde(default)]
    pub amplitude: Option<f64>,
}

impl StockSnapshot {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price: None,
            change_pct: None,
            volume_ratio: None,
            turnover: None,
            turnover_value: None,
            amplitude: None,
        }
    }

    /// `[量比, 换手率, 成交金额, 振幅]`，缺失字段按 0 处理。
    pub fn activity_fields(&self) -> [f64; 4] {
        [
            self.volume_ratio.unwrap_or(0.0),
            self.turnover.unwrap_or(0.0),
            self.turnover_value.unwrap_or(0.0),
            self.amplitude.unwrap_or(0.0),
        ]
    }
}

/// # Summary
/// 通过活跃度筛选的股票及其活跃度得分。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveStock {
    pub stock: StockSnapshot,
    pub activity_score: f64,
}

/// # Summary
/// 通过多因子筛选（活跃度 + 技术评分）的最终候选。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenedStock {
    pub stock: StockSnapshot,
    pub activity_score: f64,
    pub result: ScoreResult,
}
