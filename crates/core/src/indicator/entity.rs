use serde::{Deserialize, Serialize};

/// # Summary
/// 均线交叉信号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaCross {
    // 金叉：短期均线上穿长期均线
    Golden,
    // 死叉：短期均线下穿长期均线
    Dead,
    // 无交叉
    None,
}

impl std::fmt::Display for MaCross {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaCross::Golden => write!(f, "金叉"),
            MaCross::Dead => write!(f, "死叉"),
            MaCross::None => write!(f, "无交叉"),
        }
    }
}

/// # Summary
/// MACD 指标在最后一根 K 线上的取值。
///
/// # Invariants
/// - `histogram == 2 * (value - signal)`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    // DIF：短期 EMA 与长期 EMA 之差
    pub value: f64,
    // DEA：DIF 的 EMA 信号线
    pub signal: f64,
    // MACD 柱
    pub histogram: f64,
}

/// # Summary
/// 布林带三轨。
///
/// # Invariants
/// - 计算成功时 `lower <= middle <= upper`。
/// - 数据不足时三轨均为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// 中轨是否为有效计算结果（零值三轨代表数据不足）。
    pub fn is_computed(&self) -> bool {
        self.middle != 0.0 && self.middle.is_finite()
    }
}

/// # Summary
/// 成交量趋势分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    StrongUp,
    Up,
    Flat,
    Down,
    StrongDown,
    // 数据不足 30 根
    Insufficient,
}

impl VolumeTrend {
    /// 放量（递增或强烈递增）。
    pub fn is_increasing(self) -> bool {
        matches!(self, VolumeTrend::Up | VolumeTrend::StrongUp)
    }

    /// 缩量（递减或强烈递减）。
    pub fn is_decreasing(self) -> bool {
        matches!(self, VolumeTrend::Down | VolumeTrend::StrongDown)
    }
}

impl std::fmt::Display for VolumeTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VolumeTrend::StrongUp => "强烈递增",
            VolumeTrend::Up => "递增",
            VolumeTrend::Flat => "震荡",
            VolumeTrend::Down => "递减",
            VolumeTrend::StrongDown => "强烈递减",
            VolumeTrend::Insufficient => "数据不足",
        };
        write!(f, "{}", label)
    }
}

/// # Summary
/// KDJ 随机指标的三条线。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjValue {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

impl KdjValue {
    /// 初始值与数据不足时的中性值。
    pub const NEUTRAL: KdjValue = KdjValue {
        k: 50.0,
        d: 50.0,
        j: 50.0,
    };
}

impl Default for KdjValue {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// # Summary
/// 单只股票单个周期的全部技术指标。
///
/// # Invariants
/// - 按 (股票, 周期) 新鲜计算，计算完成后不再修改。
/// - 任一指标数据不足时取其文档约定的中性值，而非报错。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub ma_cross: MaCross,
    pub macd: MacdValue,
    // 0..=100，数据不足时为 0
    pub rsi: f64,
    pub boll: BollingerBands,
    pub obv: f64,
    pub volume_trend: VolumeTrend,
    pub kdj: KdjValue,
    // 近 N 日平均振幅 (%)
    pub amplitude: Option<f64>,
    // 最新一根 K 线的换手率 (%)
    pub turnover_rate: Option<f64>,
}

impl IndicatorBundle {
    /// # Summary
    /// 中性指标包，用于缺失周期的替代输入。
    ///
    /// # Logic
    /// 等同于对空序列逐项取数据不足时的哨兵值。
    pub fn neutral() -> Self {
        Self {
            ma_cross: MaCross::None,
            macd: MacdValue::default(),
            rsi: 0.0,
            boll: BollingerBands::default(),
            obv: 0.0,
            volume_trend: VolumeTrend::Insufficient,
            kdj: KdjValue::NEUTRAL,
            amplitude: None,
            turnover_rate: None,
        }
    }
}

/// # Summary
/// 指标计算参数。
///
/// # Invariants
/// - 默认值与 A 股常用参数一致：MA5/MA20、MACD(12,26,9)、RSI14、BOLL(20,2)、KDJ9、5 日振幅。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub sma_short: usize,
    pub sma_long: usize,
    pub macd_short: usize,
    pub macd_long: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub boll_period: usize,
    pub boll_k: f64,
    pub kdj_period: usize,
    pub amplitude_days: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_short: 5,
            sma_long: 20,
            macd_short: 12,
            macd_long: 26,
            macd_signal: 9,
            rsi_period: 14,
            boll_period: 20,
            boll_k: 2.0,
            kdj_period: 9,
            amplitude_days: 5,
        }
    }
}
