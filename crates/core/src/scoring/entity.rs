use serde::{Deserialize, Serialize};

/// 评分上限。
pub const MAX_SCORE: u8 = 100;

/// # Summary
/// 推荐等级。
///
/// # Invariants
/// - 断点固定：`>=80` 五星，`>=60` 四星，`>=40` 三星，`>=20` 二星，其余不推荐。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    None,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Tier {
    /// 按固定断点把分数映射为推荐等级。
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Tier::FiveStar,
            60..=79 => Tier::FourStar,
            40..=59 => Tier::ThreeStar,
            20..=39 => Tier::TwoStar,
            _ => Tier::None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::None => "不推荐",
            Tier::TwoStar => "二星推荐",
            Tier::ThreeStar => "三星推荐",
            Tier::FourStar => "四星推荐",
            Tier::FiveStar => "五星推荐",
        };
        write!(f, "{}", label)
    }
}

/// `ceil(score / 20)`，以整数运算完成。
pub fn star_ceiling(score: u8) -> u8 {
    score.div_ceil(20)
}

/// # Summary
/// 单周期评分结果。
///
/// # Invariants
/// - `score ∈ [0, 100]`，`star ∈ [1, 5]`。
/// - 纯粹由一个 `IndicatorBundle` 推导，创建后不再修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub star: u8,
    pub tier: Tier,
}

impl ScoreResult {
    /// # Summary
    /// 由已钳制的分数推导星级与等级。
    ///
    /// # Logic
    /// 1. 分数超过 100 时按 100 处理。
    /// 2. 星级取 `ceil(score/20)`，最低 1 星。
    /// 3. 等级按固定断点映射。
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            score,
            star: star_ceiling(score).max(1),
            tier: Tier::from_score(score),
        }
    }
}

/// # Summary
/// 三个周期的评分明细。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodScores {
    pub daily: ScoreResult,
    pub weekly: ScoreResult,
    pub monthly: ScoreResult,
}

/// # Summary
/// 多周期综合评分结果。
///
/// # Invariants
/// - `star = ceil(score/20)`，不做最低 1 星的兜底，0 分对应 0 星。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub score: u8,
    pub star: u8,
    pub tier: Tier,
    pub details: PeriodScores,
}
