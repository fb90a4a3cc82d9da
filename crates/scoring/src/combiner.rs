use std::collections::BTreeMap;
use stockstar_core::common::Period;
use stockstar_core::scoring::entity::{FinalResult, MAX_SCORE, PeriodScores, ScoreResult, Tier, star_ceiling};
use stockstar_core::scoring::error::ScoringError;
use tracing::debug;

// 周期权重，以十分之一为单位：日线 0.5、周线 0.3、月线 0.2
const DAILY_TENTHS: u32 = 5;
const WEEKLY_TENTHS: u32 = 3;
const MONTHLY_TENTHS: u32 = 2;

/// # Summary
/// 多周期综合器：按固定权重合成日/周/月三个周期的评分。
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiPeriodCombiner;

impl MultiPeriodCombiner {
    /// # Summary
    /// 合成综合评分。
    ///
    /// # Logic
    /// 1. `加权和 = 5·日 + 3·周 + 2·月`（单位为十分之一分）。
    /// 2. 四舍五入（.5 向上）得到综合分。
    /// 3. 星级取 `ceil(score/20)`，不做最低 1 星兜底；等级沿用单周期断点。
    pub fn combine(&self, daily: ScoreResult, weekly: ScoreResult, monthly: ScoreResult) -> FinalResult {
        let weighted = DAILY_TENTHS * u32::from(daily.score)
            + WEEKLY_TENTHS * u32::from(weekly.score)
            + MONTHLY_TENTHS * u32::from(monthly.score);
        let rounded = (weighted + 5) / 10;
        let score = u8::try_from(rounded).unwrap_or(MAX_SCORE).min(MAX_SCORE);

        debug!(
            daily = daily.score,
            weekly = weekly.score,
            monthly = monthly.score,
            score,
            "combined period scores"
        );

        FinalResult {
            score,
            star: star_ceiling(score),
            tier: Tier::from_score(score),
            details: PeriodScores { daily, weekly, monthly },
        }
    }

    /// # Summary
    /// 以周期映射为输入的综合入口。
    ///
    /// # Returns
    /// 三个周期齐全时返回综合结果，否则返回 `ScoringError::MissingPeriod`。
    pub fn combine_map(&self, scores: &BTreeMap<Period, ScoreResult>) -> Result<FinalResult, ScoringError> {
        let pick = |period: Period| scores.get(&period).copied().ok_or(ScoringError::MissingPeriod(period));
        Ok(self.combine(
            pick(Period::Daily)?,
            pick(Period::Weekly)?,
            pick(Period::Monthly)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(score: u8) -> ScoreResult {
        ScoreResult::from_score(score)
    }

    #[test]
    fn test_weighted_combination() {
        let result = MultiPeriodCombiner.combine(s(80), s(60), s(40));
        // 40 + 18 + 8
        assert_eq!(result.score, 66);
        assert_eq!(result.star, 4);
        assert_eq!(result.tier, Tier::FourStar);
        assert_eq!(result.details.weekly.score, 60);
    }

    #[test]
    fn test_half_rounds_up() {
        // 0.5·1 = 0.5 → 1
        assert_eq!(MultiPeriodCombiner.combine(s(1), s(0), s(0)).score, 1);
        // 0.3·5 = 1.5 → 2
        assert_eq!(MultiPeriodCombiner.combine(s(0), s(5), s(0)).score, 2);
        // 0.2·2 = 0.4 → 0
        assert_eq!(MultiPeriodCombiner.combine(s(0), s(0), s(2)).score, 0);
    }

    #[test]
    fn test_zero_final_has_zero_stars() {
        let result = MultiPeriodCombiner.combine(s(0), s(0), s(0));
        assert_eq!(result.score, 0);
        assert_eq!(result.star, 0);
        assert_eq!(result.details.daily.star, 1);
    }

    #[test]
    fn test_full_marks() {
        let result = MultiPeriodCombiner.combine(s(100), s(100), s(100));
        assert_eq!(result.score, 100);
        assert_eq!(result.star, 5);
    }

    #[test]
    fn test_combine_map_missing_period() {
        let mut scores = BTreeMap::new();
        scores.insert(Period::Daily, s(50));
        scores.insert(Period::Monthly, s(50));
        assert_eq!(
            MultiPeriodCombiner.combine_map(&scores),
            Err(ScoringError::MissingPeriod(Period::Weekly))
        );

        scores.insert(Period::Weekly, s(50));
        assert_eq!(MultiPeriodCombiner.combine_map(&scores).map(|r| r.score), Ok(50));
    }
}
