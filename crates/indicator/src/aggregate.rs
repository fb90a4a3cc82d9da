use crate::{amplitude, bollinger, kdj, ma_cross, macd, obv, rsi, sma, turnover_rate, volume_trend};
use std::collections::BTreeMap;
use stockstar_core::common::Period;
use stockstar_core::indicator::entity::{IndicatorBundle, IndicatorParams};
use stockstar_core::market::entity::PriceSeries;
use tracing::debug;

/// # Summary
/// 单周期指标聚合器：把一条 K 线序列上的全部指标打包成 `IndicatorBundle`。
///
/// # Invariants
/// - 无内部可变状态，可在多个任务间共享。
/// - 某个指标数据不足只会让该指标取哨兵值，不会中断聚合。
#[derive(Debug, Clone, Default)]
pub struct PeriodAggregator {
    params: IndicatorParams,
}

impl PeriodAggregator {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// # Summary
    /// 计算单个周期的指标包。
    ///
    /// # Logic
    /// 1. 空序列返回 None（该周期无数据）。
    /// 2. 以收盘价计算 MA5/MA20 交叉、MACD、RSI、布林带。
    /// 3. 以完整 K 线计算 OBV、量能趋势、KDJ、振幅与换手率。
    ///
    /// # Arguments
    /// * `series`: 该周期的 K 线序列。
    /// * `float_shares`: 流通股本（股），用于换手率。
    ///
    /// # Returns
    /// 有数据时返回指标包。
    pub fn aggregate(&self, series: &PriceSeries, float_shares: Option<f64>) -> Option<IndicatorBundle> {
        if series.is_empty() {
            return None;
        }
        self.log_short_windows(series.len());

        let p = &self.params;
        let bars = series.bars();
        let closes = series.closes();

        let short_sma = sma(&closes, p.sma_short);
        let long_sma = sma(&closes, p.sma_long);

        Some(IndicatorBundle {
            ma_cross: ma_cross(&short_sma, &long_sma),
            macd: macd(&closes, p.macd_short, p.macd_long, p.macd_signal),
            rsi: rsi(&closes, p.rsi_period),
            boll: bollinger(&closes, p.boll_period, p.boll_k),
            obv: obv(bars),
            volume_trend: volume_trend(bars),
            kdj: kdj(bars, p.kdj_period),
            amplitude: amplitude(bars, p.amplitude_days),
            turnover_rate: turnover_rate(bars, float_shares),
        })
    }

    /// # Summary
    /// 多周期指标计算入口。
    ///
    /// # Logic
    /// 逐周期调用 `aggregate`，无数据的周期不出现在结果中。
    ///
    /// # Arguments
    /// * `series`: 周期到 K 线序列的映射。
    /// * `float_shares`: 流通股本（股）。
    pub fn aggregate_periods(
        &self,
        series: &BTreeMap<Period, PriceSeries>,
        float_shares: Option<f64>,
    ) -> BTreeMap<Period, IndicatorBundle> {
        series
            .iter()
            .filter_map(|(period, s)| {
                let bundle = self.aggregate(s, float_shares);
                if bundle.is_none() {
                    debug!(%period, "no bars for period, skipping indicators");
                }
                bundle.map(|b| (*period, b))
            })
            .collect()
    }

    fn log_short_windows(&self, len: usize) {
        let p = &self.params;
        let windows = [
            ("ma_long", p.sma_long),
            ("macd", p.macd_long),
            ("rsi", p.rsi_period + 1),
            ("boll", p.boll_period),
            ("kdj", p.kdj_period),
            ("volume_trend", crate::volume::TREND_WINDOW),
            ("amplitude", p.amplitude_days + 1),
        ];
        for (name, required) in windows {
            if len < required {
                debug!(indicator = name, bars = len, required, "insufficient bars, using neutral value");
            }
        }
    }
}
