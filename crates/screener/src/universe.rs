use crate::activity::ActivityScorer;
use stockstar_core::market::error::MarketError;
use stockstar_core::market::port::StockUniverse;
use stockstar_core::screener::entity::StockSnapshot;
use tracing::info;

/// # Summary
/// 判断股票是否属于沪深主板或创业板。
///
/// # Logic
/// 1. 剔除北交所（8 开头）与科创板（688 开头）。
/// 2. 剔除名称含 `ST` 或 `退` 的风险警示、退市股票。
/// 3. 仅保留 0、3、6 开头的代码。
pub fn is_main_board(stock: &StockSnapshot) -> bool {
    let code = stock.symbol.as_str();
    let name = stock.name.as_str();

    if code.starts_with('8') || code.starts_with("688") {
        return false;
    }
    if name.contains("ST") || name.contains('退') {
        return false;
    }
    code.starts_with(['0', '3', '6'])
}

/// # Summary
/// 拉取并初筛股票池。
///
/// # Logic
/// 1. 通过 `StockUniverse` 端口获取全市场快照。
/// 2. 保留主板/创业板股票。
/// 3. 以给定打分器计算活跃度，保留不低于 `threshold` 的股票（不排序、不截断）。
///
/// # Arguments
/// * `source`: 股票池端口。
/// * `scorer`: 活跃度打分器（通常使用配置中的默认权重）。
/// * `threshold`: 初筛活跃度下限，默认 0.3。
pub async fn load_universe(
    source: &dyn StockUniverse,
    scorer: &ActivityScorer,
    threshold: f64,
) -> Result<Vec<StockSnapshot>, MarketError> {
    let listed = source.list_stocks().await?;
    let listed_count = listed.len();

    let board: Vec<StockSnapshot> = listed.into_iter().filter(is_main_board).collect();
    let board_count = board.len();

    let active: Vec<StockSnapshot> = board
        .into_iter()
        .filter(|stock| scorer.score(stock) >= threshold)
        .collect();

    info!(
        listed = listed_count,
        main_board = board_count,
        active = active.len(),
        threshold,
        "stock universe loaded"
    );
    Ok(active)
}
