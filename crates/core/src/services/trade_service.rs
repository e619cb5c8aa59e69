use std::collections::HashMap;

use crate::models::dataset::{Account, AssetInfo, Autotrader, Trade, TradingPlan};
use crate::models::trade::{TradeFilter, TradeHistoryRow};

/// Reference data a trade is joined with.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeContext<'a> {
    pub accounts: &'a [Account],
    pub assets: &'a [AssetInfo],
    pub autotraders: &'a [Autotrader],
    pub plans: &'a [TradingPlan],
}

/// Builds the trade history table.
pub struct TradeService;

impl TradeService {
    pub fn new() -> Self {
        Self
    }

    /// Join, filter, sort newest first and truncate.
    ///
    /// `market_type` comes from the autotrader's plan, else the account.
    /// `from`/`to` are inclusive. A `limit` of 0 means no limit.
    pub fn trade_history(
        &self,
        trades: &[Trade],
        context: TradeContext<'_>,
        filter: &TradeFilter,
    ) -> Vec<TradeHistoryRow> {
        let assets: HashMap<&str, &AssetInfo> =
            context.assets.iter().map(|a| (a.asset_id.as_str(), a)).collect();
        let accounts: HashMap<&str, &Account> =
            context.accounts.iter().map(|a| (a.account_id.as_str(), a)).collect();
        let autotraders: HashMap<&str, &Autotrader> = context
            .autotraders
            .iter()
            .map(|a| (a.autotrader_id.as_str(), a))
            .collect();
        let plans: HashMap<&str, &TradingPlan> =
            context.plans.iter().map(|p| (p.plan_id.as_str(), p)).collect();

        let mut rows: Vec<TradeHistoryRow> = trades
            .iter()
            .map(|trade| {
                let asset = assets.get(trade.asset_id.as_str());
                let account = accounts.get(trade.account_id.as_str());
                let plan = trade
                    .autotrader_id
                    .as_deref()
                    .and_then(|id| autotraders.get(id))
                    .and_then(|bot| bot.plan_id.as_deref())
                    .and_then(|id| plans.get(id));

                TradeHistoryRow {
                    trade_id: trade.trade_id.clone(),
                    account_id: trade.account_id.clone(),
                    autotrader_id: trade.autotrader_id.clone(),
                    asset_id: trade.asset_id.clone(),
                    asset_symbol: asset.and_then(|a| a.symbol.clone()),
                    asset_name: asset.and_then(|a| a.name.clone()),
                    account_name: account.and_then(|a| a.provider.clone()),
                    account_code: account.and_then(|a| a.account_code.clone()),
                    market_type: plan
                        .and_then(|p| p.market_type.clone())
                        .or_else(|| account.and_then(|a| a.market_type.clone())),
                    trading_plan_name: plan.and_then(|p| p.name.clone()),
                    side: trade.side,
                    result: trade.result.clone(),
                    status: trade.status.clone(),
                    executed_at: trade.executed_at,
                    price_usd: trade.price_usd,
                    quantity: trade.quantity,
                    value_usd: trade.value_usd(),
                    pnl_usd: trade.pnl_usd,
                }
            })
            .filter(|row| matches_filter(row, filter))
            .collect();

        rows.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));

        if let Some(limit) = filter.limit.filter(|&l| l > 0) {
            rows.truncate(limit);
        }
        rows
    }
}

impl Default for TradeService {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(row: &TradeHistoryRow, filter: &TradeFilter) -> bool {
    fn eq_opt(wanted: &Option<String>, actual: Option<&str>) -> bool {
        match wanted.as_deref() {
            None | Some("") => true,
            Some(w) => actual == Some(w),
        }
    }

    eq_opt(&filter.account_id, Some(&row.account_id))
        && eq_opt(&filter.autotrader_id, row.autotrader_id.as_deref())
        && eq_opt(&filter.asset_id, Some(&row.asset_id))
        && filter.side.map_or(true, |side| side == row.side)
        && eq_opt(&filter.result, row.result.as_deref())
        && eq_opt(&filter.market_type, row.market_type.as_deref())
        && filter.from.map_or(true, |from| row.executed_at >= from)
        && filter.to.map_or(true, |to| row.executed_at <= to)
}
