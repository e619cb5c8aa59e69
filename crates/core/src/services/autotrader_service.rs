use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::format::format_signed_percent;
use crate::models::autotrader::{AutotraderMetrics, LeaderboardEntry, TradeCounts};
use crate::models::dataset::{Autotrader, TradingPlan};
use crate::models::timeframe::Timeframe;
use crate::models::trade::TradeHistoryRow;

/// Ranks autotraders and computes their aggregate performance.
///
/// Both operations take `now` explicitly so results are reproducible.
pub struct AutotraderService;

impl AutotraderService {
    pub fn new() -> Self {
        Self
    }

    /// Top `limit` autotraders by absolute pnl percentage.
    ///
    /// `trades` must be newest first (as `TradeService::trade_history`
    /// returns them): the first trade seen for a bot labels its pair.
    pub fn leaderboard(
        &self,
        autotraders: &[Autotrader],
        plans: &[TradingPlan],
        trades: &[TradeHistoryRow],
        quote_asset: &str,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        let plans: HashMap<&str, &TradingPlan> =
            plans.iter().map(|p| (p.plan_id.as_str(), p)).collect();

        let mut latest_trade: HashMap<&str, &TradeHistoryRow> = HashMap::new();
        for trade in trades {
            if let Some(bot_id) = trade.autotrader_id.as_deref() {
                latest_trade.entry(bot_id).or_insert(trade);
            }
        }

        let mut entries: Vec<LeaderboardEntry> = autotraders
            .iter()
            .map(|bot| {
                let plan_name = bot
                    .plan_id
                    .as_deref()
                    .and_then(|id| plans.get(id))
                    .and_then(|p| p.name.clone());
                let name = plan_name
                    .or_else(|| bot.name.clone())
                    .unwrap_or_else(|| "Autotrader".to_string());

                let asset_label = latest_trade
                    .get(bot.autotrader_id.as_str())
                    .map_or("asset", |trade| trade.pair_label());

                LeaderboardEntry {
                    autotrader_id: bot.autotrader_id.clone(),
                    name,
                    pair: format!("{asset_label} / {quote_asset}"),
                    runtime: runtime_label(bot, now),
                    pnl: format_signed_percent(bot.pnl_percent),
                    pnl_percent: bot.pnl_percent,
                }
            })
            .collect();

        // Stable sort keeps input order among equal magnitudes
        entries.sort_by(|a, b| {
            b.pnl_percent
                .abs()
                .partial_cmp(&a.pnl_percent.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries.truncate(limit);
        entries
    }

    /// Aggregate performance over the trades executed within `timeframe`
    /// before `now` (every trade for `ALL`).
    pub fn performance_metrics(
        &self,
        autotraders: &[Autotrader],
        trades: &[TradeHistoryRow],
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> AutotraderMetrics {
        let window_start = timeframe.days().map(|days| now - Duration::days(days));
        let in_window: Vec<&TradeHistoryRow> = trades
            .iter()
            .filter(|t| window_start.map_or(true, |start| t.executed_at >= start))
            .collect();

        let pnl: f64 = in_window.iter().map(|t| t.pnl_usd).sum();
        let volume: f64 = in_window.iter().map(|t| t.value_usd).sum();
        let wins = in_window
            .iter()
            .filter(|t| t.result.as_deref() == Some("win"))
            .count();
        let gross_profit: f64 = in_window
            .iter()
            .map(|t| t.pnl_usd)
            .filter(|p| *p > 0.0)
            .sum();
        let gross_loss: f64 = in_window
            .iter()
            .map(|t| t.pnl_usd)
            .filter(|p| *p < 0.0)
            .map(f64::abs)
            .sum();

        let capital: f64 = autotraders.iter().map(|bot| bot.capital_usd).sum();
        let active = autotraders.iter().filter(|bot| bot.is_running()).count();

        AutotraderMetrics {
            timeframe,
            pnl,
            pnl_pct: if capital != 0.0 { (pnl / capital) * 100.0 } else { 0.0 },
            volume,
            trades: TradeCounts {
                total: in_window.len(),
                wins,
                losses: in_window.len() - wins,
            },
            capital,
            gross_profit,
            gross_loss,
            active,
            stopped: autotraders.len() - active,
        }
    }
}

impl Default for AutotraderService {
    fn default() -> Self {
        Self::new()
    }
}

/// "Running 12d 4h" / "Stopped 0d 0h", measured from `created_at`.
/// Missing or future creation times count as zero runtime.
pub fn runtime_label(bot: &Autotrader, now: DateTime<Utc>) -> String {
    let state = if bot.is_running() { "Running" } else { "Stopped" };
    let elapsed = bot
        .created_at
        .map(|created| (now - created).max(Duration::zero()))
        .unwrap_or_else(Duration::zero);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours() % 24;
    format!("{state} {days}d {hours}h")
}
