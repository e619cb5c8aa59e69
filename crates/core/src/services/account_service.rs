use std::collections::HashMap;

use crate::format::format_usd;
use crate::models::analytics::{
    AccountDistribution, AccountSummary, DistributionEntry, HoldingSummary,
};
use crate::models::autotrader::AccountAutotrader;
use crate::models::dataset::{Account, AccountAsset, AssetInfo, Autotrader, TradingPlan};

/// Derives per-account views from the account fixtures.
pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        Self
    }

    /// One summary per account, in input order.
    ///
    /// Holdings are joined with asset metadata and sorted by USD value
    /// (largest first). Allocation is each holding's share of the account
    /// total, 0 for an account worth nothing.
    pub fn accounts_with_summary(
        &self,
        accounts: &[Account],
        account_assets: &[AccountAsset],
        assets: &[AssetInfo],
        autotraders: &[Autotrader],
    ) -> Vec<AccountSummary> {
        let assets_by_id: HashMap<&str, &AssetInfo> =
            assets.iter().map(|a| (a.asset_id.as_str(), a)).collect();

        let mut positions_by_account: HashMap<&str, Vec<&AccountAsset>> = HashMap::new();
        for position in account_assets {
            positions_by_account
                .entry(position.account_id.as_str())
                .or_default()
                .push(position);
        }

        let mut bots_by_account: HashMap<&str, usize> = HashMap::new();
        for bot in autotraders {
            *bots_by_account.entry(bot.account_id.as_str()).or_insert(0) += 1;
        }

        accounts
            .iter()
            .map(|account| {
                let positions = positions_by_account
                    .get(account.account_id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let total_value_usd: f64 = positions.iter().map(|p| p.usd_value).sum();

                let mut holdings: Vec<HoldingSummary> = positions
                    .iter()
                    .map(|position| {
                        let info = assets_by_id.get(position.asset_id.as_str());
                        HoldingSummary {
                            asset_id: position.asset_id.clone(),
                            symbol: info.and_then(|a| a.symbol.clone()),
                            name: info.and_then(|a| a.name.clone()),
                            quantity: position.quantity,
                            usd_value: position.usd_value,
                            allocation_pct: share_pct(position.usd_value, total_value_usd),
                        }
                    })
                    .collect();
                holdings.sort_by(|a, b| {
                    b.usd_value
                        .partial_cmp(&a.usd_value)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                AccountSummary {
                    account: account.clone(),
                    total_value_usd,
                    holdings,
                    autotrader_count: bots_by_account
                        .get(account.account_id.as_str())
                        .copied()
                        .unwrap_or(0),
                }
            })
            .collect()
    }

    /// The autotraders attached to `account_id`, in input order, each joined
    /// with its trading plan's name and market type.
    pub fn autotraders_by_account(
        &self,
        account_id: &str,
        autotraders: &[Autotrader],
        plans: &[TradingPlan],
    ) -> Vec<AccountAutotrader> {
        let plans: HashMap<&str, &TradingPlan> =
            plans.iter().map(|p| (p.plan_id.as_str(), p)).collect();

        autotraders
            .iter()
            .filter(|bot| bot.account_id == account_id)
            .map(|bot| {
                let plan = bot
                    .plan_id
                    .as_deref()
                    .and_then(|id| plans.get(id))
                    .map(|p| (*p).clone());
                AccountAutotrader {
                    autotrader: bot.clone(),
                    trading_plan_name: plan.as_ref().and_then(|p| p.name.clone()),
                    market_type: plan.as_ref().and_then(|p| p.market_type.clone()),
                    trading_plan: plan,
                }
            })
            .collect()
    }

    /// Totals grouped by provider (falling back to the account id),
    /// largest first.
    pub fn account_distribution(&self, summaries: &[AccountSummary]) -> AccountDistribution {
        // Vec instead of a map keeps first-seen order for equal amounts
        let mut totals: Vec<(String, f64)> = Vec::new();
        for summary in summaries {
            let name = summary.account.display_name();
            match totals.iter_mut().find(|(n, _)| n == name) {
                Some((_, amount)) => *amount += summary.total_value_usd,
                None => totals.push((name.to_string(), summary.total_value_usd)),
            }
        }
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let total_value_usd: f64 = totals.iter().map(|(_, amount)| amount).sum();
        let entries = totals
            .into_iter()
            .map(|(name, amount)| DistributionEntry {
                name,
                amount,
                value: format_usd(amount),
                share_pct: share_pct(amount, total_value_usd),
            })
            .collect();

        AccountDistribution {
            total_value_usd,
            total: format_usd(total_value_usd),
            entries,
        }
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

fn share_pct(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        (part / total) * 100.0
    } else {
        0.0
    }
}
