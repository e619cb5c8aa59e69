use chrono::NaiveDate;
use serde_json::Value;

use crate::models::snapshot::ValuationRow;

/// Value fields in resolution order: the first one present (and not null)
/// is used.
const VALUE_FIELDS: [&str; 3] = ["value_usd", "value", "usd_value"];

/// Flatten one raw snapshot document into valuation rows.
///
/// Accepts `{ "accounts": [...] }` or a bare array of accounts. Each account
/// is `{ account_id, assets: [{ asset_id, value_usd | value | usd_value }] }`.
/// Rows without a usable `account_id` or `asset_id` are dropped; anything
/// that is not the expected shape contributes nothing. Row order follows
/// document order, so later duplicates of a key win during aggregation.
pub fn normalize_snapshot(document: &Value, date: NaiveDate) -> Vec<ValuationRow> {
    let accounts = match document {
        Value::Array(accounts) => accounts.as_slice(),
        Value::Object(map) => map
            .get("accounts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    let mut rows = Vec::new();
    for account in accounts {
        let Some(account_id) = account.get("account_id").and_then(identifier) else {
            continue;
        };
        let Some(assets) = account.get("assets").and_then(Value::as_array) else {
            continue;
        };
        for asset in assets {
            let Some(asset_id) = asset.get("asset_id").and_then(identifier) else {
                continue;
            };
            rows.push(ValuationRow {
                date,
                account_id: account_id.clone(),
                asset_id,
                value_usd: resolve_value(asset),
            });
        }
    }
    rows
}

/// Resolve the USD value of one asset entry.
///
/// Takes the first non-null of `value_usd`, `value`, `usd_value` and coerces
/// it to a number: numbers pass through, numeric strings are parsed, anything
/// else (including NaN/infinite results) becomes 0.
pub fn resolve_value(asset: &Value) -> f64 {
    VALUE_FIELDS
        .iter()
        .find_map(|field| asset.get(*field).filter(|v| !v.is_null()))
        .map(coerce_number)
        .unwrap_or(0.0)
}

fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// Non-empty string ids are used as-is, numeric ids are stringified.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
