use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use tradedash_core::errors::CoreError;
use tradedash_core::format::{format_signed_percent, format_usd};
use tradedash_core::models::cache::DatasetCache;
use tradedash_core::models::dataset::{
    Account, AccountAsset, Autotrader, Dataset, Trade, TradeSide,
};
use tradedash_core::models::series::{AssetSummary, EquitySeriesPoint};
use tradedash_core::models::settings::{DataSourceConfig, Settings};
use tradedash_core::models::snapshot::{LatestValueKey, ValuationRow};
use tradedash_core::models::status::SectionStatus;
use tradedash_core::models::timeframe::{Timeframe, TimeframeRange};
use tradedash_core::models::trade::TradeFilter;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Timeframe
// ═══════════════════════════════════════════════════════════════════

mod timeframe {
    use super::*;

    #[test]
    fn parses_every_supported_token() {
        assert_eq!("1D".parse::<Timeframe>().unwrap(), Timeframe::OneDay);
        assert_eq!("7D".parse::<Timeframe>().unwrap(), Timeframe::SevenDays);
        assert_eq!("30D".parse::<Timeframe>().unwrap(), Timeframe::ThirtyDays);
        assert_eq!("90D".parse::<Timeframe>().unwrap(), Timeframe::NinetyDays);
        assert_eq!("ALL".parse::<Timeframe>().unwrap(), Timeframe::All);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("7d".parse::<Timeframe>().unwrap(), Timeframe::SevenDays);
        assert_eq!("all".parse::<Timeframe>().unwrap(), Timeframe::All);
        assert_eq!("All".parse::<Timeframe>().unwrap(), Timeframe::All);
        assert_eq!("90d".parse::<Timeframe>().unwrap(), Timeframe::NinetyDays);
    }

    #[test]
    fn rejects_unsupported_tokens() {
        for token in ["2W", "", "365D", "7", "D7", " 7D"] {
            let err = token.parse::<Timeframe>().unwrap_err();
            match err {
                CoreError::UnsupportedTimeframe(t) => assert_eq!(t, token),
                other => panic!("expected UnsupportedTimeframe, got {other:?}"),
            }
        }
    }

    #[test]
    fn day_counts() {
        assert_eq!(Timeframe::OneDay.days(), Some(1));
        assert_eq!(Timeframe::SevenDays.days(), Some(7));
        assert_eq!(Timeframe::ThirtyDays.days(), Some(30));
        assert_eq!(Timeframe::NinetyDays.days(), Some(90));
        assert_eq!(Timeframe::All.days(), None);
    }

    #[test]
    fn display_matches_token() {
        for tf in Timeframe::ALL_TIMEFRAMES {
            assert_eq!(tf.to_string(), tf.as_str());
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn default_is_seven_days() {
        assert_eq!(Timeframe::default(), Timeframe::SevenDays);
    }

    #[test]
    fn serializes_as_token() {
        assert_eq!(serde_json::to_string(&Timeframe::ThirtyDays).unwrap(), "\"30D\"");
        let tf: Timeframe = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(tf, Timeframe::All);
    }

    #[test]
    fn deserializes_any_case_like_from_str() {
        for token in ["aLl", "7d", "30D", "90d", "1d"] {
            let tf: Timeframe = serde_json::from_str(&format!("\"{token}\"")).unwrap();
            assert_eq!(tf, token.parse::<Timeframe>().unwrap(), "{token}");
        }
        assert!(serde_json::from_str::<Timeframe>("\"2W\"").is_err());

        let s = Settings::from_json(r#"{ "default_timeframe": "aLl" }"#).unwrap();
        assert_eq!(s.default_timeframe, Timeframe::All);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TimeframeRange
// ═══════════════════════════════════════════════════════════════════

mod timeframe_range {
    use super::*;

    fn range(start: NaiveDate, end: NaiveDate) -> TimeframeRange {
        TimeframeRange {
            start_date: Some(start),
            end_date: Some(end),
            timeframe: Timeframe::SevenDays,
        }
    }

    #[test]
    fn empty_range_has_no_bounds() {
        let r = TimeframeRange::empty(Timeframe::All);
        assert!(r.is_empty());
        assert_eq!(r.bounds(), None);
        assert_eq!(r.day_count(), 0);
        assert!(!r.contains(d(2024, 1, 1)));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = range(d(2024, 1, 1), d(2024, 1, 7));
        assert!(r.contains(d(2024, 1, 1)));
        assert!(r.contains(d(2024, 1, 7)));
        assert!(!r.contains(d(2023, 12, 31)));
        assert!(!r.contains(d(2024, 1, 8)));
    }

    #[test]
    fn day_count_includes_both_ends() {
        assert_eq!(range(d(2024, 1, 1), d(2024, 1, 7)).day_count(), 7);
        assert_eq!(range(d(2024, 1, 5), d(2024, 1, 5)).day_count(), 1);
        assert_eq!(range(d(2024, 2, 28), d(2024, 3, 1)).day_count(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ValuationRow / LatestValueKey
// ═══════════════════════════════════════════════════════════════════

mod snapshot_rows {
    use super::*;

    #[test]
    fn key_combines_account_and_asset() {
        let row = ValuationRow::new(d(2024, 1, 1), "acc-1", "btc", 10.0);
        assert_eq!(row.key(), LatestValueKey::new("acc-1", "btc"));
        assert_eq!(row.key().to_string(), "acc-1::btc");
    }

    #[test]
    fn keys_differ_per_account() {
        let a = ValuationRow::new(d(2024, 1, 1), "acc-1", "btc", 10.0);
        let b = ValuationRow::new(d(2024, 1, 1), "acc-2", "btc", 10.0);
        assert_ne!(a.key(), b.key());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetSummary
// ═══════════════════════════════════════════════════════════════════

mod asset_summary {
    use super::*;

    #[test]
    fn empty_summary_is_zero() {
        let s = AssetSummary::empty(Timeframe::NinetyDays);
        assert_eq!(s.total_value_usd, 0.0);
        assert_eq!(s.percentage_change, 0.0);
        assert!(s.series.is_empty());
        assert!(!s.has_data());
        assert_eq!(s.first_date(), None);
        assert_eq!(s.last_date(), None);
    }

    #[test]
    fn first_and_last_dates() {
        let s = AssetSummary {
            timeframe: Timeframe::All,
            total_value_usd: 150.0,
            percentage_change: 50.0,
            series: vec![
                EquitySeriesPoint { date: d(2024, 1, 1), value: 100.0 },
                EquitySeriesPoint { date: d(2024, 1, 2), value: 150.0 },
            ],
        };
        assert!(s.has_data());
        assert_eq!(s.first_date(), Some(d(2024, 1, 1)));
        assert_eq!(s.last_date(), Some(d(2024, 1, 2)));
    }

    #[test]
    fn display_texts() {
        let s = AssetSummary {
            timeframe: Timeframe::SevenDays,
            total_value_usd: 12430.0,
            percentage_change: 3.4,
            series: Vec::new(),
        };
        let display = s.display();
        assert_eq!(display.total_balance, "$12,430");
        assert_eq!(display.change, "+3.4%");
        assert_eq!(display.change_label, "vs last 7d");
    }

    #[test]
    fn display_label_for_all() {
        let display = AssetSummary::empty(Timeframe::All).display();
        assert_eq!(display.change_label, "vs all time");
        assert_eq!(display.total_balance, "$0");
        assert_eq!(display.change, "0.0%");
    }

    #[test]
    fn serializes_timeframe_as_token() {
        let json = serde_json::to_value(AssetSummary::empty(Timeframe::OneDay)).unwrap();
        assert_eq!(json["timeframe"], "1D");
        assert_eq!(json["series"], json!([]));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Datasets
// ═══════════════════════════════════════════════════════════════════

mod datasets {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(Dataset::Accounts.file_name(), "accounts.json");
        assert_eq!(Dataset::AccountAssets.file_name(), "account_assets.json");
        assert_eq!(Dataset::TradeHistory.file_name(), "trade_history.json");
        assert_eq!(Dataset::ALL_DATASETS.len(), 6);
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(Dataset::TradingPlans.to_string(), "trading_plans");
        assert_eq!(
            serde_json::to_string(&Dataset::AccountAssets).unwrap(),
            "\"account_assets\""
        );
    }

    #[test]
    fn account_accepts_aliases() {
        let a: Account = serde_json::from_value(json!({
            "id": "acc-1",
            "provider": "Binance",
            "account_number": "BN-001"
        }))
        .unwrap();
        assert_eq!(a.account_id, "acc-1");
        assert_eq!(a.account_code.as_deref(), Some("BN-001"));
        assert_eq!(a.display_name(), "Binance");
    }

    #[test]
    fn account_display_name_falls_back_to_id() {
        assert_eq!(Account::new("acc-9").display_name(), "acc-9");
        assert_eq!(Account::new("acc-9").with_provider("OKX").display_name(), "OKX");
    }

    #[test]
    fn account_asset_accepts_market_value() {
        let p: AccountAsset = serde_json::from_value(json!({
            "account_id": "acc-1",
            "asset_id": "btc",
            "market_value": 250.5
        }))
        .unwrap();
        assert_eq!(p.usd_value, 250.5);
        assert_eq!(p.quantity, None);
    }

    #[test]
    fn autotrader_running_flag_wins_over_status() {
        let mut bot = Autotrader::new("bot-1", "acc-1");
        bot.status = Some("active".into());
        assert!(bot.is_running());

        bot.is_running = Some(false);
        assert!(!bot.is_running());
    }

    #[test]
    fn autotrader_status_is_case_insensitive() {
        let mut bot = Autotrader::new("bot-1", "acc-1");
        assert!(!bot.is_running());
        bot.status = Some("RUNNING".into());
        assert!(bot.is_running());
        bot.status = Some("paused".into());
        assert!(!bot.is_running());
    }

    #[test]
    fn trade_decodes_uppercase_side_and_price_alias() {
        let t: Trade = serde_json::from_value(json!({
            "id": "t-1",
            "account_id": "acc-1",
            "asset_id": "btc",
            "side": "BUY",
            "executed_at": "2024-01-02T10:00:00Z",
            "price": 100.0,
            "quantity": 2.0
        }))
        .unwrap();
        assert_eq!(t.trade_id, "t-1");
        assert_eq!(t.side, TradeSide::Buy);
        assert_eq!(t.value_usd(), 200.0);
        assert_eq!(t.pnl_usd, 0.0);
        assert_eq!(
            t.executed_at,
            Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn trade_side_display() {
        assert_eq!(TradeSide::Buy.to_string(), "BUY");
        assert_eq!(TradeSide::Sell.to_string(), "SELL");
        let side: TradeSide = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(side, TradeSide::Sell);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TradeFilter
// ═══════════════════════════════════════════════════════════════════

mod trade_filter {
    use super::*;

    #[test]
    fn new_filter_is_empty() {
        assert!(TradeFilter::new().is_empty());
    }

    #[test]
    fn with_limit_is_not_empty() {
        let f = TradeFilter::with_limit(5);
        assert_eq!(f.limit, Some(5));
        assert!(!f.is_empty());
    }

    #[test]
    fn missing_fields_default_when_decoding() {
        let f: TradeFilter = serde_json::from_value(json!({ "side": "sell" })).unwrap();
        assert_eq!(f.side, Some(TradeSide::Sell));
        assert_eq!(f.account_id, None);
        assert_eq!(f.limit, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DatasetCache
// ═══════════════════════════════════════════════════════════════════

mod dataset_cache {
    use super::*;

    #[test]
    fn insert_get_invalidate() {
        let mut cache = DatasetCache::new();
        assert!(cache.is_empty());

        cache.insert(Dataset::Accounts, json!([{ "account_id": "a" }]));
        assert!(cache.contains(Dataset::Accounts));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(Dataset::Accounts).unwrap()[0]["account_id"], "a");

        assert!(cache.invalidate(Dataset::Accounts));
        assert!(!cache.invalidate(Dataset::Accounts));
        assert!(cache.get(Dataset::Accounts).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = DatasetCache::new();
        for dataset in Dataset::ALL_DATASETS {
            cache.insert(dataset, json!([]));
        }
        assert_eq!(cache.len(), 6);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces() {
        let mut cache = DatasetCache::new();
        cache.insert(Dataset::Assets, json!([1]));
        cache.insert(Dataset::Assets, json!([1, 2]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(Dataset::Assets), Some(&json!([1, 2])));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.default_timeframe, Timeframe::SevenDays);
        assert_eq!(s.top_autotraders, 3);
        assert_eq!(s.trade_history_limit, 10);
        assert_eq!(s.quote_asset, "USDT");
        assert!(matches!(s.data_source, DataSourceConfig::Directory { .. }));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_json_takes_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn http_source_from_json() {
        let s = Settings::from_json(
            r#"{
                "data_source": {
                    "kind": "http",
                    "snapshots_url": "https://cdn.example.test/snapshots",
                    "datasets_url": "https://cdn.example.test/data"
                },
                "default_timeframe": "30d",
                "top_autotraders": 5
            }"#,
        )
        .unwrap();
        assert_eq!(s.default_timeframe, Timeframe::ThirtyDays);
        assert_eq!(s.top_autotraders, 5);
        assert_eq!(
            s.data_source,
            DataSourceConfig::Http {
                snapshots_url: "https://cdn.example.test/snapshots".into(),
                datasets_url: "https://cdn.example.test/data".into(),
            }
        );
    }

    #[test]
    fn rejects_zero_limits() {
        let mut s = Settings::default();
        s.top_autotraders = 0;
        assert!(matches!(s.validate(), Err(CoreError::ValidationError(_))));

        let mut s = Settings::default();
        s.trade_history_limit = 0;
        assert!(matches!(s.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn rejects_blank_quote_asset() {
        let mut s = Settings::default();
        s.quote_asset = "  ".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_non_http_urls() {
        let s = Settings {
            data_source: DataSourceConfig::Http {
                snapshots_url: "ftp://example.test".into(),
                datasets_url: "https://example.test".into(),
            },
            ..Settings::default()
        };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("ftp://example.test"));
    }

    #[test]
    fn rejects_unknown_timeframe_in_json() {
        assert!(matches!(
            Settings::from_json(r#"{ "default_timeframe": "2W" }"#),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn json_roundtrip() {
        let s = Settings {
            quote_asset: "USDC".into(),
            ..Settings::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "trade_history_limit": 25 }"#).unwrap();
        let s = Settings::load_from_file(&path).unwrap();
        assert_eq!(s.trade_history_limit, 25);
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load_from_file(dir.path().join("nope.json")),
            Err(CoreError::FileIO(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SectionStatus
// ═══════════════════════════════════════════════════════════════════

mod section_status {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SectionStatus::default(), SectionStatus::Idle);
        assert_eq!(SectionStatus::Idle.placeholder(), Some("Loading..."));
    }

    #[test]
    fn placeholders() {
        assert_eq!(SectionStatus::Loading.placeholder(), Some("Loading..."));
        assert_eq!(SectionStatus::Error.placeholder(), Some("Unable to load"));
        assert_eq!(SectionStatus::Empty.placeholder(), Some("No data available"));
        assert_eq!(SectionStatus::Ready.placeholder(), None);
    }

    #[test]
    fn for_summary() {
        assert_eq!(
            SectionStatus::for_summary(&AssetSummary::empty(Timeframe::All)),
            SectionStatus::Empty
        );
        let s = AssetSummary {
            timeframe: Timeframe::All,
            total_value_usd: 1.0,
            percentage_change: 0.0,
            series: vec![EquitySeriesPoint { date: d(2024, 1, 1), value: 1.0 }],
        };
        assert_eq!(SectionStatus::for_summary(&s), SectionStatus::Ready);
    }

    #[test]
    fn for_items() {
        assert_eq!(SectionStatus::for_items(0), SectionStatus::Empty);
        assert_eq!(SectionStatus::for_items(3), SectionStatus::Ready);
    }

    #[test]
    fn from_result() {
        let ok: Result<Vec<u8>, CoreError> = Ok(vec![1]);
        let empty: Result<Vec<u8>, CoreError> = Ok(vec![]);
        let err: Result<Vec<u8>, CoreError> = Err(CoreError::Network("down".into()));
        assert_eq!(SectionStatus::from_result(&ok, |v| v.is_empty()), SectionStatus::Ready);
        assert_eq!(SectionStatus::from_result(&empty, |v| v.is_empty()), SectionStatus::Empty);
        assert_eq!(SectionStatus::from_result(&err, |v| v.is_empty()), SectionStatus::Error);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(SectionStatus::Ready.to_string(), "ready");
        assert_eq!(serde_json::to_string(&SectionStatus::Error).unwrap(), "\"error\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1000.0), "$1,000");
        assert_eq!(format_usd(12430.0), "$12,430");
        assert_eq!(format_usd(1234567.4), "$1,234,567");
    }

    #[test]
    fn usd_rounds_to_whole_dollars() {
        assert_eq!(format_usd(2.5), "$3");
        assert_eq!(format_usd(999.5), "$1,000");
        assert_eq!(format_usd(12429.49), "$12,429");
    }

    #[test]
    fn usd_negative_amounts() {
        assert_eq!(format_usd(-1234.0), "-$1,234");
        assert_eq!(format_usd(-0.4), "$0");
    }

    #[test]
    fn usd_non_finite_is_zero() {
        assert_eq!(format_usd(f64::NAN), "$0");
        assert_eq!(format_usd(f64::INFINITY), "$0");
    }

    #[test]
    fn signed_percent() {
        assert_eq!(format_signed_percent(3.4), "+3.4%");
        assert_eq!(format_signed_percent(-2.0), "-2.0%");
        assert_eq!(format_signed_percent(50.0), "+50.0%");
    }

    #[test]
    fn signed_percent_near_zero_has_no_sign() {
        assert_eq!(format_signed_percent(0.0), "0.0%");
        assert_eq!(format_signed_percent(0.04), "0.0%");
        assert_eq!(format_signed_percent(-0.04), "0.0%");
        assert_eq!(format_signed_percent(f64::NAN), "0.0%");
    }
}
