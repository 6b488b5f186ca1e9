// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeGateway, d, record, window};
use depreciator::engine::DepreciationRun;
use depreciator::error::GatewayError;
use depreciator::gateway::CachedGateway;
use depreciator::models::{AssetId, AssetSummary, ModelId, ScheduleId};
use depreciator::resolver::ScheduleResolver;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn direct_schedule_over_leap_year() {
    let mut asset = record(1, "Test Asset", "2020-01-01", "1200.00");
    asset.schedule = Some(ScheduleId(999));
    let gw = FakeGateway::default().schedule(999, "36 months");
    let resolver = ScheduleResolver::default();
    let run = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)));

    assert_eq!(run.asset_amount(&asset).unwrap(), dec("400.73"));
}

#[test]
fn model_fallback_matches_direct_attachment() {
    let w = window(d(2021, 6, 1), d(2021, 12, 31));
    let resolver = ScheduleResolver::default();

    let mut via_model = record(2, "Model Asset", "2021-06-01", "3650.00");
    via_model.model = Some(ModelId(42));
    let gw = FakeGateway::default().model(42, Some(100)).schedule(100, "36 months");
    let a = DepreciationRun::new(&gw, &resolver, w).asset_amount(&via_model).unwrap();

    let mut direct = record(2, "Model Asset", "2021-06-01", "3650.00");
    direct.schedule = Some(ScheduleId(100));
    let b = DepreciationRun::new(&gw, &resolver, w).asset_amount(&direct).unwrap();

    assert_eq!(a, dec("712.68"));
    assert_eq!(a, b);
}

#[test]
fn malformed_asset_schedule_yields_zero_despite_model() {
    let mut asset = record(3, "Broken", "2021-06-01", "3650.00");
    asset.schedule = Some(ScheduleId(1));
    asset.model = Some(ModelId(42));
    let gw = FakeGateway::default()
        .schedule(1, "N/A")
        .model(42, Some(100))
        .schedule(100, "36 months");
    let resolver = ScheduleResolver::default();
    let run = DepreciationRun::new(&gw, &resolver, window(d(2021, 6, 1), d(2021, 12, 31)));

    assert_eq!(run.asset_amount(&asset).unwrap(), Decimal::ZERO);
}

#[test]
fn missing_or_bad_purchase_data_skips_resolution() {
    let gw = FakeGateway::default().schedule(1, "36 months");
    let resolver = ScheduleResolver::default();
    let run = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)));

    let mut no_date = record(1, "A", "2020-01-01", "100");
    no_date.purchase_date = None;
    let mut bad_date = record(2, "B", "01/01/2020", "100");
    bad_date.schedule = Some(ScheduleId(1));
    let mut no_cost = record(3, "C", "2020-01-01", "");
    no_cost.schedule = Some(ScheduleId(1));
    let mut bad_cost = record(4, "D", "2020-01-01", "twelve");
    bad_cost.schedule = Some(ScheduleId(1));

    for asset in [no_date, bad_date, no_cost, bad_cost] {
        assert_eq!(run.asset_amount(&asset).unwrap(), Decimal::ZERO);
    }
    assert_eq!(gw.count("depreciations/"), 0);
}

#[test]
fn formatted_cost_and_datetime_purchase_date_are_accepted() {
    let mut asset = record(5, "NB-5", "2020-01-01 00:00:00", "1,200.00");
    asset.schedule = Some(ScheduleId(1));
    let gw = FakeGateway::default().schedule(1, "36 months");
    let resolver = ScheduleResolver::default();
    let run = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)));
    assert_eq!(run.asset_amount(&asset).unwrap(), dec("400.73"));
}

#[test]
fn batch_total_is_sum_of_reported_entries() {
    let mut a = record(1, "A", "2020-01-01", "1200.00");
    a.schedule = Some(ScheduleId(1));
    // fully depreciated long before the window
    let mut b = record(2, "B", "2010-01-01", "500.00");
    b.schedule = Some(ScheduleId(1));
    let mut c = record(3, "C", "2020-07-01", "730.00");
    c.model = Some(ModelId(8));
    let no_schedule = record(4, "D", "2020-01-01", "99.00");

    let gw = FakeGateway::default()
        .schedule(1, "36 months")
        .schedule(2, "24 months")
        .model(8, Some(2))
        .asset(a)
        .asset(b)
        .asset(c)
        .asset(no_schedule);
    let resolver = ScheduleResolver::default();
    let report = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)))
        .execute()
        .unwrap();

    let tags: Vec<&str> = report.entries.iter().map(|e| e.asset_tag.as_str()).collect();
    assert_eq!(tags, ["A", "C"]);
    assert_eq!(report.assets_seen, 4);
    assert_eq!(gw.count("hardware/"), 4);
    let sum: Decimal = report.entries.iter().map(|e| e.amount).sum();
    assert_eq!(report.total, sum);
    // C: 730 over 730 days, 184 of them in 2020
    assert_eq!(report.entries[1].amount, dec("184.00"));
    assert_eq!(report.total, dec("584.73"));
}

#[test]
fn listing_rows_without_id_are_skipped() {
    let mut a = record(1, "A", "2020-01-01", "1200.00");
    a.schedule = Some(ScheduleId(1));
    let gw = FakeGateway::default().schedule(1, "36 months").asset(a);
    let resolver = ScheduleResolver::default();
    let run = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)));

    let listing = vec![
        AssetSummary {
            id: None,
            asset_tag: Some("ghost".into()),
            name: None,
        },
        gw.summaries[0].clone(),
    ];
    let report = run.run(&listing).unwrap();
    assert_eq!(report.assets_seen, 2);
    assert_eq!(report.assets_skipped, 1);
    assert_eq!(report.entries.len(), 1);
}

#[test]
fn entry_uses_listing_tag_with_name_fallback() {
    let mut a = record(1, "", "2020-01-01", "1200.00");
    a.name = Some("Office Printer".into());
    a.schedule = Some(ScheduleId(1));
    let gw = FakeGateway::default().schedule(1, "36 months").asset(a);
    let resolver = ScheduleResolver::default();
    let report = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)))
        .execute()
        .unwrap();
    assert_eq!(report.entries[0].asset_tag, "Office Printer");
}

#[test]
fn failing_fetch_aborts_the_whole_run() {
    let mut a = record(1, "A", "2020-01-01", "1200.00");
    a.schedule = Some(ScheduleId(1));
    let mut broken = record(2, "B", "2020-01-01", "1200.00");
    broken.schedule = Some(ScheduleId(77));
    let gw = FakeGateway::default().schedule(1, "36 months").asset(a).asset(broken);
    let resolver = ScheduleResolver::default();
    let err = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31)))
        .execute()
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[test]
fn missing_asset_detail_aborts_the_run() {
    let gw = FakeGateway {
        summaries: vec![AssetSummary {
            id: Some(AssetId(5)),
            asset_tag: Some("E".into()),
            name: None,
        }],
        ..FakeGateway::default()
    };
    let resolver = ScheduleResolver::default();
    let res = DepreciationRun::new(&gw, &resolver, window(d(2020, 1, 1), d(2020, 12, 31))).execute();
    assert!(res.is_err());
}

#[test]
fn cache_fetches_shared_schedule_once() {
    let mut gw = FakeGateway::default().schedule(1, "36 months").model(8, Some(1));
    for id in 1..=5 {
        let mut r = record(id, &format!("A{id}"), "2020-01-01", "100");
        r.model = Some(ModelId(8));
        gw = gw.asset(r);
    }
    let resolver = ScheduleResolver::default();
    let w = window(d(2020, 1, 1), d(2020, 12, 31));

    let cached = CachedGateway::new(&gw);
    let with_cache = DepreciationRun::new(&cached, &resolver, w).execute().unwrap();
    assert_eq!(gw.count("models/"), 1);
    assert_eq!(gw.count("depreciations/"), 1);
    assert_eq!(gw.count("hardware/"), 5);

    gw.calls.borrow_mut().clear();
    let without = DepreciationRun::new(&gw, &resolver, w).execute().unwrap();
    assert_eq!(gw.count("depreciations/"), 5);
    assert_eq!(with_cache, without);
}
