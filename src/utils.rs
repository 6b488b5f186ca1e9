// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "depreciator/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/depreciator)"
);

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Purchase dates arrive as `2022-08-01` or `2022-08-01 00:00:00`.
pub fn parse_purchase_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_date(s)
        .ok()
        .or_else(|| s.get(..10).and_then(|head| parse_date(head).ok()))
}

/// Purchase cost with thousands separators removed; negatives are rejected.
pub fn parse_cost(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    parse_decimal(&cleaned)
        .ok()
        .filter(|d| !d.is_sign_negative())
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    if let Some(col) = t.column_mut(headers.len().saturating_sub(1)) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
