// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::WindowError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(AssetId);
id_type!(ModelId);
id_type!(ScheduleId);

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// One row of the paginated hardware listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSummary {
    pub id: Option<AssetId>,
    pub asset_tag: Option<String>,
    pub name: Option<String>,
}

impl AssetSummary {
    pub fn display_tag(&self) -> &str {
        non_empty(&self.asset_tag)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Unknown")
    }
}

/// Full hardware record. Purchase fields stay raw; see `engine` for parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRecord {
    pub id: AssetId,
    pub asset_tag: Option<String>,
    pub name: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_cost: Option<String>,
    pub schedule: Option<ScheduleId>,
    pub model: Option<ModelId>,
}

impl AssetRecord {
    pub fn display_tag(&self) -> &str {
        non_empty(&self.asset_tag)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    pub id: ModelId,
    pub schedule: Option<ScheduleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepreciationSchedule {
    pub id: ScheduleId,
    pub name: Option<String>,
    /// Human readable duration such as "36 months".
    pub months: Option<String>,
}

/// A useful life of at least one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UsefulLife(u32);

impl UsefulLife {
    pub fn from_months(months: u32) -> Option<Self> {
        (months > 0).then_some(UsefulLife(months))
    }

    pub fn months(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UsefulLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.0)
    }
}

/// Closed date interval `[start, end]` the run books depreciation for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(ReportingWindow { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inclusive day count.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationEntry {
    pub asset_tag: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepreciationReport {
    pub window: ReportingWindow,
    pub entries: Vec<DepreciationEntry>,
    pub total: Decimal,
    pub assets_seen: usize,
    pub assets_skipped: usize,
}

impl DepreciationReport {
    pub fn empty(window: ReportingWindow) -> Self {
        DepreciationReport {
            window,
            entries: Vec::new(),
            total: Decimal::ZERO,
            assets_seen: 0,
            assets_skipped: 0,
        }
    }

    /// Appends a non-zero amount and keeps `total` equal to the entry sum.
    pub fn record(&mut self, asset_tag: &str, amount: Decimal) {
        if amount.is_zero() {
            return;
        }
        self.total += amount;
        self.entries.push(DepreciationEntry {
            asset_tag: asset_tag.to_string(),
            amount,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_rejects_end_before_start() {
        let err = ReportingWindow::new(d(2024, 2, 1), d(2024, 1, 31)).unwrap_err();
        assert_eq!(
            err,
            WindowError::Inverted {
                start: d(2024, 2, 1),
                end: d(2024, 1, 31)
            }
        );
    }

    #[test]
    fn single_day_window_counts_one_day() {
        let w = ReportingWindow::new(d(2024, 3, 1), d(2024, 3, 1)).unwrap();
        assert_eq!(w.days(), 1);
        assert!(w.contains(d(2024, 3, 1)));
        assert!(!w.contains(d(2024, 3, 2)));
    }

    #[test]
    fn display_tag_falls_back_to_name_then_unknown() {
        let mut s = AssetSummary {
            id: Some(AssetId(1)),
            asset_tag: Some("  ".into()),
            name: Some("Laptop".into()),
        };
        assert_eq!(s.display_tag(), "Laptop");
        s.name = None;
        assert_eq!(s.display_tag(), "Unknown");
        s.asset_tag = Some("A-0001".into());
        assert_eq!(s.display_tag(), "A-0001");
    }

    #[test]
    fn zero_month_life_is_rejected() {
        assert!(UsefulLife::from_months(0).is_none());
        assert_eq!(UsefulLife::from_months(36).unwrap().months(), 36);
    }

    #[test]
    fn report_skips_zero_amounts() {
        let w = ReportingWindow::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let mut r = DepreciationReport::empty(w);
        r.record("A", Decimal::new(1050, 2));
        r.record("B", Decimal::ZERO);
        r.record("C", Decimal::new(25, 1));
        assert_eq!(r.entries.len(), 2);
        assert_eq!(r.total, Decimal::new(1300, 2));
    }
}
