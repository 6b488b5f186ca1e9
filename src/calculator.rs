// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily straight-line depreciation over a closed reporting window.
//!
//! The useful life runs from the purchase date through
//! `purchase + months - 1 day`, both ends inclusive. Cost is spread evenly
//! over every day of that interval, and a window receives the share of
//! days it overlaps.

use crate::models::{ReportingWindow, UsefulLife};
use chrono::{Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// How an asset's life overlaps a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proration {
    pub end_of_life: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub life_days: i64,
    pub period_days: i64,
}

/// Last day of the useful life. Month addition clamps to the target month's
/// length, so 2020-01-31 plus one month is 2020-02-29.
pub fn end_of_life(purchase_date: NaiveDate, life: UsefulLife) -> Option<NaiveDate> {
    purchase_date
        .checked_add_months(Months::new(life.months()))?
        .checked_sub_days(Days::new(1))
}

/// Overlap of the useful life with `window`, or `None` when they do not meet.
pub fn prorate(
    purchase_date: NaiveDate,
    life: UsefulLife,
    window: &ReportingWindow,
) -> Option<Proration> {
    let end_of_life = end_of_life(purchase_date, life)?;
    if end_of_life < window.start() {
        return None;
    }
    let period_start = purchase_date.max(window.start());
    let period_end = end_of_life.min(window.end());
    if period_end < period_start {
        return None;
    }
    Some(Proration {
        end_of_life,
        period_start,
        period_end,
        life_days: (end_of_life - purchase_date).num_days() + 1,
        period_days: (period_end - period_start).num_days() + 1,
    })
}

/// Depreciation booked inside `window`, rounded to the cent.
///
/// Pure and infallible: any window without overlap, or a life that cannot
/// be placed on the calendar, yields zero.
pub fn compute(
    purchase_date: NaiveDate,
    cost: Decimal,
    life: UsefulLife,
    window: &ReportingWindow,
) -> Decimal {
    let Some(p) = prorate(purchase_date, life, window) else {
        return Decimal::ZERO;
    };
    let daily_rate = cost / Decimal::from(p.life_days);
    round_cents(daily_rate * Decimal::from(p.period_days))
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
