// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Booking-ready output for a finished depreciation run.

use crate::models::DepreciationEntry;
use crate::utils::fmt_amount;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::io::Write;

pub fn write_summary_csv<W: Write>(w: W, entries: &[DepreciationEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["Asset Tag", "Depreciation Amount"])?;
    for e in entries {
        wtr.write_record([e.asset_tag.as_str(), fmt_amount(&e.amount).as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summary_json<W: Write>(mut w: W, entries: &[DepreciationEntry]) -> Result<()> {
    let items: Vec<_> = entries
        .iter()
        .map(|e| json!({ "asset_tag": e.asset_tag, "amount": fmt_amount(&e.amount) }))
        .collect();
    serde_json::to_writer_pretty(&mut w, &items)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccounts {
    /// Debited, e.g. `Expenses:Depreciation`.
    pub expense: String,
    /// Credited, e.g. `Assets:AccumulatedDepreciation`.
    pub contra: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub account: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub date: NaiveDate,
    pub payee: String,
    pub splits: [Split; 2],
}

impl LedgerTransaction {
    pub fn balance(&self) -> Decimal {
        self.splits.iter().map(|s| s.amount).sum()
    }
}

/// One zero-sum transaction per entry: expense debited, contra credited.
pub fn ledger_transactions(
    entries: &[DepreciationEntry],
    accounts: &LedgerAccounts,
    date: NaiveDate,
) -> Vec<LedgerTransaction> {
    entries
        .iter()
        .map(|e| LedgerTransaction {
            date,
            payee: format!("Depreciation: {}", e.asset_tag),
            splits: [
                Split {
                    account: accounts.expense.clone(),
                    amount: e.amount,
                },
                Split {
                    account: accounts.contra.clone(),
                    amount: -e.amount,
                },
            ],
        })
        .collect()
}

/// Quicken Interchange Format, bank register with split lines.
pub fn write_qif<W: Write>(mut w: W, txns: &[LedgerTransaction]) -> Result<()> {
    writeln!(w, "!Type:Bank")?;
    for t in txns {
        writeln!(w, "D{}", t.date.format("%m/%d/%Y"))?;
        writeln!(w, "T{}", fmt_amount(&t.balance()))?;
        writeln!(w, "P{}", t.payee)?;
        for s in &t.splits {
            writeln!(w, "S{}", s.account)?;
            writeln!(w, "${}", fmt_amount(&s.amount))?;
        }
        writeln!(w, "^")?;
    }
    w.flush()?;
    Ok(())
}
