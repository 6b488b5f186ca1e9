// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::engine::DepreciationRun;
use crate::export::{
    LedgerAccounts, ledger_transactions, write_qif, write_summary_csv, write_summary_json,
};
use crate::gateway::{AssetGateway, CachedGateway, SnipeItClient};
use crate::models::{DepreciationReport, ReportingWindow};
use crate::resolver::ScheduleResolver;
use crate::utils::{fmt_amount, http_client, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeOptions {
    pub window: ReportingWindow,
    pub out: PathBuf,
    pub format: SummaryFormat,
    pub qif: Option<(PathBuf, LedgerAccounts)>,
    pub json: bool,
    pub cache: bool,
}

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let mut settings = settings.clone();
    apply_overrides(&mut settings, m);
    let opts = options_from(&settings, m)?;
    let conn = settings.connection()?;

    let client = SnipeItClient::new(
        http_client(conn.timeout_secs)?,
        &conn.base_url,
        &conn.api_token,
        conn.timeout_secs,
        conn.page_size,
    );
    info!(base_url = %conn.base_url, window = %opts.window, "starting depreciation run");

    let report = if opts.cache {
        run(&CachedGateway::new(&client), opts.window)?
    } else {
        run(&client, opts.window)?
    };

    write_outputs(&report, &opts)?;
    print_report(&report, &opts, &settings.currency)
}

fn run(gateway: &dyn AssetGateway, window: ReportingWindow) -> Result<DepreciationReport> {
    let resolver = ScheduleResolver::default();
    DepreciationRun::new(gateway, &resolver, window)
        .execute()
        .context("Depreciation run aborted")
}

/// Command line values win over environment and config file.
pub fn apply_overrides(settings: &mut Settings, m: &clap::ArgMatches) {
    let flag = |name: &str| {
        m.get_one::<String>(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    if let Some(v) = flag("base-url") {
        settings.base_url = Some(v);
    }
    if let Some(v) = flag("api-token") {
        settings.api_token = Some(v);
    }
    if let Some(v) = flag("expense-account") {
        settings.expense_account = Some(v);
    }
    if let Some(v) = flag("contra-account") {
        settings.contra_account = Some(v);
    }
    if let Some(t) = m.get_one::<u64>("timeout") {
        settings.timeout_secs = *t;
    }
}

pub fn options_from(settings: &Settings, m: &clap::ArgMatches) -> Result<ComputeOptions> {
    let start = parse_date(m.get_one::<String>("start-date").unwrap().trim())
        .context("Invalid --start-date")?;
    let end = parse_date(m.get_one::<String>("end-date").unwrap().trim())
        .context("Invalid --end-date")?;
    let window = ReportingWindow::new(start, end)?;

    let format = match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => SummaryFormat::Json,
        _ => SummaryFormat::Csv,
    };

    let qif = if m.get_flag("qif") {
        let (Some(expense), Some(contra)) = (
            settings.expense_account.clone(),
            settings.contra_account.clone(),
        ) else {
            bail!("--qif needs --expense-account and --contra-account (or both in the config file)");
        };
        let path = PathBuf::from(m.get_one::<String>("qif-output").unwrap().trim());
        Some((path, LedgerAccounts { expense, contra }))
    } else {
        None
    };

    Ok(ComputeOptions {
        window,
        out: PathBuf::from(m.get_one::<String>("out").unwrap().trim()),
        format,
        qif,
        json: m.get_flag("json"),
        cache: !m.get_flag("no-cache"),
    })
}

/// Writes the summary file and, when requested, the QIF bookings dated at the
/// window's last day.
pub fn write_outputs(report: &DepreciationReport, opts: &ComputeOptions) -> Result<()> {
    let file = File::create(&opts.out)
        .with_context(|| format!("Create summary file {}", opts.out.display()))?;
    match opts.format {
        SummaryFormat::Csv => write_summary_csv(BufWriter::new(file), &report.entries)?,
        SummaryFormat::Json => write_summary_json(BufWriter::new(file), &report.entries)?,
    }
    info!(path = %opts.out.display(), "summary written");

    if let Some((path, accounts)) = &opts.qif {
        let txns = ledger_transactions(&report.entries, accounts, report.window.end());
        let file =
            File::create(path).with_context(|| format!("Create QIF file {}", path.display()))?;
        write_qif(BufWriter::new(file), &txns)?;
        info!(path = %path.display(), transactions = txns.len(), "QIF written");
    }
    Ok(())
}

fn print_report(report: &DepreciationReport, opts: &ComputeOptions, currency: &str) -> Result<()> {
    if maybe_print_json(opts.json, report)? {
        return Ok(());
    }
    let rows = report
        .entries
        .iter()
        .map(|e| vec![e.asset_tag.clone(), fmt_amount(&e.amount)])
        .collect();
    println!("{}", pretty_table(&["Asset Tag", "Depreciation"], rows));
    println!(
        "Depreciation summary written to '{}'. Total depreciation: {} {}",
        opts.out.display(),
        fmt_amount(&report.total),
        currency
    );
    if let Some((path, _)) = &opts.qif {
        println!("QIF file generated: '{}'", path.display());
    }
    Ok(())
}
