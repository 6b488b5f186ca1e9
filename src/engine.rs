// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator;
use crate::error::GatewayError;
use crate::gateway::AssetGateway;
use crate::models::{AssetRecord, AssetSummary, DepreciationReport, ReportingWindow};
use crate::resolver::ScheduleResolver;
use crate::utils::{parse_cost, parse_purchase_date};
use rust_decimal::Decimal;
use tracing::{debug, info, info_span, warn};

/// One pass over the inventory for a fixed reporting window.
///
/// Assets are processed one after another; the first gateway failure aborts
/// the pass and no report is produced.
pub struct DepreciationRun<'a> {
    gateway: &'a dyn AssetGateway,
    resolver: &'a ScheduleResolver,
    window: ReportingWindow,
}

impl<'a> DepreciationRun<'a> {
    pub fn new(
        gateway: &'a dyn AssetGateway,
        resolver: &'a ScheduleResolver,
        window: ReportingWindow,
    ) -> Self {
        DepreciationRun {
            gateway,
            resolver,
            window,
        }
    }

    pub fn window(&self) -> ReportingWindow {
        self.window
    }

    /// Lists the inventory and depreciates every asset in it.
    pub fn execute(&self) -> Result<DepreciationReport, GatewayError> {
        let summaries = self.gateway.list_assets()?;
        info!(assets = summaries.len(), "fetched asset listing");
        self.run(&summaries)
    }

    pub fn run(&self, summaries: &[AssetSummary]) -> Result<DepreciationReport, GatewayError> {
        let mut report = DepreciationReport::empty(self.window);
        for summary in summaries {
            report.assets_seen += 1;
            let tag = summary.display_tag();
            let Some(id) = summary.id else {
                debug!(tag, "skipping asset without id");
                report.assets_skipped += 1;
                continue;
            };
            let detail = self.gateway.asset_detail(id)?;
            let amount = self.asset_amount(&detail)?;
            debug!(tag, %amount, "computed depreciation");
            report.record(tag, amount);
        }
        info!(
            window = %self.window,
            entries = report.entries.len(),
            total = %report.total,
            "depreciation run complete"
        );
        Ok(report)
    }

    /// Amount booked for a single asset. Missing or malformed purchase data
    /// and unresolvable schedules yield zero.
    pub fn asset_amount(&self, asset: &AssetRecord) -> Result<Decimal, GatewayError> {
        let _span = info_span!("asset", id = %asset.id, tag = asset.display_tag()).entered();

        let Some(raw_date) = asset.purchase_date.as_deref() else {
            debug!("no purchase date");
            return Ok(Decimal::ZERO);
        };
        let Some(purchase_date) = parse_purchase_date(raw_date) else {
            warn!(raw = raw_date, "unparsable purchase date");
            return Ok(Decimal::ZERO);
        };
        let Some(raw_cost) = asset.purchase_cost.as_deref().filter(|s| !s.trim().is_empty())
        else {
            debug!("no purchase cost");
            return Ok(Decimal::ZERO);
        };
        let Some(cost) = parse_cost(raw_cost) else {
            warn!(raw = raw_cost, "unparsable purchase cost");
            return Ok(Decimal::ZERO);
        };

        let life = match self.resolver.resolve(asset, self.gateway)? {
            Ok(life) => life,
            Err(reason) => {
                debug!(%reason, "no useful life");
                return Ok(Decimal::ZERO);
            }
        };

        match calculator::prorate(purchase_date, life, &self.window) {
            Some(p) => debug!(
                %purchase_date,
                end_of_life = %p.end_of_life,
                period_start = %p.period_start,
                period_end = %p.period_end,
                life_days = p.life_days,
                period_days = p.period_days,
                "overlap with window"
            ),
            None => debug!(%purchase_date, %life, "no overlap with window"),
        }
        Ok(calculator::compute(purchase_date, cost, life, &self.window))
    }
}
