// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use depreciator::error::GatewayError;
use depreciator::gateway::AssetGateway;
use depreciator::models::{
    AssetId, AssetRecord, AssetSummary, DepreciationSchedule, ModelId, ModelRecord,
    ReportingWindow, ScheduleId,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory inventory that records every lookup. Unknown ids answer 404.
#[derive(Default)]
pub struct FakeGateway {
    pub summaries: Vec<AssetSummary>,
    pub assets: HashMap<AssetId, AssetRecord>,
    pub models: HashMap<ModelId, ModelRecord>,
    pub schedules: HashMap<ScheduleId, DepreciationSchedule>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGateway {
    pub fn schedule(mut self, id: u64, months: &str) -> Self {
        self.schedules.insert(
            ScheduleId(id),
            DepreciationSchedule {
                id: ScheduleId(id),
                name: Some(format!("schedule {id}")),
                months: Some(months.to_string()),
            },
        );
        self
    }

    pub fn model(mut self, id: u64, schedule: Option<u64>) -> Self {
        self.models.insert(
            ModelId(id),
            ModelRecord {
                id: ModelId(id),
                schedule: schedule.map(ScheduleId),
            },
        );
        self
    }

    /// Registers the record and a matching listing row.
    pub fn asset(mut self, record: AssetRecord) -> Self {
        self.summaries.push(AssetSummary {
            id: Some(record.id),
            asset_tag: record.asset_tag.clone(),
            name: record.name.clone(),
        });
        self.assets.insert(record.id, record);
        self
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn log(&self, call: String) -> String {
        self.calls.borrow_mut().push(call.clone());
        call
    }
}

fn not_found(url: String) -> GatewayError {
    GatewayError::Status { url, status: 404 }
}

impl AssetGateway for FakeGateway {
    fn list_assets(&self) -> Result<Vec<AssetSummary>, GatewayError> {
        self.log("hardware".to_string());
        Ok(self.summaries.clone())
    }

    fn asset_detail(&self, id: AssetId) -> Result<AssetRecord, GatewayError> {
        let url = self.log(format!("hardware/{id}"));
        self.assets.get(&id).cloned().ok_or_else(|| not_found(url))
    }

    fn model_detail(&self, id: ModelId) -> Result<ModelRecord, GatewayError> {
        let url = self.log(format!("models/{id}"));
        self.models.get(&id).cloned().ok_or_else(|| not_found(url))
    }

    fn schedule_detail(&self, id: ScheduleId) -> Result<DepreciationSchedule, GatewayError> {
        let url = self.log(format!("depreciations/{id}"));
        self.schedules.get(&id).cloned().ok_or_else(|| not_found(url))
    }
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn window(a: NaiveDate, b: NaiveDate) -> ReportingWindow {
    ReportingWindow::new(a, b).unwrap()
}

pub fn record(id: u64, tag: &str, date: &str, cost: &str) -> AssetRecord {
    AssetRecord {
        id: AssetId(id),
        asset_tag: Some(tag.to_string()),
        purchase_date: Some(date.to_string()),
        purchase_cost: Some(cost.to_string()),
        ..AssetRecord::default()
    }
}
