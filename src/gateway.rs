// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read access to the Snipe-IT inventory.
//!
//! The depreciation core only sees [`AssetGateway`]; [`SnipeItClient`] is the
//! HTTP implementation and [`CachedGateway`] memoizes the lookups that many
//! assets share.

use crate::error::GatewayError;
use crate::models::{
    AssetId, AssetRecord, AssetSummary, DepreciationSchedule, ModelId, ModelRecord, ScheduleId,
};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, trace};

pub trait AssetGateway {
    fn list_assets(&self) -> Result<Vec<AssetSummary>, GatewayError>;
    fn asset_detail(&self, id: AssetId) -> Result<AssetRecord, GatewayError>;
    fn model_detail(&self, id: ModelId) -> Result<ModelRecord, GatewayError>;
    fn schedule_detail(&self, id: ScheduleId) -> Result<DepreciationSchedule, GatewayError>;
}

pub struct SnipeItClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_token: String,
    timeout_secs: u64,
    page_size: u32,
}

impl SnipeItClient {
    pub fn new(
        http: reqwest::blocking::Client,
        base_url: &str,
        api_token: &str,
        timeout_secs: u64,
        page_size: u32,
    ) -> Self {
        SnipeItClient {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            timeout_secs,
            page_size: page_size.max(1),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .map_err(|e| self.classify(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body: Value = resp.json().map_err(|e| self.classify(&url, e))?;
        trace!(%url, body = %body, "response body");
        decode_body(&url, body)
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else if let Some(status) = e.status() {
            GatewayError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            GatewayError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            GatewayError::Transport {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

impl AssetGateway for SnipeItClient {
    fn list_assets(&self) -> Result<Vec<AssetSummary>, GatewayError> {
        let limit = self.page_size;
        let mut assets = Vec::new();
        let mut page: u64 = 1;
        loop {
            let offset = assets.len();
            debug!(page, limit, offset, "requesting hardware page");
            let body: HardwarePage = self.get_json(
                "hardware",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )?;
            let received = body.rows.len();
            assets.extend(body.rows.into_iter().map(AssetSummary::from));
            debug!(
                page,
                received,
                total = ?body.total,
                total_pages = ?body.total_pages,
                "received hardware page"
            );
            let progress = PageProgress {
                page,
                limit,
                received,
                collected: assets.len(),
                total: body.total,
                total_pages: body.total_pages,
            };
            if !progress.has_more() {
                break;
            }
            page += 1;
        }
        debug!(count = assets.len(), "fetched asset listing");
        Ok(assets)
    }

    fn asset_detail(&self, id: AssetId) -> Result<AssetRecord, GatewayError> {
        debug!(asset_id = %id, "fetching asset detail");
        let body: HardwareDetail = self.get_json(&format!("hardware/{id}"), &[])?;
        Ok(body.into())
    }

    fn model_detail(&self, id: ModelId) -> Result<ModelRecord, GatewayError> {
        debug!(model_id = %id, "fetching model detail");
        let body: ModelDetail = self.get_json(&format!("models/{id}"), &[])?;
        Ok(body.into())
    }

    fn schedule_detail(&self, id: ScheduleId) -> Result<DepreciationSchedule, GatewayError> {
        debug!(schedule_id = %id, "fetching depreciation schedule");
        let body: ScheduleDetail = self.get_json(&format!("depreciations/{id}"), &[])?;
        Ok(body.into())
    }
}

/// Snipe-IT reports some failures as HTTP 200 with `"status": "error"`.
fn decode_body<T: DeserializeOwned>(url: &str, body: Value) -> Result<T, GatewayError> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = match body.get("messages") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unspecified error".to_string(),
        };
        return Err(GatewayError::Api {
            url: url.to_string(),
            message,
        });
    }
    serde_json::from_value(body).map_err(|e| GatewayError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
struct PageProgress {
    page: u64,
    limit: u32,
    received: usize,
    collected: usize,
    total: Option<u64>,
    total_pages: Option<u64>,
}

impl PageProgress {
    fn has_more(&self) -> bool {
        if self.received == 0 {
            return false;
        }
        // The server may cap `limit`, so a short page only ends the listing
        // when no totals were sent.
        if let Some(total_pages) = self.total_pages {
            return self.page < total_pages;
        }
        match self.total {
            Some(total) => (self.collected as u64) < total,
            None => self.received >= self.limit as usize,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DateField {
    Formatted { date: Option<String> },
    Plain(String),
}

impl DateField {
    fn into_string(self) -> Option<String> {
        match self {
            DateField::Formatted { date } => date,
            DateField::Plain(s) => Some(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HardwareRow {
    id: Option<u64>,
    asset_tag: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HardwarePage {
    #[serde(default)]
    rows: Vec<HardwareRow>,
    total: Option<u64>,
    total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HardwareDetail {
    id: u64,
    asset_tag: Option<String>,
    name: Option<String>,
    purchase_date: Option<DateField>,
    purchase_cost: Option<Value>,
    depreciation: Option<IdRef>,
    model: Option<IdRef>,
}

#[derive(Debug, Deserialize)]
struct ModelDetail {
    id: u64,
    depreciation: Option<IdRef>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDetail {
    id: u64,
    name: Option<String>,
    months: Option<Value>,
}

fn value_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<HardwareRow> for AssetSummary {
    fn from(r: HardwareRow) -> Self {
        AssetSummary {
            id: r.id.map(AssetId),
            asset_tag: r.asset_tag,
            name: r.name,
        }
    }
}

impl From<HardwareDetail> for AssetRecord {
    fn from(d: HardwareDetail) -> Self {
        AssetRecord {
            id: AssetId(d.id),
            asset_tag: d.asset_tag,
            name: d.name,
            purchase_date: d.purchase_date.and_then(DateField::into_string),
            purchase_cost: d.purchase_cost.and_then(value_text),
            schedule: d.depreciation.and_then(|r| r.id).map(ScheduleId),
            model: d.model.and_then(|r| r.id).map(ModelId),
        }
    }
}

impl From<ModelDetail> for ModelRecord {
    fn from(d: ModelDetail) -> Self {
        ModelRecord {
            id: ModelId(d.id),
            schedule: d.depreciation.and_then(|r| r.id).map(ScheduleId),
        }
    }
}

impl From<ScheduleDetail> for DepreciationSchedule {
    fn from(d: ScheduleDetail) -> Self {
        DepreciationSchedule {
            id: ScheduleId(d.id),
            name: d.name,
            months: d.months.and_then(value_text),
        }
    }
}

/// Memoizes model and schedule lookups for the lifetime of one run.
///
/// Asset details and the listing always go to the inner gateway. Only
/// successful responses are cached.
pub struct CachedGateway<G> {
    inner: G,
    models: RefCell<HashMap<ModelId, ModelRecord>>,
    schedules: RefCell<HashMap<ScheduleId, DepreciationSchedule>>,
}

impl<G: AssetGateway> CachedGateway<G> {
    pub fn new(inner: G) -> Self {
        CachedGateway {
            inner,
            models: RefCell::new(HashMap::new()),
            schedules: RefCell::new(HashMap::new()),
        }
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: AssetGateway> AssetGateway for CachedGateway<G> {
    fn list_assets(&self) -> Result<Vec<AssetSummary>, GatewayError> {
        self.inner.list_assets()
    }

    fn asset_detail(&self, id: AssetId) -> Result<AssetRecord, GatewayError> {
        self.inner.asset_detail(id)
    }

    fn model_detail(&self, id: ModelId) -> Result<ModelRecord, GatewayError> {
        if let Some(hit) = self.models.borrow().get(&id) {
            trace!(model_id = %id, "model cache hit");
            return Ok(hit.clone());
        }
        let fetched = self.inner.model_detail(id)?;
        self.models.borrow_mut().insert(id, fetched.clone());
        Ok(fetched)
    }

    fn schedule_detail(&self, id: ScheduleId) -> Result<DepreciationSchedule, GatewayError> {
        if let Some(hit) = self.schedules.borrow().get(&id) {
            trace!(schedule_id = %id, "schedule cache hit");
            return Ok(hit.clone());
        }
        let fetched = self.inner.schedule_detail(id)?;
        self.schedules.borrow_mut().insert(id, fetched.clone());
        Ok(fetched)
    }
}

impl<G: AssetGateway + ?Sized> AssetGateway for &G {
    fn list_assets(&self) -> Result<Vec<AssetSummary>, GatewayError> {
        (**self).list_assets()
    }

    fn asset_detail(&self, id: AssetId) -> Result<AssetRecord, GatewayError> {
        (**self).asset_detail(id)
    }

    fn model_detail(&self, id: ModelId) -> Result<ModelRecord, GatewayError> {
        (**self).model_detail(id)
    }

    fn schedule_detail(&self, id: ScheduleId) -> Result<DepreciationSchedule, GatewayError> {
        (**self).schedule_detail(id)
    }
}
