// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Resolves how many months an asset depreciates over.
//!
//! Strategies run in order. A strategy that does not apply hands over to the
//! next one; a strategy that applies but fails ends resolution. An asset
//! carrying its own schedule reference therefore never falls back to its
//! model, even when its own schedule is unusable.

use crate::error::GatewayError;
use crate::gateway::AssetGateway;
use crate::models::{AssetRecord, DepreciationSchedule, ModelId, ScheduleId, UsefulLife};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));

/// Month count embedded in a schedule description: "36 months" -> 36.
///
/// Takes the first run of ASCII digits. No digits, or a run too large for
/// `u32`, is a parse failure.
pub fn parse_months(s: &str) -> Option<u32> {
    DIGITS.find(s)?.as_str().parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    NoReference,
    ModelWithoutSchedule(ModelId),
    MissingMonths(ScheduleId),
    MalformedMonths(ScheduleId, String),
    ZeroMonths(ScheduleId),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::NoReference => write!(f, "no depreciation schedule on asset or model"),
            Reason::ModelWithoutSchedule(m) => write!(f, "model {m} has no depreciation schedule"),
            Reason::MissingMonths(s) => write!(f, "schedule {s} has no months"),
            Reason::MalformedMonths(s, raw) => {
                write!(f, "schedule {s} months '{raw}' holds no month count")
            }
            Reason::ZeroMonths(s) => write!(f, "schedule {s} has a zero month useful life"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Resolved(UsefulLife),
    Unresolvable(Reason),
    NotApplicable,
}

pub trait ResolutionStrategy {
    fn name(&self) -> &'static str;
    fn attempt(
        &self,
        asset: &AssetRecord,
        gateway: &dyn AssetGateway,
    ) -> Result<Attempt, GatewayError>;
}

fn life_from_schedule(schedule: &DepreciationSchedule) -> Attempt {
    let Some(raw) = schedule.months.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Attempt::Unresolvable(Reason::MissingMonths(schedule.id));
    };
    match parse_months(raw) {
        None => Attempt::Unresolvable(Reason::MalformedMonths(schedule.id, raw.to_string())),
        Some(n) => match UsefulLife::from_months(n) {
            Some(life) => Attempt::Resolved(life),
            None => Attempt::Unresolvable(Reason::ZeroMonths(schedule.id)),
        },
    }
}

/// The schedule attached directly to the asset.
pub struct OwnSchedule;

impl ResolutionStrategy for OwnSchedule {
    fn name(&self) -> &'static str {
        "asset"
    }

    fn attempt(
        &self,
        asset: &AssetRecord,
        gateway: &dyn AssetGateway,
    ) -> Result<Attempt, GatewayError> {
        let Some(schedule_id) = asset.schedule else {
            return Ok(Attempt::NotApplicable);
        };
        debug!(asset_id = %asset.id, %schedule_id, "asset carries its own schedule");
        let schedule = gateway.schedule_detail(schedule_id)?;
        Ok(life_from_schedule(&schedule))
    }
}

/// The schedule attached to the asset's model.
pub struct ModelSchedule;

impl ResolutionStrategy for ModelSchedule {
    fn name(&self) -> &'static str {
        "model"
    }

    fn attempt(
        &self,
        asset: &AssetRecord,
        gateway: &dyn AssetGateway,
    ) -> Result<Attempt, GatewayError> {
        let Some(model_id) = asset.model else {
            return Ok(Attempt::NotApplicable);
        };
        let model = gateway.model_detail(model_id)?;
        let Some(schedule_id) = model.schedule else {
            return Ok(Attempt::Unresolvable(Reason::ModelWithoutSchedule(model_id)));
        };
        debug!(asset_id = %asset.id, %model_id, %schedule_id, "using model schedule");
        let schedule = gateway.schedule_detail(schedule_id)?;
        Ok(life_from_schedule(&schedule))
    }
}

pub struct ScheduleResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl Default for ScheduleResolver {
    fn default() -> Self {
        ScheduleResolver::new(vec![Box::new(OwnSchedule), Box::new(ModelSchedule)])
    }
}

impl ScheduleResolver {
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        ScheduleResolver { strategies }
    }

    /// Useful life for `asset`, or the reason none could be determined.
    ///
    /// Only gateway failures are errors.
    pub fn resolve(
        &self,
        asset: &AssetRecord,
        gateway: &dyn AssetGateway,
    ) -> Result<Result<UsefulLife, Reason>, GatewayError> {
        for strategy in &self.strategies {
            match strategy.attempt(asset, gateway)? {
                Attempt::NotApplicable => continue,
                Attempt::Resolved(life) => {
                    debug!(asset_id = %asset.id, via = strategy.name(), %life, "resolved useful life");
                    return Ok(Ok(life));
                }
                Attempt::Unresolvable(reason) => {
                    debug!(asset_id = %asset.id, via = strategy.name(), %reason, "useful life unresolvable");
                    return Ok(Err(reason));
                }
            }
        }
        Ok(Err(Reason::NoReference))
    }
}
