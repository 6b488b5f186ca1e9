// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed failures that cross module boundaries.
//!
//! Gateway failures are the only errors that abort a depreciation run.
//! Missing or malformed asset data never surfaces here; it degrades the
//! asset's contribution to zero instead.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} timed out after {secs} seconds")]
    Timeout { url: String, secs: u64 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} reported an error: {message}")]
    Api { url: String, message: String },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl GatewayError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Nothing in this crate retries; the flag lets embedding code pick a policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout { .. } | GatewayError::Transport { .. } => true,
            GatewayError::Status { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Api { .. } | GatewayError::Decode { .. } => false,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            GatewayError::Timeout { url, .. }
            | GatewayError::Transport { url, .. }
            | GatewayError::Status { url, .. }
            | GatewayError::Api { url, .. }
            | GatewayError::Decode { url, .. } => url,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("reporting window starts on {start} but ends earlier on {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}
