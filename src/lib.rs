// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calculator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod gateway;
pub mod models;
pub mod resolver;
pub mod utils;
