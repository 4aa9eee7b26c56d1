// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod paginate;
pub mod paths;
pub mod render;
pub mod report;
pub mod state;
pub mod utils;
