// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod export;
pub mod list;
pub mod view;

use crate::config::Config;
use crate::ledger::StripeClient;
use anyhow::Result;

pub fn connect(config: &Config) -> Result<StripeClient> {
    StripeClient::new(config.base_url(), config.api_key()?)
}
