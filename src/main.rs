// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use payout_report::{cli, commands, config::Config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init_console(matches.get_flag("verbose"));
    let config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("list", sub)) => commands::list::handle(&config, sub)?,
        Some(("view", sub)) => commands::view::handle(&config, sub)?,
        Some(("export", sub)) => commands::export::handle(&config, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
            std::process::exit(1);
        }
    }
    Ok(())
}
