// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

// Missing payout IDs are reported by the handlers, which exit with 1.
pub fn build_cli() -> Command {
    Command::new("payout-report")
        .about("Export Stripe payouts and their transactions as HTML, PDF or JSON reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print progress details"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to config.json"),
        )
        .subcommand(
            Command::new("list")
                .about("List payouts")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of payouts"),
                )
                .arg(
                    Arg::new("since")
                        .long("since")
                        .help("Only payouts created on or after YYYY-MM-DD"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("view")
                .about("Show a payout and its transactions")
                .arg(Arg::new("id").help("Payout ID")),
        )
        .subcommand(
            Command::new("export")
                .about("Export payout report(s)")
                .arg(
                    Arg::new("ids")
                        .num_args(0..)
                        .help("Payout ID(s) to export"),
                )
                .arg(
                    Arg::new("lastid")
                        .long("lastid")
                        .num_args(0..=1)
                        .default_missing_value("")
                        .help("Export every payout created after this ID (default: last recorded)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("html, pdf or json (default from config, else html)"),
                )
                .arg(
                    Arg::new("outdir")
                        .long("outdir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory"),
                )
                .arg(
                    Arg::new("log")
                        .long("log")
                        .value_parser(value_parser!(PathBuf))
                        .help("Log file (default: <logDir>/export-YYYY-MM-DD.log)"),
                ),
        )
}
