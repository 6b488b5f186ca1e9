// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("depreciator")
        .about("Straight-line depreciation for Snipe-IT hardware, with CSV and QIF booking export")
        .version(clap::crate_version!())
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Verbose diagnostics on stderr (RUST_LOG overrides)"),
        )
        .subcommand(
            Command::new("compute")
                .about("Compute depreciation for a reporting period")
                .arg(
                    Arg::new("start-date")
                        .long("start-date")
                        .required(true)
                        .help("First day of the period (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("end-date")
                        .long("end-date")
                        .required(true)
                        .help("Last day of the period (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("Snipe-IT base URL, e.g. https://inventory.example.org"),
                )
                .arg(Arg::new("api-token").long("api-token").help("Snipe-IT API token"))
                .arg(
                    Arg::new("expense-account")
                        .long("expense-account")
                        .help("Debited account, e.g. Expenses:Depreciation"),
                )
                .arg(
                    Arg::new("contra-account")
                        .long("contra-account")
                        .help("Credited account, e.g. Assets:AccumulatedDepreciation"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value("depreciation_summary.csv")
                        .help("Summary file"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"])
                        .help("Summary file format"),
                )
                .arg(
                    Arg::new("qif")
                        .long("qif")
                        .action(ArgAction::SetTrue)
                        .help("Also write a QIF file with the bookings"),
                )
                .arg(
                    Arg::new("qif-output")
                        .long("qif-output")
                        .default_value("depreciation.qif")
                        .help("QIF file (with --qif)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report as JSON instead of a table"),
                )
                .arg(
                    Arg::new("no-cache")
                        .long("no-cache")
                        .action(ArgAction::SetTrue)
                        .help("Fetch models and schedules again for every asset"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_parser(value_parser!(u64))
                        .help("Per-request timeout in seconds"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or create the configuration file")
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("show").about("Print the effective settings"))
                .subcommand(
                    Command::new("init")
                        .about("Write a config file with default settings")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .action(ArgAction::SetTrue)
                                .help("Overwrite an existing file"),
                        ),
                ),
        )
}
