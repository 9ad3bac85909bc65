// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

const TYPES: [&str; 2] = ["income", "expense"];
const VIEWS: [&str; 3] = ["income", "expense", "balance"];

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn view_arg() -> Arg {
    Arg::new("view")
        .long("view")
        .required(true)
        .value_parser(VIEWS)
        .help("income | expense | balance")
}

pub fn build_cli() -> Command {
    Command::new("cashboard")
        .version(crate_version!())
        .about("Terminal dashboard for an income/expense tracking API")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .env("CASHBOARD_API_URL")
                .value_name("URL")
                .help("API base URL, e.g. https://host/api/v1"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("YAML config file"),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Summary cards and recent transactions")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .value_parser(value_parser!(usize))
                        .help("Number of recent transactions to show"),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(output_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("add")
                        .about("Create a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(TYPES)
                                .default_value("expense"),
                        )
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value(crate::forms::DEFAULT_CATEGORY_COLOR)
                                .help("#RRGGBB"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a category (transactions are kept)")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("type").long("type").value_parser(TYPES))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Category id or name"),
                        )
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(TYPES)
                                .default_value("expense"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category id or name"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and category breakdowns")
                .subcommand(output_flags(
                    Command::new("summary")
                        .about("Income, expense and balance")
                        .arg(
                            Arg::new("remote")
                                .long("remote")
                                .action(ArgAction::SetTrue)
                                .help("Compare with /dashboard/summary"),
                        ),
                ))
                .subcommand(output_flags(
                    Command::new("breakdown")
                        .about("Category breakdown for a chart view")
                        .arg(view_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("breakdown")
                        .arg(view_arg())
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the data for inconsistencies"))
}
