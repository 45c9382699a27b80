// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

const PERIODS: [&str; 6] = ["all", "day", "week", "month", "year", "specific"];

fn json_flags(cmd: Command) -> Command {
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

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .value_parser(PERIODS)
            .help("Period filter (default: all)"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32).range(1..=12))
            .help("Month 1-12, with --period specific"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Year, with --period specific"),
    )
}

fn credentials(cmd: Command) -> Command {
    cmd.arg(Arg::new("email").long("email").required(true))
        .arg(Arg::new("password").long("password").required(true))
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Personal income/expense tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database path (default: $POCKETBOOK_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .global(true)
                .help("Display locale for this run: en-US | pt-BR"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("auth")
                .about("Sign up, sign in and out")
                .subcommand(credentials(Command::new("signup").about("Create an account")))
                .subcommand(credentials(Command::new("login").about("Sign in")))
                .subcommand(Command::new("logout").about("Sign out"))
                .subcommand(Command::new("whoami").about("Show the signed-in user")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction dated now")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Non-negative amount; the sign comes from --type"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace description, category, amount or type")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(json_flags(period_args(
                    Command::new("list").about("List transactions grouped by month"),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Balance and monthly summaries")
                .subcommand(json_flags(
                    Command::new("balance").about("Balance over the full history"),
                ))
                .subcommand(json_flags(period_args(
                    Command::new("monthly").about("Income and expenses per month"),
                ))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(period_args(
                    Command::new("transactions")
                        .about("Export transactions (full history unless --period is given)")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Persisted settings")
                .subcommand(
                    Command::new("locale")
                        .about("Show or set the display locale")
                        .arg(Arg::new("value").help("en-US | pt-BR")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored transactions for inconsistencies"))
}
