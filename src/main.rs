use clap::Parser;
use std::process;

use prodiflow::cli;
use prodiflow::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Section(cmd) => cli::section::run(cmd, json_output),
        Commands::Sub(cmd) => cli::subsection::run(cmd, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
        Commands::Day { date } => cli::stats::run_day(&date, json_output),
        Commands::Calendar { year, month } => cli::stats::run_calendar(year, month, json_output),
        Commands::Stats => cli::stats::run_stats(json_output),
        Commands::Rewards => cli::rewards::run(json_output),
    };

    process::exit(exit_code);
}
