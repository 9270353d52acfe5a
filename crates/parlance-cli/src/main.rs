mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            template,
            pretty,
            color,
        } => commands::parse::run(&template, pretty, color),
        Command::Recognize {
            intents,
            text,
            pretty,
            color,
        } => commands::recognize::run(&intents, &text, pretty, color),
    }
}
