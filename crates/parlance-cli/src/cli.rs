use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Parser)]
#[command(name = "parlance", bin_name = "parlance")]
#[command(about = "Template-based intent recognition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a template sentence and print its expression tree as JSON
    #[command(after_help = r#"EXAMPLES:
  parlance parse 'turn on [the] lights'
  parlance parse 'turn off {area}' --pretty"#)]
    Parse {
        /// Template sentence
        template: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// When to color diagnostics
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorChoice,
    },

    /// Recognize utterances against an intents file
    #[command(after_help = r#"EXAMPLES:
  parlance recognize -i intents.json 'turn on the lights'
  echo 'turn on the lights' | parlance recognize -i intents.json"#)]
    Recognize {
        /// JSON intents document
        #[arg(long, short = 'i', value_name = "FILE")]
        intents: PathBuf,

        /// Utterances to recognize; lines from stdin when empty
        text: Vec<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// When to color diagnostics
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorChoice,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
