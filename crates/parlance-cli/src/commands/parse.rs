use std::process::ExitCode;

use parlance_lib::{ParseErrorPrinter, parse_sentence};

use crate::cli::ColorChoice;

pub fn run(template: &str, pretty: bool, color: ColorChoice) -> ExitCode {
    let sentence = match parse_sentence(template) {
        Ok(sentence) => sentence,
        Err(error) => {
            eprintln!(
                "{}",
                ParseErrorPrinter::new(&error)
                    .colored(color.should_colorize())
                    .render()
            );
            return ExitCode::FAILURE;
        }
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&sentence.expression)
    } else {
        serde_json::to_string(&sentence.expression)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
