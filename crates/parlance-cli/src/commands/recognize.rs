use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::process::ExitCode;

use serde_json::{Value, json};

use parlance_lib::{
    Intents, ParseError, ParseErrorPrinter, RawIntents, RecognizeOptions, RecognizeResult,
    recognize,
};

use crate::cli::ColorChoice;

/// An intents document that could not be loaded.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("invalid intents document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] ParseError),
}

pub fn run(intents_path: &Path, text: &[String], pretty: bool, color: ColorChoice) -> ExitCode {
    let document = match fs::read_to_string(intents_path) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("error: cannot read {}: {error}", intents_path.display());
            return ExitCode::FAILURE;
        }
    };
    let intents = match load_intents(&document) {
        Ok(intents) => intents,
        Err(LoadError::Template(error)) => {
            eprintln!(
                "{}",
                ParseErrorPrinter::new(&error)
                    .colored(color.should_colorize())
                    .render()
            );
            return ExitCode::FAILURE;
        }
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    if text.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    eprintln!("error: {error}");
                    return ExitCode::FAILURE;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Err(code) = recognize_one(&line, &intents, pretty) {
                return code;
            }
        }
    } else {
        for utterance in text {
            if let Err(code) = recognize_one(utterance, &intents, pretty) {
                return code;
            }
        }
    }
    ExitCode::SUCCESS
}

fn load_intents(document: &str) -> Result<Intents, LoadError> {
    let raw: RawIntents = serde_json::from_str(document)?;
    Ok(Intents::from_raw(raw)?)
}

fn recognize_one(text: &str, intents: &Intents, pretty: bool) -> Result<(), ExitCode> {
    let result = match recognize(text, intents, RecognizeOptions::default()) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("error: {error}");
            return Err(ExitCode::FAILURE);
        }
    };

    let output = recognition_output(text, result.as_ref());
    let rendered = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {error}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// One output line per utterance: the matched intent with its slot values,
/// or a null intent for a miss.
fn recognition_output(text: &str, result: Option<&RecognizeResult<'_>>) -> Value {
    match result {
        Some(result) => {
            let slots: serde_json::Map<String, Value> = result
                .entities
                .iter()
                .map(|(name, entity)| (name.clone(), entity.value.clone()))
                .collect();
            json!({
                "text": text,
                "intent": result.intent.name,
                "slots": slots,
                "response": result.response,
            })
        }
        None => json!({ "text": text, "intent": Value::Null }),
    }
}

#[cfg(test)]
#[path = "recognize_tests.rs"]
mod recognize_tests;
