use std::{
    fs,
    path::{Path, PathBuf},
};
use anyhow::{Context, Result};
use clap::Parser;
use derive_builder::Builder;
use serde_json::Value;
use thiserror::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(help="Value to count: a JSON string, array or object (raw text with --text)")]
    input: String,
    #[arg(long, help="Count the characters of the input instead of parsing it as JSON")]
    text: bool,
    #[arg(long, help="Read the input from the file at the given path")]
    file: bool,
    #[arg(short, long, help="Add the counts of a JSON string, array or object [repeatable]")]
    update: Vec<String>,
    #[arg(short, long, help="Subtract the counts of a JSON string, array or object [repeatable]")]
    subtract: Vec<String>,
    #[arg(long, help="Report only the N most common elements")]
    top: Option<usize>,
    #[arg(short, long, help="Output file [default: stdout]")]
    output: Option<String>,
    #[arg(long, help="If output file already exists, overwrite without creating backup")]
    overwrite: bool,
    #[arg(short, long, action = clap::ArgAction::Count,
        help="Print summary and/or operand details [repeat for more verbose, max 2]")]
    verbose: u8,
}

#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Settings {
    input: Value,
    #[builder(default)] updates: Vec<Value>,
    #[builder(default)] subtractions: Vec<Value>,
    #[builder(default)] top: Option<usize>,
    #[builder(default)] verbose: u8,
    #[builder(default)] output_file: Option<PathBuf>,
    #[builder(default="false")] overwrite: bool,
    #[builder(default="false")] silent: bool,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.top == Some(0) {
            return Err(SettingsError::InvalidTop.into());
        }
        let raw_input = if args.file {
            fs::read_to_string(&args.input)
                .with_context(|| format!("Should be able to read input file {}", args.input))?
        } else {
            args.input
        };
        let input = if args.text {
            Value::String(raw_input)
        } else {
            serde_json::from_str(&raw_input).context("Input should be valid JSON (use --text for raw text)")?
        };
        let settings = Self {
            input,
            updates: parse_operands(&args.update).context("--update should be valid JSON")?,
            subtractions: parse_operands(&args.subtract).context("--subtract should be valid JSON")?,
            top: args.top,
            verbose: args.verbose,
            output_file: args.output.map(PathBuf::from),
            overwrite: args.overwrite,
            silent: false,
        };
        Ok(settings)
    }

    #[inline]
    pub fn input(&self) -> &Value {
        &self.input
    }

    #[inline]
    pub fn updates(&self) -> &[Value] {
        &self.updates
    }

    #[inline]
    pub fn subtractions(&self) -> &[Value] {
        &self.subtractions
    }

    #[inline]
    pub fn top(&self) -> Option<usize> {
        self.top
    }

    #[inline]
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    #[inline]
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    #[inline]
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    #[inline]
    pub fn silent(&self) -> bool {
        self.silent
    }
}

fn parse_operands(operands: &[String]) -> Result<Vec<Value>, serde_json::Error> {
    operands.iter().map(|operand| serde_json::from_str(operand)).collect()
}

#[derive(Copy, Clone, Debug, Error)]
pub enum SettingsError {
    #[error("--top must be at least 1")]
    InvalidTop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(input: &str) -> Args {
        Args {
            input: input.to_string(),
            text: false,
            file: false,
            update: Vec::new(),
            subtract: Vec::new(),
            top: None,
            output: None,
            overwrite: false,
            verbose: 0,
        }
    }

    #[test]
    fn from_args_example() {
        let args = Args {
            update: vec![r#"["a","b","c"]"#.to_string(), r#"{"z": 2}"#.to_string()],
            subtract: vec![r#""ab""#.to_string()],
            top: Some(3),
            output: Some("test/path/to/file.json".to_string()),
            overwrite: true,
            verbose: 2,
            ..args(r#""abbcccddddeeeee""#)
        };
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.input, json!("abbcccddddeeeee"));
        assert_eq!(settings.updates, vec![json!(["a", "b", "c"]), json!({"z": 2})]);
        assert_eq!(settings.subtractions, vec![json!("ab")]);
        assert_eq!(settings.top, Some(3));
        assert_eq!(settings.verbose, 2);
        assert_eq!(settings.output_file, Some(PathBuf::from("test/path/to/file.json")));
        assert!(settings.overwrite);
        assert!(!settings.silent);
    }

    #[test]
    fn text_input_is_not_parsed() {
        let settings = Settings::from_args(Args { text: true, ..args("[1, 2]") }).unwrap();
        assert_eq!(settings.input(), &json!("[1, 2]"));
    }

    #[test]
    fn invalid_arguments() {
        assert!(Settings::from_args(args("not json")).is_err());
        assert!(Settings::from_args(Args { top: Some(0), ..args("[]") }).is_err());
        assert!(Settings::from_args(Args { update: vec!["{".to_string()], ..args("[]") }).is_err());
        assert!(Settings::from_args(Args { file: true, ..args("/nonexistent/tally/input") }).is_err());
    }

    #[test]
    fn settings_builder() {
        let settings = SettingsBuilder::default()
            .input(json!([1, 2, 2])).silent(true)
            .build().unwrap();
        assert_eq!(settings, Settings {
            input: json!([1, 2, 2]),
            updates: Vec::new(),
            subtractions: Vec::new(),
            top: None,
            verbose: 0,
            output_file: None,
            overwrite: false,
            silent: true,
        });
        assert!(SettingsBuilder::default().build().is_err());
    }
}
