use crate::{
    counter::Counter,
    element::{shape_name, Element},
    output::{backup_existing, write_json},
    report::CountReport,
    settings::Settings,
};
use anyhow::{Context, Result};
use serde_json::Value;

fn operand_counter(operand: &Value, flag: &str) -> Result<Counter<Element>> {
    Counter::try_from_input(operand)
        .with_context(|| format!("{} operand should be a string, array or object", flag))
}

fn operand_message(verb: &str, operand: &Value, counter: &Counter<Element>) -> String {
    format!("{} {} of {} elements ({} distinct)",
        verb, shape_name(operand), counter.total(), counter.len())
}

/// Builds the counter for the input, then applies every update followed by
/// every subtraction, in order.
pub fn build_counter(settings: &Settings) -> Result<Counter<Element>> {
    let mut counter = Counter::try_from_input(settings.input())
        .context("Input should be a string, array or object")?;
    for operand in settings.updates() {
        let other = operand_counter(operand, "--update")?;
        if settings.verbose() >= 2 {
            println!("{}", operand_message("Adding", operand, &other));
        }
        counter.update(&other);
    }
    for operand in settings.subtractions() {
        let other = operand_counter(operand, "--subtract")?;
        if settings.verbose() >= 2 {
            println!("{}", operand_message("Subtracting", operand, &other));
        }
        counter.subtract(&other);
    }
    Ok(counter)
}

pub fn summary_message(report: &CountReport) -> String {
    format!("Total: {}\n\
        Distinct elements: {}",
        report.total(), report.distinct())
}

/// Counts the input and writes the report. The output file is left untouched
/// unless the counter was built successfully.
pub fn run(settings: Settings) -> Result<CountReport> {
    let counter = build_counter(&settings)?;
    let report = CountReport::from_counter(&counter, settings.top());
    if !settings.silent() {
        if let Some(path) = settings.output_file() {
            backup_existing(path, settings.overwrite())?;
        }
        write_json(settings.output_file(), &report)?;
    }
    if settings.verbose() >= 1 {
        println!("{}", summary_message(&report));
    }
    Ok(report)
}
