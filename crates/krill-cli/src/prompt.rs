//! Interactive parameter entry.

use krill_core::{Error, Result, ScenarioConfig};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Ask for the two populations and four coefficients, in that order.
///
/// Each prompt shows the value already in `scenario`; an empty answer keeps it.
pub fn prompt_parameters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    scenario: &mut ScenarioConfig,
) -> Result<()> {
    scenario.initial.krill = ask(input, output, "krill", "initial number of krill", scenario.initial.krill)?;
    scenario.initial.whale = ask(input, output, "whale", "initial number of whales", scenario.initial.whale)?;
    scenario.model.a = ask(input, output, "a", "initial value for a", scenario.model.a)?;
    scenario.model.b = ask(input, output, "b", "initial value for b", scenario.model.b)?;
    scenario.model.m = ask(input, output, "m", "initial value for m", scenario.model.m)?;
    scenario.model.n = ask(input, output, "n", "initial value for n", scenario.model.n)?;
    Ok(())
}

fn ask<T, R, W>(input: &mut R, output: &mut W, field: &str, label: &str, current: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
    R: BufRead,
    W: Write,
{
    write!(output, "Enter {} (e.g. {}): ", label, current)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("input closed before {} was entered", field),
        )));
    }

    let answer = line.trim();
    if answer.is_empty() {
        return Ok(current);
    }
    answer.parse::<T>().map_err(|e| Error::parse(field, e))
}
