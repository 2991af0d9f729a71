//! Shared glue for the CLI binaries: environment lookup, prompt reading and
//! JSON printing.

#[macro_use]
extern crate tracing;

use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Display};

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A required environment variable is unset or blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingEnv(pub &'static str);

impl Display for MissingEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required environment variable: {}", self.0)
    }
}

impl StdError for MissingEnv {}

/// Looks up a required environment variable, trimming surrounding
/// whitespace. Unset or blank values are errors.
pub fn require_env(name: &'static str) -> Result<String, MissingEnv> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(MissingEnv(name)),
    }
}

/// Looks up an optional environment variable, treating blank values as
/// unset.
pub fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Reads one line from the given input and returns the trimmed text.
/// `None` means end of input or a blank line.
pub async fn read_prompt<R>(reader: &mut R) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) => None,
        Ok(_) => {
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_owned())
            }
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

/// Dumps a JSON value to stdout with pretty indentation.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => error!("failed to format response: {}", err),
    }
}
