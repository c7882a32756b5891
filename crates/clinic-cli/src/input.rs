//! Line-oriented stdin helpers for the menu loop.

use std::error::Error;
use std::io::{self, Write};
use std::str::FromStr;

/// Prompts and reads one trimmed line.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Reads a line, rejecting empty input.
pub fn read_nonempty(prompt: &str) -> Result<String, Box<dyn Error>> {
    let line = read_line(prompt)?;
    if line.is_empty() {
        return Err("input cannot be empty".into());
    }
    Ok(line)
}

/// Reads a line, mapping empty input to `None`.
pub fn read_optional(prompt: &str) -> io::Result<Option<String>> {
    let line = read_line(prompt)?;
    Ok((!line.is_empty()).then_some(line))
}

/// Reads and parses an integer.
pub fn read_int<T: FromStr>(prompt: &str) -> Result<T, Box<dyn Error>> {
    let line = read_nonempty(prompt)?;
    line.parse()
        .map_err(|_| format!("expected an integer, got {line:?}").into())
}
