//! Line-oriented JSON I/O for the CLI
//!
//! - Input: one JSON request per line on stdin
//! - Output: one JSON response per line on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Non-blank request lines from `reader`, in order
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(line)),
        Err(e) => Some(Err(e.into())),
    })
}

/// Write a serializable value as one JSON line
pub fn write_value<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write a pre-encoded JSON line
pub fn write_json<W: Write>(out: &mut W, json: &str) -> CliResult<()> {
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_skipped() {
        let input = "{\"action\":\"view\"}\n\n   \n{\"action\":\"actions\"}\n";
        let lines: Vec<String> = read_requests(input.as_bytes())
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["{\"action\":\"view\"}", "{\"action\":\"actions\"}"]);
    }

    #[test]
    fn test_write_value_is_one_line() {
        let mut out = Vec::new();
        write_value(&mut out, &serde_json::json!({"status": "ok"})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"status\":\"ok\"}\n");
    }
}
