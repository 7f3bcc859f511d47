//! Confirmation prompt

use std::io::{self, BufRead, Write};

/// Ask a `[Y/n]` question
///
/// An empty answer means yes. End of input means no, so piping nothing into
/// jmw never deploys.
pub fn confirm<R: BufRead, W: Write>(question: &str, mut reader: R, mut writer: W) -> io::Result<bool> {
    write!(writer, "{question} [Y/n]: ")?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        writeln!(writer)?;
        return Ok(false);
    }
    Ok(parse_answer(&input))
}

/// Ask on the terminal
pub fn confirm_stdin(question: &str) -> io::Result<bool> {
    confirm(question, io::stdin().lock(), io::stdout())
}

/// Interpret a `[Y/n]` answer
pub fn parse_answer(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "" | "y" | "yes")
}
