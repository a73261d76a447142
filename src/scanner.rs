//! Scanner module: walk an exported sessions CSV and report locks
//!
//! The export is naive CSV: comma-split, no quoting, first line is a
//! header. One column holds the encoded session token; by default the
//! second column, which is where the known exports put it.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::decoder::decode_session;

/// Zero-based index of the token column in known exports.
pub const DEFAULT_TOKEN_COLUMN: usize = 1;

/// Width of the separator printed after each lock block.
const SEPARATOR_WIDTH: usize = 20;

/// Scan rows from `reader`, printing the `locks` entry of every session
/// that decodes to a document containing one. Returns the number of
/// blocks printed.
///
/// The first row is the header and is never inspected. Rows whose token
/// yields no session data, or whose session has no `locks` key, are
/// skipped silently. A row without the token column, or a token that is
/// not valid base64, aborts the scan; output printed for earlier rows
/// stands.
pub fn scan<R: BufRead, W: Write>(reader: R, column: usize, out: &mut W) -> Result<usize> {
    let mut printed = 0;

    for (index, line) in reader.lines().enumerate() {
        if index == 0 {
            continue;
        }
        let line_number = index + 1;

        let line = line.with_context(|| format!("failed to read line {}", line_number))?;
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        let token = fields.get(column).copied().with_context(|| {
            format!(
                "line {} has {} fields, expected a token in column {}",
                line_number,
                fields.len(),
                column
            )
        })?;

        let session = decode_session(token)
            .with_context(|| format!("failed to decode token on line {}", line_number))?;

        let locks = match session.as_ref().and_then(|s| s.get("locks")) {
            Some(locks) => locks,
            None => continue,
        };

        writeln!(out, "--- locks in row {} ---", line_number)?;
        writeln!(out, "{}", serde_json::to_string_pretty(locks)?)?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        printed += 1;
    }

    Ok(printed)
}

/// Open `path` and scan it.
///
/// A missing file is a user error, not a crash: the message goes to
/// `out` and the scan ends cleanly having printed nothing.
pub fn scan_file<W: Write>(path: &Path, column: usize, out: &mut W) -> Result<usize> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            writeln!(
                out,
                "Error: file not found, check the path: {}",
                path.display()
            )?;
            return Ok(0);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to open {}", path.display()))
        }
    };

    scan(BufReader::new(file), column, out)
}
