//! lockscan: inspect exported Flask session records
//!
//! A forensic aide for one operator looking at a CSV dump of session
//! records. Each row carries the session token Flask writes into its
//! cookie (URL-safe base64, optionally zlib compressed, JSON inside).
//! lockscan reverses that encoding and prints the `locks` entry of
//! every session that has one.
//!
//! ## How it works
//!
//! 1. **Decode**: base64 -> optional zlib inflate -> JSON
//! 2. **Scan**: walk the CSV row by row, header skipped
//! 3. **Report**: pretty-print each `locks` value with its line number
//!
//! The cookie signature is ignored entirely; this reads exported data,
//! it never verifies or produces tokens.

pub mod decoder;
pub mod scanner;

pub use decoder::decode_session;
pub use scanner::{scan, scan_file, DEFAULT_TOKEN_COLUMN};
