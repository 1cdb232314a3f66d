//! Kandilli bulletin parser
//!
//! The bulletin page wraps a fixed-layout plaintext table in a pair of
//! markers. Each data line looks like:
//!
//! ```text
//! 2024.01.15 14:30:00  40.9800   29.0200        7.5      -.-  4.2  -.-   SOME-PLACE (ISTANBUL)
//! ```
//!
//! ## Architecture
//!
//! - [`block`] - Locating the data block between the bracketing markers
//! - [`line_parser`] - Noise filtering and positional field extraction
//! - [`magnitude`] - Bounded scan over the alternative magnitude columns
//! - [`parser`] - Orchestration, region tagging and statistics
//! - [`stats`] - Parse statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use seismic_ingest::app::services::bulletin_parser::BulletinParser;
//!
//! let page = "<pre>\n2024.01.15 14:30:00 40.9800 29.0200 7.5 -.- 4.2 -.- SOME-PLACE (ISTANBUL)\n</pre>";
//! let result = BulletinParser::default().parse(page);
//!
//! assert_eq!(result.events.len(), 1);
//! assert_eq!(result.events[0].magnitude, Some(4.2));
//! ```

pub mod block;
pub mod line_parser;
pub mod magnitude;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use block::{MalformedBulletin, extract_data_block};
pub use line_parser::{LineOutcome, ParsedLine};
pub use magnitude::ScanWindow;
pub use parser::{BulletinLayout, BulletinParser};
pub use stats::{BulletinParseResult, BulletinParseStats};
