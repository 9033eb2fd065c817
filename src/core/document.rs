//! Program Document
//!
//! Owns the raw lines of a program, the metadata table and the parsed moves.
//! Built once from text, then read by the tracer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::config_table::ConfigTable;
use crate::error::DocumentError;
use crate::parser::{self, Move, ParseOptions, ParsedLine};

/// A parsed G-code program
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramDocument {
    #[serde(skip)]
    lines: Vec<String>,
    config: ConfigTable,
    moves: Vec<Move>,
}

impl ProgramDocument {
    /// Parse program text with default options
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse program text
    pub fn parse_with(text: &str, options: &ParseOptions) -> Self {
        let lines: Vec<String> = text.trim().lines().map(|l| l.to_string()).collect();

        let mut document = Self {
            lines: Vec::new(),
            config: ConfigTable::new(),
            moves: Vec::new(),
        };

        for line in &lines {
            match parser::parse_line_with(line, options) {
                ParsedLine::Metadata { key, value } => document.config.insert(key, value),
                ParsedLine::Command(mv) => document.moves.push(mv),
                ParsedLine::Comment(_) | ParsedLine::Separator | ParsedLine::Empty => {}
            }
        }

        document.lines = lines;
        log::debug!(
            "parsed {} lines into {} moves and {} config entries",
            document.lines.len(),
            document.moves.len(),
            document.config.len()
        );
        document
    }

    /// Build from raw bytes, failing immediately on non-text input
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Self::from_bytes_with(bytes, &ParseOptions::default())
    }

    pub fn from_bytes_with(bytes: &[u8], options: &ParseOptions) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::parse_with(text, options))
    }

    pub fn configs(&self) -> &ConfigTable {
        &self.config
    }

    /// Merge config entries, last write wins
    pub fn update_config<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config.merge(entries);
    }

    /// Replace the config table wholesale
    pub fn set_config(&mut self, config: ConfigTable) {
        self.config = config;
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Append moves after the existing ones
    pub fn update_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.moves.extend(moves);
    }

    /// Replace the move list wholesale
    pub fn set_moves(&mut self, moves: Vec<Move>) {
        self.moves = moves;
    }

    /// Sorted, de-duplicated move codes such as `["G1", "G28", "M104"]`
    pub fn move_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.moves.iter().map(Move::code).collect();
        types.sort();
        types.dedup();
        types
    }

    /// Raw source lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of raw source lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for ProgramDocument {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(text))
    }
}

impl From<&str> for ProgramDocument {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for ProgramDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.config.sorted() {
            writeln!(f, "{}: {}", key, value)?;
        }
        for mv in &self.moves {
            writeln!(f, "{}", mv)?;
        }
        Ok(())
    }
}
