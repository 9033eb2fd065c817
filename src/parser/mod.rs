//! GCode Parser
//!
//! Turns slicer output lines into metadata entries and `Move` records.
//! Focused solely on line classification and AST construction.

pub mod ast;
pub mod lexer;

pub use ast::{Move, ParamValue, Parameters, ParsedLine};
pub use lexer::{LineKind, ParamShape};

/// Parser switches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParseOptions {
    /// Recognise `;=` separator lines before the generic comment branch
    pub strict_separators: bool,
}

/// Parse a single line of GCode with default options
pub fn parse_line(line: &str) -> ParsedLine {
    parse_line_with(line, &ParseOptions::default())
}

/// Parse a single line of GCode into structured data
pub fn parse_line_with(line: &str, options: &ParseOptions) -> ParsedLine {
    match lexer::classify_line(line, options.strict_separators) {
        LineKind::Empty => ParsedLine::Empty,
        LineKind::Separator => ParsedLine::Separator,
        LineKind::Metadata => match lexer::split_metadata(line) {
            Some((key, value)) => ParsedLine::Metadata {
                key: key.to_string(),
                value: value.to_string(),
            },
            None => ParsedLine::Comment(comment_text(line)),
        },
        LineKind::Comment => ParsedLine::Comment(comment_text(line)),
        LineKind::Command => match Move::parse(line) {
            Some(mv) => ParsedLine::Command(mv),
            None => ParsedLine::Empty,
        },
    }
}

fn comment_text(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix(';').unwrap_or(line).to_string()
}
