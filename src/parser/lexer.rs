//! GCode Lexer
//!
//! Line classification and segment splitting for slicer output.
//! Only string slicing happens here; numeric conversion is left to the AST.

/// What a single trimmed source line is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// Comment line carrying a `key = value` pair
    Metadata,
    /// Comment line without `=`
    Comment,
    /// `;=` banner line. Only reported with `strict_separators`.
    Separator,
    /// Instruction line like "G1 X10 Y20"
    Command,
    /// Empty or whitespace-only line
    Empty,
}

/// Shape of the argument segment that follows the code number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamShape {
    /// `KEY:VAL:KEY:VAL`
    Pairs,
    /// Space separated tokens containing `_`, kept as flags
    Flags,
    /// `X10.5 Y-3` letter/value words
    Words,
}

/// A command line split into its raw segments
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSegments<'a> {
    /// First character of the command
    pub kind: char,
    /// First whitespace-delimited token after the leading character
    pub number: &'a str,
    /// Everything after the number, if anything
    pub params: Option<&'a str>,
    /// Text after the first `;`
    pub comment: Option<&'a str>,
}

/// Classify a line.
///
/// The generic `;` test runs before the `;=` test, so with
/// `strict_separators` off a separator banner is reported as metadata or
/// comment. Strict mode checks `;=` first.
pub fn classify_line(line: &str, strict_separators: bool) -> LineKind {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Empty;
    }

    if strict_separators && line.starts_with(";=") {
        return LineKind::Separator;
    }

    if line.starts_with(';') {
        if line.contains('=') {
            LineKind::Metadata
        } else {
            LineKind::Comment
        }
    } else if line.starts_with(";=") {
        // Shadowed by the branch above.
        LineKind::Separator
    } else {
        LineKind::Command
    }
}

/// Split a metadata comment into a trimmed key and value.
///
/// Only the first `=` separates; the value may contain more of them.
pub fn split_metadata(line: &str) -> Option<(&str, &str)> {
    let body = line.trim().strip_prefix(';')?;
    let (key, value) = body.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Split a command line into type, number, parameter segment and comment.
///
/// Returns `None` when nothing is left once the inline comment is removed.
pub fn split_command(line: &str) -> Option<CommandSegments<'_>> {
    let line = line.trim();

    let (command, comment) = match line.split_once(';') {
        Some((command, comment)) => {
            let comment = comment.trim();
            (command.trim(), (!comment.is_empty()).then_some(comment))
        }
        None => (line, None),
    };

    let kind = command.chars().next()?;
    let rest = command[kind.len_utf8()..].trim_start();

    let (number, params) = match rest.split_once(char::is_whitespace) {
        Some((number, params)) => {
            let params = params.trim();
            (number, (!params.is_empty()).then_some(params))
        }
        None => (rest, None),
    };

    Some(CommandSegments {
        kind,
        number,
        params,
        comment,
    })
}

/// Decide which encoding a parameter segment uses.
///
/// Order matters: a `:` anywhere wins over `_`, and `_` wins over the
/// letter/value default.
pub fn classify_parameters(segment: &str) -> ParamShape {
    if segment.contains(':') {
        ParamShape::Pairs
    } else if segment.contains('_') {
        ParamShape::Flags
    } else {
        ParamShape::Words
    }
}
