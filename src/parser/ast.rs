//! Abstract Syntax Tree for GCode
//!
//! Plain data types for parsed slicer output. Nothing here knows about
//! machine state; the tracer interprets these records.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::parser::lexer::{self, CommandSegments, ParamShape};

/// A parsed line of GCode
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// A `; key = value` metadata comment
    Metadata { key: String, value: String },
    /// A comment without metadata
    Comment(String),
    /// A `;=` banner line, only produced with `strict_separators`
    Separator,
    /// An instruction
    Command(Move),
    /// An empty or whitespace-only line
    Empty,
}

/// A parameter value.
///
/// `G` moves get their values converted to numbers where they parse;
/// everything else, and anything that fails to parse, stays text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Try a numeric conversion, keeping the raw text when it fails
    pub fn convert(raw: String) -> Self {
        match raw.parse::<f64>() {
            Ok(value) => ParamValue::Number(value),
            Err(_) => ParamValue::Text(raw),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(value) => Some(*value),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text.as_str()),
            ParamValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(value) => write!(f, "{}", value),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

/// Parameters of a move, in whichever of the three encodings the line used
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "values", rename_all = "snake_case")]
pub enum Parameters {
    /// `KEY:VAL:KEY:VAL` pairs
    Pairs(BTreeMap<String, ParamValue>),
    /// Underscore tokens like `EXCLUDE_OBJECT`
    Flags(Vec<String>),
    /// Letter/value words like `X10 Y20`, keyed by the letter
    Words(BTreeMap<String, ParamValue>),
}

impl Parameters {
    /// Parse a raw parameter segment.
    ///
    /// `numeric` enables the number conversion applied to `G` moves.
    pub fn parse(segment: &str, numeric: bool) -> Self {
        let value = |raw: &str| {
            if numeric {
                ParamValue::convert(raw.to_string())
            } else {
                ParamValue::Text(raw.to_string())
            }
        };

        match lexer::classify_parameters(segment) {
            ParamShape::Pairs => {
                let parts: Vec<&str> = segment.split(':').collect();
                let pairs = parts
                    .chunks(2)
                    .map(|chunk| {
                        let key = chunk[0].trim().to_string();
                        let raw = chunk.get(1).map(|v| v.trim()).unwrap_or("");
                        (key, value(raw))
                    })
                    .collect();
                Parameters::Pairs(pairs)
            }
            ParamShape::Flags => Parameters::Flags(
                segment
                    .split_whitespace()
                    .map(|flag| flag.to_string())
                    .collect(),
            ),
            ParamShape::Words => {
                let words = segment
                    .split_whitespace()
                    .filter_map(|word| {
                        let letter = word.chars().next()?;
                        Some((letter.to_string(), value(&word[letter.len_utf8()..])))
                    })
                    .collect();
                Parameters::Words(words)
            }
        }
    }

    /// Look up a keyed value. Flags have no values.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        match self {
            Parameters::Pairs(map) | Parameters::Words(map) => map.get(key),
            Parameters::Flags(_) => None,
        }
    }

    pub fn flags(&self) -> Option<&[String]> {
        match self {
            Parameters::Flags(flags) => Some(flags.as_slice()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Parameters::Pairs(map) | Parameters::Words(map) => map.is_empty(),
            Parameters::Flags(flags) => flags.is_empty(),
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameters::Pairs(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                f.write_str(&parts.join(":"))
            }
            Parameters::Flags(flags) => f.write_str(&flags.join(" ")),
            Parameters::Words(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}{}", k, v)).collect();
                f.write_str(&parts.join(" "))
            }
        }
    }
}

/// One instruction line, e.g. "G1 X10 Y20 ; perimeter"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Move {
    /// Category letter (`G`, `M`, `T`, ...)
    #[serde(rename = "type")]
    pub kind: char,
    /// Code number as written (e.g. "1", "92")
    pub number: String,
    /// `None` when the line had no argument segment
    pub parameters: Option<Parameters>,
    /// Trailing comment text, not interpreted
    pub comment: Option<String>,
}

impl Move {
    /// Parse a command line. Returns `None` for lines with no command text.
    pub fn parse(line: &str) -> Option<Self> {
        lexer::split_command(line).map(Self::from_segments)
    }

    pub(crate) fn from_segments(segments: CommandSegments<'_>) -> Self {
        let numeric = segments.kind == 'G';

        Self {
            kind: segments.kind,
            number: segments.number.to_string(),
            parameters: segments
                .params
                .map(|segment| Parameters::parse(segment, numeric)),
            comment: segments.comment.map(|c| c.to_string()),
        }
    }

    /// Type letter and number joined, e.g. "G1"
    pub fn code(&self) -> String {
        format!("{}{}", self.kind, self.number)
    }

    pub fn is_g(&self) -> bool {
        self.kind == 'G'
    }

    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.as_ref()?.get(key)
    }

    /// Numeric value of a parameter, `None` when unset or kept as text
    pub fn number_value(&self, key: &str) -> Option<f64> {
        self.parameter(key)?.as_f64()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)?;
        if let Some(parameters) = self.parameters.as_ref().filter(|p| !p.is_empty()) {
            write!(f, " {}", parameters)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " ; {}", comment)?;
        }
        Ok(())
    }
}
