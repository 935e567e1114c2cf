/// parse a task document with structure like
/// ```text
/// problem
/// expression: x^2*exp(-x)
/// independent_var: x
/// initial
/// x0: 0
/// y0: 1
/// ```
/// into titles (sections) holding key-value pairs, then into a [`TaskConfig`].
/// A title stands alone on its line, every pair takes one line and the value is the rest
/// of that line, spaces included. Lines starting with //, # or % are comments.
use crate::Utils::logger::parse_level;
use crate::numerical::IVP_api::Submission;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{alpha1, alphanumeric1, char, line_ending, multispace0, space0},
    combinator::{eof, map, recognize},
    multi::many0,
    sequence::{pair, preceded, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub type SectionMap = HashMap<String, Value>;
pub type DocumentMap = HashMap<String, SectionMap>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// integers are accepted where a float is expected
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// typed in the order integer, float, boolean, string
    fn from_text(s: &str) -> Value {
        let s = s.trim();
        if let Ok(val) = s.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(s.to_string())
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("cannot parse task document near '{0}'")]
    Syntax(String),
    #[error("missing required key '{key}' in section '{section}'")]
    Missing { section: String, key: String },
    #[error("unknown key '{key}' in section '{section}'")]
    Unknown { section: String, key: String },
    #[error("'{section}.{key}' must be {expected}, got '{value}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read task file: {0}")]
    Io(#[from] std::io::Error),
}

/// sections and the keys each of them may hold
const KNOWN_KEYS: [(&str, &[&str]); 4] = [
    ("problem", &["expression", "independent_var"]),
    ("initial", &["x0", "y0"]),
    ("grid", &["num_steps", "step_size"]),
    ("output", &["plot", "loglevel", "log_file"]),
];

/// word characters without spaces
fn parse_identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )
    .parse(input)
}

fn parse_line_end(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof)).parse(input)
}

/// A title is an identifier alone on its line
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    terminated(preceded(space0, parse_identifier), (space0, parse_line_end)).parse(input)
}

/// the rest of the line, must not be blank
pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    map(take_till1(|c: char| c == '\n' || c == '\r'), Value::from_text).parse(input)
}

/// key: value
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Value)> {
    let (input, (_, key, _, _, _, value, _)) = (
        space0,
        parse_identifier,
        space0,
        char(':'),
        space0,
        parse_value,
        parse_line_end,
    )
        .parse(input)?;
    Ok((input, (key, value)))
}

/// Parses a section with a title and its key-value pairs
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = parse_title(input)?;
    let (input, pairs) = many0(parse_key_value_pair).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, or %) and blank lines
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into nested maps. Repeated titles are merged.
pub fn parse_document(input: &str) -> Result<DocumentMap, TaskError> {
    let filtered = filter_comments(input);
    let (remaining, sections) = many0(preceded(multispace0, parse_section))
        .parse(filtered.as_str())
        .map_err(|e| TaskError::Syntax(e.to_string()))?;
    if !remaining.trim().is_empty() {
        let line = remaining.trim().lines().next().unwrap_or_default();
        return Err(TaskError::Syntax(line.to_string()));
    }

    let mut document = DocumentMap::new();
    for (title, section_map) in sections {
        document.entry(title).or_default().extend(section_map);
    }
    Ok(document)
}

/// Everything one run needs: the submission plus where the output goes.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    pub submission: Submission,
    pub plot: PathBuf,
    pub loglevel: String,
    pub log_file: bool,
}

struct TaskReader<'a> {
    document: &'a DocumentMap,
}

impl<'a> TaskReader<'a> {
    fn get(&self, section: &str, key: &str) -> Option<&'a Value> {
        self.document.get(section).and_then(|s| s.get(key))
    }

    fn invalid(section: &str, key: &str, value: &Value, expected: &'static str) -> TaskError {
        TaskError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    fn text(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| default.to_string())
    }

    fn required_text(&self, section: &str, key: &str) -> Result<String, TaskError> {
        self.get(section, key)
            .map(|v| v.to_string())
            .ok_or_else(|| TaskError::Missing {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    fn number(&self, section: &str, key: &str, default: f64) -> Result<f64, TaskError> {
        match self.get(section, key) {
            None => Ok(default),
            Some(value) => value
                .as_float()
                .ok_or_else(|| Self::invalid(section, key, value, "a number")),
        }
    }

    fn boolean(&self, section: &str, key: &str, default: bool) -> Result<bool, TaskError> {
        match self.get(section, key) {
            None => Ok(default),
            Some(value) => value
                .as_boolean()
                .ok_or_else(|| Self::invalid(section, key, value, "true or false")),
        }
    }
}

fn check_known_keys(document: &DocumentMap) -> Result<(), TaskError> {
    for (section, pairs) in document {
        let known = KNOWN_KEYS
            .iter()
            .find(|(name, _)| *name == section.as_str())
            .map(|(_, keys)| *keys)
            .unwrap_or(&[]);
        for key in pairs.keys() {
            if !known.contains(&key.as_str()) {
                return Err(TaskError::Unknown {
                    section: section.clone(),
                    key: key.clone(),
                });
            }
        }
    }
    Ok(())
}

impl TaskConfig {
    /// Builds the config from a parsed document, filling in defaults.
    pub fn from_document(document: &DocumentMap) -> Result<TaskConfig, TaskError> {
        check_known_keys(document)?;
        let reader = TaskReader { document };

        let independent_var = reader.text("problem", "independent_var", "x");
        let submission = Submission::new(
            &reader.required_text("problem", "expression")?,
            &independent_var,
            reader.number("grid", "num_steps", 10.0)?,
            reader.number("grid", "step_size", 0.1)?,
            reader.number("initial", "x0", 0.0)?,
            reader.number("initial", "y0", 0.0)?,
        );

        let loglevel = reader.text("output", "loglevel", "info");
        if parse_level(&loglevel).is_err() {
            return Err(TaskError::InvalidValue {
                section: "output".to_string(),
                key: "loglevel".to_string(),
                value: loglevel,
                expected: "one of debug, info, warn, error, off",
            });
        }

        Ok(TaskConfig {
            submission,
            plot: PathBuf::from(reader.text("output", "plot", "euler.png")),
            loglevel,
            log_file: reader.boolean("output", "log_file", false)?,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<TaskConfig, TaskError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl FromStr for TaskConfig {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<TaskConfig, TaskError> {
        TaskConfig::from_document(&parse_document(input)?)
    }
}
