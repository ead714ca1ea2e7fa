//! Instance file loading
//!
//! Plain text: `#` starts a comment, blank lines are ignored, the first
//! remaining line is the roll width and every further line is
//! `width demand`.

use crate::core::{Instance, InstanceError, Item};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Instance(InstanceError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Cannot read instance file: {e}"),
            Self::Instance(e) => write!(f, "Invalid instance: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Instance(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<InstanceError> for LoadError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

/// Load an instance from a file
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read and
/// `LoadError::Instance` if its content is malformed.
///
/// # Examples
/// ```no_run
/// use mip_katas::cutting::load_from_file;
///
/// let instance = load_from_file("data/rolls.txt").unwrap();
/// println!("Loaded {} items", instance.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Instance, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_instance(&content)?)
}

fn parse_number(line: usize, field: &str, what: &str) -> Result<u32, InstanceError> {
    field.parse().map_err(|_| InstanceError::Parse {
        line,
        message: format!("{what} '{field}' is not a non-negative integer"),
    })
}

/// Parse the text format described in the module docs
///
/// # Errors
///
/// Returns `InstanceError::Parse` with the 1-based line number of the first
/// malformed line, or the validation error of the assembled instance.
pub fn parse_instance(content: &str) -> Result<Instance, InstanceError> {
    let mut roll_width = None;
    let mut items = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        match (roll_width, fields.as_slice()) {
            (None, [width]) => roll_width = Some(parse_number(line, width, "Roll width")?),
            (None, _) => {
                return Err(InstanceError::Parse {
                    line,
                    message: "expected the roll width alone".to_string(),
                });
            }
            (Some(_), [width, demand]) => items.push(Item::new(
                parse_number(line, width, "Width")?,
                parse_number(line, demand, "Demand")?,
            )),
            (Some(_), _) => {
                return Err(InstanceError::Parse {
                    line,
                    message: format!("expected 'width demand', found '{text}'"),
                });
            }
        }
    }

    let roll_width = roll_width.ok_or(InstanceError::NoItems)?;
    Instance::new(roll_width, items)
}
