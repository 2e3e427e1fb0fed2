//! Renders a decoded claim set as JSON, CSV or XML.

pub mod csv_format;
pub mod epoch;
pub mod json_format;
pub mod value;
pub mod xml_format;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::jwt::ClaimSet;
pub use epoch::{EpochOptions, EpochUnit};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid output format {0:?}; must be JSON, CSV, or XML")]
    InvalidFormat(String),
    #[error("failed to serialize JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write XML: {0}")]
    Xml(String),
    #[error("formatted output size {size} bytes exceeds the {limit} byte limit")]
    SizeLimitExceeded { size: usize, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Xml,
}

impl Format {
    /// Lower-case file extension, also used for the default output name.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Xml => "xml",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JSON" => Ok(Format::Json),
            "CSV" => Ok(Format::Csv),
            "XML" => Ok(Format::Xml),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Csv => "CSV",
            Format::Xml => "XML",
        };
        f.write_str(name)
    }
}

pub fn render(claims: &ClaimSet, format: Format, epoch: &EpochOptions) -> Result<Vec<u8>, Error> {
    match format {
        Format::Json => json_format::render(claims, epoch),
        Format::Csv => csv_format::render(claims, epoch),
        Format::Xml => xml_format::render(claims, epoch),
    }
}

/// Renders `claims` and enforces the output ceiling. Oversized output is
/// dropped and reported as [`Error::SizeLimitExceeded`].
pub fn dispatch(
    claims: &ClaimSet,
    format: Format,
    epoch: &EpochOptions,
    max_output_bytes: usize,
) -> Result<Vec<u8>, Error> {
    let output = render(claims, format, epoch)?;
    debug!(%format, bytes = output.len(), "rendered claims");

    if output.len() > max_output_bytes {
        return Err(Error::SizeLimitExceeded {
            size: output.len(),
            limit: max_output_bytes,
        });
    }
    Ok(output)
}
