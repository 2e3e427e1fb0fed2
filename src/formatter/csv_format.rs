//! One token, one record: a header row and a single data row.

use std::collections::BTreeMap;

use super::epoch::{EpochOptions, DATESTAMP_SUFFIX};
use super::value::{is_container, jsonify, stringify};
use super::Error;
use crate::jwt::ClaimSet;

/// Leading characters a spreadsheet would treat as a formula.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Collapses top-level containers to JSON and adds datestamp columns.
/// Columns come back in ascending byte order.
fn flatten(claims: &ClaimSet, epoch: &EpochOptions) -> BTreeMap<String, String> {
    let mut columns = BTreeMap::new();

    for (key, value) in claims {
        let cell = if is_container(value) {
            jsonify(value)
        } else {
            stringify(value)
        };
        columns.insert(key.clone(), cell);

        if let Some(datestamp) = epoch.datestamp(key, value) {
            columns.insert(format!("{key}{DATESTAMP_SUFFIX}"), datestamp);
        }
    }

    columns
}

/// Prefixes formula-looking cells with a single quote.
pub fn escape_cell(cell: &str) -> String {
    if cell.starts_with(FORMULA_TRIGGERS) {
        format!("'{cell}")
    } else {
        cell.to_string()
    }
}

pub fn render(claims: &ClaimSet, epoch: &EpochOptions) -> Result<Vec<u8>, Error> {
    let columns = flatten(claims, epoch);

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.keys())?;
    writer.write_record(columns.values().map(|cell| escape_cell(cell)))?;

    writer
        .into_inner()
        .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}
