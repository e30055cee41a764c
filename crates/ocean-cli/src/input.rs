//! Reads the grid dimensions the simulation starts from.

use ocean_core::{Error, Result};
use std::io::BufRead;

/// Read two whitespace-separated integers, rows then columns.
///
/// The values may be split across lines. Sign is not checked here;
/// `WorldConfig::dimensions` rejects non-positive extents.
pub fn read_dimensions<R: BufRead>(mut reader: R) -> Result<(i32, i32)> {
    let mut values = Vec::with_capacity(2);
    let mut line = String::new();

    while values.len() < 2 {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        for token in line.split_whitespace().take(2 - values.len()) {
            let value = token
                .parse::<i32>()
                .map_err(|_| Error::InvalidInput(format!("'{}' is not an integer", token)))?;
            values.push(value);
        }
    }

    match values[..] {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(Error::InvalidInput(
            "expected two integers: rows and columns".to_string(),
        )),
    }
}
