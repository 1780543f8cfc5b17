pub mod engine;
pub mod error;
pub mod group;
pub mod request;

use crate::error::AllocError;
use crate::request::{CsvApprovedRow, CsvLocateRequest};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;

/// Streams locate-request rows from a CSV file.
///
/// Per-row parse errors are yielded inline so callers choose whether to
/// skip or abort.
pub fn stream_requests(
    path: &str,
) -> Result<impl Iterator<Item = Result<CsvLocateRequest, csv::Error>>, Box<dyn std::error::Error>>
{
    let file = File::open(path)?;
    let rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    Ok(rdr.into_deserialize::<CsvLocateRequest>())
}

/// Loads the symbol -> approved quantity table from a CSV file.
///
/// Strict, unlike the request stream: a malformed or negative row fails
/// the whole load.
pub fn load_approved_pool(path: &str) -> Result<HashMap<String, Decimal>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut pool = HashMap::new();
    for row in rdr.deserialize::<CsvApprovedRow>() {
        let row = row?;
        if row.approved_locates < Decimal::ZERO {
            return Err(Box::new(AllocError::InvalidRequest {
                message: format!("negative approved pool for symbol {}", row.symbol),
            }));
        }
        pool.insert(row.symbol, row.approved_locates);
    }

    Ok(pool)
}
