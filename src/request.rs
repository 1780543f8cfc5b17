use crate::error::AllocError;

use rust_decimal::Decimal;
use serde::Deserialize;

/// A single client's ask for locates of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateRequest {
    pub client: String,
    pub symbol: String,
    pub requested: u64,
}

/// Raw CSV row, columns: client_name,symbol,number_of_locates_requested.
///
/// The quantity is read signed so a negative row can be rejected with a
/// proper error instead of a serde type failure.
#[derive(Debug, Deserialize)]
pub struct CsvLocateRequest {
    pub client_name: String,
    pub symbol: String,
    pub number_of_locates_requested: i64,
}

impl TryFrom<CsvLocateRequest> for LocateRequest {
    type Error = AllocError;

    fn try_from(csv: CsvLocateRequest) -> Result<Self, Self::Error> {
        if csv.number_of_locates_requested < 0 {
            return Err(AllocError::InvalidRequest {
                message: format!(
                    "negative locate quantity {} for {}-{}",
                    csv.number_of_locates_requested, csv.client_name, csv.symbol
                ),
            });
        }

        Ok(LocateRequest {
            client: csv.client_name,
            symbol: csv.symbol,
            requested: csv.number_of_locates_requested as u64,
        })
    }
}

/// Raw CSV row of the approved-pool table, columns: symbol,approved_locates.
#[derive(Debug, Deserialize)]
pub struct CsvApprovedRow {
    pub symbol: String,
    pub approved_locates: Decimal,
}

/// A client's query against a completed allocation run.
#[derive(Debug, Clone)]
pub struct LocateQuery {
    pub client_name: String,
    pub symbol: String,
    pub number_of_locates_requested: u64,
}

impl LocateQuery {
    pub fn new(client_name: &str, symbol: &str, number_of_locates_requested: u64) -> Self {
        Self {
            client_name: client_name.to_string(),
            symbol: symbol.to_string(),
            number_of_locates_requested,
        }
    }
}

impl LocateRequest {
    pub fn new(client: &str, symbol: &str, requested: u64) -> Self {
        Self {
            client: client.to_string(),
            symbol: symbol.to_string(),
            requested,
        }
    }
}
