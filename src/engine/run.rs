use crate::error::AllocError;
use crate::request::LocateQuery;

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Write;

/// Query failed because the whole allocation run was aborted.
pub const ERROR_CODE_RUN_FAILED: u8 = 0;
/// Query failed because no allocation exists for this client and symbol.
pub const ERROR_CODE_NOT_FOUND: u8 = 1;

/// One allocated amount for a (client, symbol) pair, rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAllocation {
    pub symbol: String,
    pub approved_locates: Decimal,
}

/// Answer to a single [`LocateQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateResponse {
    Approved {
        client_name: String,
        symbol: String,
        req_locates: u64,
        approved_locates: Decimal,
    },
    Error {
        message: String,
        code: u8,
    },
}

/// The immutable outcome of one allocation pass.
///
/// Either every symbol was distributed and the per-client results are
/// available, or the run was aborted and the stored error answers all
/// queries. A run is a plain value with one owner; re-running allocation
/// produces a fresh run rather than updating this one, so sharing across
/// threads needs no locking.
#[derive(Debug, Clone)]
pub struct AllocationRun {
    by_client: HashMap<String, Vec<SymbolAllocation>>,
    error: Option<AllocError>,
}

impl AllocationRun {
    pub(crate) fn completed(by_client: HashMap<String, Vec<SymbolAllocation>>) -> Self {
        Self {
            by_client,
            error: None,
        }
    }

    pub(crate) fn errored(error: AllocError) -> Self {
        Self {
            by_client: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn error(&self) -> Option<&AllocError> {
        self.error.as_ref()
    }

    pub fn allocations_for(&self, client: &str) -> Option<&[SymbolAllocation]> {
        self.by_client.get(client).map(|v| v.as_slice())
    }

    /// Answers one client's query against this run.
    ///
    /// An errored run reports the run error (code 0) for every query; an
    /// unknown client or symbol reports not-found (code 1). Pure read.
    pub fn request_locates(&self, query: &LocateQuery) -> LocateResponse {
        if let Some(err) = &self.error {
            return LocateResponse::Error {
                message: err.to_string(),
                code: ERROR_CODE_RUN_FAILED,
            };
        }

        if let Some(entries) = self.by_client.get(&query.client_name) {
            for entry in entries {
                if entry.symbol == query.symbol {
                    return LocateResponse::Approved {
                        client_name: query.client_name.clone(),
                        symbol: entry.symbol.clone(),
                        req_locates: query.number_of_locates_requested,
                        approved_locates: entry.approved_locates,
                    };
                }
            }
        }

        LocateResponse::Error {
            message: format!(
                "no approved locates found for {}-symbol-{}",
                query.client_name, query.symbol
            ),
            code: ERROR_CODE_NOT_FOUND,
        }
    }

    pub fn dump_allocations<W: Write>(&self, mut writer: W) {
        // Print CSV header
        writeln!(&mut writer, "client_name,symbol,approved_locates").unwrap();

        for (client, entries) in self.by_client.iter() {
            for entry in entries {
                writeln!(
                    &mut writer,
                    "{},{},{}",
                    client, entry.symbol, entry.approved_locates
                )
                .unwrap();
            }
        }
    }
}
