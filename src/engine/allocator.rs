use crate::engine::run::{AllocationRun, SymbolAllocation};
use crate::error::AllocError;
use crate::group::group_by;
use crate::request::LocateRequest;

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Round-robin allocation granularity.
pub const CHUNK: Decimal = Decimal::ONE_HUNDRED;

/// Distributes each symbol's approved pool across that symbol's requests.
///
/// Symbols are visited in sorted order; a symbol with no entry in the pool
/// table is skipped. If any symbol's pool exceeds its total demand the whole
/// run is poisoned: remaining symbols are not processed and every query
/// against the returned run reports the error.
///
/// The input requests are never mutated; the chunk loop works on its own
/// copy of the remaining quantities.
pub fn allocate(requests: &[LocateRequest], pool: &HashMap<String, Decimal>) -> AllocationRun {
    let mut by_client: HashMap<String, Vec<SymbolAllocation>> = HashMap::new();

    for (symbol, group) in group_by(requests, |r| r.symbol.clone()) {
        let Some(&approved) = pool.get(&symbol) else {
            continue;
        };

        let granted = match allocate_symbol(&symbol, approved, &group) {
            Ok(granted) => granted,
            Err(e) => return AllocationRun::errored(e),
        };

        // One result entry per original row; duplicate rows for the same
        // client each carry that client's accumulated total for the symbol.
        for req in &group {
            let total = granted.get(&req.client).copied().unwrap_or(Decimal::ZERO);
            by_client
                .entry(req.client.clone())
                .or_default()
                .push(SymbolAllocation {
                    symbol: symbol.clone(),
                    approved_locates: total.round_dp(3),
                });
        }
    }

    AllocationRun::completed(by_client)
}

/// Distributes `approved` locates of one symbol across `group`, returning
/// the unrounded total granted per client.
pub fn allocate_symbol(
    symbol: &str,
    approved: Decimal,
    group: &[LocateRequest],
) -> Result<HashMap<String, Decimal>, AllocError> {
    let total_demand: Decimal = group.iter().map(|r| Decimal::from(r.requested)).sum();

    if approved > total_demand {
        return Err(AllocError::PoolExceedsDemand(symbol.to_string()));
    }

    let mut granted: HashMap<String, Decimal> = HashMap::new();
    if total_demand.is_zero() {
        return Ok(granted);
    }

    // Exact-coverage case: demand equals the pool (the guard above rules out
    // demand below it) and the pool splits into whole chunks. Every client
    // receives its proportional share, floored, in a single pass.
    if total_demand <= approved && (approved % CHUNK).is_zero() {
        for req in group {
            let share = (Decimal::from(req.requested) * approved / total_demand).trunc();
            *granted.entry(req.client.clone()).or_insert(Decimal::ZERO) += share;
        }
        return Ok(granted);
    }

    let mut remaining: Vec<Decimal> = group.iter().map(|r| Decimal::from(r.requested)).collect();
    let mut remain = approved;

    while remain > Decimal::ZERO {
        let mut progressed = false;

        for (i, req) in group.iter().enumerate() {
            if remain < CHUNK && remaining[i] >= CHUNK {
                // Sub-chunk tail: the next eligible client absorbs it whole
                *granted.entry(req.client.clone()).or_insert(Decimal::ZERO) += remain;
                remain = Decimal::ZERO;
                progressed = true;
            } else if remaining[i] >= CHUNK {
                remaining[i] -= CHUNK;
                *granted.entry(req.client.clone()).or_insert(Decimal::ZERO) += CHUNK;
                remain -= CHUNK;
                progressed = true;
            }
            // Rows with less than a chunk left are skipped: they never
            // receive further locates even while the pool has remainder.
        }

        // A starved pass cannot make the next one eligible; stop instead of
        // spinning, leaving the rest of the pool unallocated.
        if !progressed {
            break;
        }
    }

    Ok(granted)
}
