//! Service layer for business logic with dependency injection.
//!
//! Services accept the storage traits from sprig-core and sprig-fs so the
//! command logic can be unit tested against in-memory mocks.

pub mod branch;
pub mod checkout;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod staging;
pub mod status;

#[cfg(test)]
pub mod test_mocks;

pub use branch::BranchService;
pub use checkout::{CheckoutOutcome, CheckoutService};
pub use log::{CommitInfo, LogService, format_timestamp};
pub use merge::MergeService;
pub use rebase::RebaseService;
pub use staging::StagingService;
pub use status::{StatusReport, StatusService};

use sprig_core::{CommitGraph, StateStore};

/// Load the graph, run `op` against it and save it only if `op` succeeds.
///
/// A failed operation never reaches disk.
pub fn transact<S, T, F>(state: &S, op: F) -> sprig_core::Result<T>
where
    S: StateStore,
    F: FnOnce(&mut CommitGraph) -> sprig_core::Result<T>,
{
    let mut graph = state.load_graph()?;
    let value = op(&mut graph)?;
    state.save_graph(&graph)?;
    Ok(value)
}
