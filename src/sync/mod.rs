//! Chain configuration synchronization.
//!
//! Finality-delayed chain events are applied one at a time. Each event's domain
//! writes and the cursor advance share one transaction, so a restart resumes
//! exactly after the last committed event.

mod applier;
mod error;
mod handlers;
mod pipeline;
mod reconciler;
#[cfg(test)]
mod tests;

pub(crate) use error::SyncError;
pub(crate) use pipeline::run_sync_pipeline;
