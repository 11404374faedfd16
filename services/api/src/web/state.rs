//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use agency_core::{
    invoice::InvoiceSequence, orchestrator::ContentOrchestrator, ports::ProjectRepository,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: ContentOrchestrator,
    pub repository: Arc<dyn ProjectRepository>,
    pub invoices: Arc<InvoiceSequence>,
    pub config: Arc<Config>,
}
