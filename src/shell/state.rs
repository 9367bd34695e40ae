use std::sync::Arc;

use crate::modules::time_tracking::adapters::outbound::in_memory_catalog::InMemoryCatalog;
use crate::modules::time_tracking::adapters::outbound::in_memory_store::InMemoryStore;
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::modules::time_tracking::use_cases::build_summaries::builder::SummaryBuilder;
use crate::modules::time_tracking::use_cases::clock_in::handler::ClockInHandler;
use crate::modules::time_tracking::use_cases::clock_out::handler::ClockOutHandler;
use crate::modules::time_tracking::use_cases::current_session::handler::CurrentSessionHandler;
use crate::modules::time_tracking::use_cases::end_break::handler::EndBreakHandler;
use crate::modules::time_tracking::use_cases::list_catalog::handler::ListCatalogHandler;
use crate::modules::time_tracking::use_cases::list_time_entries_by_user::handler::ListTimeEntriesHandler;
use crate::modules::time_tracking::use_cases::start_break::handler::StartBreakHandler;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::in_flight::InFlightRequests;

pub type InMemorySummaries = SummaryBuilder<InMemoryStore, InMemoryStore, InMemoryStore>;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub clock_in_handler: Arc<ClockInHandler<InMemoryStore, InMemoryCatalog>>,
    pub clock_out_handler: Arc<ClockOutHandler<InMemoryStore, InMemoryStore, InMemoryStore>>,
    pub start_break_handler: Arc<StartBreakHandler<InMemoryStore, InMemoryStore>>,
    pub end_break_handler: Arc<EndBreakHandler<InMemoryStore, InMemoryStore>>,
    pub summaries: Arc<InMemorySummaries>,
    pub session_handler: Arc<CurrentSessionHandler<InMemoryStore, InMemoryStore>>,
    pub list_handler: Arc<ListTimeEntriesHandler<InMemoryStore, InMemoryStore>>,
    pub catalog_handler: Arc<ListCatalogHandler<InMemoryCatalog>>,
}

impl AppState {
    /// Wires every handler onto one store, which plays the entry, break and
    /// summary roles at once. All write handlers share a single in-flight guard.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        catalog: Arc<InMemoryCatalog>,
        clock: Arc<dyn Clock>,
        policy: AccountingPolicy,
    ) -> Self {
        let in_flight = Arc::new(InFlightRequests::new());
        let summaries = Arc::new(SummaryBuilder::new(
            store.clone(),
            store.clone(),
            store.clone(),
            policy,
        ));

        Self {
            clock,
            clock_in_handler: Arc::new(ClockInHandler::new(
                store.clone(),
                catalog.clone(),
                in_flight.clone(),
            )),
            clock_out_handler: Arc::new(ClockOutHandler::new(
                store.clone(),
                store.clone(),
                summaries.clone(),
                in_flight.clone(),
            )),
            start_break_handler: Arc::new(StartBreakHandler::new(
                store.clone(),
                store.clone(),
                in_flight.clone(),
            )),
            end_break_handler: Arc::new(EndBreakHandler::new(
                store.clone(),
                store.clone(),
                in_flight,
            )),
            summaries,
            session_handler: Arc::new(CurrentSessionHandler::new(
                store.clone(),
                store.clone(),
                policy,
            )),
            list_handler: Arc::new(ListTimeEntriesHandler::new(store.clone(), store, policy)),
            catalog_handler: Arc::new(ListCatalogHandler::new(catalog)),
        }
    }
}
