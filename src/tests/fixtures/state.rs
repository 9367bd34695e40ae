use std::sync::Arc;

use crate::modules::time_tracking::adapters::outbound::in_memory_catalog::InMemoryCatalog;
use crate::modules::time_tracking::adapters::outbound::in_memory_store::InMemoryStore;
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::shell::state::AppState;
use crate::tests::fixtures::at;
use crate::tests::fixtures::clock::FixedClock;

/// Wired state plus handles on the adapters behind it.
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub clock: Arc<FixedClock>,
}

/// Seeded catalog, empty store, clock standing at 09:00 on the fixture day.
pub fn test_state() -> TestContext {
    let store = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let clock = Arc::new(FixedClock::new(at(9, 0)));
    let state = AppState::in_memory(
        store.clone(),
        catalog.clone(),
        clock.clone(),
        AccountingPolicy::default(),
    );
    TestContext {
        state,
        store,
        catalog,
        clock,
    }
}

pub fn offline_state() -> AppState {
    let mut store = InMemoryStore::new();
    store.toggle_offline();
    AppState::in_memory(
        Arc::new(store),
        Arc::new(InMemoryCatalog::seeded()),
        Arc::new(FixedClock::new(at(9, 0))),
        AccountingPolicy::default(),
    )
}
