use std::sync::Arc;

use crate::modules::time_tracking::adapters::outbound::in_memory_catalog::InMemoryCatalog;
use crate::modules::time_tracking::adapters::outbound::in_memory_store::InMemoryStore;
use crate::modules::time_tracking::core::decision::{DecideError, ErrorKind};
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::shell::state::AppState;
use crate::tests::fixtures::at;
use crate::tests::fixtures::clock::FixedClock;
use crate::tests::fixtures::commands::clock_in::ClockInBuilder;
use crate::tests::fixtures::state::{TestContext, test_state};

#[tokio::test]
async fn a_second_clock_in_is_rejected_and_writes_nothing() {
    let TestContext { state, store, .. } = test_state();

    state
        .clock_in_handler
        .handle(ClockInBuilder::new().time_entry_id("te-1").build())
        .await
        .unwrap();
    let error = state
        .clock_in_handler
        .handle(ClockInBuilder::new().time_entry_id("te-2").at(at(10, 0)).build())
        .await
        .unwrap_err();

    assert_eq!(error, ApplicationError::Domain(DecideError::AlreadyClockedIn));
    assert_eq!(store.entry_count("user-1").await, 1);
}

#[tokio::test]
async fn other_users_clock_in_independently() {
    let TestContext { state, store, .. } = test_state();

    for user in ["user-1", "user-2"] {
        state
            .clock_in_handler
            .handle(
                ClockInBuilder::new()
                    .time_entry_id(format!("te-{user}"))
                    .user_id(user)
                    .build(),
            )
            .await
            .unwrap();
    }

    assert_eq!(store.entry_count("user-1").await, 1);
    assert_eq!(store.entry_count("user-2").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clock_ins_leave_exactly_one_open_entry() {
    let store = InMemoryStore::new();
    store.set_delay_lookup_ms(20);
    let store = Arc::new(store);
    let state = AppState::in_memory(
        store.clone(),
        Arc::new(InMemoryCatalog::seeded()),
        Arc::new(FixedClock::new(at(9, 0))),
        AccountingPolicy::default(),
    );

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .clock_in_handler
                    .handle(ClockInBuilder::new().time_entry_id(format!("te-{n}")).build())
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(error) => assert_eq!(error.kind(), ErrorKind::StateConflict),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(store.entry_count("user-1").await, 1);
}
