//! Shared fixtures for the integration suites

#![allow(dead_code)]

use autocare_app::App;
use autocare_core::application::Observable;
use autocare_core::domain::date::utc_millis;
use autocare_core::domain::{Vehicle, VehicleId};
use autocare_core::port::time_provider::FixedTimeProvider;
use autocare_core::port::LiveQuery;
use autocare_infra_sqlite::Database;
use std::sync::Arc;
use std::time::Duration;

/// Clock used by every fixture app: 2024-06-15 00:00:00 UTC
pub const NOW: i64 = 1_718_409_600_000;

const TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory app whose stores stamp `NOW`
pub async fn setup_app() -> App {
    let db = Database::open_in_memory().await.unwrap();
    App::with_database(db, Arc::new(FixedTimeProvider(NOW)))
}

pub async fn insert_vehicle(app: &App, registration: &str) -> VehicleId {
    app.vehicles()
        .insert(&Vehicle::new("Toyota", "Corolla", 2019, registration))
        .await
        .unwrap()
}

/// Midnight UTC of a calendar day
pub fn day(year: i32, month: u32, day: u32) -> i64 {
    utc_millis(year, month, day).unwrap()
}

/// Next emission of a live query, failing the test after a timeout
pub async fn next_emission<T>(live: &mut LiveQuery<T>) -> T {
    tokio::time::timeout(TIMEOUT, live.next())
        .await
        .expect("live query emission timed out")
        .expect("live query ended")
        .expect("live query failed")
}

/// Wait until `cell` satisfies `predicate` and return that value
pub async fn wait_for<T, F>(cell: &Observable<T>, mut predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let mut rx = cell.subscribe();
    let value = tokio::time::timeout(TIMEOUT, rx.wait_for(|value| predicate(value)))
        .await
        .expect("state cell never reached the expected value")
        .expect("state cell closed");
    let snapshot = value.clone();
    snapshot
}
