//! Live Query Integration Tests
//!
//! Emission on subscribe, re-emission after writes, ordering of list
//! queries and independence of concurrent subscribers.

mod common;

use autocare_core::domain::{ExpenseRecord, MaintenanceRecord, Mechanic, Vehicle};
use autocare_core::port::time_provider::FixedTimeProvider;
use autocare_core::port::VehicleStore;
use autocare_infra_sqlite::{Database, SqliteVehicleStore};
use common::{day, insert_vehicle, next_emission, setup_app};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_emits_current_result_on_subscribe() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "FIRST").await;

    let mut live = app.vehicles().observe_all();
    let vehicles = next_emission(&mut live).await;

    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].id, vehicle_id);
}

#[tokio::test]
async fn test_emits_after_insert_update_delete() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "LIVE").await;

    let mut live = app.expenses().observe_by_vehicle(vehicle_id);
    assert!(next_emission(&mut live).await.is_empty());

    let id = app
        .expenses()
        .insert(&ExpenseRecord::new(vehicle_id, "Fuel", 20.0, "", day(2024, 1, 1)))
        .await
        .unwrap();
    let emitted = next_emission(&mut live).await;
    assert_eq!(emitted.len(), 1);

    let mut expense = emitted[0].clone();
    expense.amount = 22.0;
    app.expenses().update(&expense).await.unwrap();
    assert_eq!(next_emission(&mut live).await[0].amount, 22.0);

    app.expenses().delete_by_id(id).await.unwrap();
    assert!(next_emission(&mut live).await.is_empty());
}

/// Vehicles are listed newest first
#[tokio::test]
async fn test_vehicles_ordered_by_creation_descending() {
    let db = Database::open_in_memory().await.unwrap();
    let store = SqliteVehicleStore::new(db, Arc::new(FixedTimeProvider(1)));

    for (registration, created_at) in [("OLDEST", 100), ("NEWEST", 300), ("MIDDLE", 200)] {
        store
            .insert(&Vehicle::new("Audi", "A4", 2018, registration).with_created_at(created_at))
            .await
            .unwrap();
    }

    let mut live = store.observe_all();
    let order: Vec<String> = next_emission(&mut live)
        .await
        .into_iter()
        .map(|v| v.registration)
        .collect();
    assert_eq!(order, ["NEWEST", "MIDDLE", "OLDEST"]);
}

#[tokio::test]
async fn test_maintenance_by_vehicle_ordered_by_schedule_descending() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "SCHED").await;
    let other = insert_vehicle(&app, "OTHER").await;

    for (vehicle, date) in [
        (vehicle_id, day(2024, 1, 10)),
        (vehicle_id, day(2024, 3, 10)),
        (other, day(2024, 2, 10)),
        (vehicle_id, day(2024, 2, 10)),
    ] {
        app.maintenance()
            .insert(&MaintenanceRecord::new(vehicle, "General Service", "", date))
            .await
            .unwrap();
    }

    let mut live = app.maintenance().observe_by_vehicle(vehicle_id);
    let dates: Vec<i64> = next_emission(&mut live)
        .await
        .iter()
        .map(|r| r.scheduled_date)
        .collect();
    assert_eq!(dates, [day(2024, 3, 10), day(2024, 2, 10), day(2024, 1, 10)]);
}

#[tokio::test]
async fn test_expense_filters() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "FILTER").await;

    for (category, date) in [
        ("Fuel", day(2024, 1, 5)),
        ("Repairs", day(2024, 1, 20)),
        ("Fuel", day(2024, 2, 5)),
        ("Fuel", day(2024, 3, 5)),
    ] {
        app.expenses()
            .insert(&ExpenseRecord::new(vehicle_id, category, 10.0, "", date))
            .await
            .unwrap();
    }

    let mut fuel = app.expenses().observe_by_category(vehicle_id, "Fuel");
    let dates: Vec<i64> = next_emission(&mut fuel).await.iter().map(|e| e.date).collect();
    assert_eq!(dates, [day(2024, 3, 5), day(2024, 2, 5), day(2024, 1, 5)]);

    let mut january = app
        .expenses()
        .observe_by_date_range(vehicle_id, day(2024, 1, 5), day(2024, 1, 20));
    let categories: Vec<String> = next_emission(&mut january)
        .await
        .into_iter()
        .map(|e| e.category)
        .collect();
    assert_eq!(categories, ["Repairs", "Fuel"]);
}

/// Writes to another table do not wake a subscription
#[tokio::test]
async fn test_unrelated_table_does_not_emit() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "QUIET").await;

    let mut mechanics = app.mechanics().observe_by_vehicle(vehicle_id);
    assert!(next_emission(&mut mechanics).await.is_empty());

    app.expenses()
        .insert(&ExpenseRecord::new(vehicle_id, "Fuel", 1.0, "", day(2024, 1, 1)))
        .await
        .unwrap();

    let quiet = tokio::time::timeout(Duration::from_millis(200), mechanics.next()).await;
    assert!(quiet.is_err(), "mechanics query re-emitted on an expense write");
}

/// Cascade deletes wake subscriptions on dependent tables
#[tokio::test]
async fn test_vehicle_delete_wakes_dependent_queries() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "GONE").await;
    app.mechanics()
        .insert(&Mechanic::new(vehicle_id, "Lee", "555-0102"))
        .await
        .unwrap();

    let mut mechanics = app.mechanics().observe_by_vehicle(vehicle_id);
    assert_eq!(next_emission(&mut mechanics).await.len(), 1);

    app.vehicles().delete_by_id(vehicle_id).await.unwrap();
    assert!(next_emission(&mut mechanics).await.is_empty());
}

/// Dropping one subscriber leaves the others and the data untouched
#[tokio::test]
async fn test_subscribers_are_independent() {
    let app = setup_app().await;

    let mut kept = app.vehicles().observe_all();
    let dropped = app.vehicles().observe_all();
    assert!(next_emission(&mut kept).await.is_empty());
    drop(dropped);

    let vehicle_id = insert_vehicle(&app, "AFTER-DROP").await;

    let vehicles = next_emission(&mut kept).await;
    assert_eq!(vehicles.len(), 1);
    assert!(app.vehicles().find_by_id(vehicle_id).await.unwrap().is_some());
}

/// A live query is also a `Stream`
#[tokio::test]
async fn test_live_query_as_stream() {
    let app = setup_app().await;
    let vehicle_id = insert_vehicle(&app, "STREAM").await;

    let live = app.mechanics().observe_by_vehicle(vehicle_id);
    let writer = {
        let mechanics = app.mechanics().clone();
        tokio::spawn(async move {
            for name in ["Ann", "Bob"] {
                mechanics
                    .insert(&Mechanic::new(vehicle_id, name, "1"))
                    .await
                    .unwrap();
            }
        })
    };

    let counts: Vec<usize> = tokio::time::timeout(
        Duration::from_secs(5),
        live.map(|result| result.unwrap().len())
            .skip_while(|count| futures::future::ready(*count < 2))
            .take(1)
            .collect(),
    )
    .await
    .unwrap();

    writer.await.unwrap();
    assert_eq!(counts, [2]);
}
