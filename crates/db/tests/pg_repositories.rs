//! Integration tests for the PostgreSQL repositories.
//!
//! These need a reachable database (`DATABASE_URL`) and are ignored by
//! default; run them with `cargo test -p parkinglot-db -- --ignored`.

use chrono::{Duration, Utc};
use parkinglot_core::ticket::TicketStatus;
use parkinglot_db::models::car::CreateCar;
use parkinglot_db::models::parking::CreateParking;
use parkinglot_db::models::ticket::NewTicket;
use parkinglot_db::models::vacancy::{CreateVacancy, UpdateVacancy};
use parkinglot_db::repositories::{CarRepo, ParkingRepo, TicketRepo, VacancyRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed(pool: &PgPool) -> (i64, i64, i64) {
    let car = CarRepo::create(
        pool,
        &CreateCar {
            manufacture: "Fiat".to_string(),
            model: "Uno".to_string(),
            plate: "ABC123".to_string(),
            color: None,
        },
    )
    .await
    .unwrap();
    let parking = ParkingRepo::create(
        pool,
        &CreateParking {
            name: "Centro".to_string(),
            price_per_hour: Decimal::new(1000, 2),
        },
    )
    .await
    .unwrap();
    let vacancy = VacancyRepo::create(
        pool,
        &CreateVacancy {
            number: "A1".to_string(),
            parking_id: parking.id,
        },
    )
    .await
    .unwrap();
    (car.id, parking.id, vacancy.id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn duplicate_plate_hits_unique_constraint(pool: PgPool) {
    seed(&pool).await;
    let err = CarRepo::create(
        &pool,
        &CreateCar {
            manufacture: "VW".to_string(),
            model: "Gol".to_string(),
            plate: "ABC123".to_string(),
            color: None,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_cars_plate"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn busy_compare_and_set_is_exclusive(pool: PgPool) {
    let (_, _, vacancy_id) = seed(&pool).await;

    let first = VacancyRepo::compare_and_set_busy(&pool, vacancy_id, false, true)
        .await
        .unwrap();
    assert!(first.unwrap().busy);

    let second = VacancyRepo::compare_and_set_busy(&pool, vacancy_id, false, true)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn relabel_preserves_busy_flag(pool: PgPool) {
    let (_, _, vacancy_id) = seed(&pool).await;
    VacancyRepo::set_busy(&pool, vacancy_id, true).await.unwrap();

    let vacancy = VacancyRepo::update_number(
        &pool,
        &UpdateVacancy {
            id: vacancy_id,
            number: "Z9".to_string(),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(vacancy.number, "Z9");
    assert!(vacancy.busy);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn ticket_lifecycle_queries(pool: PgPool) {
    let (car_id, parking_id, vacancy_id) = seed(&pool).await;
    let entry = Utc::now();

    let ticket = TicketRepo::create(
        &pool,
        &NewTicket {
            entry,
            price_per_hour_of_parking: Decimal::new(1000, 2),
            car_id,
            vacancy_id,
        },
    )
    .await
    .unwrap();
    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(TicketRepo::count_by_car(&pool, car_id).await.unwrap(), 1);
    assert_eq!(TicketRepo::count_by_vacancy(&pool, vacancy_id).await.unwrap(), 1);

    let repriced = TicketRepo::reprice_pending_by_parking(&pool, parking_id, Decimal::new(1200, 2))
        .await
        .unwrap();
    assert_eq!(repriced, 1);

    let exit = entry + Duration::minutes(90);
    let processed = TicketRepo::mark_processed(&pool, ticket.id, exit)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(processed.status, TicketStatus::Processed);
    assert_eq!(processed.price_per_hour_of_parking, Decimal::new(1200, 2));
    assert_eq!(processed.paid_value(Utc::now()).unwrap(), Decimal::new(1800, 2));

    assert!(TicketRepo::mark_processed(&pool, ticket.id, exit)
        .await
        .unwrap()
        .is_none());

    assert!(TicketRepo::delete(&pool, ticket.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn referenced_vacancy_cannot_be_deleted(pool: PgPool) {
    let (car_id, _, vacancy_id) = seed(&pool).await;
    TicketRepo::create(
        &pool,
        &NewTicket {
            entry: Utc::now(),
            price_per_hour_of_parking: Decimal::new(1000, 2),
            car_id,
            vacancy_id,
        },
    )
    .await
    .unwrap();

    let err = VacancyRepo::delete(&pool, vacancy_id).await.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}
