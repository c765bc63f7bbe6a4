//! End-to-end reservation scenarios against a real store file.

mod common;

use common::{day, parse_window, TestStore};
use parkade::operations::{reserve, ReservePolicy};
use parkade::{Amount, Database, Error, ErrorKind, PaymentFailureReason, PaymentMode};

fn count_reservations(db: &Database) -> i64 {
    db.connection()
        .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))
        .unwrap()
}

/// Balance 50, price 20 by wallet, then a repeat, then a price the wallet
/// can no longer cover.
#[test]
fn test_wallet_scenario() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();
    let policy = ReservePolicy::default();

    let request = ids
        .sam_request(3, "09:00-10:00")
        .with_payment_mode(PaymentMode::Wallet)
        .with_price(Some(Amount::from_cents(2000)));

    let first = reserve(&mut db, &request, &policy).unwrap();
    assert_eq!(
        Database::get_balance(db.connection(), ids.sam).unwrap(),
        Amount::from_cents(3000)
    );

    let err = reserve(&mut db, &request, &policy).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SlotUnavailable);
    match err {
        Error::SlotUnavailable { conflicting, .. } => assert_eq!(conflicting, Some(first.id())),
        other => panic!("expected SlotUnavailable, got {other:?}"),
    }

    let expensive = ids
        .sam_request(3, "12:00-13:00")
        .with_payment_mode(PaymentMode::Wallet)
        .with_price(Some(Amount::from_cents(4000)));
    let err = reserve(&mut db, &expensive, &policy).unwrap_err();
    match err {
        Error::PaymentFailed {
            reason: PaymentFailureReason::InsufficientFunds { balance, requested },
        } => {
            assert_eq!(balance, Amount::from_cents(3000));
            assert_eq!(requested, Amount::from_cents(4000));
        }
        other => panic!("expected PaymentFailed, got {other:?}"),
    }

    assert_eq!(
        Database::get_balance(db.connection(), ids.sam).unwrap(),
        Amount::from_cents(3000)
    );
    assert_eq!(count_reservations(&db), 1);
}

#[test]
fn test_half_open_windows_share_a_boundary() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();
    let policy = ReservePolicy::default();

    reserve(&mut db, &ids.sam_request(1, "10:00-11:00"), &policy).unwrap();
    reserve(&mut db, &ids.sam_request(1, "11:00-12:00"), &policy).unwrap();
    let err = reserve(&mut db, &ids.sam_request(1, "10:30-11:30"), &policy).unwrap_err();
    assert!(matches!(err, Error::SlotUnavailable { .. }));
}

#[test]
fn test_round_trip_through_availability_and_history() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();

    let request = ids
        .sam_request(2, "08:00-09:30")
        .with_payment_mode(PaymentMode::Wallet);
    let reservation = reserve(&mut db, &request, &ReservePolicy::default()).unwrap();

    // Lot price applies when no price is given
    assert_eq!(reservation.price(), Amount::from_cents(2000));
    assert_eq!(
        Database::get_balance(db.connection(), ids.sam).unwrap(),
        Amount::from_cents(3000)
    );

    let conn = db.connection();
    let occupied = Database::find_occupied_spots(
        conn,
        ids.harbor,
        ids.harbor_ground,
        day(),
        &parse_window("09:00-10:00"),
    )
    .unwrap();
    assert!(occupied.contains(&reservation.spot_id()));

    let availability = Database::floor_availability(
        conn,
        ids.harbor,
        ids.harbor_ground,
        day(),
        &parse_window("09:00-10:00"),
    )
    .unwrap();
    assert_eq!(availability.capacity, 4);
    assert_eq!(availability.free, 3);
    assert_eq!(availability.occupied[0].reservation_id, reservation.id());

    let history = Database::history(conn, ids.sam).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].lot_name, "Harbor");
    assert_eq!(history[0].spot_number, 2);
    assert_eq!(history[0].plate, "12A345");
    assert_eq!(history[0].payment_mode, PaymentMode::Wallet);
}

#[test]
fn test_spot_price_overrides_lot_price() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();

    let mut request = ids.sam_request(4, "09:00-10:00");
    request.floor_id = ids.harbor_upper;
    let reservation = reserve(&mut db, &request, &ReservePolicy::default()).unwrap();
    assert_eq!(reservation.price(), Amount::from_cents(3550));
}

#[test]
fn test_floor_must_belong_to_lot() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();

    let mut request = ids.sam_request(1, "09:00-10:00");
    request.floor_id = ids.station_basement;
    let err = reserve(&mut db, &request, &ReservePolicy::default()).unwrap_err();
    assert!(matches!(err, Error::SpotNotFound { .. }));

    let err = Database::floor_availability(
        db.connection(),
        ids.harbor,
        ids.station_basement,
        day(),
        &parse_window("09:00-10:00"),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_empty_wallet_can_still_pay_online() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();

    let mut request = ids.sam_request(1, "09:00-10:00");
    request.account_id = ids.jo;
    request.car_id = ids.jo_car;

    let err = reserve(
        &mut db,
        &request.clone().with_payment_mode(PaymentMode::Wallet),
        &ReservePolicy::default(),
    )
    .unwrap_err();
    assert!(err.is_insufficient_funds());
    assert_eq!(count_reservations(&db), 0);

    let reservation = reserve(&mut db, &request, &ReservePolicy::default()).unwrap();
    assert_eq!(reservation.payment_mode(), PaymentMode::Online);
    assert_eq!(reservation.plate(), "EV0001");
    assert!(Database::get_balance(db.connection(), ids.jo)
        .unwrap()
        .is_zero());
}

#[test]
fn test_round_the_clock_lot_with_operating_hours_enforced() {
    let (store, ids) = TestStore::seeded();
    let mut db = store.open();
    let policy = ReservePolicy {
        max_window_minutes: None,
        enforce_operating_hours: true,
    };

    let mut night = ids.sam_request(1, "02:00-04:00");
    night.lot_id = ids.station;
    night.floor_id = ids.station_basement;
    reserve(&mut db, &night, &policy).unwrap();

    // Harbor opens at 06:00
    let err = reserve(&mut db, &ids.sam_request(1, "02:00-04:00"), &policy).unwrap_err();
    assert!(matches!(err, Error::InvalidWindow { .. }));
}

#[test]
fn test_reopened_store_keeps_reservations() {
    let (store, ids) = TestStore::seeded();
    let id = {
        let mut db = store.open();
        reserve(&mut db, &ids.sam_request(1, "09:00-10:00"), &ReservePolicy::default())
            .unwrap()
            .id()
    };

    let db = store.open();
    let loaded = Database::get_reservation(db.connection(), id).unwrap();
    assert_eq!(loaded.window().to_string(), "09:00-10:00");
    assert_eq!(loaded.date(), day());
}
