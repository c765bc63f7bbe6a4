//! Property-based tests for the reservation workflow.
//!
//! Random request sequences run against a seeded store; the committed rows
//! must never overlap on one spot and the wallet must account for every
//! committed wallet payment.

use crate::amount::Amount;
use crate::database::test_util::{create_seeded_database, date};
use crate::database::Database;
use crate::operations::{reserve, ReservePolicy, ReserveRequest};
use crate::reservation::PaymentMode;
use crate::window::TimeWindow;
use proptest::prelude::*;

// Quarter-hour windows between 06:00 and 22:00, up to three hours long
fn window_strategy() -> impl Strategy<Value = TimeWindow> {
    (24u32..88, 1u32..=12).prop_map(|(start_quarter, quarters)| {
        let start = start_quarter * 900;
        let end = (start + quarters * 900).min(23 * 3600);
        TimeWindow::from_secs(start, end).unwrap()
    })
}

fn request_strategy() -> impl Strategy<Value = (u32, TimeWindow, bool, u64)> {
    (1u32..=3, window_strategy(), any::<bool>(), 0u64..2500)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // No two committed reservations overlap on the same spot
    #[test]
    fn committed_reservations_never_overlap(
        requests in prop::collection::vec(request_strategy(), 1..25)
    ) {
        let (mut db, ids) = create_seeded_database();
        let policy = ReservePolicy::default();

        for (spot_number, window, _, _) in &requests {
            let request = ReserveRequest::new(
                ids.account, ids.car, ids.lot, ids.floor, *spot_number, date(), *window,
            );
            let _ = reserve(&mut db, &request, &policy);
        }

        for spot_number in 1..=3 {
            let spot = Database::resolve_spot(db.connection(), ids.lot, ids.floor, spot_number)
                .unwrap();
            let rows = Database::list_spot_reservations(db.connection(), spot.id, date()).unwrap();
            for pair in rows.windows(2) {
                prop_assert!(
                    pair[0].window().end() <= pair[1].window().start(),
                    "{} overlaps {}",
                    pair[0].window(),
                    pair[1].window()
                );
            }
        }
    }

    // Balance equals the seed balance minus every committed wallet price
    #[test]
    fn wallet_accounts_for_committed_payments(
        requests in prop::collection::vec(request_strategy(), 1..25)
    ) {
        let (mut db, ids) = create_seeded_database();
        let policy = ReservePolicy::default();
        let mut expected = Database::get_balance(db.connection(), ids.account).unwrap().cents();

        for (spot_number, window, by_wallet, cents) in requests {
            let mode = if by_wallet { PaymentMode::Wallet } else { PaymentMode::Online };
            let request = ReserveRequest::new(
                ids.account, ids.car, ids.lot, ids.floor, spot_number, date(), window,
            )
            .with_payment_mode(mode)
            .with_price(Some(Amount::from_cents(cents)));

            match reserve(&mut db, &request, &policy) {
                Ok(reservation) if reservation.payment_mode() == PaymentMode::Wallet => {
                    expected -= reservation.price().cents();
                }
                Ok(_) => {}
                Err(e) => prop_assert!(
                    e.is_insufficient_funds() || matches!(e, crate::Error::SlotUnavailable { .. }),
                    "unexpected error {e:?}"
                ),
            }

            let balance = Database::get_balance(db.connection(), ids.account).unwrap();
            prop_assert_eq!(balance.cents(), expected);
        }
    }
}
