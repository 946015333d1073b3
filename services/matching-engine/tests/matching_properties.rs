//! Book-level behavioral properties
//!
//! Covers ledger reconciliation, priority, partial fills, maker pricing,
//! and cancellation semantics against the single-token matching core.

use std::collections::HashMap;

use matching_engine::{EngineConfig, SubmitOutcome, TokenBook};
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::errors::CoreError;
use types::ids::{TokenId, UserId};
use types::numeric::{Amount, Price};
use types::order::{OrderDraft, OrderStatus, Side};

const T0: i64 = 1708123456789000000;

fn draft(token_id: TokenId, side: Side, price: u64, amount: u64) -> OrderDraft {
    OrderDraft {
        token_id,
        user_id: UserId::new(),
        side,
        price: Price::from_u64(price),
        amount: Amount::try_new(Decimal::from(amount)).unwrap(),
    }
}

/// Aggregate per (side, price) over open/partial orders must equal the
/// ledger's level aggregates, and the resting book must never be crossed.
fn assert_reconciled(book: &TokenBook) {
    let mut expected: HashMap<(Side, Price), Decimal> = HashMap::new();
    for order in book.open_orders() {
        *expected.entry((order.side, order.price)).or_default() +=
            order.remaining().as_decimal();
    }

    let depth = usize::MAX;
    let bid_levels = book.bids().top_n(depth);
    let ask_levels = book.asks().top_n(depth);

    let ledger_count = bid_levels.len() + ask_levels.len();
    assert_eq!(
        ledger_count,
        expected.len(),
        "ledger level count diverged from open orders"
    );

    for (price, amount) in bid_levels {
        assert!(
            amount.as_decimal() > Decimal::ZERO,
            "non-positive bid level exposed at {price}"
        );
        assert_eq!(expected.get(&(Side::Buy, price)), Some(&amount.as_decimal()));
    }
    for (price, amount) in ask_levels {
        assert!(
            amount.as_decimal() > Decimal::ZERO,
            "non-positive ask level exposed at {price}"
        );
        assert_eq!(
            expected.get(&(Side::Sell, price)),
            Some(&amount.as_decimal())
        );
    }

    // A quiescent book cannot remain crossed
    if let Some(spread) = book.spread() {
        assert!(spread > Decimal::ZERO, "book left crossed, spread {spread}");
    }
}

proptest! {
    #[test]
    fn ledger_reconciles_after_any_submission_sequence(
        ops in prop::collection::vec(
            (any::<bool>(), 1u64..=6, 1u64..=9, any::<bool>()),
            1..60,
        )
    ) {
        let token_id = TokenId::new();
        let mut book = TokenBook::new(token_id, EngineConfig::default());
        let mut submitted = Vec::new();
        let mut ts = T0;

        for (is_buy, price, amount, cancel_prior) in ops {
            ts += 1000;
            let side = if is_buy { Side::Buy } else { Side::Sell };
            let (outcome, _) = book
                .submit(draft(token_id, side, price * 10, amount), ts)
                .unwrap();
            submitted.push(outcome.order().id);

            if cancel_prior && submitted.len() > 1 {
                ts += 1000;
                let target = submitted[submitted.len() / 2];
                // Terminal orders reject the cancel; that is fine here
                match book.cancel(&target, ts) {
                    Ok(_) => {}
                    Err(CoreError::InvalidTransition { .. }) => {}
                    Err(other) => panic!("unexpected cancel error: {other}"),
                }
            }

            assert_reconciled(&book);
        }

        // Conservation: every trade's amount is counted once on each side
        let traded: Decimal = book
            .recent_trades(usize::MAX)
            .iter()
            .map(|t| t.amount.as_decimal())
            .sum();
        let filled: Decimal = submitted
            .iter()
            .map(|id| book.get_order(id).unwrap().filled_amount.as_decimal())
            .sum();
        prop_assert_eq!(filled, traded * Decimal::from(2));
    }
}

#[test]
fn time_priority_at_equal_price() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    let (first, _) = book.submit(draft(token_id, Side::Sell, 50, 5), T0).unwrap();
    let (second, _) = book
        .submit(draft(token_id, Side::Sell, 50, 5), T0 + 1)
        .unwrap();

    let (outcome, _) = book
        .submit(draft(token_id, Side::Buy, 50, 7), T0 + 2)
        .unwrap();

    let trades = outcome.trades();
    assert_eq!(trades.len(), 2);
    // Earlier sell fills completely before the later one is touched
    assert_eq!(trades[0].sell_order_id, first.order().id);
    assert_eq!(trades[0].amount, Amount::try_new(Decimal::from(5)).unwrap());
    assert_eq!(trades[1].sell_order_id, second.order().id);
    assert_eq!(trades[1].amount, Amount::try_new(Decimal::from(2)).unwrap());
}

#[test]
fn partial_fill_rests_at_original_price() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    let (sell, _) = book.submit(draft(token_id, Side::Sell, 40, 6), T0).unwrap();
    let (outcome, _) = book
        .submit(draft(token_id, Side::Buy, 45, 10), T0 + 1)
        .unwrap();

    match outcome {
        SubmitOutcome::PartiallyFilled { order, trades } => {
            assert_eq!(trades.len(), 1);
            assert_eq!(trades[0].amount, Amount::try_new(Decimal::from(6)).unwrap());
            assert_eq!(order.filled_amount, Amount::try_new(Decimal::from(6)).unwrap());
            // Remainder rests at the buy's own limit price, not the trade price
            assert_eq!(
                book.bids().amount_at(Price::from_u64(45)),
                Amount::try_new(Decimal::from(4)).unwrap()
            );
        }
        other => panic!("expected PartiallyFilled, got {other:?}"),
    }

    assert_eq!(
        book.get_order(&sell.order().id).unwrap().status,
        OrderStatus::Filled
    );
}

#[test]
fn maker_price_applies_to_crossed_submissions() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    book.submit(draft(token_id, Side::Buy, 105, 3), T0).unwrap();
    let (outcome, _) = book
        .submit(draft(token_id, Side::Sell, 100, 3), T0 + 1)
        .unwrap();

    let trades = outcome.trades();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price::from_u64(105));
}

#[test]
fn cancelled_order_cannot_cancel_again() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    let (outcome, _) = book.submit(draft(token_id, Side::Buy, 50, 2), T0).unwrap();
    let order_id = outcome.order().id;

    book.cancel(&order_id, T0 + 1).unwrap();
    let view_before = book.view(10);

    let err = book.cancel(&order_id, T0 + 2).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTransition { .. }));
    assert_eq!(book.view(10), view_before);
}

#[test]
fn full_round_trip_leaves_empty_ledger() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    let (buy, _) = book.submit(draft(token_id, Side::Buy, 50, 3), T0).unwrap();
    let (outcome, _) = book
        .submit(draft(token_id, Side::Sell, 50, 3), T0 + 1)
        .unwrap();

    let trades = outcome.trades();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price::from_u64(50));
    assert_eq!(trades[0].amount, Amount::try_new(Decimal::from(3)).unwrap());

    assert_eq!(
        book.get_order(&buy.order().id).unwrap().status,
        OrderStatus::Filled
    );
    assert_eq!(outcome.order().status, OrderStatus::Filled);

    assert!(book.bids().is_empty());
    assert!(book.asks().is_empty());
    assert!(book.spread().is_none());
}

#[test]
fn depth_view_reports_totals() {
    let token_id = TokenId::new();
    let mut book = TokenBook::new(token_id, EngineConfig::default());

    book.submit(draft(token_id, Side::Buy, 99, 2), T0).unwrap();
    book.submit(draft(token_id, Side::Buy, 98, 1), T0 + 1).unwrap();
    book.submit(draft(token_id, Side::Sell, 101, 4), T0 + 2).unwrap();

    let view = book.view(15);
    assert_eq!(view.bids.len(), 2);
    assert_eq!(view.asks.len(), 1);
    assert_eq!(view.bids[0].price, Price::from_u64(99));
    assert_eq!(view.bids[0].total, Decimal::from(198));
    assert_eq!(view.asks[0].total, Decimal::from(404));
    assert_eq!(view.spread(), Some(Decimal::from(2)));
}
