//! Service wiring tests
//!
//! Exercises the reconciliation service exactly as the handlers wire it in
//! `AppState`, using the shared test builders instead of HTTP round trips.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_orders::OrderStatus;
use domain_payments::gateway::mock::MockCardGateway;
use domain_payments::store::mock::MemoryReconciliationStore;
use domain_payments::{PaymentError, PaymentOutcome, ReconciliationStore};
use test_utils::{
    assert_money_eq, assert_order_status, pending_order_with_total, random_transaction_reference,
    MoneyFixtures, TestOrderBuilder,
};

use domain_catalog::ports::mock::MockCatalogStore;
use domain_catalog::TemplateGenerator;
use interface_api::{config::ApiConfig, AppState};
use sqlx::postgres::PgPoolOptions;

fn wired_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/shinqit_test")
        .expect("lazy pool");

    AppState::new(
        pool,
        ApiConfig::default(),
        Arc::new(MockCatalogStore::new()),
        Arc::new(TemplateGenerator::new()),
        Arc::new(MemoryReconciliationStore::new()),
        Arc::new(MockCardGateway::new()),
    )
}

#[tokio::test]
async fn test_state_service_shares_the_handler_store() {
    let state = wired_state();
    let order = pending_order_with_total(100_000);
    let order_id = order.id;

    // Handlers persist through state.store; the service must see the order
    state.store.create_order(order).await.unwrap();
    let outcome = state
        .reconciliation
        .initiate_payment(order_id, "BANKILY", Some(random_transaction_reference()))
        .await
        .unwrap();

    let payment = match outcome {
        PaymentOutcome::LocalPending(p) => p,
        other => panic!("expected local pending, got {other:?}"),
    };

    let stored = state.store.get_order(order_id).await.unwrap();
    assert_order_status(&stored, OrderStatus::AwaitingConfirmation);

    let approval = state
        .reconciliation
        .approve_local_payment(payment.id)
        .await
        .unwrap();
    assert_order_status(&approval.order, OrderStatus::Paid);
    assert_money_eq(
        approval.commission.amount,
        Money::new(dec!(50.00), Currency::MRU),
    );
}

#[tokio::test]
async fn test_configured_commission_rate_flows_into_service() {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/shinqit_test")
        .expect("lazy pool");
    let config = ApiConfig {
        commission_rate: dec!(0.10),
        ..Default::default()
    };
    let state = AppState::new(
        pool,
        config,
        Arc::new(MockCatalogStore::new()),
        Arc::new(TemplateGenerator::new()),
        Arc::new(MemoryReconciliationStore::new()),
        Arc::new(MockCardGateway::new()),
    );

    let order = TestOrderBuilder::new()
        .with_total(MoneyFixtures::mru_1000())
        .build();
    let order_id = order.id;
    state.store.create_order(order).await.unwrap();

    let confirmed = state
        .reconciliation
        .confirm_gateway_payment(order_id, "pi_rate_check")
        .await
        .unwrap();
    assert_order_status(&confirmed, OrderStatus::Paid);

    let commissions = state.store.list_commissions(order_id).await.unwrap();
    assert_eq!(commissions.len(), 1);
    assert_money_eq(
        commissions[0].amount,
        Money::new(dec!(100.00), Currency::MRU),
    );
}

#[tokio::test]
async fn test_already_paid_order_rejects_local_submission() {
    let state = wired_state();
    let order = TestOrderBuilder::new().paid().build();
    let order_id = order.id;
    state.store.create_order(order).await.unwrap();

    let err = state
        .reconciliation
        .initiate_payment(order_id, "BANKILY", Some("TX-LATE".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::InvalidTransition { .. }));
}
