//! Reconciliation repository implementation
//!
//! PostgreSQL adapter for the `ReconciliationStore` port. Every mutating
//! operation runs in a single transaction and takes row locks
//! (`SELECT ... FOR UPDATE`) before its read-check-write sequence, so
//! concurrent requests against the same order or payment serialize and the
//! loser observes the committed state instead of racing it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{Currency, DomainPort, LocalPaymentId, Money, OrderId, Rate};
use domain_orders::{CommissionRecord, Order, OrderLine, OrderStatus};
use domain_payments::{ApprovalOutcome, LocalPayment, PaymentError, ReconciliationStore};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the ReconciliationStore trait
#[derive(Debug, Clone)]
pub struct PgReconciliationStore {
    pool: PgPool,
}

impl PgReconciliationStore {
    /// Creates a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    buyer_id: Uuid,
    status: String,
    total_amount: Decimal,
    currency: String,
    settlement_reference: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    product_id: Uuid,
    title: String,
    quantity: i32,
    unit_price: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct LocalPaymentRow {
    local_payment_id: Uuid,
    order_id: Uuid,
    transaction_reference: String,
    is_verified: bool,
    submitted_at: DateTime<Utc>,
    verified_at: Option<DateTime<Utc>>,
}

impl From<LocalPaymentRow> for LocalPayment {
    fn from(row: LocalPaymentRow) -> Self {
        LocalPayment {
            id: row.local_payment_id.into(),
            order_id: row.order_id.into(),
            transaction_reference: row.transaction_reference,
            verified: row.is_verified,
            submitted_at: row.submitted_at,
            verified_at: row.verified_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommissionRow {
    commission_id: Uuid,
    order_id: Uuid,
    local_payment_id: Option<Uuid>,
    rate: Decimal,
    amount: Decimal,
    currency: String,
    computed_at: DateTime<Utc>,
}

impl CommissionRow {
    fn into_record(self) -> Result<CommissionRecord, PaymentError> {
        let currency = parse_currency(&self.currency)?;
        Ok(CommissionRecord {
            id: self.commission_id.into(),
            order_id: self.order_id.into(),
            local_payment_id: self.local_payment_id.map(Into::into),
            rate: Rate::new(self.rate),
            amount: Money::new(self.amount, currency),
            computed_at: self.computed_at,
        })
    }
}

// ============================================================================
// Mapping helpers
// ============================================================================

fn store_err(error: sqlx::Error) -> PaymentError {
    PaymentError::Store(DatabaseError::from(&error).to_string())
}

fn parse_currency(code: &str) -> Result<Currency, PaymentError> {
    code.parse()
        .map_err(|e: core_kernel::MoneyError| PaymentError::Store(e.to_string()))
}

fn parse_status(status: &str) -> Result<OrderStatus, PaymentError> {
    status
        .parse::<OrderStatus>()
        .map_err(|e| PaymentError::Store(e.to_string()))
}

fn assemble_order(row: OrderRow, lines: Vec<OrderLineRow>) -> Result<Order, PaymentError> {
    let currency = parse_currency(&row.currency)?;
    let status = parse_status(&row.status)?;

    let lines = lines
        .into_iter()
        .map(|l| {
            OrderLine::new(
                l.product_id.into(),
                l.title,
                l.quantity as u32,
                Money::new(l.unit_price, currency),
            )
        })
        .collect();

    Ok(Order {
        id: row.order_id.into(),
        buyer_id: row.buyer_id.into(),
        status,
        lines,
        total: Money::new(row.total_amount, currency),
        settlement_reference: row.settlement_reference,
        paid_at: row.paid_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

const SELECT_ORDER: &str = r#"
    SELECT order_id, buyer_id, status, total_amount, currency,
           settlement_reference, paid_at, created_at, updated_at
    FROM orders
    WHERE order_id = $1
"#;

const SELECT_ORDER_FOR_UPDATE: &str = r#"
    SELECT order_id, buyer_id, status, total_amount, currency,
           settlement_reference, paid_at, created_at, updated_at
    FROM orders
    WHERE order_id = $1
    FOR UPDATE
"#;

const SELECT_LINES: &str = r#"
    SELECT product_id, title, quantity, unit_price
    FROM order_lines
    WHERE order_id = $1
    ORDER BY position
"#;

async fn fetch_lines(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> Result<Vec<OrderLineRow>, PaymentError> {
    sqlx::query_as(SELECT_LINES)
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(store_err)
}

async fn insert_commission(
    tx: &mut Transaction<'_, Postgres>,
    commission: &CommissionRecord,
) -> Result<(), PaymentError> {
    sqlx::query(
        r#"
        INSERT INTO commission_records (
            commission_id, order_id, local_payment_id,
            rate, amount, currency, computed_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::from(commission.id))
    .bind(Uuid::from(commission.order_id))
    .bind(commission.local_payment_id.map(Uuid::from))
    .bind(commission.rate.as_decimal())
    .bind(commission.amount.amount())
    .bind(commission.amount.currency().code())
    .bind(commission.computed_at)
    .execute(&mut **tx)
    .await
    .map_err(store_err)?;

    Ok(())
}

// ============================================================================
// Port implementation
// ============================================================================

impl DomainPort for PgReconciliationStore {}

#[async_trait]
impl ReconciliationStore for PgReconciliationStore {
    async fn create_order(&self, order: Order) -> Result<Order, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id, buyer_id, status, total_amount, currency,
                settlement_reference, paid_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(order.id))
        .bind(Uuid::from(order.buyer_id))
        .bind(order.status.as_str())
        .bind(order.total.amount())
        .bind(order.total.currency().code())
        .bind(&order.settlement_reference)
        .bind(order.paid_at)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines (
                    order_id, position, product_id, title, quantity, unit_price
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::from(order.id))
            .bind(position as i32)
            .bind(Uuid::from(line.product_id))
            .bind(&line.title)
            .bind(line.quantity as i32)
            .bind(line.unit_price.amount())
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;
        }

        tx.commit().await.map_err(store_err)?;
        debug!(order_id = %order.id, "order persisted");
        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let row: Option<OrderRow> = sqlx::query_as(SELECT_ORDER)
            .bind(Uuid::from(id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?;
        let row = row.ok_or(PaymentError::OrderNotFound(id))?;
        let lines = fetch_lines(&mut tx, row.order_id).await?;

        tx.commit().await.map_err(store_err)?;
        assemble_order(row, lines)
    }

    async fn get_local_payment(&self, id: LocalPaymentId) -> Result<LocalPayment, PaymentError> {
        let row: Option<LocalPaymentRow> = sqlx::query_as(
            r#"
            SELECT local_payment_id, order_id, transaction_reference,
                   is_verified, submitted_at, verified_at
            FROM local_payments
            WHERE local_payment_id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(LocalPayment::from)
            .ok_or(PaymentError::PaymentNotFound(id))
    }

    async fn list_unverified_payments(&self) -> Result<Vec<LocalPayment>, PaymentError> {
        let rows: Vec<LocalPaymentRow> = sqlx::query_as(
            r#"
            SELECT local_payment_id, order_id, transaction_reference,
                   is_verified, submitted_at, verified_at
            FROM local_payments
            WHERE NOT is_verified
            ORDER BY submitted_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(LocalPayment::from).collect())
    }

    async fn record_local_payment(
        &self,
        payment: LocalPayment,
    ) -> Result<LocalPayment, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let row: Option<OrderRow> = sqlx::query_as(SELECT_ORDER_FOR_UPDATE)
            .bind(Uuid::from(payment.order_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?;
        let row = row.ok_or(PaymentError::OrderNotFound(payment.order_id))?;

        let status = parse_status(&row.status)?;
        if status != OrderStatus::Pending {
            return Err(PaymentError::InvalidTransition {
                from: status,
                to: OrderStatus::AwaitingConfirmation,
            });
        }

        let insert = sqlx::query(
            r#"
            INSERT INTO local_payments (
                local_payment_id, order_id, transaction_reference,
                is_verified, submitted_at, verified_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(payment.id))
        .bind(Uuid::from(payment.order_id))
        .bind(&payment.transaction_reference)
        .bind(payment.verified)
        .bind(payment.submitted_at)
        .bind(payment.verified_at)
        .execute(&mut *tx)
        .await;

        if let Err(error) = insert {
            // The unique index on transaction_reference is the uniqueness
            // guarantee; surface it as the distinct duplicate error.
            if let sqlx::Error::Database(db_err) = &error {
                if db_err.code().as_deref() == Some("23505") {
                    return match db_err.constraint() {
                        Some("local_payments_transaction_reference_key") => Err(
                            PaymentError::DuplicateReference(payment.transaction_reference),
                        ),
                        _ => Err(PaymentError::AlreadyProcessed(
                            payment.order_id.to_string(),
                        )),
                    };
                }
            }
            return Err(store_err(error));
        }

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3
            WHERE order_id = $1
            "#,
        )
        .bind(Uuid::from(payment.order_id))
        .bind(OrderStatus::AwaitingConfirmation.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        debug!(payment_id = %payment.id, "local payment recorded");
        Ok(payment)
    }

    async fn approve_local_payment(
        &self,
        id: LocalPaymentId,
        commission: CommissionRecord,
    ) -> Result<ApprovalOutcome, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let payment_row: Option<LocalPaymentRow> = sqlx::query_as(
            r#"
            SELECT local_payment_id, order_id, transaction_reference,
                   is_verified, submitted_at, verified_at
            FROM local_payments
            WHERE local_payment_id = $1
            FOR UPDATE
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(store_err)?;
        let payment_row = payment_row.ok_or(PaymentError::PaymentNotFound(id))?;

        // The decisive idempotency check: re-read under the row lock
        if payment_row.is_verified {
            return Err(PaymentError::AlreadyProcessed(id.to_string()));
        }

        let order_row: Option<OrderRow> = sqlx::query_as(SELECT_ORDER_FOR_UPDATE)
            .bind(payment_row.order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?;
        let order_row =
            order_row.ok_or(PaymentError::OrderNotFound(payment_row.order_id.into()))?;

        let status = parse_status(&order_row.status)?;
        if status != OrderStatus::AwaitingConfirmation {
            return Err(PaymentError::InvalidTransition {
                from: status,
                to: OrderStatus::Paid,
            });
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE local_payments
            SET is_verified = TRUE, verified_at = $2
            WHERE local_payment_id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, settlement_reference = $3, paid_at = $4, updated_at = $4
            WHERE order_id = $1
            "#,
        )
        .bind(order_row.order_id)
        .bind(OrderStatus::Paid.as_str())
        .bind(&payment_row.transaction_reference)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        insert_commission(&mut tx, &commission).await?;

        let lines = fetch_lines(&mut tx, order_row.order_id).await?;
        tx.commit().await.map_err(store_err)?;

        let mut payment = LocalPayment::from(payment_row);
        payment.verified = true;
        payment.verified_at = Some(now);

        let reference = payment.transaction_reference.clone();
        let order = assemble_order(
            OrderRow {
                status: OrderStatus::Paid.as_str().to_string(),
                settlement_reference: Some(reference),
                paid_at: Some(now),
                updated_at: now,
                ..order_row
            },
            lines,
        )?;

        debug!(payment_id = %id, order_id = %order.id, "local payment approved");
        Ok(ApprovalOutcome {
            payment,
            order,
            commission,
        })
    }

    async fn settle_gateway_payment(
        &self,
        order_id: OrderId,
        reference: &str,
        commission: CommissionRecord,
    ) -> Result<Order, PaymentError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let row: Option<OrderRow> = sqlx::query_as(SELECT_ORDER_FOR_UPDATE)
            .bind(Uuid::from(order_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?;
        let row = row.ok_or(PaymentError::OrderNotFound(order_id))?;

        let status = parse_status(&row.status)?;
        match status {
            OrderStatus::Paid | OrderStatus::Shipped => {
                return Err(PaymentError::AlreadyProcessed(order_id.to_string()));
            }
            OrderStatus::Pending => {}
            other => {
                return Err(PaymentError::InvalidTransition {
                    from: other,
                    to: OrderStatus::Paid,
                });
            }
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, settlement_reference = $3, paid_at = $4, updated_at = $4
            WHERE order_id = $1
            "#,
        )
        .bind(Uuid::from(order_id))
        .bind(OrderStatus::Paid.as_str())
        .bind(reference)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        insert_commission(&mut tx, &commission).await?;

        let lines = fetch_lines(&mut tx, row.order_id).await?;
        tx.commit().await.map_err(store_err)?;

        debug!(%order_id, %reference, "gateway payment settled");
        assemble_order(
            OrderRow {
                status: OrderStatus::Paid.as_str().to_string(),
                settlement_reference: Some(reference.to_string()),
                paid_at: Some(now),
                updated_at: now,
                ..row
            },
            lines,
        )
    }

    async fn list_commissions(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<CommissionRecord>, PaymentError> {
        let rows: Vec<CommissionRow> = sqlx::query_as(
            r#"
            SELECT commission_id, order_id, local_payment_id,
                   rate, amount, currency, computed_at
            FROM commission_records
            WHERE order_id = $1
            ORDER BY computed_at
            "#,
        )
        .bind(Uuid::from(order_id))
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(CommissionRow::into_record).collect()
    }
}
