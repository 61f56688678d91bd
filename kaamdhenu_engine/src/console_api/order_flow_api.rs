use std::fmt::Debug;

use kd_common::Rupees;
use log::*;

use crate::{
    console_api::{
        errors::OrderFlowError,
        objects::{PaymentSmsNotification, SmsMatchOutcome},
    },
    db_types::{NewOrder, NewTransaction, Order, OrderStatusType, OrderUpdate, PaymentStatus, Transaction},
    helpers::parse_item_lines,
    traits::{CatalogError, ConsoleDatabase, ConsoleDbError, ResolvedLine},
};

/// `OrderFlowApi` is the primary API for the order-intake and payment-reconciliation pipeline: it turns raw
/// order text into persisted orders with stock deducted, reconciles payment notifications against pending
/// orders, and drives the order state machine.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrderFlowApi<B>
where B: ConsoleDatabase
{
    /// Take a new order submission.
    ///
    /// The item lines are re-parsed from `order_details` here; the text is the single source of truth, and
    /// nothing numeric is trusted from the caller. Every line is resolved and validated against the catalog
    /// before anything is written; the deductions and the order row then commit in one transaction, so a
    /// rejection never leaves a partial deduction behind.
    ///
    /// A submission whose text yields no valid item lines is accepted with a zero total. That is the manual
    /// entry fallback, not an error.
    pub async fn place_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let lines = parse_item_lines(&order.order_details);
        let mut resolved = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.quantity <= 0 {
                return Err(OrderFlowError::InvalidQuantity {
                    product: line.product.clone(),
                    quantity: line.quantity,
                });
            }
            let product = self
                .db
                .find_product(&line.product, &line.district, line.unique_number)
                .await?
                .ok_or_else(|| CatalogError::ProductNotInCatalog {
                    name: line.product.clone(),
                    district: line.district.clone(),
                    unique_number: line.unique_number,
                })?;
            if product.quantity < line.quantity {
                return Err(CatalogError::InsufficientStock {
                    name: product.name,
                    district: product.district,
                    available: product.quantity,
                    requested: line.quantity,
                }
                .into());
            }
            resolved.push(ResolvedLine {
                product_id: product.id,
                name: product.name,
                district: product.district,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }
        let order = self.db.insert_order_with_deductions(order, &resolved).await?;
        debug!("📦️ Order #{} placed: {} line(s), total {}", order.id, resolved.len(), order.total_amount);
        Ok(order)
    }

    /// Reconcile a payment notification against the pending orders.
    ///
    /// The match is exact on total amount and `+91`-prefix-tolerant on phone, restricted to `Pending`
    /// orders, oldest first. A hit flips the order to `Confirmed` and logs a `Matched` transaction; a miss
    /// (or losing the confirmation race) logs an `Unmatched` transaction. Both are normal outcomes.
    pub async fn process_payment_sms(
        &self,
        notification: PaymentSmsNotification,
    ) -> Result<SmsMatchOutcome, OrderFlowError> {
        let PaymentSmsNotification { sms_text, amount, phone } = notification;
        if !amount.is_positive() {
            return Err(OrderFlowError::InvalidAmount(amount));
        }
        let candidate = self.db.fetch_pending_order_by_amount_and_phone(amount, &phone).await?;
        match candidate {
            Some(order) => {
                let record = NewTransaction::matched(amount, &phone, order.id).with_note(sms_text.clone());
                match self.db.confirm_order_payment(order.id, record).await {
                    Ok((order, transaction)) => {
                        info!("💰️ Payment of {amount} matched order #{}", order.id);
                        Ok(SmsMatchOutcome::Matched { order, transaction })
                    },
                    Err(ConsoleDbError::OrderNotPending(id)) => {
                        // The order was confirmed or cancelled between lookup and commit.
                        debug!("💰️ Order #{id} stopped being pending mid-match; filing as unmatched");
                        self.file_unmatched(amount, &phone, sms_text).await
                    },
                    Err(e) => Err(e.into()),
                }
            },
            None => {
                debug!("💰️ No pending order matches {amount} from {phone}");
                self.file_unmatched(amount, &phone, sms_text).await
            },
        }
    }

    async fn file_unmatched(
        &self,
        amount: Rupees,
        phone: &str,
        sms_text: String,
    ) -> Result<SmsMatchOutcome, OrderFlowError> {
        let transaction =
            self.db.create_transaction(NewTransaction::unmatched(amount, phone).with_note(sms_text)).await?;
        Ok(SmsMatchOutcome::Unmatched { transaction })
    }

    /// Change the order's statuses, enforcing the state machine:
    ///
    /// * payment: Pending → Confirmed, Pending → Failed; nothing else.
    /// * fulfilment: Processing → Packed → Delivered, forward only; Processing/Packed → Cancelled.
    ///   Delivered and Cancelled are terminal.
    /// * Cancelling an order whose payment is still Pending also marks the payment Failed.
    ///
    /// Repeating the current status, or supplying no status at all, is a no-op error.
    pub async fn modify_order_status(&self, id: i64, update: OrderUpdate) -> Result<Order, OrderFlowError> {
        if update.payment_status.is_none() && update.order_status.is_none() {
            return Err(OrderFlowError::StatusChangeNoOp);
        }
        let order = self.db.fetch_order(id).await?.ok_or(OrderFlowError::OrderNotFound(id))?;
        let mut update = update;
        if let Some(new_status) = update.payment_status {
            if new_status == order.payment_status {
                return Err(OrderFlowError::StatusChangeNoOp);
            }
            if !order.payment_status.can_transition_to(new_status) {
                return Err(OrderFlowError::PaymentStatusChangeForbidden {
                    from: order.payment_status,
                    to: new_status,
                });
            }
        }
        if let Some(new_status) = update.order_status {
            if new_status == order.order_status {
                return Err(OrderFlowError::StatusChangeNoOp);
            }
            if !order.order_status.can_transition_to(new_status) {
                return Err(OrderFlowError::OrderStatusChangeForbidden { from: order.order_status, to: new_status });
            }
            let payment_after = update.payment_status.unwrap_or(order.payment_status);
            if new_status == OrderStatusType::Cancelled && payment_after == PaymentStatus::Pending {
                update.payment_status = Some(PaymentStatus::Failed);
            }
        }
        let updated =
            self.db.update_order_statuses(id, update).await?.ok_or(OrderFlowError::OrderNotFound(id))?;
        info!(
            "📦️ Order #{id} is now {}/{}",
            updated.order_status, updated.payment_status
        );
        Ok(updated)
    }

    /// All orders, optionally for one district.
    pub async fn fetch_orders(&self, district: Option<&str>) -> Result<Vec<Order>, OrderFlowError> {
        Ok(self.db.fetch_orders(district).await?)
    }

    pub async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderFlowError> {
        Ok(self.db.fetch_order(id).await?)
    }

    /// Orders still awaiting payment.
    pub async fn fetch_pending_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        Ok(self.db.fetch_orders_by_payment_status(PaymentStatus::Pending).await?)
    }

    pub async fn fetch_transactions(&self) -> Result<Vec<Transaction>, OrderFlowError> {
        Ok(self.db.fetch_transactions().await?)
    }

    pub async fn fetch_unmatched_transactions(&self) -> Result<Vec<Transaction>, OrderFlowError> {
        Ok(self.db.fetch_unmatched_transactions().await?)
    }
}
