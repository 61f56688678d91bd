//! `SqliteDatabase` is a concrete implementation of a KaamDhenu console backend.
//!
//! Unsurprisingly, it uses SQLite, and implements all the traits defined in the [`crate::traits`] module.
//! The multi-step operations ([`ConsoleDatabase::insert_order_with_deductions`],
//! [`ConsoleDatabase::confirm_order_payment`]) each run in a single transaction.
use std::fmt::Debug;

use kd_common::Rupees;
use log::*;
use sqlx::SqlitePool;

use super::db::{dashboard, orders, products, roles, settings, stock_history, transactions, user_info, users};
use crate::{
    capabilities::Role,
    db_types::{
        NewOrder,
        NewProduct,
        NewTransaction,
        NewUser,
        NewUserInfo,
        Order,
        OrderUpdate,
        PaymentStatus,
        Product,
        ProductUpdate,
        RoleAssignment,
        Setting,
        StockHistory,
        Transaction,
        User,
        UserInfo,
        UserUpdate,
    },
    traits::{
        CatalogError,
        CatalogManagement,
        ConsoleDatabase,
        ConsoleDbError,
        DashboardStats,
        LedgerError,
        LedgerManagement,
        OrderError,
        OrderManagement,
        ResolvedLine,
        SettingsError,
        SettingsManagement,
        UserApiError,
        UserManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = super::db::new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        super::db::run_migrations(&self.pool).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products(&self, district: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_all(district, &mut conn).await?)
    }

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_by_id(id, &mut conn).await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let unique_number = products::next_unique_number(&product.name, &product.district, &mut *tx).await?;
        let product = products::insert(product, unique_number, &mut *tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let product = products::update(id, update, &mut *tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<bool, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::delete(id, &mut conn).await?)
    }

    async fn find_product(
        &self,
        name: &str,
        district: &str,
        unique_number: i64,
    ) -> Result<Option<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_by_name_district_unique(name, district, unique_number, &mut conn).await?)
    }

    async fn deduct_stock(&self, product_id: i64, amount: i64) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let product = products::deduct_stock(product_id, amount, &mut *tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn fetch_stock_history(&self, product_id: i64) -> Result<Vec<StockHistory>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(stock_history::fetch_for_product(product_id, &mut conn).await?)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_orders(&self, district: Option<&str>) -> Result<Vec<Order>, OrderError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_all(district, &mut conn).await?)
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, OrderError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_by_id(id, &mut conn).await?)
    }

    async fn fetch_orders_by_payment_status(&self, status: PaymentStatus) -> Result<Vec<Order>, OrderError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_by_payment_status(status, &mut conn).await?)
    }

    async fn fetch_pending_order_by_amount_and_phone(
        &self,
        amount: Rupees,
        phone: &str,
    ) -> Result<Option<Order>, OrderError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_pending_match(amount, phone, &mut conn).await?)
    }

    async fn update_order_statuses(&self, id: i64, update: OrderUpdate) -> Result<Option<Order>, OrderError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::update_statuses(id, update, &mut conn).await?)
    }
}

impl LedgerManagement for SqliteDatabase {
    async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        Ok(transactions::insert(transaction, &mut conn).await?)
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        Ok(transactions::fetch_all(&mut conn).await?)
    }

    async fn fetch_unmatched_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        Ok(transactions::fetch_unmatched(&mut conn).await?)
    }
}

impl SettingsManagement for SqliteDatabase {
    async fn fetch_setting(&self, key: &str) -> Result<Option<Setting>, SettingsError> {
        let mut conn = self.pool.acquire().await?;
        Ok(settings::fetch(key, &mut conn).await?)
    }

    async fn set_setting(&self, setting: Setting) -> Result<Setting, SettingsError> {
        let mut conn = self.pool.acquire().await?;
        Ok(settings::upsert(setting, &mut conn).await?)
    }
}

impl UserManagement for SqliteDatabase {
    async fn fetch_users(&self) -> Result<Vec<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_all(&mut conn).await?)
    }

    async fn fetch_user(&self, telegram_id: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_by_id(telegram_id, &mut conn).await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert(user, &mut conn).await
    }

    async fn update_user(&self, telegram_id: &str, update: UserUpdate) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::update(telegram_id, update, &mut conn).await?)
    }

    async fn fetch_roles(&self) -> Result<Vec<RoleAssignment>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(roles::fetch_all(&mut conn).await?)
    }

    async fn fetch_user_roles(&self, telegram_id: &str) -> Result<Vec<RoleAssignment>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(roles::fetch_for_user(telegram_id, &mut conn).await?)
    }

    async fn assign_role(&self, assignment: RoleAssignment) -> Result<RoleAssignment, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(roles::assign(assignment, &mut conn).await?)
    }

    async fn remove_role(&self, telegram_id: &str, role: Role) -> Result<bool, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(roles::remove(telegram_id, role, &mut conn).await?)
    }

    async fn fetch_user_info(&self, telegram_id: &str) -> Result<Option<UserInfo>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(user_info::fetch(telegram_id, &mut conn).await?)
    }

    async fn upsert_user_info(&self, info: NewUserInfo) -> Result<UserInfo, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(user_info::upsert(info, &mut conn).await?)
    }
}

impl ConsoleDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order_with_deductions(
        &self,
        order: NewOrder,
        lines: &[ResolvedLine],
    ) -> Result<Order, ConsoleDbError> {
        let mut tx = self.pool.begin().await?;
        let mut product_ids = Vec::with_capacity(lines.len());
        for line in lines {
            products::deduct_stock(line.product_id, line.quantity, &mut *tx).await?;
            product_ids.push(line.product_id.to_string());
        }
        let total: Rupees = lines.iter().map(ResolvedLine::line_total).sum();
        let order = orders::insert(order, &product_ids.join(","), total, &mut *tx).await?;
        tx.commit().await?;
        debug!("📝️ Order [{}] committed with {} deduction(s)", order.id, lines.len());
        Ok(order)
    }

    async fn confirm_order_payment(
        &self,
        order_id: i64,
        transaction: NewTransaction,
    ) -> Result<(Order, Transaction), ConsoleDbError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::confirm_pending(order_id, &mut *tx)
            .await?
            .ok_or(ConsoleDbError::OrderNotPending(order_id))?;
        let transaction = transactions::insert(transaction, &mut *tx).await?;
        tx.commit().await?;
        Ok((order, transaction))
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ConsoleDbError> {
        let mut tx = self.pool.begin().await?;
        let stats = dashboard::fetch_stats(&mut *tx).await?;
        tx.commit().await?;
        Ok(stats)
    }

    async fn close(&mut self) -> Result<(), ConsoleDbError> {
        self.pool.close().await;
        Ok(())
    }
}
