use sqlx::SqliteConnection;

use crate::{capabilities::Role, db_types::RoleAssignment};

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<RoleAssignment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM roles ORDER BY telegram_id, role").fetch_all(conn).await
}

pub async fn fetch_for_user(
    telegram_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<RoleAssignment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM roles WHERE telegram_id = $1 ORDER BY role").bind(telegram_id).fetch_all(conn).await
}

/// Insert-or-replace on the (telegram id, role) pair. The table's unique constraint plus the upsert make the
/// duplicate collapse a single atomic statement.
pub async fn assign(assignment: RoleAssignment, conn: &mut SqliteConnection) -> Result<RoleAssignment, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO roles (telegram_id, role, district) VALUES ($1, $2, $3)
            ON CONFLICT (telegram_id, role) DO UPDATE SET district = excluded.district
            RETURNING *;
        "#,
    )
    .bind(assignment.telegram_id)
    .bind(assignment.role)
    .bind(assignment.district)
    .fetch_one(conn)
    .await
}

pub async fn remove(telegram_id: &str, role: Role, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM roles WHERE telegram_id = $1 AND role = $2")
        .bind(telegram_id)
        .bind(role)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
