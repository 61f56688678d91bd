use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewUser, User, UserUpdate},
    traits::UserApiError,
};

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY registered_at, telegram_id").fetch_all(conn).await
}

pub async fn fetch_by_id(telegram_id: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE telegram_id = $1").bind(telegram_id).fetch_optional(conn).await
}

pub async fn insert(user: NewUser, conn: &mut SqliteConnection) -> Result<User, UserApiError> {
    let telegram_id = user.telegram_id.clone();
    let user = sqlx::query_as(
        r#"
            INSERT INTO users (telegram_id, name, primary_phone, secondary_phone, district, registered_at, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(user.telegram_id)
    .bind(user.name)
    .bind(user.primary_phone)
    .bind(user.secondary_phone)
    .bind(user.district)
    .bind(Utc::now())
    .bind(user.language)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => UserApiError::UserAlreadyExists(telegram_id),
        _ => UserApiError::from(e),
    })?;
    Ok(user)
}

pub async fn update(
    telegram_id: &str,
    update: UserUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let Some(existing) = fetch_by_id(telegram_id, &mut *conn).await? else {
        return Ok(None);
    };
    sqlx::query_as(
        r#"
            UPDATE users
            SET name = $1, primary_phone = $2, secondary_phone = $3, district = $4, language = $5
            WHERE telegram_id = $6
            RETURNING *;
        "#,
    )
    .bind(update.name.unwrap_or(existing.name))
    .bind(update.primary_phone.unwrap_or(existing.primary_phone))
    .bind(update.secondary_phone.or(existing.secondary_phone))
    .bind(update.district.unwrap_or(existing.district))
    .bind(update.language.unwrap_or(existing.language))
    .bind(telegram_id)
    .fetch_optional(conn)
    .await
}
