use sqlx::SqliteConnection;

use crate::db_types::Setting;

pub async fn fetch(key: &str, conn: &mut SqliteConnection) -> Result<Option<Setting>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM settings WHERE key = $1").bind(key).fetch_optional(conn).await
}

pub async fn upsert(setting: Setting, conn: &mut SqliteConnection) -> Result<Setting, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO settings (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            RETURNING *;
        "#,
    )
    .bind(setting.key)
    .bind(setting.value)
    .fetch_one(conn)
    .await
}
