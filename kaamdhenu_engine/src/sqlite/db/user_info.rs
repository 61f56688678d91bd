use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db_types::{NewUserInfo, UserInfo};

pub async fn fetch(telegram_id: &str, conn: &mut SqliteConnection) -> Result<Option<UserInfo>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM user_info WHERE telegram_id = $1").bind(telegram_id).fetch_optional(conn).await
}

/// Whole-record upsert keyed by telegram id; `updated_at` is stamped here.
pub async fn upsert(info: NewUserInfo, conn: &mut SqliteConnection) -> Result<UserInfo, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO user_info (
                telegram_id, name, house_name, landmark, ward_no, panchayat, block,
                sub_district, district, state, primary_phone, secondary_phone, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (telegram_id) DO UPDATE SET
                name = excluded.name,
                house_name = excluded.house_name,
                landmark = excluded.landmark,
                ward_no = excluded.ward_no,
                panchayat = excluded.panchayat,
                block = excluded.block,
                sub_district = excluded.sub_district,
                district = excluded.district,
                state = excluded.state,
                primary_phone = excluded.primary_phone,
                secondary_phone = excluded.secondary_phone,
                updated_at = excluded.updated_at
            RETURNING *;
        "#,
    )
    .bind(info.telegram_id)
    .bind(info.name)
    .bind(info.house_name)
    .bind(info.landmark)
    .bind(info.ward_no)
    .bind(info.panchayat)
    .bind(info.block)
    .bind(info.sub_district)
    .bind(info.district)
    .bind(info.state)
    .bind(info.primary_phone)
    .bind(info.secondary_phone)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
}
