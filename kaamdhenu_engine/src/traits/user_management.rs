use thiserror::Error;

use crate::{
    capabilities::Role,
    db_types::{NewUser, NewUserInfo, RoleAssignment, User, UserInfo, UserUpdate},
};

/// Users, their role assignments, and the extended address book.
#[allow(async_fn_in_trait)]
pub trait UserManagement {
    async fn fetch_users(&self) -> Result<Vec<User>, UserApiError>;

    async fn fetch_user(&self, telegram_id: &str) -> Result<Option<User>, UserApiError>;

    async fn create_user(&self, user: NewUser) -> Result<User, UserApiError>;

    /// Applies the supplied fields. Returns `None` if the user does not exist.
    async fn update_user(&self, telegram_id: &str, update: UserUpdate) -> Result<Option<User>, UserApiError>;

    async fn fetch_roles(&self) -> Result<Vec<RoleAssignment>, UserApiError>;

    async fn fetch_user_roles(&self, telegram_id: &str) -> Result<Vec<RoleAssignment>, UserApiError>;

    /// Assigns the role, replacing any existing (telegram id, role) entry so a user never holds the same role
    /// twice. The replacement is atomic.
    async fn assign_role(&self, assignment: RoleAssignment) -> Result<RoleAssignment, UserApiError>;

    /// Returns false if the user did not hold the role.
    async fn remove_role(&self, telegram_id: &str, role: Role) -> Result<bool, UserApiError>;

    async fn fetch_user_info(&self, telegram_id: &str) -> Result<Option<UserInfo>, UserApiError>;

    /// Whole-record insert-or-replace keyed by telegram id.
    async fn upsert_user_info(&self, info: NewUserInfo) -> Result<UserInfo, UserApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error("User {0} does not exist")]
    UserNotFound(String),
    #[error("A district is required when assigning the {0} role")]
    DistrictRequired(Role),
}

impl From<sqlx::Error> for UserApiError {
    fn from(e: sqlx::Error) -> Self {
        UserApiError::DatabaseError(e.to_string())
    }
}
