use log::*;

use crate::{
    capabilities::{has_capability, Capability, Role},
    console_api::objects::UserProfile,
    db_types::{NewUser, NewUserInfo, RoleAssignment, User, UserInfo, UserUpdate},
    traits::{UserApiError, UserManagement},
};

/// Users, roles and the address book.
pub struct UserApi<B> {
    db: B,
}

impl<B> UserApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> UserApi<B>
where B: UserManagement
{
    /// The users listing, each user joined with their role assignments.
    pub async fn fetch_users_with_roles(&self) -> Result<Vec<UserProfile>, UserApiError> {
        let users = self.db.fetch_users().await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.db.fetch_user_roles(&user.telegram_id).await?;
            profiles.push(UserProfile { user, roles });
        }
        Ok(profiles)
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, UserApiError> {
        if self.db.fetch_user(&user.telegram_id).await?.is_some() {
            return Err(UserApiError::UserAlreadyExists(user.telegram_id));
        }
        let user = self.db.create_user(user).await?;
        debug!("👥️ User {} ({}) registered", user.telegram_id, user.name);
        Ok(user)
    }

    pub async fn update_user(&self, telegram_id: &str, update: UserUpdate) -> Result<Option<User>, UserApiError> {
        self.db.update_user(telegram_id, update).await
    }

    /// Assign a role. Re-assigning a role the user already holds replaces the prior entry, so at most one
    /// assignment exists per (user, role) pair. District-scoped roles must carry a district.
    pub async fn assign_role(&self, assignment: RoleAssignment) -> Result<RoleAssignment, UserApiError> {
        if assignment.role.requires_district() && assignment.district.is_none() {
            return Err(UserApiError::DistrictRequired(assignment.role));
        }
        let assignment = self.db.assign_role(assignment).await?;
        info!("👥️ {} is now a {}", assignment.telegram_id, assignment.role);
        Ok(assignment)
    }

    pub async fn remove_role(&self, telegram_id: &str, role: Role) -> Result<bool, UserApiError> {
        self.db.remove_role(telegram_id, role).await
    }

    /// Whether the user may perform the given action, per their current roles. Admin implies everything.
    pub async fn check_capability(&self, telegram_id: &str, capability: Capability) -> Result<bool, UserApiError> {
        let roles: Vec<Role> = self.db.fetch_user_roles(telegram_id).await?.iter().map(|a| a.role).collect();
        Ok(has_capability(&roles, capability))
    }

    pub async fn fetch_user_info(&self, telegram_id: &str) -> Result<Option<UserInfo>, UserApiError> {
        self.db.fetch_user_info(telegram_id).await
    }

    pub async fn upsert_user_info(&self, info: NewUserInfo) -> Result<UserInfo, UserApiError> {
        self.db.upsert_user_info(info).await
    }
}
