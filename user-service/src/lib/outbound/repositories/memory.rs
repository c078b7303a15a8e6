use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-memory user store.
///
/// All records live under one `RwLock`; mutations take the write lock,
/// which serializes them per user (and globally). The lock is never held
/// across an await point.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserError::Unknown("user store lock poisoned".to_string()))?;

        let email_key = user.email.normalized();
        if users.values().any(|u| u.email.normalized() == email_key) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::Unknown("user store lock poisoned".to_string()))?;

        Ok(users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::Unknown("user store lock poisoned".to_string()))?;

        let email_key = email.to_ascii_lowercase();
        Ok(users
            .values()
            .find(|u| u.email.normalized() == email_key)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::Unknown("user store lock poisoned".to_string()))?;

        Ok(users.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        changes: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserError::Unknown("user store lock poisoned".to_string()))?;

        let user = users
            .get_mut(&id.0)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        user.version += 1;

        Ok(user.clone())
    }
}
