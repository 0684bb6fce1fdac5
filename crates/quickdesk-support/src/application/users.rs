//! User accounts

use std::sync::Arc;

use crate::application::agents::normalize_tags;
use crate::application::dto::RegisterUserCommand;
use crate::domain::aggregates::User;
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{RepositoryError, UserRepository};
use crate::{Result, SupportError};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, command: RegisterUserCommand) -> Result<User> {
        if command.username.trim().is_empty() || command.email.trim().is_empty() {
            return Err(SupportError::Validation("All fields are required".into()));
        }
        if self.users.find_by_email(&command.email).await?.is_some() {
            return Err(SupportError::UserExists);
        }
        let user = User::new(
            command.username,
            command.email,
            command.password_hash,
            command.role,
            normalize_tags(command.specializations),
        );
        match self.users.save(&user).await {
            Ok(()) => {}
            Err(RepositoryError::DuplicateKey(_)) => return Err(SupportError::UserExists),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.find_by_email(email).await?)
    }

    pub async fn find(&self, id: &EntityId) -> Result<User> {
        self.users.find_by_id(id).await?.ok_or(SupportError::UserNotFound)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.list().await?)
    }
}
