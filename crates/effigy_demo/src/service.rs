//! Business logic over the data-access contract.

use crate::repository::{RepositoryError, UserRepository};
use crate::user::User;

/// Error from user service operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No user with the given id
    #[error("user not found: {id}")]
    NotFound {
        /// The missing id
        id: String,
    },

    /// A user with the given id already exists
    #[error("user already exists: {id}")]
    AlreadyExists {
        /// The conflicting id
        id: String,
    },

    /// The supplied user is not acceptable
    #[error("invalid user: {reason}")]
    InvalidUser {
        /// Why the user was rejected
        reason: String,
    },

    /// The repository failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// User operations with business rules, over any `UserRepository`.
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a service over the given repository
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Borrow the underlying repository
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// `NotFound` if no user has the id; repository errors pass through
    pub fn get_user(&self, id: &str) -> Result<User, ServiceError> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// `InvalidUser` for an empty id, `AlreadyExists` for a duplicate;
    /// repository errors pass through
    pub fn create_user(&mut self, user: User) -> Result<(), ServiceError> {
        if user.id.is_empty() {
            return Err(ServiceError::InvalidUser {
                reason: "user id must not be empty".to_string(),
            });
        }
        if self.repository.exists(&user.id)? {
            return Err(ServiceError::AlreadyExists { id: user.id });
        }
        self.repository.save(user)?;
        Ok(())
    }

    /// Update an existing user
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist; repository errors pass through
    pub fn update_user(&mut self, user: User) -> Result<(), ServiceError> {
        if self.repository.find_by_id(&user.id)?.is_none() {
            return Err(ServiceError::NotFound { id: user.id });
        }
        self.repository.save(user)?;
        Ok(())
    }

    /// Delete a user by id
    ///
    /// # Errors
    ///
    /// `InvalidUser` for an empty id; repository errors pass through
    pub fn delete_user(&mut self, id: &str) -> Result<(), ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::InvalidUser {
                reason: "user id must not be empty".to_string(),
            });
        }
        self.repository.delete(id)?;
        Ok(())
    }

    /// Mark a user inactive
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist; repository errors pass through
    pub fn deactivate_user(&mut self, id: &str) -> Result<(), ServiceError> {
        let user = self.get_user(id)?;
        self.repository.save(user.with_active(false))?;
        Ok(())
    }

    /// All active users
    ///
    /// # Errors
    ///
    /// Repository errors pass through
    pub fn active_users(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.repository.find_all()?;
        Ok(users.into_iter().filter(|user| user.active).collect())
    }
}
