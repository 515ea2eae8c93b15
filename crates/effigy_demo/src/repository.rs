//! The data-access capability contract and its real implementation.

use crate::user::User;
use effigy_core::{Contract, OperationDescriptor, ReturnKind, ValueKind};
use indexmap::IndexMap;

/// Error from repository operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store failed to answer
    #[error("repository backend failure: {reason}")]
    Backend {
        /// What went wrong
        reason: String,
    },

    /// A stored record did not have the expected shape
    #[error("malformed stored record: {reason}")]
    MalformedRecord {
        /// What was malformed
        reason: String,
    },
}

/// Data-access capability contract for users.
pub trait UserRepository {
    /// Find a user by id
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    /// Find a user by email address
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Store a user, overwriting any user with the same id
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn save(&mut self, user: User) -> Result<(), RepositoryError>;

    /// Remove a user by id
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn delete(&mut self, id: &str) -> Result<(), RepositoryError>;

    /// Check if a user with the given id is stored
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn exists(&self, id: &str) -> Result<bool, RepositoryError>;

    /// Number of stored users
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn count(&self) -> Result<usize, RepositoryError>;

    /// All stored users in insertion order
    ///
    /// # Errors
    ///
    /// Returns error if the backing store fails
    fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
}

/// The same surface expressed as an engine contract description.
#[must_use]
pub fn user_repository_contract() -> Contract {
    Contract::capability("UserRepository")
        .with_operation(OperationDescriptor::new(
            "find_by_id",
            vec![ValueKind::Text],
            ReturnKind::Reference,
        ))
        .with_operation(OperationDescriptor::new(
            "find_by_email",
            vec![ValueKind::Text],
            ReturnKind::Reference,
        ))
        .with_operation(OperationDescriptor::new(
            "save",
            vec![ValueKind::Record],
            ReturnKind::Void,
        ))
        .with_operation(OperationDescriptor::new(
            "delete",
            vec![ValueKind::Text],
            ReturnKind::Void,
        ))
        .with_operation(OperationDescriptor::new(
            "exists",
            vec![ValueKind::Text],
            ReturnKind::Truth,
        ))
        .with_operation(OperationDescriptor::new("count", vec![], ReturnKind::Int))
        .with_operation(OperationDescriptor::new(
            "find_all",
            vec![],
            ReturnKind::Reference,
        ))
}

/// The real object: an insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: IndexMap<String, User>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: IndexMap::new(),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.values().find(|user| user.email == email).cloned())
    }

    fn save(&mut self, user: User) -> Result<(), RepositoryError> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), RepositoryError> {
        self.users.shift_remove(id);
        Ok(())
    }

    fn exists(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.users.contains_key(id))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.users.len())
    }

    fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.values().cloned().collect())
    }
}
