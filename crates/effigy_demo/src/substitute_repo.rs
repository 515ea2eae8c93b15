//! Binding a substitute handle behind the repository trait.
//!
//! The adapter is the vtable-style face of a substitute: callers hold a
//! `UserRepository` while every call is intercepted, recorded, and answered
//! by the engine. Domain values cross the boundary through the engine's
//! value model.

use crate::repository::{RepositoryError, UserRepository};
use crate::user::User;
use effigy_core::Value;
use effigy_engine::Substitute;

/// A `UserRepository` backed by an engine-produced substitute.
#[derive(Debug, Clone)]
pub struct SubstituteUserRepository {
    substitute: Substitute,
}

impl SubstituteUserRepository {
    /// Wrap a substitute created for the user-repository contract
    #[must_use]
    pub fn new(substitute: Substitute) -> Self {
        Self { substitute }
    }

    /// The underlying substitute handle
    #[must_use]
    pub fn substitute(&self) -> &Substitute {
        &self.substitute
    }

    fn call(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, RepositoryError> {
        self.substitute
            .invoke(operation, Some(arguments))
            .map_err(|err| RepositoryError::Backend {
                reason: err.to_string(),
            })
    }
}

fn decode_user(value: Value) -> Result<Option<User>, RepositoryError> {
    if value.is_absent() {
        return Ok(None);
    }
    User::from_value(&value)
        .map(Some)
        .ok_or_else(|| RepositoryError::MalformedRecord {
            reason: value.to_string(),
        })
}

impl UserRepository for SubstituteUserRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        decode_user(self.call("find_by_id", vec![Value::text(id)])?)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        decode_user(self.call("find_by_email", vec![Value::text(email)])?)
    }

    fn save(&mut self, user: User) -> Result<(), RepositoryError> {
        self.call("save", vec![user.to_value()])?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), RepositoryError> {
        self.call("delete", vec![Value::text(id)])?;
        Ok(())
    }

    fn exists(&self, id: &str) -> Result<bool, RepositoryError> {
        let value = self.call("exists", vec![Value::text(id)])?;
        value.as_bool().ok_or_else(|| RepositoryError::MalformedRecord {
            reason: value.to_string(),
        })
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let value = self.call("count", vec![])?;
        let count = value.as_int().ok_or_else(|| RepositoryError::MalformedRecord {
            reason: value.to_string(),
        })?;
        usize::try_from(count).map_err(|_| RepositoryError::MalformedRecord {
            reason: value.to_string(),
        })
    }

    fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let value = self.call("find_all", vec![])?;
        if value.is_absent() {
            return Ok(Vec::new());
        }
        let items = value.as_list().ok_or_else(|| RepositoryError::MalformedRecord {
            reason: value.to_string(),
        })?;
        items
            .iter()
            .map(|item| {
                User::from_value(item).ok_or_else(|| RepositoryError::MalformedRecord {
                    reason: item.to_string(),
                })
            })
            .collect()
    }
}
