//! The example user entity.

use effigy_core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user in the example domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Whether the account is active
    pub active: bool,
}

impl User {
    /// Create a new active user
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            active: true,
        }
    }

    /// Set the active flag
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Encode as an engine value
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::record(vec![
            ("id".to_string(), Value::text(&self.id)),
            ("username".to_string(), Value::text(&self.username)),
            ("email".to_string(), Value::text(&self.email)),
            ("active".to_string(), Value::Bool(self.active)),
        ])
    }

    /// Decode from an engine value, if it has the user record shape
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_record()?;
        Some(Self {
            id: fields.get("id")?.as_text()?.to_string(),
            username: fields.get("username")?.as_text()?.to_string(),
            email: fields.get("email")?.as_text()?.to_string(),
            active: fields.get("active")?.as_bool()?,
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User{{id='{}', username='{}', email='{}', active={}}}",
            self.id, self.username, self.email, self.active
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("u1", "ada", "ada@example.com");
        assert!(user.active);
        assert_eq!(user.id, "u1");
    }

    #[test]
    fn test_with_active() {
        let user = User::new("u1", "ada", "ada@example.com").with_active(false);
        assert!(!user.active);
    }

    #[test]
    fn test_value_round_trip() {
        let user = User::new("u1", "ada", "ada@example.com").with_active(false);
        let decoded = User::from_value(&user.to_value()).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        assert_eq!(User::from_value(&Value::Int(1)), None);
        assert_eq!(User::from_value(&Value::record(vec![])), None);
        assert_eq!(User::from_value(&Value::Absent), None);
    }

    #[test]
    fn test_display() {
        let user = User::new("u1", "ada", "ada@example.com");
        assert_eq!(
            user.to_string(),
            "User{id='u1', username='ada', email='ada@example.com', active=true}"
        );
    }
}
