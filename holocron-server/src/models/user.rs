//! User records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::UserId;

/// User record from database.
///
/// Only `id` and `email` are ever serialized; the password and active flag
/// stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip)]
    pub is_active: bool,
}

/// User fields for insertion (seed fixtures)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: UserId(1),
            email: "luke@rebellion.org".into(),
            password: "tosche-station".into(),
            is_active: true,
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": 1, "email": "luke@rebellion.org"})
        );
    }

    #[test]
    fn new_user_defaults_to_active() {
        let user: NewUser =
            serde_json::from_value(json!({"email": "leia@alderaan.gov", "password": "x"})).unwrap();
        assert!(user.is_active);
    }
}
