//! Integer primary keys, one newtype per table
//!
//! Keeps a planet id from being passed where a person id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Raw column value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Primary key of `users`
    UserId
);
row_id!(
    /// Primary key of `planets`
    PlanetId
);
row_id!(
    /// Primary key of `people`
    PersonId
);
row_id!(
    /// Primary key of `favorites`
    FavoriteId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        assert_eq!(serde_json::to_string(&PlanetId(3)).unwrap(), "3");
        let id: PersonId = serde_json::from_str("42").unwrap();
        assert_eq!(id, PersonId(42));
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(UserId(1).to_string(), "1");
    }
}
