//! Domain models
//!
//! Records mirror the four tables (users, planets, people, favorites).
//! Serialization here is the JSON the API returns.

pub mod favorite;
pub mod ids;
pub mod person;
pub mod planet;
pub mod user;
pub mod validation;

pub use favorite::{Favorite, FavoriteDetail, FavoriteSubject, FavoriteTarget};
pub use ids::{FavoriteId, PersonId, PlanetId, UserId};
pub use person::{NewPerson, Person};
pub use planet::{NewPlanet, Planet};
pub use user::{NewUser, User};
pub use validation::{parse_row_id, ValidationError};
