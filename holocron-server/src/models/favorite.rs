//! Favorites - a user's link to exactly one planet or one person
//!
//! The target is an enum rather than two nullable columns, so a favorite
//! pointing at both (or neither) cannot be constructed. The database
//! mirrors this with a CHECK constraint.

use serde::{Serialize, Serializer};

use super::{FavoriteId, Person, PersonId, Planet, PlanetId, UserId};

/// What a favorite points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Planet(PlanetId),
    Person(PersonId),
}

impl FavoriteTarget {
    /// Resource name of the target, as used in error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Planet(_) => "planet",
            Self::Person(_) => "person",
        }
    }

    /// Resource name of the favorite link itself.
    pub fn favorite_resource(&self) -> &'static str {
        match self {
            Self::Planet(_) => "favorite planet",
            Self::Person(_) => "favorite person",
        }
    }

    /// Capitalized label for response messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planet(_) => "Planet",
            Self::Person(_) => "Person",
        }
    }

    /// Raw id of the target row.
    pub fn raw_id(&self) -> i32 {
        match self {
            Self::Planet(id) => id.get(),
            Self::Person(id) => id.get(),
        }
    }

    /// `(planet_id, people_id)` column values for this target.
    pub fn columns(&self) -> (Option<PlanetId>, Option<PersonId>) {
        match self {
            Self::Planet(id) => (Some(*id), None),
            Self::Person(id) => (None, Some(*id)),
        }
    }
}

/// Favorite row without its target record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub target: FavoriteTarget,
}

/// Resolved target record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteSubject {
    Planet(Planet),
    Person(Person),
}

impl FavoriteSubject {
    pub fn target(&self) -> FavoriteTarget {
        match self {
            Self::Planet(planet) => FavoriteTarget::Planet(planet.id),
            Self::Person(person) => FavoriteTarget::Person(person.id),
        }
    }
}

/// Favorite with its planet or person attached, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDetail {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub subject: FavoriteSubject,
}

impl FavoriteDetail {
    pub fn target(&self) -> FavoriteTarget {
        self.subject.target()
    }

    pub fn favorite(&self) -> Favorite {
        Favorite {
            id: self.id,
            user_id: self.user_id,
            target: self.target(),
        }
    }
}

/// Wire shape: `planet_id` + `planet` or `people_id` + `person`, never both.
#[derive(Serialize)]
struct FavoriteWire<'a> {
    id: FavoriteId,
    user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    planet_id: Option<PlanetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    planet: Option<&'a Planet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    people_id: Option<PersonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person: Option<&'a Person>,
}

impl Serialize for FavoriteDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (planet, person) = match &self.subject {
            FavoriteSubject::Planet(planet) => (Some(planet), None),
            FavoriteSubject::Person(person) => (None, Some(person)),
        };

        FavoriteWire {
            id: self.id,
            user_id: self.user_id,
            planet_id: planet.map(|p| p.id),
            planet,
            people_id: person.map(|p| p.id),
            person,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hoth() -> Planet {
        Planet {
            id: PlanetId(4),
            name: "Hoth".into(),
            population: None,
            terrain: Some("tundra, ice caves, mountain ranges".into()),
            climate: Some("frozen".into()),
        }
    }

    fn vader() -> Person {
        Person {
            id: PersonId(4),
            name: "Darth Vader".into(),
            height: Some(202),
            mass: Some(136),
            hair_color: Some("none".into()),
            skin_color: Some("white".into()),
            eye_color: Some("yellow".into()),
            birth_year: Some("41.9BBY".into()),
            gender: Some("male".into()),
        }
    }

    #[test]
    fn planet_favorite_has_only_planet_fields() {
        let fav = FavoriteDetail {
            id: FavoriteId(7),
            user_id: UserId(1),
            subject: FavoriteSubject::Planet(hoth()),
        };

        let value = serde_json::to_value(&fav).unwrap();
        assert_eq!(value["planet_id"], json!(4));
        assert_eq!(value["planet"]["name"], json!("Hoth"));
        assert!(value.get("people_id").is_none());
        assert!(value.get("person").is_none());
    }

    #[test]
    fn person_favorite_has_only_person_fields() {
        let fav = FavoriteDetail {
            id: FavoriteId(8),
            user_id: UserId(1),
            subject: FavoriteSubject::Person(vader()),
        };

        let value = serde_json::to_value(&fav).unwrap();
        assert_eq!(value["id"], json!(8));
        assert_eq!(value["user_id"], json!(1));
        assert_eq!(value["people_id"], json!(4));
        assert_eq!(value["person"]["birth_year"], json!("41.9BBY"));
        assert!(value.get("planet_id").is_none());
        assert!(value.get("planet").is_none());
    }

    #[test]
    fn target_columns_are_mutually_exclusive() {
        assert_eq!(
            FavoriteTarget::Planet(PlanetId(3)).columns(),
            (Some(PlanetId(3)), None)
        );
        assert_eq!(
            FavoriteTarget::Person(PersonId(5)).columns(),
            (None, Some(PersonId(5)))
        );
    }

    #[test]
    fn detail_reports_its_target() {
        let fav = FavoriteDetail {
            id: FavoriteId(1),
            user_id: UserId(2),
            subject: FavoriteSubject::Person(vader()),
        };
        assert_eq!(fav.target(), FavoriteTarget::Person(PersonId(4)));
        assert_eq!(fav.favorite().user_id, UserId(2));
    }
}
