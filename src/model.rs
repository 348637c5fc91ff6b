//! The mall record and its request body.

use serde::{Deserialize, Serialize};

/// A stored mall. `id` is assigned by the store on creation and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Mall {
    pub id: i64,
    pub name: String,
    pub score: i32,
    pub location: String,
    pub has_restaurants: bool,
}

/// Mutable fields of a mall, as sent in create and update bodies.
/// Any `id` in the body is ignored. Legacy field names are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MallInput {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "puntuacion")]
    pub score: i32,
    #[serde(alias = "ubicacion")]
    pub location: String,
    #[serde(alias = "restaurantes")]
    pub has_restaurants: bool,
}

impl MallInput {
    pub fn into_mall(self, id: i64) -> Mall {
        Mall {
            id,
            name: self.name,
            score: self.score,
            location: self.location,
            has_restaurants: self.has_restaurants,
        }
    }
}

impl From<Mall> for MallInput {
    fn from(m: Mall) -> Self {
        MallInput {
            name: m.name,
            score: m.score,
            location: m.location,
            has_restaurants: m.has_restaurants,
        }
    }
}
