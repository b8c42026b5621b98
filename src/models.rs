use serde::{Deserialize, Serialize};

use crate::entities::{movie, user, user_movie};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub profile_pic_url: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, name: u.name, profile_pic_url: u.profile_pic_url }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteMovie {
    pub id: i32,
    pub title: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub omdb_id: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
    pub watched: bool,
    pub added_on: String,
}

impl FavoriteMovie {
    pub fn from_parts(movie: movie::Model, link: user_movie::Model) -> Self {
        let added_on = jiff::Timestamp::from_second(link.added_on)
            .map(|ts| ts.to_string())
            .unwrap_or_else(|_| link.added_on.to_string());
        Self {
            id: movie.id,
            title: movie.title,
            director: movie.director,
            year: movie.year,
            omdb_id: movie.omdb_id,
            poster_url: movie.poster_url,
            rating: link.rating,
            watched: link.watched,
            added_on,
        }
    }
}

/// A batch item referencing a movie by title or by IMDb id.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MovieRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

/// Batch endpoints accept a single object or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MovieRefs {
    One(MovieRef),
    Many(Vec<MovieRef>),
}

impl MovieRefs {
    pub fn into_vec(self) -> Vec<MovieRef> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddedMovie {
    pub movie_id: i32,
    pub imdb_id: Option<String>,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct FailedItem {
    pub movie: MovieRef,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct AddReport {
    pub added: Vec<AddedMovie>,
    pub errors: Vec<FailedItem>,
}

#[derive(Debug, Serialize)]
pub struct RemovedMovie {
    pub movie_id: i32,
    pub title: String,
}

#[derive(Debug, Default, Serialize)]
pub struct RemoveReport {
    pub removed: Vec<RemovedMovie>,
    pub errors: Vec<FailedItem>,
}
