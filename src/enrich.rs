use tracing::{debug, warn};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{AddReport, AddedMovie, FailedItem, MovieRef, RemoveReport, RemovedMovie},
    omdb::OmdbClient,
    store::Store,
};

/// Resolve a title or IMDb id to a locally-persisted movie. A movie already
/// stored under the external id is returned as-is; with a direct id that
/// means zero calls to the metadata service.
pub async fn add_movie_from_omdb(
    store: &Store,
    omdb: &OmdbClient,
    title: Option<&str>,
    imdb_id: Option<&str>,
) -> AppResult<movie::Model> {
    let imdb_id = match (imdb_id, title) {
        (Some(id), _) => id.to_string(),
        (None, Some(title)) => omdb.search(title).await?,
        (None, None) => return Err(AppError::Validation("title or imdb_id required".to_string())),
    };

    if let Some(existing) = store.find_movie_by_omdb_id(&imdb_id).await? {
        debug!(imdb_id = %imdb_id, "movie already stored");
        return Ok(existing);
    }

    let detail = omdb.detail(&imdb_id).await?;
    store.insert_enriched_movie(&detail).await
}

/// Each item is processed independently; one failure never rolls back or
/// aborts the others.
pub async fn add_movies_for_user(
    store: &Store,
    omdb: &OmdbClient,
    user_id: i32,
    items: Vec<MovieRef>,
) -> AddReport {
    let mut report = AddReport::default();
    for item in items {
        match add_one(store, omdb, user_id, &item).await {
            Ok(movie) => {
                debug!(user_id = user_id, movie_id = movie.id, title = %movie.title, "favorite added");
                report.added.push(AddedMovie {
                    movie_id: movie.id,
                    imdb_id: movie.omdb_id,
                    title: movie.title,
                });
            },
            Err(err) => {
                warn!(user_id = user_id, error = %err, "failed to add favorite");
                report.errors.push(FailedItem { movie: item, error: err.to_string() });
            },
        }
    }
    report
}

async fn add_one(
    store: &Store,
    omdb: &OmdbClient,
    user_id: i32,
    item: &MovieRef,
) -> AppResult<movie::Model> {
    let movie =
        add_movie_from_omdb(store, omdb, item.title.as_deref(), item.imdb_id.as_deref()).await?;
    store.link_movie_to_user(user_id, movie.id).await?;
    Ok(movie)
}

/// Batch unlink; resolves items against local storage only.
pub async fn remove_movies_for_user(
    store: &Store,
    user_id: i32,
    items: Vec<MovieRef>,
) -> RemoveReport {
    let mut report = RemoveReport::default();
    for item in items {
        match remove_one(store, user_id, &item).await {
            Ok(movie) => {
                report.removed.push(RemovedMovie { movie_id: movie.id, title: movie.title });
            },
            Err(err) => {
                warn!(user_id = user_id, error = %err, "failed to remove favorite");
                report.errors.push(FailedItem { movie: item, error: err.to_string() });
            },
        }
    }
    report
}

async fn remove_one(store: &Store, user_id: i32, item: &MovieRef) -> AppResult<movie::Model> {
    let movie = match (&item.imdb_id, &item.title) {
        (Some(id), _) => store.find_movie_by_omdb_id(id).await?,
        (None, Some(title)) => store.find_movie_by_title(title).await?,
        (None, None) => return Err(AppError::Validation("title or imdb_id required".to_string())),
    }
    .ok_or_else(|| AppError::NotFound("movie not found".to_string()))?;

    if !store.delete_movie_for_user(user_id, movie.id).await? {
        return Err(AppError::NotFound(format!(
            "'{}' is not in the user's favorites",
            movie.title
        )));
    }
    Ok(movie)
}
