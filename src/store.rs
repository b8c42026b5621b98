use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::{
    entities::{genre, movie, movie_genre, user, user_movie},
    error::{AppError, AppResult},
    omdb::MovieDetail,
};

/// Patch types carry only known attributes; the outer `Option` marks
/// "leave unchanged", the inner one clears a nullable column.
#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub profile_pic_url: Option<Option<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub director: Option<Option<String>>,
    pub year: Option<Option<i32>>,
    pub plot_short: Option<Option<String>>,
    pub imdb_rating: Option<Option<String>>,
    pub poster_url: Option<Option<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct UserMoviePatch {
    pub rating: Option<Option<f64>>,
    pub watched: Option<bool>,
}

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn add_user(
        &self,
        name: &str,
        profile_pic_url: Option<String>,
    ) -> AppResult<user::Model> {
        let taken =
            user::Entity::find().filter(user::Column::Name.eq(name)).one(&self.db).await?;
        if taken.is_some() {
            return Err(AppError::Duplicate(format!("user '{name}' already exists")));
        }

        let model = user::ActiveModel {
            name: Set(name.to_string()),
            profile_pic_url: Set(profile_pic_url),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(u) => Ok(u),
            Err(err) if is_unique_violation(&err) => {
                Err(AppError::Duplicate(format!("user '{name}' already exists")))
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_user(&self, user_id: i32) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(user_id).one(&self.db).await?)
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<user::Model>> {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        patch: UserPatch,
    ) -> AppResult<Option<user::Model>> {
        let Some(existing) = user::Entity::find_by_id(user_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.clone().into();
        let mut dirty = false;
        if let Some(name) = patch.name {
            active.name = Set(name);
            dirty = true;
        }
        if let Some(url) = patch.profile_pic_url {
            active.profile_pic_url = Set(url);
            dirty = true;
        }
        if !dirty {
            return Ok(Some(existing));
        }

        Ok(Some(active.update(&self.db).await?))
    }

    /// Removes the user and all of its favorites in one transaction.
    pub async fn delete_user(&self, user_id: i32) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        if user::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        user_movie::Entity::delete_many()
            .filter(user_movie::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(user_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Returns the existing movie matching `(title, year)` when present,
    /// otherwise creates one.
    pub async fn add_movie(
        &self,
        title: &str,
        director: Option<String>,
        year: Option<i32>,
    ) -> AppResult<movie::Model> {
        if let Some(existing) = find_movie_by_title_year(&self.db, title, year).await? {
            return Ok(existing);
        }

        let model = movie::ActiveModel {
            title: Set(title.to_string()),
            director: Set(director),
            year: Set(year),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn get_movie(&self, movie_id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(movie_id).one(&self.db).await?)
    }

    pub async fn get_all_movies(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn update_movie(
        &self,
        movie_id: i32,
        patch: MoviePatch,
    ) -> AppResult<Option<movie::Model>> {
        let Some(existing) = movie::Entity::find_by_id(movie_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = existing.clone().into();
        let mut dirty = false;
        if let Some(title) = patch.title {
            active.title = Set(title);
            dirty = true;
        }
        if let Some(director) = patch.director {
            active.director = Set(director);
            dirty = true;
        }
        if let Some(year) = patch.year {
            active.year = Set(year);
            dirty = true;
        }
        if let Some(plot) = patch.plot_short {
            active.plot_short = Set(plot);
            dirty = true;
        }
        if let Some(rating) = patch.imdb_rating {
            active.imdb_rating = Set(rating);
            dirty = true;
        }
        if let Some(poster) = patch.poster_url {
            active.poster_url = Set(poster);
            dirty = true;
        }
        if !dirty {
            return Ok(Some(existing));
        }

        Ok(Some(active.update(&self.db).await?))
    }

    /// Removes the movie, its favorites and its genre links in one
    /// transaction. Genre rows themselves are left alone.
    pub async fn delete_movie(&self, movie_id: i32) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        if movie::Entity::find_by_id(movie_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        user_movie::Entity::delete_many()
            .filter(user_movie::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        movie_genre::Entity::delete_many()
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await?;
        movie::Entity::delete_by_id(movie_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    /// A user's favorites in association-insertion order, paired with the
    /// per-user link attributes. Empty when the user is unknown.
    pub async fn get_user_movies(
        &self,
        user_id: i32,
    ) -> AppResult<Vec<(movie::Model, user_movie::Model)>> {
        let rows = user_movie::Entity::find()
            .filter(user_movie::Column::UserId.eq(user_id))
            .order_by_asc(user_movie::Column::AddedOn)
            .order_by_asc(user_movie::Column::MovieId)
            .find_also_related(movie::Entity)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(link, movie)| movie.map(|m| (m, link))).collect())
    }

    /// Find-or-create the movie by `(title, year)`, then find-or-create the
    /// favorite link, overwriting `rating` on either path. Idempotent.
    pub async fn add_movie_for_user(
        &self,
        user_id: i32,
        title: &str,
        director: Option<String>,
        year: Option<i32>,
        rating: Option<f64>,
    ) -> AppResult<user_movie::Model> {
        let txn = self.db.begin().await?;

        let movie = match find_movie_by_title_year(&txn, title, year).await? {
            Some(m) => m,
            None => {
                let model = movie::ActiveModel {
                    title: Set(title.to_string()),
                    director: Set(director),
                    year: Set(year),
                    ..Default::default()
                };
                model.insert(&txn).await?
            },
        };

        let link = upsert_link(&txn, user_id, movie.id, Some(rating)).await?;
        txn.commit().await?;
        Ok(link)
    }

    /// Find-or-create the favorite link for an already-persisted movie,
    /// leaving an existing link's rating untouched.
    pub async fn link_movie_to_user(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> AppResult<user_movie::Model> {
        upsert_link(&self.db, user_id, movie_id, None).await
    }

    pub async fn update_movie_for_user(
        &self,
        user_id: i32,
        movie_id: i32,
        patch: UserMoviePatch,
    ) -> AppResult<Option<user_movie::Model>> {
        let Some(existing) =
            user_movie::Entity::find_by_id((user_id, movie_id)).one(&self.db).await?
        else {
            return Ok(None);
        };

        let mut active: user_movie::ActiveModel = existing.clone().into();
        let mut dirty = false;
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
            dirty = true;
        }
        if let Some(watched) = patch.watched {
            active.watched = Set(watched);
            dirty = true;
        }
        if !dirty {
            return Ok(Some(existing));
        }

        Ok(Some(active.update(&self.db).await?))
    }

    pub async fn delete_movie_for_user(&self, user_id: i32, movie_id: i32) -> AppResult<bool> {
        let res = user_movie::Entity::delete_by_id((user_id, movie_id)).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn find_movie_by_omdb_id(&self, omdb_id: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::OmdbId.eq(omdb_id))
            .one(&self.db)
            .await?)
    }

    pub async fn find_movie_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find().filter(movie::Column::Title.eq(title)).one(&self.db).await?)
    }

    /// Persist an externally-sourced movie together with its genre links.
    /// A concurrent insert of the same external id loses the race and gets
    /// the surviving row back instead of a constraint error.
    pub async fn insert_enriched_movie(&self, detail: &MovieDetail) -> AppResult<movie::Model> {
        let txn = self.db.begin().await?;

        let model = movie::ActiveModel {
            title: Set(detail.title.clone()),
            director: Set(detail.director.clone()),
            year: Set(detail.year),
            omdb_id: Set(Some(detail.imdb_id.clone())),
            plot_short: Set(detail.plot_short.clone()),
            imdb_rating: Set(detail.imdb_rating.clone()),
            poster_url: Set(detail.poster_url.clone()),
            ..Default::default()
        };

        match model.insert(&txn).await {
            Ok(movie) => {
                set_genres(&txn, movie.id, &detail.genres).await?;
                txn.commit().await?;
                Ok(movie)
            },
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                self.find_movie_by_omdb_id(&detail.imdb_id)
                    .await?
                    .ok_or_else(|| AppError::Db(err))
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the movie's genre links, matching genre names
    /// case-insensitively against existing rows.
    pub async fn set_movie_genres(
        &self,
        movie_id: i32,
        names: &[String],
    ) -> AppResult<Vec<genre::Model>> {
        let txn = self.db.begin().await?;
        let genres = set_genres(&txn, movie_id, names).await?;
        txn.commit().await?;
        Ok(genres)
    }

    pub async fn get_movie_genres(&self, movie_id: i32) -> AppResult<Vec<genre::Model>> {
        let Some(movie) = movie::Entity::find_by_id(movie_id).one(&self.db).await? else {
            return Ok(Vec::new());
        };
        Ok(movie.find_related(genre::Entity).all(&self.db).await?)
    }
}

async fn find_movie_by_title_year<C: ConnectionTrait>(
    conn: &C,
    title: &str,
    year: Option<i32>,
) -> AppResult<Option<movie::Model>> {
    let query = movie::Entity::find().filter(movie::Column::Title.eq(title));
    let query = match year {
        Some(y) => query.filter(movie::Column::Year.eq(y)),
        None => query.filter(movie::Column::Year.is_null()),
    };
    Ok(query.one(conn).await?)
}

// `set_rating`: Some(r) overwrites the link's rating with r, None leaves
// an existing link untouched.
async fn upsert_link<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    movie_id: i32,
    set_rating: Option<Option<f64>>,
) -> AppResult<user_movie::Model> {
    if let Some(link) = user_movie::Entity::find_by_id((user_id, movie_id)).one(conn).await? {
        if let Some(rating) = set_rating {
            if rating != link.rating {
                let mut active: user_movie::ActiveModel = link.into();
                active.rating = Set(rating);
                return Ok(active.update(conn).await?);
            }
        }
        return Ok(link);
    }

    let model = user_movie::ActiveModel {
        user_id: Set(user_id),
        movie_id: Set(movie_id),
        rating: Set(set_rating.flatten()),
        watched: Set(false),
        added_on: Set(now_sec()),
    };

    match model.insert(conn).await {
        Ok(link) => Ok(link),
        Err(err) if is_unique_violation(&err) => {
            // Lost a same-pair race; the surviving row wins.
            user_movie::Entity::find_by_id((user_id, movie_id))
                .one(conn)
                .await?
                .ok_or_else(|| AppError::Db(err))
        },
        Err(err) if is_foreign_key_violation(&err) => Err(AppError::NotFound(format!(
            "user {user_id} or movie {movie_id} does not exist"
        ))),
        Err(err) => Err(err.into()),
    }
}

async fn set_genres<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    names: &[String],
) -> AppResult<Vec<genre::Model>> {
    movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;

    let mut linked: Vec<genre::Model> = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let existing = genre::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(genre::Column::Name))).eq(name.to_lowercase()))
            .one(conn)
            .await?;
        let genre = match existing {
            Some(g) => g,
            None => {
                let model = genre::ActiveModel { name: Set(name.to_string()), ..Default::default() };
                model.insert(conn).await?
            },
        };

        if linked.iter().any(|g| g.id == genre.id) {
            continue;
        }

        let link = movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre.id) };
        link.insert(conn).await?;
        linked.push(genre);
    }

    Ok(linked)
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_foreign_key_violation(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use migration::Migrator;
    use sea_orm::{ConnectOptions, Database, PaginatorTrait};
    use sea_orm_migration::MigratorTrait;

    use super::*;

    async fn mem_store() -> Store {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Store::new(db)
    }

    #[tokio::test]
    async fn add_user_roundtrip_and_duplicate() {
        let store = mem_store().await;

        let alice = store.add_user("alice", None).await.unwrap();
        let fetched = store.get_user(alice.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "alice");

        let err = store.add_user("alice", Some("http://pic".to_string())).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(store.get_all_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_user_merges_fields() {
        let store = mem_store().await;
        let u = store.add_user("bob", None).await.unwrap();

        let patch = UserPatch {
            profile_pic_url: Some(Some("http://pic/bob.png".to_string())),
            ..Default::default()
        };
        let updated = store.update_user(u.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "bob");
        assert_eq!(updated.profile_pic_url.as_deref(), Some("http://pic/bob.png"));

        let noop = store.update_user(u.id, UserPatch::default()).await.unwrap().unwrap();
        assert_eq!(noop, updated);

        assert!(store.update_user(9999, UserPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_movie_dedups_on_title_and_year() {
        let store = mem_store().await;

        let first = store
            .add_movie("Solaris", Some("Tarkovsky".to_string()), Some(1972))
            .await
            .unwrap();
        let again = store.add_movie("Solaris", None, Some(1972)).await.unwrap();
        assert_eq!(first.id, again.id);
        // the dedup hit keeps the original record's fields
        assert_eq!(again.director.as_deref(), Some("Tarkovsky"));

        let remake = store.add_movie("Solaris", None, Some(2002)).await.unwrap();
        assert_ne!(first.id, remake.id);
        assert_eq!(store.get_all_movies().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn add_movie_for_user_is_idempotent() {
        let store = mem_store().await;
        let u = store.add_user("carol", None).await.unwrap();

        let link =
            store.add_movie_for_user(u.id, "Heat", None, Some(1995), Some(3.5)).await.unwrap();
        let link2 =
            store.add_movie_for_user(u.id, "Heat", None, Some(1995), Some(4.5)).await.unwrap();

        assert_eq!(link.movie_id, link2.movie_id);
        assert_eq!(link2.rating, Some(4.5));
        assert_eq!(user_movie::Entity::find().count(store.db()).await.unwrap(), 1);
        assert_eq!(store.get_all_movies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn link_movie_to_user_keeps_existing_rating() {
        let store = mem_store().await;
        let u = store.add_user("dave", None).await.unwrap();
        let m = store.add_movie("Ran", None, Some(1985)).await.unwrap();

        store.add_movie_for_user(u.id, "Ran", None, Some(1985), Some(5.0)).await.unwrap();
        let relinked = store.link_movie_to_user(u.id, m.id).await.unwrap();
        assert_eq!(relinked.rating, Some(5.0));
    }

    #[tokio::test]
    async fn linking_unknown_user_is_not_found() {
        let store = mem_store().await;
        let m = store.add_movie("Stalker", None, Some(1979)).await.unwrap();

        let err = store.link_movie_to_user(404, m.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_user_movies_orders_by_insertion() {
        let store = mem_store().await;
        let u = store.add_user("erin", None).await.unwrap();

        for title in ["Zodiac", "Alien", "Memento"] {
            store.add_movie_for_user(u.id, title, None, None, None).await.unwrap();
        }

        let favorites = store.get_user_movies(u.id).await.unwrap();
        let titles: Vec<&str> = favorites.iter().map(|(m, _)| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Zodiac", "Alien", "Memento"]);

        assert!(store.get_user_movies(9999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_user_cascades_own_links_only() {
        let store = mem_store().await;
        let u1 = store.add_user("frank", None).await.unwrap();
        let u2 = store.add_user("grace", None).await.unwrap();

        store.add_movie_for_user(u1.id, "Jaws", None, Some(1975), None).await.unwrap();
        store.add_movie_for_user(u2.id, "Jaws", None, Some(1975), None).await.unwrap();

        assert!(store.delete_user(u1.id).await.unwrap());
        assert!(store.get_user(u1.id).await.unwrap().is_none());

        let remaining = user_movie::Entity::find().all(store.db()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, u2.id);
        assert_eq!(store.get_all_movies().await.unwrap().len(), 1);

        assert!(!store.delete_user(u1.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_movie_cascades_links_and_bridge_not_genres() {
        let store = mem_store().await;
        let u = store.add_user("heidi", None).await.unwrap();
        let m = store.add_movie("Seven", None, Some(1995)).await.unwrap();
        store.link_movie_to_user(u.id, m.id).await.unwrap();
        store
            .set_movie_genres(m.id, &["Crime".to_string(), "Thriller".to_string()])
            .await
            .unwrap();

        assert!(store.delete_movie(m.id).await.unwrap());

        assert_eq!(user_movie::Entity::find().count(store.db()).await.unwrap(), 0);
        assert_eq!(movie_genre::Entity::find().count(store.db()).await.unwrap(), 0);
        assert_eq!(genre::Entity::find().count(store.db()).await.unwrap(), 2);

        assert!(!store.delete_movie(m.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_movie_for_user_patches_watched_only() {
        let store = mem_store().await;
        let u = store.add_user("ivan", None).await.unwrap();
        store.add_movie_for_user(u.id, "Rope", None, Some(1948), Some(4.0)).await.unwrap();
        let movie = store.find_movie_by_title("Rope").await.unwrap().unwrap();

        let patch = UserMoviePatch { watched: Some(true), ..Default::default() };
        let updated = store.update_movie_for_user(u.id, movie.id, patch).await.unwrap().unwrap();
        assert!(updated.watched);
        assert_eq!(updated.rating, Some(4.0));

        assert!(
            store
                .update_movie_for_user(u.id, 9999, UserMoviePatch::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_movie_for_user_absent_is_false() {
        let store = mem_store().await;
        let u = store.add_user("judy", None).await.unwrap();
        let m = store.add_movie("Brazil", None, Some(1985)).await.unwrap();

        assert!(!store.delete_movie_for_user(u.id, m.id).await.unwrap());

        store.link_movie_to_user(u.id, m.id).await.unwrap();
        assert!(store.delete_movie_for_user(u.id, m.id).await.unwrap());
        assert!(!store.delete_movie_for_user(u.id, m.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_movie_merges_fields() {
        let store = mem_store().await;
        let m = store.add_movie("The Thing", None, Some(1982)).await.unwrap();

        let patch = MoviePatch {
            director: Some(Some("John Carpenter".to_string())),
            ..Default::default()
        };
        let updated = store.update_movie(m.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.director.as_deref(), Some("John Carpenter"));
        assert_eq!(updated.title, "The Thing");

        assert!(store.update_movie(9999, MoviePatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_movie_genres_matches_names_case_insensitively() {
        let store = mem_store().await;
        let m1 = store.add_movie("Alien", None, Some(1979)).await.unwrap();
        let m2 = store.add_movie("Aliens", None, Some(1986)).await.unwrap();

        store
            .set_movie_genres(m1.id, &["Horror".to_string(), "Sci-Fi".to_string()])
            .await
            .unwrap();
        store.set_movie_genres(m2.id, &[" horror ".to_string()]).await.unwrap();

        assert_eq!(genre::Entity::find().count(store.db()).await.unwrap(), 2);

        let g1 = store.get_movie_genres(m1.id).await.unwrap();
        let g2 = store.get_movie_genres(m2.id).await.unwrap();
        assert_eq!(g1.len(), 2);
        assert_eq!(g2.len(), 1);
        assert!(g1.iter().any(|g| g.id == g2[0].id));
    }

    #[tokio::test]
    async fn insert_enriched_movie_dedups_on_external_id() {
        let store = mem_store().await;
        let detail = MovieDetail {
            imdb_id: "tt0078748".to_string(),
            title: "Alien".to_string(),
            director: Some("Ridley Scott".to_string()),
            year: Some(1979),
            plot_short: Some("A commercial crew picks up a distress call.".to_string()),
            imdb_rating: Some("8.5".to_string()),
            poster_url: None,
            genres: vec!["Horror".to_string(), "Sci-Fi".to_string()],
        };

        let first = store.insert_enriched_movie(&detail).await.unwrap();
        let second = store.insert_enriched_movie(&detail).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.get_all_movies().await.unwrap().len(), 1);
        assert_eq!(store.get_movie_genres(first.id).await.unwrap().len(), 2);

        let found = store.find_movie_by_omdb_id("tt0078748").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }
}
