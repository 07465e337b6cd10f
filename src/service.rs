use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{CreateMovieDto, MoviePatch, ReadMovieDto, UpdateMovieDto},
    validation::ValidationRules,
};

const MAX_BOUND: u64 = i64::MAX as u64;

#[derive(Clone)]
pub struct MovieService {
    db: DatabaseConnection,
    rules: ValidationRules,
}

impl MovieService {
    pub fn new(db: DatabaseConnection, rules: ValidationRules) -> Self {
        Self { db, rules }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create(&self, dto: CreateMovieDto) -> AppResult<movie::Model> {
        if self.rules.validate_writes {
            self.rules.validate(&dto.as_update())?;
        }

        let movie = dto.into_active_model().insert(&self.db).await?;
        debug!(id = movie.id, title = %movie.title, "created movie");
        Ok(movie)
    }

    pub async fn list(&self, skip: u64, take: u64) -> AppResult<Vec<ReadMovieDto>> {
        // SQLite binds OFFSET/LIMIT as i64; anything larger already covers every row.
        let skip = skip.min(MAX_BOUND);
        let take = take.min(MAX_BOUND);

        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await?;

        debug!(skip, take, count = movies.len(), "listed movies");
        Ok(movies.into_iter().map(ReadMovieDto::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<ReadMovieDto> {
        let movie = movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)?;
        Ok(movie.into())
    }

    /// Replaces title, genre and duration with the body as given.
    pub async fn update(&self, id: i32, dto: UpdateMovieDto) -> AppResult<()> {
        if self.rules.validate_writes {
            self.rules.validate(&dto)?;
        }

        let txn = self.db.begin().await?;
        let movie = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(AppError::NotFound)?;
        dto.apply_to(movie).update(&txn).await?;
        txn.commit().await?;

        debug!(id, "updated movie");
        Ok(())
    }

    /// Overlays `patch` on the stored state, validates the result, then writes it back.
    pub async fn patch(&self, id: i32, patch: MoviePatch) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let movie = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(AppError::NotFound)?;

        let patched = patch.overlay(UpdateMovieDto::from(&movie));
        if let Err(errors) = self.rules.validate(&patched) {
            debug!(id, %errors, "rejected movie patch");
            return Err(errors.into());
        }

        patched.apply_to(movie).update(&txn).await?;
        txn.commit().await?;

        debug!(id, "patched movie");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let movie = movie::Entity::find_by_id(id).one(&txn).await?.ok_or(AppError::NotFound)?;
        movie.delete(&txn).await?;
        txn.commit().await?;

        debug!(id, "deleted movie");
        Ok(())
    }
}
