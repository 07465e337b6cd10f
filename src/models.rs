use jiff::Timestamp;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entities::movie;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieDto {
    pub title: String,
    pub genre: String,
    pub duration: i32,
}

/// Full replacement body. Omitted fields fall back to their empty value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateMovieDto {
    pub title: String,
    pub genre: String,
    pub duration: i32,
}

/// Partial update body; each present field replaces the current value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadMovieDto {
    pub title: String,
    pub genre: String,
    pub duration: i32,
    pub queried_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_take")]
    pub take: u64,
}

fn default_take() -> u64 {
    50
}

impl CreateMovieDto {
    pub fn into_active_model(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: Default::default(),
            title: Set(self.title),
            genre: Set(self.genre),
            duration: Set(self.duration),
        }
    }

    pub fn as_update(&self) -> UpdateMovieDto {
        UpdateMovieDto { title: self.title.clone(), genre: self.genre.clone(), duration: self.duration }
    }
}

impl UpdateMovieDto {
    /// Overwrites every mutable column of `movie`, keeping its id.
    pub fn apply_to(self, movie: movie::Model) -> movie::ActiveModel {
        let mut active: movie::ActiveModel = movie.into();
        active.title = Set(self.title);
        active.genre = Set(self.genre);
        active.duration = Set(self.duration);
        active
    }
}

impl From<&movie::Model> for UpdateMovieDto {
    fn from(movie: &movie::Model) -> Self {
        Self { title: movie.title.clone(), genre: movie.genre.clone(), duration: movie.duration }
    }
}

impl MoviePatch {
    pub fn overlay(self, mut dto: UpdateMovieDto) -> UpdateMovieDto {
        if let Some(title) = self.title {
            dto.title = title;
        }
        if let Some(genre) = self.genre {
            dto.genre = genre;
        }
        if let Some(duration) = self.duration {
            dto.duration = duration;
        }
        dto
    }
}

impl From<movie::Model> for ReadMovieDto {
    fn from(movie: movie::Model) -> Self {
        Self {
            title: movie.title,
            genre: movie.genre,
            duration: movie.duration,
            queried_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveValue;

    use super::*;

    fn stored() -> movie::Model {
        movie::Model {
            id: 7,
            title: "Inception".to_string(),
            genre: "Sci-Fi".to_string(),
            duration: 148,
        }
    }

    #[test]
    fn create_leaves_id_to_the_store() {
        let dto = CreateMovieDto { title: "Heat".into(), genre: "Crime".into(), duration: 170 };
        let active = dto.into_active_model();

        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(active.title, ActiveValue::Set("Heat".to_string()));
        assert_eq!(active.duration, ActiveValue::Set(170));
    }

    #[test]
    fn update_body_defaults_missing_fields() {
        let dto: UpdateMovieDto = serde_json::from_str(r#"{"title":"Alien"}"#).unwrap();
        assert_eq!(dto, UpdateMovieDto { title: "Alien".into(), genre: String::new(), duration: 0 });
    }

    #[test]
    fn update_overwrites_all_fields_and_keeps_id() {
        let dto = UpdateMovieDto { title: "Alien".into(), genre: String::new(), duration: 0 };
        let active = dto.apply_to(stored());

        assert_eq!(active.id, ActiveValue::Unchanged(7));
        assert_eq!(active.title, ActiveValue::Set("Alien".to_string()));
        assert_eq!(active.genre, ActiveValue::Set(String::new()));
        assert_eq!(active.duration, ActiveValue::Set(0));
    }

    #[test]
    fn patch_keeps_absent_and_null_fields() {
        let patch: MoviePatch = serde_json::from_str(r#"{"title":"Tenet","genre":null}"#).unwrap();
        let patched = patch.overlay(UpdateMovieDto::from(&stored()));

        assert_eq!(patched.title, "Tenet");
        assert_eq!(patched.genre, "Sci-Fi");
        assert_eq!(patched.duration, 148);
    }

    #[test]
    fn read_dto_is_stamped_at_mapping_time() {
        let before = Timestamp::now();
        let read = ReadMovieDto::from(stored());

        assert!(read.queried_at >= before);
        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["title"], "Inception");
        assert!(json["queriedAt"].is_string());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn list_query_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!((q.skip, q.take), (0, 50));
    }
}
