use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::UpdateMovieDto;

/// Field-level rules a movie body must satisfy before it is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRules {
    pub require_title: bool,
    pub require_genre: bool,
    pub max_genre_len: Option<usize>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    /// Also check create and full-update bodies, not only patched state.
    pub validate_writes: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_title: true,
            require_genre: true,
            max_genre_len: None,
            min_duration: Some(1),
            max_duration: None,
            validate_writes: false,
        }
    }
}

/// Violated rules, keyed by the JSON field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl ValidationRules {
    pub fn validate(&self, dto: &UpdateMovieDto) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.require_title && dto.title.trim().is_empty() {
            errors.add("title", "title is required");
        }

        if self.require_genre && dto.genre.trim().is_empty() {
            errors.add("genre", "genre is required");
        }
        if let Some(max) = self.max_genre_len {
            let len = dto.genre.chars().count();
            if len > max {
                errors.add("genre", format!("genre must be at most {max} characters, got {len}"));
            }
        }

        if let Some(min) = self.min_duration {
            if dto.duration < min {
                errors.add("duration", format!("duration must be at least {min}"));
            }
        }
        if let Some(max) = self.max_duration {
            if dto.duration > max {
                errors.add("duration", format!("duration must be at most {max}"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
