//! Ordered genre tags for venues and artists.
//!
//! Stored as a native array column, so no delimiter ever touches the data.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maximum length of a single genre tag
pub const MAX_GENRE_LEN: usize = 50;

/// Genres offered by the create/edit forms.
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Ordered, duplicate-free list of genre tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreList(Vec<String>);

impl GenreList {
    /// Build a list from submitted values.
    ///
    /// Entries are trimmed, blanks are dropped and repeats keep their first
    /// position. An entry longer than [`MAX_GENRE_LEN`] is rejected.
    pub fn new<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres: Vec<String> = Vec::new();
        for value in values {
            let genre = value.as_ref().trim();
            if genre.is_empty() {
                continue;
            }
            if genre.chars().count() > MAX_GENRE_LEN {
                return Err(CoreError::invalid_genre(
                    genre,
                    format!("longer than {} characters", MAX_GENRE_LEN),
                ));
            }
            if !genres.iter().any(|g| g == genre) {
                genres.push(genre.to_owned());
            }
        }
        Ok(Self(genres))
    }

    /// Wrap values read back from storage without re-validating them.
    pub fn from_stored(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
