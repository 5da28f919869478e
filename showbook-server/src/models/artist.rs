//! Artist form handling

use serde::Serialize;
use showbook_core::GenreList;

use super::form::FormFields;
use super::validation::{optional_text, required_text, ValidationError, MAX_LINK_LEN, MAX_TEXT_LEN};

/// Every writable artist column, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: GenreList,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Raw artist form. `None` means the field was not submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistSubmission {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistSubmission {
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            phone: form.text("phone"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website: form.text("website_link"),
            genres: form.get_all("genres").map(str::to_owned).collect(),
            seeking_venue: form.checkbox("seeking_venue"),
            seeking_description: form.text("seeking_description"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn into_fields(self) -> Result<ArtistFields, ValidationError> {
        let genres = GenreList::new(&self.genres).map_err(|e| ValidationError::InvalidFormat {
            field: "genres",
            reason: e.to_string(),
        })?;

        Ok(ArtistFields {
            name: required_text("name", self.name, MAX_TEXT_LEN)?,
            city: required_text("city", self.city, MAX_TEXT_LEN)?,
            state: required_text("state", self.state, MAX_TEXT_LEN)?,
            phone: optional_text("phone", self.phone, MAX_TEXT_LEN)?,
            image_link: optional_text("image_link", self.image_link, MAX_LINK_LEN)?,
            facebook_link: optional_text("facebook_link", self.facebook_link, MAX_TEXT_LEN)?,
            website: optional_text("website_link", self.website, MAX_TEXT_LEN)?,
            genres,
            seeking_venue: self.seeking_venue,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description,
                MAX_TEXT_LEN,
            )?,
        })
    }

    /// Same merge rules as [`super::VenueSubmission::apply_to`].
    pub fn apply_to(self, current: ArtistFields) -> Result<ArtistFields, ValidationError> {
        Self {
            name: self.name.or(Some(current.name)),
            city: self.city.or(Some(current.city)),
            state: self.state.or(Some(current.state)),
            phone: self.phone.or(current.phone),
            image_link: self.image_link.or(current.image_link),
            facebook_link: self.facebook_link.or(current.facebook_link),
            website: self.website.or(current.website),
            genres: self.genres,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.or(current.seeking_description),
        }
        .into_fields()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl From<ArtistFields> for ArtistForm {
    fn from(a: ArtistFields) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone.unwrap_or_default(),
            image_link: a.image_link.unwrap_or_default(),
            facebook_link: a.facebook_link.unwrap_or_default(),
            website_link: a.website.unwrap_or_default(),
            genres: a.genres.into_vec(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guns_n_petals() -> FormFields {
        [
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
            ("website_link", "https://www.gunsnpetalsband.com"),
            ("seeking_venue", "y"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn create_normalizes_fields() {
        let fields = ArtistSubmission::from_form(&guns_n_petals())
            .into_fields()
            .unwrap();
        assert_eq!(fields.name, "Guns N Petals");
        assert!(fields.seeking_venue);
        assert_eq!(
            fields.website.as_deref(),
            Some("https://www.gunsnpetalsband.com")
        );
        assert_eq!(fields.genres.as_slice(), ["Rock n Roll"]);
    }

    #[test]
    fn seeking_talent_key_does_not_set_seeking_venue() {
        let form: FormFields = [
            ("name", "Matt Quevedo"),
            ("city", "New York"),
            ("state", "NY"),
            ("seeking_talent", "y"),
        ]
        .into_iter()
        .collect();
        let fields = ArtistSubmission::from_form(&form).into_fields().unwrap();
        assert!(!fields.seeking_venue);
    }

    #[test]
    fn edit_merges_onto_stored_artist() {
        let current = ArtistSubmission::from_form(&guns_n_petals())
            .into_fields()
            .unwrap();
        let form: FormFields = [("city", "Oakland"), ("genres", "Punk"), ("genres", "Pop")]
            .into_iter()
            .collect();

        let updated = ArtistSubmission::from_form(&form).apply_to(current).unwrap();
        assert_eq!(updated.name, "Guns N Petals");
        assert_eq!(updated.city, "Oakland");
        assert_eq!(updated.genres.as_slice(), ["Punk", "Pop"]);
        assert!(!updated.seeking_venue);
    }

    #[test]
    fn overlong_image_link_rejected() {
        let link = format!("https://img.example/{}", "a".repeat(MAX_LINK_LEN));
        let mut pairs = vec![
            ("name".to_string(), "A".to_string()),
            ("city".to_string(), "B".to_string()),
            ("state".to_string(), "CA".to_string()),
        ];
        pairs.push(("image_link".to_string(), link));
        let err = ArtistSubmission::from_form(&FormFields::new(pairs))
            .into_fields()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "image_link",
                max: MAX_LINK_LEN
            }
        );
    }
}
