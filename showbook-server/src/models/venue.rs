//! Venue form handling.
//!
//! Only the fields named here are writable; anything else in the body
//! (`id`, `csrf_token`, ...) is ignored.

use serde::Serialize;
use showbook_core::GenreList;

use super::form::FormFields;
use super::validation::{optional_text, required_text, ValidationError, MAX_LINK_LEN, MAX_TEXT_LEN};

/// Every writable venue column, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: GenreList,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Raw venue form. `None` means the field was not submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueSubmission {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueSubmission {
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            address: form.text("address"),
            phone: form.text("phone"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website: form.text("website_link"),
            genres: form.get_all("genres").map(str::to_owned).collect(),
            seeking_talent: form.checkbox("seeking_talent"),
            seeking_description: form.text("seeking_description"),
        }
    }

    /// Submitted name for user-facing messages, blank when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or("")
    }

    /// Validate a complete submission (create).
    pub fn into_fields(self) -> Result<VenueFields, ValidationError> {
        let genres = GenreList::new(&self.genres).map_err(|e| ValidationError::InvalidFormat {
            field: "genres",
            reason: e.to_string(),
        })?;

        Ok(VenueFields {
            name: required_text("name", self.name, MAX_TEXT_LEN)?,
            city: required_text("city", self.city, MAX_TEXT_LEN)?,
            state: required_text("state", self.state, MAX_TEXT_LEN)?,
            address: required_text("address", self.address, MAX_TEXT_LEN)?,
            phone: optional_text("phone", self.phone, MAX_TEXT_LEN)?,
            image_link: optional_text("image_link", self.image_link, MAX_LINK_LEN)?,
            facebook_link: optional_text("facebook_link", self.facebook_link, MAX_TEXT_LEN)?,
            website: optional_text("website_link", self.website, MAX_TEXT_LEN)?,
            genres,
            seeking_talent: self.seeking_talent,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description,
                MAX_TEXT_LEN,
            )?,
        })
    }

    /// Apply onto a stored venue (edit).
    ///
    /// Submitted fields overwrite, absent ones keep the stored value.
    /// Genres and the seeking flag always come from the submission.
    pub fn apply_to(self, current: VenueFields) -> Result<VenueFields, ValidationError> {
        Self {
            name: self.name.or(Some(current.name)),
            city: self.city.or(Some(current.city)),
            state: self.state.or(Some(current.state)),
            address: self.address.or(Some(current.address)),
            phone: self.phone.or(current.phone),
            image_link: self.image_link.or(current.image_link),
            facebook_link: self.facebook_link.or(current.facebook_link),
            website: self.website.or(current.website),
            genres: self.genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.or(current.seeking_description),
        }
        .into_fields()
    }
}

/// Venue form as the create/edit page shows it
#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl From<VenueFields> for VenueForm {
    fn from(v: VenueFields) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone.unwrap_or_default(),
            image_link: v.image_link.unwrap_or_default(),
            facebook_link: v.facebook_link.unwrap_or_default(),
            website_link: v.website.unwrap_or_default(),
            genres: v.genres.into_vec(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.unwrap_or_default(),
        }
    }
}
