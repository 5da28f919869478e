//! Form submissions, view helpers and validation
//!
//! All user input is validated when turned into `*Fields`/`NewShow`.
//! Invalid input returns ValidationError, not panic.

pub mod artist;
pub mod form;
pub mod notice;
pub mod schedule;
pub mod search;
pub mod show;
pub mod validation;
pub mod venue;

pub use artist::{ArtistFields, ArtistForm, ArtistSubmission};
pub use form::{FormFields, STATE_CHOICES};
pub use notice::{Notice, Outcome};
pub use schedule::{group_by_area, partition_by_time, Area, Scheduled};
pub use search::like_pattern;
pub use show::{NewShow, ShowForm, ShowSubmission};
pub use validation::ValidationError;
pub use venue::{VenueFields, VenueForm, VenueSubmission};
