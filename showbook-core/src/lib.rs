pub mod config;
pub mod datetime;
pub mod error;
pub mod genres;

pub use config::ShowbookConfig;
pub use datetime::{format_timestamp, parse_timestamp, DateStyle};
pub use error::{CoreError, Result};
pub use genres::{GenreList, GENRE_CHOICES};
