//! Landing page

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub name: &'static str,
    pub version: &'static str,
    pub sections: Vec<Section>,
}

/// GET /
async fn index() -> Json<HomePage> {
    Json(HomePage {
        name: "showbook",
        version: env!("CARGO_PKG_VERSION"),
        sections: vec![
            Section {
                title: "Venues",
                href: "/venues",
            },
            Section {
                title: "Artists",
                href: "/artists",
            },
            Section {
                title: "Shows",
                href: "/shows",
            },
        ],
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
