use axum::Json;

use crate::views::StaticPage;

pub async fn author() -> Json<StaticPage> {
    Json(StaticPage {
        page: "author",
        title: "About the author",
        body: "Yatube is written and maintained by a single author.",
    })
}

pub async fn tech() -> Json<StaticPage> {
    Json(StaticPage {
        page: "tech",
        title: "Technologies",
        body: "Rust, axum, sea-orm and SQLite.",
    })
}
