//! The two browser pages. Everything interactive lives in the page script.

use axum::response::{Html, Redirect};

const HOME_PAGE: &str = include_str!("../../assets/index.html");
const FORM_PAGE: &str = include_str!("../../assets/form.html");

/// GET /
pub async fn home_page() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// GET /form
pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// Any unmatched path goes back to the landing page.
pub async fn redirect_home() -> Redirect {
    Redirect::to("/")
}
