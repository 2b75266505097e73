//! HTTP routes.

use crate::{
    refresh::{refresh, UpdatePayload},
    session::SESSION_COOKIE,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use log::{info, warn};
use pdm_chart_ui::{
    assets::{DASHBOARD_JS, DASHBOARD_JS_PATH},
    page::render_page,
};
use pdm_gnss::upstream::Upstream;
use serde::Deserialize;
use std::sync::Arc;

type SharedState<U> = State<Arc<AppState<U>>>;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    #[serde(default)]
    pub failed: bool,
}

pub fn router<U: Upstream + 'static>(state: Arc<AppState<U>>) -> Router {
    Router::new()
        .route("/", get(index::<U>))
        .route("/login", get(login_page::<U>).post(login::<U>))
        .route("/logout", post(logout))
        .route("/update", post(update::<U>))
        .route(DASHBOARD_JS_PATH, get(dashboard_js))
        .with_state(state)
}

async fn index<U: Upstream>(State(state): SharedState<U>, jar: CookieJar) -> Html<String> {
    Html(render_page(state.session_user(&jar).is_some(), false))
}

async fn login_page<U: Upstream>(
    State(state): SharedState<U>,
    jar: CookieJar,
    Query(query): Query<LoginPageQuery>,
) -> Html<String> {
    Html(render_page(state.session_user(&jar).is_some(), query.failed))
}

async fn login<U: Upstream>(
    State(state): SharedState<U>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Redirect) {
    if !state.credentials.verify(&form.username, &form.password) {
        warn!("Login failed for {}", form.username);
        return (jar, Redirect::to("/login?failed=true"));
    }
    info!("Login succeeded for {}", form.username);
    let cookie = Cookie::build((SESSION_COOKIE, state.sessions.issue(&form.username)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), Redirect::to("/"))
}

async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    info!("Logout");
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/")), Redirect::to("/login"))
}

async fn update<U: Upstream>(State(state): SharedState<U>, jar: CookieJar) -> Json<UpdatePayload> {
    let user = state.session_user(&jar);
    Json(refresh(&state, user.as_deref()).await)
}

async fn dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}
