use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use blazeink_cite::link_citations;
use blazeink_core::content::validate::DEFAULT_PAGE_LIMIT;
use blazeink_core::{
    ContentPage, ContentRecord, GeneratedArticle, GenerationRequest, Pagination, SessionId,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session_id";

/// Content generation and retrieval routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/content", get(session_content))
        .route("/content/{id}", get(get_content).delete(delete_content))
        .route("/all-content", get(all_content))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(alias = "skip")]
    offset: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentQuery {
    #[serde(default)]
    linked: bool,
}

fn session_from(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

fn session_cookie(session: &SessionId, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Generate an article for the caller's session, minting the session if needed.
async fn generate(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<GeneratedArticle>)> {
    let Json(request) = payload?;
    let request = request.validate()?;

    let existing = session_from(&jar);
    let (session, jar) = match existing {
        Some(session) => (session, jar),
        None => {
            let session = SessionId::generate();
            let cookie = session_cookie(&session, state.config().cookie_secure);
            (session, jar.add(cookie))
        }
    };

    tracing::info!(topic = %request.topic, "generating content");
    let text = state.generator().generate(&request).await?;
    let article = GeneratedArticle::assemble(&request, text);

    state.store().save(session.as_str(), &article).await?;

    Ok((jar, Json(article)))
}

/// Everything generated under the caller's session cookie, newest first.
async fn session_content(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<Vec<ContentRecord>>> {
    let Some(session) = session_from(&jar) else {
        return Ok(Json(Vec::new()));
    };
    let records = state.store().get_by_session(session.as_str()).await?;
    Ok(Json(records))
}

async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> ApiResult<Json<ContentRecord>> {
    let Query(query) = query?;
    let mut record = state
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;

    if query.linked {
        record.article.content = link_citations(&record.article.content, &record.article.citations);
    }
    Ok(Json(record))
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.store().delete(&id).await? {
        return Err(ApiError::NotFound(format!("content {id}")));
    }
    Ok(Json(json!({ "message": "Content deleted" })))
}

/// All content across sessions, paginated.
async fn all_content(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<ContentPage>> {
    let Query(query) = query?;
    let pagination = Pagination::new(
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    )?;
    let page = state.store().get_all(pagination).await?;
    Ok(Json(page))
}
