use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use clap::Parser;
use server_api::{create_item, edit_item, get_item, list_items, seed_test_items, ApiContext};
use shared::{
    domain::ItemId,
    error::{ApiError, ErrorCode},
    protocol::{DetailQuery, ItemForm},
};
use storage::Storage;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod views;

use config::{load_settings, SETTINGS_FILE};
use views::{status_for, Views};

const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Parser, Debug)]
struct Cli {
    /// Settings file to read instead of ./server.toml
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    bind: Option<String>,
    /// Start with an empty store
    #[arg(long)]
    no_seed: bool,
}

struct AppState {
    api: ApiContext,
    views: Views,
}

type PageError = (StatusCode, Html<String>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let mut settings = load_settings(&settings_path);
    if let Some(bind) = cli.bind {
        settings.server_bind = bind;
    }
    if cli.no_seed {
        settings.seed_test_data = false;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api = ApiContext::new(Storage::new());
    if settings.seed_test_data {
        seed_test_items(&api).await;
    }
    let views = Views::new().map_err(|error| {
        error!(%error, "failed to load view templates");
        error
    })?;

    let app = build_router(Arc::new(AppState { api, views }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/items", get(http_list_items))
        .route("/items/add", get(http_add_form).post(http_add_item))
        .route("/items/:item_id", get(http_item))
        .route("/items/:item_id/edit", get(http_edit_form).post(http_edit_item))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

async fn http_list_items(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let items = list_items(&state.api)
        .await
        .map_err(|e| state.views.error_page(&e))?;
    state.views.items(&items).map_err(|e| state.views.error_page(&e))
}

async fn http_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    Query(q): Query<DetailQuery>,
) -> Result<Html<String>, PageError> {
    let item_id = item_id_from(&state.views, path)?;
    let item = get_item(&state.api, item_id)
        .await
        .map_err(|e| missing_item(&state.views, e))?;
    state
        .views
        .item(&item, q.just_created())
        .map_err(|e| state.views.error_page(&e))
}

async fn http_add_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    state
        .views
        .add_form(&ItemForm::default(), None)
        .map_err(|e| state.views.error_page(&e))
}

async fn http_add_item(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ItemForm>, FormRejection>,
) -> Result<Redirect, PageError> {
    let form = form_from(&state.views, form)?;
    match create_item(&state.api, &form).await {
        Ok(item) => Ok(Redirect::to(&format!("/items/{}?status=true", item.id))),
        Err(e) if e.code == ErrorCode::Validation => {
            let page = state
                .views
                .add_form(&form, Some(&e.message))
                .map_err(|e| state.views.error_page(&e))?;
            Err((status_for(e.code), page))
        }
        Err(e) => Err(state.views.error_page(&e)),
    }
}

async fn http_edit_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, PageError> {
    let item_id = item_id_from(&state.views, path)?;
    let item = get_item(&state.api, item_id)
        .await
        .map_err(|e| missing_item(&state.views, e))?;
    state
        .views
        .edit_form(item.id, &ItemForm::from(&item), None)
        .map_err(|e| state.views.error_page(&e))
}

async fn http_edit_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<ItemForm>, FormRejection>,
) -> Result<Redirect, PageError> {
    let item_id = item_id_from(&state.views, path)?;
    let form = form_from(&state.views, form)?;
    match edit_item(&state.api, item_id, &form).await {
        Ok(item) => Ok(Redirect::to(&format!("/items/{}", item.id))),
        Err(e) if e.code == ErrorCode::Validation => {
            let page = state
                .views
                .edit_form(item_id, &form, Some(&e.message))
                .map_err(|e| state.views.error_page(&e))?;
            Err((status_for(e.code), page))
        }
        Err(e) => Err(missing_item(&state.views, e)),
    }
}

fn item_id_from(
    views: &Views,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ItemId, PageError> {
    path.map(|Path(item_id)| ItemId(item_id)).map_err(|rejection| {
        warn!(%rejection, "rejected item path");
        views.error_page(&ApiError::validation("item id must be a whole number"))
    })
}

fn form_from(
    views: &Views,
    form: Result<Form<ItemForm>, FormRejection>,
) -> Result<ItemForm, PageError> {
    form.map(|Form(form)| form).map_err(|rejection| {
        warn!(%rejection, "rejected item submission");
        views.error_page(&ApiError::validation(format!(
            "invalid item submission: {}",
            rejection.body_text()
        )))
    })
}

fn missing_item(views: &Views, err: ApiError) -> PageError {
    if err.code == ErrorCode::NotFound {
        warn!(message = %err.message, "item lookup missed");
    }
    views.error_page(&err)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
