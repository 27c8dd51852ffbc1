use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{Mutex, broadcast};

use mdpad::config::Loader;
use mdpad::editing::Wrapper;
use mdpad::render::{FileEntry, PageContext, PreviewError, PreviewRenderer};
use mdpad::store::{MarkdownFile, StoreError};
use mdpad::util::display_host;
use mdpad::{Session, SessionError};

use crate::ServeArgs;
use crate::commands::open_session;

#[derive(thiserror::Error, Debug)]
enum ServerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Session(SessionError::Store(StoreError::NotFound(_))) => StatusCode::NOT_FOUND,
            Self::Session(SessionError::Store(StoreError::NameTaken(_))) => StatusCode::CONFLICT,
            Self::Session(SessionError::Store(StoreError::InvalidName))
            | Self::Session(SessionError::Edit(_)) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::NothingOpen) => StatusCode::CONFLICT,
            Self::Session(SessionError::Storage(_)) | Self::Preview(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    preview: Arc<PreviewRenderer>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl AppState {
    fn page(
        &self,
        session: &Session,
        file: Option<String>,
        content: String,
    ) -> Result<Html<String>, ServerError> {
        let files = session
            .files()
            .files()
            .iter()
            .map(|f| FileEntry {
                name: f.name.clone(),
                open: f.open,
            })
            .collect();
        let page = self.preview.render_page(&PageContext {
            file,
            files,
            content,
            live_reload: self.live_reload,
        })?;
        Ok(Html(page))
    }

    /// Save the store and tell open previews to reload.
    fn commit(&self, session: &mut Session) -> Result<(), ServerError> {
        session.persist()?;
        // No receivers just means no preview is open.
        let _ = self.reload_tx.send(());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct FilesResponse {
    current: Option<String>,
    files: Vec<MarkdownFile>,
}

impl FilesResponse {
    fn from_session(session: &Session) -> Self {
        Self {
            current: session.current().map(|f| f.name.clone()),
            files: session.files().files().to_vec(),
        }
    }
}

/// A document and its rendered HTML.
#[derive(Debug, Serialize)]
struct DocumentResponse {
    name: String,
    html: String,
}

#[derive(Debug, Default, Deserialize)]
struct NewFileRequest {
    name: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EditRequest {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RenameRequest {
    name: String,
}

/// Byte offsets of the selection to wrap.
#[derive(Debug, Deserialize)]
struct FormatRequest {
    wrapper: Wrapper,
    start: usize,
    end: usize,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    markdown: String,
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    html: String,
}

/// Preview of the open file.
async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let session = state.session.lock().await;
    let name = session.current().map(|f| f.name.clone());
    let content = session.render_current()?;
    state.page(&session, name, content)
}

/// Preview of a named file. Viewing does not change the open file.
async fn show_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, ServerError> {
    let session = state.session.lock().await;
    let content = session.render_file(&name)?;
    state.page(&session, Some(name), content)
}

async fn list_files(State(state): State<AppState>) -> Json<FilesResponse> {
    let session = state.session.lock().await;
    Json(FilesResponse::from_session(&session))
}

async fn create_file(
    State(state): State<AppState>,
    Json(request): Json<NewFileRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ServerError> {
    let mut session = state.session.lock().await;
    let name = session.create(request.name.as_deref(), request.content.as_deref())?;
    let html = session.render_current()?;
    state.commit(&mut session)?;
    Ok((StatusCode::CREATED, Json(DocumentResponse { name, html })))
}

/// Replace a file's content, opening it first if needed.
async fn update_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<EditRequest>,
) -> Result<Json<DocumentResponse>, ServerError> {
    let mut session = state.session.lock().await;
    open_if_needed(&mut session, &name)?;
    let html = session.edit(&request.content);
    state.commit(&mut session)?;
    Ok(Json(DocumentResponse { name, html }))
}

async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FilesResponse>, ServerError> {
    let mut session = state.session.lock().await;
    session.delete(&name)?;
    state.commit(&mut session)?;
    Ok(Json(FilesResponse::from_session(&session)))
}

async fn rename_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<FilesResponse>, ServerError> {
    let mut session = state.session.lock().await;
    session.rename(&name, &request.name)?;
    state.commit(&mut session)?;
    Ok(Json(FilesResponse::from_session(&session)))
}

async fn format_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<FormatRequest>,
) -> Result<Json<DocumentResponse>, ServerError> {
    let mut session = state.session.lock().await;
    open_if_needed(&mut session, &name)?;
    let html = session.format(request.wrapper, request.start..request.end)?;
    state.commit(&mut session)?;
    Ok(Json(DocumentResponse { name, html }))
}

/// Render markdown without touching the store.
async fn render_markdown(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: mdpad::render(&request.markdown),
    })
}

fn open_if_needed(session: &mut Session, name: &str) -> Result<(), SessionError> {
    if session.current().map(|f| f.name.as_str()) != Some(name) {
        session.open(name)?;
    }
    Ok(())
}

/// SSE handler for live reload notifications.
async fn live_reload_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.reload_tx.subscribe();
    let stream = async_stream::stream! {
        let mut rx = rx;
        loop {
            match rx.recv().await {
                Ok(_) => {
                    yield Ok(Event::default().event("reload").data("reload"));
                }
                // Only the latest change matters.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/files/{name}", get(show_file))
        .route("/api/files", get(list_files).post(create_file))
        .route("/api/files/{name}", put(update_file).delete(delete_file))
        .route("/api/files/{name}/rename", post(rename_file))
        .route("/api/files/{name}/format", post(format_file))
        .route("/api/render", post(render_markdown))
        .route("/_mdpad/live-reload", get(live_reload_handler))
        .with_state(state)
}

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let (mut loader, config_path) = Loader::from_arg(args.config_file.as_deref())?;
    if let Some(bind) = &args.bind {
        loader = loader.set_override("serve.bind", bind.as_str())?;
    }
    if let Some(port) = args.port {
        loader = loader.set_override("serve.port", i64::from(port))?;
    }
    if args.open {
        loader = loader.set_override("serve.open", true)?;
    }
    let config = loader.build()?;

    let session = open_session(&config, &config_path)?;
    println!(
        "Loaded {count} document(s)",
        count = session.files().len()
    );

    // Create broadcast channel for live reload
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        preview: Arc::new(PreviewRenderer::new(&config.preview.title)?),
        reload_tx,
        live_reload: config.serve.live_reload,
    };

    let addr: SocketAddr = format!("{}:{}", config.serve.bind, config.serve.port).parse()?;
    let url = format!(
        "http://{}:{}",
        display_host(&config.serve.bind),
        config.serve.port
    );

    println!("\nServing notepad at {}", url);
    println!("Press Ctrl+C to stop\n");

    if config.serve.open
        && let Err(e) = open::that(&url)
    {
        eprintln!("Failed to open browser: {}", e);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use mdpad::storage::MemoryStore;
    use mdpad::store::EXAMPLE_NAME;

    use super::*;

    fn test_state() -> AppState {
        let session = Session::load(Box::new(MemoryStore::new())).unwrap();
        let (reload_tx, _) = broadcast::channel(16);
        AppState {
            session: Arc::new(Mutex::new(session)),
            preview: Arc::new(PreviewRenderer::new("test").unwrap()),
            reload_tx,
            live_reload: true,
        }
    }

    #[tokio::test]
    async fn test_index_previews_open_file() {
        let Html(page) = index(State(test_state())).await.unwrap();
        assert!(page.contains("<h1>Heading 1</h1><hr>"));
        assert!(page.contains("<title>example - test</title>"));
        assert!(page.contains("/_mdpad/live-reload"));
    }

    #[tokio::test]
    async fn test_update_renders_saves_and_notifies() {
        let state = test_state();
        let mut rx = state.reload_tx.subscribe();

        let Json(doc) = update_file(
            State(state.clone()),
            Path(EXAMPLE_NAME.to_string()),
            Json(EditRequest {
                content: "**x**".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(doc.html, "<b>x</b>");
        assert!(rx.try_recv().is_ok());
        let session = state.session.lock().await;
        assert_eq!(session.current().unwrap().content, "**x**");
    }

    #[tokio::test]
    async fn test_update_opens_named_file() {
        let state = test_state();
        let (_, Json(created)) = create_file(
            State(state.clone()),
            Json(NewFileRequest {
                name: Some("notes".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.name, "notes");
        assert_eq!(created.html, "<h1>notes</h1><hr>\n<p>Content...</p>");

        update_file(
            State(state.clone()),
            Path(EXAMPLE_NAME.to_string()),
            Json(EditRequest {
                content: "*hi*".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(files) = list_files(State(state)).await;
        assert_eq!(files.current.as_deref(), Some(EXAMPLE_NAME));
        assert_eq!(files.files[1].content, "# notes\nContent...");
    }

    #[tokio::test]
    async fn test_format_wraps_selection() {
        let state = test_state();
        update_file(
            State(state.clone()),
            Path(EXAMPLE_NAME.to_string()),
            Json(EditRequest {
                content: "make this bold".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(doc) = format_file(
            State(state),
            Path(EXAMPLE_NAME.to_string()),
            Json(FormatRequest {
                wrapper: Wrapper::Bold,
                start: 5,
                end: 9,
            }),
        )
        .await
        .unwrap();
        assert_eq!(doc.html, "<p>make <b>this</b> bold</p>");
    }

    #[tokio::test]
    async fn test_errors_map_to_status_codes() {
        let state = test_state();

        let missing = show_file(State(state.clone()), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        create_file(
            State(state.clone()),
            Json(NewFileRequest {
                name: Some("a".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        let taken = rename_file(
            State(state.clone()),
            Path("a".to_string()),
            Json(RenameRequest {
                name: EXAMPLE_NAME.to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(taken.into_response().status(), StatusCode::CONFLICT);

        let bad_selection = format_file(
            State(state),
            Path("a".to_string()),
            Json(FormatRequest {
                wrapper: Wrapper::Italic,
                start: 0,
                end: 1000,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(bad_selection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_returns_remaining_files() {
        let state = test_state();
        let Json(files) = delete_file(State(state), Path(EXAMPLE_NAME.to_string()))
            .await
            .unwrap();

        // The store is never left empty.
        assert_eq!(files.files.len(), 1);
        assert_eq!(files.current.as_deref(), Some(EXAMPLE_NAME));
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let Json(response) = render_markdown(Json(RenderRequest {
            markdown: "~~old~~".to_string(),
        }))
        .await;
        assert_eq!(response.html, "<s>old</s>");
    }
}
