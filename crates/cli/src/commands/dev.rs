use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use guide_kit_generator::Generator;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use super::load_project;
use super::preview::resolve_file;

#[derive(Clone)]
struct AppState {
    project_path: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

/// Start the development server.
///
/// Pages are rendered from source on every request, so edits show up on
/// the next load. A file watcher pushes a reload event to open pages over
/// Server-Sent Events.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("📚 Starting dev server...");
    println!("   Project: {}", path.display());

    let (site, content) = load_project(&path)?;
    println!("   ✓ Loaded: {}", site.title);
    println!("   ✓ Locales: {}", site.locales.len());
    println!("   ✓ Pages: {}", content.pages.len());

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        project_path: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    let app = Router::new()
        .route("/_reload", get(sse_handler))
        .fallback(get(page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start file watcher
    let watcher_path = path.clone();
    let ignored = site.output_dir();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, ignored, watcher_tx).await {
            eprintln!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Dev server ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Watch for file changes and trigger reload
async fn watch_files(
    path: PathBuf,
    ignored: PathBuf,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                if event.paths.iter().any(|p| is_relevant_change(p, &ignored)) {
                    println!("   📝 File changed, reloading...");
                    tracing::debug!(paths = ?event.paths, "change detected");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Hidden files, editor backups and the build output never trigger a reload
fn is_relevant_change(path: &Path, ignored: &Path) -> bool {
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    !filename.starts_with('.') && !filename.ends_with('~') && !path.starts_with(ignored)
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Render the requested page from source, or serve a generated or public asset
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    match serve_from_source(&state.project_path, uri.path()) {
        Ok(Some(response)) => response,
        Ok(None) => (StatusCode::NOT_FOUND, Html(not_found_page(uri.path()))).into_response(),
        Err(e) => {
            tracing::warn!(path = uri.path(), error = %e, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(&e))).into_response()
        }
    }
}

fn serve_from_source(project: &Path, request_path: &str) -> Result<Option<Response>> {
    let (site, content) = load_project(project)?;
    let generator = Generator::new(&site, &content)?.with_live_reload();

    if let Some(page) = generator.render_request(request_path)? {
        return Ok(Some(Html(page.html).into_response()));
    }

    // Generated assets win over public/ in the build, so check them first
    let rel = request_path.trim_start_matches('/');
    if !rel.is_empty() {
        let generated = generator.generate()?;
        if let Some(data) = generated.asset(rel) {
            return Ok(Some(bytes_response(rel, data.to_vec())));
        }
    }

    if let Some(file) = resolve_file(&content.public_dir(), request_path) {
        let data = std::fs::read(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        return Ok(Some(bytes_response(&file.to_string_lossy(), data)));
    }

    Ok(None)
}

fn bytes_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.to_string())], data).into_response()
}

fn error_page(error: &anyhow::Error) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Build Error</h1>
<pre>{}</pre>
<script>
    const eventSource = new EventSource('/_reload');
    eventSource.onmessage = () => location.reload();
</script>
</body></html>"#,
        guide_kit_generator::escape::html_escape(&format!("{:#}", error))
    )
}

fn not_found_page(path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>404</title></head><body>
<h1>Page not found</h1>
<p>No source page maps to <code>{}</code>.</p>
</body></html>"#,
        guide_kit_generator::escape::html_escape(path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tempfile::TempDir;

    async fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        crate::commands::init::run(dir.path().to_path_buf())
            .await
            .unwrap();
        std::fs::write(dir.path().join("docs/public/logo.svg"), "<svg/>").unwrap();
        dir
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_renders_page_with_live_reload() {
        let dir = project().await;
        let response = serve_from_source(dir.path(), "/en/guide/getting-started")
            .unwrap()
            .unwrap();
        let html = body(response).await;
        assert!(html.contains("<h1 id=\"getting-started\">Getting Started</h1>"));
        assert!(html.contains("new EventSource('/_reload')"));
    }

    #[tokio::test]
    async fn test_serves_generated_and_public_assets() {
        let dir = project().await;

        let css = serve_from_source(dir.path(), "/assets/style.css")
            .unwrap()
            .unwrap();
        assert_eq!(css.headers()[header::CONTENT_TYPE], "text/css");

        let logo = serve_from_source(dir.path(), "/logo.svg").unwrap().unwrap();
        assert_eq!(logo.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert_eq!(body(logo).await, "<svg/>");
    }

    #[tokio::test]
    async fn test_unknown_path_is_none() {
        let dir = project().await;
        assert!(serve_from_source(dir.path(), "/missing").unwrap().is_none());
    }

    #[test]
    fn test_is_relevant_change() {
        let ignored = Path::new("/p/dist");
        assert!(is_relevant_change(Path::new("/p/docs/guide/a.md"), ignored));
        assert!(!is_relevant_change(Path::new("/p/docs/.a.md.swp"), ignored));
        assert!(!is_relevant_change(Path::new("/p/docs/a.md~"), ignored));
        assert!(!is_relevant_change(Path::new("/p/dist/index.html"), ignored));
    }
}
