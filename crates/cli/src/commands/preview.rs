use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::{
    net::SocketAddr,
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tower_http::trace::TraceLayer;

/// Page served with status 404 when present in the built site
const NOT_FOUND_PAGE: &str = "404.html";

/// Serve a built site directory.
///
/// Requests resolve like `try_files $uri $uri.html $uri/index.html`, so
/// clean URLs work without a rewrite layer. Misses fall back to `404.html`.
pub async fn run(dir: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Directory: {}", dir.display());

    if !dir.join("index.html").exists() {
        anyhow::bail!(
            "No index.html in {}\nRun 'guide-kit build' first",
            dir.display()
        );
    }

    let app = Router::new()
        .fallback(static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(dir));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn static_handler(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    if let Some(file) = resolve_file(&root, uri.path()) {
        return match tokio::fs::read(&file).await {
            Ok(data) => file_response(StatusCode::OK, &file, data),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "read failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
    }

    let not_found = root.join(NOT_FOUND_PAGE);
    match tokio::fs::read(&not_found).await {
        Ok(data) => file_response(StatusCode::NOT_FOUND, &not_found, data),
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

fn file_response(status: StatusCode, path: &Path, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (status, [(header::CONTENT_TYPE, mime.to_string())], data).into_response()
}

/// Map a request path onto a file under `root`.
///
/// Tries the path itself, then `.html`, then `/index.html`. Paths that
/// would escape `root` resolve to nothing.
pub fn resolve_file(root: &Path, request_path: &str) -> Option<PathBuf> {
    let rel = request_path.split(['?', '#']).next().unwrap_or("");
    let rel = rel.trim_start_matches('/');

    let mut base = root.to_path_buf();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => base.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    let mut candidates = Vec::with_capacity(3);
    if !rel.is_empty() && !rel.ends_with('/') {
        candidates.push(base.clone());
        let mut with_ext = base.clone().into_os_string();
        with_ext.push(".html");
        candidates.push(PathBuf::from(with_ext));
    }
    candidates.push(base.join("index.html"));

    candidates.into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        for rel in [
            "index.html",
            "guide/intro.html",
            "guide/index.html",
            "en/index.html",
            "assets/theme.css",
        ] {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, rel).unwrap();
        }
        dir
    }

    fn resolved(root: &Path, request: &str) -> Option<String> {
        resolve_file(root, request).map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
    }

    #[test]
    fn test_try_files_order() {
        let dir = site();
        let root = dir.path();
        assert_eq!(resolved(root, "/").as_deref(), Some("index.html"));
        assert_eq!(resolved(root, "/guide/intro").as_deref(), Some("guide/intro.html"));
        assert_eq!(resolved(root, "/guide/intro.html").as_deref(), Some("guide/intro.html"));
        assert_eq!(resolved(root, "/guide/").as_deref(), Some("guide/index.html"));
        assert_eq!(resolved(root, "/guide").as_deref(), Some("guide/index.html"));
        assert_eq!(resolved(root, "/en").as_deref(), Some("en/index.html"));
        assert_eq!(resolved(root, "/assets/theme.css").as_deref(), Some("assets/theme.css"));
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let dir = site();
        assert_eq!(
            resolved(dir.path(), "/guide/intro?x=1").as_deref(),
            Some("guide/intro.html")
        );
    }

    #[test]
    fn test_missing_and_escaping_paths() {
        let dir = site();
        assert_eq!(resolved(dir.path(), "/guide/missing"), None);
        assert_eq!(resolved(dir.path(), "/../etc/passwd"), None);
        assert_eq!(resolved(dir.path(), "/guide/../../x"), None);
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let dir = site();
        let root = Arc::new(dir.path().to_path_buf());

        let response = static_handler(State(root.clone()), Uri::from_static("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        fs::write(dir.path().join("404.html"), "custom").unwrap();
        let response = static_handler(State(root), Uri::from_static("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"custom");
    }
}
