//! HTTP 経由の翻訳読み込みに関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use edureach_i18n::config::I18nSettings;
use edureach_i18n::fetch::{
    FetchError,
    HttpFetcher,
    TranslationFetcher,
};
use edureach_i18n::input::LanguageCode;
use edureach_i18n::page::{
    Document,
    Element,
};
use edureach_i18n::storage::{
    FileStore,
    KeyValueStore,
};
use edureach_i18n::{
    LoadOutcome,
    TranslationPipeline,
};
use googletest::prelude::*;
use tempfile::TempDir;
use tokio::io::{
    AsyncReadExt,
    AsyncWriteExt,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// パス → (ステータス行, ボディ)
type Routes = HashMap<&'static str, (&'static str, &'static str)>;

/// ルート表に従って応答する最小限の HTTP サーバーを起動する
async fn serve(routes: Routes) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buffer = [0_u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    let Ok(read) = socket.read(&mut buffer).await else {
                        return;
                    };
                    if read == 0 {
                        return;
                    }
                    request.extend_from_slice(&buffer[..read]);
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) =
                    routes.get(path).copied().unwrap_or(("404 Not Found", "{}"));
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn routes() -> Routes {
    HashMap::from([
        (
            "/api/translations/en",
            ("200 OK", r#"{"title": "EduReach", "welcome": "Welcome", "tagline": "Learning for every village"}"#),
        ),
        (
            "/api/translations/te",
            ("200 OK", r#"{"title": "ఎడ్యురీచ్", "welcome": "స్వాగతం", "tagline": "", "courses": "కోర్సులు"}"#),
        ),
        ("/api/translations/kn", ("500 Internal Server Error", r#"{"error": "boom"}"#)),
        ("/api/translations/hi", ("200 OK", r#"["not", "a", "map"]"#)),
        ("/api/translations/ta", ("200 OK", r#"{"nav": {"home": "முகப்பு"}}"#)),
    ])
}

fn settings(addr: SocketAddr, workspace: &Path) -> I18nSettings {
    I18nSettings {
        base_url: format!("http://{addr}"),
        storage_file: workspace.join("local-storage.json"),
        request_timeout_ms: Some(5000),
        ..I18nSettings::default()
    }
}

fn page() -> Document {
    Document::new("EduReach — Home")
        .with_meta_description("Quality education for rural India")
        .with_element(Element::translatable("welcome", "Welcome").with_id("hero-title"))
        .with_element(Element::translatable("courses", "Courses"))
        .with_element(Element::new("© 2024"))
}

fn pipeline(settings: &I18nSettings) -> TranslationPipeline {
    let store = Arc::new(FileStore::new(settings.storage_file.clone()));
    let fetcher = Arc::new(HttpFetcher::from_settings(settings).unwrap());
    TranslationPipeline::new(settings, store, fetcher, Arc::new(Mutex::new(page())))
}

fn code(value: &str) -> LanguageCode {
    LanguageCode::new(value).unwrap()
}

#[googletest::test]
#[tokio::test]
async fn test_http_fetcher_decodes_translation_map() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let fetcher = HttpFetcher::from_settings(&settings(addr, workspace.path())).unwrap();

    let map = fetcher.fetch(&code("te")).await.unwrap();

    expect_that!(map.len(), eq(4));
    expect_that!(map.get("welcome"), some(eq("స్వాగతం")));
}

#[tokio::test]
async fn test_http_fetcher_reports_status_error() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let fetcher = HttpFetcher::from_settings(&settings(addr, workspace.path())).unwrap();

    let error = fetcher.fetch(&code("kn")).await.unwrap_err();

    assert_eq!(error, FetchError::Status { status: 500 });
}

#[tokio::test]
async fn test_http_fetcher_rejects_non_flat_bodies() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let fetcher = HttpFetcher::from_settings(&settings(addr, workspace.path())).unwrap();

    for language in ["hi", "ta"] {
        let error = fetcher.fetch(&code(language)).await.unwrap_err();
        assert!(matches!(error, FetchError::Malformed(_)), "{language}: {error:?}");
    }
}

#[tokio::test]
async fn test_http_fetcher_reports_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let workspace = TempDir::new().unwrap();
    let fetcher = HttpFetcher::from_settings(&settings(addr, workspace.path())).unwrap();

    let error = fetcher.fetch(&code("en")).await.unwrap_err();

    assert!(matches!(error, FetchError::Transport(_)), "{error:?}");
}

#[tokio::test]
async fn test_select_language_applies_page_and_persists() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let settings = settings(addr, workspace.path());
    let pipeline = pipeline(&settings);

    let outcome = pipeline.select_language(code("te")).await;

    assert!(outcome.is_applied(), "{outcome:?}");
    let document = pipeline.document();
    let document = document.lock().await.clone();
    assert_eq!(document.title, "ఎడ్యురీచ్ — Home");
    assert_eq!(document.element_by_id("hero-title").map(|e| e.text.as_str()), Some("స్వాగతం"));
    assert_eq!(document.texts_for_key("courses"), vec!["కోర్సులు"]);
    // 空の tagline は適用しない
    assert_eq!(document.meta_description.as_deref(), Some("Quality education for rural India"));

    let store = FileStore::new(settings.storage_file.clone());
    assert_eq!(store.get_item("preferred-language").unwrap().as_deref(), Some("te"));
}

#[tokio::test]
async fn test_saved_preference_is_used_on_next_start() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let settings = settings(addr, workspace.path());
    pipeline(&settings).select_language(code("te")).await;

    let restarted = pipeline(&settings);
    let outcome = restarted.initialize().await;

    assert_eq!(outcome.language().as_str(), "te");
    assert_eq!(restarted.accessor().get("courses", "Courses").await, "కోర్సులు");
}

#[tokio::test]
async fn test_first_start_uses_default_without_persisting() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let settings = settings(addr, workspace.path());
    let pipeline = pipeline(&settings);

    let outcome = pipeline.initialize().await;

    assert!(outcome.is_applied(), "{outcome:?}");
    let document = pipeline.document();
    let description = document.lock().await.meta_description.clone();
    assert_eq!(description.as_deref(), Some("Learning for every village"));
    assert!(!settings.storage_file.exists());
}

#[tokio::test]
async fn test_server_error_keeps_previous_translations() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let settings = settings(addr, workspace.path());
    let pipeline = pipeline(&settings);
    pipeline.select_language(code("te")).await;

    let outcome = pipeline.select_language(code("kn")).await;

    match outcome {
        LoadOutcome::Failed { language, error } => {
            assert_eq!(language.as_str(), "kn");
            assert_eq!(error, FetchError::Status { status: 500 });
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(pipeline.accessor().language().await.as_str(), "te");
    let document = pipeline.document();
    assert_eq!(document.lock().await.title, "ఎడ్యురీచ్ — Home");
    // 保存済みの設定は最後に選択した言語
    assert_eq!(pipeline.preference().get().map(String::from).as_deref(), Some("kn"));
}

#[tokio::test]
async fn test_malformed_bodies_keep_previous_translations() {
    let addr = serve(routes()).await;
    let workspace = TempDir::new().unwrap();
    let pipeline = pipeline(&settings(addr, workspace.path()));
    pipeline.select_language(code("te")).await;
    let before = pipeline.document().lock().await.clone();

    for language in ["hi", "ta"] {
        let outcome = pipeline.select_language(code(language)).await;

        assert!(
            matches!(&outcome, LoadOutcome::Failed { error: FetchError::Malformed(_), .. }),
            "{language}: {outcome:?}"
        );
        assert_eq!(pipeline.accessor().language().await.as_str(), "te");
        assert_eq!(*pipeline.document().lock().await, before);
    }
}
