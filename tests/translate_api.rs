//! Client tests against a local mock of the `/translate` endpoint

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Router};
use tokio_test::{assert_err, assert_ok};

use deepl_client::{
    ClientConfig, DeepLClient, DeepLError, Formal, Language, SplitSentence, TagHandling,
    TranslateOptions, Translation,
};

type Fields = Vec<(String, String)>;
type Responder = Arc<dyn Fn(&Fields) -> (u16, String) + Send + Sync>;

/// One request as seen by the mock server
#[derive(Debug, Clone)]
struct CapturedRequest {
    content_type: Option<String>,
    fields: Fields,
}

impl CapturedRequest {
    fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[derive(Clone)]
struct MockState {
    responder: Responder,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockServer {
    fn client(&self) -> DeepLClient {
        DeepLClient::new(ClientConfig::new("test-auth-key").with_base_url(&self.base_url)).unwrap()
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_translate(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(fields): Form<Fields>,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (status, body) = (state.responder)(&fields);
    state.requests.lock().unwrap().push(CapturedRequest {
        content_type,
        fields,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

async fn spawn_mock_with_delay(responder: Responder, delay: Option<Duration>) -> MockServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        responder,
        delay,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/v2/translate", post(handle_translate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{}/v2", addr),
        requests,
    }
}

async fn spawn_mock(responder: Responder) -> MockServer {
    spawn_mock_with_delay(responder, None).await
}

fn fixed(status: u16, body: &str) -> Responder {
    let body = body.to_string();
    Arc::new(move |_| (status, body.clone()))
}

/// Answers every `text` field with `<target_lang>:<text>`, detected as EN
fn echo() -> Responder {
    Arc::new(|fields: &Fields| {
        let target = fields
            .iter()
            .find(|(k, _)| k == "target_lang")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        let translations: Vec<_> = fields
            .iter()
            .filter(|(k, _)| k == "text")
            .map(|(_, text)| {
                serde_json::json!({
                    "text": format!("{}:{}", target, text),
                    "detected_source_language": "EN",
                })
            })
            .collect();

        (200, serde_json::json!({ "translations": translations }).to_string())
    })
}

const EXAMPLE_RESPONSE: &str =
    r#"{"translations":[{"text":"Dies ist ein Beispieltext.","detected_source_language":"EN"}]}"#;

const QUOTA_MESSAGE: &str = "Quota exceeded. The character limit has been reached.";

#[tokio::test]
async fn test_translate_example_text() {
    let server = spawn_mock(fixed(200, EXAMPLE_RESPONSE)).await;
    let client = server.client();

    let (text, source_lang) = client
        .translate(
            "This is an example text.",
            &Language::GERMAN,
            &TranslateOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(text, "Dies ist ein Beispieltext.");
    assert_eq!(source_lang, Language::ENGLISH);
}

#[tokio::test]
async fn test_request_is_form_encoded() {
    let server = spawn_mock(fixed(200, EXAMPLE_RESPONSE)).await;
    let client = server.client();

    assert_ok!(
        client
            .translate(
                "This is an example text.",
                &Language::GERMAN,
                &TranslateOptions::new(),
            )
            .await
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.get("auth_key"), Some("test-auth-key"));
    assert_eq!(request.get("target_lang"), Some("DE"));
    assert_eq!(request.get_all("text"), ["This is an example text."]);
    assert_eq!(request.get("source_lang"), None);
}

#[tokio::test]
async fn test_translate_many_preserves_order() {
    let server = spawn_mock(echo()).await;
    let client = server.client();

    let texts = ["one", "two", "one", "three & four", "fünf"];
    let translations = client
        .translate_many(&texts, &Language::FRENCH, &TranslateOptions::new())
        .await
        .unwrap();

    let got: Vec<_> = translations.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        got,
        ["FR:one", "FR:two", "FR:one", "FR:three & four", "FR:fünf"]
    );

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.get_all("text"), texts);
}

#[tokio::test]
async fn test_translate_matches_first_of_many() {
    let server = spawn_mock(echo()).await;
    let client = server.client();

    let many = client
        .translate_many(&["hello"], &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap();
    let one = client
        .translate("hello", &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap();

    assert_eq!(
        many,
        vec![Translation {
            text: one.0,
            detected_source_language: one.1,
        }]
    );
}

#[tokio::test]
async fn test_options_are_sent() {
    let server = spawn_mock(fixed(200, EXAMPLE_RESPONSE)).await;
    let client = server.client();

    let options = TranslateOptions::new()
        .source_lang(Language::ENGLISH)
        .split_sentences(SplitSentence::NoNewlines)
        .preserve_formatting(false)
        .formality(Formal::Less)
        .tag_handling(TagHandling::Html)
        .formality(Formal::More);

    assert_ok!(
        client
            .translate(
                r#"<p alt="This is a test.">This is a test.</p>"#,
                &Language::GERMAN,
                &options,
            )
            .await
    );

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.get("source_lang"), Some("EN"));
    assert_eq!(request.get("split_sentences"), Some("nonewlines"));
    assert_eq!(request.get("preserve_formatting"), Some("0"));
    assert_eq!(request.get_all("formality"), ["more"]);
    assert_eq!(request.get("tag_handling"), Some("html"));
    assert_eq!(
        request.get_all("text"),
        [r#"<p alt="This is a test.">This is a test.</p>"#]
    );
}

#[tokio::test]
async fn test_quota_exceeded() {
    let server = spawn_mock(fixed(456, "")).await;
    let client = server.client();

    let err = client
        .translate("hello", &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), QUOTA_MESSAGE);
    assert!(err.is_quota_exceeded());

    let err = client
        .translate_many(&["a", "b"], &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), QUOTA_MESSAGE);
}

#[tokio::test]
async fn test_other_status_uses_reason_phrase() {
    for (status, reason) in [
        (400, "Bad Request"),
        (403, "Forbidden"),
        (429, "Too Many Requests"),
        (500, "Internal Server Error"),
    ] {
        // body must be ignored on error statuses
        let server = spawn_mock(fixed(status, EXAMPLE_RESPONSE)).await;
        let err = server
            .client()
            .translate("hello", &Language::GERMAN, &TranslateOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(status));
        assert_eq!(err.to_string(), reason);
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let server = spawn_mock(fixed(200, r#"{"translations": [{"text": 1}"#)).await;

    let err = server
        .client()
        .translate_many(&["hello"], &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DeepLError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_translations() {
    let server = spawn_mock(fixed(200, r#"{"translations":[]}"#)).await;
    let client = server.client();

    let many = client
        .translate_many(&["hello"], &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap();
    assert!(many.is_empty());

    let err = client
        .translate("hello", &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DeepLError::EmptyResponse));
    assert_eq!(err.to_string(), "deepl responded with no translations");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        DeepLClient::new(ClientConfig::new("key").with_base_url(format!("http://{}/v2", addr)))
            .unwrap();

    let err = client
        .translate("hello", &Language::GERMAN, &TranslateOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DeepLError::Transport(_)), "got {:?}", err);
    assert!(err.to_string().starts_with("deepl translate: "));
}

#[tokio::test]
async fn test_deadline_elapses() {
    let server = spawn_mock_with_delay(echo(), Some(Duration::from_secs(5))).await;

    let result = server
        .client()
        .translate_within(
            Duration::from_millis(100),
            "hello",
            &Language::GERMAN,
            &TranslateOptions::new(),
        )
        .await;

    assert!(matches!(result, Err(DeepLError::Timeout)));
}

#[tokio::test]
async fn test_deadline_not_reached() {
    let server = spawn_mock(echo()).await;

    let translations = server
        .client()
        .translate_many_within(
            Duration::from_secs(10),
            &["hello"],
            &Language::GERMAN,
            &TranslateOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(translations[0].text, "DE:hello");
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let server = spawn_mock_with_delay(echo(), Some(Duration::from_secs(5))).await;
    let client = server.client();

    let (cancel_tx, cancel_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = cancel_tx.send(());
    });

    let result = client
        .translate_many_until(
            async {
                let _ = cancel_rx.await;
            },
            &["hello"],
            &Language::GERMAN,
            &TranslateOptions::new(),
        )
        .await;

    let err = assert_err!(result);
    assert!(matches!(err, DeepLError::Cancelled));
}

#[tokio::test]
async fn test_pending_cancel_signal_does_not_interfere() {
    let server = spawn_mock(fixed(200, EXAMPLE_RESPONSE)).await;

    let (text, _) = server
        .client()
        .translate_until(
            std::future::pending::<()>(),
            "This is an example text.",
            &Language::GERMAN,
            &TranslateOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(text, "Dies ist ein Beispieltext.");
}
