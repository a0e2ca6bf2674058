//! Chat-completion translator against a loopback HTTP responder.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use lead_model::{ColumnSchema, SchemaDescriptor};
use lead_query::{ChatCompletionTranslator, SqlTranslator, TranslationError, TranslatorConfig};

/// Serves one request with a fixed status and body; returns the raw request.
fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        // The client may have given up already.
        let _ = reader.get_mut().write_all(response.as_bytes());

        head + &String::from_utf8(request_body).unwrap()
    });

    (endpoint, handle)
}

fn translator(endpoint: String, timeout_secs: u64) -> ChatCompletionTranslator {
    let config = TranslatorConfig {
        endpoint,
        timeout_secs,
        ..TranslatorConfig::default()
    };
    ChatCompletionTranslator::new(config, "test-key").unwrap()
}

fn schema() -> SchemaDescriptor {
    SchemaDescriptor {
        relation: "leads".to_string(),
        columns: vec![ColumnSchema::new("Revenue Size", "f64")],
        sample_rows: Vec::new(),
    }
}

#[test]
fn completion_is_fence_stripped() {
    let (endpoint, handle) = serve_once(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"```sql\nSELECT * FROM leads WHERE \"Revenue Size\" > 1000000\n```"}}]}"#,
        Duration::ZERO,
    );

    let sql = translator(endpoint, 5)
        .translate("revenue over a million", &schema())
        .unwrap();

    assert_eq!(sql, r#"SELECT * FROM leads WHERE "Revenue Size" > 1000000"#);

    let request = handle.join().unwrap();
    assert!(request.starts_with("POST /v1/chat/completions"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer test-key"));
    assert!(request.contains(r#""model":"deepseek-chat""#));
    assert!(request.contains(r#""temperature":0.3"#));
    assert!(request.contains(r#""content":"revenue over a million""#));
}

#[test]
fn server_error_carries_status_and_body() {
    let (endpoint, handle) = serve_once(
        "500 Internal Server Error",
        r#"{"error":"overloaded"}"#,
        Duration::ZERO,
    );

    let err = translator(endpoint, 5)
        .translate("anything", &schema())
        .unwrap_err();
    handle.join().unwrap();

    match err {
        TranslationError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, r#"{"error":"overloaded"}"#);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_body_is_reported_raw() {
    let (endpoint, handle) = serve_once("200 OK", "not json", Duration::ZERO);

    let err = translator(endpoint, 5)
        .translate("anything", &schema())
        .unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, TranslationError::MalformedResponse { ref body } if body == "not json"));
}

#[test]
fn missing_choices_is_empty_completion() {
    let (endpoint, handle) = serve_once("200 OK", r#"{"choices":[]}"#, Duration::ZERO);

    let err = translator(endpoint, 5)
        .translate("anything", &schema())
        .unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, TranslationError::EmptyCompletion));
}

#[test]
fn slow_service_times_out() {
    let (endpoint, handle) = serve_once("200 OK", r#"{"choices":[]}"#, Duration::from_secs(3));

    let err = translator(endpoint, 1)
        .translate("anything", &schema())
        .unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, TranslationError::Timeout { seconds: 1 }));
}

#[test]
fn unreachable_service_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
    drop(listener);

    let err = translator(endpoint, 5)
        .translate("anything", &schema())
        .unwrap_err();

    assert!(matches!(err, TranslationError::Network(_)));
}
