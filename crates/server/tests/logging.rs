//! Each failed request is logged at ERROR exactly once.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::net::TcpListener;
use tutor::{Completion, CompletionError, CompletionProvider, CompletionRequest, TutorService};

struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<Completion, CompletionError> {
        Err(CompletionError::EmptyResponse)
    }
}

/// Shared in-memory sink for the fmt layer.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn upstream_failure_is_logged_at_error_once() {
    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    // The default test runtime is single-threaded, so the spawned server
    // task runs on this thread and sees this subscriber.
    let _guard = tracing::subscriber::set_default(subscriber);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(
        listener,
        TutorService::new(Arc::new(FailingProvider)),
        std::future::pending(),
    ));

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/explain"))
        .json(&json!({"text": "Entropy"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let _ = response.bytes().await.unwrap();

    let errors: Vec<String> = captured
        .lines()
        .into_iter()
        .filter(|line| line.contains(" ERROR "))
        .collect();
    assert_eq!(errors.len(), 1, "{errors:#?}");
    assert!(errors[0].contains("Upstream returned no completion content"));
}
