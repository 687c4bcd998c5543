//! Common test utilities and mock implementations.

use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use quest_site::notifier::ConfirmationNotice;
use quest_site::notifier::Notifier;
use quest_site::notifier::NotifyError;
use quest_site::repository::Repository;
use quest_site::repository::seed::CatalogSeed;
use quest_site::server;
use quest_site::server::state::AppState;
use quest_site::service::Services;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const PUBLIC_URL: &str = "http://quest.test";

/// Creates a fresh repository seeded with the built-in catalog.
#[allow(dead_code)]
pub async fn setup_repo() -> Arc<Repository> {
    let seed = CatalogSeed::builtin().expect("Failed to parse built-in catalog");
    Arc::new(
        Repository::seeded(seed)
            .await
            .expect("Failed to seed repository"),
    )
}

// RECORDING NOTIFIER

/// Notifier that keeps every notice it is given.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub sent: Arc<RwLock<Vec<ConfirmationNotice>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ConfirmationNotice> {
        self.sent.read().unwrap().clone()
    }

    /// Token from the most recent confirmation link.
    pub fn last_token(&self) -> String {
        let notice = self
            .sent
            .read()
            .unwrap()
            .last()
            .cloned()
            .expect("No confirmation was sent");
        token_from_url(&notice.confirm_url)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_confirmation(&self, notice: ConfirmationNotice) -> Result<(), NotifyError> {
        self.sent.write().unwrap().push(notice);
        Ok(())
    }
}

#[allow(dead_code)]
pub fn token_from_url(url: &str) -> String {
    url.split_once("token=")
        .map(|(_, token)| token.to_string())
        .expect("Confirmation URL has no token")
}

// TEST SERVER

/// A server bound to an ephemeral port, stopped on drop.
#[allow(dead_code)]
pub struct TestApp {
    pub base_url: String,
    pub repo: Arc<Repository>,
    pub notifier: RecordingNotifier,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    let repo = setup_repo().await;
    let notifier = RecordingNotifier::new();
    let services = Arc::new(Services::new(
        repo.clone(),
        Arc::new(notifier.clone()),
        PUBLIC_URL,
    ));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("No local address");

    let (tx, rx) = oneshot::channel::<()>();
    let router = server::router(AppState::new(services));
    tokio::spawn(async move {
        let _ = server::serve(listener, router, async move {
            let _ = rx.await;
        })
        .await;
    });

    TestApp {
        base_url: format!("http://{address}"),
        repo,
        notifier,
        client: reqwest::Client::new(),
        shutdown: Some(tx),
    }
}
