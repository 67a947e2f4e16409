#![allow(dead_code)]

//! In-memory fakes standing in for PostgreSQL and Redis, so integration
//! tests exercise the real services and handlers without external backends.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use axum::extract::ConnectInfo;
use shortlinkd::application::services::{LinkService, RedirectService};
use shortlinkd::domain::access_event::AccessEvent;
use shortlinkd::domain::entities::{Link, NewAccessLog, NewLink};
use shortlinkd::domain::repositories::{AccessLogRepository, LinkRepository};
use shortlinkd::error::AppError;
use shortlinkd::infrastructure::cache::{CacheError, CacheResult, CacheService};
use shortlinkd::infrastructure::queue::{AccessEventQueue, QueueError, QueueResult};
use shortlinkd::state::AppState;

/// Link store fake over a plain map, keyed by id.
pub struct FakeLinkRepository {
    links: Mutex<HashMap<i64, Link>>,
    next_id: AtomicI64,
}

impl FakeLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Makes the next insert allocate this identifier.
    pub fn with_next_id(self, id: i64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    /// Seeds an active link and returns its id.
    pub fn seed_active(&self, code: &str, url: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.links.lock().unwrap().insert(id, make_link(id, code, url));
        id
    }

    pub fn seed(&self, link: Link) {
        self.links.lock().unwrap().insert(link.id, link);
    }

    pub fn deactivate(&self, code: &str) {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.values_mut().find(|l| l.short_code == code) {
            link.is_active = false;
        }
    }

    pub fn remove(&self, code: &str) {
        let mut links = self.links.lock().unwrap();
        links.retain(|_, l| l.short_code != code);
    }
}

#[async_trait]
impl LinkRepository for FakeLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let link = Link {
            id,
            short_code: new_link.short_code.clone().unwrap_or_default(),
            original_url: new_link.original_url,
            alias: new_link.alias,
            user_id: new_link.user_id,
            is_custom: new_link.short_code.is_some(),
            visit_count: 0,
            expires_at: new_link.expires_at,
            is_active: true,
            created_at: Utc::now(),
        };
        self.links.lock().unwrap().insert(id, link.clone());
        Ok(link)
    }

    async fn assign_code(&self, id: i64, code: &str) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(&id) {
            Some(link) => {
                link.short_code = code.to_string();
                Ok(())
            }
            None => Err(AppError::not_found("Link not found", json!({ "id": id }))),
        }
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .values()
            .find(|l| l.short_code == code && l.is_active)
            .cloned())
    }

    async fn find_active_id_by_code(&self, code: &str) -> Result<Option<i64>, AppError> {
        Ok(self.find_active_by_code(code).await?.map(|l| l.id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().get(&id).cloned())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.values().any(|l| l.short_code == code))
    }
}

/// Resolution cache fake. TTLs are accepted and ignored; a flag simulates a
/// failing backend.
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl FakeCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, code: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), url.to_string());
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.lock().unwrap().contains_key(code)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheService for FakeCache {
    async fn get(&self, code: &str) -> CacheResult<Option<String>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::Connection("connection refused".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(code).cloned())
    }

    async fn set(&self, code: &str, url: &str, _ttl: Duration) -> CacheResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::Connection("connection refused".to_string()));
        }
        self.insert(code, url);
        Ok(())
    }
}

/// FIFO queue fake with real blocking-pop semantics over a `Notify`.
pub struct InMemoryQueue {
    items: Mutex<VecDeque<String>>,
    notify: Notify,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Enqueues a raw payload, bypassing serialization. Used to feed the
    /// consumer malformed input.
    pub fn push_raw(&self, payload: &str) {
        self.items.lock().unwrap().push_back(payload.to_string());
        self.notify.notify_one();
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl AccessEventQueue for InMemoryQueue {
    async fn push(&self, event: &AccessEvent) -> QueueResult<()> {
        let payload = serde_json::to_string(event).map_err(QueueError::Serialization)?;
        self.push_raw(&payload);
        Ok(())
    }

    async fn blocking_pop(&self, timeout: Option<Duration>) -> QueueResult<Option<String>> {
        loop {
            if let Some(payload) = self.items.lock().unwrap().pop_front() {
                return Ok(Some(payload));
            }

            match timeout {
                None => self.notify.notified().await,
                Some(t) => {
                    if tokio::time::timeout(t, self.notify.notified())
                        .await
                        .is_err()
                    {
                        return Ok(None);
                    }
                }
            }
        }
    }
}

/// Access log store fake recording every save in order.
pub struct RecordingAccessLogRepository {
    saved: Mutex<Vec<NewAccessLog>>,
    notify: Notify,
}

impl RecordingAccessLogRepository {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            notify: Notify::new(),
        }
    }

    pub fn snapshot(&self) -> Vec<NewAccessLog> {
        self.saved.lock().unwrap().clone()
    }

    /// Waits until at least `n` records have been saved.
    pub async fn wait_for(&self, n: usize) {
        loop {
            if self.saved.lock().unwrap().len() >= n {
                return;
            }
            self.notify.notified().await;
        }
    }
}

#[async_trait]
impl AccessLogRepository for RecordingAccessLogRepository {
    async fn save(&self, log: NewAccessLog) -> Result<(), AppError> {
        self.saved.lock().unwrap().push(log);
        self.notify.notify_one();
        Ok(())
    }
}

pub fn make_link(id: i64, code: &str, url: &str) -> Link {
    Link {
        id,
        short_code: code.to_string(),
        original_url: url.to_string(),
        alias: None,
        user_id: None,
        is_custom: false,
        visit_count: 0,
        expires_at: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Builds an [`AppState`] over the given fakes.
pub fn test_state(
    links: Arc<FakeLinkRepository>,
    cache: Arc<FakeCache>,
    queue: Arc<InMemoryQueue>,
) -> AppState {
    let links_dyn: Arc<dyn LinkRepository> = links;
    let cache_dyn: Arc<dyn CacheService> = cache;
    let queue_dyn: Arc<dyn AccessEventQueue> = queue;

    AppState {
        redirect_service: Arc::new(RedirectService::new(
            links_dyn.clone(),
            cache_dyn,
            queue_dyn,
            Duration::from_secs(3600),
        )),
        link_service: Arc::new(LinkService::new(links_dyn)),
        base_url: "http://sho.rt".to_string(),
    }
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
