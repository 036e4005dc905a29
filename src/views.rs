use std::{fmt, future::Future, sync::Arc};

use store::models::{Item, ListQuery, PageResult};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::{
    client::{ClientError, ItemSource},
    fetch::{Mount, Outcome},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    List(ListQuery),
    Detail(i64),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List(query) if query.q.is_empty() => write!(f, "/?page={}", query.page),
            Route::List(query) => {
                let q: String = form_urlencoded::byte_serialize(query.q.as_bytes()).collect();
                write!(f, "/?page={}&q={q}", query.page)
            }
            Route::Detail(id) => write!(f, "/items/{id}"),
        }
    }
}

/// One fetch bound to one mount.
struct Fetched<T> {
    mount: Mount,
    state: watch::Receiver<ViewState<T>>,
    task: JoinHandle<()>,
}

impl<T> Fetched<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn spawn<F>(what: &'static str, request: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let mount = Mount::new();
        let handle = mount.handle();
        let (tx, state) = watch::channel(ViewState::Loading);
        let setter = handle.setter(tx);

        let task = tokio::spawn(async move {
            match handle.run(request).await {
                Outcome::Completed(value) => {
                    setter.set(ViewState::Ready(value));
                }
                Outcome::Failed(e) => {
                    warn!("Failed to load {what}: {e}");
                    setter.set(ViewState::Failed(e.to_string()));
                }
                Outcome::Cancelled => debug!("{what} request cancelled on unmount"),
            }
        });

        Self { mount, state, task }
    }

    fn current(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// Waits for the fetch to leave `Loading`. Stays `Loading` if the task
    /// ended without publishing.
    async fn settled(&mut self) -> ViewState<T> {
        if let Ok(state) = self.state.wait_for(|state| !state.is_loading()).await {
            return state.clone();
        }

        self.current()
    }

    fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }

    async fn unmount(self) {
        let Fetched { mount, task, .. } = self;
        drop(mount);

        if let Err(e) = task.await {
            warn!("Fetch task ended abnormally: {e}");
        }
    }
}

pub struct ItemListView {
    query: ListQuery,
    fetched: Fetched<PageResult>,
}

impl ItemListView {
    pub fn mount<S>(source: Arc<S>, query: ListQuery) -> Self
    where
        S: ItemSource + ?Sized + 'static,
    {
        let request_query = query.clone();
        let fetched = Fetched::spawn("items", async move { source.list(&request_query).await });

        Self { query, fetched }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn state(&self) -> ViewState<PageResult> {
        self.fetched.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<PageResult>> {
        self.fetched.subscribe()
    }

    pub async fn settled(&mut self) -> ViewState<PageResult> {
        self.fetched.settled().await
    }

    /// Where a failed list sends the user: the first page of the same search.
    pub fn recovery(&self) -> Route {
        Route::List(ListQuery {
            page: 1,
            ..self.query.clone()
        })
    }

    pub async fn unmount(self) {
        self.fetched.unmount().await;
    }
}

pub struct ItemDetailView {
    id: i64,
    back: Route,
    fetched: Fetched<Item>,
}

impl ItemDetailView {
    pub fn mount<S>(source: Arc<S>, id: i64, back: Route) -> Self
    where
        S: ItemSource + ?Sized + 'static,
    {
        let fetched = Fetched::spawn("item", async move { source.get(id).await });

        Self { id, back, fetched }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> ViewState<Item> {
        self.fetched.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Item>> {
        self.fetched.subscribe()
    }

    pub async fn settled(&mut self) -> ViewState<Item> {
        self.fetched.settled().await
    }

    pub fn recovery(&self) -> Route {
        self.back.clone()
    }

    pub async fn unmount(self) {
        self.fetched.unmount().await;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::{sync::Notify, time::timeout};

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        gate: Option<Arc<Notify>>,
        items: Vec<Item>,
        finished: AtomicUsize,
    }

    impl FakeSource {
        fn with_items(items: Vec<Item>) -> Arc<Self> {
            Arc::new(Self {
                items,
                ..Default::default()
            })
        }

        fn gated(gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                gate: Some(gate),
                items: vec![lamp()],
                ..Default::default()
            })
        }

        async fn wait(&self) {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl ItemSource for FakeSource {
        async fn list(&self, query: &ListQuery) -> Result<PageResult, ClientError> {
            self.wait().await;
            self.finished.fetch_add(1, Ordering::SeqCst);

            Ok(PageResult {
                total: self.items.len(),
                page: query.page,
                limit: query.limit,
                data: self.items.clone(),
            })
        }

        async fn get(&self, id: i64) -> Result<Item, ClientError> {
            self.wait().await;
            self.finished.fetch_add(1, Ordering::SeqCst);

            self.items
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    status: reqwest::StatusCode::NOT_FOUND,
                    message: "Item not found".to_string(),
                })
        }
    }

    fn lamp() -> Item {
        Item {
            id: 1,
            name: "Desk Lamp".to_string(),
            category: "Home".to_string(),
            price: 20.0,
            img: None,
        }
    }

    #[tokio::test]
    async fn list_view_loads_page() {
        let source = FakeSource::with_items(vec![lamp()]);
        let mut view = ItemListView::mount(source, ListQuery::default());

        let state = timeout(Duration::from_secs(1), view.settled()).await.unwrap();

        match state {
            ViewState::Ready(page) => assert_eq!(page.data, vec![lamp()]),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_view_reports_not_found_with_recovery() {
        let source = FakeSource::with_items(vec![]);
        let back = Route::List(ListQuery::default());
        let mut view = ItemDetailView::mount(source, 42, back.clone());

        let state = timeout(Duration::from_secs(1), view.settled()).await.unwrap();

        assert_eq!(state, ViewState::Failed("Item not found (404 Not Found)".to_string()));
        assert_eq!(view.recovery(), back);
    }

    #[tokio::test]
    async fn unmount_before_response_never_updates_state() {
        let gate = Arc::new(Notify::new());
        let source = FakeSource::gated(gate.clone());
        let view = ItemListView::mount(source.clone(), ListQuery::default());
        let observer = view.subscribe();

        tokio::task::yield_now().await;
        view.unmount().await;
        gate.notify_waiters();
        tokio::task::yield_now().await;

        assert!(observer.borrow().is_loading());
        assert_eq!(source.finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dropping_view_cancels_request() {
        let gate = Arc::new(Notify::new());
        let source = FakeSource::gated(gate.clone());
        let view = ItemDetailView::mount(source.clone(), 1, Route::List(ListQuery::default()));
        let mut observer = view.subscribe();

        drop(view);

        // sender closes once the cancelled task finishes
        assert!(
            timeout(Duration::from_secs(1), observer.changed())
                .await
                .unwrap()
                .is_err()
        );
        assert!(observer.borrow().is_loading());
        assert_eq!(source.finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn list_recovery_returns_to_first_page_of_search() {
        let query = ListQuery {
            page: 4,
            limit: 10,
            q: "lamp".to_string(),
        };
        let view = ItemListView::mount(FakeSource::with_items(vec![]), query);

        assert_eq!(view.recovery().to_string(), "/?page=1&q=lamp");
        assert_eq!(Route::Detail(9).to_string(), "/items/9");

        view.unmount().await;
    }

    #[test]
    fn list_route_encodes_search() {
        let route = Route::List(ListQuery {
            page: 2,
            limit: 10,
            q: "desk & lamp".to_string(),
        });

        assert_eq!(route.to_string(), "/?page=2&q=desk+%26+lamp");
    }
}
