//! Pagination controller: issues refresh, search and next-page loads against
//! an [`ArticleGateway`] and folds the results into a [`StateStore`].
//!
//! Every refresh/search starts a new session and bumps an epoch counter.
//! Background work captures the epoch it was launched under and its result is
//! dropped if a newer session has started in the meantime.

pub mod scroll;
pub mod state;


use std::sync::Arc;

use futures::future::join;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{dedup_by_url, extend_unique};
use crate::fetcher::ArticleGateway;
use crate::store::{StateStore, Subscription};

pub use scroll::{is_near_end, ScrollTrigger, PREFETCH_DISTANCE};
pub use state::{Activity, FeedStatus, ViewState};

/// Page/query bookkeeping for the current session.
#[derive(Debug)]
struct Session {
    epoch: u64,
    current_page: u32,
    /// `Some` in search mode; follow-up pages reuse it.
    current_query: Option<String>,
    is_loading_page: bool,
}

struct Shared {
    gateway: Arc<dyn ArticleGateway + Send + Sync>,
    store: StateStore<ViewState>,
    session: Mutex<Session>,
    page_size: u32,
}

#[derive(Clone)]
pub struct PaginationController {
    shared: Arc<Shared>,
}

impl PaginationController {
    /// Creates the controller in the loading state. Nothing is fetched until
    /// [`refresh`](Self::refresh) is called.
    pub fn new(gateway: Arc<dyn ArticleGateway + Send + Sync>, page_size: u32) -> Self {
        Self {
            shared: Arc::new(Shared {
                gateway,
                store: StateStore::new(ViewState::loading(Activity::Refreshing)),
                session: Mutex::new(Session {
                    epoch: 0,
                    current_page: 1,
                    current_query: None,
                    is_loading_page: false,
                }),
                page_size: page_size.max(1),
            }),
        }
    }

    pub fn store(&self) -> &StateStore<ViewState> {
        &self.shared.store
    }

    pub fn snapshot(&self) -> ViewState {
        self.shared.store.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<ViewState> {
        self.shared.store.subscribe()
    }

    /// Last page that loaded with at least one article.
    pub fn current_page(&self) -> u32 {
        self.shared.session.lock().current_page
    }

    pub fn current_query(&self) -> Option<String> {
        self.shared.session.lock().current_query.clone()
    }

    /// Reload headline and first page of the default feed.
    pub fn refresh(&self) -> JoinHandle<()> {
        let epoch = self.shared.begin_session(None, Activity::Refreshing);
        info!("Refreshing default feed");

        let shared = self.shared.clone();
        tokio::spawn(async move { shared.run_refresh(epoch).await })
    }

    /// Start a search session. A blank query falls back to the default feed.
    pub fn search(&self, query: &str) -> JoinHandle<()> {
        let query = query.trim();
        if query.is_empty() {
            return self.refresh();
        }

        let query = query.to_string();
        let epoch = self
            .shared
            .begin_session(Some(query.clone()), Activity::Searching);
        info!("Searching for {:?}", query);

        let shared = self.shared.clone();
        tokio::spawn(async move { shared.run_search(epoch, query).await })
    }

    /// Fetch the page after the current one in whichever mode is active.
    ///
    /// Returns `None` without fetching while another page load is in flight,
    /// after the end of the feed, or during a refresh/search.
    pub fn load_next_page(&self) -> Option<JoinHandle<()>> {
        let (epoch, query, next_page) = {
            let mut session = self.shared.session.lock();
            let blocked = session.is_loading_page
                || self
                    .shared
                    .store
                    .with(|s| s.is_end_reached || s.is_loading());
            if blocked {
                return None;
            }

            session.is_loading_page = true;
            self.shared.store.update(|s| {
                s.activity = Activity::Paginating;
                s.error_message = None;
            });
            (
                session.epoch,
                session.current_query.clone(),
                session.current_page + 1,
            )
        };
        debug!("Loading page {} (query {:?})", next_page, query);

        let shared = self.shared.clone();
        Some(tokio::spawn(async move {
            shared.run_next_page(epoch, query, next_page).await
        }))
    }

    /// Feed a scroll position from the view; loads the next page when the
    /// trigger says the tail is close.
    ///
    /// `view` is the snapshot the position was measured against, not the
    /// live state: a page that landed after the frame was drawn must not
    /// re-arm the trigger at the old position.
    pub fn on_scroll(
        &self,
        trigger: &mut ScrollTrigger,
        view: &ViewState,
        last_visible: Option<usize>,
    ) -> Option<JoinHandle<()>> {
        let fire = trigger.observe(
            last_visible,
            view.articles.len(),
            view.activity,
            view.is_end_reached,
        );
        if fire {
            self.load_next_page()
        } else {
            None
        }
    }
}

impl Shared {
    fn begin_session(&self, query: Option<String>, activity: Activity) -> u64 {
        let mut session = self.session.lock();
        session.epoch += 1;
        session.current_page = 1;
        session.current_query = query;
        // A page load from the previous session may still be running; it no
        // longer owns the guard.
        session.is_loading_page = false;
        self.store.replace(ViewState::loading(activity));
        session.epoch
    }

    /// Runs `apply` under the session lock if `epoch` is still current.
    fn commit(&self, epoch: u64, what: &str, apply: impl FnOnce(&mut Session)) {
        let mut session = self.session.lock();
        if session.epoch != epoch {
            debug!(
                "Discarding stale {} result (epoch {} < {})",
                what, epoch, session.epoch
            );
            return;
        }
        apply(&mut session);
    }

    async fn run_refresh(&self, epoch: u64) {
        let (headline, page) = join(
            self.gateway.fetch_headline(),
            self.gateway.fetch_page(None, 1, self.page_size),
        )
        .await;

        let headline = match headline {
            Ok(article) => Some(article),
            Err(e) => {
                debug!("Headline unavailable: {}", e);
                None
            }
        };

        let mut next = match page {
            Ok(articles) => ViewState {
                articles: dedup_by_url(articles),
                ..Default::default()
            },
            Err(e) => {
                warn!("Refresh failed: {}", e);
                ViewState {
                    error_message: Some(e.to_string()),
                    ..Default::default()
                }
            }
        };
        next.headline = headline;
        next.is_end_reached = next.articles.is_empty();

        self.commit(epoch, "refresh", |_| {
            info!("Refresh loaded {} articles", next.articles.len());
            self.store.replace(next);
        });
    }

    async fn run_search(&self, epoch: u64, query: String) {
        let result = self
            .gateway
            .fetch_page(Some(&query), 1, self.page_size)
            .await;

        let next = match result {
            Ok(articles) => {
                let articles = dedup_by_url(articles);
                ViewState {
                    is_end_reached: articles.is_empty(),
                    articles,
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", query, e);
                ViewState {
                    is_end_reached: true,
                    error_message: Some(e.to_string()),
                    ..Default::default()
                }
            }
        };

        self.commit(epoch, "search", |_| {
            info!("Search {:?} loaded {} articles", query, next.articles.len());
            self.store.replace(next);
        });
    }

    async fn run_next_page(&self, epoch: u64, query: Option<String>, next_page: u32) {
        let result = self
            .gateway
            .fetch_page(query.as_deref(), next_page, self.page_size)
            .await;

        self.commit(epoch, "page", |session| {
            session.is_loading_page = false;
            match result {
                Ok(articles) => {
                    let fetched = articles.len();
                    if fetched > 0 {
                        session.current_page = next_page;
                    }
                    self.store.update(|s| {
                        let added = extend_unique(&mut s.articles, articles);
                        s.activity = Activity::Idle;
                        s.is_end_reached = fetched == 0;
                        s.error_message = None;
                        info!(
                            "Page {} returned {} articles ({} new)",
                            next_page, fetched, added
                        );
                    });
                }
                Err(e) => {
                    warn!("Loading page {} failed: {}", next_page, e);
                    self.store.update(|s| {
                        s.activity = Activity::Idle;
                        s.error_message = Some(e.to_string());
                    });
                }
            }
        });
    }
}
