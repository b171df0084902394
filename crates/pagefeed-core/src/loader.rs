//! Incremental pagination state machine.
//!
//! An [`ActiveLoader`] moves between `Idle` and `Fetching` as its sentinel
//! becomes visible and page fetches resolve:
//!
//! ```text
//! Idle --visible--> Fetching --Ok(fragment)--> append --> Idle
//!                            \--Err(reason)-----------> Idle
//! any --stop()--> Stopped
//! ```
//!
//! Visibility events that arrive while `Fetching` are dropped. The page
//! counter is advanced before the request is issued; with
//! [`FailurePolicy::SkipPage`] a failed page is never retried.
//!
//! Loaders are single-threaded. Shared state lives in a `RefCell` that is
//! never borrowed across the fetch's `.await`, so a second trigger can run
//! (and be rejected) while a fetch is pending.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    appender::ContentAppender,
    config::{FailurePolicy, FeedConfig},
    endpoint::PageRequest,
    error::{Capability, FeedError, FetchError},
    fetcher::{PageFetcher, PageResult},
    sentinel::IntersectionTracker,
};

/// Loader phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the sentinel to become visible.
    Idle,
    /// A page request is in flight.
    Fetching,
    /// Stopped explicitly or because the container was detached.
    Stopped,
}

/// Snapshot of the loader's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderState {
    /// Last page number requested, 0 before the first request.
    pub page: u32,
    /// Whether a fetch is in flight.
    pub in_flight: bool,
}

/// Host capabilities detected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Viewport intersection observation is available.
    pub visibility_observer: bool,
    /// Network fetch is available.
    pub network_fetch: bool,
}

impl Capabilities {
    /// Every capability present.
    pub fn all() -> Self {
        Self {
            visibility_observer: true,
            network_fetch: true,
        }
    }

    /// First missing capability, if any.
    pub fn missing(&self) -> Option<Capability> {
        if !self.visibility_observer {
            Some(Capability::VisibilityObserver)
        } else if !self.network_fetch {
            Some(Capability::NetworkFetch)
        } else {
            None
        }
    }

    /// Check that every capability is present.
    pub fn check(&self) -> crate::Result<()> {
        match self.missing() {
            Some(capability) => Err(FeedError::CapabilityUnavailable(capability)),
            None => Ok(()),
        }
    }
}

/// Loader tuning taken from [`FeedConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Counter policy after a failed page.
    pub failure_policy: FailurePolicy,
    /// Counter value before the first increment.
    pub start_page: u32,
}

impl From<&FeedConfig> for LoaderOptions {
    fn from(config: &FeedConfig) -> Self {
        Self {
            failure_policy: config.failure_policy,
            start_page: config.start_page,
        }
    }
}

/// Why a trigger did not issue a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The loader was built without the capabilities it needs.
    Inert,
    /// A fetch is already in flight.
    InFlight,
    /// The loader has been stopped.
    Stopped,
    /// The container left its document; the loader stopped itself.
    Detached,
    /// The page counter cannot advance any further; the loader stopped
    /// itself.
    Exhausted,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IgnoreReason::Inert => "inert",
            IgnoreReason::InFlight => "in flight",
            IgnoreReason::Stopped => "stopped",
            IgnoreReason::Detached => "detached",
            IgnoreReason::Exhausted => "exhausted",
        };
        f.write_str(reason)
    }
}

/// What a single trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// No fetch was issued.
    Ignored(IgnoreReason),
    /// The page was fetched and `nodes` nodes were appended.
    Appended { page: u32, nodes: usize },
    /// The page failed; nothing was appended.
    Failed { page: u32, error: FetchError },
    /// The loader was stopped, or its container detached, while the page
    /// was in flight; the result was thrown away.
    Discarded { page: u32 },
}

/// A failed page, as reported to the error hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Page that failed.
    pub page: u32,
    /// Failure reason.
    pub error: FetchError,
}

/// Observability callback invoked for every failed page.
pub type ErrorHook = Rc<dyn Fn(&PageFailure)>;

#[derive(Debug)]
struct Shared {
    phase: Phase,
    page: u32,
    epoch: u64,
    tracker: IntersectionTracker,
}

/// Loader with every capability available.
pub struct ActiveLoader<F, A> {
    fetcher: F,
    appender: A,
    options: LoaderOptions,
    shared: RefCell<Shared>,
    error_hook: RefCell<Option<ErrorHook>>,
}

impl<F, A> ActiveLoader<F, A>
where
    F: PageFetcher,
    A: ContentAppender,
{
    /// Create an idle loader.
    pub fn new(options: LoaderOptions, fetcher: F, appender: A) -> Self {
        Self {
            fetcher,
            appender,
            options,
            shared: RefCell::new(Shared {
                phase: Phase::Idle,
                page: options.start_page,
                epoch: 0,
                tracker: IntersectionTracker::new(),
            }),
            error_hook: RefCell::new(None),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.shared.borrow().phase
    }

    /// Current state snapshot.
    pub fn state(&self) -> LoaderState {
        let shared = self.shared.borrow();
        LoaderState {
            page: shared.page,
            in_flight: shared.phase == Phase::Fetching,
        }
    }

    /// The container fragments are appended to.
    pub fn appender(&self) -> &A {
        &self.appender
    }

    /// Install the error hook, replacing any previous one.
    pub fn set_error_hook(&self, hook: impl Fn(&PageFailure) + 'static) {
        *self.error_hook.borrow_mut() = Some(Rc::new(hook));
    }

    /// Stop the loader if its container has left the document. Returns
    /// whether the loader is still running.
    pub fn check_connected(&self) -> bool {
        if self.phase() == Phase::Stopped {
            return false;
        }
        if self.appender.is_connected() {
            return true;
        }
        tracing::debug!("container detached, stopping loader");
        self.stop();
        false
    }

    /// Feed an intersection observation. Returns `true` on a rising edge,
    /// which the caller answers with [`trigger`](Self::trigger).
    pub fn observe_intersection(&self, intersecting: bool) -> bool {
        let mut shared = self.shared.borrow_mut();
        if shared.phase == Phase::Stopped {
            return false;
        }
        shared.tracker.observe(intersecting)
    }

    /// Start a page request: `Idle -> Fetching`.
    pub fn begin(&self) -> Result<PageRequest, IgnoreReason> {
        let connected = self.appender.is_connected();
        let mut shared = self.shared.borrow_mut();

        match shared.phase {
            Phase::Stopped => return Err(IgnoreReason::Stopped),
            Phase::Fetching => {
                tracing::trace!(page = shared.page, "visibility ignored, fetch in flight");
                return Err(IgnoreReason::InFlight);
            }
            Phase::Idle => {}
        }

        if !connected {
            shared.phase = Phase::Stopped;
            shared.epoch += 1;
            tracing::debug!("container detached, stopping loader");
            return Err(IgnoreReason::Detached);
        }

        let Some(next) = shared.page.checked_add(1) else {
            shared.phase = Phase::Stopped;
            shared.epoch += 1;
            tracing::debug!(page = shared.page, "last page reached, stopping loader");
            return Err(IgnoreReason::Exhausted);
        };

        shared.page = next;
        shared.phase = Phase::Fetching;
        tracing::debug!(page = shared.page, "fetching page");

        Ok(PageRequest {
            page: shared.page,
            epoch: shared.epoch,
        })
    }

    /// Complete a page request: `Fetching -> Idle`.
    ///
    /// A result whose request predates the last [`stop`](Self::stop) is
    /// discarded without touching the container or the state. A successful
    /// result that lands after the container left the document is discarded
    /// too, and the loader stops.
    pub fn finish(&self, request: PageRequest, result: PageResult) -> TriggerOutcome {
        {
            let shared = self.shared.borrow();
            if shared.epoch != request.epoch || shared.phase != Phase::Fetching {
                tracing::debug!(page = request.page, "discarding late page");
                return TriggerOutcome::Discarded { page: request.page };
            }
        }

        match result {
            Ok(_) if !self.appender.is_connected() => {
                self.stop();
                tracing::debug!(page = request.page, "container detached, discarding page");
                TriggerOutcome::Discarded { page: request.page }
            }
            Ok(fragment) => {
                let nodes = self.appender.append(&fragment);
                self.shared.borrow_mut().phase = Phase::Idle;
                tracing::info!(page = request.page, nodes, "appended page");
                TriggerOutcome::Appended {
                    page: request.page,
                    nodes,
                }
            }
            Err(error) => {
                {
                    let mut shared = self.shared.borrow_mut();
                    if self.options.failure_policy == FailurePolicy::RetrySamePage {
                        shared.page = shared.page.saturating_sub(1);
                    }
                    shared.phase = Phase::Idle;
                }
                tracing::warn!(page = request.page, %error, "page failed");

                let failure = PageFailure {
                    page: request.page,
                    error: error.clone(),
                };
                let hook = self.error_hook.borrow().clone();
                if let Some(hook) = hook {
                    hook(&failure);
                }

                TriggerOutcome::Failed {
                    page: request.page,
                    error,
                }
            }
        }
    }

    /// Run one full load cycle for a visibility event.
    pub async fn trigger(&self) -> TriggerOutcome {
        let request = match self.begin() {
            Ok(request) => request,
            Err(reason) => return TriggerOutcome::Ignored(reason),
        };

        let result = self.fetcher.fetch_page(request.page).await;
        self.finish(request, result)
    }

    /// Stop the loader. A fetch in flight will be discarded when it resolves.
    pub fn stop(&self) {
        let mut shared = self.shared.borrow_mut();
        if shared.phase != Phase::Stopped {
            shared.phase = Phase::Stopped;
            shared.epoch += 1;
            tracing::debug!(page = shared.page, "loader stopped");
        }
    }
}

/// Loader built without a required capability. Never fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InertLoader {
    missing: Capability,
}

/// Incremental pagination loader, active or permanently inert.
pub enum PaginationLoader<F, A> {
    /// All capabilities present.
    Active(ActiveLoader<F, A>),
    /// A capability was missing at construction.
    Inert(InertLoader),
}

impl<F, A> PaginationLoader<F, A>
where
    F: PageFetcher,
    A: ContentAppender,
{
    /// Build a loader, checking capabilities first.
    pub fn new(
        capabilities: Capabilities,
        options: LoaderOptions,
        fetcher: F,
        appender: A,
    ) -> Self {
        match capabilities.missing() {
            Some(missing) => {
                tracing::warn!(%missing, "capability unavailable, pagination disabled");
                Self::Inert(InertLoader { missing })
            }
            None => Self::Active(ActiveLoader::new(options, fetcher, appender)),
        }
    }

    /// Build a loader from a feed configuration.
    pub fn from_config(
        config: &FeedConfig,
        capabilities: Capabilities,
        fetcher: F,
        appender: A,
    ) -> Self {
        Self::new(capabilities, LoaderOptions::from(config), fetcher, appender)
    }

    /// Whether the loader was built active.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Stop the loader if its container has left the document. Returns
    /// whether the loader is still running; inert loaders never run.
    pub fn check_connected(&self) -> bool {
        match self {
            Self::Active(loader) => loader.check_connected(),
            Self::Inert(_) => false,
        }
    }

    /// Current phase. Inert loaders report `Stopped`.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Active(loader) => loader.phase(),
            Self::Inert(_) => Phase::Stopped,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> LoaderState {
        match self {
            Self::Active(loader) => loader.state(),
            Self::Inert(_) => LoaderState {
                page: 0,
                in_flight: false,
            },
        }
    }

    /// Install the error hook. No-op on an inert loader.
    pub fn set_error_hook(&self, hook: impl Fn(&PageFailure) + 'static) {
        if let Self::Active(loader) = self {
            loader.set_error_hook(hook);
        }
    }

    /// Feed an intersection observation. Inert loaders never emit.
    pub fn observe_intersection(&self, intersecting: bool) -> bool {
        match self {
            Self::Active(loader) => loader.observe_intersection(intersecting),
            Self::Inert(_) => false,
        }
    }

    /// Run one load cycle.
    pub async fn trigger(&self) -> TriggerOutcome {
        match self {
            Self::Active(loader) => loader.trigger().await,
            Self::Inert(inert) => {
                tracing::trace!(missing = %inert.missing, "inert loader ignores trigger");
                TriggerOutcome::Ignored(IgnoreReason::Inert)
            }
        }
    }

    /// Stop the loader.
    pub fn stop(&self) {
        if let Self::Active(loader) = self {
            loader.stop();
        }
    }
}
