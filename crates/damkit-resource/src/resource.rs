//! The resource binding itself

use damkit_client::ClientError;
use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::watch;
use tracing::debug;

/// Snapshot of one bound operation
#[derive(Clone, Debug)]
pub struct ResourceState<T> {
    /// Last successfully fetched value; kept visible while a refetch runs
    pub data: Option<T>,
    /// A fetch is in flight
    pub loading: bool,
    /// Message from the last failed fetch; cleared when a new fetch starts
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Whether the last fetch failed
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

type Fetcher<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// A `(data, loading, error)` binding around one client operation.
///
/// Holds a fetch closure and publishes every state transition through a
/// watch channel. Overlapping `load` calls are not deduplicated or ordered;
/// subscribers observe the publication sequence and discard stale snapshots
/// themselves.
pub struct Resource<T> {
    fetch: Fetcher<T>,
    tx: watch::Sender<ResourceState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Resource<T> {
    /// Bind a fetch closure; no fetch is issued until [`Resource::load`]
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (tx, _rx) = watch::channel(ResourceState::default());
        Self {
            fetch: Box::new(move || Box::pin(fetch())),
            tx,
        }
    }

    /// Run the bound fetch and publish the outcome.
    ///
    /// A failure always leaves `error` populated and `loading` cleared;
    /// previous data stays visible so consumers can keep rendering it.
    pub async fn load(&self) {
        self.tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        match (self.fetch)().await {
            Ok(data) => {
                self.tx.send_modify(|state| {
                    state.data = Some(data);
                    state.loading = false;
                    state.error = None;
                });
            }
            Err(error) => {
                debug!("resource fetch failed: {}", error);
                let message = error.to_string();
                self.tx.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
            }
        }
    }

    /// Alias for [`Resource::load`], named for the post-mutation refresh path
    pub async fn refetch(&self) {
        self.load().await;
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.tx.subscribe()
    }

    /// Snapshot the current state
    pub fn state(&self) -> ResourceState<T> {
        self.tx.borrow().clone()
    }
}

/// Run a mutation and, if it succeeds, refetch the given resource so lists
/// reflect the change. The mutation's own error propagates untouched.
pub async fn mutate<T, O, Fut>(
    resource: &Resource<T>,
    mutation: Fut,
) -> Result<O, ClientError>
where
    T: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O, ClientError>>,
{
    let outcome = mutation.await?;
    resource.refetch().await;
    Ok(outcome)
}
