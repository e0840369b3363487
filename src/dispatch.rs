use crate::ddgs::{ClientConfig, ClientFactory, SearchClient, SearchResults};
use crate::error::{ProviderError, SearchError};
use crate::tools::SearchRequest;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

type SharedClient = Arc<Mutex<Option<Arc<dyn SearchClient>>>>;

/// Runs search requests against the provider on blocking worker threads.
///
/// Requests without a proxy share one lazily built client. Requests with a
/// proxy get a client of their own that is dropped when the call finishes.
#[derive(Clone)]
pub struct SearchDispatcher {
    factory: Arc<dyn ClientFactory>,
    timeout: Duration,
    shared: SharedClient,
}

impl SearchDispatcher {
    pub fn new(factory: Arc<dyn ClientFactory>, timeout: Duration) -> Self {
        Self { factory, timeout, shared: Arc::new(Mutex::new(None)) }
    }

    /// Dispatches `request` to a blocking worker. Dropping the returned future does
    /// not cancel the provider call already in flight.
    pub async fn dispatch(&self, request: SearchRequest) -> Result<SearchResults, SearchError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.run(&request))
            .await
            .map_err(|e| SearchError::Worker(e.to_string()))?
    }

    fn run(&self, request: &SearchRequest) -> Result<SearchResults, SearchError> {
        let client = self.client_for(request.proxy())?;
        let results = match request {
            SearchRequest::Text(r) => SearchResults::Text(client.text(r)?),
            SearchRequest::Images(r) => SearchResults::Images(client.images(r)?),
            SearchRequest::Videos(r) => SearchResults::Videos(client.videos(r)?),
            SearchRequest::News(r) => SearchResults::News(client.news(r)?),
            SearchRequest::Books(r) => SearchResults::Books(client.books(r)?),
        };
        Ok(results)
    }

    fn client_for(&self, proxy: Option<&str>) -> Result<Arc<dyn SearchClient>, ProviderError> {
        match proxy {
            Some(proxy) => {
                debug!("Building request-scoped client for proxy {proxy}");
                self.factory.build(&ClientConfig::new(Some(proxy.to_string()), self.timeout))
            }
            None => self.shared_client(),
        }
    }

    fn shared_client(&self) -> Result<Arc<dyn SearchClient>, ProviderError> {
        // Held across the build so concurrent first callers never see a half-built slot.
        let mut slot = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }
        debug!("Building shared search client");
        let client = self.factory.build(&ClientConfig::new(None, self.timeout))?;
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }
}
