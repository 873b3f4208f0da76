//! Recommendation dashboard
//!
//! Owns the session: preferences, the recommendations on display, the
//! history cache and the location flow. Both request modes run through
//! the same normalizer and are localized the same way.

use chrono::Utc;
use tokio::task::JoinHandle;
use validator::Validate;

use shared::{
    normalize_batch, normalize_remote_history, AppContext, GeolocationReading, HistoryCache,
    HistoryEntry, KeyValueStore, Language, RecommendationSet, RemoteHistoryItem, RequestMethod,
    SoilInputs, HISTORY_LIMIT,
};

use crate::error::AppResult;
use crate::external::{BackendClient, LocationInsights};
use crate::services::location::{GeolocationProvider, LocationFlow};

/// Where a history listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrigin {
    Remote,
    Local,
}

/// A history listing for display. Pulling from the backend never rewrites
/// the local cache.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub origin: HistoryOrigin,
    pub entries: Vec<HistoryEntry>,
}

pub struct DashboardService<S, P>
where
    S: KeyValueStore + Clone,
    P: GeolocationProvider,
{
    backend: BackendClient,
    context: AppContext<S>,
    history: HistoryCache<S>,
    location: LocationFlow<P>,
    current: Option<RecommendationSet>,
    insights: Option<LocationInsights>,
    mirrors: Vec<JoinHandle<()>>,
}

impl<S, P> DashboardService<S, P>
where
    S: KeyValueStore + Clone,
    P: GeolocationProvider,
{
    pub fn new(backend: BackendClient, store: S, location: LocationFlow<P>) -> Self {
        let context = AppContext::load(store.clone());
        if let Some(e) = context.startup_error() {
            tracing::warn!("Could not persist user id: {}", e);
        }
        Self {
            backend,
            context,
            history: HistoryCache::load(store),
            location,
            current: None,
            insights: None,
            mirrors: Vec::new(),
        }
    }

    pub fn context(&self) -> &AppContext<S> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext<S> {
        &mut self.context
    }

    pub fn history(&self) -> &HistoryCache<S> {
        &self.history
    }

    /// Recommendations on display
    pub fn current(&self) -> Option<&RecommendationSet> {
        self.current.as_ref()
    }

    /// Soil and weather context of the last location request
    pub fn insights(&self) -> Option<&LocationInsights> {
        self.insights.as_ref()
    }

    pub fn reading(&self) -> Option<&GeolocationReading> {
        self.location.reading()
    }

    /// Switch language, re-localizing what is on display
    pub fn set_language(&mut self, language: Language) {
        if let Err(e) = self.context.set_language(language, self.current.as_mut()) {
            tracing::warn!("Could not persist language: {}", e);
        }
    }

    // ========================================================================
    // Recommendation flows
    // ========================================================================

    /// GPS flow: detect, request, normalize, record
    pub async fn recommend_from_location(&mut self) -> AppResult<RecommendationSet> {
        self.insights = None;
        let reading = self.location.detect().await?;

        let payload = self
            .backend
            .recommend_from_location(reading.latitude, reading.longitude)
            .await?;

        let insights = LocationInsights::from_payload(&payload);
        if insights.location.as_ref().is_some_and(|l| l.is_sentinel()) {
            tracing::warn!("Backend echoed location (0, 0); keeping the device reading");
        }
        self.insights = Some(insights);

        let items = normalize_batch(&payload, RequestMethod::Auto);
        let results = RecommendationSet::new(RequestMethod::Auto, items, self.context.language());
        tracing::info!("Received {} location recommendations", results.len());

        self.current = Some(results.clone());
        self.record(HistoryEntry::from_location(&reading, &results, Utc::now()));
        Ok(results)
    }

    /// Manual flow. Invalid inputs never reach the network.
    pub async fn recommend_manual(&mut self, inputs: &SoilInputs) -> AppResult<RecommendationSet> {
        inputs.validate()?;

        let payload = self.backend.recommend_manual(inputs).await?;
        let items = normalize_batch(&payload, RequestMethod::Manual);
        let results = RecommendationSet::new(RequestMethod::Manual, items, self.context.language());
        tracing::info!("Received {} manual recommendations", results.len());

        self.current = Some(results.clone());
        self.record(HistoryEntry::from_manual(inputs, &results, Utc::now()));
        Ok(results)
    }

    /// Append locally, then mirror to the backend in the background. Both
    /// are best effort.
    fn record(&mut self, entry: HistoryEntry) {
        let remote = RemoteHistoryItem::from_entry(&entry, self.context.user_id());

        if let Err(e) = self.history.append(entry) {
            tracing::warn!("Could not persist search history: {}", e);
        }

        self.mirrors.retain(|task| !task.is_finished());
        let backend = self.backend.clone();
        self.mirrors.push(tokio::spawn(async move {
            if let Err(e) = backend.save_history(&remote).await {
                tracing::debug!("Remote history save failed: {}", e);
            }
        }));
    }

    /// Wait for pending remote history saves
    pub async fn flush_history_mirror(&mut self) {
        for task in self.mirrors.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!("Remote history task failed: {}", e);
            }
        }
    }

    // ========================================================================
    // History
    // ========================================================================

    /// History as the backend has it, newest first. An empty or failed
    /// remote listing shows the local cache instead.
    pub async fn sync_history(&self) -> HistoryView {
        let local = || HistoryView {
            origin: HistoryOrigin::Local,
            entries: self.history.entries().to_vec(),
        };

        let items = match self.backend.get_history(self.context.user_id()).await {
            Ok(items) => items,
            Err(e) => {
                tracing::info!("Remote history unavailable, using local cache: {}", e);
                return local();
            }
        };

        let mut entries: Vec<HistoryEntry> = items.iter().filter_map(normalize_remote_history).collect();
        if entries.is_empty() {
            return local();
        }
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(HISTORY_LIMIT);

        HistoryView {
            origin: HistoryOrigin::Remote,
            entries,
        }
    }

    /// Delete by index in the full list. Returns false for an unknown index.
    pub fn remove_history(&mut self, index: usize) -> bool {
        if index >= self.history.len() {
            return false;
        }
        if let Err(e) = self.history.remove(index) {
            tracing::warn!("Could not persist history removal: {}", e);
        }
        true
    }
}
