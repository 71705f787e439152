use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{
        Coordinate, MapView, MarkerVisualState, Photo, Preferences, QuestionnaireAnswers,
        Venue,
    },
    services::{discovery, enrichment, geocoding, map_sync, providers::PlacesProvider, recommendation},
};

/// Shown when the finished questionnaire matched nothing
pub const NO_MATCHES_NOTICE: &str =
    "No matching venues found. Try a bigger city or different answers!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    NoCity,
    CityPending,
    VenuesLoaded,
    QuestionnaireOpen,
    SuggestionsReady,
}

/// Operational knobs for a flow session
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub search_radius_meters: u32,
    pub processing_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            search_radius_meters: 5000,
            processing_delay: Duration::from_secs(3),
        }
    }
}

/// Mutable flow state, owned by the orchestrator
#[derive(Debug)]
struct FlowState {
    stage: FlowStage,
    /// Bumped on every city confirmation; results tagged with an older value are dropped
    generation: u64,
    city: Option<String>,
    center: Option<Coordinate>,
    venues: Vec<Venue>,
    suggestions: Vec<String>,
    preferences: Option<Preferences>,
    loading: bool,
    processing: bool,
    processing_ticket: u64,
    processing_timer: Option<JoinHandle<()>>,
    alert: Option<String>,
    markers: BTreeMap<String, MarkerVisualState>,
    map: MapView,
}

impl FlowState {
    fn new() -> Self {
        Self {
            stage: FlowStage::NoCity,
            generation: 0,
            city: None,
            center: None,
            venues: Vec::new(),
            suggestions: Vec::new(),
            preferences: None,
            loading: false,
            processing: false,
            processing_ticket: 0,
            processing_timer: None,
            alert: None,
            markers: BTreeMap::new(),
            map: MapView::default(),
        }
    }

    fn stop_processing(&mut self) {
        self.processing_ticket += 1;
        self.processing = false;
        if let Some(timer) = self.processing_timer.take() {
            timer.abort();
        }
    }

    fn clear_suggestions(&mut self) {
        self.stop_processing();
        self.suggestions.clear();
        self.preferences = None;
    }

    /// Recomputes marker state and viewport from the current venues and suggestions
    fn resync_map(&mut self) {
        let sync = map_sync::compute_marker_state(&self.venues, &self.suggestions);
        self.map = map_sync::reconcile(&self.map, &sync);
        self.markers = sync.markers;
    }

    fn snapshot(&self) -> FlowSnapshot {
        let revealed = self.stage == FlowStage::SuggestionsReady && !self.processing;

        let itinerary = revealed.then(|| {
            self.suggestions
                .iter()
                .filter_map(|id| self.venues.iter().find(|v| &v.id == id))
                .cloned()
                .collect::<Vec<_>>()
        });
        let notice = match &itinerary {
            Some(list) if list.is_empty() => Some(NO_MATCHES_NOTICE.to_string()),
            _ => None,
        };

        FlowSnapshot {
            stage: self.stage,
            generation: self.generation,
            city: self.city.clone(),
            loading: self.loading,
            processing: self.processing,
            alert: self.alert.clone(),
            notice,
            preferences: self.preferences,
            venues: self.venues.clone(),
            suggestion_ids: self.suggestions.clone(),
            itinerary,
            markers: self.markers.clone(),
            map: self.map.clone(),
        }
    }
}

/// Read-only view of the flow for the display layer
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub stage: FlowStage,
    pub generation: u64,
    pub city: Option<String>,
    pub loading: bool,
    pub processing: bool,
    pub alert: Option<String>,
    pub notice: Option<String>,
    pub preferences: Option<Preferences>,
    pub venues: Vec<Venue>,
    pub suggestion_ids: Vec<String>,
    /// Suggested venues in itinerary order; hidden until processing has finished
    pub itinerary: Option<Vec<Venue>>,
    pub markers: BTreeMap<String, MarkerVisualState>,
    pub map: MapView,
}

/// Sequences geocoding, discovery, enrichment, recommendation and map sync
/// in response to user actions.
#[derive(Clone)]
pub struct FlowOrchestrator {
    provider: Arc<dyn PlacesProvider>,
    settings: FlowSettings,
    state: Arc<RwLock<FlowState>>,
}

impl FlowOrchestrator {
    pub fn new(provider: Arc<dyn PlacesProvider>, settings: FlowSettings) -> Self {
        Self {
            provider,
            settings,
            state: Arc::new(RwLock::new(FlowState::new())),
        }
    }

    pub async fn snapshot(&self) -> FlowSnapshot {
        self.state.read().await.snapshot()
    }

    /// Confirms a city and runs geocode → discovery → enrichment.
    ///
    /// Returns `AppError::Superseded` if another city was confirmed while this run
    /// was in flight; its results are discarded.
    pub async fn confirm_city(&self, city_text: &str) -> AppResult<FlowSnapshot> {
        let city = geocoding::validate_city(city_text)?.to_string();

        let (generation, interrupted) = {
            let mut state = self.state.write().await;
            let interrupted = state.loading;
            state.generation += 1;
            state.loading = true;
            state.alert = None;
            (state.generation, interrupted)
        };

        tracing::info!(city = %city, generation = generation, "City confirmed");

        // The run lives on its own task so a dropped caller cannot leave the flow half-loaded
        let run = tokio::spawn({
            let flow = self.clone();
            async move { flow.run_city(city, generation, interrupted).await }
        });

        match run.await {
            Ok(result) => result,
            Err(e) => {
                let error = AppError::Internal(format!("City search task failed: {}", e));
                Err(self.fail_run(generation, error, false).await)
            }
        }
    }

    async fn run_city(
        &self,
        city: String,
        generation: u64,
        interrupted: bool,
    ) -> AppResult<FlowSnapshot> {
        let center = match geocoding::resolve(self.provider.as_ref(), &city).await {
            Ok(center) => center,
            Err(e) => return Err(self.fail_run(generation, e, interrupted).await),
        };

        {
            let mut state = self.state.write().await;
            if state.generation != generation {
                tracing::debug!(generation = generation, "Dropping superseded geocode result");
                return Err(AppError::Superseded);
            }

            // Venues and suggestions of the previous city go away together
            state.clear_suggestions();
            state.venues.clear();
            state.stage = FlowStage::CityPending;
            state.city = Some(city.clone());
            state.center = Some(center);
            state.map.pan_to_city(center);
            state.resync_map();
        }

        let venues = match self.discover_and_enrich(center).await {
            Ok(venues) => venues,
            Err(e) => return Err(self.fail_run(generation, e, false).await),
        };

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                generation = generation,
                current = state.generation,
                "Dropping superseded venue results"
            );
            return Err(AppError::Superseded);
        }

        tracing::info!(
            city = %city,
            generation = generation,
            venues = venues.len(),
            "Venues loaded"
        );

        state.venues = venues;
        state.stage = FlowStage::VenuesLoaded;
        state.loading = false;
        state.resync_map();

        Ok(state.snapshot())
    }

    async fn discover_and_enrich(&self, center: Coordinate) -> AppResult<Vec<Venue>> {
        let candidates =
            discovery::search(self.provider.as_ref(), center, self.settings.search_radius_meters)
                .await?;

        Ok(enrichment::enrich(Arc::clone(&self.provider), candidates).await)
    }

    /// Records a failed run without touching venues or suggestions.
    ///
    /// `interrupted` marks a run that superseded another one still in flight; if that
    /// run had already cleared the venues, nothing is left to finish it, so the flow
    /// falls back to `NoCity`.
    async fn fail_run(&self, generation: u64, error: AppError, interrupted: bool) -> AppError {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return AppError::Superseded;
        }

        if error.is_provider_failure() {
            tracing::warn!(generation = generation, error = %error, stage = ?state.stage, "City search failed");
        } else {
            tracing::info!(generation = generation, error = %error, stage = ?state.stage, "City search rejected");
        }

        if interrupted && state.stage == FlowStage::CityPending {
            state.stage = FlowStage::NoCity;
            state.city = None;
            state.center = None;
            let (map_type, show_labels) = (state.map.map_type, state.map.show_labels);
            state.map = MapView {
                map_type,
                show_labels,
                ..MapView::default()
            };
            state.resync_map();
        }

        state.loading = false;
        state.alert = Some(error.user_message());
        error
    }

    /// Fetches venue photo bytes through the provider so its key never reaches the client
    pub async fn photo(&self, reference: &str) -> AppResult<Photo> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(AppError::InvalidInput("Photo reference cannot be empty".to_string()));
        }

        self.provider.photo(reference).await
    }

    /// Moves from loaded venues (or a finished itinerary) to preference collection
    pub async fn open_questionnaire(&self) -> AppResult<FlowSnapshot> {
        let mut state = self.state.write().await;

        match state.stage {
            FlowStage::VenuesLoaded | FlowStage::SuggestionsReady => {}
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "Cannot open the questionnaire from {:?}",
                    other
                )))
            }
        }

        state.clear_suggestions();
        state.stage = FlowStage::QuestionnaireOpen;
        state.resync_map();

        Ok(state.snapshot())
    }

    /// Computes the itinerary and starts the processing pause before it is revealed
    pub async fn complete_questionnaire(
        &self,
        answers: &QuestionnaireAnswers,
    ) -> AppResult<FlowSnapshot> {
        let mut state = self.state.write().await;

        if state.stage != FlowStage::QuestionnaireOpen {
            return Err(AppError::InvalidTransition(format!(
                "Cannot complete the questionnaire from {:?}",
                state.stage
            )));
        }

        let prefs = Preferences::from(answers);
        let suggestions = recommendation::recommend(&state.venues, &prefs);

        tracing::info!(
            wants_to_eat = prefs.wants_to_eat,
            desired = prefs.desired_spot_count,
            suggested = suggestions.len(),
            "Questionnaire completed"
        );

        state.stop_processing();
        state.preferences = Some(prefs);
        state.suggestions = suggestions;
        state.stage = FlowStage::SuggestionsReady;
        state.processing = true;
        state.resync_map();

        let ticket = state.processing_ticket;
        let delay = self.settings.processing_delay;
        let shared = Arc::clone(&self.state);
        state.processing_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.write().await;
            if state.processing_ticket == ticket {
                state.processing = false;
                state.processing_timer = None;
                tracing::debug!("Itinerary revealed");
            }
        }));

        Ok(state.snapshot())
    }

    /// Backs out of the processing pause, returning to the questionnaire
    pub async fn cancel_processing(&self) -> AppResult<FlowSnapshot> {
        let mut state = self.state.write().await;

        if state.stage != FlowStage::SuggestionsReady || !state.processing {
            return Err(AppError::InvalidTransition(
                "Nothing is being processed".to_string(),
            ));
        }

        state.clear_suggestions();
        state.stage = FlowStage::QuestionnaireOpen;
        state.resync_map();

        tracing::info!("Processing cancelled");

        Ok(state.snapshot())
    }

    /// Flips map labels (hybrid vs. satellite imagery)
    pub async fn toggle_labels(&self) -> MapView {
        let mut state = self.state.write().await;
        state.map.toggle_labels();
        state.map.clone()
    }

    /// Drops everything and supersedes any in-flight run
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.stop_processing();
        let generation = state.generation + 1;
        *state = FlowState::new();
        state.generation = generation;
    }
}
