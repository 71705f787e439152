pub mod auth;
pub mod discovery;
pub mod enrichment;
pub mod geocoding;
pub mod identity;
pub mod map_sync;
pub mod orchestrator;
pub mod providers;
pub mod recommendation;

pub use auth::AuthService;
pub use orchestrator::{FlowOrchestrator, FlowSettings, FlowSnapshot, FlowStage};
