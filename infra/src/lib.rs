//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `ks_core`.
//!
//! ## Architecture
//!
//! - **Persistence**: an in-memory user store that enforces row policies the
//!   way a policy-enforcing database would, reporting refused writes as
//!   `rejected-by-policy` and hidden rows as `not-found`
//! - **Events**: publishers that receive domain events once a write has
//!   been committed

pub mod events;
pub mod persistence;

use std::sync::Arc;

pub use events::{RecordingEventPublisher, TracingEventPublisher};
pub use persistence::InMemoryUserRepository;

/// Infrastructure service container
#[derive(Clone, Default)]
pub struct InfrastructureServices {
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<TracingEventPublisher>,
}

impl InfrastructureServices {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the default adapter set
pub async fn initialize() -> InfrastructureServices {
    tracing::info!("Initializing infrastructure services...");
    let services = InfrastructureServices::new();
    tracing::info!(
        users = services.users.len().await,
        "Infrastructure services initialized successfully"
    );
    services
}
