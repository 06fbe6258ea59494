pub mod envelope;
pub mod routes;
pub mod state;

pub use envelope::{ApiEnvelope, ApiStatus};
pub use state::AppState;
