//! HTTP API layer: DTOs, handlers, router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::ValidatedJson;
pub use handlers::AppState;
pub use router::{create_api_router, ApiDoc};
