pub mod engine;
pub mod http;
pub mod pacing;
pub mod surface;

pub use engine::{AttemptEngine, AttemptOutcome};
pub use http::HttpSurface;
pub use pacing::{HumanPacing, NoPacing, PacingPolicy};
pub use surface::{BookingSurface, ReservationOutcome, SportType};
