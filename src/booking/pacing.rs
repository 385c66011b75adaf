use std::time::Duration;

use rand::Rng;

/// Base wait plus up-to-jitter random extra, in seconds. One place to tune.
const WAIT_BASE_SECS: f64 = 3.0;
const WAIT_JITTER_SECS: f64 = 2.0;

/// Decides how long to pause before each reservation attempt.
///
/// The randomized delay keeps the automated session looking like a person
/// clicking through the site; it is part of the booking contract, not a
/// tuning nicety. Injectable so tests can run with zero delay.
pub trait PacingPolicy {
    fn next_delay(&mut self) -> Duration;
}

/// Production pacing: `WAIT_BASE_SECS` plus up to `WAIT_JITTER_SECS` of
/// uniform random jitter.
#[derive(Default)]
pub struct HumanPacing;

impl PacingPolicy for HumanPacing {
    fn next_delay(&mut self) -> Duration {
        let jitter: f64 = rand::thread_rng().gen_range(0.0..WAIT_JITTER_SECS);
        Duration::from_secs_f64(WAIT_BASE_SECS + jitter)
    }
}

/// Zero-delay pacing for tests.
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}
