use std::fmt;

use crate::error::{AuthError, SessionFault};
use crate::parser::SlotTarget;

/// Reservation category on the booking site, tried in priority order when
/// the preferred one has no availability at a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportType {
    Tennis,
    FreePlay,
}

impl SportType {
    /// Fixed fallback chain: Tennis first, then Free Play.
    pub const FALLBACK_ORDER: [SportType; 2] = [SportType::Tennis, SportType::FreePlay];
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the button labels on the booking site
        match self {
            SportType::Tennis => write!(f, "Tennis"),
            SportType::FreePlay => write!(f, "Free Play"),
        }
    }
}

/// Result of one reservation attempt for one (target, sport) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    Booked,
    /// The slot has no availability for this sport. A normal negative
    /// outcome, not an error; the caller moves on to the next sport.
    SlotUnavailable { detail: String },
}

/// Capability interface over the external booking site.
///
/// Implementations hold their own session handle because the site models one
/// interactive user session; `authenticate` must be called once before any
/// reservation attempt. Any page-automation or HTTP backend can implement
/// this; the booking core depends on nothing else.
pub trait BookingSurface {
    fn authenticate(&mut self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Attempts to reserve `target` for `sport` with `player_count` total
    /// players. `Err(SessionFault)` means a transport or session problem,
    /// distinct from the slot simply being taken.
    fn attempt_reservation(
        &mut self,
        target: &SlotTarget,
        sport: SportType,
        player_count: u32,
    ) -> Result<ReservationOutcome, SessionFault>;
}
