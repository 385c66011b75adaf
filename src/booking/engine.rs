use std::thread;

use log::{debug, info};

use crate::error::SessionFault;
use crate::parser::SlotTarget;

use super::pacing::PacingPolicy;
use super::surface::{BookingSurface, ReservationOutcome, SportType};

/// What happened for one target in one run.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub target: SlotTarget,
    pub sports_tried: Vec<SportType>,
    pub succeeded: bool,
    pub reason: Option<String>,
}

/// Drives the sport-type fallback chain for single targets against one
/// authenticated booking session.
pub struct AttemptEngine<'a> {
    surface: &'a mut dyn BookingSurface,
    pacing: &'a mut dyn PacingPolicy,
    player_count: u32,
}

impl<'a> AttemptEngine<'a> {
    /// `extra_players` is the count beyond the account holder; the site is
    /// asked for `1 + extra_players` total.
    pub fn new(
        surface: &'a mut dyn BookingSurface,
        pacing: &'a mut dyn PacingPolicy,
        extra_players: u32,
    ) -> Self {
        AttemptEngine {
            surface,
            pacing,
            player_count: 1 + extra_players,
        }
    }

    /// Tries each sport in `SportType::FALLBACK_ORDER` until one books.
    ///
    /// `SlotUnavailable` is a normal negative outcome and advances the chain;
    /// a `SessionFault` propagates and abandons the rest of the chain for
    /// this target. The outcome records every sport actually tried.
    pub fn attempt(&mut self, target: &SlotTarget) -> Result<AttemptOutcome, SessionFault> {
        let mut sports_tried = Vec::new();
        let mut last_reason = None;

        for sport in SportType::FALLBACK_ORDER {
            let delay = self.pacing.next_delay();
            if !delay.is_zero() {
                debug!("Pacing: waiting {:.1}s", delay.as_secs_f64());
                thread::sleep(delay);
            }

            sports_tried.push(sport);
            match self
                .surface
                .attempt_reservation(target, sport, self.player_count)?
            {
                ReservationOutcome::Booked => {
                    info!("Booked {} as {}", target, sport);
                    return Ok(AttemptOutcome {
                        target: *target,
                        sports_tried,
                        succeeded: true,
                        reason: None,
                    });
                }
                ReservationOutcome::SlotUnavailable { detail } => {
                    info!("No {} availability for {}: {}", sport, target, detail);
                    last_reason = Some(format!("{}: {}", sport, detail));
                }
            }
        }

        Ok(AttemptOutcome {
            target: *target,
            sports_tried,
            succeeded: false,
            reason: last_reason,
        })
    }
}
