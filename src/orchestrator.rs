use log::{error, info, warn};

use crate::booking::{AttemptEngine, AttemptOutcome, BookingSurface, PacingPolicy};
use crate::config::Config;
use crate::error::RunError;
use crate::ledger::BookingLedger;
use crate::parser::{parse_booking_slots, SlotTarget};

/// Aggregate result of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub already_booked: Vec<SlotTarget>,
    pub newly_booked: Vec<SlotTarget>,
    pub failed: Vec<AttemptOutcome>,
    /// Bookings that stand on the site but could not be written to the
    /// ledger file; they will be re-skipped only within this run.
    pub unrecorded: Vec<SlotTarget>,
}

/// Drives one full run: ledger, parse, authenticate, then one attempt chain
/// per pending target.
///
/// A parse failure or authentication failure aborts before any booking side
/// effect; after that, per-target failures never abort the rest of the run.
pub fn run_bookings(
    config: &Config,
    surface: &mut dyn BookingSurface,
    pacing: &mut dyn PacingPolicy,
) -> Result<RunReport, RunError> {
    let mut ledger = BookingLedger::load(config.ledger_path.clone())?;
    info!("Loaded ledger with {} booked slot(s)", ledger.len());

    let targets = parse_booking_slots(&config.booking_slots)?;
    info!("Parsed {} slot target(s) from BOOKING_SLOTS", targets.len());

    surface.authenticate(&config.email, &config.password)?;

    let mut report = RunReport::default();
    let mut engine = AttemptEngine::new(surface, pacing, config.extra_players);

    for target in targets {
        if ledger.contains(&target) {
            info!("{}: already booked, skipping", target);
            report.already_booked.push(target);
            continue;
        }

        match engine.attempt(&target) {
            Ok(outcome) if outcome.succeeded => {
                // The reservation stands even if the ledger write fails;
                // report it so the operator can fix the file by hand.
                if let Err(err) = ledger.record(target) {
                    error!("{}: booked but not recorded: {}", target, err);
                    report.unrecorded.push(target);
                }
                info!("{}: booked", target);
                report.newly_booked.push(target);
            }
            Ok(outcome) => {
                warn!(
                    "{}: no availability ({})",
                    target,
                    outcome.reason.as_deref().unwrap_or("no sport had slots")
                );
                report.failed.push(outcome);
            }
            Err(fault) => {
                warn!("{}: abandoned after session fault: {}", target, fault);
                report.failed.push(AttemptOutcome {
                    target,
                    sports_tried: Vec::new(),
                    succeeded: false,
                    reason: Some(fault.to_string()),
                });
            }
        }
    }

    info!(
        "Run complete: {} newly booked, {} already booked, {} failed",
        report.newly_booked.len(),
        report.already_booked.len(),
        report.failed.len()
    );
    Ok(report)
}
