// tests/booking_run.rs
//
// End-to-end runs of the orchestrator against a scripted in-process surface.
//
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{NaiveTime, Weekday};

use court_booker::booking::{
    BookingSurface, NoPacing, PacingPolicy, ReservationOutcome, SportType,
};
use court_booker::config::Config;
use court_booker::error::{AuthError, RunError, SessionFault};
use court_booker::ledger::BookingLedger;
use court_booker::orchestrator::run_bookings;
use court_booker::parser::SlotTarget;

/// Call log shared between the test and the surface it hands to the run.
#[derive(Default)]
struct Calls {
    authenticated: u32,
    attempts: Vec<(SlotTarget, SportType)>,
}

/// Surface whose per-(target, sport) behavior is scripted up front.
struct FakeSurface {
    calls: Rc<RefCell<Calls>>,
    /// Targets that book on Tennis directly.
    tennis_ok: Vec<SlotTarget>,
    /// Targets that book only after falling back to Free Play.
    free_play_ok: Vec<SlotTarget>,
    /// Targets whose first attempt hits a session fault.
    faulting: Vec<SlotTarget>,
    fail_auth: bool,
}

impl FakeSurface {
    fn new(calls: Rc<RefCell<Calls>>) -> Self {
        FakeSurface {
            calls,
            tennis_ok: Vec::new(),
            free_play_ok: Vec::new(),
            faulting: Vec::new(),
            fail_auth: false,
        }
    }
}

impl BookingSurface for FakeSurface {
    fn authenticate(&mut self, _email: &str, _password: &str) -> Result<(), AuthError> {
        self.calls.borrow_mut().authenticated += 1;
        if self.fail_auth {
            Err(AuthError("invalid credentials".to_string()))
        } else {
            Ok(())
        }
    }

    fn attempt_reservation(
        &mut self,
        target: &SlotTarget,
        sport: SportType,
        _player_count: u32,
    ) -> Result<ReservationOutcome, SessionFault> {
        self.calls.borrow_mut().attempts.push((*target, sport));
        if self.faulting.contains(target) {
            return Err(SessionFault("connection reset".to_string()));
        }
        let booked = match sport {
            SportType::Tennis => self.tennis_ok.contains(target),
            SportType::FreePlay => {
                self.free_play_ok.contains(target) || self.tennis_ok.contains(target)
            }
        };
        if booked {
            Ok(ReservationOutcome::Booked)
        } else {
            Ok(ReservationOutcome::SlotUnavailable {
                detail: "slot taken".to_string(),
            })
        }
    }
}

fn config(slots: &str, ledger_path: Option<PathBuf>) -> Config {
    Config {
        email: "user@example.com".to_string(),
        password: "secret".to_string(),
        booking_slots: slots.to_string(),
        ledger_path,
        extra_players: 1,
        report_path: None,
        pushover: None,
    }
}

fn target(day: Weekday, hour: u32, min: u32) -> SlotTarget {
    SlotTarget::new(day, NaiveTime::from_hms_opt(hour, min, 0).unwrap())
}

fn temp_ledger(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "court-booker-run-{}-{}.txt",
        tag,
        std::process::id()
    ))
}

#[test]
fn fallback_books_via_free_play_and_records_both_sports() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    surface.free_play_ok.push(target(Weekday::Sun, 8, 0));
    let mut pacing = NoPacing;

    let report = run_bookings(&config("Sun_8am", None), &mut surface, &mut pacing).unwrap();

    assert_eq!(report.newly_booked, vec![target(Weekday::Sun, 8, 0)]);
    assert!(report.failed.is_empty());
    let calls = calls.borrow();
    assert_eq!(
        calls.attempts,
        vec![
            (target(Weekday::Sun, 8, 0), SportType::Tennis),
            (target(Weekday::Sun, 8, 0), SportType::FreePlay),
        ]
    );
}

#[test]
fn failed_target_does_not_block_later_targets() {
    let path = temp_ledger("isolation");
    let _ = fs::remove_file(&path);

    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    // Sun_8am books on nothing; Tue_5pm books on Tennis
    surface.tennis_ok.push(target(Weekday::Tue, 17, 0));
    let mut pacing = NoPacing;

    let report = run_bookings(
        &config("Sun_8am,Tue_5pm", Some(path.clone())),
        &mut surface,
        &mut pacing,
    )
    .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].target, target(Weekday::Sun, 8, 0));
    assert!(!report.failed[0].succeeded);
    assert_eq!(report.newly_booked, vec![target(Weekday::Tue, 17, 0)]);

    // The success is in the ledger despite the earlier failure
    let ledger = BookingLedger::load(Some(path.clone())).unwrap();
    assert!(ledger.contains(&target(Weekday::Tue, 17, 0)));
    assert!(!ledger.contains(&target(Weekday::Sun, 8, 0)));

    let _ = fs::remove_file(&path);
}

#[test]
fn second_run_makes_zero_attempts_for_ledgered_targets() {
    let path = temp_ledger("idempotent");
    let _ = fs::remove_file(&path);

    let cfg = config("Sun_8am_8:30am", Some(path.clone()));

    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    surface.tennis_ok.push(target(Weekday::Sun, 8, 0));
    surface.tennis_ok.push(target(Weekday::Sun, 8, 30));
    let mut pacing = NoPacing;
    let first = run_bookings(&cfg, &mut surface, &mut pacing).unwrap();
    assert_eq!(first.newly_booked.len(), 2);

    // Fresh surface for the second run; nothing should reach it
    let second_calls = Rc::new(RefCell::new(Calls::default()));
    let mut second_surface = FakeSurface::new(second_calls.clone());
    let second = run_bookings(&cfg, &mut second_surface, &mut pacing).unwrap();

    assert_eq!(second.already_booked.len(), 2);
    assert!(second.newly_booked.is_empty());
    assert!(second.failed.is_empty());
    assert!(second_calls.borrow().attempts.is_empty());

    let _ = fs::remove_file(&path);
}

#[test]
fn invalid_spec_short_circuits_before_any_external_call() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    let mut pacing = NoPacing;

    let err = run_bookings(&config("Xyz_8am", None), &mut surface, &mut pacing).unwrap_err();

    assert!(matches!(err, RunError::Parse(_)));
    let calls = calls.borrow();
    assert_eq!(calls.authenticated, 0);
    assert!(calls.attempts.is_empty());
}

#[test]
fn auth_failure_aborts_before_any_attempt() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    surface.fail_auth = true;
    let mut pacing = NoPacing;

    let err = run_bookings(&config("Sun_8am", None), &mut surface, &mut pacing).unwrap_err();

    assert!(matches!(err, RunError::Auth(_)));
    assert!(calls.borrow().attempts.is_empty());
}

#[test]
fn session_fault_fails_one_target_and_run_continues() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    surface.faulting.push(target(Weekday::Sun, 8, 0));
    surface.tennis_ok.push(target(Weekday::Tue, 17, 0));
    let mut pacing = NoPacing;

    let report =
        run_bookings(&config("Sun_8am,Tue_5pm", None), &mut surface, &mut pacing).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0]
        .reason
        .as_deref()
        .unwrap()
        .contains("connection reset"));
    assert_eq!(report.newly_booked, vec![target(Weekday::Tue, 17, 0)]);
}

#[test]
fn duplicate_target_across_groups_books_once() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls.clone());
    surface.tennis_ok.push(target(Weekday::Sun, 8, 0));
    let mut pacing = NoPacing;

    let report = run_bookings(&config("Sun_8am,Sun_8am", None), &mut surface, &mut pacing).unwrap();

    // First occurrence books; the second is caught by the in-run ledger
    assert_eq!(report.newly_booked.len(), 1);
    assert_eq!(report.already_booked.len(), 1);
    assert_eq!(calls.borrow().attempts.len(), 1);
}

/// Pacing that counts how often it is consulted.
struct CountingPacing(u32);

impl PacingPolicy for CountingPacing {
    fn next_delay(&mut self) -> std::time::Duration {
        self.0 += 1;
        std::time::Duration::ZERO
    }
}

#[test]
fn pacing_policy_is_consulted_per_attempt() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut surface = FakeSurface::new(calls);
    surface.free_play_ok.push(target(Weekday::Sun, 8, 0));
    let mut pacing = CountingPacing(0);

    run_bookings(&config("Sun_8am", None), &mut surface, &mut pacing).unwrap();

    // One Tennis attempt plus one Free Play attempt
    assert_eq!(pacing.0, 2);
}
