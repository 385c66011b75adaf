use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use log::debug;

use crate::error::{AuthError, SessionFault};
use crate::parser::SlotTarget;

use super::surface::{BookingSurface, ReservationOutcome, SportType};

const DEFAULT_BASE_URL: &str = "https://app.playbypoint.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `BookingSurface` backed by the booking site's JSON endpoints.
///
/// The agent carries the session cookie set by sign-in, so one `HttpSurface`
/// is one interactive user session.
pub struct HttpSurface {
    agent: ureq::Agent,
    base_url: String,
    authenticated: bool,
}

impl HttpSurface {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build();
        HttpSurface {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: false,
        }
    }
}

impl Default for HttpSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSurface for HttpSurface {
    fn authenticate(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/users/sign_in.json", self.base_url);
        let result = self.agent.post(&url).send_json(ureq::json!({
            "user": { "email": email, "password": password }
        }));
        match result {
            Ok(_) => {
                debug!("Signed in as {}", email);
                self.authenticated = true;
                Ok(())
            }
            Err(ureq::Error::Status(401, _)) | Err(ureq::Error::Status(403, _)) => {
                Err(AuthError("invalid credentials".to_string()))
            }
            Err(err) => Err(AuthError(err.to_string())),
        }
    }

    fn attempt_reservation(
        &mut self,
        target: &SlotTarget,
        sport: SportType,
        player_count: u32,
    ) -> Result<ReservationOutcome, SessionFault> {
        if !self.authenticated {
            return Err(SessionFault("not authenticated".to_string()));
        }

        let date = next_date_for_day(target, Local::now().date_naive());
        let url = format!("{}/api/bookings", self.base_url);
        let result = self.agent.post(&url).send_json(ureq::json!({
            "date": date.format("%Y-%m-%d").to_string(),
            "start_time": target.time.format("%H:%M").to_string(),
            "sport": sport.to_string(),
            "players": player_count,
        }));

        match result {
            Ok(_) => Ok(ReservationOutcome::Booked),
            // The site answers 409/422 when the slot is taken for this sport
            Err(ureq::Error::Status(code @ (409 | 422), response)) => {
                let detail = response
                    .into_string()
                    .unwrap_or_else(|_| format!("HTTP {}", code));
                Ok(ReservationOutcome::SlotUnavailable { detail })
            }
            Err(ureq::Error::Status(code, _)) => {
                Err(SessionFault(format!("unexpected HTTP {}", code)))
            }
            Err(err) => Err(SessionFault(err.to_string())),
        }
    }
}

/// Next calendar date (today included) falling on the target's weekday.
fn next_date_for_day(target: &SlotTarget, today: NaiveDate) -> NaiveDate {
    let mut date = today;
    while date.weekday() != target.day {
        date = date.succ_opt().unwrap_or(date);
    }
    date
}
