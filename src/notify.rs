use std::time::Duration;

use log::{info, warn};

use crate::config::PushoverConfig;

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";
const PUSHOVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a Pushover notification with the run result.
///
/// Logs and returns on any problem instead of raising, so it is safe to call
/// from the fatal-error path too. `config = None` means notifications are
/// not set up; that is a warn, not an error.
pub fn send_pushover_message(config: Option<&PushoverConfig>, title: &str, message: &str) {
    let Some(config) = config else {
        warn!("Pushover credentials not set; skipping notification");
        return;
    };

    let result = ureq::post(PUSHOVER_URL)
        .timeout(PUSHOVER_TIMEOUT)
        .send_form(&[
            ("token", config.api_token.as_str()),
            ("user", config.user_key.as_str()),
            ("title", title),
            ("message", message),
        ]);

    match result {
        Ok(_) => info!("Pushover: message sent"),
        Err(err) => warn!("Pushover: failed to send message: {}", err),
    }
}
