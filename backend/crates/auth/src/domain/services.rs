//! Domain Services
//!
//! Telegram Mini App `initData` signature verification.
//!
//! Reference: <https://core.telegram.org/bots/webapps#validating-data-received-via-the-mini-app>
//!
//! ```text
//! secret_key = HMAC_SHA256(key = "WebAppData", message = bot_token)
//! hash       = hex(HMAC_SHA256(key = secret_key, message = data_check_string))
//! ```
//!
//! Everything here is pure: no I/O, no clock, no logging. The caller passes
//! the current time, which keeps the freshness check testable.

use platform::crypto::{constant_time_eq, hmac_sha256, to_hex};
use thiserror::Error;

use crate::domain::value_object::init_data::{AUTH_DATE_KEY, HASH_KEY, InitData, USER_KEY};
use crate::domain::value_object::telegram_user::TelegramUser;

/// HMAC key used to derive the signing key from the bot token
const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

/// Why a payload was rejected
///
/// For diagnostics only. Callers receive an opaque [`InitDataError`] and
/// must not tell the client which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing could be parsed out of the payload
    Malformed,
    MissingHash,
    MissingUser,
    MissingAuthDate,
    /// `auth_date` is not a decimal integer
    InvalidAuthDate,
    /// Older than the freshness window
    Expired,
    SignatureMismatch,
    /// Signature is fine but the `user` JSON could not be decoded
    InvalidUser,
}

impl RejectReason {
    /// Stable identifier for structured logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::MissingHash => "missing_hash",
            Self::MissingUser => "missing_user",
            Self::MissingAuthDate => "missing_auth_date",
            Self::InvalidAuthDate => "invalid_auth_date",
            Self::Expired => "expired",
            Self::SignatureMismatch => "signature_mismatch",
            Self::InvalidUser => "invalid_user",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque verification failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid init data")]
pub struct InitDataError {
    reason: RejectReason,
}

impl InitDataError {
    const fn new(reason: RejectReason) -> Self {
        Self { reason }
    }

    pub const fn reason(&self) -> RejectReason {
        self.reason
    }
}

/// Derive the per-bot signing key
fn signing_key(bot_token: &str) -> [u8; 32] {
    hmac_sha256(WEB_APP_DATA_KEY, bot_token.as_bytes())
}

/// Lowercase hex signature of a data-check string
pub fn compute_hash(data_check_string: &str, bot_token: &str) -> String {
    let key = signing_key(bot_token);
    to_hex(&hmac_sha256(&key, data_check_string.as_bytes()))
}

/// Verify an `initData` payload and return the embedded user
///
/// ## Arguments
/// * `raw` - wire payload (`key=value&...`, values percent-encoded)
/// * `bot_token` - the bot's secret token
/// * `max_age_secs` - freshness window; a payload exactly this old is accepted
/// * `now_unix` - current time in Unix seconds
///
/// ## Returns
/// The decoded [`TelegramUser`], or an opaque [`InitDataError`]. The `user`
/// field is decoded only after the signature has been checked.
pub fn verify_init_data(
    raw: &str,
    bot_token: &str,
    max_age_secs: i64,
    now_unix: i64,
) -> Result<TelegramUser, InitDataError> {
    let mut data = InitData::parse(raw);
    if data.is_empty() {
        return Err(InitDataError::new(RejectReason::Malformed));
    }

    let received_hash = data
        .take(HASH_KEY)
        .ok_or(InitDataError::new(RejectReason::MissingHash))?;

    let user_json = data
        .get(USER_KEY)
        .ok_or(InitDataError::new(RejectReason::MissingUser))?;

    let auth_date: i64 = data
        .get(AUTH_DATE_KEY)
        .ok_or(InitDataError::new(RejectReason::MissingAuthDate))?
        .parse()
        .map_err(|_| InitDataError::new(RejectReason::InvalidAuthDate))?;

    // Replay window. Future timestamps are tolerated (clock skew).
    match now_unix.checked_sub(auth_date) {
        Some(age) if age <= max_age_secs => {}
        _ => return Err(InitDataError::new(RejectReason::Expired)),
    }

    let expected_hash = compute_hash(&data.data_check_string(), bot_token);
    if !constant_time_eq(expected_hash.as_bytes(), received_hash.as_bytes()) {
        return Err(InitDataError::new(RejectReason::SignatureMismatch));
    }

    serde_json::from_str(user_json).map_err(|_| InitDataError::new(RejectReason::InvalidUser))
}

/// Produce a correctly signed wire payload
///
/// Signs every given pair and appends `hash`. Mirrors what Telegram does;
/// used by tests and local tooling to mint `initData` for a dev bot token.
pub fn sign_init_data<K, V>(pairs: impl IntoIterator<Item = (K, V)>, bot_token: &str) -> String
where
    K: Into<String>,
    V: Into<String>,
{
    let mut data = InitData::from_pairs(pairs);
    data.take(HASH_KEY);
    let hash = compute_hash(&data.data_check_string(), bot_token);
    data.insert(HASH_KEY, hash);
    data.to_query_string()
}
