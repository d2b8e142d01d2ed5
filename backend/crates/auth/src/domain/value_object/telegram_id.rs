//! TelegramId Value Object
//!
//! The numeric identifier Telegram assigns to a user. It is the join key
//! between a verified `initData` identity and the local `users` table.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct TelegramId(i64);

impl TelegramId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TelegramId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_is_transparent() {
        let id: TelegramId = serde_json::from_str("123456789").unwrap();
        assert_eq!(id, TelegramId::new(123456789));
        assert_eq!(serde_json::to_string(&id).unwrap(), "123456789");
    }

    #[test]
    fn test_display() {
        assert_eq!(TelegramId::new(42).to_string(), "42");
    }
}
