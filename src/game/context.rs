//! Per-player state handed to the game
//!
//! Wallet login and on-chain balance reads happen outside the game; whatever
//! they produced arrives here and is passed in explicitly.

use std::fmt;

/// Player identity used when nobody is signed in
pub const GUEST_ADDRESS: &str = "guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerContext {
    address: String,
    balance: u64,
}

impl PlayerContext {
    #[must_use]
    pub fn new(address: impl Into<String>, balance: u64) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }

    #[must_use]
    pub fn guest() -> Self {
        Self::new(GUEST_ADDRESS, 0)
    }

    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// WGT balance as last known to the game
    #[inline]
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    pub const fn set_balance(&mut self, balance: u64) {
        self.balance = balance;
    }

    /// Wallet address shortened for display, e.g. `0x1234…abcd`
    #[must_use]
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 12 {
            return self.address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self::guest()
    }
}

impl fmt::Display for PlayerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} WGT)", self.short_address(), self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_truncates_wallets() {
        let player = PlayerContext::new("0x1234567890abcdef1234567890abcdef12345678", 5);
        assert_eq!(player.short_address(), "0x1234…5678");
        assert_eq!(player.to_string(), "0x1234…5678 (5 WGT)");
    }

    #[test]
    fn short_address_keeps_short_names() {
        let player = PlayerContext::guest();
        assert_eq!(player.short_address(), "guest");
        assert_eq!(player.balance(), 0);
    }

    #[test]
    fn balance_updates() {
        let mut player = PlayerContext::new("alice", 3);
        player.set_balance(12);
        assert_eq!(player.balance(), 12);
    }
}
