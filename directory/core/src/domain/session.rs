// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Wallet connection state for interactive hosts.
//!
//! There is no real wallet integration: connecting records an address and an
//! optional alias, and the demo connection uses a fixed identity. The session
//! is a plain value owned by whichever host needs it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::contact::{ContactError, WalletAddress};

pub const DEMO_WALLET_ADDRESS: &str = "0x742d35cc6634c0532925a3b8d5c8c50b7c3a5d2a";
pub const DEMO_WALLET_ALIAS: &str = "alice.eth";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No wallet connected. Run `connect` first")]
    NotConnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ConnectedWallet {
    address: WalletAddress,
    alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    wallet: Option<ConnectedWallet>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `address`, replacing any existing connection.
    pub fn connect(&mut self, address: &str, alias: Option<String>) -> Result<(), ContactError> {
        let address = WalletAddress::parse(address)?;
        let alias = alias.map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
        self.wallet = Some(ConnectedWallet { address, alias });
        Ok(())
    }

    pub fn connect_demo(&mut self) -> Result<(), ContactError> {
        self.connect(DEMO_WALLET_ADDRESS, Some(DEMO_WALLET_ALIAS.to_string()))
    }

    pub fn disconnect(&mut self) {
        self.wallet = None;
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn address(&self) -> Option<&WalletAddress> {
        self.wallet.as_ref().map(|w| &w.address)
    }

    pub fn alias(&self) -> Option<&str> {
        self.wallet.as_ref().and_then(|w| w.alias.as_deref())
    }

    /// Two-letter avatar text: alias initials, or the first two hex digits.
    pub fn initials(&self) -> Option<String> {
        let wallet = self.wallet.as_ref()?;
        let initials = match &wallet.alias {
            Some(alias) => alias.chars().take(2).collect::<String>(),
            None => wallet.address.as_str()[2..4].to_string(),
        };
        Some(initials.to_uppercase())
    }

    /// Alias when set, otherwise the shortened address.
    pub fn label(&self) -> Option<String> {
        let wallet = self.wallet.as_ref()?;
        Some(wallet.alias.clone().unwrap_or_else(|| wallet.address.short()))
    }

    pub fn require_connected(&self) -> Result<&WalletAddress, SessionError> {
        self.address().ok_or(SessionError::NotConnected)
    }
}
