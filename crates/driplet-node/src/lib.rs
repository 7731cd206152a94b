// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RGB Lightning node client for the Driplet faucet bot.
//!
//! Implements [`driplet_core::LedgerNode`] over the node's REST API via
//! reqwest, maps node-reported errors onto the closed error vocabulary,
//! and provides the syntactic recipient descriptor validator.

pub mod client;
pub mod descriptor;
pub mod wire;

pub use client::RlnClient;
pub use descriptor::SyntacticValidator;
