// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Driplet faucet bot.
//!
//! This crate provides the domain record types, the closed error
//! vocabulary, and the trait seams (store, ledger node, notification sink,
//! descriptor validator) that the engine and its collaborators share.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{DripletError, InvalidDescriptor, NodeError};
pub use traits::{DescriptorValidator, LedgerNode, NotificationSink, Store};
pub use types::{
    AssetBalance, AssetInfo, AssetInvoice, BtcBalance, InvoiceState, Network, NodeInfo,
    Notice, Purchase, PurchaseStatus, RequestKind, RuntimeInfo, SendRequest, SendStatus,
    User,
};
