// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipient descriptor grammar validation.

use crate::error::InvalidDescriptor;
use crate::types::AssetInvoice;

/// Syntactic validation of user-supplied recipient descriptors.
///
/// Validation here is a screen, not a verdict: the node still rejects
/// semantically unusable descriptors and its rejection is authoritative.
pub trait DescriptorValidator: Send + Sync {
    /// Parses an asset invoice, extracting the blinded recipient and its
    /// transport endpoints.
    fn parse_asset_invoice(&self, raw: &str) -> Result<AssetInvoice, InvalidDescriptor>;

    /// Validates a bitcoin address, returning it in normalized form.
    fn parse_btc_address(&self, raw: &str) -> Result<String, InvalidDescriptor>;
}
