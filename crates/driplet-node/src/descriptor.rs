// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Syntactic validation of recipient descriptors.
//!
//! An asset invoice has the shape
//! `rgb:utxob:<blinded-utxo>?expiry=<secs>&endpoints=<url>[,<url>...]`.
//! Validation here only checks the shape and extracts the parts the send
//! call needs; the node's own rejection remains authoritative for anything
//! the syntax cannot catch (consumed recipients, unreachable proxies).

use driplet_core::types::AssetInvoice;
use driplet_core::{DescriptorValidator, InvalidDescriptor};

const INVOICE_SCHEME: &str = "rgb:";
const RECIPIENT_PREFIX: &str = "utxob:";
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BASE58_CHARSET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Shape-only validator for asset invoices and bitcoin addresses.
pub struct SyntacticValidator;

impl DescriptorValidator for SyntacticValidator {
    fn parse_asset_invoice(&self, raw: &str) -> Result<AssetInvoice, InvalidDescriptor> {
        let raw = raw.trim();
        let rest = raw
            .strip_prefix(INVOICE_SCHEME)
            .ok_or(InvalidDescriptor::AssetInvoice)?;

        let (recipient_id, query) = match rest.split_once('?') {
            Some((head, query)) => (head, query),
            None => (rest, ""),
        };

        let blinded = recipient_id
            .strip_prefix(RECIPIENT_PREFIX)
            .ok_or(InvalidDescriptor::AssetInvoice)?;
        if blinded.len() < 20
            || blinded.len() > 90
            || !blinded.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(InvalidDescriptor::AssetInvoice);
        }

        let mut transport_endpoints = Vec::new();
        for param in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = param.split_once('=').ok_or(InvalidDescriptor::AssetInvoice)?;
            if key == "endpoints" {
                for endpoint in value.split(',').filter(|e| !e.is_empty()) {
                    if !endpoint.starts_with("rpc://") && !endpoint.starts_with("rpcs://") {
                        return Err(InvalidDescriptor::AssetInvoice);
                    }
                    transport_endpoints.push(endpoint.to_string());
                }
            }
        }
        if transport_endpoints.is_empty() {
            return Err(InvalidDescriptor::AssetInvoice);
        }

        Ok(AssetInvoice {
            recipient_id: recipient_id.to_string(),
            transport_endpoints,
        })
    }

    fn parse_btc_address(&self, raw: &str) -> Result<String, InvalidDescriptor> {
        let address = raw.trim();
        if is_bech32_address(address) || is_base58_address(address) {
            Ok(address.to_string())
        } else {
            Err(InvalidDescriptor::BtcAddress)
        }
    }
}

fn is_bech32_address(address: &str) -> bool {
    let lower = address.to_ascii_lowercase();
    // Mixed case is invalid in bech32.
    if address != lower && address != address.to_ascii_uppercase() {
        return false;
    }
    let payload = ["bc1", "tb1", "bcrt1"]
        .iter()
        .find_map(|hrp| lower.strip_prefix(hrp));
    match payload {
        Some(data) => {
            (11..=87).contains(&data.len())
                && data.chars().all(|c| BECH32_CHARSET.contains(c))
        }
        None => false,
    }
}

fn is_base58_address(address: &str) -> bool {
    if !(26..=35).contains(&address.len()) {
        return false;
    }
    let first = match address.chars().next() {
        Some(c) => c,
        None => return false,
    };
    matches!(first, '1' | '2' | '3' | 'm' | 'n')
        && address.chars().all(|c| BASE58_CHARSET.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_INVOICE: &str = "rgb:utxob:2dkSTbr8hMZKcqA3wqzAFbJm7FEeXnsWTpsc29\
                                 ?expiry=3600&endpoints=rpcs://proxy.example.com/0.2/json-rpc";

    fn validator() -> SyntacticValidator {
        SyntacticValidator
    }

    #[test]
    fn valid_invoice_parses() {
        let invoice = validator().parse_asset_invoice(VALID_INVOICE).unwrap();
        assert!(invoice.recipient_id.starts_with("utxob:"));
        assert_eq!(
            invoice.transport_endpoints,
            vec!["rpcs://proxy.example.com/0.2/json-rpc".to_string()]
        );
    }

    #[test]
    fn invoice_with_multiple_endpoints() {
        let raw = "rgb:utxob:2dkSTbr8hMZKcqA3wqzAFbJm7FEeXnsWTpsc29\
                   ?endpoints=rpc://a.example/json-rpc,rpcs://b.example/json-rpc";
        let invoice = validator().parse_asset_invoice(raw).unwrap();
        assert_eq!(invoice.transport_endpoints.len(), 2);
    }

    #[test]
    fn invoice_surrounding_whitespace_is_trimmed() {
        let raw = format!("  {VALID_INVOICE}\n");
        assert!(validator().parse_asset_invoice(&raw).is_ok());
    }

    #[test]
    fn invoice_rejects_wrong_scheme() {
        let raw = VALID_INVOICE.replacen("rgb:", "btc:", 1);
        assert_eq!(
            validator().parse_asset_invoice(&raw),
            Err(InvalidDescriptor::AssetInvoice)
        );
    }

    #[test]
    fn invoice_rejects_missing_endpoints() {
        let raw = "rgb:utxob:2dkSTbr8hMZKcqA3wqzAFbJm7FEeXnsWTpsc29?expiry=3600";
        assert!(validator().parse_asset_invoice(raw).is_err());
    }

    #[test]
    fn invoice_rejects_non_proxy_endpoint() {
        let raw = "rgb:utxob:2dkSTbr8hMZKcqA3wqzAFbJm7FEeXnsWTpsc29\
                   ?endpoints=http://evil.example";
        assert!(validator().parse_asset_invoice(raw).is_err());
    }

    #[test]
    fn invoice_rejects_short_recipient() {
        let raw = "rgb:utxob:short?endpoints=rpcs://proxy.example/json-rpc";
        assert!(validator().parse_asset_invoice(raw).is_err());
    }

    #[test]
    fn bech32_addresses_parse() {
        let validator = validator();
        for address in [
            "bcrt1qw508d6qejxtdg4y5r3zarvary0c5xw7kygt080",
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
        ] {
            assert!(validator.parse_btc_address(address).is_ok(), "{address}");
        }
    }

    #[test]
    fn legacy_addresses_parse() {
        let validator = validator();
        for address in [
            "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn",
            "2N3oefVeg6stiTb5Kh3ozCSkaqmx91FDbsm",
            "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
        ] {
            assert!(validator.parse_btc_address(address).is_ok(), "{address}");
        }
    }

    #[test]
    fn bad_addresses_are_rejected() {
        let validator = validator();
        for input in [
            "",
            "hello world",
            "bcrt1qSHORT",
            "bc1qMIXEDcaseMIXEDcaseMIXEDcase00",
            "0invalidprefix0000000000000000",
            VALID_INVOICE,
        ] {
            assert!(validator.parse_btc_address(input).is_err(), "{input}");
        }
    }
}
