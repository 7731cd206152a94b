// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MarkdownV2 message catalogue.
//!
//! Static text is written pre-escaped; dynamic values either sit inside
//! inline code spans (where Telegram requires no escaping) or go through
//! [`escape`]. The today/tomorrow phrasing of rate-limit replies lives
//! here: the engine hands over the raw retry timestamp and presentation
//! is the transport's job.

use chrono::{DateTime, Datelike, Utc};

use driplet_core::types::{Notice, RequestKind, RuntimeInfo};

pub const START_CMD: &str = "start";
pub const HELP_CMD: &str = "help";
pub const GETASSET_CMD: &str = "getasset";
pub const GETBTC_CMD: &str = "getbtc";
pub const GETINVOICE_CMD: &str = "getinvoice";
pub const GETNODEINFO_CMD: &str = "getnodeinfo";

/// Characters Telegram requires escaped in MarkdownV2 outside code spans.
const SPECIAL_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes a dynamic value for MarkdownV2.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders engine notices into MarkdownV2, parameterized by the runtime
/// facts resolved at startup.
pub struct Renderer {
    info: RuntimeInfo,
    asset_amount: u64,
    sat_amount: u64,
}

impl Renderer {
    pub fn new(info: RuntimeInfo, asset_amount: u64, sat_amount: u64) -> Self {
        Self {
            info,
            asset_amount,
            sat_amount,
        }
    }

    pub fn render(&self, notice: &Notice) -> String {
        match notice {
            Notice::Welcome => format!(
                "⚡️ Welcome to the {} faucet\\! ⚡️\n\n{}",
                escape(&self.info.asset_ticker),
                self.use_help()
            ),
            Notice::AskAssetInvoice => {
                "Please give me an RGB invoice to send some assets\\.".to_string()
            }
            Notice::AskBtcAddress => {
                "Please give me an address where to send some bitcoins\\.".to_string()
            }
            Notice::RateLimited { kind, retry_after } => {
                let what = match kind {
                    RequestKind::Asset => "assets",
                    RequestKind::Btc => "BTC",
                };
                format!(
                    "You requested {what} too many times in the past 24 hours\\. \
                     You can try again {}\\.",
                    escape(&retry_phrase(Utc::now(), *retry_after))
                )
            }
            Notice::InvalidAssetInvoice => "This is not a valid RGB invoice\\.".to_string(),
            Notice::InvalidBtcAddress => "This is not a valid bitcoin address\\.".to_string(),
            Notice::UnrecognizedInput => {
                "This is neither a valid RGB invoice nor a valid bitcoin address\\."
                    .to_string()
            }
            Notice::AssetInvoiceAlreadyUsed => {
                "This RGB invoice has already been used, please send another one\\."
                    .to_string()
            }
            Notice::InvalidTransportEndpoints => {
                "This is not a valid RGB invoice\\. The embedded transport endpoints \
                 are invalid or not supported\\."
                    .to_string()
            }
            Notice::SendingAsset => format!(
                "I'm now sending {} {}\\.\n\nThis may take a while\\.",
                self.asset_amount,
                escape(&self.info.asset_ticker)
            ),
            Notice::SendingBtc => format!("I'm now sending {} sats\\.", self.sat_amount),
            Notice::AssetSent { txid } => format!(
                "I have sent you {} {} with TXID:\n`{}`\n\n\
                 Don't forget to refresh your wallet's transfers to complete the \
                 asset receiving process \\(multiple refreshes may be needed for the \
                 transfer to get to the settled status\\)\\.\n\n\
                 Once the transfer has settled you can open a channel with\n`{}`\nusing\n\
                 `{}` \\(`{}`\\)\nas the RGB asset",
                self.asset_amount,
                escape(&self.info.asset_ticker),
                txid,
                self.info.node_uri,
                self.info.asset_ticker,
                self.info.asset_id,
            ),
            Notice::BtcSent { txid } => {
                format!("I have sent you {} sats with TXID:\n`{}`", self.sat_amount, txid)
            }
            Notice::InvoiceIssued { invoice } => format!(
                "Here's your invoice:\n`{invoice}`\n\n\
                 Once the payment will be detected I will send you a nice sticker\\.\n\n\
                 Make sure the channel is usable \\(by checking the channel management \
                 page\\) before attempting the payment\\."
            ),
            Notice::InvoicePending { invoice } => format!(
                "There's already a pending invoice:\n`{invoice}`\n\n\
                 If you haven't paid it yet, please do it, otherwise please wait for \
                 the payment to be detected\\."
            ),
            Notice::InvoicePaid => {
                "LN payment received\\. Here's your sticker, congrats\\!".to_string()
            }
            Notice::InvoiceExpired => format!(
                "Invoice has expired\\. Use /{GETINVOICE_CMD} to request a new one\\."
            ),
            Notice::SomethingWentWrong => {
                "Oops\\! Something went wrong\\.\n\n\
                 The issue has been reported\\. Try again later\\."
                    .to_string()
            }
            Notice::Operator { text } => escape(text),
        }
    }

    pub fn help(&self) -> String {
        format!(
            "This bot distributes testnet {ticker} and bitcoin so you can try RGB \
             payments over LN\\.\n\n\
             Features:\n\
             1\\. get on\\-chain bitcoins\n\
             2\\. get on\\-chain RGB assets\n\
             3\\. pay an RGB LN invoice to simulate the purchase of a virtual item\n\n\
             How to test an RGB LN payment:\n\
             1\\. request on\\-chain bitcoins with the /{getbtc} command\n\
             2\\. request on\\-chain assets with the /{getasset} command\n\
             3\\. open an RGB LN channel with the received asset towards the bot's \
             LN node\\. Use /{getnodeinfo} to get the necessary info\n\
             4\\. request an RGB LN invoice with the /{getinvoice} command\n\
             5\\. pay the invoice and wait for feedback from the bot",
            ticker = escape(&self.info.asset_ticker),
            getbtc = GETBTC_CMD,
            getasset = GETASSET_CMD,
            getnodeinfo = GETNODEINFO_CMD,
            getinvoice = GETINVOICE_CMD,
        )
    }

    pub fn node_info(&self) -> String {
        format!(
            "Node URI:\n`{}`\n\nRGB asset ID:\n`{}`\n\nRGB asset ticker:\n`{}`",
            self.info.node_uri, self.info.asset_id, self.info.asset_ticker,
        )
    }

    pub fn unknown_command(&self) -> String {
        format!("Sorry, I don't understand this command 😕\n\n{}", self.use_help())
    }

    fn use_help(&self) -> String {
        format!("Use /{HELP_CMD} for info on what you can do with this bot\\.")
    }
}

/// "today after HH:MM:SS" or "tomorrow after HH:MM:SS", depending on
/// whether the retry moment falls on a different weekday than now.
fn retry_phrase(now: DateTime<Utc>, retry_after: DateTime<Utc>) -> String {
    let day = if now.weekday() == retry_after.weekday() {
        "today"
    } else {
        "tomorrow"
    };
    format!("{day} after {}", retry_after.format("%H:%M:%S UTC"))
}
