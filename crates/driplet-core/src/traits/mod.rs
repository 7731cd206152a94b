// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between the engine and its collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility so
//! the engine can hold `Arc<dyn ...>` handles and tests can substitute
//! in-process fakes.

pub mod node;
pub mod notify;
pub mod store;
pub mod validate;

pub use node::LedgerNode;
pub use notify::NotificationSink;
pub use store::Store;
pub use validate::DescriptorValidator;
