//! AsyncAPI 2.x specification extractor
//!
//! Each channel yields a `subscribe` and/or `publish` operation. Transport
//! metadata and message schemas come from the
//! [`ProtocolOperationResolver`](crate::schema::ProtocolOperationResolver),
//! driven by a protocol hint taken from the configuration, the first server,
//! or the first channel binding, in that order.

mod converter;
mod parser;

pub use converter::protocol_hint;
pub use parser::AsyncApiExtractor;

/// Channel actions, in emission order
pub const CHANNEL_ACTIONS: &[&str] = &["subscribe", "publish"];
