//! `smartstock-ai`
//!
//! **Responsibility:** boundary to the generative-AI collaborator.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on the inventory store or mutate its state.
//! - It works on flat snapshots of products and movements.
//! - Every response shape coming back across this boundary is untrusted:
//!   decoders default each missing or mistyped field and assume nothing
//!   beyond the top-level JSON type.
//!
//! Failures here are non-retriable by policy: callers surface them to the
//! user and leave the store in its last-good state.

pub mod decode;
pub mod error;
pub mod provider;
pub mod snapshot;

pub use decode::{ChartPoint, ExtractedProduct, StockReport, decode_extracted_products, decode_stock_report};
pub use error::AiError;
pub use provider::{InsightProvider, LocalInsightProvider};
pub use snapshot::{MovementSnapshot, ProductSnapshot};
