//! A type-safe pipeline for normalizing US Congress bill status data.
//!
//! This library converts parsed BILLSTATUS documents into normalized bill
//! records: deduplicated, typed legislative actions with extracted vote
//! metadata, a deterministic legislative status replayed through an explicit
//! state machine, typed titles, and a derived history summary.

pub mod classify;
pub mod config;
pub mod dedup;
pub mod error;
pub mod history;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod status;
pub mod titles;
pub mod tree;
pub mod types;

pub use classify::{ActionParser, BillContext, ClassifiedActions};
pub use config::{Config, ConfigBuilder, SortOrder};
pub use error::{Error, Result};
pub use pipeline::PipelineProcessor;
pub use record::{bill_record, bill_url, HtmlToText, RecordBuilder, TagStripper};
pub use status::{status_after_enacted, status_after_vote, BillStatus, VoteOutcome};
pub use types::{
    ActionType, BillRecord, BillType, Chamber, ClassifiedAction, History, Title, VoteResult,
    VoteType,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, SortOrder};
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::PipelineProcessor;
    pub use crate::record::{bill_record, RecordBuilder, TagStripper};
    pub use crate::status::BillStatus;
    pub use crate::types::{BillRecord, BillType, Chamber, ClassifiedAction, History};
    pub use futures::StreamExt;
}
