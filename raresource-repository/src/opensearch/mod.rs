//! OpenSearch-flavoured index configuration and bulk output.
//!
//! Nothing here talks to a cluster; the bulk body produced by
//! `NdjsonBulkSink` can be posted to the `_bulk` endpoint as is.

mod bulk;
mod index_config;

pub use bulk::NdjsonBulkSink;
pub use index_config::{get_index_settings, INDEX_NAME};
