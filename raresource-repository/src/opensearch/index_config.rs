//! Index configuration and mappings.
//!
//! This module defines the index settings and mappings for the gene index.
//! The mapping is a contract with the search engine; documents are not
//! checked against it when they are written.

use serde_json::{json, Value};

/// The default name of the search index.
pub const INDEX_NAME: &str = "raresource";

/// Get the index settings and mappings for the gene index.
///
/// The configuration includes:
/// - **keyword_lowercase_normalizer**: case-insensitive exact match on gene symbols
/// - **Keyword fields**: identifiers used for filtering and exact lookups
/// - **Non-indexed text**: URLs, stored but not searchable
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0,
            "analysis": {
                "normalizer": {
                    "keyword_lowercase_normalizer": {
                        "type": "custom",
                        "char_filter": [],
                        "filter": ["lowercase"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "symbol": {
                    "type": "keyword",
                    "normalizer": "keyword_lowercase_normalizer"
                },
                "description": {
                    "type": "text"
                },
                "annotation_url": {
                    "type": "text",
                    "index": false
                },
                "entrezgene": {
                    "type": "keyword"
                },
                "ensemblgene": {
                    "type": "keyword"
                },
                "hgnc": {
                    "type": "keyword"
                },
                "raresource": {
                    "properties": {
                        "disease": {
                            "properties": {
                                "name": {
                                    "type": "text"
                                },
                                "alias": {
                                    "type": "text"
                                },
                                "annotation_url": {
                                    "type": "text",
                                    "index": false
                                },
                                "cooccurrence_url": {
                                    "type": "text",
                                    "index": false
                                },
                                "gard": {
                                    "type": "keyword"
                                },
                                "omim": {
                                    "type": "keyword"
                                },
                                "orphanet": {
                                    "type": "keyword"
                                },
                                "umls": {
                                    "type": "keyword"
                                },
                                "mesh": {
                                    "type": "keyword"
                                },
                                "icd10cm": {
                                    "type": "keyword"
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
