//! # RARe-SOURCE Shared
//!
//! Document types shared by the ingest, repository and indexer crates.
//!
//! A [`GeneDocument`] is the unit submitted to the search index: the gene
//! fields at the top level plus the associated rare diseases nested under
//! `raresource.disease`.

mod document;
mod urls;

pub use document::{DiseaseAnnotation, DiseaseEntity, GeneDocument, GeneEntity, RaresourceField};
pub use urls::{cooccurrence_url, gard_id_from_url, COOCCURRENCE_URL_PREFIX, DISEASE_URL_PREFIX};
