//! Reader module for the ingest.
//!
//! Parses the RARe-SOURCE CSV exports into typed rows.

mod disease;
mod gene;
mod table;

pub use disease::{
    parse_rare_diseases, read_rare_diseases, split_aliases, split_associated_genes,
    validate_disease_rows, DiseaseRow, DISEASE_COLUMNS,
};
pub use gene::{parse_genes, read_genes, GeneRow, GENE_COLUMNS};
pub use table::{ColumnSpec, ColumnType, Row, TableFormat, TableReader};
