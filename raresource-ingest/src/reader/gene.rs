//! Gene table.

use std::io::Read;
use std::path::Path;

use tracing::{info, instrument};

use super::table::{ColumnSpec, Row, TableReader};
use crate::errors::IngestError;

/// Gene symbol.
pub const GENE_INFORMATION: &str = "Gene_Information";
pub const DESCRIPTION: &str = "Description";
pub const GENE_ANNOTATIONS: &str = "Gene_Annotations";
/// Entrez gene identifier.
pub const GENE_IDS: &str = "Gene_IDs";
pub const ENSEMBL_GENE_ID: &str = "Ensembl_Gene_ID";
pub const HGNC_ID: &str = "HGNC_ID";

/// Columns kept from the gene export. Position 2 (associated diseases, also
/// available from the disease export) and 7 (links) are not used.
pub const GENE_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::text(0, GENE_INFORMATION),
    ColumnSpec::text(1, DESCRIPTION),
    ColumnSpec::text(3, GENE_ANNOTATIONS),
    ColumnSpec::text(4, GENE_IDS),
    ColumnSpec::text(5, ENSEMBL_GENE_ID),
    ColumnSpec::text(6, HGNC_ID),
];

/// A row of the gene export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRow {
    pub line: u64,
    pub symbol: String,
    pub description: String,
    pub annotation_url: String,
    pub entrez_id: String,
    pub ensembl_id: Option<String>,
    pub hgnc_id: Option<String>,
}

impl TryFrom<Row> for GeneRow {
    type Error = IngestError;

    fn try_from(mut row: Row) -> Result<Self, Self::Error> {
        Ok(Self {
            line: row.line(),
            symbol: row.take_required(GENE_INFORMATION)?,
            description: row.take_required(DESCRIPTION)?,
            annotation_url: row.take_required(GENE_ANNOTATIONS)?,
            entrez_id: row.take_required(GENE_IDS)?,
            ensembl_id: row.take(ENSEMBL_GENE_ID),
            hgnc_id: row.take(HGNC_ID),
        })
    }
}

/// Read the gene export at `path`.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_genes<P: AsRef<Path>>(path: P) -> Result<Vec<GeneRow>, IngestError> {
    let rows = TableReader::new(&GENE_COLUMNS).read_path(path)?;
    let genes = rows
        .into_iter()
        .map(GeneRow::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    info!(gene_count = genes.len(), "Loaded genes");
    Ok(genes)
}

/// Read a gene export from any reader.
pub fn parse_genes<R: Read>(reader: R) -> Result<Vec<GeneRow>, IngestError> {
    TableReader::new(&GENE_COLUMNS)
        .read(reader)?
        .into_iter()
        .map(GeneRow::try_from)
        .collect()
}
