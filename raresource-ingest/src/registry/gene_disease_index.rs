//! Gene symbol to GARD identifier index.

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::reader::DiseaseRow;

/// Mapping from gene symbol to the GARD identifiers of its diseases.
///
/// Identifiers keep input order: disease row order first, then the order of
/// the gene within each row. Repeated pairs are kept.
#[derive(Debug, Clone, Default)]
pub struct GeneDiseaseIndex {
    genes: HashMap<String, Vec<String>>,
}

impl GeneDiseaseIndex {
    /// Build the index from validated disease rows.
    #[instrument(skip(rows), fields(row_count = rows.len()))]
    pub fn build(rows: &[DiseaseRow]) -> Self {
        let mut genes: HashMap<String, Vec<String>> = HashMap::new();

        for row in rows {
            for symbol in &row.associated_genes {
                genes
                    .entry(symbol.clone())
                    .or_default()
                    .push(row.gard_id.clone());
            }
        }

        info!(gene_count = genes.len(), "Built gene-disease index");
        Self { genes }
    }

    /// GARD identifiers associated with `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&[String]> {
        self.genes.get(symbol).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
