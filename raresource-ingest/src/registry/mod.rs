//! Registry module for the ingest.
//!
//! Builds the in-memory lookup structures from validated disease rows.

mod disease_registry;
mod gene_disease_index;

pub use disease_registry::{disease_entity, DiseaseRegistry};
pub use gene_disease_index::GeneDiseaseIndex;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::reader::DiseaseRow;

    /// A validated disease row for `gard` associated with `genes`.
    pub fn disease_row(gard: &str, genes: &[&str]) -> DiseaseRow {
        DiseaseRow {
            line: 2,
            name: format!("Disease {}", gard),
            aliases: None,
            associated_genes: genes.iter().map(|gene| gene.to_string()).collect(),
            annotation_url: format!("https://raresource.nih.gov/literature/disease/{}", gard),
            gard_id: gard.to_string(),
            omim: None,
            orphanet: None,
            umls: None,
            mesh: None,
            icd10cm: None,
        }
    }
}
