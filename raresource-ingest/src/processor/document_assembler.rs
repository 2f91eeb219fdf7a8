//! Document assembler implementation.
//!
//! Joins gene entities with the diseases the index associates them with.

use tracing::debug;

use crate::reader::GeneRow;
use crate::registry::{DiseaseRegistry, GeneDiseaseIndex};
use raresource_shared::{DiseaseAnnotation, GeneDocument, GeneEntity};

/// Build the gene entity for one row. Ensembl and HGNC identifiers are only
/// set when present in the source.
pub fn gene_entity(row: GeneRow) -> GeneEntity {
    GeneEntity {
        symbol: row.symbol,
        description: row.description,
        annotation_url: row.annotation_url,
        entrezgene: row.entrez_id,
        ensemblgene: row.ensembl_id,
        hgnc: row.hgnc_id,
    }
}

/// Assembler that turns gene entities into search documents.
///
/// The assembler is responsible for:
/// - Resolving a gene's GARD identifiers against the registry
/// - Copying each resolved disease and attaching its co-occurrence URL
/// - Skipping genes that end up with no diseases
pub struct DocumentAssembler {
    registry: DiseaseRegistry,
    index: GeneDiseaseIndex,
}

impl DocumentAssembler {
    /// Create a new assembler over a built registry and index.
    pub fn new(registry: DiseaseRegistry, index: GeneDiseaseIndex) -> Self {
        Self { registry, index }
    }

    /// Diseases documents are resolved against.
    pub fn registry(&self) -> &DiseaseRegistry {
        &self.registry
    }

    /// Gene symbol to GARD identifier lists.
    pub fn index(&self) -> &GeneDiseaseIndex {
        &self.index
    }

    /// Assemble the document for one gene.
    ///
    /// # Returns
    ///
    /// * `Some(GeneDocument)` - The gene has at least one resolvable disease
    /// * `None` - The gene is not in the index, or none of its GARD
    ///   identifiers are in the registry
    pub fn assemble(&self, gene: GeneEntity) -> Option<GeneDocument> {
        let Some(gard_ids) = self.index.get(&gene.symbol) else {
            debug!(symbol = %gene.symbol, "Skipping gene with no associated diseases");
            return None;
        };

        let diseases: Vec<DiseaseAnnotation> = gard_ids
            .iter()
            .filter_map(|gard_id| match self.registry.get(gard_id) {
                Some(disease) => Some(disease.annotate_for(&gene.symbol)),
                None => {
                    debug!(
                        symbol = %gene.symbol,
                        gard = %gard_id,
                        "Dropping unknown GARD identifier"
                    );
                    None
                }
            })
            .collect();

        if diseases.is_empty() {
            debug!(symbol = %gene.symbol, "Skipping gene with no resolvable diseases");
            return None;
        }

        Some(GeneDocument::new(gene, diseases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::DiseaseRow;
    use crate::registry::fixtures::disease_row;

    fn gene_row(symbol: &str, entrez: &str) -> GeneRow {
        GeneRow {
            line: 2,
            symbol: symbol.to_string(),
            description: format!("{} description", symbol),
            annotation_url: format!("https://raresource.nih.gov/literature/gene/{}", symbol),
            entrez_id: entrez.to_string(),
            ensembl_id: None,
            hgnc_id: None,
        }
    }

    fn assembler(rows: &[DiseaseRow]) -> DocumentAssembler {
        DocumentAssembler::new(
            DiseaseRegistry::build(rows).unwrap(),
            GeneDiseaseIndex::build(rows),
        )
    }

    #[test]
    fn test_gene_entity_optional_fields() {
        let bare = gene_entity(gene_row("TP53", "7157"));
        assert!(bare.ensemblgene.is_none());
        assert!(bare.hgnc.is_none());

        let mut row = gene_row("TP53", "7157");
        row.ensembl_id = Some("ENSG00000141510".to_string());
        let entity = gene_entity(row);
        assert_eq!(entity.ensemblgene.as_deref(), Some("ENSG00000141510"));
        assert!(entity.hgnc.is_none());
        assert_eq!(entity.entrezgene, "7157");
    }

    #[test]
    fn test_assemble_document() {
        let assembler = assembler(&[disease_row("GARD:0001", &["BRCA1", "BRCA2"])]);

        let doc = assembler
            .assemble(gene_entity(gene_row("BRCA1", "672")))
            .unwrap();

        assert_eq!(doc.id, "672");
        assert_eq!(doc.gene.symbol, "BRCA1");
        assert_eq!(doc.diseases().len(), 1);
        assert_eq!(doc.diseases()[0].disease.gard, "GARD:0001");
        assert_eq!(
            doc.diseases()[0].cooccurrence_url,
            "https://raresource.nih.gov/literature/cooccurrence/BRCA1/GARD:0001"
        );
    }

    #[test]
    fn test_gene_without_association_is_skipped() {
        let assembler = assembler(&[disease_row("GARD:0001", &["BRCA1"])]);
        assert!(assembler
            .assemble(gene_entity(gene_row("TP53", "7157")))
            .is_none());
    }

    #[test]
    fn test_unresolvable_diseases_are_dropped() {
        let rows = vec![disease_row("GARD:0001", &["BRCA1"])];
        let mut extra = disease_row("GARD:0404", &["BRCA1", "TP53"]);
        extra.line = 3;

        // Index knows GARD:0404, registry does not.
        let mut index_rows = rows.clone();
        index_rows.push(extra);
        let assembler = DocumentAssembler::new(
            DiseaseRegistry::build(&rows).unwrap(),
            GeneDiseaseIndex::build(&index_rows),
        );

        let doc = assembler
            .assemble(gene_entity(gene_row("BRCA1", "672")))
            .unwrap();
        assert_eq!(doc.diseases().len(), 1);
        assert_eq!(doc.diseases()[0].disease.gard, "GARD:0001");

        assert!(assembler
            .assemble(gene_entity(gene_row("TP53", "7157")))
            .is_none());
    }

    #[test]
    fn test_documents_own_their_disease_copies() {
        let assembler = assembler(&[disease_row("GARD:0001", &["BRCA1", "BRCA2"])]);

        let mut first = assembler
            .assemble(gene_entity(gene_row("BRCA1", "672")))
            .unwrap();
        let second = assembler
            .assemble(gene_entity(gene_row("BRCA2", "675")))
            .unwrap();

        first.raresource.disease[0].disease.name = "changed".to_string();
        first.raresource.disease[0].disease.omim = Some("000000".to_string());

        let registered = assembler.registry().get("GARD:0001").unwrap();
        assert_eq!(registered.name, "Disease GARD:0001");
        assert!(registered.omim.is_none());
        assert_eq!(second.diseases()[0].disease.name, "Disease GARD:0001");
        assert_eq!(
            second.diseases()[0].cooccurrence_url,
            "https://raresource.nih.gov/literature/cooccurrence/BRCA2/GARD:0001"
        );
    }

    #[test]
    fn test_duplicate_pairs_are_kept() {
        let assembler = assembler(&[disease_row("GARD:0001", &["BRCA1", "BRCA1"])]);

        let doc = assembler
            .assemble(gene_entity(gene_row("BRCA1", "672")))
            .unwrap();
        assert_eq!(doc.diseases().len(), 2);
        assert_eq!(assembler.index().get("BRCA1").unwrap().len(), 2);
    }
}
