//! Gene and disease documents as they are submitted to the search index.

use serde::{Deserialize, Serialize};

use crate::urls::cooccurrence_url;

/// A rare disease, keyed by its GARD identifier.
///
/// Optional fields are omitted from the serialized document when the source
/// value was missing; they are never written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseEntity {
    /// Disease name.
    pub name: String,
    /// RARe-SOURCE disease page.
    pub annotation_url: String,
    /// GARD identifier, the suffix of `annotation_url`.
    pub gard: String,
    /// Alternative names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
    /// OMIM identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omim: Option<String>,
    /// Orphanet identifier (ORPHAcode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphanet: Option<String>,
    /// UMLS concept identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umls: Option<String>,
    /// MeSH identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    /// ICD-10-CM code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10cm: Option<String>,
}

impl DiseaseEntity {
    /// Create a disease entity with only the required fields set.
    pub fn new(name: String, annotation_url: String, gard: String) -> Self {
        Self {
            name,
            annotation_url,
            gard,
            alias: None,
            omim: None,
            orphanet: None,
            umls: None,
            mesh: None,
            icd10cm: None,
        }
    }

    /// Copy this disease and attach the co-occurrence URL for `gene_symbol`.
    pub fn annotate_for(&self, gene_symbol: &str) -> DiseaseAnnotation {
        DiseaseAnnotation {
            cooccurrence_url: cooccurrence_url(gene_symbol, &self.gard),
            disease: self.clone(),
        }
    }
}

/// A disease as it appears inside one gene's document.
///
/// Each document owns its annotations, so the same registry entry can be
/// attached to many genes with a different co-occurrence URL each time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseAnnotation {
    #[serde(flatten)]
    pub disease: DiseaseEntity,
    /// Co-occurrence page for this gene/disease pair.
    pub cooccurrence_url: String,
}

/// A gene parsed from the genes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneEntity {
    /// Gene symbol.
    pub symbol: String,
    /// Gene description.
    pub description: String,
    /// RARe-SOURCE gene page.
    pub annotation_url: String,
    /// Entrez gene identifier.
    pub entrezgene: String,
    /// Ensembl gene identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensemblgene: Option<String>,
    /// HGNC identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgnc: Option<String>,
}

/// The `raresource` object of a gene document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaresourceField {
    pub disease: Vec<DiseaseAnnotation>,
}

/// Document stored in the search index, one per gene with at least one disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneDocument {
    /// Document identifier, equal to the Entrez gene identifier.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub gene: GeneEntity,
    pub raresource: RaresourceField,
}

impl GeneDocument {
    /// Create a document for `gene` holding the given disease annotations.
    pub fn new(gene: GeneEntity, diseases: Vec<DiseaseAnnotation>) -> Self {
        Self {
            id: gene.entrezgene.clone(),
            gene,
            raresource: RaresourceField { disease: diseases },
        }
    }

    /// The diseases nested under `raresource.disease`.
    pub fn diseases(&self) -> &[DiseaseAnnotation] {
        &self.raresource.disease
    }
}
