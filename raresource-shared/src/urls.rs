//! RARe-SOURCE URL formats.

/// Every disease annotation URL starts with this prefix; the remainder is the GARD identifier.
pub const DISEASE_URL_PREFIX: &str = "https://raresource.nih.gov/literature/disease/";

/// Base of the gene/disease co-occurrence page.
pub const COOCCURRENCE_URL_PREFIX: &str = "https://raresource.nih.gov/literature/cooccurrence/";

/// Extract the GARD identifier from a disease annotation URL.
///
/// Returns `None` when the URL does not carry the expected prefix.
pub fn gard_id_from_url(annotation_url: &str) -> Option<&str> {
    annotation_url.strip_prefix(DISEASE_URL_PREFIX)
}

/// Build the co-occurrence URL for a gene/disease pair.
pub fn cooccurrence_url(gene_symbol: &str, gard_id: &str) -> String {
    format!("{}{}/{}", COOCCURRENCE_URL_PREFIX, gene_symbol, gard_id)
}
