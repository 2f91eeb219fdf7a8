//! Rare disease table.
//!
//! Layout of the "Browse Rare Diseases" export and the checks every row must
//! pass before the registry is built. The checks encode hard assumptions
//! about the export; any violation aborts the load.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{info, instrument};

use super::table::{ColumnSpec, Row, TableReader};
use crate::errors::IngestError;
use raresource_shared::gard_id_from_url;

pub const RARE_DISEASE_NAME: &str = "Rare_Disease_Name";
/// Aliases separated by `//`.
pub const DISEASE_ALIASES: &str = "Disease_Aliases";
/// Gene symbols separated by `;`, with a trailing `;`.
pub const ASSOCIATED_GENES: &str = "Associated_Genes";
/// `https://raresource.nih.gov/literature/disease/<GARD_ID>`
pub const DISEASE_ANNOTATIONS: &str = "Disease_Annotations";
pub const OMIM: &str = "OMIM";
pub const ORPHANET: &str = "Orphanet";
pub const UMLS: &str = "UMLS";
pub const MESH: &str = "Mesh";
pub const ICD10CM: &str = "ICD10CM";

/// Columns kept from the disease export. Positions 9 (gene descriptions)
/// and 10 (links) are not used.
pub const DISEASE_COLUMNS: [ColumnSpec; 9] = [
    ColumnSpec::text(0, RARE_DISEASE_NAME),
    ColumnSpec::text(1, DISEASE_ALIASES),
    ColumnSpec::text(2, ASSOCIATED_GENES),
    ColumnSpec::text(3, DISEASE_ANNOTATIONS),
    ColumnSpec::text(4, OMIM),
    ColumnSpec::text(5, ORPHANET),
    ColumnSpec::text(6, UMLS),
    ColumnSpec::text(7, MESH),
    ColumnSpec::text(8, ICD10CM),
];

pub const GENE_SEPARATOR: char = ';';
pub const ALIAS_SEPARATOR: &str = "//";

/// A validated row of the disease export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRow {
    pub line: u64,
    pub name: String,
    /// Raw alias string, split when the registry entity is built.
    pub aliases: Option<String>,
    pub associated_genes: Vec<String>,
    pub annotation_url: String,
    /// GARD identifier derived from `annotation_url`.
    pub gard_id: String,
    pub omim: Option<String>,
    pub orphanet: Option<String>,
    pub umls: Option<String>,
    pub mesh: Option<String>,
    pub icd10cm: Option<String>,
}

impl TryFrom<Row> for DiseaseRow {
    type Error = IngestError;

    fn try_from(mut row: Row) -> Result<Self, Self::Error> {
        let line = row.line();

        let genes = row.take_required(ASSOCIATED_GENES)?;
        let associated_genes = split_associated_genes(&genes, line)?;

        let annotation_url = row.take_required(DISEASE_ANNOTATIONS)?;
        let gard_id = match gard_id_from_url(&annotation_url) {
            Some(id) => id.to_string(),
            None => {
                return Err(IngestError::UnexpectedUrlPrefix {
                    url: annotation_url,
                    line,
                })
            }
        };

        Ok(Self {
            line,
            name: row.take_required(RARE_DISEASE_NAME)?,
            aliases: row.take(DISEASE_ALIASES),
            associated_genes,
            annotation_url,
            gard_id,
            omim: row.take(OMIM),
            orphanet: row.take(ORPHANET),
            umls: row.take(UMLS),
            mesh: row.take(MESH),
            icd10cm: row.take(ICD10CM),
        })
    }
}

/// Split an associated genes field.
///
/// The field must end with exactly one trailing `;`, which is stripped
/// before splitting. Inner empty entries are kept as they are.
pub fn split_associated_genes(value: &str, line: u64) -> Result<Vec<String>, IngestError> {
    let Some(stripped) = value.strip_suffix(GENE_SEPARATOR) else {
        return Err(IngestError::MissingTrailingDelimiter {
            value: value.to_string(),
            line,
        });
    };

    if stripped.is_empty() {
        return Err(IngestError::EmptyGeneList { line });
    }

    Ok(stripped.split(GENE_SEPARATOR).map(str::to_string).collect())
}

/// Split an alias string on `//`, dropping the empty entry a trailing
/// separator leaves behind.
pub fn split_aliases(value: &str) -> Vec<String> {
    let mut aliases: Vec<String> = value.split(ALIAS_SEPARATOR).map(str::to_string).collect();
    if aliases.last().is_some_and(|alias| alias.is_empty()) {
        aliases.pop();
    }
    aliases
}

/// Validate a parsed batch of disease rows.
///
/// Fails on the first row whose genes field or annotation URL is malformed,
/// and on any GARD identifier seen twice.
pub fn validate_disease_rows(rows: Vec<Row>) -> Result<Vec<DiseaseRow>, IngestError> {
    let mut seen: HashMap<String, u64> = HashMap::with_capacity(rows.len());
    let mut diseases = Vec::with_capacity(rows.len());

    for row in rows {
        let disease = DiseaseRow::try_from(row)?;
        if seen.insert(disease.gard_id.clone(), disease.line).is_some() {
            return Err(IngestError::DuplicateIdentifier {
                gard: disease.gard_id,
                line: disease.line,
            });
        }
        diseases.push(disease);
    }

    Ok(diseases)
}

/// Read and validate the disease export at `path`.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_rare_diseases<P: AsRef<Path>>(path: P) -> Result<Vec<DiseaseRow>, IngestError> {
    let rows = TableReader::new(&DISEASE_COLUMNS).read_path(path)?;
    let diseases = validate_disease_rows(rows)?;

    info!(disease_count = diseases.len(), "Loaded rare diseases");
    Ok(diseases)
}

/// Read and validate a disease export from any reader.
pub fn parse_rare_diseases<R: Read>(reader: R) -> Result<Vec<DiseaseRow>, IngestError> {
    let rows = TableReader::new(&DISEASE_COLUMNS).read(reader)?;
    validate_disease_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Rare Disease Name,Disease Aliases,Associated Genes,Disease Annotations,OMIM,Orphanet,UMLS,Mesh,ICD10CM,Gene Descriptions,Links\n";

    fn parse(body: &str) -> Result<Vec<DiseaseRow>, IngestError> {
        parse_rare_diseases(format!("{}{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_parse_disease_row() {
        let diseases = parse(
            "Breast cancer,Familial breast cancer//BRCA syndrome//,BRCA1;BRCA2;,https://raresource.nih.gov/literature/disease/GARD:0001,114480,,C0346153,,Z80.3,desc,link\n",
        )
        .unwrap();

        assert_eq!(diseases.len(), 1);
        let disease = &diseases[0];
        assert_eq!(disease.name, "Breast cancer");
        assert_eq!(disease.gard_id, "GARD:0001");
        assert_eq!(disease.associated_genes, vec!["BRCA1", "BRCA2"]);
        assert_eq!(
            disease.aliases.as_deref(),
            Some("Familial breast cancer//BRCA syndrome//")
        );
        assert_eq!(disease.omim.as_deref(), Some("114480"));
        assert_eq!(disease.orphanet, None);
        assert_eq!(disease.umls.as_deref(), Some("C0346153"));
        assert_eq!(disease.mesh, None);
        assert_eq!(disease.icd10cm.as_deref(), Some("Z80.3"));
        assert_eq!(disease.line, 2);
    }

    #[test]
    fn test_gard_id_is_url_suffix() {
        let diseases = parse(
            "A,,G1;,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n\
             B,,G2;,https://raresource.nih.gov/literature/disease/GARD:0002,,,,,,,\n",
        )
        .unwrap();

        for disease in &diseases {
            assert_eq!(
                format!("https://raresource.nih.gov/literature/disease/{}", disease.gard_id),
                disease.annotation_url
            );
        }
    }

    #[test]
    fn test_missing_trailing_delimiter() {
        let result = parse(
            "A,,BRCA1;BRCA2,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n",
        );
        assert!(matches!(
            result,
            Err(IngestError::MissingTrailingDelimiter { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_gene_list() {
        let result = parse("A,,;,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n");
        assert!(matches!(result, Err(IngestError::EmptyGeneList { line: 2 })));
    }

    #[test]
    fn test_missing_gene_field() {
        let result = parse("A,,,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n");
        assert!(matches!(result, Err(IngestError::MissingField { .. })));
    }

    #[test]
    fn test_unexpected_url_prefix() {
        let result = parse("A,,G1;,https://example.org/disease/GARD:0001,,,,,,,\n");
        assert!(matches!(result, Err(IngestError::UnexpectedUrlPrefix { .. })));
    }

    #[test]
    fn test_duplicate_gard_id() {
        let result = parse(
            "A,,G1;,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n\
             B,,G2;,https://raresource.nih.gov/literature/disease/GARD:0001,,,,,,,\n",
        );
        match result {
            Err(IngestError::DuplicateIdentifier { gard, line }) => {
                assert_eq!(gard, "GARD:0001");
                assert_eq!(line, 3);
            }
            other => panic!("expected duplicate identifier error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_associated_genes_keeps_inner_entries() {
        assert_eq!(split_associated_genes("A;", 1).unwrap(), vec!["A"]);
        assert_eq!(split_associated_genes("A;B;C;", 1).unwrap(), vec!["A", "B", "C"]);
        assert_eq!(split_associated_genes("A;;B;", 1).unwrap(), vec!["A", "", "B"]);
        assert_eq!(split_associated_genes("A;;", 1).unwrap(), vec!["A", ""]);
    }

    #[test]
    fn test_split_aliases() {
        assert_eq!(split_aliases("a//b"), vec!["a", "b"]);
        assert_eq!(split_aliases("a//b//"), vec!["a", "b"]);
        assert_eq!(split_aliases("single"), vec!["single"]);
    }
}
