//! Disease registry keyed by GARD identifier.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{info, instrument};

use crate::errors::IngestError;
use crate::reader::{split_aliases, DiseaseRow};
use raresource_shared::DiseaseEntity;

/// Build the disease entity for one validated row.
///
/// Optional identifiers and the alias list are only set when the source
/// value was present.
pub fn disease_entity(row: &DiseaseRow) -> DiseaseEntity {
    let mut entity = DiseaseEntity::new(
        row.name.clone(),
        row.annotation_url.clone(),
        row.gard_id.clone(),
    );

    entity.alias = row.aliases.as_deref().map(split_aliases);
    entity.omim = row.omim.clone();
    entity.orphanet = row.orphanet.clone();
    entity.umls = row.umls.clone();
    entity.mesh = row.mesh.clone();
    entity.icd10cm = row.icd10cm.clone();

    entity
}

/// Mapping from GARD identifier to disease entity.
///
/// Built once per run and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct DiseaseRegistry {
    diseases: HashMap<String, DiseaseEntity>,
}

impl DiseaseRegistry {
    /// Build the registry from validated disease rows.
    ///
    /// A GARD identifier seen twice is rejected instead of overwritten.
    #[instrument(skip(rows), fields(row_count = rows.len()))]
    pub fn build(rows: &[DiseaseRow]) -> Result<Self, IngestError> {
        let mut diseases = HashMap::with_capacity(rows.len());

        for row in rows {
            match diseases.entry(row.gard_id.clone()) {
                Entry::Occupied(_) => {
                    return Err(IngestError::DuplicateIdentifier {
                        gard: row.gard_id.clone(),
                        line: row.line,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(disease_entity(row));
                }
            }
        }

        info!(disease_count = diseases.len(), "Built disease registry");
        Ok(Self { diseases })
    }

    /// Look up a disease by GARD identifier.
    pub fn get(&self, gard_id: &str) -> Option<&DiseaseEntity> {
        self.diseases.get(gard_id)
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fixtures::disease_row;

    #[test]
    fn test_build_registry() {
        let rows = vec![
            disease_row("GARD:0001", &["BRCA1"]),
            disease_row("GARD:0002", &["TP53"]),
        ];

        let registry = DiseaseRegistry::build(&rows).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("GARD:0001").is_some());
        assert_eq!(registry.get("GARD:0002").unwrap().name, "Disease GARD:0002");
        assert!(registry.get("GARD:9999").is_none());
    }

    #[test]
    fn test_duplicate_gard_id_is_rejected() {
        let rows = vec![
            disease_row("GARD:0001", &["BRCA1"]),
            disease_row("GARD:0001", &["TP53"]),
        ];

        let result = DiseaseRegistry::build(&rows);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateIdentifier { ref gard, .. }) if gard == "GARD:0001"
        ));
    }

    #[test]
    fn test_disease_entity_optional_fields() {
        let mut row = disease_row("GARD:0001", &["BRCA1"]);
        let bare = disease_entity(&row);
        assert_eq!(bare.gard, "GARD:0001");
        assert!(bare.alias.is_none());
        assert!(bare.omim.is_none());

        row.aliases = Some("First//Second//".to_string());
        row.omim = Some("114480".to_string());
        row.mesh = Some("D001943".to_string());

        let entity = disease_entity(&row);
        assert_eq!(
            entity.alias,
            Some(vec!["First".to_string(), "Second".to_string()])
        );
        assert_eq!(entity.omim.as_deref(), Some("114480"));
        assert_eq!(entity.mesh.as_deref(), Some("D001943"));
        assert!(entity.orphanet.is_none());
        assert!(entity.umls.is_none());
        assert!(entity.icd10cm.is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = DiseaseRegistry::build(&[]).unwrap();
        assert!(registry.is_empty());
    }
}
