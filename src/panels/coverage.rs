use crate::input::genotypes::GenotypeStore;
use crate::panels::defs::{CRITICAL_ASSAYS, CoverageKind};

/// Coverage notes for the critical-assay list, bucketed for the report.
///
/// `missing` holds assays whose backing marker (direct or proxy) is absent
/// from this file build; an absent proxy is a missing assay, not an expected
/// limitation. `proxy` holds assays that were called but only through a
/// stand-in rsid. `limitation` holds assays genotyping arrays cannot perform
/// at all.
#[derive(Debug, Clone, Default)]
pub struct CoverageNotes {
    pub missing: Vec<&'static str>,
    pub proxy: Vec<&'static str>,
    pub limitation: Vec<&'static str>,
}

impl CoverageNotes {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.proxy.is_empty() && self.limitation.is_empty()
    }
}

pub fn coverage_notes(store: &GenotypeStore) -> CoverageNotes {
    let mut notes = CoverageNotes::default();
    for assay in &CRITICAL_ASSAYS {
        match assay.kind {
            CoverageKind::Limitation => notes.limitation.push(assay.display),
            CoverageKind::Direct => {
                if !store.contains(assay.rsid) {
                    notes.missing.push(assay.display);
                }
            }
            CoverageKind::Proxy => {
                if store.contains(assay.rsid) {
                    notes.proxy.push(assay.display);
                } else {
                    notes.missing.push(assay.display);
                }
            }
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_store_puts_absent_proxy_in_missing() {
        let notes = coverage_notes(&GenotypeStore::default());
        assert!(notes.missing.contains(&"HLA-B*58:01 (allopurinol)"));
        assert!(!notes.limitation.contains(&"HLA-B*58:01 (allopurinol)"));
    }

    #[test]
    fn test_limitations_always_listed() {
        let notes = coverage_notes(&GenotypeStore::default());
        assert!(notes.limitation.contains(&"CYP2D6 copy number (codeine, tamoxifen)"));
        assert!(notes.limitation.contains(&"GSTM1 whole-gene deletion"));
    }

    #[test]
    fn test_called_proxy_moves_to_proxy_bucket() {
        let mut store = GenotypeStore::default();
        let map: BTreeMap<String, String> =
            [("rs9263726".to_string(), "CT".to_string())].into_iter().collect();
        store.merge(&map, &BTreeMap::new());
        let notes = coverage_notes(&store);
        assert!(notes.proxy.contains(&"HLA-B*58:01 (allopurinol)"));
        assert!(!notes.missing.contains(&"HLA-B*58:01 (allopurinol)"));
    }

    #[test]
    fn test_called_direct_marker_not_reported() {
        let mut store = GenotypeStore::default();
        let map: BTreeMap<String, String> =
            [("rs6025".to_string(), "GG".to_string())].into_iter().collect();
        store.merge(&map, &BTreeMap::new());
        let notes = coverage_notes(&store);
        assert!(!notes.missing.contains(&"Factor V Leiden"));
        assert!(!notes.proxy.contains(&"Factor V Leiden"));
    }
}
