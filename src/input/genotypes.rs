use std::collections::BTreeMap;

use crate::model::genotype::parse_genotype;

/// Merged genotype view over the upstream panel-query artifacts.
///
/// `genotypes` maps rsid -> canonical two-allele string; `non_snp` tracks
/// markers whose raw call was an indel/repeat placeholder. The two maps are
/// disjoint by construction: a marker that received a real genotype in a
/// later artifact drops out of `non_snp`.
#[derive(Debug, Clone, Default)]
pub struct GenotypeStore {
    genotypes: BTreeMap<String, String>,
    non_snp: BTreeMap<String, String>,
}

impl GenotypeStore {
    /// Folds one artifact's maps into the store. Artifacts are applied in a
    /// fixed order; on duplicate keys the last writer wins. A value in the
    /// genotype map that is not a valid two-allele SNP call is rerouted into
    /// the non-SNP map rather than dropped.
    pub fn merge(
        &mut self,
        genotypes: &BTreeMap<String, String>,
        non_snp: &BTreeMap<String, String>,
    ) {
        for (rsid, genotype) in genotypes {
            if genotype.is_empty() {
                continue;
            }
            match parse_genotype(genotype) {
                Some(canonical) => {
                    self.non_snp.remove(rsid);
                    self.genotypes.insert(rsid.clone(), canonical);
                }
                None => {
                    if !self.genotypes.contains_key(rsid) {
                        self.non_snp.insert(rsid.clone(), genotype.clone());
                    }
                }
            }
        }
        for (rsid, raw) in non_snp {
            if raw.is_empty() || self.genotypes.contains_key(rsid) {
                continue;
            }
            self.non_snp.insert(rsid.clone(), raw.clone());
        }
    }

    pub fn get(&self, rsid: &str) -> Option<&str> {
        self.genotypes.get(rsid).map(String::as_str)
    }

    pub fn contains(&self, rsid: &str) -> bool {
        self.genotypes.contains_key(rsid)
    }

    pub fn non_snp_call(&self, rsid: &str) -> Option<&str> {
        self.non_snp.get(rsid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_canonicalizes_and_overwrites() {
        let mut store = GenotypeStore::default();
        store.merge(&map(&[("rs1", "GA"), ("rs2", "CC")]), &BTreeMap::new());
        assert_eq!(store.get("rs1"), Some("AG"));
        // Later artifact wins on duplicate keys.
        store.merge(&map(&[("rs1", "AA")]), &BTreeMap::new());
        assert_eq!(store.get("rs1"), Some("AA"));
        assert_eq!(store.get("rs2"), Some("CC"));
    }

    #[test]
    fn test_empty_genotypes_skipped() {
        let mut store = GenotypeStore::default();
        store.merge(&map(&[("rs1", "")]), &BTreeMap::new());
        assert!(!store.contains("rs1"));
    }

    #[test]
    fn test_non_snp_tracked_separately() {
        let mut store = GenotypeStore::default();
        store.merge(&BTreeMap::new(), &map(&[("rs_indel", "I/D")]));
        assert!(!store.contains("rs_indel"));
        assert_eq!(store.non_snp_call("rs_indel"), Some("I/D"));
    }

    #[test]
    fn test_invalid_genotype_value_rerouted_to_non_snp() {
        let mut store = GenotypeStore::default();
        store.merge(&map(&[("rs1", "II")]), &BTreeMap::new());
        assert!(!store.contains("rs1"));
        assert_eq!(store.non_snp_call("rs1"), Some("II"));
    }

    #[test]
    fn test_real_call_displaces_non_snp_placeholder() {
        let mut store = GenotypeStore::default();
        store.merge(&BTreeMap::new(), &map(&[("rs1", "I/I")]));
        store.merge(&map(&[("rs1", "AG")]), &BTreeMap::new());
        assert_eq!(store.get("rs1"), Some("AG"));
        assert_eq!(store.non_snp_call("rs1"), None);
    }
}
