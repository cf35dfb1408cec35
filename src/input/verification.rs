use std::collections::HashMap;

use serde::Deserialize;

/// Allele-orientation verdict for one marker against the authoritative
/// reference allele set. Built upstream; read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    ReverseComplement,
    Mismatch,
    MissingInFile,
    NonSnp,
    NonSnpMatch,
    NonSnpMismatch,
    NonSnpUnknown,
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    /// A declared mismatch invalidates any genotype-based call for the marker.
    pub fn invalidates_genotype(self) -> bool {
        matches!(self, MatchStatus::Mismatch | MatchStatus::NonSnpMismatch)
    }

    /// Orientation disagreement worth a per-marker strand caution in rows.
    pub fn needs_strand_caution(self) -> bool {
        matches!(self, MatchStatus::ReverseComplement | MatchStatus::Mismatch)
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchStatus::Match => "match",
            MatchStatus::ReverseComplement => "reverse_complement",
            MatchStatus::Mismatch => "mismatch",
            MatchStatus::MissingInFile => "missing_in_file",
            MatchStatus::NonSnp => "non_snp",
            MatchStatus::NonSnpMatch => "non_snp_match",
            MatchStatus::NonSnpMismatch => "non_snp_mismatch",
            MatchStatus::NonSnpUnknown => "non_snp_unknown",
            MatchStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationEntry {
    pub rsid: String,
    pub match_status: MatchStatus,
    #[serde(default)]
    pub ensembl_alleles: Option<String>,
    #[serde(default)]
    pub ensembl_strand: Option<i8>,
    #[serde(default)]
    pub gwas_risk_allele: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub proxy_note: Option<String>,
}

impl VerificationEntry {
    /// Parses the reference allele-string ("A/G", "A|G", or bare "AG") into
    /// the set of ACGT alleles it names.
    pub fn ensembl_allele_set(&self) -> Vec<char> {
        let Some(raw) = self.ensembl_alleles.as_deref() else {
            return Vec::new();
        };
        let cleaned = raw.trim().to_ascii_uppercase();
        let mut out: Vec<char> = if !cleaned.contains('/') && !cleaned.contains('|') {
            cleaned
                .chars()
                .filter(|c| crate::model::genotype::is_valid_allele(*c))
                .collect()
        } else {
            cleaned
                .replace('|', "/")
                .split('/')
                .filter_map(|part| {
                    let part = part.trim();
                    if part.len() == 1 {
                        part.chars().next()
                    } else {
                        None
                    }
                })
                .filter(|c| crate::model::genotype::is_valid_allele(*c))
                .collect()
        };
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// rsid-keyed view over the verification artifact.
#[derive(Debug, Clone, Default)]
pub struct VerificationFeed {
    entries: HashMap<String, VerificationEntry>,
}

impl VerificationFeed {
    pub fn from_entries(entries: Vec<VerificationEntry>) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            map.insert(entry.rsid.clone(), entry);
        }
        VerificationFeed { entries: map }
    }

    pub fn get(&self, rsid: &str) -> Option<&VerificationEntry> {
        self.entries.get(rsid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Markers flagged reverse_complement, for the limitations section.
    pub fn reverse_complement_rsids(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .entries
            .values()
            .filter(|e| e.match_status == MatchStatus::ReverseComplement)
            .map(|e| e.rsid.clone())
            .collect();
        out.sort();
        out
    }

    /// One line per strand-corrected marker for the developer appendix:
    /// reference alleles, strand, GWAS risk allele, and the upstream note.
    pub fn flip_details(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .entries
            .values()
            .filter(|e| e.match_status == MatchStatus::ReverseComplement)
            .map(|e| {
                let mut line = format!(
                    "{}: reference alleles {}",
                    e.rsid,
                    e.ensembl_alleles.as_deref().unwrap_or("?")
                );
                if let Some(strand) = e.ensembl_strand {
                    line.push_str(&format!(", strand {strand}"));
                }
                if let Some(risk) = e.gwas_risk_allele.as_deref() {
                    line.push_str(&format!(", GWAS risk allele {risk}"));
                }
                if let Some(note) = e.note.as_deref() {
                    line.push_str(&format!(" ({note})"));
                }
                line
            })
            .collect();
        out.sort();
        out
    }

    /// Tally by match status, for the developer appendix.
    pub fn status_tally(&self) -> Vec<(&'static str, usize)> {
        let mut counts: std::collections::BTreeMap<&'static str, usize> = Default::default();
        for entry in self.entries.values() {
            *counts.entry(entry.match_status.name()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rsid: &str, status: MatchStatus, alleles: Option<&str>) -> VerificationEntry {
        VerificationEntry {
            rsid: rsid.to_string(),
            match_status: status,
            ensembl_alleles: alleles.map(|s| s.to_string()),
            ensembl_strand: Some(1),
            gwas_risk_allele: None,
            note: None,
            proxy_note: None,
        }
    }

    #[test]
    fn test_match_status_deserializes_snake_case() {
        let parsed: MatchStatus = serde_json::from_str("\"reverse_complement\"").unwrap();
        assert_eq!(parsed, MatchStatus::ReverseComplement);
        let parsed: MatchStatus = serde_json::from_str("\"non_snp_mismatch\"").unwrap();
        assert_eq!(parsed, MatchStatus::NonSnpMismatch);
        // Unrecognized statuses fold into Unknown instead of failing the load.
        let parsed: MatchStatus = serde_json::from_str("\"surprise\"").unwrap();
        assert_eq!(parsed, MatchStatus::Unknown);
    }

    #[test]
    fn test_allele_set_parses_slash_pipe_and_bare() {
        assert_eq!(
            entry("rs1", MatchStatus::Match, Some("A/G")).ensembl_allele_set(),
            vec!['A', 'G']
        );
        assert_eq!(
            entry("rs1", MatchStatus::Match, Some("t|c")).ensembl_allele_set(),
            vec!['C', 'T']
        );
        assert_eq!(
            entry("rs1", MatchStatus::Match, Some("AG")).ensembl_allele_set(),
            vec!['A', 'G']
        );
        assert!(
            entry("rs1", MatchStatus::Match, Some("HGMD_MUTATION"))
                .ensembl_allele_set()
                .is_empty()
        );
    }

    #[test]
    fn test_flip_details_describe_corrected_markers() {
        let mut flipped = entry("rs2", MatchStatus::ReverseComplement, Some("A/G"));
        flipped.gwas_risk_allele = Some("A".to_string());
        flipped.note = Some("orientation differs from file build".to_string());
        let feed = VerificationFeed::from_entries(vec![
            entry("rs1", MatchStatus::Match, Some("C/T")),
            flipped,
        ]);
        let details = feed.flip_details();
        assert_eq!(details.len(), 1);
        assert!(details[0].starts_with("rs2: reference alleles A/G"));
        assert!(details[0].contains("GWAS risk allele A"));
        assert!(details[0].contains("orientation differs"));
    }

    #[test]
    fn test_feed_lookup_and_tally() {
        let feed = VerificationFeed::from_entries(vec![
            entry("rs1", MatchStatus::Match, None),
            entry("rs2", MatchStatus::ReverseComplement, None),
            entry("rs3", MatchStatus::ReverseComplement, None),
        ]);
        assert!(feed.get("rs1").is_some());
        assert!(feed.get("rs4").is_none());
        assert_eq!(feed.reverse_complement_rsids(), vec!["rs2", "rs3"]);
        let tally = feed.status_tally();
        assert!(tally.contains(&("reverse_complement", 2)));
    }
}
