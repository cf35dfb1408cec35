use crate::input::verification::VerificationFeed;
use crate::model::genotype::{Zygosity, allele_count, complement};

/// Effective copies of `risk_allele` carried at `rsid`, in {0, 1, 2}.
///
/// Ordering of the checks is load-bearing:
/// 1. no genotype -> 0;
/// 2. a declared mismatch against the authoritative allele set invalidates
///    any genotype-based call -> 0 unconditionally;
/// 3. direct occurrences of the risk allele;
/// 4. strand-flip correction: count the complement when the feed says
///    reverse_complement, or when the authoritative allele set excludes the
///    risk allele but contains its complement;
/// 5. otherwise 0.
///
/// Correction is strictly per-marker: only the entry for `rsid` is consulted.
pub fn risk_allele_count(
    rsid: &str,
    genotype: Option<&str>,
    risk_allele: char,
    feed: &VerificationFeed,
) -> usize {
    let Some(genotype) = genotype else {
        return 0;
    };
    let entry = feed.get(rsid);
    if let Some(entry) = entry
        && entry.match_status.invalidates_genotype()
    {
        return 0;
    }

    let direct = allele_count(genotype, risk_allele);
    if direct > 0 {
        return direct.min(2);
    }

    let Some(comp) = complement(risk_allele) else {
        return 0;
    };
    if let Some(entry) = entry {
        let flagged_flip =
            entry.match_status == crate::input::verification::MatchStatus::ReverseComplement;
        let reference = entry.ensembl_allele_set();
        let reference_excludes_risk = !reference.is_empty()
            && !reference.contains(&risk_allele)
            && reference.contains(&comp);
        if flagged_flip || reference_excludes_risk {
            return allele_count(genotype, comp).min(2);
        }
    }
    0
}

pub fn risk_allele_present(
    rsid: &str,
    genotype: Option<&str>,
    risk_allele: char,
    feed: &VerificationFeed,
) -> bool {
    risk_allele_count(rsid, genotype, risk_allele, feed) > 0
}

pub fn zygosity(
    rsid: &str,
    genotype: Option<&str>,
    risk_allele: char,
    feed: &VerificationFeed,
) -> Zygosity {
    Zygosity::from_count(risk_allele_count(rsid, genotype, risk_allele, feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::verification::{MatchStatus, VerificationEntry};
    use pretty_assertions::assert_eq;

    fn feed_with(rsid: &str, status: MatchStatus, alleles: Option<&str>) -> VerificationFeed {
        VerificationFeed::from_entries(vec![VerificationEntry {
            rsid: rsid.to_string(),
            match_status: status,
            ensembl_alleles: alleles.map(|s| s.to_string()),
            ensembl_strand: Some(1),
            gwas_risk_allele: None,
            note: None,
            proxy_note: None,
        }])
    }

    #[test]
    fn test_absent_genotype_counts_zero() {
        let feed = VerificationFeed::default();
        assert_eq!(risk_allele_count("rs1", None, 'A', &feed), 0);
    }

    #[test]
    fn test_direct_counts() {
        let feed = VerificationFeed::default();
        assert_eq!(risk_allele_count("rs1", Some("AG"), 'A', &feed), 1);
        assert_eq!(risk_allele_count("rs1", Some("AA"), 'A', &feed), 2);
        assert_eq!(risk_allele_count("rs1", Some("GG"), 'A', &feed), 0);
    }

    #[test]
    fn test_mismatch_suppresses_even_direct_hits() {
        let feed = feed_with("rs1", MatchStatus::Mismatch, Some("A/G"));
        assert_eq!(risk_allele_count("rs1", Some("AA"), 'A', &feed), 0);
        let feed = feed_with("rs1", MatchStatus::NonSnpMismatch, None);
        assert_eq!(risk_allele_count("rs1", Some("AA"), 'A', &feed), 0);
    }

    #[test]
    fn test_reverse_complement_flag_counts_complement() {
        // Risk allele A (complement T), genotype TT, marker flagged flipped:
        // two effective copies.
        let feed = feed_with("rsX", MatchStatus::ReverseComplement, Some("A/G"));
        assert_eq!(risk_allele_count("rsX", Some("TT"), 'A', &feed), 2);
        assert_eq!(
            zygosity("rsX", Some("TT"), 'A', &feed),
            crate::model::genotype::Zygosity::Homozygous
        );
    }

    #[test]
    fn test_reference_set_exclusion_triggers_flip() {
        // Feed says "match" but the reference set has only the complement:
        // the allele-set rule still corrects the orientation.
        let feed = feed_with("rs1", MatchStatus::Match, Some("T/C"));
        assert_eq!(risk_allele_count("rs1", Some("TC"), 'A', &feed), 1);
    }

    #[test]
    fn test_no_flip_without_evidence() {
        // No feed entry at all: complement never counted.
        let feed = VerificationFeed::default();
        assert_eq!(risk_allele_count("rs1", Some("TT"), 'A', &feed), 0);
        // Entry present, reference contains the risk allele itself: no flip.
        let feed = feed_with("rs1", MatchStatus::Match, Some("A/T"));
        assert_eq!(risk_allele_count("rs1", Some("TT"), 'A', &feed), 0);
    }

    #[test]
    fn test_correction_is_local_to_the_flagged_marker() {
        let feed = feed_with("rs_flagged", MatchStatus::ReverseComplement, Some("A/G"));
        assert_eq!(risk_allele_count("rs_flagged", Some("TT"), 'A', &feed), 2);
        // A different marker with the same genotype is untouched.
        assert_eq!(risk_allele_count("rs_other", Some("TT"), 'A', &feed), 0);
    }

    #[test]
    fn test_count_always_in_range() {
        let feed = VerificationFeed::default();
        for genotype in ["AA", "AC", "CC", "GT", "TT"] {
            for allele in ['A', 'C', 'G', 'T'] {
                let count = risk_allele_count("rs1", Some(genotype), allele, &feed);
                assert!(count <= 2);
            }
        }
    }
}
