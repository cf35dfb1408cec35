/// Nucleotide complement for strand-flip correction (A<->T, C<->G).
pub fn complement(allele: char) -> Option<char> {
    match allele {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

pub fn is_valid_allele(allele: char) -> bool {
    matches!(allele, 'A' | 'C' | 'G' | 'T')
}

/// Canonicalizes a raw two-allele call ("GA", "a/g") into a sorted genotype
/// string ("AG"). Returns `None` for no-calls ("0", "--") and indel/repeat
/// placeholders ("I/D", "II"); those must never enter genotype-based logic.
pub fn parse_genotype(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .to_ascii_uppercase()
        .chars()
        .filter(|c| !matches!(c, '/' | '|'))
        .collect();
    if cleaned.len() != 2 || !cleaned.chars().all(is_valid_allele) {
        return None;
    }
    Some(canonical_sort(&cleaned))
}

/// Re-sorts an already-joined genotype string into canonical ascending order.
/// Idempotent; non-genotype strings are returned unchanged.
pub fn canonical_sort(genotype: &str) -> String {
    let mut chars: Vec<char> = genotype.chars().collect();
    if chars.len() == 2 && chars.iter().all(|c| is_valid_allele(*c)) {
        chars.sort_unstable();
    }
    chars.into_iter().collect()
}

/// Direct occurrences of `allele` in a canonical genotype string.
pub fn allele_count(genotype: &str, allele: char) -> usize {
    genotype.chars().filter(|c| *c == allele).count()
}

pub fn has_allele(genotype: &str, allele: char) -> bool {
    allele_count(genotype, allele) > 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zygosity {
    Homozygous,
    Heterozygous,
    Uncertain,
}

impl Zygosity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Zygosity::Uncertain,
            1 => Zygosity::Heterozygous,
            _ => Zygosity::Homozygous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zygosity::Homozygous => "homozygous risk allele",
            Zygosity::Heterozygous => "heterozygous risk allele",
            Zygosity::Uncertain => "risk-allele status uncertain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sorts_ascending() {
        assert_eq!(parse_genotype("GA").as_deref(), Some("AG"));
        assert_eq!(parse_genotype("t/c").as_deref(), Some("CT"));
        assert_eq!(parse_genotype("AA").as_deref(), Some("AA"));
    }

    #[test]
    fn test_parse_rejects_no_calls_and_indels() {
        assert_eq!(parse_genotype("00"), None);
        assert_eq!(parse_genotype("--"), None);
        assert_eq!(parse_genotype("I/D"), None);
        assert_eq!(parse_genotype("ATA"), None);
        assert_eq!(parse_genotype("A"), None);
    }

    #[test]
    fn test_canonical_sort_idempotent() {
        assert_eq!(canonical_sort("GA"), "AG");
        assert_eq!(canonical_sort(&canonical_sort("GA")), "AG");
        assert_eq!(canonical_sort("AG"), "AG");
    }

    #[test]
    fn test_complement_pairs() {
        assert_eq!(complement('A'), Some('T'));
        assert_eq!(complement('T'), Some('A'));
        assert_eq!(complement('C'), Some('G'));
        assert_eq!(complement('G'), Some('C'));
        assert_eq!(complement('N'), None);
    }

    #[test]
    fn test_zygosity_labels() {
        assert_eq!(Zygosity::from_count(2).label(), "homozygous risk allele");
        assert_eq!(Zygosity::from_count(1).label(), "heterozygous risk allele");
        assert_eq!(Zygosity::from_count(0).label(), "risk-allele status uncertain");
    }
}
