use tracing::info;

use crate::input::genotypes::GenotypeStore;
use crate::input::summary::Sex;
use crate::input::verification::VerificationFeed;
use crate::model::cards::{Category, RiskCard, RiskLevel, sort_cards};
use crate::model::genotype::Zygosity;
use crate::model::resolver::risk_allele_count;
use crate::panels::defs::{
    AMD_MARKERS, CYP2C_CLUSTER_RSID, CYP2C19_17, CYP2C19_LOF, G6PD_MARKERS, GENOTYPE_RULES,
    MTHFR_A1298C, MTHFR_C677T, NAT2_MARKERS, RISK_RULES, RiskRule, RuleMarker, SERPINA1_PIS,
    SERPINA1_PIZ, VKORC1_RSID,
};
use crate::pipeline::stage2_merge::ApoeCall;

/// The coverage-honesty fragment every warfarin-related card must carry.
/// The disclaimer validator checks for its pieces verbatim.
pub fn warfarin_panel_fragment(store: &GenotypeStore) -> String {
    let vkorc1 = presence_word(store, VKORC1_RSID);
    let cluster = presence_word(store, CYP2C_CLUSTER_RSID);
    let appropriateness = if store.contains(VKORC1_RSID) {
        "Genotype-guided dosing input is appropriate given this coverage."
    } else {
        "Interpret dosing guidance cautiously; a key warfarin marker is uncovered in this sample."
    };
    format!(
        "Warfarin panel status: VKORC1 {VKORC1_RSID} {vkorc1}; {CYP2C_CLUSTER_RSID} {cluster}. {appropriateness}"
    )
}

fn presence_word(store: &GenotypeStore, rsid: &str) -> &'static str {
    if store.contains(rsid) { "present" } else { "missing" }
}

fn marker_count(marker: &RuleMarker, store: &GenotypeStore, feed: &VerificationFeed) -> usize {
    risk_allele_count(marker.rsid, store.get(marker.rsid), marker.allele, feed)
}

fn missing_variants(markers: &[RuleMarker], store: &GenotypeStore) -> Vec<&'static str> {
    markers
        .iter()
        .filter(|m| !store.contains(m.rsid) && store.non_snp_call(m.rsid).is_none())
        .map(|m| m.variant)
        .collect()
}

fn coverage_caveat(markers: &[RuleMarker], store: &GenotypeStore) -> Option<String> {
    let missing = missing_variants(markers, store);
    if missing.is_empty() || markers.len() < 2 {
        return None;
    }
    Some(format!(
        " Coverage caveat: {} not called in this sample; the result reflects partial panel coverage.",
        missing.join(", ")
    ))
}

/// One pass of the generic evaluator over a declarative rule.
fn evaluate_rule(
    rule: &RiskRule,
    store: &GenotypeStore,
    feed: &VerificationFeed,
) -> Option<RiskCard> {
    let counts: Vec<(usize, &RuleMarker)> = rule
        .markers
        .iter()
        .map(|m| (marker_count(m, store, feed), m))
        .collect();
    let aggregate: usize = counts.iter().map(|(c, _)| c).sum();
    let level = rule.tier.level(aggregate)?;

    let mut description = rule.description.to_string();
    if rule.list_variants {
        let detected: Vec<String> = counts
            .iter()
            .filter(|(c, _)| *c > 0)
            .map(|(c, m)| format!("{} ({})", m.variant, Zygosity::from_count(*c).label()))
            .collect();
        if !detected.is_empty() {
            description.push_str(&format!(" Detected: {}.", detected.join("; ")));
        }
    }
    if rule.zygosity_note {
        description.push_str(&format!(" Status: {}.", Zygosity::from_count(aggregate).label()));
    }
    if let Some(caveat) = coverage_caveat(rule.markers, store) {
        description.push_str(&caveat);
    }

    let mut action = rule.action.to_string();
    if rule.warfarin {
        action.push(' ');
        action.push_str(&warfarin_panel_fragment(store));
    }

    Some(RiskCard {
        label: rule.label.to_string(),
        level,
        description,
        action,
        evidence: rule.evidence.to_string(),
        category: rule.category,
    })
}

/// CYP2C19 metabolizer status: loss-of-function alleles dominate; *17 rapid
/// metabolism is reported only in their absence.
fn cyp2c19_card(store: &GenotypeStore, feed: &VerificationFeed) -> Option<RiskCard> {
    let lof: usize = CYP2C19_LOF.iter().map(|m| marker_count(m, store, feed)).sum();
    let rapid = marker_count(&CYP2C19_17, store, feed);
    let (level, phenotype, consequence) = if lof >= 2 {
        (
            RiskLevel::High,
            "poor metabolizer",
            "clopidogrel is unlikely to be activated adequately",
        )
    } else if lof == 1 {
        (
            RiskLevel::Med,
            "intermediate metabolizer",
            "clopidogrel activation may be reduced",
        )
    } else if rapid >= 1 {
        (
            RiskLevel::Med,
            "rapid metabolizer",
            "exposure to CYP2C19-cleared drugs (e.g. some PPIs) may be reduced",
        )
    } else {
        return None;
    };
    let mut description =
        format!("CYP2C19 {phenotype} genotype detected; {consequence}.");
    if let Some(caveat) = coverage_caveat(&CYP2C19_LOF, store) {
        description.push_str(&caveat);
    }
    Some(RiskCard {
        label: "Clopidogrel Response (CYP2C19)".to_string(),
        level,
        description,
        action: "Alternative antiplatelet therapy per CPIC if clopidogrel is prescribed."
            .to_string(),
        evidence: "CPIC level A".to_string(),
        category: Category::Clinical,
    })
}

/// NAT2 slow-acetylator card; requires all three markers called.
fn nat2_card(store: &GenotypeStore, feed: &VerificationFeed) -> Option<RiskCard> {
    if NAT2_MARKERS.iter().any(|m| !store.contains(m.rsid)) {
        return None;
    }
    let slow: usize = NAT2_MARKERS
        .iter()
        .map(|m| usize::from(marker_count(m, store, feed) > 0))
        .sum();
    if slow < 2 {
        return None;
    }
    Some(RiskCard {
        label: "NAT2 Slow Acetylator".to_string(),
        level: RiskLevel::Med,
        description: "NAT2 slow-acetylator genotype; isoniazid, hydralazine, and sulfonamides are cleared more slowly.".to_string(),
        action: "Mention acetylator status if these drugs are ever prescribed.".to_string(),
        evidence: "PharmGKB, well replicated".to_string(),
        category: Category::Clinical,
    })
}

/// G6PD is X-linked: interpretation differs by sex, and a detected allele is
/// never silently omitted even when sex is unknown.
fn g6pd_card(store: &GenotypeStore, feed: &VerificationFeed, sex: Sex) -> Option<RiskCard> {
    let total: usize = G6PD_MARKERS.iter().map(|m| marker_count(m, store, feed)).sum();
    if total == 0 {
        return None;
    }
    let (level, description) = match sex {
        Sex::Male => (
            RiskLevel::High,
            "G6PD deficiency allele detected. In males this X-linked variant is hemizygous and typically expressed; oxidative triggers (fava beans, primaquine, dapsone, high-dose aspirin) can cause hemolysis.".to_string(),
        ),
        Sex::Female => {
            if total >= 2 {
                (
                    RiskLevel::High,
                    "Two G6PD deficiency alleles detected; deficiency is likely expressed. Oxidative triggers can cause hemolysis.".to_string(),
                )
            } else {
                (
                    RiskLevel::Med,
                    "One G6PD deficiency allele detected (carrier). X-inactivation can still produce partial deficiency in females.".to_string(),
                )
            }
        }
        Sex::Unknown => (
            RiskLevel::Med,
            "G6PD deficiency allele detected. Sex is unknown for this sample: in a male this would be hemizygous and likely expressed; in a female one copy indicates carrier status.".to_string(),
        ),
    };
    Some(RiskCard {
        label: "G6PD Deficiency".to_string(),
        level,
        description,
        action: "Confirm with an enzymatic G6PD assay before exposure to known oxidative triggers.".to_string(),
        evidence: "CPIC level A".to_string(),
        category: Category::Clinical,
    })
}

/// SERPINA1 alpha-1 antitrypsin: PiZZ is high-risk, any Z or S allele is
/// reportable.
fn serpina1_card(store: &GenotypeStore, feed: &VerificationFeed) -> Option<RiskCard> {
    let piz = marker_count(&SERPINA1_PIZ, store, feed);
    let pis = marker_count(&SERPINA1_PIS, store, feed);
    if piz == 0 && pis == 0 {
        return None;
    }
    let level = if piz >= 2 { RiskLevel::High } else { RiskLevel::Med };
    let mut detected: Vec<String> = Vec::new();
    if piz > 0 {
        detected.push(format!("PiZ ({})", Zygosity::from_count(piz).label()));
    }
    if pis > 0 {
        detected.push(format!("PiS ({})", Zygosity::from_count(pis).label()));
    }
    let mut description = format!(
        "SERPINA1 deficiency allele(s) detected: {}. Alpha-1 antitrypsin levels may be reduced; lung and liver risk depends on the full genotype.",
        detected.join("; ")
    );
    if let Some(caveat) = coverage_caveat(&[SERPINA1_PIZ, SERPINA1_PIS], store) {
        description.push_str(&caveat);
    }
    Some(RiskCard {
        label: "Alpha-1 Antitrypsin (SERPINA1)".to_string(),
        level,
        description,
        action: "Serum AAT level testing confirms; smoking avoidance is the key modifiable factor.".to_string(),
        evidence: "ACMG-recognized".to_string(),
        category: Category::Clinical,
    })
}

/// MTHFR compound heterozygosity (C677T AG together with A1298C GT).
fn mthfr_card(store: &GenotypeStore) -> Option<RiskCard> {
    if store.get(MTHFR_C677T) != Some("AG") || store.get(MTHFR_A1298C) != Some("GT") {
        return None;
    }
    Some(RiskCard {
        label: "MTHFR Compound Heterozygosity".to_string(),
        level: RiskLevel::Med,
        description: "Compound heterozygous MTHFR genotype (C677T with A1298C); folate metabolism capacity is moderately reduced.".to_string(),
        action: "A homocysteine blood test clarifies whether this is functionally relevant.".to_string(),
        evidence: "Association, moderate".to_string(),
        category: Category::Association,
    })
}

/// AMD pair (CFH + ARMS2), reported together with the detected markers
/// listed.
fn amd_card(store: &GenotypeStore, feed: &VerificationFeed) -> Option<RiskCard> {
    let detected: Vec<String> = AMD_MARKERS
        .iter()
        .filter_map(|m| {
            let count = marker_count(m, store, feed);
            (count > 0).then(|| format!("{} ({})", m.variant, Zygosity::from_count(count).label()))
        })
        .collect();
    if detected.is_empty() {
        return None;
    }
    Some(RiskCard {
        label: "Age-Related Macular Degeneration Risk".to_string(),
        level: RiskLevel::Med,
        description: format!(
            "AMD-associated variation detected: {}. Lifetime macular degeneration risk is elevated.",
            detected.join("; ")
        ),
        action: "Regular eye exams after 50; smoking avoidance and dietary factors modify risk.".to_string(),
        evidence: "GWAS, large effect".to_string(),
        category: Category::Association,
    })
}

fn apoe_card(apoe: Option<&ApoeCall>) -> Option<RiskCard> {
    let apoe = apoe?;
    let (level, description) = if apoe.carries_e4() {
        (
            RiskLevel::Med,
            format!(
                "APOE genotype {} includes an e4 allele, associated with elevated late-onset Alzheimer's and cardiovascular risk.",
                apoe.label
            ),
        )
    } else {
        (
            RiskLevel::Neutral,
            format!("APOE genotype {}; no e4 allele detected.", apoe.label),
        )
    };
    Some(RiskCard {
        label: "APOE Genotype".to_string(),
        level,
        description,
        action: "APOE is probabilistic, not diagnostic; discuss with a genetic counselor before acting on it.".to_string(),
        evidence: "GWAS + clinical, well established".to_string(),
        category: Category::Association,
    })
}

/// Stage 3: evaluates every rule and returns the severity-sorted card list.
pub fn build_risk_cards(
    store: &GenotypeStore,
    feed: &VerificationFeed,
    sex: Sex,
    apoe: Option<&ApoeCall>,
) -> Vec<RiskCard> {
    let mut cards: Vec<RiskCard> = Vec::new();
    for rule in &RISK_RULES {
        if let Some(card) = evaluate_rule(rule, store, feed) {
            cards.push(card);
        }
    }
    cards.extend(cyp2c19_card(store, feed));
    cards.extend(nat2_card(store, feed));
    cards.extend(g6pd_card(store, feed, sex));
    cards.extend(serpina1_card(store, feed));
    cards.extend(mthfr_card(store));
    cards.extend(amd_card(store, feed));
    for rule in &GENOTYPE_RULES {
        if store.get(rule.rsid) == Some(rule.genotype) {
            cards.push(RiskCard {
                label: rule.label.to_string(),
                level: rule.level,
                description: rule.description.to_string(),
                action: rule.action.to_string(),
                evidence: rule.evidence.to_string(),
                category: Category::Association,
            });
        }
    }
    cards.extend(apoe_card(apoe));
    sort_cards(&mut cards);
    info!(cards = cards.len(), "built risk cards");
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store_with(pairs: &[(&str, &str)]) -> GenotypeStore {
        let mut store = GenotypeStore::default();
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        store.merge(&map, &BTreeMap::new());
        store
    }

    fn find<'a>(cards: &'a [RiskCard], fragment: &str) -> Option<&'a RiskCard> {
        cards.iter().find(|c| c.label.contains(fragment))
    }

    #[test]
    fn test_dpyd_homozygous_high_card() {
        // rs67376798 TT with no verification entry: direct count, high card,
        // homozygous wording.
        let store = store_with(&[("rs67376798", "TT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        let card = find(&cards, "Fluoropyrimidine Toxicity").unwrap();
        assert_eq!(card.level, RiskLevel::High);
        assert!(card.description.contains("homozygous risk allele"));
    }

    #[test]
    fn test_compound_rule_coverage_caveat() {
        let store = store_with(&[("rs1799853", "CT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        let card = find(&cards, "CYP2C9").unwrap();
        assert_eq!(card.level, RiskLevel::Med);
        assert!(card.description.contains("Coverage caveat"));
        assert!(card.description.contains("CYP2C9*3"));
    }

    #[test]
    fn test_cyp2c9_two_alleles_high() {
        let store = store_with(&[("rs1799853", "TT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert_eq!(find(&cards, "CYP2C9").unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_warfarin_cards_carry_panel_fragment() {
        let store = store_with(&[("rs9923231", "CT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        let card = find(&cards, "Warfarin Sensitivity").unwrap();
        let text = card.combined_text();
        assert!(text.contains("warfarin panel status:"));
        assert!(text.contains("vkorc1"));
        assert!(text.contains("present"));
        assert!(text.contains("missing")); // rs12777823 absent from store
    }

    #[test]
    fn test_cyp2c19_lof_beats_rapid() {
        let store = store_with(&[("rs4244285", "AG"), ("rs12248560", "TT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        let card = find(&cards, "CYP2C19").unwrap();
        assert!(card.description.contains("intermediate metabolizer"));
        assert_eq!(card.level, RiskLevel::Med);
    }

    #[test]
    fn test_cyp2c19_rapid_only() {
        let store = store_with(&[
            ("rs4244285", "GG"),
            ("rs4986893", "GG"),
            ("rs12248560", "CT"),
        ]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert!(
            find(&cards, "CYP2C19")
                .unwrap()
                .description
                .contains("rapid metabolizer")
        );
    }

    #[test]
    fn test_nat2_missing_marker_suppresses_card() {
        let store = store_with(&[("rs1801280", "CC"), ("rs1799930", "AA")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert!(find(&cards, "NAT2").is_none());
    }

    #[test]
    fn test_g6pd_sex_dependent_never_omitted() {
        let store = store_with(&[("rs1050828", "CT")]);
        let feed = VerificationFeed::default();
        let male = build_risk_cards(&store, &feed, Sex::Male, None);
        assert_eq!(find(&male, "G6PD").unwrap().level, RiskLevel::High);
        let female = build_risk_cards(&store, &feed, Sex::Female, None);
        assert_eq!(find(&female, "G6PD").unwrap().level, RiskLevel::Med);
        let unknown = build_risk_cards(&store, &feed, Sex::Unknown, None);
        let card = find(&unknown, "G6PD").unwrap();
        assert_eq!(card.level, RiskLevel::Med);
        assert!(card.description.contains("Sex is unknown"));
    }

    #[test]
    fn test_sickle_carrier_vs_disease() {
        let store = store_with(&[("rs334", "AT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert_eq!(find(&cards, "Sickle Cell").unwrap().level, RiskLevel::Med);
        let store = store_with(&[("rs334", "TT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert_eq!(find(&cards, "Sickle Cell").unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_protective_9p21_card_is_low() {
        let store = store_with(&[("rs1333049", "GG")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert_eq!(find(&cards, "9p21").unwrap().level, RiskLevel::Low);
    }

    #[test]
    fn test_mthfr_compound_requires_both_genotypes() {
        let store = store_with(&[("rs1801133", "AG"), ("rs1801131", "GT")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert!(find(&cards, "MTHFR").is_some());
        let store = store_with(&[("rs1801133", "AG"), ("rs1801131", "GG")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        assert!(find(&cards, "MTHFR").is_none());
    }

    #[test]
    fn test_cards_sorted_high_first() {
        let store = store_with(&[("rs6025", "AG"), ("rs2108622", "CT"), ("rs1333049", "GG")]);
        let cards = build_risk_cards(&store, &VerificationFeed::default(), Sex::Unknown, None);
        let ranks: Vec<u8> = cards.iter().map(|c| c.level.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_empty_store_yields_no_cards() {
        let cards = build_risk_cards(
            &GenotypeStore::default(),
            &VerificationFeed::default(),
            Sex::Unknown,
            None,
        );
        assert!(cards.is_empty());
    }

    #[test]
    fn test_apoe_e4_card() {
        let apoe = ApoeCall {
            genotype_key: "CT|CC".to_string(),
            label: "APOE e3/e4".to_string(),
        };
        let cards = build_risk_cards(
            &GenotypeStore::default(),
            &VerificationFeed::default(),
            Sex::Unknown,
            Some(&apoe),
        );
        let card = find(&cards, "APOE").unwrap();
        assert_eq!(card.level, RiskLevel::Med);
    }
}
