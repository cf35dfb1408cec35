//! Declarative marker tables. One generic evaluator in the pipeline walks
//! `RISK_RULES`; rules whose shape does not fit the descriptor (sex-linked,
//! compound-genotype, all-markers-required) live as dedicated functions next
//! to the evaluator. Keeping the tables here keeps new rules additive.

use crate::model::cards::{Category, RiskLevel};

#[derive(Debug, Clone, Copy)]
pub struct RuleMarker {
    pub rsid: &'static str,
    pub allele: char,
    /// Star-allele or variant name used in coverage caveats and per-variant
    /// descriptions.
    pub variant: &'static str,
}

/// Aggregate risk-allele count -> severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 1 copy -> med, 2+ -> high.
    Tiered,
    /// Any copy -> med.
    FixedMed,
    /// Any copy -> high.
    FixedHigh,
}

impl Tier {
    pub fn level(self, count: usize) -> Option<RiskLevel> {
        if count == 0 {
            return None;
        }
        Some(match self {
            Tier::Tiered => {
                if count >= 2 {
                    RiskLevel::High
                } else {
                    RiskLevel::Med
                }
            }
            Tier::FixedMed => RiskLevel::Med,
            Tier::FixedHigh => RiskLevel::High,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub label: &'static str,
    pub markers: &'static [RuleMarker],
    pub tier: Tier,
    pub category: Category,
    pub evidence: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    /// Appends the VKORC1/rs12777823 panel-status fragment to the action.
    pub warfarin: bool,
    /// Lists each detected marker with its zygosity in the description.
    pub list_variants: bool,
    /// Appends the zygosity of the aggregate count to the description.
    pub zygosity_note: bool,
}

pub const VKORC1_RSID: &str = "rs9923231";
pub const CYP2C_CLUSTER_RSID: &str = "rs12777823";
pub const SICKLE_RSID: &str = "rs334";

pub const CYP2C9_MARKERS: [RuleMarker; 5] = [
    RuleMarker { rsid: "rs1799853", allele: 'T', variant: "CYP2C9*2" },
    RuleMarker { rsid: "rs1057910", allele: 'C', variant: "CYP2C9*3" },
    RuleMarker { rsid: "rs28371686", allele: 'C', variant: "CYP2C9*5" },
    RuleMarker { rsid: "rs7900194", allele: 'A', variant: "CYP2C9*8" },
    RuleMarker { rsid: "rs28371685", allele: 'T', variant: "CYP2C9*11" },
];

pub const DPYD_MARKERS: [RuleMarker; 5] = [
    RuleMarker { rsid: "rs3918290", allele: 'A', variant: "DPYD*2A" },
    RuleMarker { rsid: "rs67376798", allele: 'T', variant: "DPYD c.2846A>T" },
    RuleMarker { rsid: "rs55886062", allele: 'G', variant: "DPYD c.1679T>G" },
    RuleMarker { rsid: "rs56038477", allele: 'A', variant: "DPYD HapB3 (exonic tag)" },
    RuleMarker { rsid: "rs75017182", allele: 'G', variant: "DPYD HapB3" },
];

pub const TPMT_NUDT15_MARKERS: [RuleMarker; 3] = [
    RuleMarker { rsid: "rs1800460", allele: 'A', variant: "TPMT*3B" },
    RuleMarker { rsid: "rs1142345", allele: 'G', variant: "TPMT*3C" },
    RuleMarker { rsid: "rs116855232", allele: 'T', variant: "NUDT15 c.415C>T" },
];

pub const SLCO1B1_MARKER: RuleMarker =
    RuleMarker { rsid: "rs4149056", allele: 'C', variant: "SLCO1B1*5" };
pub const CYP3A5_MARKER: RuleMarker =
    RuleMarker { rsid: "rs776746", allele: 'A', variant: "CYP3A5*1 (expresser)" };
pub const UGT1A1_28_MARKER: RuleMarker =
    RuleMarker { rsid: "rs887829", allele: 'T', variant: "UGT1A1*28 (proxy)" };
pub const HLA_B5701_MARKER: RuleMarker =
    RuleMarker { rsid: "rs2395029", allele: 'G', variant: "HLA-B*57:01 (HCP5 proxy)" };

/// Rules the generic evaluator handles directly. CYP2C19, NAT2, G6PD,
/// SERPINA1, APOE, and the exact-genotype association rules are evaluated by
/// dedicated functions.
pub const RISK_RULES: [RiskRule; 20] = [
    RiskRule {
        label: "CYP2C9 Reduced Function (warfarin, NSAIDs)",
        markers: &CYP2C9_MARKERS,
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "Decreased-function CYP2C9 alleles detected. Metabolism of warfarin, phenytoin, and some NSAIDs may be reduced.",
        action: "Discuss CYP2C9-guided dosing with a clinician before starting affected drugs.",
        warfarin: true,
        list_variants: true,
        zygosity_note: false,
    },
    RiskRule {
        label: "Statin Myopathy Risk (SLCO1B1)",
        markers: &[SLCO1B1_MARKER],
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "SLCO1B1 decreased transporter function detected; simvastatin exposure and myopathy risk are elevated.",
        action: "Prefer lower simvastatin doses or an alternative statin per CPIC guidance.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Warfarin Sensitivity (VKORC1)",
        markers: &[RuleMarker { rsid: VKORC1_RSID, allele: 'T', variant: "VKORC1 -1639G>A" }],
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "VKORC1 promoter variant detected; warfarin dose requirement is typically lower.",
        action: "Genotype-guided warfarin dosing is recommended if warfarin is ever prescribed.",
        warfarin: true,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Warfarin Dose Modifier (CYP4F2)",
        markers: &[RuleMarker { rsid: "rs2108622", allele: 'T', variant: "CYP4F2*3" }],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "CYP4F2 V433M detected; warfarin dose requirement may be modestly higher.",
        action: "A minor input to warfarin dosing algorithms; relevant only alongside VKORC1/CYP2C9.",
        warfarin: true,
        list_variants: false,
        zygosity_note: false,
    },
    RiskRule {
        label: "Warfarin Response (CYP2C cluster)",
        markers: &[RuleMarker { rsid: CYP2C_CLUSTER_RSID, allele: 'A', variant: "CYP2C cluster rs12777823" }],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "CYP2C cluster variant associated with reduced warfarin dose requirement in some ancestries.",
        action: "Mention to a clinician if warfarin dosing is ever being established.",
        warfarin: true,
        list_variants: false,
        zygosity_note: false,
    },
    RiskRule {
        label: "Tacrolimus Metabolism (CYP3A5)",
        markers: &[CYP3A5_MARKER],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "CYP3A5 expresser allele detected; tacrolimus is typically cleared faster, needing higher doses to reach target levels.",
        action: "Relevant if organ transplantation or tacrolimus therapy is ever considered.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Efavirenz Metabolism (CYP2B6)",
        markers: &[
            RuleMarker { rsid: "rs3745274", allele: 'T', variant: "CYP2B6*6 (516G>T)" },
            RuleMarker { rsid: "rs2279343", allele: 'G', variant: "CYP2B6*4 (785A>G)" },
        ],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "CYP2B6 reduced-function variation detected; efavirenz exposure may be elevated.",
        action: "Relevant to efavirenz-containing HIV regimens.",
        warfarin: false,
        list_variants: true,
        zygosity_note: false,
    },
    RiskRule {
        label: "Atazanavir Hyperbilirubinemia (UGT1A1*6)",
        markers: &[RuleMarker { rsid: "rs4148323", allele: 'A', variant: "UGT1A1*6" }],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "UGT1A1*6 detected; bilirubin conjugation capacity is reduced.",
        action: "Relevant to atazanavir and irinotecan therapy.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Irinotecan/Atazanavir Sensitivity (UGT1A1*28)",
        markers: &[UGT1A1_28_MARKER],
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "UGT1A1*28 promoter expansion (tagged by rs887829) detected; reduced UGT1A1 activity (Gilbert syndrome spectrum).",
        action: "Dose adjustment may be warranted for irinotecan; discuss before atazanavir.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Fluoropyrimidine Toxicity (DPYD)",
        markers: &DPYD_MARKERS,
        tier: Tier::FixedHigh,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "DPYD decreased-function variation detected. 5-fluorouracil and capecitabine can cause severe, potentially fatal toxicity at standard doses.",
        action: "DPYD genotyping review is essential before any fluoropyrimidine chemotherapy.",
        warfarin: false,
        list_variants: true,
        zygosity_note: false,
    },
    RiskRule {
        label: "Thiopurine Sensitivity (TPMT/NUDT15)",
        markers: &TPMT_NUDT15_MARKERS,
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "Reduced thiopurine inactivation detected; azathioprine and 6-mercaptopurine toxicity risk is elevated.",
        action: "Dose reduction or alternative therapy per CPIC if thiopurines are prescribed.",
        warfarin: false,
        list_variants: true,
        zygosity_note: false,
    },
    RiskRule {
        label: "Allopurinol/Rosuvastatin Transport (ABCG2)",
        markers: &[RuleMarker { rsid: "rs2231142", allele: 'T', variant: "ABCG2 Q141K" }],
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "CPIC level A",
        description: "ABCG2 Q141K detected; rosuvastatin exposure is higher and allopurinol response may differ.",
        action: "Consider lower rosuvastatin starting doses.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Abacavir Hypersensitivity (HLA-B*57:01)",
        markers: &[HLA_B5701_MARKER],
        tier: Tier::FixedHigh,
        category: Category::Clinical,
        evidence: "CPIC level A; proxy marker",
        description: "HCP5 proxy for HLA-B*57:01 detected. Abacavir hypersensitivity reaction risk; proxy result requires confirmatory HLA typing.",
        action: "Confirmatory HLA-B*57:01 typing before any abacavir use.",
        warfarin: false,
        list_variants: false,
        zygosity_note: false,
    },
    RiskRule {
        label: "Factor V Leiden Thrombophilia",
        markers: &[RuleMarker { rsid: "rs6025", allele: 'A', variant: "Factor V Leiden R506Q" }],
        tier: Tier::FixedHigh,
        category: Category::Clinical,
        evidence: "ACMG-reportable",
        description: "Factor V Leiden detected; venous thromboembolism risk is elevated.",
        action: "Discuss with a clinician, particularly before surgery, pregnancy, or estrogen-containing therapy.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Prothrombin G20210A Thrombophilia",
        markers: &[RuleMarker { rsid: "rs1799963", allele: 'A', variant: "Prothrombin G20210A" }],
        tier: Tier::FixedHigh,
        category: Category::Clinical,
        evidence: "ACMG-reportable",
        description: "Prothrombin G20210A detected; prothrombin levels and clotting risk are elevated.",
        action: "Discuss thrombosis risk management with a clinician.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Sickle Cell (HbS)",
        markers: &[RuleMarker { rsid: SICKLE_RSID, allele: 'T', variant: "HBB Glu6Val (HbS)" }],
        tier: Tier::Tiered,
        category: Category::Clinical,
        evidence: "ACMG-reportable",
        description: "HbS allele detected at rs334. One copy indicates sickle cell trait (carrier); two copies indicate sickle cell disease genotype.",
        action: "Confirm with hemoglobin electrophoresis; carrier status matters for family planning.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Familial Hypercholesterolemia (APOB)",
        markers: &[RuleMarker { rsid: "rs5742904", allele: 'T', variant: "APOB R3527Q" }],
        tier: Tier::FixedHigh,
        category: Category::Clinical,
        evidence: "ACMG-reportable",
        description: "APOB R3527Q detected, a familial hypercholesterolemia variant.",
        action: "Lipid panel and clinical confirmation are strongly advised.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "APC I1307K Colorectal Cancer Risk",
        markers: &[RuleMarker { rsid: "rs1801155", allele: 'A', variant: "APC I1307K" }],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "Clinically recognized founder variant",
        description: "APC I1307K detected; colorectal cancer risk is moderately elevated.",
        action: "Earlier or more frequent colonoscopy may be advised; discuss with a clinician.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "CHEK2 I157T Cancer Predisposition",
        markers: &[RuleMarker { rsid: "rs17879961", allele: 'C', variant: "CHEK2 I157T" }],
        tier: Tier::FixedMed,
        category: Category::Clinical,
        evidence: "Moderate-penetrance variant",
        description: "CHEK2 I157T detected; a moderate-penetrance cancer predisposition allele.",
        action: "Consider discussing screening intervals with a clinician.",
        warfarin: false,
        list_variants: false,
        zygosity_note: true,
    },
    RiskRule {
        label: "Lipoprotein(a) Elevated Risk",
        markers: &[
            RuleMarker { rsid: "rs10455872", allele: 'G', variant: "LPA rs10455872" },
            RuleMarker { rsid: "rs3798220", allele: 'C', variant: "LPA rs3798220" },
        ],
        tier: Tier::FixedMed,
        category: Category::Association,
        evidence: "GWAS, large effect",
        description: "LPA variation associated with elevated lipoprotein(a) and cardiovascular risk detected.",
        action: "A one-time Lp(a) blood measurement clarifies actual levels.",
        warfarin: false,
        list_variants: true,
        zygosity_note: false,
    },
];

/// Association rules keyed on an exact canonical genotype rather than a
/// resolver count (protective and compound cases included).
#[derive(Debug, Clone, Copy)]
pub struct GenotypeRule {
    pub label: &'static str,
    pub rsid: &'static str,
    pub genotype: &'static str,
    pub level: RiskLevel,
    pub evidence: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

pub const GENOTYPE_RULES: [GenotypeRule; 2] = [
    GenotypeRule {
        label: "Nicotine Dependence Risk (CHRNA5)",
        rsid: "rs16969968",
        genotype: "AA",
        level: RiskLevel::High,
        evidence: "GWAS, replicated",
        description: "Two copies of the CHRNA5 risk allele; heavier smoking and higher dependence risk if nicotine is ever used.",
        action: "Strongest available genetic argument for never starting smoking.",
    },
    GenotypeRule {
        label: "9p21 Early Heart Attack (protective)",
        rsid: "rs1333049",
        genotype: "GG",
        level: RiskLevel::Low,
        evidence: "GWAS, replicated",
        description: "Protective 9p21 genotype; early-onset coronary artery disease risk is lower than average.",
        action: "No action needed; conventional risk factors still dominate.",
    },
];

/// AMD pair evaluated as a single listed-marker rule.
pub const AMD_MARKERS: [RuleMarker; 2] = [
    RuleMarker { rsid: "rs1061170", allele: 'C', variant: "CFH Y402H" },
    RuleMarker { rsid: "rs10490924", allele: 'T', variant: "ARMS2 A69S" },
];

/// NAT2 acetylator trio; all three must be called before a phenotype is
/// assigned.
pub const NAT2_MARKERS: [RuleMarker; 3] = [
    RuleMarker { rsid: "rs1801280", allele: 'C', variant: "NAT2*5" },
    RuleMarker { rsid: "rs1799930", allele: 'A', variant: "NAT2*6" },
    RuleMarker { rsid: "rs1799931", allele: 'A', variant: "NAT2*7" },
];

pub const G6PD_MARKERS: [RuleMarker; 2] = [
    RuleMarker { rsid: "rs1050828", allele: 'T', variant: "G6PD A- (V68M)" },
    RuleMarker { rsid: "rs1050829", allele: 'C', variant: "G6PD A (N126D)" },
];

pub const SERPINA1_PIZ: RuleMarker =
    RuleMarker { rsid: "rs28929474", allele: 'T', variant: "SERPINA1 PiZ" };
pub const SERPINA1_PIS: RuleMarker =
    RuleMarker { rsid: "rs17580", allele: 'A', variant: "SERPINA1 PiS" };

pub const CYP2C19_LOF: [RuleMarker; 2] = [
    RuleMarker { rsid: "rs4244285", allele: 'A', variant: "CYP2C19*2" },
    RuleMarker { rsid: "rs4986893", allele: 'A', variant: "CYP2C19*3" },
];
pub const CYP2C19_17: RuleMarker =
    RuleMarker { rsid: "rs12248560", allele: 'T', variant: "CYP2C19*17" };

pub const MTHFR_C677T: &str = "rs1801133";
pub const MTHFR_A1298C: &str = "rs1801131";
pub const APOE_RS429358: &str = "rs429358";
pub const APOE_RS7412: &str = "rs7412";

/// Proxy markers stand in for variants the array cannot assay directly; their
/// rows always say so and never collapse into a trait conclusion.
pub struct ProxyMarker {
    pub rsid: &'static str,
    pub target: &'static str,
}

pub const PROXY_MARKERS: [ProxyMarker; 7] = [
    ProxyMarker { rsid: "rs2395029", target: "HLA-B*57:01 (abacavir)" },
    ProxyMarker { rsid: "rs4349859", target: "HLA-B*27 (ankylosing spondylitis)" },
    ProxyMarker { rsid: "rs2844682", target: "HLA-B*15:02 (carbamazepine)" },
    ProxyMarker { rsid: "rs3909184", target: "HLA-B*15:02 (carbamazepine)" },
    ProxyMarker { rsid: "rs1061235", target: "HLA-A*31:01 (carbamazepine)" },
    ProxyMarker { rsid: "rs9263726", target: "HLA-B*58:01 (allopurinol)" },
    ProxyMarker { rsid: "rs887829", target: "UGT1A1*28 TA-repeat (irinotecan)" },
];

pub fn proxy_target(rsid: &str) -> Option<&'static str> {
    PROXY_MARKERS
        .iter()
        .find(|p| p.rsid == rsid)
        .map(|p| p.target)
}

/// How a critical assay can fail to produce a direct call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageKind {
    /// Direct marker; absent means the file build simply lacks it.
    Direct,
    /// Assayed through a proxy rsid; absent proxy counts as missing, present
    /// proxy is still only a proxy.
    Proxy,
    /// Inherently uncallable on genotyping arrays (copy number, deletions).
    Limitation,
}

pub struct CriticalAssay {
    pub display: &'static str,
    /// Empty for pure limitations.
    pub rsid: &'static str,
    pub kind: CoverageKind,
}

pub const CRITICAL_ASSAYS: [CriticalAssay; 10] = [
    CriticalAssay { display: "DPYD *2A (fluoropyrimidines)", rsid: "rs3918290", kind: CoverageKind::Direct },
    CriticalAssay { display: "TPMT *3C (thiopurines)", rsid: "rs1142345", kind: CoverageKind::Direct },
    CriticalAssay { display: "VKORC1 (warfarin)", rsid: "rs9923231", kind: CoverageKind::Direct },
    CriticalAssay { display: "Factor V Leiden", rsid: "rs6025", kind: CoverageKind::Direct },
    CriticalAssay { display: "HLA-B*57:01 (abacavir)", rsid: "rs2395029", kind: CoverageKind::Proxy },
    CriticalAssay { display: "HLA-B*58:01 (allopurinol)", rsid: "rs9263726", kind: CoverageKind::Proxy },
    CriticalAssay { display: "HLA-B*15:02 (carbamazepine)", rsid: "rs2844682", kind: CoverageKind::Proxy },
    CriticalAssay { display: "CYP2D6 copy number (codeine, tamoxifen)", rsid: "", kind: CoverageKind::Limitation },
    CriticalAssay { display: "GSTM1 whole-gene deletion", rsid: "", kind: CoverageKind::Limitation },
    CriticalAssay { display: "GSTT1 whole-gene deletion", rsid: "", kind: CoverageKind::Limitation },
];

/// Functional-health panels in display order. Detox/Acetylation carries no
/// generic summary row; the NAT2 status row stands in for it.
pub const FUNCTIONAL_PANELS: [&str; 12] = [
    "Histamine",
    "Detox/Acetylation",
    "Inflammation",
    "VDR/Bone",
    "Autoimmune",
    "Hormone",
    "Methylation",
    "Longevity",
    "Neuroplasticity",
    "Oxidative Stress",
    "Metabolic",
    "Iron Metabolism",
];

pub const NO_SUMMARY_PANELS: [&str; 1] = ["Detox/Acetylation"];

/// Per-marker report metadata that does not belong in the reference catalog
/// (evidence grade, topical tags, the lab test that would settle the
/// question).
pub struct MarkerMeta {
    pub rsid: &'static str,
    pub evidence: &'static str,
    pub tags: &'static str,
    pub next_test: &'static str,
}

pub const MARKER_META: [MarkerMeta; 14] = [
    MarkerMeta { rsid: "rs1049793", evidence: "moderate", tags: "histamine", next_test: "DAO activity assay" },
    MarkerMeta { rsid: "rs10156191", evidence: "moderate", tags: "histamine", next_test: "DAO activity assay" },
    MarkerMeta { rsid: "rs1801133", evidence: "strong", tags: "methylation,b-vitamins", next_test: "homocysteine, serum B12/folate" },
    MarkerMeta { rsid: "rs1801131", evidence: "moderate", tags: "methylation", next_test: "homocysteine" },
    MarkerMeta { rsid: "rs1544410", evidence: "moderate", tags: "bone,vitamin-d", next_test: "serum 25(OH)D, DEXA if indicated" },
    MarkerMeta { rsid: "rs2228570", evidence: "moderate", tags: "bone,vitamin-d", next_test: "serum 25(OH)D" },
    MarkerMeta { rsid: "rs1800629", evidence: "moderate", tags: "inflammation", next_test: "hs-CRP" },
    MarkerMeta { rsid: "rs1800795", evidence: "moderate", tags: "inflammation", next_test: "hs-CRP, IL-6 if indicated" },
    MarkerMeta { rsid: "rs2476601", evidence: "strong", tags: "autoimmune", next_test: "ANA panel if symptomatic" },
    MarkerMeta { rsid: "rs4680", evidence: "strong", tags: "neuro,hormone", next_test: "none; lifestyle context only" },
    MarkerMeta { rsid: "rs6265", evidence: "strong", tags: "neuroplasticity", next_test: "none; lifestyle context only" },
    MarkerMeta { rsid: "rs1800562", evidence: "strong", tags: "iron", next_test: "ferritin, transferrin saturation" },
    MarkerMeta { rsid: "rs1799945", evidence: "moderate", tags: "iron", next_test: "ferritin" },
    MarkerMeta { rsid: "rs4880", evidence: "moderate", tags: "oxidative-stress", next_test: "none; lifestyle context only" },
];

pub fn marker_meta(rsid: &str) -> Option<&'static MarkerMeta> {
    MARKER_META.iter().find(|m| m.rsid == rsid)
}

/// Hormone-panel markers whose interpretation is estrogen-exposure dependent;
/// a sex note is appended to their rows.
pub const ESTROGEN_SENSITIVE_RSIDS: [&str; 2] = ["rs4680", "rs700518"];

pub const ESTROGEN_NOTE_FEMALE: &str =
    "Interpretation assumes endogenous estrogen exposure; relevance is higher before menopause.";
pub const ESTROGEN_NOTE_MALE: &str =
    "Estrogen-pathway marker; effect sizes were characterized mainly in estrogen-exposed cohorts.";

/// Fun/appearance display order. Eye color first (HERC2/OCA2), then skin
/// pigmentation (SLC24A5/SLC45A2), then MC1R red-hair variants, then hair
/// texture.
pub const APPEARANCE_ORDER: [&str; 7] = [
    "rs12913832",
    "rs1800407",
    "rs1426654",
    "rs16891982",
    "rs1805007",
    "rs885479",
    "rs7349332",
];

pub fn appearance_rank(rsid: &str) -> usize {
    APPEARANCE_ORDER
        .iter()
        .position(|r| *r == rsid)
        .unwrap_or(APPEARANCE_ORDER.len())
}
