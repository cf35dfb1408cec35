#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Risk,
    Protective,
    Missing,
    Proxy,
    Caution,
    Info,
    Neutral,
}

impl RowStatus {
    pub fn name(self) -> &'static str {
        match self {
            RowStatus::Risk => "risk",
            RowStatus::Protective => "protective",
            RowStatus::Missing => "missing",
            RowStatus::Proxy => "proxy",
            RowStatus::Caution => "caution",
            RowStatus::Info => "info",
            RowStatus::Neutral => "neutral",
        }
    }

    /// CSS pill class used by the HTML renderer.
    pub fn pill_class(self) -> &'static str {
        match self {
            RowStatus::Risk => "status-risk",
            RowStatus::Protective => "status-protective",
            RowStatus::Missing => "status-missing",
            RowStatus::Proxy => "status-proxy",
            RowStatus::Caution => "status-caution",
            RowStatus::Info | RowStatus::Neutral => "status-neutral",
        }
    }

    /// Statuses the summary/child consistency validator treats as flagged.
    pub fn is_flagged(self) -> bool {
        matches!(self, RowStatus::Risk | RowStatus::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    Summary,
    Child,
}

/// One display row in a wellness or functional-health table. Summary rows
/// aggregate a panel; child rows describe one marker.
#[derive(Debug, Clone)]
pub struct TraitRow {
    pub label: String,
    pub status: RowStatus,
    pub sub: String,
    pub value: String,
    pub detail: Option<String>,
    pub emoji: &'static str,
    pub indicator: Option<String>,
    pub evidence: Option<String>,
    pub tags: Option<String>,
    pub next_test: Option<String>,
    pub row_type: RowType,
    pub rsid: Option<String>,
}

impl TraitRow {
    pub fn child(label: impl Into<String>) -> Self {
        TraitRow {
            label: label.into(),
            status: RowStatus::Neutral,
            sub: String::new(),
            value: String::new(),
            detail: None,
            emoji: "\u{2728}",
            indicator: None,
            evidence: None,
            tags: None,
            next_test: None,
            row_type: RowType::Child,
            rsid: None,
        }
    }
}

/// A named table of rows plus the panel it came from, so validators can pair
/// summary rows with their children.
#[derive(Debug, Clone)]
pub struct PanelTable {
    pub panel: String,
    pub rows: Vec<TraitRow>,
}

/// Display card for a fun/appearance trait.
#[derive(Debug, Clone)]
pub struct FunCard {
    pub label: String,
    pub value: String,
    pub emoji: &'static str,
    pub category: FunCategory,
    pub sub: String,
    pub rsid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunCategory {
    Appearance,
    Sensory,
    Lifestyle,
}

impl FunCategory {
    pub fn name(self) -> &'static str {
        match self {
            FunCategory::Appearance => "appearance",
            FunCategory::Sensory => "sensory",
            FunCategory::Lifestyle => "lifestyle",
        }
    }
}
