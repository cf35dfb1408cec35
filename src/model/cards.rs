#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Med,
    Low,
    Neutral,
}

impl RiskLevel {
    /// Display rank; the card list is stably sorted on this so that high
    /// precedes med precedes low precedes neutral while preserving rule
    /// evaluation order within a level.
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Med => 1,
            RiskLevel::Low => 2,
            RiskLevel::Neutral => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Med => "med",
            RiskLevel::Low => "low",
            RiskLevel::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Clinical,
    Association,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Clinical => "clinical",
            Category::Association => "association",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskCard {
    pub label: String,
    pub level: RiskLevel,
    pub description: String,
    pub action: String,
    pub evidence: String,
    pub category: Category,
}

impl RiskCard {
    /// Label + description + action, lowercased; the validators scan this.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.label, self.description, self.action).to_lowercase()
    }
}

/// Stable severity sort per the card ordering invariant.
pub fn sort_cards(cards: &mut [RiskCard]) {
    cards.sort_by_key(|card| card.level.rank());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(label: &str, level: RiskLevel) -> RiskCard {
        RiskCard {
            label: label.to_string(),
            level,
            description: String::new(),
            action: String::new(),
            evidence: "CPIC".to_string(),
            category: Category::Clinical,
        }
    }

    #[test]
    fn test_sort_is_stable_within_level() {
        let mut cards = vec![
            card("b-med", RiskLevel::Med),
            card("a-high", RiskLevel::High),
            card("a-med", RiskLevel::Med),
            card("a-low", RiskLevel::Low),
        ];
        sort_cards(&mut cards);
        let labels: Vec<&str> = cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a-high", "b-med", "a-med", "a-low"]);
    }
}
