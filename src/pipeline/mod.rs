pub mod stage2_merge;
pub mod stage3_cards;
pub mod stage4_escalate;
pub mod stage5_rows;
pub mod stage6_validate;
pub mod stage7_report;
