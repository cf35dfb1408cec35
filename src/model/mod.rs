pub mod cards;
pub mod genotype;
pub mod resolver;
pub mod rows;
