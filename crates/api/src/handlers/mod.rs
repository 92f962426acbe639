pub mod abbreviations;
pub mod trash;
