pub mod anonymize;
pub mod mappings;
