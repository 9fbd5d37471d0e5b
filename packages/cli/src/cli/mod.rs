pub mod anonymize;
pub mod mappings;
pub mod root;
