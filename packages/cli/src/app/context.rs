use crate::cli::root::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub db_path: PathBuf,
    pub format: OutputFormat,
}
