mod context;
mod run;

pub use context::AppContext;
pub use run::run;
