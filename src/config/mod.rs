pub mod schema;
pub mod store;

pub use schema::{BudgetPolicy, ParseOptionError, PipelineOptions, RewriteStrategy, Settings, UseFor};
pub use store::SettingsStore;
