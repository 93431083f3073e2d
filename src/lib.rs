pub mod config_link;
pub mod copy_script;
pub mod errors;
pub mod logger;
pub mod modules;
pub mod source;
pub mod utils;

pub use config_link::{check_config_link, ConfigLinkOutcome};
pub use copy_script::{build_copy_plan, CopyPlan, CopyScriptConfig, PathPair};
pub use errors::BundleError;
pub use modules::{collect_modules, ModuleScanConfig};
pub use source::{FileSource, LineSource, MemorySource, StdinSource};
