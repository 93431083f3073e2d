use std::collections::BTreeSet;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct ModuleScanConfig {
    /// Exact string prefix; no path normalization is applied.
    pub base_directory: String,
    pub name_prefix: String,
    pub excluded: BTreeSet<String>,
}

impl ModuleScanConfig {
    /// `excluded_names` is split on whitespace.
    pub fn new(
        base_directory: impl Into<String>,
        name_prefix: Option<String>,
        excluded_names: Option<&str>,
    ) -> Self {
        ModuleScanConfig {
            base_directory: base_directory.into(),
            name_prefix: name_prefix.unwrap_or_default(),
            excluded: excluded_names
                .map(|names| names.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default(),
        }
    }
}

/// First `/` segment of `line` after removing `base` once, or `None` when the
/// line is not under `base`.
pub fn extract_module_name<'a>(line: &'a str, base: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(base)?;
    rest.split('/').next()
}

/// Sorted, deduplicated module names found under the base directory.
pub fn collect_modules<I, S>(lines: I, config: &ModuleScanConfig) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut modules = BTreeSet::new();
    for line in lines {
        let line = line.as_ref();
        let Some(name) = extract_module_name(line, &config.base_directory) else {
            trace!("Ignoring path outside base directory: {}", line);
            continue;
        };
        if config.excluded.contains(name) {
            trace!("Excluding module {}", name);
            continue;
        }
        modules.insert(format!("{}{}", config.name_prefix, name));
    }
    debug!("Found {} modules", modules.len());
    modules
}

pub fn render_modules(modules: &BTreeSet<String>) -> String {
    modules
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_modules_json(modules: &BTreeSet<String>) -> Result<String, serde_json::Error> {
    serde_json::to_string(modules)
}
