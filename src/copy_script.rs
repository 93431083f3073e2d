use crate::utils::format_token_list;
use tracing::{debug, info, trace};

/// Directory under the project root that holds the installed modules.
pub const NODE_MODULES_DIR: &str = "/node_modules";

#[derive(Debug, Clone)]
pub struct CopyScriptConfig {
    /// Working directory captured at startup; paths outside it are skipped.
    pub cwd: String,
    pub lib_dir: String,
    pub exclude: Vec<String>,
    /// Drop pairs under `node_modules/<token>` for each exclude token.
    /// Off by default: the exclusion list is only reported.
    pub apply_exclude: bool,
}

impl CopyScriptConfig {
    pub fn new(cwd: impl Into<String>) -> Self {
        CopyScriptConfig {
            cwd: cwd.into(),
            lib_dir: "lib".to_owned(),
            exclude: Vec::new(),
            apply_exclude: false,
        }
    }
}

/// A source path and where it lands inside the lib directory. Ordered by
/// source path first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathPair {
    pub original: String,
    pub destination: String,
}

#[derive(Debug, Default)]
pub struct CopyPlan {
    pub pairs: Vec<PathPair>,
    /// Input paths that were not under the working directory.
    pub global_paths: Vec<String>,
}

impl CopyPlan {
    pub fn render_script(&self) -> String {
        self.pairs
            .iter()
            .map(|pair| {
                format!(
                    "mkdir -p `dirname {}`\ncp {} {}\n",
                    pair.destination, pair.original, pair.destination
                )
            })
            .collect()
    }

    pub fn render_warnings(&self) -> String {
        self.global_paths
            .iter()
            .map(|path| format!("warning: file installed globaly {}\n", path))
            .collect()
    }
}

/// The diagnostic printed before any input is read, if anything is excluded.
pub fn exclusion_notice(exclude: &[String]) -> Option<String> {
    if exclude.is_empty() {
        None
    } else {
        Some(format!("excluding {}\n", format_token_list(exclude)))
    }
}

fn is_excluded(relative: &str, exclude: &[String]) -> bool {
    let Some(rest) = relative
        .strip_prefix(NODE_MODULES_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return false;
    };
    exclude.iter().any(|token| token == module_name(rest))
}

/// Leading module of a path below `node_modules/`. Scoped packages span two
/// segments (`@scope/pkg`).
fn module_name(rest: &str) -> &str {
    let mut segments = rest.splitn(3, '/');
    let first = segments.next().unwrap_or("");
    match (first.starts_with('@'), segments.next()) {
        (true, Some(second)) => &rest[..first.len() + 1 + second.len()],
        _ => first,
    }
}

pub fn build_copy_plan<I, S>(lines: I, config: &CopyScriptConfig) -> CopyPlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plan = CopyPlan::default();

    for line in lines {
        let line = line.as_ref().trim();
        // Stripping the leading cwd replaces its first occurrence only.
        let Some(relative) = line.strip_prefix(config.cwd.as_str()) else {
            debug!("Skipping path outside {}: {}", config.cwd, line);
            plan.global_paths.push(line.to_owned());
            continue;
        };

        if config.apply_exclude && is_excluded(relative, &config.exclude) {
            debug!("Excluding {}", line);
            continue;
        }

        let pair = PathPair {
            original: line.to_owned(),
            destination: format!("{}{}", config.lib_dir, relative),
        };
        trace!("Mapped {} -> {}", pair.original, pair.destination);
        plan.pairs.push(pair);
    }

    plan.pairs.sort();
    info!(
        "Planned {} copies, skipped {} global paths",
        plan.pairs.len(),
        plan.global_paths.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CopyScriptConfig {
        CopyScriptConfig::new("/repo")
    }

    #[test]
    fn maps_cwd_prefix_to_lib() {
        let plan = build_copy_plan(["/repo/node_modules/foo/index.js"], &config());
        assert_eq!(
            plan.pairs,
            vec![PathPair {
                original: "/repo/node_modules/foo/index.js".to_string(),
                destination: "lib/node_modules/foo/index.js".to_string(),
            }]
        );
        assert!(plan.global_paths.is_empty());
    }

    #[test]
    fn renders_mkdir_and_cp_lines() {
        let plan = build_copy_plan(["/repo/node_modules/foo/index.js"], &config());
        assert_eq!(
            plan.render_script(),
            "mkdir -p `dirname lib/node_modules/foo/index.js`\n\
             cp /repo/node_modules/foo/index.js lib/node_modules/foo/index.js\n"
        );
    }

    #[test]
    fn global_paths_are_warned_and_skipped() {
        let plan = build_copy_plan(["/usr/lib/other/file.js"], &config());
        assert!(plan.pairs.is_empty());
        assert_eq!(
            plan.render_warnings(),
            "warning: file installed globaly /usr/lib/other/file.js\n"
        );
        assert_eq!(plan.render_script(), "");
    }

    #[test]
    fn only_leading_cwd_is_replaced() {
        let plan = build_copy_plan(["/repo/node_modules/repo/repo/x.js"], &config());
        assert_eq!(plan.pairs[0].destination, "lib/node_modules/repo/repo/x.js");

        let plan = build_copy_plan(
            ["/repo/node_modules/nested/repo/a.js"],
            &CopyScriptConfig::new("/repo/node_modules/nested/repo"),
        );
        assert_eq!(plan.pairs[0].destination, "lib/a.js");
    }

    #[test]
    fn pairs_are_sorted_by_original_path() {
        let plan = build_copy_plan(
            [
                "/repo/node_modules/zeta/index.js",
                "/repo/node_modules/alpha/index.js",
                "/repo/node_modules/alpha/a.js",
            ],
            &config(),
        );
        let originals: Vec<&str> = plan.pairs.iter().map(|p| p.original.as_str()).collect();
        assert_eq!(
            originals,
            vec![
                "/repo/node_modules/alpha/a.js",
                "/repo/node_modules/alpha/index.js",
                "/repo/node_modules/zeta/index.js",
            ]
        );
    }

    #[test]
    fn lines_are_trimmed() {
        let plan = build_copy_plan(["  /repo/a.js \t"], &config());
        assert_eq!(plan.pairs[0].original, "/repo/a.js");
        assert_eq!(plan.pairs[0].destination, "lib/a.js");
    }

    #[test]
    fn exclude_is_reported_but_not_applied_by_default() {
        let mut config = config();
        config.exclude = vec!["foo".to_string()];
        let plan = build_copy_plan(["/repo/node_modules/foo/index.js"], &config);
        assert_eq!(plan.pairs.len(), 1);
        assert_eq!(
            exclusion_notice(&config.exclude).as_deref(),
            Some("excluding ['foo']\n")
        );
        assert_eq!(exclusion_notice(&[]), None);
    }

    #[test]
    fn apply_exclude_matches_whole_module_segment() {
        let mut config = config();
        config.exclude = vec!["foo".to_string()];
        config.apply_exclude = true;
        let plan = build_copy_plan(
            [
                "/repo/node_modules/foo/index.js",
                "/repo/node_modules/foobar/index.js",
                "/repo/src/foo/index.js",
            ],
            &config,
        );
        let originals: Vec<&str> = plan.pairs.iter().map(|p| p.original.as_str()).collect();
        assert_eq!(
            originals,
            vec!["/repo/node_modules/foobar/index.js", "/repo/src/foo/index.js"]
        );
    }

    #[test]
    fn apply_exclude_matches_scoped_packages_by_full_name() {
        let mut config = config();
        config.exclude = vec!["@babel/core".to_string()];
        config.apply_exclude = true;
        let plan = build_copy_plan(
            [
                "/repo/node_modules/@babel/core/index.js",
                "/repo/node_modules/@babel/parser/index.js",
                "/repo/node_modules/@babel/core",
            ],
            &config,
        );
        let originals: Vec<&str> = plan.pairs.iter().map(|p| p.original.as_str()).collect();
        assert_eq!(originals, vec!["/repo/node_modules/@babel/parser/index.js"]);
    }

    #[test]
    fn scope_alone_does_not_exclude_its_packages() {
        let mut config = config();
        config.exclude = vec!["@babel".to_string()];
        config.apply_exclude = true;
        let plan = build_copy_plan(["/repo/node_modules/@babel/core/index.js"], &config);
        assert_eq!(plan.pairs.len(), 1);
    }

    #[test]
    fn script_has_two_lines_per_pair_in_order() {
        let plan = build_copy_plan(["/repo/b.js", "/repo/a.js"], &config());
        assert_eq!(
            plan.render_script(),
            "mkdir -p `dirname lib/a.js`\ncp /repo/a.js lib/a.js\n\
             mkdir -p `dirname lib/b.js`\ncp /repo/b.js lib/b.js\n"
        );
    }

    #[test]
    fn custom_lib_dir_is_used_as_destination_root() {
        let mut config = config();
        config.lib_dir = "dist/lib".to_string();
        let plan = build_copy_plan(["/repo/node_modules/foo/index.js"], &config);
        assert_eq!(plan.pairs[0].destination, "dist/lib/node_modules/foo/index.js");
    }
}
