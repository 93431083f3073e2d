use crate::BundleError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub const CONFIG_LINK: &str = "src/config.js";
pub const DEV_CONFIG_TARGET: &str = "../config.dev.js";
pub const PROD_CONFIG_TARGET: &str = "../config.prod.js";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigLinkOutcome {
    /// No config link (or a dangling one) under the root.
    Missing,
    UpToDate,
    /// The link pointed elsewhere and was removed.
    Deleted { previous: PathBuf },
}

pub fn expected_target(dev: i64) -> &'static str {
    if dev > 0 {
        DEV_CONFIG_TARGET
    } else {
        PROD_CONFIG_TARGET
    }
}

/// Removes `<root>/src/config.js` when it links to the config of the other
/// build mode, so the next build recreates it.
pub async fn check_config_link(root: &Path, dev: i64) -> Result<ConfigLinkOutcome, BundleError> {
    let link = root.join(CONFIG_LINK);

    // Follows the link: a dangling link counts as missing.
    if fs::metadata(&link).await.is_err() {
        debug!("No config at {:?}", link);
        return Ok(ConfigLinkOutcome::Missing);
    }

    let expected = expected_target(dev);
    let current = fs::read_link(&link).await.map_err(|e| {
        BundleError::ConfigError(format!("{:?} is not a symlink: {}", link, e))
    })?;

    if current == Path::new(expected) {
        debug!("Config link already points at {}", expected);
        return Ok(ConfigLinkOutcome::UpToDate);
    }

    info!("Config link points at {:?}, expected {}", current, expected);
    fs::remove_file(&link).await?;
    Ok(ConfigLinkOutcome::Deleted { previous: current })
}
