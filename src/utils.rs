use crate::BundleError;
use tokio::io::{self, AsyncWriteExt};
use tracing::trace;

/// Splits a space separated token list, dropping the empty tokens left by
/// repeated or surrounding spaces. Tabs are not separators.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Renders tokens as a bracketed, quoted list: `['a', 'b']`.
pub fn format_token_list(tokens: &[String]) -> String {
    let quoted: Vec<String> = tokens.iter().map(|t| format!("'{}'", t)).collect();
    format!("[{}]", quoted.join(", "))
}

pub async fn write_stdout(content: &str) -> Result<(), BundleError> {
    trace!("Writing {} bytes to stdout", content.len());
    let mut stdout = io::stdout();
    stdout.write_all(content.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

pub async fn write_stderr(content: &str) -> Result<(), BundleError> {
    let mut stderr = io::stderr();
    stderr.write_all(content.as_bytes()).await?;
    stderr.flush().await?;
    Ok(())
}
