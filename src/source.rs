use crate::BundleError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, trace};

/// Something that yields input lines with their terminators removed.
#[async_trait]
pub trait LineSource {
    async fn read_lines(&mut self) -> Result<Vec<String>, BundleError>;
}

async fn collect_lines<R>(reader: R) -> Result<Vec<String>, BundleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        trace!("Read line: {}", line);
        collected.push(line);
    }
    Ok(collected)
}

pub struct StdinSource;

#[async_trait]
impl LineSource for StdinSource {
    async fn read_lines(&mut self) -> Result<Vec<String>, BundleError> {
        debug!("Reading paths from stdin");
        collect_lines(BufReader::new(io::stdin())).await
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl LineSource for FileSource {
    async fn read_lines(&mut self) -> Result<Vec<String>, BundleError> {
        debug!("Reading paths from {:?}", self.path);
        let file = File::open(&self.path)
            .await
            .map_err(|e| BundleError::MissingInputFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        collect_lines(BufReader::new(file)).await
    }
}

/// In-memory lines, mostly for tests and embedding.
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemorySource {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LineSource for MemorySource {
    async fn read_lines(&mut self) -> Result<Vec<String>, BundleError> {
        Ok(std::mem::take(&mut self.lines))
    }
}
