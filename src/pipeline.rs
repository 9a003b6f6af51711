use crate::config::{Config, SortOrder};
use crate::error::{Error, Result};
use crate::record::{RecordBuilder, TagStripper};
use crate::types::BillRecord;
use async_stream::stream;
use futures::Stream;
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

/// A discovered status document
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Main processor for bill status documents
///
/// Discovers parsed BILLSTATUS JSON documents under the data directory and
/// converts each into a normalized bill record. Failures are yielded per
/// document so one malformed bill never aborts the batch.
pub struct PipelineProcessor {
    config: Config,
}

impl PipelineProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process status documents and return a reactive stream of bill records
    /// Uses jwalk for fast parallel filesystem traversal
    pub fn process(&self) -> impl Stream<Item = Result<BillRecord>> {
        let config = self.config.clone();
        let config_for_discovery = config.clone();
        Box::pin(stream! {
            // Discovery runs in the blocking thread pool: jwalk is fast but
            // synchronous.
            let files = match tokio::task::spawn_blocking(move || {
                Self::discover_files_internal(&config_for_discovery)
            }).await {
                Ok(Ok(files)) => files,
                Ok(Err(e)) => {
                    yield Err(e);
                    return;
                }
                Err(e) => {
                    yield Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Task join error: {}", e)
                    )));
                    return;
                }
            };

            let sorted_files = Self::sort_files_internal(&config, files);
            let limited_files = Self::apply_limit_internal(&config, sorted_files);

            let (builder, html) = match Self::build_engine() {
                Ok(engine) => engine,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for file in limited_files {
                yield Self::process_file_internal(&builder, &html, &file).await;
            }
        })
    }

    /// Process documents named on stdin (one path per line)
    /// Useful for stdio pipelines: `find ... | billbot --stdin`
    pub fn process_from_stdin(
        config: &Config,
        paths: impl Iterator<Item = String>,
    ) -> impl Stream<Item = Result<BillRecord>> {
        let config = config.clone();
        let paths: Vec<String> = paths.collect();
        Box::pin(stream! {
            let mut files = Vec::new();
            for path_str in paths {
                let path = Path::new(&path_str);
                if !path.exists() || !path.is_file() {
                    continue;
                }
                if !Self::is_status_document(path) {
                    continue;
                }

                let data_dir_str = config.data_dir.to_string_lossy();
                let relative_path = if path_str.starts_with(&*data_dir_str) {
                    path.strip_prefix(&config.data_dir)
                        .ok()
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_else(|| path_str.clone())
                } else {
                    path_str.clone()
                };

                files.push(DocumentFile {
                    path: path.to_path_buf(),
                    relative_path,
                });
            }

            let sorted_files = Self::sort_files_internal(&config, files);
            let limited_files = Self::apply_limit_internal(&config, sorted_files);

            let (builder, html) = match Self::build_engine() {
                Ok(engine) => engine,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for file in limited_files {
                yield Self::process_file_internal(&builder, &html, &file).await;
            }
        })
    }

    fn build_engine() -> Result<(RecordBuilder, TagStripper)> {
        Ok((RecordBuilder::new()?, TagStripper::new()?))
    }

    /// A parsed status document: `BILLSTATUS-*.json`
    fn is_status_document(path: &Path) -> bool {
        let is_json = path
            .extension()
            .map(|ext| ext == "json")
            .unwrap_or(false);
        is_json
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with("BILLSTATUS-"))
                .unwrap_or(false)
    }

    /// Discover all status documents under the data directory
    /// Uses jwalk for fast parallel filesystem traversal
    fn discover_files_internal(config: &Config) -> Result<Vec<DocumentFile>> {
        let mut files = Vec::new();
        let data_dir = &config.data_dir;

        // If congresses are specified, search only their subdirectories
        let search_paths = if config.congresses.is_empty() {
            vec![data_dir.clone()]
        } else {
            config
                .congresses
                .iter()
                .map(|congress| data_dir.join(congress))
                .collect()
        };

        for search_path in search_paths {
            if !search_path.exists() {
                eprintln!(
                    "Warning: Expected congress directory does not exist: {}",
                    search_path.display()
                );
                continue;
            }

            for entry_result in WalkDir::new(&search_path).into_iter() {
                let entry = match entry_result {
                    Ok(e) => e,
                    Err(_) => continue,
                };

                if !entry.file_type().is_file() {
                    continue;
                }

                let path = entry.path();
                if Self::is_status_document(&path) {
                    let relative_path = Self::calculate_relative_path(&path, data_dir)?;
                    files.push(DocumentFile {
                        path: path.to_path_buf(),
                        relative_path,
                    });
                }
            }
        }

        Ok(files)
    }

    /// Calculate relative path from the data directory
    fn calculate_relative_path(path: &Path, data_dir: &Path) -> Result<String> {
        let data_dir_abs = data_dir.canonicalize().map_err(|_| {
            Error::Path(format!(
                "Failed to canonicalize data directory: {}",
                data_dir.display()
            ))
        })?;

        let parent_abs = path
            .parent()
            .ok_or_else(|| Error::Path(format!("Failed to get parent of path: {}", path.display())))?
            .canonicalize()
            .map_err(|_| Error::Path(format!("Failed to canonicalize path: {}", path.display())))?;

        let relative = pathdiff::diff_paths(&parent_abs, &data_dir_abs)
            .ok_or_else(|| Error::Path("Failed to calculate relative path".to_string()))?;

        let filename = path
            .file_name()
            .ok_or_else(|| Error::Path(format!("Failed to get filename: {}", path.display())))?;

        Ok(relative.join(filename).to_string_lossy().to_string())
    }

    /// Sort documents by relative path for deterministic ordering
    fn sort_files_internal(config: &Config, mut files: Vec<DocumentFile>) -> Vec<DocumentFile> {
        match config.sort_order {
            SortOrder::Ascending => files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path)),
            SortOrder::Descending => files.sort_by(|a, b| b.relative_path.cmp(&a.relative_path)),
        }
        files
    }

    /// Apply limit to documents
    fn apply_limit_internal(config: &Config, files: Vec<DocumentFile>) -> Vec<DocumentFile> {
        if let Some(limit) = config.limit {
            files.into_iter().take(limit).collect()
        } else {
            files
        }
    }

    /// Process a single status document into a bill record
    async fn process_file_internal(
        builder: &RecordBuilder,
        html: &TagStripper,
        file: &DocumentFile,
    ) -> Result<BillRecord> {
        let content = tokio::fs::read_to_string(&file.path).await?;
        let tree_value: serde_json::Value = serde_json::from_str(&content)?;
        builder.build(&tree_value, html)
    }
}
