//! Batch export of a local JSON dump to Markdown files.
//!
//!     The input directory holds `database.json`, an array of page objects with
//!     their properties, next to one `<page-id>.json` per page holding that page's
//!     block forest (children already fetched). Every page file whose id is listed
//!     in the database becomes `<md-dir>/<id>.<extension>`; page files with no
//!     database entry belong to deleted pages and are skipped.
//!
//!     Pages are independent, so they are converted in parallel, each with its
//!     own [`Converter`](crate::render::Converter). The first failure aborts the
//!     export.
//!
//!     For in-memory conversion use [`convert_page`] or [`convert_blocks`].

use crate::document::{compose, render_page};
use crate::error::ConvertError;
use crate::metadata::Metadata;
use crate::node::{normalize_id, Node, Page};
use crate::options::RenderOptions;
use crate::render::Converter;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the property listing inside the JSON directory
pub const DATABASE_FILE: &str = "database.json";

/// Specifies an export run.
///
/// ```ignore
/// let spec = ExportSpec::new("./json", "./md").with_options(options);
/// let result = export(spec)?;
/// ```
#[derive(Debug, Clone)]
pub struct ExportSpec {
    /// Directory holding `database.json` and the page files
    pub json_dir: PathBuf,
    /// Directory receiving the Markdown files; created when missing
    pub md_dir: PathBuf,
    pub options: RenderOptions,
}

impl ExportSpec {
    pub fn new(json_dir: impl AsRef<Path>, md_dir: impl AsRef<Path>) -> Self {
        Self {
            json_dir: json_dir.as_ref().to_path_buf(),
            md_dir: md_dir.as_ref().to_path_buf(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Where the export landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// Exactly one page was written, to this file
    File(PathBuf),
    /// Zero or several pages were written into this directory
    Directory(PathBuf),
}

impl ExportArtifact {
    pub fn path(&self) -> &Path {
        match self {
            ExportArtifact::File(path) | ExportArtifact::Directory(path) => path,
        }
    }
}

/// One converted page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedPage {
    pub id: String,
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Result of an export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub artifact: ExportArtifact,
    /// Written pages, sorted by id
    pub pages: Vec<ExportedPage>,
}

/// Converts every listed page of `spec.json_dir` into `spec.md_dir`.
///
/// # Errors
///
/// Returns [`ConvertError`] if:
/// - `database.json` or a page file cannot be read or is not valid JSON
/// - a page contains a block kind with no renderer
/// - a Markdown file cannot be written
pub fn export(spec: ExportSpec) -> Result<ExportResult, ConvertError> {
    let ExportSpec {
        json_dir,
        md_dir,
        options,
    } = spec;

    let database: Vec<Page> = read_json(&json_dir.join(DATABASE_FILE))?;
    let pages: HashMap<String, Page> = database
        .into_iter()
        .map(|page| (page.normalized_id(), page))
        .collect();

    let mut sources = Vec::new();
    for path in page_files(&json_dir)? {
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()).map(normalize_id) else {
            continue;
        };
        match pages.get(&id) {
            Some(page) => sources.push((id, path, page)),
            None => tracing::debug!(page = %id, "skipping page missing from database"),
        }
    }

    fs::create_dir_all(&md_dir).map_err(|source| ConvertError::Io {
        path: md_dir.clone(),
        source,
    })?;

    let mut exported = sources
        .par_iter()
        .map(|(id, source, page)| {
            let blocks: Value = read_json(source)?;
            let metadata = Metadata::from_page(page, &options)?;
            let body = Converter::new(&options).render_blocks(&block_nodes(&blocks))?;
            let target = md_dir.join(format!("{id}.{}", options.extension));
            write_file(&target, &compose(&metadata, &body))?;
            tracing::info!(page = %id, path = %target.display(), "converted page");
            Ok(ExportedPage {
                id: id.clone(),
                path: target,
                metadata,
            })
        })
        .collect::<Result<Vec<_>, ConvertError>>()?;
    exported.sort_by(|a, b| a.id.cmp(&b.id));

    let artifact = match exported.as_slice() {
        [single] => ExportArtifact::File(single.path.clone()),
        _ => ExportArtifact::Directory(md_dir),
    };
    Ok(ExportResult {
        artifact,
        pages: exported,
    })
}

/// Converts one page held in memory
pub fn convert_page(
    page: &Value,
    blocks: &Value,
    options: &RenderOptions,
) -> Result<String, ConvertError> {
    let page = Page::from_value(page);
    render_page(&page, &block_nodes(blocks), options)
}

/// Converts a block forest with no page properties
pub fn convert_blocks(blocks: &Value, options: &RenderOptions) -> Result<String, ConvertError> {
    Converter::new(options).render_blocks(&block_nodes(blocks))
}

// A page file is usually a bare array of blocks; list responses wrap it in
// `results`.
fn block_nodes(blocks: &Value) -> Vec<Node> {
    let blocks = blocks.get("results").unwrap_or(blocks);
    match Node::from(blocks) {
        Node::Sequence(nodes) => nodes,
        Node::Null => Vec::new(),
        single => vec![single],
    }
}

fn page_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter(|path| path.file_name().is_some_and(|name| name != DATABASE_FILE))
        .collect();
    files.sort();
    Ok(files)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConvertError> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConvertError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ConvertError> {
    fs::write(path, contents).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}
