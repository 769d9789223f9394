//! Conversion of Notion page trees to Markdown
//!
//!     This crate turns the JSON a Notion export hands over (a page's property map and
//!     its block forest, children already fetched) into one Markdown string per page.
//!
//!     This is a pure lib: it never talks to the network. It powers the notion2md-cli,
//!     which owns configuration files, logging setup and process exit codes.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── options.rs              # RenderOptions
//!     ├── node                    # JSON classified into a closed Node union
//!     │   ├── block.rs
//!     │   ├── page.rs
//!     │   └── span.rs
//!     ├── render                  # Rule dispatch over nodes
//!     │   ├── annotations.rs      # Inline mark balancing
//!     │   ├── blocks.rs           # One renderer per block kind
//!     │   ├── date.rs
//!     │   └── whitespace.rs
//!     ├── document.rs             # Sibling assembly and page composition
//!     ├── metadata.rs             # Properties to frontmatter
//!     └── export.rs               # Directory to directory batch conversion
//!
//! Core Algorithms
//!
//!     Rich text arrives as a flat run of spans, each with its own set of annotations.
//!     Markdown wants properly nested delimiters, so the converter keeps a stack of open
//!     marks per document and opens or closes them by looking at the neighbouring spans
//!     (see render/annotations.rs). Everything else is plain recursion over the tree.
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # Aggregates the subdirectories
//!     ├── common                  # JSON builders shared by the suites
//!     ├── markdown
//!     │   └── <area>.rs
//!     └── export.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to
//!     include these in the mod.

pub mod document;
pub mod error;
pub mod export;
pub mod metadata;
pub mod node;
pub mod options;
pub mod render;

pub use document::{compose, render_page};
pub use error::ConvertError;
pub use export::{
    convert_blocks, convert_page, export, ExportArtifact, ExportResult, ExportSpec, ExportedPage,
};
pub use metadata::Metadata;
pub use node::{Node, Page};
pub use options::{CaptionMode, RenderOptions};
pub use render::{Converter, Rendered};
