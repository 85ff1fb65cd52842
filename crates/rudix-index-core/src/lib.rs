//! rudix-index - Download page generator for Rudix packages
//!
//! Cross-references a manifest of package filenames against a CSV metadata
//! table and renders one HTML table per macOS release.
//!
//! # Pipeline
//!
//! - **Classify**: [`Classifier`] sorts manifest entries into [`Buckets`] by
//!   filename suffix (`-macos10.15.pkg`).
//! - **Load**: [`MetadataTable`] parses the CSV; [`MetadataIndex`] looks rows
//!   up by package name.
//! - **Render**: [`render::render_table`] emits one `<table>` per platform and
//!   [`Page`] wraps the tables in the caller's header and footer HTML.
//!
//! ```
//! use rudix_index_core::{Classifier, Page, PageSources, RenderOptions};
//!
//! let sources = PageSources {
//!     manifest: "jq-1.6-macos10.15.pkg\n".to_string(),
//!     metadata: "name,version,summary,license,homepage\n\
//!                jq,1.6,JSON processor,MIT,https://stedolan.github.io/jq\n"
//!         .to_string(),
//!     header: "<body>\n".to_string(),
//!     footer: "</body>\n".to_string(),
//! };
//! let page = Page::build(&sources, &Classifier::default(), &RenderOptions::default()).unwrap();
//! assert_eq!(page.rows, 1);
//! assert!(page.html.contains("<td>JSON processor 1.6</td>"));
//! ```

pub mod error;
pub mod manifest;
pub mod metadata;
pub mod page;
pub mod platform;
pub mod render;

// Re-exports for convenience
pub use error::{IndexError, MetadataError};
pub use manifest::{Buckets, Classifier, SuffixRule};
pub use metadata::{MetadataIndex, MetadataRow, MetadataTable};
pub use page::{DEFAULT_URL, Page, PageSources, RenderOptions};
pub use platform::Platform;
