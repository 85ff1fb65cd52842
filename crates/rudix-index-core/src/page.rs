//! Page assembly: header fragment, platform tables, footer fragment.

use std::io::Write;

use crate::error::IndexError;
use crate::manifest::{Classifier, parse_manifest};
use crate::metadata::MetadataTable;
use crate::platform::Platform;
use crate::render::{END_TABLE, describe, render_table};

/// Base URL that package links point to.
pub const DEFAULT_URL: &str = "https://raw.githubusercontent.com/rudix-mac/packages/master";

/// Everything a page is built from, already read into memory.
#[derive(Debug, Clone, Default)]
pub struct PageSources {
    /// Newline-delimited package filenames
    pub manifest: String,
    /// Metadata CSV text
    pub metadata: String,
    /// HTML placed before the tables
    pub header: String,
    /// HTML placed after the tables
    pub footer: String,
}

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Base URL joined with each filename to form its download link
    pub url: String,
    /// Platforms whose tables are rendered, in page order
    pub platforms: Vec<Platform>,
    /// Emit an extra `</table>` after the last table
    pub trailing_close: bool,
}

impl Default for RenderOptions {
    /// Catalina only, with the trailing `</table>` the published page has
    /// always carried.
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            platforms: vec![Platform::Catalina],
            trailing_close: true,
        }
    }
}

/// A fully assembled HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Document text
    pub html: String,
    /// Package rows across all rendered tables
    pub rows: usize,
}

impl Page {
    /// Build the page from its sources.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Metadata`] if the metadata CSV is malformed.
    pub fn build(
        sources: &PageSources,
        classifier: &Classifier,
        options: &RenderOptions,
    ) -> Result<Self, IndexError> {
        let packages = parse_manifest(&sources.manifest);
        tracing::info!("Read {} manifest entries", packages.len());

        let buckets = classifier.classify(packages);
        for (platform, filenames) in buckets.entries() {
            tracing::info!("  {platform}: {} packages", filenames.len());
        }

        let metadata = MetadataTable::parse(&sources.metadata)?;
        tracing::info!("Read {} metadata rows", metadata.len());
        let index = metadata.index();

        let mut html = sources.header.clone();
        let mut rows = 0;
        for &platform in &options.platforms {
            let table = render_table(platform, buckets.get(platform), &index, &options.url);
            tracing::info!("Rendered {}", describe(platform, &table));
            rows += table.rows;
            html.push_str(&table.html);
        }
        if options.trailing_close {
            html.push_str(END_TABLE);
        }
        html.push_str(&sources.footer);

        Ok(Self { html, rows })
    }

    /// Write the document in one piece and flush.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), IndexError> {
        writer.write_all(self.html.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;

    fn sources() -> PageSources {
        PageSources {
            manifest: "foo-1.0-macos10.15.pkg\nbar-2.0.pkg\n".to_string(),
            metadata: "name,version,summary,license,homepage\n\
                       foo,1.0,Foo tool,MIT,https://foo.org\n\
                       bar,2.0,Bar tool,BSD,https://bar.org\n"
                .to_string(),
            header: "<html><body>\n".to_string(),
            footer: "</body></html>\n".to_string(),
        }
    }

    #[test]
    fn test_end_to_end() {
        let page =
            Page::build(&sources(), &Classifier::default(), &RenderOptions::default()).unwrap();

        assert_eq!(page.rows, 1);
        assert!(page.html.starts_with("<html><body>\n<table id='macos10.15'>"));
        assert!(page.html.ends_with("</table>\n</table>\n</body></html>\n"));
        assert!(page.html.contains(
            "<td><a href=\"https://raw.githubusercontent.com/rudix-mac/packages/master/foo-1.0-macos10.15.pkg\">foo-1.0-macos10.15.pkg</a></td>"
        ));
        assert!(page.html.contains("<td>Foo tool 1.0</td>"));
        assert!(page.html.contains("<td id='optionalB'>MIT</td>"));
        assert!(page.html.contains("<a href=\"https://foo.org\">foo.org</a>"));
        // bar is in the default bucket, which is not rendered
        assert!(!page.html.contains("bar-2.0.pkg"));
    }

    #[test]
    fn test_without_trailing_close() {
        let options = RenderOptions {
            trailing_close: false,
            ..RenderOptions::default()
        };
        let page = Page::build(&sources(), &Classifier::default(), &options).unwrap();
        assert!(page.html.ends_with("</tr>\n</table>\n</body></html>\n"));
        assert_eq!(page.html.matches("</table>").count(), 1);
    }

    #[test]
    fn test_multiple_platforms_in_order() {
        let options = RenderOptions {
            url: "https://mirror.example".to_string(),
            platforms: vec![Platform::Catalina, Platform::ElCapitan],
            trailing_close: true,
        };
        let page = Page::build(&sources(), &Classifier::default(), &options).unwrap();

        assert_eq!(page.rows, 2);
        let catalina = page.html.find("<table id='macos10.15'>").unwrap();
        let el_capitan = page.html.find("<table id='macos10.11'>").unwrap();
        assert!(catalina < el_capitan);
        assert!(page.html.contains("https://mirror.example/bar-2.0.pkg"));
        assert_eq!(page.html.matches("</table>").count(), 3);
    }

    #[test]
    fn test_malformed_metadata() {
        let mut sources = sources();
        sources.metadata.push_str("baz,1.0,\"unterminated\n");
        let err = Page::build(&sources, &Classifier::default(), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IndexError::Metadata(MetadataError::UnterminatedQuote { line: 4 })
        ));
    }

    #[test]
    fn test_short_metadata_row_outside_rendered_bucket() {
        let sources = PageSources {
            manifest: "bar-2.0.pkg\n".to_string(),
            metadata: "name,version,summary,license,homepage\n\
                       foo,1.0,Foo tool,MIT,https://foo.org\n\
                       bar,2.0\n"
                .to_string(),
            header: "<body>\n".to_string(),
            footer: "</body>\n".to_string(),
        };
        let page =
            Page::build(&sources, &Classifier::default(), &RenderOptions::default()).unwrap();
        assert_eq!(page.rows, 0);
        assert!(page.html.ends_with("</tr>\n</table>\n</table>\n</body>\n"));
    }

    #[test]
    fn test_write_to() {
        let page = Page {
            html: "<p>hi</p>\n".to_string(),
            rows: 0,
        };
        let mut out = Vec::new();
        page.write_to(&mut out).unwrap();
        assert_eq!(out, b"<p>hi</p>\n");
    }
}
