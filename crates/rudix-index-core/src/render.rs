//! HTML rendering of package tables.
//!
//! Values are inserted verbatim; the metadata table is trusted input.

use crate::metadata::{MetadataIndex, MetadataRow};
use crate::platform::Platform;

/// Closing tag appended after each table.
pub const END_TABLE: &str = "</table>\n";

/// Strip a leading `https://`, or else `http://`, for display.
///
/// # Example
///
/// ```
/// use rudix_index_core::render::display_url;
///
/// assert_eq!(display_url("https://example.com/x"), "example.com/x");
/// assert_eq!(display_url("ftp://example.com"), "ftp://example.com");
/// ```
pub fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Opening tag, caption and column headings for `platform`.
pub fn begin_table(platform: Platform) -> String {
    format!(
        "<table id='{id}'>\n\
         <caption>{title}</caption>\n\
         <tr>\n  \
         <th>Package</th>\n  \
         <th>Summary</th>\n  \
         <th id='optionalB'>License</th>\n  \
         <th id='optionalA'>Homepage</th>\n\
         </tr>\n",
        id = platform.as_str(),
        title = platform.title(),
    )
}

/// One `<tr>` linking `filename` under `url` and describing it with `row`.
pub fn package_row(url: &str, filename: &str, row: &MetadataRow) -> String {
    format!(
        "<tr>\n  \
         <td><a href=\"{url}/{filename}\">{filename}</a></td>\n  \
         <td>{summary} {version}</td>\n  \
         <td id='optionalB'>{license}</td>\n  \
         <td id='optionalA'><a href=\"{homepage}\">{display}</a></td>\n\
         </tr>\n",
        summary = row.summary,
        version = row.version,
        license = row.license,
        homepage = row.homepage,
        display = display_url(&row.homepage),
    )
}

/// A rendered platform table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Complete `<table>` markup, closing tag included
    pub html: String,
    /// Number of package rows emitted
    pub rows: usize,
}

/// Render the table for one platform bucket.
///
/// Rows follow bucket order; a filename matching several metadata rows gets
/// one row per match, in metadata order. Filenames without metadata are
/// left out.
pub fn render_table(
    platform: Platform,
    filenames: &[String],
    index: &MetadataIndex<'_>,
    url: &str,
) -> RenderedTable {
    let mut html = begin_table(platform);
    let mut rows = 0;

    for filename in filenames {
        tracing::debug!("create_table:{platform}:{filename}");
        let matches = index.matches(filename);
        if matches.is_empty() {
            tracing::debug!("No metadata for {filename}, skipping");
        }
        for row in matches {
            tracing::debug!("  matched {}", row.name_version());
            html.push_str(&package_row(url, filename, row));
            rows += 1;
        }
    }

    html.push_str(END_TABLE);
    RenderedTable { html, rows }
}

/// Summary line used in logs, e.g. `macos10.15: 3 rows`.
pub fn describe(platform: Platform, table: &RenderedTable) -> String {
    format!("{platform}: {} rows", table.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataTable;

    fn table() -> MetadataTable {
        MetadataTable::parse(
            "name,version,summary,license,homepage\n\
             foo,1.0,Foo tool,MIT,https://foo.org\n\
             foo,1.0,Foo again,GPL,http://foo.net\n\
             bar,2.0,Bar tool,BSD,bar.example\n",
        )
        .unwrap()
    }

    #[test]
    fn test_display_url() {
        assert_eq!(display_url("https://example.com/x"), "example.com/x");
        assert_eq!(display_url("http://example.com"), "example.com");
        assert_eq!(display_url("example.com"), "example.com");
        assert_eq!(
            display_url("https://http://example.com"),
            "http://example.com"
        );
        assert_eq!(
            display_url("see https://example.com"),
            "see https://example.com"
        );
    }

    #[test]
    fn test_begin_table() {
        let html = begin_table(Platform::Catalina);
        assert!(html.starts_with("<table id='macos10.15'>\n"));
        assert!(html.contains("<caption>macOS Catalina (Version 10.15)</caption>\n"));
        assert!(html.contains("  <th id='optionalA'>Homepage</th>\n</tr>\n"));
    }

    #[test]
    fn test_package_row() {
        let table = table();
        let html = package_row("https://dl.example", "foo-1.0-macos10.15.pkg", &table.rows[0]);
        assert_eq!(
            html,
            "<tr>\n  \
             <td><a href=\"https://dl.example/foo-1.0-macos10.15.pkg\">foo-1.0-macos10.15.pkg</a></td>\n  \
             <td>Foo tool 1.0</td>\n  \
             <td id='optionalB'>MIT</td>\n  \
             <td id='optionalA'><a href=\"https://foo.org\">foo.org</a></td>\n\
             </tr>\n"
        );
    }

    #[test]
    fn test_render_table_order_and_multi_match() {
        let table = table();
        let index = table.index();
        let filenames = vec![
            "bar-2.0-macos10.15.pkg".to_string(),
            "missing-1.0-macos10.15.pkg".to_string(),
            "foo-1.0-macos10.15.pkg".to_string(),
        ];
        let rendered = render_table(Platform::Catalina, &filenames, &index, "u");

        assert_eq!(rendered.rows, 3);
        assert!(!rendered.html.contains("missing"));
        assert!(rendered.html.ends_with("</tr>\n</table>\n"));

        let bar = rendered.html.find("Bar tool 2.0").unwrap();
        let foo = rendered.html.find("Foo tool 1.0").unwrap();
        let again = rendered.html.find("Foo again 1.0").unwrap();
        assert!(bar < foo && foo < again);
    }

    #[test]
    fn test_render_empty_bucket() {
        let table = table();
        let rendered = render_table(Platform::Mojave, &[], &table.index(), "u");
        assert_eq!(rendered.rows, 0);
        assert_eq!(
            rendered.html,
            format!("{}{END_TABLE}", begin_table(Platform::Mojave))
        );
        assert_eq!(describe(Platform::Mojave, &rendered), "macos10.14: 0 rows");
    }
}
