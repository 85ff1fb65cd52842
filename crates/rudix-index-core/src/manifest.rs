//! Manifest classification.
//!
//! A manifest is a newline-delimited list of package filenames. Each entry
//! is sorted into exactly one platform bucket by suffix.

use std::collections::BTreeMap;

use crate::platform::Platform;

/// A suffix rule mapping filenames to a platform bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    /// Bucket receiving matching filenames
    pub platform: Platform,
    /// Dormant rules are kept in the table but never match
    pub enabled: bool,
}

/// Ordered suffix rules. First enabled match wins; anything left over goes
/// to [`Platform::DEFAULT`].
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<SuffixRule>,
}

impl Default for Classifier {
    /// The Mojave rule ships dormant: Mojave packages land in the default
    /// bucket until it is enabled.
    fn default() -> Self {
        Self {
            rules: vec![
                SuffixRule {
                    platform: Platform::ElCapitan,
                    enabled: true,
                },
                SuffixRule {
                    platform: Platform::Mojave,
                    enabled: false,
                },
                SuffixRule {
                    platform: Platform::Catalina,
                    enabled: true,
                },
            ],
        }
    }
}

impl Classifier {
    /// Activate the rule for `platform`. Evaluation order is unchanged.
    pub fn enable(&mut self, platform: Platform) -> &mut Self {
        for rule in &mut self.rules {
            if rule.platform == platform {
                rule.enabled = true;
            }
        }
        self
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }

    /// Bucket for a single filename.
    pub fn platform_for(&self, filename: &str) -> Platform {
        self.rules
            .iter()
            .filter(|rule| rule.enabled)
            .find(|rule| filename.ends_with(rule.platform.suffix()))
            .map_or(Platform::DEFAULT, |rule| rule.platform)
    }

    /// Sort manifest entries into buckets, preserving manifest order within
    /// each bucket.
    pub fn classify<I, S>(&self, filenames: I) -> Buckets
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buckets = Buckets::new();
        for filename in filenames {
            let filename = filename.into();
            let platform = self.platform_for(&filename);
            tracing::trace!("{filename} -> {platform}");
            buckets.push(platform, filename);
        }
        buckets
    }
}

/// Filenames grouped by platform. Every platform has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    inner: BTreeMap<Platform, Vec<String>>,
}

impl Default for Buckets {
    fn default() -> Self {
        Self::new()
    }
}

impl Buckets {
    /// Empty buckets for every known platform.
    pub fn new() -> Self {
        Self {
            inner: Platform::ALL.iter().map(|p| (*p, Vec::new())).collect(),
        }
    }

    fn push(&mut self, platform: Platform, filename: String) {
        self.inner.entry(platform).or_default().push(filename);
    }

    /// Filenames assigned to `platform`, in manifest order.
    pub fn get(&self, platform: Platform) -> &[String] {
        self.inner
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate `(platform, filenames)` pairs, oldest platform first.
    pub fn entries(&self) -> impl Iterator<Item = (Platform, &[String])> {
        self.inner.iter().map(|(p, v)| (*p, v.as_slice()))
    }

    /// Total number of classified filenames.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    /// True when no filename was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split manifest text into trimmed entries.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. Blank lines are kept as empty
/// strings; they classify into the default bucket and never match a
/// metadata row.
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split_terminator(['\n', '\r'])
        .map(|line| line.trim().to_string())
        .collect()
}
