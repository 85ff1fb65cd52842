//! Target platforms a package can be built for.

/// macOS release a package targets.
///
/// Each platform owns a filename suffix (`-macos10.15.pkg`) used by the
/// manifest classifier and a human title used as the table caption.
///
/// # Example
///
/// ```
/// use rudix_index_core::Platform;
///
/// let platform: Platform = "macos10.15".parse().unwrap();
/// assert_eq!(platform.suffix(), "-macos10.15.pkg");
/// assert_eq!(platform.title(), "macOS Catalina (Version 10.15)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    /// OS X El Capitan. Also the fallback bucket for unmatched filenames.
    ElCapitan,
    /// macOS Mojave
    Mojave,
    /// macOS Catalina
    Catalina,
}

impl Platform {
    /// Every known platform, oldest first.
    pub const ALL: [Self; 3] = [Self::ElCapitan, Self::Mojave, Self::Catalina];

    /// Bucket that receives filenames no suffix rule claims.
    pub const DEFAULT: Self = Self::ElCapitan;

    /// Short identifier, also used as the HTML table id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElCapitan => "macos10.11",
            Self::Mojave => "macos10.14",
            Self::Catalina => "macos10.15",
        }
    }

    /// Caption shown above the platform's table.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ElCapitan => "OS X El Capitan (Version 10.11)",
            Self::Mojave => "macOS Mojave (Version 10.14)",
            Self::Catalina => "macOS Catalina (Version 10.15)",
        }
    }

    /// Package filename suffix identifying this platform.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::ElCapitan => "-macos10.11.pkg",
            Self::Mojave => "-macos10.14.pkg",
            Self::Catalina => "-macos10.15.pkg",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos10.11" | "10.11" | "elcapitan" => Ok(Self::ElCapitan),
            "macos10.14" | "10.14" | "mojave" => Ok(Self::Mojave),
            "macos10.15" | "10.15" | "catalina" => Ok(Self::Catalina),
            _ => Err(format!("Unknown platform: {s}")),
        }
    }
}
