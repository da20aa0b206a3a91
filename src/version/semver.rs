use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

static LEADING_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").unwrap());

static FLOATING_PATCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+\.\*").unwrap());

/// Coerce a loosely formatted version string into a semver::Version.
///
/// The first `major[.minor[.patch]]` run of digits is used and missing parts are
/// padded with zeros. Anything around it (wildcards, prefixes) is ignored.
///
/// Examples:
/// - "1.120.*" -> Version(1, 120, 0)
/// - "1.120.4" -> Version(1, 120, 4)
/// - "v1" -> Version(1, 0, 0)
pub fn coerce(version: &str) -> Option<Version> {
    let caps = LEADING_TRIPLE.captures(version)?;
    let part = |index: usize| -> Option<u64> {
        match caps.get(index) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Returns true if the version accepts any patch of its minor line (`1.120.*`)
pub fn is_floating(version: &str) -> bool {
    FLOATING_PATCH.is_match(version)
}

/// Key of the minor line a version belongs to (`1.120.4` -> `1.120.*`)
pub fn floating_key(version: &Version) -> String {
    format!("{}.{}.*", version.major, version.minor)
}
