//! Allow-list of recognized provinces
//!
//! Matching is deliberately loose: a token matches an entry when either
//! string contains the other. Source data carries partial names, ASCII
//! transliterations and upper-case spellings of the same province.

use crate::constants::{REGION_ALLOW_LIST, REGION_CENTROIDS};
use regex::Regex;
use std::sync::OnceLock;

/// Parenthesized qualifier, e.g. the `(BALIKESIR)` in `SOGUCAK-SINDIRGI (BALIKESIR)`
fn bracket_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^()]+)\)").expect("bracket pattern is valid"))
}

#[derive(Debug, Clone, PartialEq)]
struct AllowListEntry {
    canonical: String,
    folded: String,
    /// Capital coordinates, when the province is a known one
    centroid: Option<(f64, f64)>,
}

/// Fixed set of canonical province names
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAllowList {
    entries: Vec<AllowListEntry>,
}

impl Default for RegionAllowList {
    fn default() -> Self {
        Self::marmara()
    }
}

impl RegionAllowList {
    /// Build an allow-list from canonical names, keeping their order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty())
            .map(|canonical| {
                let folded = fold_region_name(&canonical);
                let centroid = REGION_CENTROIDS
                    .iter()
                    .find(|(name, _, _)| fold_region_name(name) == folded)
                    .map(|&(_, latitude, longitude)| (latitude, longitude));
                AllowListEntry {
                    canonical,
                    folded,
                    centroid,
                }
            })
            .collect();

        Self { entries }
    }

    /// The eleven Marmara region provinces
    pub fn marmara() -> Self {
        Self::new(REGION_ALLOW_LIST.iter().copied())
    }

    /// Canonical names in allow-list order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-sensitive bidirectional substring match on the raw spelling
    fn match_exact(&self, token: &str) -> Option<&str> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| token.contains(&entry.canonical) || entry.canonical.contains(token))
            .map(|entry| entry.canonical.as_str())
    }

    /// Bidirectional substring match, exact spelling first
    ///
    /// A hit on the canonical spelling wins. Otherwise both sides are folded
    /// with [`fold_region_name`], so `ISTANBUL`, `istanbul` and `İstanbul` all
    /// resolve to the canonical `İstanbul`. The first entry in allow-list order
    /// wins within each pass.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        if let Some(name) = self.match_exact(token) {
            return Some(name);
        }

        let folded = fold_region_name(token);
        if folded.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| folded.contains(&entry.folded) || entry.folded.contains(&folded))
            .map(|entry| entry.canonical.as_str())
    }

    /// Province whose capital is closest to a point
    ///
    /// Distance is equirectangular, which is plenty at provincial scale.
    /// Entries without known coordinates are ignored; `None` only when no
    /// entry has any.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&str> {
        let scale = latitude.to_radians().cos();
        self.entries
            .iter()
            .filter_map(|entry| {
                let (lat, lon) = entry.centroid?;
                let dx = (lon - longitude) * scale;
                let dy = lat - latitude;
                Some((dx * dx + dy * dy, entry.canonical.as_str()))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, name)| name)
    }

    /// Resolve a free-text location, preferring its bracketed qualifiers
    ///
    /// `( ... )` groups are tried from the end of the string backwards, so a
    /// trailing revision stamp such as `REVIZE01 (2024.01.15 14:35:12)` does
    /// not hide the province qualifier before it. Only when no group names an
    /// allowed province is the whole string scanned.
    pub fn resolve_location(&self, location: &str) -> Option<&str> {
        let groups: Vec<&str> = bracket_pattern()
            .captures_iter(location)
            .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
            .collect();

        groups
            .iter()
            .rev()
            .find_map(|group| self.resolve(group))
            .or_else(|| self.resolve(location))
    }
}

/// Fold a region name for comparison
///
/// Upper-cases with Turkish letters mapped to their ASCII base letter and
/// dotted/dotless `i` collapsed, so that transliterated and native
/// spellings compare equal. Surrounding whitespace is dropped.
pub fn fold_region_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for c in name.trim().chars() {
        match c {
            'İ' | 'I' | 'ı' | 'i' => folded.push('I'),
            'Ş' | 'ş' => folded.push('S'),
            'Ğ' | 'ğ' => folded.push('G'),
            'Ü' | 'ü' => folded.push('U'),
            'Ö' | 'ö' => folded.push('O'),
            'Ç' | 'ç' => folded.push('C'),
            'Â' | 'â' => folded.push('A'),
            'Î' | 'î' => folded.push('I'),
            'Û' | 'û' => folded.push('U'),
            '\u{0307}' => {}
            other => folded.extend(other.to_uppercase()),
        }
    }
    folded
}
