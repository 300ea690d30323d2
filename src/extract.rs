// API surface extraction from minified bundle text.
//
// This is a best-effort regex scan, not a JavaScript parser: matches inside
// comments, string literals and dead code count like live bindings, and a
// bundle whose identifiers were mangled by the minifier yields next to
// nothing without any error.
use crate::catalog::{export_pattern, Category};
use crate::error::{Result, ScanError};
use regex::Regex;
use serde::Serialize;
use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Distinct identifiers found for one category, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentifierSet(BTreeSet<String>);

impl IdentifierSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Every category's identifiers plus the raw `exports.<name> =` scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiSurface {
    pub categories: BTreeMap<Category, IdentifierSet>,
    pub exports: IdentifierSet,
}

impl ApiSurface {
    /// Scan `source` for every category in the catalog.
    pub fn scan(source: &str) -> Self {
        let categories: BTreeMap<Category, IdentifierSet> = Category::ALL
            .into_iter()
            .map(|category| (category, scan_category(source, category)))
            .collect();
        let exports = scan_exports(source);

        let total: usize = categories.values().map(IdentifierSet::len).sum();
        info!(
            "Scanned {} bytes: {} API names, {} exports",
            source.len(),
            total,
            exports.len()
        );
        if total == 0 && !source.trim().is_empty() {
            warn!("No API names recognized; the bundle may have mangled identifiers");
        }

        Self {
            categories,
            exports,
        }
    }

    /// Identifiers of one category. Categories with no match yield an empty set.
    pub fn get(&self, category: Category) -> &IdentifierSet {
        static EMPTY: IdentifierSet = IdentifierSet(BTreeSet::new());
        self.categories.get(&category).unwrap_or(&EMPTY)
    }

    /// Iterate every catalog category in order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &IdentifierSet)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Sorted distinct names captured by `category`'s rule.
pub fn scan_category(source: &str, category: Category) -> IdentifierSet {
    let names = capture_all(source, category.pattern());
    debug!("{}: {} names", category, names.len());
    names
}

/// Names bound through the generic `exports.<name> =` convention.
pub fn scan_exports(source: &str) -> IdentifierSet {
    capture_all(source, export_pattern())
}

fn capture_all(source: &str, pattern: &Regex) -> IdentifierSet {
    pattern
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Decode bundle bytes as UTF-8, dropping invalid sequences.
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    if dropped > 0 {
        debug!("Dropped {} undecodable bytes", dropped);
    }
    text
}

/// Read the bundle at `path`. A missing file is fatal.
pub fn load_bundle(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ScanError::BundleNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {}", path.display());
    Ok(decode_lenient(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &IdentifierSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_geom_point_and_line() {
        let set = scan_category("a={geom_point:1};geom_line=function(){}", Category::Geom);
        assert_eq!(names(&set), vec!["line", "point"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let src = "geom_bar:1,geom_bar :2,geom_bar= 3,geom_area:4";
        let set = scan_category(src, Category::Geom);
        assert_eq!(names(&set), vec!["area", "bar"]);
    }

    #[test]
    fn test_scale_suffixes() {
        let src = "scale_x_log10 = function(){}; scale_color_manual = function(){};";
        let set = scan_category(src, Category::Scale);
        assert_eq!(names(&set), vec!["color_manual", "x_log10"]);
    }

    #[test]
    fn test_rule_shape_must_match_exactly() {
        let src = "geom_point(1); geom_line.call(x); geom_-=1; stat_:1";
        assert!(scan_category(src, Category::Geom).is_empty());
        assert!(scan_category(src, Category::Stat).is_empty());
    }

    #[test]
    fn test_named_categories() {
        let src = "qq_plot:a,joint_plot=b,residual_plot(c),geocode:d,maptile:e";
        let surface = ApiSurface::scan(src);
        assert_eq!(names(surface.get(Category::Bistro)), vec!["joint_plot", "qq_plot"]);
        assert_eq!(names(surface.get(Category::Geospatial)), vec!["geocode"]);
    }

    #[test]
    fn test_every_member_satisfies_its_rule() {
        let src = "geom_point:1;scale_x_continuous=2;coord_flip:3;stat_bin=4;\
                   theme_minimal:5;flavor_darcula=6;corr_plot:7;maptiles=8;\
                   exports.foo=9;geom_text_repel :10";
        let surface = ApiSurface::scan(src);
        for (category, set) in surface.iter() {
            for name in set {
                assert!(category.accepts(name), "{} rejected {}", category, name);
            }
        }
    }

    #[test]
    fn test_empty_source_yields_every_category_empty() {
        let surface = ApiSurface::scan("");
        assert_eq!(surface.iter().count(), Category::ALL.len());
        assert!(surface.iter().all(|(_, set)| set.is_empty()));
        assert!(surface.exports.is_empty());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let src = "geom_point:1;scale_y_sqrt=2;flavor_solarized_light:3";
        assert_eq!(ApiSurface::scan(src), ApiSurface::scan(src));
    }

    #[test]
    fn test_exports() {
        let set = scan_exports("exports.letsPlot = x; export.buildPlot=y; exports.z(1)");
        assert_eq!(names(&set), vec!["buildPlot", "letsPlot"]);
    }

    #[test]
    fn test_decode_lenient_drops_invalid_bytes() {
        let bytes = b"geom_\xffpoint:1;geom_line:\xc3\x28";
        let text = decode_lenient(bytes);
        assert_eq!(text, "geom_point:1;geom_line:(");
        assert_eq!(
            names(&scan_category(&text, Category::Geom)),
            vec!["line", "point"]
        );
    }

    #[test]
    fn test_load_bundle_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bundle(&dir.path().join("lets-plot.min.js")).unwrap_err();
        assert!(matches!(err, ScanError::BundleNotFound(_)));
    }

    #[test]
    fn test_load_bundle_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lets-plot.min.js");
        fs::write(&path, b"coord_polar:1\xfe").unwrap();
        let text = load_bundle(&path).unwrap();
        assert_eq!(text, "coord_polar:1");
    }
}
