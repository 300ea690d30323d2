// Static catalog of lets-plot API categories and the rules that recognize them
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Named API family exposed by the lets-plot bundle.
///
/// Declaration order is the catalog order: reports, JSON maps and generated
/// artifacts are all emitted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Geom,
    Scale,
    Coord,
    Stat,
    Theme,
    Flavor,
    Bistro,
    Geospatial,
}

/// How identifiers of a category are spotted in raw bundle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `<tag>_<name>` followed by `:` or `=`; `<name>` is captured.
    Prefixed,
    /// One of a fixed list of identifiers followed by `:` or `=`; the whole
    /// identifier is captured.
    Named(&'static [&'static str]),
}

const BISTRO_NAMES: &[&str] = &[
    "image_matrix",
    "corr_plot",
    "qq_plot",
    "joint_plot",
    "residual_plot",
    "waterfall_plot",
];

const GEOSPATIAL_NAMES: &[&str] = &["geocode", "maptiles"];

/// Names that need a hand-written wrapper rather than the generic stub.
pub const COMPLEX: &[&str] = &[
    "facet_wrap",
    "facet_grid",
    "joint_plot",
    "residual_plot",
    "waterfall_plot",
    "image_matrix",
    "corr_plot",
    "geocode",
    "maptiles",
];

// Identifier characters accepted after a category prefix.
const NAME_CLASS: &str = "[a-zA-Z0-9_]";

lazy_static! {
    static ref PATTERNS: Vec<Regex> = Category::ALL
        .iter()
        .map(|category| {
            Regex::new(&category.rule().pattern_source(category.tag()))
                .expect("category pattern must compile")
        })
        .collect();
    static ref EXPORT_PATTERN: Regex =
        Regex::new(r"exports?\.([a-zA-Z0-9_]+)\s*=").expect("export pattern must compile");
    static ref NAME_PATTERN: Regex =
        Regex::new(&format!("^{}+$", NAME_CLASS)).expect("name pattern must compile");
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Geom,
        Category::Scale,
        Category::Coord,
        Category::Stat,
        Category::Theme,
        Category::Flavor,
        Category::Bistro,
        Category::Geospatial,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Geom => "geom",
            Category::Scale => "scale",
            Category::Coord => "coord",
            Category::Stat => "stat",
            Category::Theme => "theme",
            Category::Flavor => "flavor",
            Category::Bistro => "bistro",
            Category::Geospatial => "geospatial",
        }
    }

    /// Label used on the coverage report line.
    pub fn label(self) -> &'static str {
        match self {
            Category::Geom => "Geoms",
            Category::Scale => "Scales",
            Category::Coord => "Coords",
            Category::Stat => "Stats",
            Category::Theme => "Themes",
            Category::Flavor => "Flavors",
            Category::Bistro => "Bistro",
            Category::Geospatial => "Geospatial",
        }
    }

    pub fn rule(self) -> MatchRule {
        match self {
            Category::Bistro => MatchRule::Named(BISTRO_NAMES),
            Category::Geospatial => MatchRule::Named(GEOSPATIAL_NAMES),
            _ => MatchRule::Prefixed,
        }
    }

    /// Compiled scanning regex. Capture group 1 is the identifier.
    pub fn pattern(self) -> &'static Regex {
        &PATTERNS[self.index()]
    }

    /// Whether `name` could have been captured by this category's rule.
    pub fn accepts(self, name: &str) -> bool {
        match self.rule() {
            MatchRule::Prefixed => NAME_PATTERN.is_match(name),
            MatchRule::Named(names) => names.contains(&name),
        }
    }

    /// Python-facing function name, `<tag>_<name>`.
    pub fn qualify(self, name: &str) -> String {
        format!("{}_{}", self.tag(), name)
    }

    /// File name of the generated artifact, `<tag>s_autogen.py`.
    pub fn artifact_file_name(self) -> String {
        format!("{}s_autogen.py", self.tag())
    }

    fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl MatchRule {
    fn pattern_source(self, tag: &str) -> String {
        match self {
            MatchRule::Prefixed => format!(r"{}_({}+)\s*[:=]", regex::escape(tag), NAME_CLASS),
            MatchRule::Named(names) => {
                let alternatives: Vec<String> = names.iter().map(|n| regex::escape(n)).collect();
                format!(r"({})\s*[:=]", alternatives.join("|"))
            }
        }
    }
}

/// Generic `export.<name> =` / `exports.<name> =` binding pattern.
pub fn export_pattern() -> &'static Regex {
    &EXPORT_PATTERN
}

pub fn is_complex(name: &str) -> bool {
    COMPLEX.contains(&name)
}
