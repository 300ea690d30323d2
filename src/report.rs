// Coverage report for the scanned lets-plot API surface
use crate::catalog::Category;
use crate::codegen::{GeneratedStub, StubStyle};
use crate::extract::{ApiSurface, IdentifierSet};
use colored::Colorize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

pub const SCAN_HEADING: &str = "# lets-plot.min.js API scan";
pub const MISSING_HEADING: &str = "# Missing from ggoat";
pub const STUBS_HEADING: &str = "# --- Python stubs for missing features (template) ---";

// Wide enough for "Geospatial: ".
const LABEL_WIDTH: usize = 12;

/// Format names the way Python prints a list of strings: `['a', 'b']`.
pub fn format_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let quoted: Vec<String> = names.into_iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

pub struct CoverageReport<'a> {
    surface: &'a ApiSurface,
    missing: Option<BTreeMap<Category, IdentifierSet>>,
}

impl<'a> CoverageReport<'a> {
    pub fn new(surface: &'a ApiSurface) -> Self {
        Self {
            surface,
            missing: None,
        }
    }

    /// Attach the package diff produced by [`crate::coverage::missing`].
    pub fn with_missing(mut self, missing: BTreeMap<Category, IdentifierSet>) -> Self {
        self.missing = Some(missing);
        self
    }

    /// Text report: one line per category in catalog order, empty ones
    /// included, then the raw exports line.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", heading(SCAN_HEADING, color));
        for (category, names) in self.surface.iter() {
            out.push_str(&line(
                category.label(),
                &format_names(names.iter().map(String::as_str)),
                color,
            ));
        }
        out.push_str(&line(
            "Exports",
            &format_names(self.surface.exports.iter().map(String::as_str)),
            color,
        ));

        if let Some(missing) = &self.missing {
            let _ = writeln!(out, "\n{}\n", heading(MISSING_HEADING, color));
            for category in Category::ALL {
                let qualified: Vec<String> = missing
                    .get(&category)
                    .map(|names| names.iter().map(|n| category.qualify(n)).collect())
                    .unwrap_or_default();
                out.push_str(&line(
                    category.label(),
                    &format_names(qualified.iter().map(String::as_str)),
                    color,
                ));
            }
        }
        out
    }

    /// Stubs for every scanned name, or only the missing ones when a
    /// package diff is attached.
    pub fn stubs(&self) -> Vec<GeneratedStub> {
        let mut stubs = Vec::new();
        for (category, names) in self.surface.iter() {
            let names = match &self.missing {
                Some(missing) => match missing.get(&category) {
                    Some(gaps) => gaps,
                    None => continue,
                },
                None => names,
            };
            stubs.extend(names.iter().map(|n| GeneratedStub::new(category, n.as_str())));
        }
        stubs
    }

    pub fn render_stubs(&self) -> String {
        let mut out = format!("\n{}\n\n", STUBS_HEADING);
        for stub in self.stubs() {
            out.push_str(&stub.render(StubStyle::Template));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self, include_stubs: bool) -> Value {
        let mut doc = json!({
            "categories": self.surface.categories,
            "exports": self.surface.exports,
        });
        if let Some(missing) = &self.missing {
            let qualified: Map<String, Value> = missing
                .iter()
                .map(|(category, names)| {
                    let names: Vec<String> = names.iter().map(|n| category.qualify(n)).collect();
                    (category.tag().to_string(), json!(names))
                })
                .collect();
            doc["missing"] = Value::Object(qualified);
        }
        if include_stubs {
            doc["stubs"] = json!(self.stubs());
        }
        doc
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn line(label: &str, value: &str, color: bool) -> String {
    let label = format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH);
    if color {
        format!("{}{}\n", label.yellow(), value)
    } else {
        format!("{}{}\n", label, value)
    }
}
