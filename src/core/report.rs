// UniAIMS - core/report.rs
//
// Report builder: an ordered list of chart modules collected from the
// analysis views, with expand/collapse, removal, drag reordering and
// JSON templates.

use crate::core::analysis::{mock_scatter, BinSettings, HistogramBin, ViolinProfile, YAxisMode};
use crate::util::error::TemplateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Attribute,
    Correlation,
    Comparison,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Attribute => "ATTRIBUTE",
            Self::Correlation => "CORRELATION",
            Self::Comparison => "COMPARISON",
        }
    }
}

/// A setting shown in a module's expanded details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Preview data for a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "values", rename_all = "lowercase")]
pub enum ReportData {
    Bars(Vec<(String, u32)>),
    Scatter(Vec<(f64, f64)>),
    Series(Vec<(String, f64)>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModule {
    pub id: String,
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub attributes: Vec<String>,
    /// Insertion-ordered key/value pairs.
    #[serde(default)]
    pub settings: Vec<(String, SettingValue)>,
    pub images: Vec<String>,
    #[serde(default)]
    pub data: Option<ReportData>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bars(items: &[(&str, u32)]) -> ReportData {
    ReportData::Bars(items.iter().map(|(r, c)| (r.to_string(), *c)).collect())
}

/// The modules a fresh report starts with.
pub fn mock_modules() -> Vec<ReportModule> {
    vec![
        ReportModule {
            id: "mod_1".to_string(),
            kind: ReportKind::Attribute,
            title: "Attribute Analysis: Area".to_string(),
            description: "Distribution of particle area showing predominant size range."
                .to_string(),
            attributes: strings(&["Area"]),
            settings: vec![
                ("Bin Size".to_string(), SettingValue::Number(5.0)),
                ("Range".to_string(), SettingValue::Text("0-20".to_string())),
                ("Y-Axis".to_string(), SettingValue::Text("Count".to_string())),
            ],
            images: strings(&["Img_001.tif", "Img_002.tif", "Img_003.tif"]),
            data: Some(bars(&[("0-5", 120), ("5-10", 450), ("10-15", 320), ("15-20", 110)])),
        },
        ReportModule {
            id: "mod_2".to_string(),
            kind: ReportKind::Attribute,
            title: "Attribute Analysis: Aspect Ratio".to_string(),
            description: "Shape consistency analysis.".to_string(),
            attributes: strings(&["Aspect Ratio"]),
            settings: vec![
                ("Bin Size".to_string(), SettingValue::Number(0.2)),
                ("Range".to_string(), SettingValue::Text("1.0-2.0".to_string())),
                ("Y-Axis".to_string(), SettingValue::Text("Percentage".to_string())),
            ],
            images: strings(&["Img_001.tif", "Img_004.tif"]),
            data: Some(bars(&[
                ("1.0-1.2", 300),
                ("1.2-1.4", 400),
                ("1.4-1.6", 200),
                ("1.6+", 100),
            ])),
        },
        ReportModule {
            id: "mod_3".to_string(),
            kind: ReportKind::Correlation,
            title: "Correlation: Area vs. Aspect Ratio".to_string(),
            description: "Scatter plot indicating relationship between size and shape."
                .to_string(),
            attributes: strings(&["Area", "Aspect Ratio"]),
            settings: vec![
                ("Regression".to_string(), SettingValue::Flag(true)),
                ("Log Scale X".to_string(), SettingValue::Flag(false)),
                ("Log Scale Y".to_string(), SettingValue::Flag(false)),
            ],
            images: strings(&["Img_001.tif", "Img_002.tif", "Img_003.tif", "Img_005.tif"]),
            data: Some(ReportData::Scatter(mock_scatter(50, 3))),
        },
        ReportModule {
            id: "mod_4".to_string(),
            kind: ReportKind::Comparison,
            title: "Comparison: Area Distribution".to_string(),
            description: "Violin plot comparison across 3 selected images.".to_string(),
            attributes: strings(&["Area"]),
            settings: vec![("Log Scale".to_string(), SettingValue::Flag(true))],
            images: strings(&["Img_001.tif", "Img_002.tif", "Img_003.tif"]),
            data: Some(ReportData::Series(vec![
                ("Img_1".to_string(), 80.0),
                ("Img_2".to_string(), 95.0),
                ("Img_3".to_string(), 60.0),
            ])),
        },
    ]
}

// =============================================================================
// Modules built from the analysis views
// =============================================================================

impl ReportModule {
    /// Histogram module for one attribute. The id is assigned by `ReportBuilder::add`.
    pub fn attribute(
        attribute: &str,
        images: Vec<String>,
        bins: &BinSettings,
        y_axis: YAxisMode,
        data: &[HistogramBin],
    ) -> Self {
        let y_label = match y_axis {
            YAxisMode::Count => "Count",
            YAxisMode::Percentage => "Percentage",
        };
        Self {
            id: String::new(),
            kind: ReportKind::Attribute,
            title: format!("Attribute Analysis: {attribute}"),
            description: format!(
                "Distribution of {} across {} images.",
                attribute.to_lowercase(),
                images.len()
            ),
            attributes: vec![attribute.to_string()],
            settings: vec![
                ("Bin Size".to_string(), SettingValue::Number(bins.bin_size)),
                (
                    "Range".to_string(),
                    SettingValue::Text(format!("{}-{}", bins.start, bins.end)),
                ),
                ("Y-Axis".to_string(), SettingValue::Text(y_label.to_string())),
            ],
            images,
            data: Some(ReportData::Bars(
                data.iter().map(|b| (b.range.clone(), b.count)).collect(),
            )),
        }
    }

    /// Scatter module for an attribute pair.
    pub fn correlation(
        x: &str,
        y: &str,
        images: Vec<String>,
        regression: bool,
        log_x: bool,
        log_y: bool,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            id: String::new(),
            kind: ReportKind::Correlation,
            title: format!("Correlation: {x} vs. {y}"),
            description: format!("Scatter plot of {} points.", points.len()),
            attributes: vec![x.to_string(), y.to_string()],
            settings: vec![
                ("Regression".to_string(), SettingValue::Flag(regression)),
                ("Log Scale X".to_string(), SettingValue::Flag(log_x)),
                ("Log Scale Y".to_string(), SettingValue::Flag(log_y)),
            ],
            images,
            data: Some(ReportData::Scatter(points)),
        }
    }

    /// Violin comparison module; one series value (the mean) per image.
    pub fn comparison(attribute: &str, log_scale: bool, profiles: &[ViolinProfile]) -> Self {
        Self {
            id: String::new(),
            kind: ReportKind::Comparison,
            title: format!("Comparison: {attribute} Distribution"),
            description: format!(
                "Violin plot comparison across {} selected images.",
                profiles.len()
            ),
            attributes: vec![attribute.to_string()],
            settings: vec![("Log Scale".to_string(), SettingValue::Flag(log_scale))],
            images: profiles.iter().map(|p| p.id.clone()).collect(),
            data: Some(ReportData::Series(
                profiles.iter().map(|p| (p.id.clone(), p.mean)).collect(),
            )),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    modules: Vec<ReportModule>,
    expanded: BTreeSet<String>,
}

impl ReportBuilder {
    pub fn new(modules: Vec<ReportModule>) -> Self {
        Self {
            modules,
            expanded: BTreeSet::new(),
        }
    }

    pub fn with_mock_modules() -> Self {
        Self::new(mock_modules())
    }

    pub fn modules(&self) -> &[ReportModule] {
        &self.modules
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Remove a module by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m.id != id);
        self.expanded.remove(id);
        before != self.modules.len()
    }

    /// Append a module. A blank or duplicate id is replaced with the next free `mod_N`.
    pub fn add(&mut self, mut module: ReportModule) {
        if module.id.is_empty() || self.modules.iter().any(|m| m.id == module.id) {
            let mut n = self.modules.len() + 1;
            while self.modules.iter().any(|m| m.id == format!("mod_{n}")) {
                n += 1;
            }
            module.id = format!("mod_{n}");
        }
        tracing::debug!(id = %module.id, title = %module.title, "Module added to report");
        self.modules.push(module);
    }

    /// Move the module at `from` so it ends up at index `to`.
    ///
    /// Out-of-range indices leave the order unchanged; `to` past the end
    /// moves to the end.
    pub fn move_module(&mut self, from: usize, to: usize) {
        if from >= self.modules.len() {
            return;
        }
        let module = self.modules.remove(from);
        let to = to.min(self.modules.len());
        self.modules.insert(to, module);
    }

    /// Serialise the current module list as a template.
    pub fn save_template(&self) -> Result<String, TemplateError> {
        serde_json::to_string_pretty(&self.modules).map_err(|e| TemplateError::Json { source: e })
    }

    /// Replace the module list from a template. Expansion state is cleared.
    ///
    /// Ids go through the same rules as [`ReportBuilder::add`], so blank or
    /// repeated ids in the file come out unique.
    pub fn load_template(&mut self, json: &str) -> Result<usize, TemplateError> {
        let modules: Vec<ReportModule> =
            serde_json::from_str(json).map_err(|e| TemplateError::Json { source: e })?;
        if modules.is_empty() {
            return Err(TemplateError::Empty);
        }
        let mut loaded = ReportBuilder::default();
        for module in modules {
            loaded.add(module);
        }
        let count = loaded.modules.len();
        self.modules = loaded.modules;
        self.expanded.clear();
        tracing::info!(modules = count, "Report template loaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(builder: &ReportBuilder) -> Vec<&str> {
        builder.modules().iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_move_module_forward_and_back() {
        let mut b = ReportBuilder::with_mock_modules();
        b.move_module(0, 2);
        assert_eq!(ids(&b), vec!["mod_2", "mod_3", "mod_1", "mod_4"]);
        b.move_module(3, 0);
        assert_eq!(ids(&b), vec!["mod_4", "mod_2", "mod_3", "mod_1"]);
        b.move_module(1, 99);
        assert_eq!(ids(&b), vec!["mod_4", "mod_3", "mod_1", "mod_2"]);
        b.move_module(99, 0);
        assert_eq!(ids(&b), vec!["mod_4", "mod_3", "mod_1", "mod_2"]);
    }

    #[test]
    fn test_remove_clears_expansion() {
        let mut b = ReportBuilder::with_mock_modules();
        b.toggle_expanded("mod_3");
        assert!(b.is_expanded("mod_3"));
        assert!(b.remove("mod_3"));
        assert!(!b.is_expanded("mod_3"));
        assert!(!b.remove("mod_3"));
        assert_eq!(b.modules().len(), 3);
    }

    #[test]
    fn test_template_round_trip_preserves_order() {
        let mut b = ReportBuilder::with_mock_modules();
        b.move_module(3, 0);
        let json = b.save_template().unwrap();

        let mut other = ReportBuilder::default();
        assert_eq!(other.load_template(&json).unwrap(), 4);
        assert_eq!(ids(&other), vec!["mod_4", "mod_1", "mod_2", "mod_3"]);
        assert_eq!(other.modules()[1].settings[0].1, SettingValue::Number(5.0));
        assert_eq!(other.modules()[2].settings[0].1, SettingValue::Number(0.2));
        assert_eq!(other.modules()[0].settings[0].1, SettingValue::Flag(true));
    }

    #[test]
    fn test_load_template_rejects_garbage_and_empty() {
        let mut b = ReportBuilder::with_mock_modules();
        assert!(matches!(b.load_template("{"), Err(TemplateError::Json { .. })));
        assert!(matches!(b.load_template("[]"), Err(TemplateError::Empty)));
        assert_eq!(b.modules().len(), 4);
    }

    #[test]
    fn test_load_template_makes_ids_unique() {
        let mut source = ReportBuilder::with_mock_modules();
        source.move_module(1, 0);
        let mut modules = source.modules().to_vec();
        modules[1].id = modules[0].id.clone();
        modules[2].id = String::new();
        let json = serde_json::to_string(&modules).unwrap();

        let mut b = ReportBuilder::default();
        assert_eq!(b.load_template(&json).unwrap(), 4);
        assert_eq!(ids(&b), vec!["mod_2", "mod_3", "mod_4", "mod_5"]);

        b.toggle_expanded("mod_2");
        assert!(!b.is_expanded("mod_3"));
        assert!(b.remove("mod_2"));
        assert_eq!(b.modules().len(), 3);
    }

    #[test]
    fn test_attribute_module_from_histogram() {
        let bins = crate::core::analysis::mock_histogram(1);
        let module = ReportModule::attribute(
            "Area",
            vec!["Img_001.tif".to_string()],
            &BinSettings::default(),
            YAxisMode::Percentage,
            &bins,
        );
        let mut b = ReportBuilder::default();
        b.add(module);
        let added = &b.modules()[0];
        assert_eq!(added.id, "mod_1");
        assert_eq!(added.title, "Attribute Analysis: Area");
        assert_eq!(added.settings[2].1, SettingValue::Text("Percentage".to_string()));
        match &added.data {
            Some(ReportData::Bars(rows)) => assert_eq!(rows.len(), bins.len()),
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_add_renames_duplicate_id() {
        let mut b = ReportBuilder::with_mock_modules();
        let dup = b.modules()[0].clone();
        b.add(dup);
        assert_eq!(b.modules().len(), 5);
        assert_eq!(b.modules()[4].id, "mod_5");
    }
}
