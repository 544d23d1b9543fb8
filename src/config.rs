use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::radar::collision::SimulationParams;
use crate::radar::geometry::Point;
use crate::radar::random::DEFAULT_SEED;
use crate::radar::segment::RADAR_RADIUS;
use crate::radar::types::Entry;

const C: f64 = RADAR_RADIUS;

const DEFAULT_BACKGROUND: &str = "#fff";
const DEFAULT_GRID: &str = "#adadad";
const DEFAULT_INACTIVE: &str = "#ddd";
const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica";
const DEFAULT_FOOTER: &str = "★ optional     ⬤ mandatory";
const LEGEND_COLUMN_WIDTH: f64 = 250.0;
const LEGEND_LINE_HEIGHT: f64 = 10.0;
const MAX_TICKS: usize = 300;

const DEFAULT_QUADRANTS: [&str; 4] = [
    "Languages",
    "Infrastructure",
    "Datastores",
    "Data Management",
];
const DEFAULT_RINGS: [(&str, &str); 3] = [
    ("ADOPT", "#5ba300"),
    ("TRIAL", "#009eb0"),
    ("ASSESS", "#c7ba00"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_grid")]
    pub grid: String,
    #[serde(default = "default_inactive")]
    pub inactive: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid: default_grid(),
            inactive: default_inactive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full description of one radar: presentation settings plus the entries to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default = "default_repo_url")]
    pub repo_url: String,
    #[serde(default = "default_footer")]
    pub footer: String,

    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,

    #[serde(default)]
    pub colors: Colors,
    #[serde(default = "default_true")]
    pub print_layout: bool,
    #[serde(default = "default_true")]
    pub links_in_new_tabs: bool,
    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_legend_offset")]
    pub legend_offset: [Point; 4],
    #[serde(default = "default_title_offset")]
    pub title_offset: Point,
    #[serde(default = "default_footer_offset")]
    pub footer_offset: Point,
    #[serde(default = "default_legend_column_width")]
    pub legend_column_width: f64,
    #[serde(default = "default_legend_line_height")]
    pub legend_line_height: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoomed_quadrant: Option<usize>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,

    #[serde(default = "default_quadrants")]
    pub quadrants: Vec<QuadrantConfig>,
    #[serde(default = "default_rings")]
    pub rings: Vec<RingConfig>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}
fn default_grid() -> String {
    DEFAULT_GRID.to_string()
}
fn default_inactive() -> String {
    DEFAULT_INACTIVE.to_string()
}
fn default_repo_url() -> String {
    "#".to_string()
}
fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}
fn default_width() -> f64 {
    C * 3.8
}
fn default_height() -> f64 {
    C * 2.5
}
fn default_scale() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}
fn default_legend_offset() -> [Point; 4] {
    [
        Point::new(C + 30.0, C - 270.0),
        Point::new(-(C + 280.0), C - 270.0),
        Point::new(-(C + 280.0), -(C - 80.0)),
        Point::new(C + 30.0, -(C - 80.0)),
    ]
}
fn default_title_offset() -> Point {
    Point::new(-(C + 280.0), -(C + 40.0))
}
fn default_footer_offset() -> Point {
    Point::new(-(C - 280.0), C + 30.0)
}
fn default_legend_column_width() -> f64 {
    LEGEND_COLUMN_WIDTH
}
fn default_legend_line_height() -> f64 {
    LEGEND_LINE_HEIGHT
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_max_ticks() -> usize {
    MAX_TICKS
}
fn default_quadrants() -> Vec<QuadrantConfig> {
    DEFAULT_QUADRANTS
        .iter()
        .map(|name| QuadrantConfig {
            name: name.to_string(),
        })
        .collect()
}
fn default_rings() -> Vec<RingConfig> {
    DEFAULT_RINGS
        .iter()
        .map(|(name, color)| RingConfig {
            name: name.to_string(),
            color: color.to_string(),
            description: None,
        })
        .collect()
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: None,
            repo_url: default_repo_url(),
            footer: default_footer(),
            width: default_width(),
            height: default_height(),
            scale: default_scale(),
            colors: Colors::default(),
            print_layout: true,
            links_in_new_tabs: true,
            font_family: default_font_family(),
            legend_offset: default_legend_offset(),
            title_offset: default_title_offset(),
            footer_offset: default_footer_offset(),
            legend_column_width: LEGEND_COLUMN_WIDTH,
            legend_line_height: LEGEND_LINE_HEIGHT,
            zoomed_quadrant: None,
            seed: DEFAULT_SEED,
            max_ticks: MAX_TICKS,
            quadrants: default_quadrants(),
            rings: default_rings(),
            entries: Vec::new(),
        }
    }
}

impl RadarConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config {
            format: "TOML",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config {
            format: "YAML",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).map_err(|e| Error::Config {
            format: "JSON",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse by file extension; unknown extensions try TOML, YAML, then JSON.
    pub fn from_source(content: &str, path: Option<&Path>) -> Result<Self> {
        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("toml") => Self::from_toml(content),
            Some("yaml" | "yml") => Self::from_yaml(content),
            Some("json") => Self::from_json(content),
            _ => Self::from_toml(content)
                .or_else(|_| Self::from_yaml(content))
                .or_else(|_| Self::from_json(content)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.quadrants.len() != 4 {
            return Err(Error::QuadrantCount {
                found: self.quadrants.len(),
            });
        }
        if self.rings.len() != 3 {
            return Err(Error::RingCount {
                found: self.rings.len(),
            });
        }
        if let Some(q) = self.zoomed_quadrant
            && q >= 4
        {
            return Err(Error::ZoomedQuadrant(q));
        }
        Ok(())
    }

    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            max_ticks: self.max_ticks,
            ..SimulationParams::default()
        }
    }

    /// Blip color: the ring color, or the inactive color for inactive entries on
    /// interactive radars.
    pub fn entry_color(&self, entry: &Entry) -> &str {
        if entry.active || self.print_layout {
            self.rings
                .get(entry.ring)
                .map(|ring| ring.color.as_str())
                .unwrap_or(self.colors.inactive.as_str())
        } else {
            &self.colors.inactive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
title = "Tech Radar"

[[entries]]
label = "Rust"
quadrant = 0
ring = 0
moved = 2

[[entries]]
label = "Perl"
quadrant = 3
ring = 2
active = false
link = "https://example.com/perl"
"#;

    #[test]
    fn toml_fills_in_defaults() {
        let config = RadarConfig::from_toml(MINIMAL_TOML).expect("toml config");
        assert_eq!(config.title, "Tech Radar");
        assert_eq!(config.entries.len(), 2);
        assert_eq!(config.width, 1330.0);
        assert_eq!(config.height, 875.0);
        assert_eq!(config.legend_column_width, 250.0);
        assert_eq!(config.legend_offset[2], Point::new(-630.0, -270.0));
        assert_eq!(config.seed, 101);
        assert_eq!(config.rings[0].name, "ADOPT");
        assert!(!config.entries[1].active);
    }

    #[test]
    fn yaml_and_json_parse_the_same_entries() {
        let yaml = "entries:\n  - label: Rust\n    quadrant: 1\n    ring: 2\n";
        let json = r#"{"entries":[{"label":"Rust","quadrant":1,"ring":2}]}"#;
        let a = RadarConfig::from_yaml(yaml).expect("yaml config");
        let b = RadarConfig::from_json(json).expect("json config");
        assert_eq!(a, b);
    }

    #[test]
    fn from_source_falls_back_across_formats() {
        let json = r#"{"title":"From stdin"}"#;
        let config = RadarConfig::from_source(json, None).expect("detected config");
        assert_eq!(config.title, "From stdin");
    }

    #[test]
    fn rejects_wrong_ring_count() {
        let toml = r##"
[[rings]]
name = "ONLY"
color = "#000"
"##;
        let err = RadarConfig::from_toml(toml).expect_err("one ring is invalid");
        assert!(matches!(err, Error::RingCount { found: 1 }));
    }

    #[test]
    fn rejects_zoomed_quadrant_out_of_range() {
        let err = RadarConfig::from_json(r#"{"zoomed_quadrant":4}"#).expect_err("zoom 4");
        assert!(matches!(err, Error::ZoomedQuadrant(4)));
    }

    #[test]
    fn inactive_entries_are_grey_only_on_interactive_radars() {
        let mut config = RadarConfig::from_toml(MINIMAL_TOML).expect("toml config");
        let perl = config.entries[1].clone();
        assert_eq!(config.entry_color(&perl), "#c7ba00");

        config.print_layout = false;
        assert_eq!(config.entry_color(&perl), "#ddd");
        let rust = config.entries[0].clone();
        assert_eq!(config.entry_color(&rust), "#5ba300");
    }
}
