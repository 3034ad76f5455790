use anyhow::{Context, Result, bail};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::render::palette::{Colormap, parse_color};

/// One restaurant location and how its charts are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    /// Value of the `Location` column, e.g. `"Denver, CO"`.
    pub name: String,
    /// Short name used in output file names and on the command line.
    pub slug: String,
    /// Bar color in cross-location charts: a `tab:` name or `#rrggbb`.
    pub color: String,
    /// Colormap for this location's rating distribution chart.
    #[serde(default)]
    pub colormap: Colormap,
}

impl LocationSpec {
    fn new(name: &str, slug: &str, color: &str, colormap: Colormap) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            color: color.to_string(),
            colormap,
        }
    }

    pub fn rgb(&self) -> Result<RGBColor> {
        parse_color(&self.color).with_context(|| format!("bad color for location {}", self.name))
    }
}

/// Report settings, stored as a JSON object on disk:
/// ```json
/// {
///   "input": "customers_feedback.csv",
///   "output_dir": "charts",
///   "locations": [
///     { "name": "Denver, CO", "slug": "denver", "color": "tab:red", "colormap": "coolwarm" }
///   ]
/// }
/// ```
/// Every key is optional; absent keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Locations in chart order.
    pub locations: Vec<LocationSpec>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("customers_feedback.csv"),
            output_dir: PathBuf::from("."),
            locations: vec![
                LocationSpec::new("Seattle, WA", "seattle", "tab:blue", Colormap::Viridis),
                LocationSpec::new("Portland, OR", "portland", "tab:green", Colormap::RdYlGn),
                LocationSpec::new("Boise, ID", "boise", "tab:orange", Colormap::Viridis),
                LocationSpec::new("Denver, CO", "denver", "tab:red", Colormap::Coolwarm),
            ],
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path` and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that there is at least one location, slugs are unique and colors parse.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            bail!("config lists no locations");
        }

        let mut slugs = HashSet::new();
        for location in &self.locations {
            if location.slug.is_empty() {
                bail!("location {} has an empty slug", location.name);
            }
            if !slugs.insert(location.slug.as_str()) {
                bail!("duplicate location slug {}", location.slug);
            }
            location.rgb()?;
        }

        Ok(())
    }

    /// Finds a location by exact name or case-insensitive slug.
    pub fn find_location(&self, query: &str) -> Option<&LocationSpec> {
        self.locations
            .iter()
            .find(|l| l.name == query || l.slug.eq_ignore_ascii_case(query))
    }

    pub fn location_names(&self) -> Vec<&str> {
        self.locations.iter().map(|l| l.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();
        config.validate().unwrap();
        assert_eq!(
            config.location_names(),
            ["Seattle, WA", "Portland, OR", "Boise, ID", "Denver, CO"]
        );
        assert_eq!(config.find_location("Denver, CO").unwrap().colormap, Colormap::Coolwarm);
        assert_eq!(config.find_location("PORTLAND").unwrap().colormap, Colormap::RdYlGn);
        assert!(config.find_location("Reno").is_none());
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let file = write_config(r#"{ "output_dir": "charts" }"#);
        let config = ReportConfig::load(file.path()).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.input, PathBuf::from("customers_feedback.csv"));
        assert_eq!(config.locations.len(), 4);
    }

    #[test]
    fn test_load_custom_locations() {
        let file = write_config(
            r##"{ "locations": [ { "name": "Reno, NV", "slug": "reno", "color": "#123456" } ] }"##,
        );
        let config = ReportConfig::load(file.path()).unwrap();

        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].colormap, Colormap::Viridis);
        assert_eq!(config.locations[0].rgb().unwrap(), RGBColor(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_load_rejects_unknown_colormap() {
        let file = write_config(
            r#"{ "locations": [ { "name": "Portland, OR", "slug": "portland", "color": "tab:green", "colormap": "RdYIGn" } ] }"#,
        );
        assert!(ReportConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_locations() {
        let mut config = ReportConfig::default();
        config.locations[1].slug = "seattle".into();
        assert!(config.validate().unwrap_err().to_string().contains("duplicate"));

        let mut config = ReportConfig::default();
        config.locations[0].color = "blueish".into();
        assert!(config.validate().is_err());

        let config = ReportConfig {
            locations: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ReportConfig::load(Path::new("no/such/config.json")).is_err());
    }
}
