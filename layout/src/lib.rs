use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub mod time;
pub use time::TimeSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub name: String,
    #[serde(default)]
    pub time: TimeSettings,
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Value,
    XyValue,
    HtmlView,
    SpaSimilarity,
}

impl ComponentKind {
    /// Synapse used when a component does not configure one.
    pub fn default_synapse(self) -> f64 {
        match self {
            ComponentKind::Value | ComponentKind::XyValue => 0.01,
            ComponentKind::HtmlView | ComponentKind::SpaSimilarity => 0.0,
        }
    }
}

/// What a store does with a sample older than the newest one it holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    #[default]
    Reject,
    Drop,
    Rewind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub uid: String,
    pub kind: ComponentKind,
    #[serde(default = "default_lines")]
    pub n_lines: usize,
    #[serde(default)]
    pub synapse: Option<f64>,
    #[serde(default = "default_min_value")]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    #[serde(default)]
    pub legend_labels: Vec<String>,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default)]
    pub ordering: OrderingPolicy,
}

fn default_lines() -> usize {
    1
}

fn default_min_value() -> f64 {
    -1.0
}

fn default_max_value() -> f64 {
    1.0
}

impl ComponentDefinition {
    pub fn new(uid: impl Into<String>, kind: ComponentKind, n_lines: usize) -> Self {
        Self {
            uid: uid.into(),
            kind,
            n_lines,
            synapse: None,
            min_value: default_min_value(),
            max_value: default_max_value(),
            legend_labels: Vec::new(),
            show_legend: false,
            ordering: OrderingPolicy::default(),
        }
    }

    pub fn synapse(&self) -> f64 {
        self.synapse.unwrap_or_else(|| self.kind.default_synapse())
    }

    /// One label per line; configured labels first, `label_<i>` for the rest.
    pub fn legend_labels(&self) -> Vec<String> {
        (0..self.n_lines)
            .map(|idx| {
                self.legend_labels
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("label_{idx}"))
            })
            .collect()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("toml write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("unsupported layout file extension: {0}")]
    UnsupportedFormat(String),
    #[error("invalid layout: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> Result<FileFormat, LayoutError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(LayoutError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

pub fn validate_component(component: &ComponentDefinition) -> Result<(), LayoutError> {
    if component.uid.trim().is_empty() {
        return Err(LayoutError::Invalid("component uid is empty".to_string()));
    }
    if component.n_lines == 0 {
        return Err(LayoutError::Invalid(format!(
            "component '{}' has no lines",
            component.uid
        )));
    }
    let synapse = component.synapse();
    if !(0.0..1.0).contains(&synapse) {
        return Err(LayoutError::Invalid(format!(
            "component '{}' synapse {synapse} outside [0, 1)",
            component.uid
        )));
    }
    if !(component.min_value < component.max_value) {
        return Err(LayoutError::Invalid(format!(
            "component '{}' range [{}, {}] is empty",
            component.uid, component.min_value, component.max_value
        )));
    }
    Ok(())
}

impl LayoutDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: TimeSettings::default(),
            components: Vec::new(),
        }
    }

    pub fn component(&self, uid: &str) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.uid == uid)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        self.time.validate().map_err(LayoutError::Invalid)?;
        let mut seen = HashSet::new();
        for component in &self.components {
            validate_component(component)?;
            if !seen.insert(component.uid.as_str()) {
                return Err(LayoutError::Invalid(format!(
                    "duplicate component uid '{}'",
                    component.uid
                )));
            }
        }
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutError> {
        let path = path.as_ref();
        let data = match file_format(path)? {
            FileFormat::Json => serde_json::to_vec_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?.into_bytes(),
        };
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let format = file_format(path)?;
        let definition = match format {
            FileFormat::Json => serde_json::from_slice(&fs::read(path)?)?,
            FileFormat::Toml => toml::from_str(&fs::read_to_string(path)?)?,
        };
        Ok(definition)
    }
}
