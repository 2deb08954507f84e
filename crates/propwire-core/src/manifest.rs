#![forbid(unsafe_code)]

//! Component declarations loaded from TOML or JSON.
//!
//! A manifest describes one component class as data:
//!
//! ```toml
//! tag = "todo-item"
//!
//! [[props]]
//! name = "isValid"
//! type = "boolean"
//! attribute = "valid"
//!
//! [[props]]
//! name = "controller"
//! type = "object"
//! ```
//!
//! `attribute` accepts a name (explicit override), `false` or `""` (no
//! attribute) or `true` (derive, same as omitting it). `type` defaults to
//! `any`, which gets no attribute unless one is named.
//!
//! Parsing only checks shape. Declaration rules (collisions, defaults) are
//! enforced by [`ComponentClassBuilder::build`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::class::ComponentClassBuilder;
use crate::descriptor::{PropDecl, PropOptions};
use crate::naming::AttributeOption;
use crate::value::{PropType, PropValue};

/// Errors from loading a manifest.
#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    /// File extension is neither `.toml` nor `.json`.
    UnknownFormat(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read manifest: {err}"),
            Self::Toml(err) => write!(f, "invalid TOML manifest: {err}"),
            Self::Json(err) => write!(f, "invalid JSON manifest: {err}"),
            Self::UnknownFormat(path) => write!(f, "unknown manifest format: {path}"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnknownFormat(_) => None,
        }
    }
}

/// `attribute` setting as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeSetting {
    Enabled(bool),
    Name(String),
}

impl From<AttributeSetting> for AttributeOption {
    fn from(setting: AttributeSetting) -> Self {
        match setting {
            AttributeSetting::Enabled(true) => Self::Derived,
            AttributeSetting::Enabled(false) => Self::Suppressed,
            AttributeSetting::Name(name) => Self::Explicit(name),
        }
    }
}

/// One property entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropManifest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: PropType,
    #[serde(default)]
    pub attribute: Option<AttributeSetting>,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub reflect: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl PropManifest {
    #[must_use]
    pub fn into_decl(self) -> PropDecl {
        let options = PropOptions {
            attribute: self.attribute.map(Into::into).unwrap_or_default(),
            mutable: self.mutable,
            reflect: self.reflect,
            default: self.default.map(json_to_value),
        };
        PropDecl::with_options(self.name, self.ty, options)
    }
}

/// A component class described as data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentManifest {
    pub tag: String,
    #[serde(default)]
    pub props: Vec<PropManifest>,
}

impl ComponentManifest {
    /// # Errors
    ///
    /// [`ManifestError::Toml`] on malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        toml::from_str(input).map_err(ManifestError::Toml)
    }

    /// # Errors
    ///
    /// [`ManifestError::Json`] on malformed input.
    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(input).map_err(ManifestError::Json)
    }

    /// Load from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// I/O failures, parse failures, or an unrecognized extension.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ManifestError> = match ext.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ManifestError::UnknownFormat(path.display().to_string())),
        };
        let input = std::fs::read_to_string(path).map_err(ManifestError::Io)?;
        let manifest = parse(&input)?;
        tracing::debug!(
            path = %path.display(),
            tag = %manifest.tag,
            props = manifest.props.len(),
            "loaded component manifest"
        );
        Ok(manifest)
    }

    /// Declarations as a class builder. Watchers can be added before `build()`.
    #[must_use]
    pub fn into_builder(self) -> ComponentClassBuilder {
        ComponentClassBuilder::new(self.tag).props(self.props.into_iter().map(PropManifest::into_decl))
    }
}

fn json_to_value(value: serde_json::Value) -> PropValue {
    match value {
        serde_json::Value::Null => PropValue::Null,
        serde_json::Value::Bool(b) => PropValue::Bool(b),
        serde_json::Value::Number(n) => PropValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => PropValue::Str(s),
        serde_json::Value::Array(items) => {
            PropValue::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(map) => PropValue::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}
