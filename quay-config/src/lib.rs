//! Configuration for the quay docking-layout engine.
//!
//! The config file is KDL. Everything is optional; an empty file yields the
//! defaults below.
//!
//! ```kdl
//! drag-and-drop {
//!     drag-enabled true
//!     drop-enabled true
//!     copy-insert "before"
//! }
//! ```

#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context, IntoDiagnostic};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub drag_and_drop: DragAndDrop,
}

/// Drag-and-drop behavior toggles.
///
/// The enabled switches are global overrides: they gate gestures regardless
/// of the per-element area flags reported by the hit-test surface.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct DragAndDrop {
    #[knuffel(child, unwrap(argument), default = true)]
    pub drag_enabled: bool,
    #[knuffel(child, unwrap(argument), default = true)]
    pub drop_enabled: bool,
    #[knuffel(child, unwrap(argument), default)]
    pub copy_insert: CopyInsert,
}

/// Where a copy drop inserts the clone relative to the drop target.
#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CopyInsert {
    #[default]
    Before,
    After,
}

impl Default for DragAndDrop {
    fn default() -> Self {
        Self {
            drag_enabled: true,
            drop_enabled: true,
            copy_insert: CopyInsert::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name().and_then(OsStr::to_str).unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing config")?;

        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}
