//! The desired state that every generated `package.json` is forced into.
//!
//! The manifest is handled as a raw [`serde_json::Value`] so every key written by the
//! package manager (name, version, license...) survives untouched and keeps its order.
//! Only the keys named by the [`ManifestPatch`] are overwritten.

use std::path::Path;

use color_eyre::{eyre::Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ScaffoldError;
use crate::utils::{
    self,
    constants::{error_messages, PIKA_WEB_KEY, SCRIPTS, WEB_DEPENDENCIES},
};

pub const SCRIPTS_KEY: &str = "scripts";

/// The `@pika/web` configuration block
#[derive(Serialize, Debug, PartialEq, Eq)]
struct PikaWebConfig<'a> {
    #[serde(rename = "webDependencies")]
    web_dependencies: &'a [&'a str],
}

/// Declarative description of the entries forced into a manifest. Applying it is an
/// unconditional overwrite: entries with the same key are replaced, never merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch<'a> {
    pub scripts: &'a [(&'a str, &'a str)],
    pub web_dependencies: &'a [&'a str],
}

impl Default for ManifestPatch<'static> {
    fn default() -> Self {
        Self {
            scripts: &SCRIPTS,
            web_dependencies: &WEB_DEPENDENCIES,
        }
    }
}

impl<'a> ManifestPatch<'a> {
    /// Applies the patch over an in-memory manifest.
    ///
    /// A missing (or non object) `scripts` entry is replaced by an empty object before
    /// writing the scripts. Fails only when the manifest itself isn't a JSON object
    pub fn apply(&self, manifest: &mut Value) -> Result<(), &'static str> {
        let root = manifest
            .as_object_mut()
            .ok_or("the top level value is not a JSON object")?;

        let scripts = root
            .entry(SCRIPTS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !scripts.is_object() {
            *scripts = Value::Object(Map::new());
        }
        if let Some(scripts) = scripts.as_object_mut() {
            for (name, command) in self.scripts {
                scripts.insert((*name).to_owned(), Value::from(*command));
            }
        }

        let pika_web = PikaWebConfig {
            web_dependencies: self.web_dependencies,
        };
        root.insert(
            PIKA_WEB_KEY.to_owned(),
            serde_json::to_value(pika_web).map_err(|_| "unserializable @pika/web block")?,
        );

        Ok(())
    }

    /// Reads the manifest at `path`, applies the patch and persists it back
    pub fn apply_to_file(&self, path: &Path) -> Result<()> {
        let mut manifest: Value = utils::fs::load_and_deserialize(path)
            .with_context(|| format!("{}: {path:?}", error_messages::READ_MANIFEST))?;

        self.apply(&mut manifest)
            .map_err(|reason| ScaffoldError::InvalidManifest {
                path: path.to_path_buf(),
                reason: reason.to_owned(),
            })?;

        log::debug!("Writing the patched manifest to {path:?}");
        utils::fs::serialize_object_to_file(path, &manifest)
            .with_context(|| format!("{}: {path:?}", error_messages::WRITE_MANIFEST))
    }
}
