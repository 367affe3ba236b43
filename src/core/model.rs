//! Customization record model
//!
//! Every producer in the toolchain maps discovered files onto this shared
//! record shape before rendering or handing records to a host.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::util::{hash_bytes, HashAlgorithm};

/// Schema version stamped on every record.
pub const SCHEMA_VERSION: u32 = 1;

/// The kind of customization a record carries.
///
/// The record schema is a union across producers; this crate only ever
/// produces `GlobalPrompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomizationKind {
    GlobalPrompt,
    FileRule,
}

impl CustomizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomizationKind::GlobalPrompt => "global-prompt",
            CustomizationKind::FileRule => "file-rule",
        }
    }
}

/// Derive the stable identifier for a record.
///
/// Deterministic and pure: the same kind and absolute source path always
/// produce the same id, and distinct paths do not collide. The kind name
/// prefixes the hash so ids stay scoped per kind.
pub fn create_id(kind: CustomizationKind, source: &Path) -> String {
    let name = kind.as_str();
    let os = source.as_os_str();
    let mut buf = Vec::with_capacity(name.len() + 1 + os.len());
    buf.extend_from_slice(name.as_bytes());
    buf.push(0);
    buf.extend_from_slice(os.as_encoded_bytes());
    format!("{}-{}", name, hash_bytes(&buf, HashAlgorithm::Xxh3))
}

/// One discovered global prompt.
///
/// Constructed exactly once per successfully read match and immutable
/// afterwards; ownership moves to the caller inside a [`DiscoveryResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPrompt {
    /// Stable identifier, derived from kind and source path.
    pub id: String,

    /// Always `GlobalPrompt` for records produced here.
    pub kind: CustomizationKind,

    /// Schema version tag.
    pub version: u32,

    /// Absolute path of the discovered file.
    pub source_path: PathBuf,

    /// Containing directory relative to the scan root, '/'-separated.
    /// Absent (not empty) when the file sits directly at the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_dir: Option<String>,

    /// Raw file content. An empty file yields an empty string, which is
    /// distinct from "no match".
    pub content: String,

    /// Reserved for future attributes; always empty today.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl GlobalPrompt {
    pub fn new(source_path: PathBuf, relative_dir: Option<String>, content: String) -> Self {
        let id = create_id(CustomizationKind::GlobalPrompt, &source_path);
        Self {
            id,
            kind: CustomizationKind::GlobalPrompt,
            version: SCHEMA_VERSION,
            source_path,
            relative_dir,
            content,
            metadata: BTreeMap::new(),
        }
    }
}

/// Aggregate of one discovery pass.
///
/// The warning list is part of the contract for future producers; this
/// core never populates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub items: Vec<GlobalPrompt>,
    pub warnings: Vec<String>,
}

impl DiscoveryResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: GlobalPrompt) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Options accepted by a plugin emit call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Validate without writing.
    #[serde(default)]
    pub dry_run: bool,
}

/// Outcome of a plugin emit call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmitResult {
    /// Paths written to disk. Always empty for read-only formats.
    pub written: Vec<PathBuf>,

    /// Non-fatal problems encountered while emitting.
    pub warnings: Vec<String>,

    /// Records the plugin cannot express in its on-disk format.
    pub unsupported: Vec<GlobalPrompt>,
}
