//! Plugin surface
//!
//! Adapts the discovery engine to the host shell that registers format
//! plugins and dispatches discover/emit calls. Registration data is
//! fixed configuration.

use crate::core::model::{CustomizationKind, DiscoveryResult, EmitOptions, EmitResult, GlobalPrompt};
use crate::workspace::ScanRoot;

/// Registration id of the legacy rules plugin.
pub const PLUGIN_ID: &str = "cursorrules";

/// Display name of the legacy rules plugin.
pub const PLUGIN_NAME: &str = "Legacy .cursorrules";

/// A format plugin: discovers customization records from a project tree
/// and, where the format allows it, emits records back to disk.
pub trait Plugin {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Customization kinds this plugin can produce or emit.
    fn supports(&self) -> &'static [CustomizationKind];

    fn discover(&self, root: &ScanRoot) -> DiscoveryResult;

    fn emit(&self, items: Vec<GlobalPrompt>, root: &ScanRoot, options: &EmitOptions) -> EmitResult;
}

/// The legacy `.cursorrules` plugin. Discovery only: the format is
/// read-only, so emit hands every record back as unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorRules;

impl Plugin for CursorRules {
    fn id(&self) -> &'static str {
        PLUGIN_ID
    }

    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn supports(&self) -> &'static [CustomizationKind] {
        &[CustomizationKind::GlobalPrompt]
    }

    fn discover(&self, root: &ScanRoot) -> DiscoveryResult {
        crate::discover::discover(root)
    }

    fn emit(
        &self,
        items: Vec<GlobalPrompt>,
        _root: &ScanRoot,
        _options: &EmitOptions,
    ) -> EmitResult {
        EmitResult {
            written: Vec::new(),
            warnings: Vec::new(),
            unsupported: items,
        }
    }
}
