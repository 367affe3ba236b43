//! Renderer module
//!
//! Renders a DiscoveryResult to the supported output formats: jsonl, json, md

use crate::core::model::DiscoveryResult;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for discovery results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, result: &DiscoveryResult) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result),
            OutputFormat::Json => self.render_json(result),
            OutputFormat::Markdown => self.render_markdown(result),
        }
    }

    /// One record per line. Warnings are not part of jsonl output.
    fn render_jsonl(&self, result: &DiscoveryResult) -> String {
        result
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// The whole result object, items and warnings.
    fn render_json(&self, result: &DiscoveryResult) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
        }
    }

    fn render_markdown(&self, result: &DiscoveryResult) -> String {
        let mut output = String::new();

        if !result.warnings.is_empty() {
            output.push_str("## Warnings\n\n");
            for warning in &result.warnings {
                output.push_str(&format!("- {}\n", warning));
            }
            output.push('\n');
        }

        if !result.items.is_empty() {
            output.push_str("## Global Prompts\n\n");
            for item in &result.items {
                output.push_str(&format!("### `{}`\n", item.source_path.display()));
                if let Some(dir) = &item.relative_dir {
                    output.push_str(&format!("- directory: `{}`\n", dir));
                }
                output.push_str(&format!("- id: `{}`\n", item.id));
                output.push_str("\n```\n");
                output.push_str(&item.content);
                if !item.content.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str("```\n\n");
            }
        }

        output
    }
}
