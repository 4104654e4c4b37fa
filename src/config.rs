use std::path::Path;

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;
use tower_lsp::lsp_types::ClientCapabilities;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Serve documentation on hover
    pub hover: bool,
    /// Offer documented variables as completions
    pub completion: bool,
    /// Upper bound on completion items per request
    pub completion_limit: usize,
    /// Appended to a source file's path to find its documentation, `settings.py` -> `settings.py.md`
    pub doc_suffix: String,
}

impl Settings {
    pub fn new(root_dir: &Path, capabilities: &ClientCapabilities) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/doc-lsp/settings");
        let settings = Config::builder()
            .add_source(File::with_name(&expanded).required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/.doc-lsp",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            )
            .set_default("hover", true)?
            .set_default("completion", true)?
            .set_default("completion_limit", 50)?
            .set_default("doc_suffix", ".md")?
            .set_override_option("completion", completion_override(capabilities))?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }

    /// Defaults adjusted to what the client supports, for sessions without a
    /// workspace root to read settings from.
    pub fn from_capabilities(capabilities: &ClientCapabilities) -> Settings {
        let defaults = Settings::default();
        Settings {
            completion: completion_override(capabilities).unwrap_or(defaults.completion),
            ..defaults
        }
    }
}

fn completion_override(capabilities: &ClientCapabilities) -> Option<bool> {
    capabilities
        .text_document
        .as_ref()
        .and_then(|it| match it.completion.is_none() {
            true => Some(false),
            false => None,
        })
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            hover: true,
            completion: true,
            completion_limit: 50,
            doc_suffix: ".md".to_string(),
        }
    }
}
