/*
    AnalysedText Library (Layered Text Annotation Model)

        Licensed under the GNU General Public License v3
*/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::NlpError;

pub trait Configurable: Sized {
    //// Obtain the configuration
    fn config(&self) -> &Config;

    //// Obtain the configuration mutably
    fn config_mut(&mut self) -> &mut Config;

    ///Builder pattern to associate a configuration
    fn with_config(mut self, config: Config) -> Self {
        self.set_config(config);
        self
    }

    ///Setter to associate a configuration
    fn set_config(&mut self, config: Config) -> &mut Self;
}

/// This holds the configuration of a document. Any field missing when deserialising takes its default value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Debug mode
    pub(crate) debug: bool,

    /// Cache the byte range of a span's text upon first access
    pub(crate) cache_text: bool,

    /// Milestone placement interval (in unicode codepoints) in indexing the text. A low number above zero increases text access performance at the cost of memory and increased initialisation time.
    pub(crate) milestone_interval: usize,

    /// Generate a pseudo-random public identifier for documents that have none
    pub(crate) generate_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            cache_text: true,
            milestone_interval: 100,
            generate_ids: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug mode. In debug mode, verbose output is emitted as `tracing` debug events
    pub fn with_debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    /// Is debug mode enabled or not?
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Enable or disable caching of span text. The cache is a derivation and never a source of truth, disabling it only trades speed for memory.
    pub fn with_cache_text(mut self, value: bool) -> Self {
        self.cache_text = value;
        self
    }

    /// Is span text cached upon first access?
    pub fn cache_text(&self) -> bool {
        self.cache_text
    }

    /// Set the configured milestone interval
    /// The Milestone placement interval (in unicode codepoints) is used in indexing the text. A low number above zero increases text access performance at the cost of memory and increased initialisation time.
    pub fn with_milestone_interval(mut self, value: usize) -> Self {
        self.milestone_interval = value;
        self
    }

    /// Return the configured milestone interval
    pub fn milestone_interval(&self) -> usize {
        self.milestone_interval
    }

    /// Generate public IDs for documents when missing.
    /// Each will consist of 21 URL-friendly ASCII symbols after a prefix of `T`
    pub fn with_generate_ids(mut self, value: bool) -> Self {
        self.generate_ids = value;
        self
    }

    /// Is generation of public IDs when missing enabled or not?
    pub fn generate_ids(&self) -> bool {
        self.generate_ids
    }

    /// Loads configuration from a JSON file
    pub fn from_file(filename: &str) -> Result<Self, NlpError> {
        let f = File::open(filename).map_err(|e| {
            NlpError::IOError(e, filename.to_string(), "Reading config from file, open failed")
        })?;
        let reader = BufReader::new(f);
        let deserializer = &mut serde_json::Deserializer::from_reader(reader);
        let result: Result<Self, _> = serde_path_to_error::deserialize(deserializer);
        result.map_err(|e| {
            let path = e.path().to_string();
            NlpError::JsonError(e, path, "Reading config from file")
        })
    }

    /// Parses configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, NlpError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let result: Result<Self, _> = serde_path_to_error::deserialize(deserializer);
        result.map_err(|e| {
            let path = e.path().to_string();
            NlpError::JsonError(e, path, "Parsing config from string")
        })
    }
}

/// Emits a debug message through [`tracing`], but only if debug mode is enabled in the configuration.
/// The message is produced lazily by the closure so formatting costs nothing otherwise.
pub(crate) fn debug<F>(config: &Config, message_func: F)
where
    F: FnOnce() -> String,
{
    if config.debug() {
        tracing::debug!(target: "analysedtext", "{}", message_func());
    }
}
