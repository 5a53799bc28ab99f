//! Parallel batch renderer using rayon.
//!
//! A page showing a song's edit history needs one diff per edited field per
//! comment. [`BatchRenderer`] renders a list of independent requests in
//! parallel and returns the results in request order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::render::DiffRenderer;
use crate::result::TextDiffResult;

// ---------------------------------------------------------------------------
// BatchConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the batch renderer.
///
/// Deserializes from partial JSON objects; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of rayon worker threads to use.
    /// Default: `rayon::current_num_threads()`.
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            worker_threads: rayon::current_num_threads(),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests / responses
// ---------------------------------------------------------------------------

/// One pair of texts to diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRequest {
    /// Caller's label for the text, e.g. `"lyrics"`; echoed back untouched.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub prev: String,
    #[serde(default)]
    pub new: String,
}

impl DiffRequest {
    pub fn new(field: Option<&str>, prev: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            field: field.map(str::to_owned),
            prev: prev.into(),
            new: new.into(),
        }
    }
}

/// The rendered diff for one [`DiffRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResponse {
    pub field: Option<String>,
    pub result: TextDiffResult,
}

// ---------------------------------------------------------------------------
// BatchRenderer
// ---------------------------------------------------------------------------

/// Renders many diffs at once on a rayon pool.
pub struct BatchRenderer {
    config: BatchConfig,
    renderer: DiffRenderer,
}

impl BatchRenderer {
    /// Create a new batch renderer with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            renderer: DiffRenderer::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Render every request, preserving request order in the output.
    ///
    /// A dedicated pool of `worker_threads` threads is used; if it cannot be
    /// built the global rayon pool takes over.
    pub fn render_all(&self, requests: &[DiffRequest]) -> Vec<DiffResponse> {
        if requests.is_empty() {
            return Vec::new();
        }

        let threads = self.config.worker_threads.max(1);
        log::debug!("rendering {} diffs on {} threads", requests.len(), threads);

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| self.render_par(requests)),
            Err(e) => {
                log::warn!("failed to build diff worker pool, using global pool: {}", e);
                self.render_par(requests)
            }
        }
    }

    fn render_par(&self, requests: &[DiffRequest]) -> Vec<DiffResponse> {
        // par_iter().map().collect() on a slice keeps input order.
        requests
            .par_iter()
            .map(|req| DiffResponse {
                field: req.field.clone(),
                result: self.renderer.diff(&req.prev, &req.new),
            })
            .collect()
    }
}

impl Default for BatchRenderer {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
