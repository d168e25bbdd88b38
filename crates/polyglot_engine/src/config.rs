//! Engine configuration.

/// Default bound on recursive phonology passes.
pub const DEFAULT_MAX_RECURSION: usize = 100;

/// Default bound, in bytes, on one transcribed fragment.
pub const DEFAULT_MAX_OUTPUT_LEN: usize = 10_000;

/// Configuration for derivation and transcription.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Upper bound on full passes of a recursive phonology guide.
    pub max_recursion: usize,

    /// Upper bound, in bytes, on a fragment growing under recursive passes.
    /// A guide whose rules keep lengthening the text stops here even when
    /// passes remain.
    pub max_output_len: usize,

    /// Record a per-rule trace for every derivation.
    pub record_traces: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion: DEFAULT_MAX_RECURSION,
            max_output_len: DEFAULT_MAX_OUTPUT_LEN,
            record_traces: false,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration that records rule traces.
    #[must_use]
    pub fn tracing() -> Self {
        Self {
            record_traces: true,
            ..Self::default()
        }
    }

    /// Creates a configuration with a tight recursion bound, for tests and
    /// interactive probing of runaway guides.
    #[must_use]
    pub fn shallow() -> Self {
        Self {
            max_recursion: 10,
            record_traces: true,
            ..Self::default()
        }
    }

    /// Builder method to set the recursion bound.
    #[must_use]
    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    /// Builder method to set the output length bound.
    #[must_use]
    pub fn with_max_output_len(mut self, max_output_len: usize) -> Self {
        self.max_output_len = max_output_len;
        self
    }

    /// Builder method to set trace recording.
    #[must_use]
    pub fn with_record_traces(mut self, record_traces: bool) -> Self {
        self.record_traces = record_traces;
        self
    }
}
