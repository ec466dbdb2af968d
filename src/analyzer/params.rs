//! Parameter types configuring the analysis stages.

use crate::trace::TraceParams;
use serde::{Deserialize, Serialize};

/// Analyzer-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Gap filling and smoothing of the four traces.
    pub trace: TraceParams,
    /// When a live recording counts as long enough for region analysis.
    pub completion: CompletionGate,
}

/// Completeness check for a recording that is still growing.
///
/// Region analysis only makes sense once the shutter sequence has finished,
/// i.e. when the buffer is within `margin_frames` of the configured
/// recording length. `max_frames == 0` disables the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionGate {
    pub max_frames: usize,
    pub margin_frames: usize,
}

impl Default for CompletionGate {
    fn default() -> Self {
        Self {
            max_frames: 0,
            margin_frames: 10,
        }
    }
}

impl CompletionGate {
    pub fn new(max_frames: usize) -> Self {
        Self {
            max_frames,
            ..Default::default()
        }
    }

    pub fn is_complete(&self, frames: usize) -> bool {
        self.max_frames == 0 || frames >= self.max_frames.saturating_sub(self.margin_frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_opens_within_margin() {
        let gate = CompletionGate::new(300);
        assert!(!gate.is_complete(289));
        assert!(gate.is_complete(290));
        assert!(gate.is_complete(400));
        assert!(CompletionGate::default().is_complete(0));
        assert!(CompletionGate::new(5).is_complete(0));
    }

    #[test]
    fn params_load_with_partial_json() {
        let params: AnalysisParams = serde_json::from_str(r#"{"trace":{"window":5}}"#).unwrap();
        assert_eq!(params.trace.window, 5);
        assert_eq!(params.completion, CompletionGate::default());
        let params: AnalysisParams =
            serde_json::from_str(r#"{"completion":{"max_frames":120}}"#).unwrap();
        assert_eq!(params.completion.max_frames, 120);
        assert_eq!(params.completion.margin_frames, 10);
        assert_eq!(params.trace, TraceParams::default());
    }
}
