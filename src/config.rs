//! Analysis configuration and option merging

use serde::{Deserialize, Serialize};

/// Opaque transform-tuning parameters (window size, overlap, ...).
///
/// The facade never interprets these; they are forwarded to the native
/// engine as-is, which supplies its own defaults for omitted keys.
pub type FourierParameters = serde_json::Map<String, serde_json::Value>;

/// Effective analysis configuration passed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisOptions {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Number of input channels
    pub channels: u16,

    /// Transform-tuning parameters forwarded opaquely to the engine
    pub fourier_parameters: FourierParameters,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            channels: 2,
            fourier_parameters: FourierParameters::new(),
        }
    }
}

/// Partial analysis options supplied by the caller.
///
/// Field names serialize in PascalCase so option payloads from the
/// application layer (`{"SampleRate": ..., "Channels": ...}`) deserialize
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AnalysisOverrides {
    /// Sample rate in Hz, if overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,

    /// Channel count, if overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,

    /// Replacement Fourier parameters, if overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fourier_parameters: Option<FourierParameters>,
}

impl AnalysisOptions {
    /// Shallow-merge caller overrides over these options.
    ///
    /// Each present override replaces the corresponding top-level value.
    /// `fourier_parameters` is replaced wholesale, never deep-merged: an
    /// override map drops every default key it does not restate.
    pub fn merged(mut self, overrides: AnalysisOverrides) -> Self {
        if let Some(sample_rate) = overrides.sample_rate {
            self.sample_rate = sample_rate;
        }
        if let Some(channels) = overrides.channels {
            self.channels = channels;
        }
        if let Some(fourier_parameters) = overrides.fourier_parameters {
            self.fourier_parameters = fourier_parameters;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_options_match_bridge_defaults() {
        let options = AnalysisOptions::default();

        assert_eq!(options.sample_rate, 44_100.0);
        assert_eq!(options.channels, 2);
        assert!(options.fourier_parameters.is_empty());
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let options = AnalysisOptions::default().merged(AnalysisOverrides::default());

        assert_eq!(options, AnalysisOptions::default());
    }

    #[test]
    fn single_override_keeps_other_defaults() {
        let overrides = AnalysisOverrides {
            channels: Some(1),
            ..Default::default()
        };

        let options = AnalysisOptions::default().merged(overrides);

        assert_eq!(options.sample_rate, 44_100.0);
        assert_eq!(options.channels, 1);
        assert!(options.fourier_parameters.is_empty());
    }

    #[test]
    fn fourier_parameters_are_replaced_wholesale() {
        let mut base = AnalysisOptions::default();
        base.fourier_parameters
            .insert("WindowSize".to_string(), json!(2048));
        base.fourier_parameters
            .insert("Overlap".to_string(), json!(0.5));

        let mut replacement = FourierParameters::new();
        replacement.insert("WindowSize".to_string(), json!(4096));

        let overrides = AnalysisOverrides {
            fourier_parameters: Some(replacement),
            ..Default::default()
        };

        let merged = base.merged(overrides);

        // Shallow merge: the override map wins outright, "Overlap" is gone
        assert_eq!(merged.fourier_parameters.len(), 1);
        assert_eq!(merged.fourier_parameters["WindowSize"], json!(4096));
    }

    #[test]
    fn overrides_deserialize_from_pascal_case_payload() {
        let overrides: AnalysisOverrides =
            serde_json::from_value(json!({ "SampleRate": 22_050.0, "Channels": 1 })).unwrap();

        assert_eq!(overrides.sample_rate, Some(22_050.0));
        assert_eq!(overrides.channels, Some(1));
        assert!(overrides.fourier_parameters.is_none());
    }

    #[test]
    fn partial_payload_leaves_missing_fields_unset() {
        let overrides: AnalysisOverrides =
            serde_json::from_value(json!({ "FourierParameters": { "Overlap": 0.75 } })).unwrap();

        assert!(overrides.sample_rate.is_none());
        assert!(overrides.channels.is_none());
        assert_eq!(
            overrides.fourier_parameters.unwrap()["Overlap"],
            json!(0.75)
        );
    }
}
