//! Output labels and their wire strings.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary verdict. The forest emits class `0` for `Safe`, `1` for `Suspicious`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Safe,
    Suspicious,
}

impl Label {
    pub fn from_class(class: usize) -> Self {
        if class == 1 {
            Label::Suspicious
        } else {
            Label::Safe
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Safe => "Safe",
            Label::Suspicious => "Suspicious",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stage of the pipeline produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// The plaintext-HTTP rule short-circuited the model.
    Rule,
    /// The forest voted.
    Model,
}

/// A label together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    pub source: VerdictSource,
}

/// Wire message for the plaintext-HTTP rule verdict.
pub const NO_HTTPS_MESSAGE: &str = "Suspicious (No HTTPS found)";

impl Verdict {
    pub fn rule(label: Label) -> Self {
        Verdict {
            label,
            source: VerdictSource::Rule,
        }
    }

    pub fn model(label: Label) -> Self {
        Verdict {
            label,
            source: VerdictSource::Model,
        }
    }

    /// The string returned to HTTP callers. Rule verdicts keep a distinct
    /// message so callers can tell them from learned ones.
    pub fn message(&self) -> &'static str {
        match (self.source, self.label) {
            (VerdictSource::Rule, Label::Suspicious) => NO_HTTPS_MESSAGE,
            (_, label) => label.as_str(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}
