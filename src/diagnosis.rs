//! Mock diagnosis generator.
//!
//! Picks one entry from a fixed catalog of plant diseases and attaches a
//! pseudo-random confidence score in `[0.50, 1.00]`. No image is ever
//! inspected; the result depends only on the injected [`RandomSource`].

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A disease the generator can report, with its paired treatment advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disease {
    pub label: &'static str,
    pub treatment: &'static str,
}

/// The fixed catalog. Labels and treatments are only ever returned together.
pub const CATALOG: [Disease; 3] = [
    Disease {
        label: "Leaf Blight",
        treatment: "Remove affected leaves, apply fungicide, improve air circulation.",
    },
    Disease {
        label: "Powdery Mildew",
        treatment: "Spray with neem oil, avoid overhead watering, increase sunlight.",
    },
    Disease {
        label: "Root Rot",
        treatment: "Reduce watering, repot in dry soil, trim damaged roots.",
    },
];

/// Result returned to the client after an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub label: String,
    pub treatment: String,
    /// Two-decimal string, e.g. `"0.73"`.
    pub confidence: String,
}

/// Generates a mock diagnosis.
///
/// Draws two unit values: the first selects the catalog entry, the second
/// becomes the confidence score.
pub fn generate(rng: &dyn RandomSource) -> Diagnosis {
    let disease = pick(rng.next_unit());
    let confidence = format_confidence(rng.next_unit());

    Diagnosis {
        label: disease.label.to_string(),
        treatment: disease.treatment.to_string(),
        confidence,
    }
}

/// Looks up the catalog treatment for a label.
pub fn treatment_for(label: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|d| d.label == label)
        .map(|d| d.treatment)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pick(unit: f64) -> Disease {
    let idx = (unit * CATALOG.len() as f64).floor() as usize;
    CATALOG[idx.min(CATALOG.len() - 1)]
}

/// Two-decimal score in `[0.50, 1.00]`.
///
/// `{:.2}` rounds exact binary ties to even, so `0.625` would print `0.62`.
/// Exact ties round up instead; every other value keeps `{:.2}`.
fn format_confidence(unit: f64) -> String {
    let value = unit.clamp(0.0, 1.0) * 0.5 + 0.5;
    let scaled = value * 100.0;
    let exact_tie = scaled.fract() == 0.5 && value.mul_add(100.0, -scaled) == 0.0;

    if exact_tie {
        format!("{:.2}", scaled.ceil() / 100.0)
    } else {
        format!("{value:.2}")
    }
}
