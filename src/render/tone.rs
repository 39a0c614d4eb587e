use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::{hsv_to_rgb, linear_to_srgb, luminance};

/// Middle grey in scene-linear units
const MIDDLE_GREY: f32 = 0.18;
/// Stops below and above middle grey covered by the log encoding
const LOG_STOPS_BELOW: f32 = 10.0;
const LOG_STOPS_ABOVE: f32 = 6.5;
/// Scene value that the filmic curve maps to display white
const FILMIC_WHITE: f32 = 16.0;

/// Mapping from scene-linear radiance to display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
pub enum ViewTransform {
    #[default]
    #[value(name = "Standard")]
    Standard,
    #[value(name = "Filmic")]
    Filmic,
    #[value(name = "Filmic Log")]
    #[serde(rename = "Filmic Log")]
    FilmicLog,
    #[value(name = "Raw")]
    Raw,
    #[value(name = "False Color")]
    #[serde(rename = "False Color")]
    FalseColor,
}

impl ViewTransform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewTransform::Standard => "Standard",
            ViewTransform::Filmic => "Filmic",
            ViewTransform::FilmicLog => "Filmic Log",
            ViewTransform::Raw => "Raw",
            ViewTransform::FalseColor => "False Color",
        }
    }

    /// Display-referred RGB in `[0, 1]`
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ViewTransform::Standard => rgb.map(linear_to_srgb),
            ViewTransform::Filmic => rgb.map(|c| linear_to_srgb(filmic_shoulder(c))),
            ViewTransform::FilmicLog => rgb.map(log_encode),
            ViewTransform::Raw => rgb.map(|c| c.clamp(0.0, 1.0)),
            ViewTransform::FalseColor => {
                // blue for deep shadow through red for highlights
                let level = log_encode(luminance(rgb));
                hsv_to_rgb((1.0 - level) * 0.66, 1.0, 1.0)
            }
        }
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extended Reinhard curve reaching 1.0 at `FILMIC_WHITE`
fn filmic_shoulder(c: f32) -> f32 {
    let c = c.max(0.0);
    (c * (1.0 + c / (FILMIC_WHITE * FILMIC_WHITE)) / (1.0 + c)).min(1.0)
}

fn log_encode(c: f32) -> f32 {
    let stops = (c.max(1e-10) / MIDDLE_GREY).log2();
    ((stops + LOG_STOPS_BELOW) / (LOG_STOPS_BELOW + LOG_STOPS_ABOVE)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_transform_stays_in_display_range() {
        for view in ViewTransform::value_variants() {
            for c in [0.0, 0.01, 0.18, 1.0, 50.0] {
                for v in view.apply([c, c * 0.5, c * 2.0]) {
                    assert!((0.0..=1.0).contains(&v), "{view} gave {v} for {c}");
                }
            }
        }
    }

    #[test]
    fn test_raw_is_identity_in_range() {
        assert_eq!(ViewTransform::Raw.apply([0.25, 0.5, 0.75]), [0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_filmic_compresses_highlights() {
        let standard = ViewTransform::Standard.apply([4.0; 3]);
        let filmic = ViewTransform::Filmic.apply([4.0; 3]);
        assert!(standard[0] > 0.999);
        assert!(filmic[0] < 1.0);
    }

    #[test]
    fn test_names_with_spaces_parse() {
        assert_eq!(
            ViewTransform::from_str("Filmic Log", false).unwrap(),
            ViewTransform::FilmicLog
        );
        assert_eq!(
            serde_json::from_str::<ViewTransform>("\"False Color\"").unwrap(),
            ViewTransform::FalseColor
        );
        assert!(ViewTransform::from_str("Vivid", false).is_err());
    }
}
