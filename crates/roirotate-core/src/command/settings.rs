//! Persisted defaults for the interactive rotate command.

use serde::{Deserialize, Serialize};

/// Angle offered the first time the command runs.
pub const DEFAULT_ANGLE: f64 = 15.0;

/// Hint shown under the angle field.
pub const NEGATIVE_ANGLE_HINT: &str = "Enter negative angle to \nrotate counter-clockwise";

/// Defaults remembered across invocations of the rotate command.
///
/// Owned by the caller and passed into the command, so nothing in the core
/// holds global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotateSettings {
    /// Last angle entered interactively (degrees)
    #[serde(default = "default_angle")]
    pub default_angle: f64,
    /// Last state of the "rotate around image center" checkbox
    #[serde(default)]
    pub rotate_around_image_center: bool,
}

fn default_angle() -> f64 {
    DEFAULT_ANGLE
}

impl Default for RotateSettings {
    fn default() -> Self {
        Self {
            default_angle: DEFAULT_ANGLE,
            rotate_around_image_center: false,
        }
    }
}

impl RotateSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember an angle entered by the user.
    ///
    /// Angles supplied by a running macro are not remembered.
    pub fn remember_angle(&mut self, angle: f64, macro_running: bool) {
        if !macro_running {
            self.default_angle = angle;
        }
    }
}

/// What the angle prompt should show.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub title: &'static str,
    /// Initial value of the angle field (degrees)
    pub angle: f64,
    /// Decimal places used to display `angle`
    pub decimal_places: usize,
    /// Initial state of the "rotate around image center" checkbox
    pub rotate_around_image_center: bool,
    pub hint: &'static str,
}

impl PromptRequest {
    pub fn new(angle: f64, rotate_around_image_center: bool) -> Self {
        Self {
            title: "Rotate Selection",
            angle,
            decimal_places: decimal_places(angle),
            rotate_around_image_center,
            hint: NEGATIVE_ANGLE_HINT,
        }
    }
}

/// Values entered in the angle prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromptReply {
    pub angle: f64,
    pub rotate_around_image_center: bool,
}

/// Whole-degree angles display without decimals, others with two.
pub fn decimal_places(angle: f64) -> usize {
    if angle.fract() == 0.0 {
        0
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RotateSettings::new();
        assert_eq!(settings.default_angle, 15.0);
        assert!(!settings.rotate_around_image_center);
    }

    #[test]
    fn test_remember_angle_skipped_for_macros() {
        let mut settings = RotateSettings::new();
        settings.remember_angle(42.0, true);
        assert_eq!(settings.default_angle, 15.0);

        settings.remember_angle(42.0, false);
        assert_eq!(settings.default_angle, 42.0);
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(15.0), 0);
        assert_eq!(decimal_places(-90.0), 0);
        assert_eq!(decimal_places(12.5), 2);
        assert_eq!(decimal_places(-0.25), 2);
    }

    #[test]
    fn test_prompt_request() {
        let req = PromptRequest::new(7.5, true);
        assert_eq!(req.title, "Rotate Selection");
        assert_eq!(req.decimal_places, 2);
        assert!(req.rotate_around_image_center);
        assert!(req.hint.contains("counter-clockwise"));
    }
}
