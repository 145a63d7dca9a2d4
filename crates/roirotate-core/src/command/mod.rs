//! Interactive "rotate selection" command.
//!
//! The command glues the rotator to its host application: it asks for an
//! angle, resolves the pivot, rotates the current selection and installs
//! the result while pushing the previous selection onto the host's history.
//! Prompting, selection storage and undo belong to the host and are reached
//! through the [`AnglePrompt`] and [`SelectionHost`] traits.

mod canvas;
mod settings;

pub use canvas::{canvas_for_loaded_roi, canvas_size_for, CANVAS_MARGIN};
pub use settings::{
    decimal_places, PromptReply, PromptRequest, RotateSettings, DEFAULT_ANGLE,
    NEGATIVE_ANGLE_HINT,
};

use crate::geometry::Point;
use crate::roi::Roi;
use crate::rotate::{resolve_center, rotate_about, RotateOutcome};
use thiserror::Error;
use tracing::{debug, warn};

/// Error types for the rotate command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The host has no current selection.
    #[error("This command requires a selection")]
    NoSelection,

    /// The prompt returned a NaN or infinite angle.
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f64),
}

/// Source of the rotation angle (usually a modal dialog).
pub trait AnglePrompt {
    /// Ask for an angle; `None` means the user cancelled.
    fn prompt(&mut self, request: &PromptRequest) -> Option<PromptReply>;
}

/// Application state the command operates on.
pub trait SelectionHost {
    /// Current selection, if any.
    fn selection(&mut self) -> Option<&mut Roi>;

    /// `(width, height)` of the image the selection belongs to.
    fn image_size(&self) -> (u32, u32);

    /// True while a macro drives the command.
    fn macro_running(&self) -> bool {
        false
    }

    /// True when a macro supplied explicit options for this invocation.
    fn macro_options_present(&self) -> bool {
        false
    }

    /// Record the selection being replaced so it can be restored.
    fn push_history(&mut self, previous: Roi);

    /// Make `roi` the current selection.
    fn install_selection(&mut self, roi: Roi);
}

/// What the command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The prompt was dismissed; nothing changed.
    Cancelled,
    /// The selection rotated itself (image stamp); nothing was installed.
    RotatedInPlace,
    /// A rotated selection was installed.
    Replaced { angle: f64, center: Point },
}

/// The rotate-selection command with its remembered defaults.
#[derive(Debug, Clone, Default)]
pub struct RotateSelection {
    pub settings: RotateSettings,
}

impl RotateSelection {
    pub fn new(settings: RotateSettings) -> Self {
        Self { settings }
    }

    /// Run the command against `host`, asking `prompt` for the angle.
    pub fn run<H, P>(
        &mut self,
        host: &mut H,
        prompt: &mut P,
    ) -> Result<CommandOutcome, CommandError>
    where
        H: SelectionHost,
        P: AnglePrompt,
    {
        if host.selection().is_none() {
            warn!("rotate requested without a selection");
            return Err(CommandError::NoSelection);
        }

        // Macro runs never inherit the checkbox from an interactive session
        if host.macro_options_present() {
            self.settings.rotate_around_image_center = false;
        }

        let request = PromptRequest::new(
            self.settings.default_angle,
            self.settings.rotate_around_image_center,
        );
        let Some(reply) = prompt.prompt(&request) else {
            debug!("rotate prompt cancelled");
            return Ok(CommandOutcome::Cancelled);
        };
        if !reply.angle.is_finite() {
            warn!(angle = reply.angle, "rejecting non-finite rotation angle");
            return Err(CommandError::InvalidAngle(reply.angle));
        }

        self.settings.rotate_around_image_center = reply.rotate_around_image_center;
        self.settings.remember_angle(reply.angle, host.macro_running());

        let around_image = self.settings.rotate_around_image_center;
        let (width, height) = host.image_size();
        let Some(roi) = host.selection() else {
            return Err(CommandError::NoSelection);
        };
        let center = resolve_center(roi, around_image, width, height);

        let mut replacement = match rotate_about(roi, reply.angle, center) {
            RotateOutcome::Replaced(replacement) => replacement,
            RotateOutcome::RotatedInPlace => {
                debug!(angle = reply.angle, "selection rotated in place");
                return Ok(CommandOutcome::RotatedInPlace);
            }
        };
        if !around_image {
            replacement.set_rotation_center(center);
        }
        let previous = roi.clone();

        host.push_history(previous);
        host.install_selection(replacement);
        debug!(
            angle = reply.angle,
            center_x = center.x,
            center_y = center.y,
            around_image,
            "selection rotated"
        );

        Ok(CommandOutcome::Replaced {
            angle: reply.angle,
            center,
        })
    }
}
