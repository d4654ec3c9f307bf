// Pointer and scroll polish: card tilt, shine highlight, background
// parallax. Pure arithmetic over viewport-relative geometry; the host
// applies the resulting transforms and CSS variables.

use crate::types::{ClientCoord, ClientRect, Command, EffectSettings, ElementId};

/// Tilt angles in degrees for a pointer at `position` over a card at
/// `rect`. The card rotates toward the pointer: below center pitches the
/// top away (`rotate_x` positive), left of center yaws right.
pub fn tilt_angles(position: ClientCoord, rect: &ClientRect, divisor: f32) -> (f32, f32) {
    let local_x = position.x - rect.x;
    let local_y = position.y - rect.y;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;

    let rotate_x = (local_y - center_y) / divisor;
    let rotate_y = (center_x - local_x) / divisor;
    (rotate_x, rotate_y)
}

/// Card-local pointer position for the shine highlight CSS variables.
pub fn shine_position(position: ClientCoord, rect: &ClientRect) -> ClientCoord {
    ClientCoord {
        x: position.x - rect.x,
        y: position.y - rect.y,
    }
}

/// Vertical translation of a background layer for a given scroll offset.
pub fn parallax_offset(scroll_y: f32, factor: f32) -> f32 {
    scroll_y * factor
}

/// Turns pointer and scroll events into effect commands, honoring the
/// per-effect enable flags.
pub struct EffectEngine {
    settings: EffectSettings,
}

impl EffectEngine {
    pub fn new(settings: EffectSettings) -> Self {
        let settings = EffectSettings {
            // A tiny divisor would whip cards around; keep it sane.
            tilt_divisor: settings.tilt_divisor.max(1.0),
            ..settings
        };
        EffectEngine { settings }
    }

    /// Commands for a pointer move over a card. `tilts`/`shines` say which
    /// markers the card carries.
    pub fn pointer_move(
        &self,
        id: ElementId,
        position: ClientCoord,
        rect: &ClientRect,
        tilts: bool,
        shines: bool,
    ) -> Vec<Command> {
        let mut commands = Vec::with_capacity(2);

        if tilts && self.settings.tilt {
            let (rotate_x_deg, rotate_y_deg) =
                tilt_angles(position, rect, self.settings.tilt_divisor);
            commands.push(Command::SetTilt {
                id,
                rotate_x_deg,
                rotate_y_deg,
                lift_px: self.settings.tilt_lift_px,
            });
        }

        if shines && self.settings.shine {
            let local = shine_position(position, rect);
            commands.push(Command::SetShine {
                id,
                x: local.x,
                y: local.y,
            });
        }

        commands
    }

    /// Command for the pointer leaving a card: tilted cards snap back to
    /// rest, shine cards keep their last highlight position.
    pub fn pointer_leave(&self, id: ElementId, tilts: bool) -> Option<Command> {
        if tilts && self.settings.tilt {
            Some(Command::ResetTilt { id })
        } else {
            None
        }
    }

    /// Parallax commands for every registered background layer.
    pub fn scroll(&self, layers: &[ElementId], offset_y: f32) -> Vec<Command> {
        let shifted = parallax_offset(offset_y, self.settings.parallax_factor);
        layers
            .iter()
            .map(|id| Command::SetParallax {
                id: *id,
                offset_y: shifted,
            })
            .collect()
    }
}
