//! Kontinuierliche Tastatur-Bearbeitung (Verschieben, Anheben, Drehen, Skalieren).
//!
//! Jeder Kanal merkt sich bei der Start-Flanke den Transform davor und legt
//! bei der Stop-Flanke genau eine Undo-Aktion damit an, sofern sich etwas
//! geändert hat.

use super::super::modes::ModeContext;
use crate::core::{EntityId, Transform, UndoKind, UndoPayload};
use crate::shared::options::MIN_SCALE;
use crate::shared::{Axis, CursorKind};
use glam::{Quat, Vec2, Vec3};

/// Bearbeitungs-Kanal einer Taste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChannel {
    Nudge,
    Elevate,
    Rotate,
    Scale,
}

impl EditChannel {
    pub const ALL: [EditChannel; 4] = [
        EditChannel::Nudge,
        EditChannel::Elevate,
        EditChannel::Rotate,
        EditChannel::Scale,
    ];

    /// Undo-Art, die beim Stop aufgezeichnet wird.
    pub fn undo_kind(self) -> UndoKind {
        match self {
            EditChannel::Nudge => UndoKind::Move,
            EditChannel::Elevate => UndoKind::Elevate,
            EditChannel::Rotate => UndoKind::Rotate,
            EditChannel::Scale => UndoKind::Scale,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct EditSession {
    target: EntityId,
    before: Transform,
}

/// Offene Tastatur-Bearbeitungen je Kanal.
#[derive(Debug, Clone, Default)]
pub struct ContinuousEdit {
    sessions: [Option<EditSession>; 4],
}

impl ContinuousEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mindestens ein Kanal ist gestartet und noch nicht gestoppt.
    pub fn is_active(&self) -> bool {
        self.sessions.iter().any(Option::is_some)
    }

    /// Wertet die Tastatur-Signale des Ticks für `target` aus.
    pub fn update(&mut self, ctx: &mut ModeContext<'_>, target: EntityId) {
        let input = *ctx.input;
        for channel in EditChannel::ALL {
            let (started, moving, stopped) = match channel {
                EditChannel::Nudge => (
                    input.nudge.started,
                    input.nudge.amount != Vec2::ZERO,
                    input.nudge.stopped,
                ),
                EditChannel::Elevate => (
                    input.elevate.started,
                    input.elevate.amount != 0.0,
                    input.elevate.stopped,
                ),
                EditChannel::Rotate => (
                    input.rotate.started,
                    input.rotate.amount != 0.0,
                    input.rotate.stopped,
                ),
                EditChannel::Scale => (
                    input.scale.started,
                    input.scale.amount != Vec3::ZERO,
                    input.scale.stopped,
                ),
            };

            let slot = channel.slot();
            // Zielwechsel mitten in der Bearbeitung: alte zuerst abschließen
            if let Some(session) = self.sessions[slot].filter(|s| s.target != target) {
                self.sessions[slot] = None;
                commit(ctx, channel, session);
            }

            if (started || moving) && self.sessions[slot].is_none() {
                if let Some(before) = ctx.world.transform(target) {
                    self.sessions[slot] = Some(EditSession { target, before });
                }
            }

            if moving && self.sessions[slot].is_some() {
                apply(ctx, channel, target);
            }

            if stopped {
                if let Some(session) = self.sessions[slot].take() {
                    commit(ctx, channel, session);
                }
            }
        }
    }

    /// Schließt alle offenen Kanäle ab (Selektionswechsel, Moduswechsel).
    pub fn finish_all(&mut self, ctx: &mut ModeContext<'_>) {
        for channel in EditChannel::ALL {
            if let Some(session) = self.sessions[channel.slot()].take() {
                commit(ctx, channel, session);
            }
        }
    }
}

fn apply(ctx: &mut ModeContext<'_>, channel: EditChannel, target: EntityId) {
    let Some(mut transform) = ctx.world.transform(target) else {
        return;
    };
    let input = *ctx.input;
    let dt = input.delta_time;
    match channel {
        EditChannel::Nudge => {
            let step = input.nudge.amount * ctx.options.nudge_speed * dt;
            transform.position += Vec3::new(step.x, 0.0, step.y);
        }
        EditChannel::Elevate => {
            transform.position.y += input.elevate.amount * ctx.options.elevate_speed * dt;
        }
        EditChannel::Rotate => {
            let angle = (input.rotate.amount * ctx.options.rotate_speed_deg * dt).to_radians();
            transform.rotation = (Quat::from_rotation_y(angle) * transform.rotation).normalize();
        }
        EditChannel::Scale => {
            let amount = input.scale.amount;
            transform.scale =
                (transform.scale + amount * ctx.options.scale_speed * dt).max(Vec3::splat(MIN_SCALE));
            ctx.set_cursor(CursorKind::ScaleAxis(dominant_axis(amount)));
        }
    }
    ctx.world.set_transform(target, transform);
}

fn commit(ctx: &mut ModeContext<'_>, channel: EditChannel, session: EditSession) {
    if channel == EditChannel::Scale {
        ctx.set_cursor(CursorKind::Default);
    }
    let Some(now) = ctx.world.transform(session.target) else {
        log::debug!("Tastatur-Edit: {} existiert nicht mehr", session.target);
        return;
    };
    if now == session.before {
        return;
    }
    ctx.undo.record(
        channel.undo_kind(),
        session.target,
        UndoPayload::Transform {
            before: session.before,
        },
    );
}

fn dominant_axis(amount: Vec3) -> Axis {
    let abs = amount.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        Axis::X
    } else if abs.y >= abs.z {
        Axis::Y
    } else {
        Axis::Z
    }
}
