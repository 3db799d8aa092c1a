use serde::Serialize;

/// Position and rotation of a card body, in container pixels / radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BodyPose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

/// Where a present card is in its `present -> deleting -> absent` lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CardPhase {
    #[default]
    Resting,
    /// Held by the pointer.
    Dragging,
    /// Playing its exit transition; removed once `remove_at_ms` passes.
    /// `frozen` is the last synced pose, rendered instead of live physics.
    Deleting { remove_at_ms: f64, frozen: Option<BodyPose> },
}

impl CardPhase {
    pub fn is_deleting(&self) -> bool {
        matches!(self, CardPhase::Deleting { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, CardPhase::Dragging)
    }

    /// Moves to `Deleting`. Returns false if the card was already deleting,
    /// in which case the earlier deadline is kept.
    pub fn begin_delete(&mut self, remove_at_ms: f64, frozen: Option<BodyPose>) -> bool {
        if self.is_deleting() {
            return false;
        }
        *self = CardPhase::Deleting { remove_at_ms, frozen };
        true
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        match self {
            CardPhase::Deleting { remove_at_ms, .. } => now_ms >= *remove_at_ms,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_delete_keeps_first_deadline() {
        let mut phase = CardPhase::Dragging;
        assert!(phase.begin_delete(100.0, None));
        assert!(!phase.begin_delete(500.0, None));
        assert!(phase.is_due(100.0));
        assert!(!phase.is_due(99.0));
    }

    #[test]
    fn resting_is_never_due() {
        assert!(!CardPhase::Resting.is_due(f64::MAX));
    }
}
