use rapier2d::prelude::*;

use crate::domain::card::CardId;
use crate::domain::config::DragConfig;

/// A card held by the pointer.
#[derive(Clone, Debug)]
pub(super) struct PointerGrab {
    pub id: CardId,
    /// Grab point in the body's local frame.
    pub local_anchor: Point<Real>,
    /// Where the pointer currently is, in world space.
    pub target: Point<Real>,
}

/// Pulls the grabbed point toward the pointer like a damped spring.
///
/// `stiffness` is the fraction of the remaining gap closed per step,
/// `damping` the fraction of current velocity dropped per step.
pub(super) fn pull_toward_pointer(grab: &PointerGrab, body: &mut RigidBody, drag: &DragConfig, dt: Real) {
    let anchor = body.position().transform_point(&grab.local_anchor);
    let gap = grab.target - anchor;
    let keep = 1.0 - drag.damping;
    let linvel = *body.linvel() * keep + gap * (drag.stiffness / dt);
    let angvel = body.angvel() * keep;
    body.set_linvel(linvel, true);
    body.set_angvel(angvel, true);
}
