use rapier2d::prelude::*;

/// A static boundary rectangle, centre + half extents in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub center: (f32, f32),
    pub half_extents: (f32, f32),
}

/// Floor, ceiling, left and right walls for a `width` x `height` container.
///
/// The floor overlaps the bottom `padding` pixels of the container so cards
/// rest slightly above the bottom edge; the other three walls sit `padding`
/// pixels outside it.
pub fn arena_walls(width: f32, height: f32, thickness: f32, padding: f32) -> [Wall; 4] {
    let half_t = thickness / 2.0;
    [
        // floor
        Wall {
            center: (width / 2.0, height - half_t + padding),
            half_extents: ((width + thickness) / 2.0, half_t),
        },
        // ceiling
        Wall {
            center: (width / 2.0, -half_t - padding),
            half_extents: ((width + thickness) / 2.0, half_t),
        },
        // left
        Wall {
            center: (-half_t - padding, height / 2.0),
            half_extents: (half_t, height / 2.0),
        },
        // right
        Wall {
            center: (width + half_t + padding, height / 2.0),
            half_extents: (half_t, height / 2.0),
        },
    ]
}

pub(super) fn insert_walls(
    walls: &[Wall],
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
) -> Vec<RigidBodyHandle> {
    walls
        .iter()
        .map(|wall| {
            let handle = bodies.insert(
                RigidBodyBuilder::fixed()
                    .translation(vector![wall.center.0, wall.center.1])
                    .build(),
            );
            let collider = ColliderBuilder::cuboid(wall.half_extents.0, wall.half_extents.1).build();
            colliders.insert_with_parent(collider, handle, bodies);
            handle
        })
        .collect()
}
