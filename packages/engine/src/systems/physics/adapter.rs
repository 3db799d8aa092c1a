use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::domain::card::CardId;
use crate::domain::config::{BoardConfig, DragConfig, MaterialConfig, SpawnVelocity};
use crate::domain::lifecycle::BodyPose;

use super::arena::{arena_walls, insert_walls};
use super::pointer::{pull_toward_pointer, PointerGrab};

struct CardBody {
    handle: RigidBodyHandle,
    /// Insertion order; later bodies are drawn (and picked) on top.
    seq: u64,
}

/// Everything rapier needs to step one world.
struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    walls: Vec<RigidBodyHandle>,
    cards: HashMap<CardId, CardBody>,
    grab: Option<PointerGrab>,
    next_seq: u64,
    steps: u64,
}

impl PhysicsWorld {
    fn new(width: f32, height: f32, thickness: f32, padding: f32, dt: f32) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let walls = insert_walls(&arena_walls(width, height, thickness, padding), &mut bodies, &mut colliders);

        let mut params = IntegrationParameters::default();
        params.dt = dt;

        Self {
            pipeline: PhysicsPipeline::new(),
            params,
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            walls,
            cards: HashMap::new(),
            grab: None,
            next_seq: 0,
            steps: 0,
        }
    }

    fn remove_handle(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn wake_all(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.wake_up(true);
        }
    }
}

/// Thin wrapper over a rapier world keyed by card id.
///
/// Every operation is a no-op before [`PhysicsAdapter::initialize`].
pub struct PhysicsAdapter {
    world: Option<PhysicsWorld>,
    gravity_enabled: bool,
    gravity: f32,
    dt: f32,
    wall_thickness: f32,
    wall_padding: f32,
    material: MaterialConfig,
    spawn_velocity: SpawnVelocity,
    drag: DragConfig,
    rng: SmallRng,
}

impl PhysicsAdapter {
    pub fn new(config: &BoardConfig, seed: u64) -> Self {
        Self {
            world: None,
            gravity_enabled: false,
            gravity: config.gravity,
            dt: config.step_dt(),
            wall_thickness: config.wall_thickness,
            wall_padding: config.wall_padding,
            material: config.material,
            spawn_velocity: config.spawn_velocity,
            drag: config.drag,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// Builds a fresh walled arena for a `width` x `height` container,
    /// dropping any previous world and its bodies.
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.world = Some(PhysicsWorld::new(
            width,
            height,
            self.wall_thickness,
            self.wall_padding,
            self.dt,
        ));
        info!("physics arena initialized at {width}x{height}");
    }

    /// Releases the grab, all bodies and the world itself.
    pub fn teardown(&mut self) {
        if let Some(world) = self.world.take() {
            info!(
                "physics teardown after {} steps ({} card bodies released)",
                world.steps,
                world.cards.len()
            );
        }
    }

    /// Inserts a dynamic card body centred at (`x`, `y`) with a small random
    /// initial velocity. Re-adding an id replaces its body.
    pub fn add_body(&mut self, id: &CardId, x: f32, y: f32, w: f32, h: f32) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if let Some(old) = world.cards.remove(id) {
            world.remove_handle(old.handle);
        }

        let velocity = vector![
            self.rng.gen_range(-0.5f32..0.5) * self.spawn_velocity.x,
            self.rng.gen_range(-0.5f32..0.5) * self.spawn_velocity.y
        ];
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .linvel(velocity)
            .linear_damping(self.material.linear_damping)
            .build();
        let handle = world.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(w / 2.0, h / 2.0)
            .friction(self.material.friction)
            .restitution(self.material.restitution)
            .density(self.material.density)
            .build();
        world.colliders.insert_with_parent(collider, handle, &mut world.bodies);

        let seq = world.next_seq;
        world.next_seq += 1;
        world.cards.insert(id.clone(), CardBody { handle, seq });
        debug!("body added for card {id} at ({x:.1}, {y:.1})");
    }

    pub fn remove_body(&mut self, id: &CardId) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let Some(card) = world.cards.remove(id) else {
            return;
        };
        if world.grab.as_ref().is_some_and(|g| &g.id == id) {
            world.grab = None;
        }
        world.remove_handle(card.handle);
        debug!("body removed for card {id}");
    }

    pub fn has_body(&self, id: &CardId) -> bool {
        self.world.as_ref().is_some_and(|w| w.cards.contains_key(id))
    }

    pub fn body_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.cards.len())
    }

    pub fn wall_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.walls.len())
    }

    /// Pose of every live card body as of the last step.
    pub fn positions(&self) -> BTreeMap<CardId, BodyPose> {
        let Some(world) = self.world.as_ref() else {
            return BTreeMap::new();
        };
        world
            .cards
            .iter()
            .filter_map(|(id, card)| {
                let body = world.bodies.get(card.handle)?;
                let t = body.translation();
                Some((
                    id.clone(),
                    BodyPose {
                        x: t.x,
                        y: t.y,
                        rotation: body.rotation().angle(),
                    },
                ))
            })
            .collect()
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Vertical gravity at the configured magnitude when `active`, zero
    /// otherwise. Horizontal gravity is always zero.
    pub fn set_gravity_enabled(&mut self, active: bool) {
        if self.gravity_enabled == active {
            return;
        }
        self.gravity_enabled = active;
        if let Some(world) = self.world.as_mut() {
            world.wake_all();
        }
        debug!("gravity {}", if active { "on" } else { "off" });
    }

    fn gravity_vector(&self) -> Vector<Real> {
        if self.gravity_enabled {
            vector![0.0, self.gravity]
        } else {
            vector![0.0, 0.0]
        }
    }

    /// Advances the world by one fixed step.
    pub fn step(&mut self) {
        let gravity = self.gravity_vector();
        let drag = self.drag;
        let Some(world) = self.world.as_mut() else {
            return;
        };

        if let Some(grab) = world.grab.as_ref() {
            if let Some(card) = world.cards.get(&grab.id) {
                if let Some(body) = world.bodies.get_mut(card.handle) {
                    pull_toward_pointer(grab, body, &drag, world.params.dt);
                }
            }
        }

        world.pipeline.step(
            &gravity,
            &world.params,
            &mut world.islands,
            &mut world.broad_phase,
            &mut world.narrow_phase,
            &mut world.bodies,
            &mut world.colliders,
            &mut world.impulse_joints,
            &mut world.multibody_joints,
            &mut world.ccd_solver,
            &(),
            &(),
        );
        world.steps += 1;
    }

    pub fn step_count(&self) -> u64 {
        self.world.as_ref().map_or(0, |w| w.steps)
    }

    /// Grabs the topmost card body under (`x`, `y`).
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<CardId> {
        let world = self.world.as_mut()?;
        let point = point![x, y];

        let mut hit: Option<(&CardId, &CardBody)> = None;
        for (id, card) in world.cards.iter() {
            let Some(body) = world.bodies.get(card.handle) else {
                continue;
            };
            let inside = body.colliders().iter().any(|&ch| {
                world
                    .colliders
                    .get(ch)
                    .is_some_and(|c| c.shape().contains_point(c.position(), &point))
            });
            if inside && hit.map_or(true, |(_, best)| card.seq > best.seq) {
                hit = Some((id, card));
            }
        }

        let (id, card) = hit?;
        let body = world.bodies.get(card.handle)?;
        let local_anchor = body.position().inverse_transform_point(&point);
        let id = id.clone();
        world.grab = Some(PointerGrab {
            id: id.clone(),
            local_anchor,
            target: point,
        });
        debug!("pointer grabbed card {id}");
        Some(id)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(grab) = self.world.as_mut().and_then(|w| w.grab.as_mut()) {
            grab.target = point![x, y];
        }
    }

    /// Releases the grab, returning the id that was held.
    pub fn pointer_up(&mut self) -> Option<CardId> {
        self.world.as_mut()?.grab.take().map(|g| g.id)
    }

    pub fn grabbed(&self) -> Option<&CardId> {
        self.world.as_ref()?.grab.as_ref().map(|g| &g.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> PhysicsAdapter {
        PhysicsAdapter::new(&BoardConfig::default(), 1)
    }

    fn id(s: &str) -> CardId {
        CardId::from(s)
    }

    #[test]
    fn operations_before_initialize_are_noops() {
        let mut physics = adapter();
        physics.add_body(&id("1"), 100.0, 100.0, 50.0, 20.0);
        physics.remove_body(&id("1"));
        physics.step();
        assert!(physics.positions().is_empty());
        assert_eq!(physics.pointer_down(100.0, 100.0), None);
        assert_eq!(physics.step_count(), 0);
    }

    #[test]
    fn add_and_remove_track_positions() {
        let mut physics = adapter();
        physics.initialize(800.0, 600.0);
        assert_eq!(physics.wall_count(), 4);

        physics.add_body(&id("1"), 200.0, 100.0, 100.0, 40.0);
        physics.add_body(&id("2"), 500.0, 100.0, 100.0, 40.0);
        let positions = physics.positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[&id("1")].x, 200.0);

        physics.remove_body(&id("1"));
        physics.remove_body(&id("1"));
        assert_eq!(physics.positions().keys().collect::<Vec<_>>(), vec![&id("2")]);
    }

    #[test]
    fn re_adding_an_id_replaces_the_body() {
        let mut physics = adapter();
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 100.0, 100.0, 50.0, 20.0);
        physics.add_body(&id("1"), 300.0, 100.0, 50.0, 20.0);
        assert_eq!(physics.body_count(), 1);
        assert_eq!(physics.positions()[&id("1")].x, 300.0);
    }

    #[test]
    fn gravity_pulls_bodies_down_and_floor_holds_them() {
        let mut config = BoardConfig::default();
        config.spawn_velocity.x = 0.0;
        config.spawn_velocity.y = 0.0;
        let mut physics = PhysicsAdapter::new(&config, 2);
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 400.0, 100.0, 100.0, 40.0);
        physics.set_gravity_enabled(true);

        for _ in 0..10 {
            physics.step();
        }
        let y_early = physics.positions()[&id("1")].y;
        assert!(y_early > 100.0);

        for _ in 0..600 {
            physics.step();
        }
        let pose = physics.positions()[&id("1")];
        // Floor top is at 550; the card is 40 tall.
        assert!(pose.y < 550.0);
        assert!(pose.x > -50.0 && pose.x < 850.0);
    }

    #[test]
    fn without_gravity_bodies_only_drift() {
        let mut config = BoardConfig::default();
        config.spawn_velocity.x = 0.0;
        config.spawn_velocity.y = 0.0;
        let mut physics = PhysicsAdapter::new(&config, 3);
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 400.0, 300.0, 100.0, 40.0);
        for _ in 0..60 {
            physics.step();
        }
        let pose = physics.positions()[&id("1")];
        assert!((pose.y - 300.0).abs() < 1e-3);
        assert!((pose.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn pointer_grab_picks_topmost_and_drags() {
        let mut config = BoardConfig::default();
        config.spawn_velocity.x = 0.0;
        config.spawn_velocity.y = 0.0;
        let mut physics = PhysicsAdapter::new(&config, 3);
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 400.0, 300.0, 100.0, 40.0);
        physics.add_body(&id("2"), 410.0, 300.0, 100.0, 40.0);

        assert_eq!(physics.pointer_down(405.0, 300.0), Some(id("2")));
        assert_eq!(physics.pointer_up(), Some(id("2")));
        assert_eq!(physics.pointer_down(5.0, 5.0), None);

        physics.remove_body(&id("1"));
        assert_eq!(physics.pointer_down(410.0, 300.0), Some(id("2")));
        physics.pointer_move(600.0, 300.0);
        for _ in 0..120 {
            physics.step();
        }
        let pose = physics.positions()[&id("2")];
        assert!(pose.x > 500.0, "dragged card should follow the pointer, got {pose:?}");
    }

    #[test]
    fn removing_grabbed_body_releases_grab() {
        let mut physics = adapter();
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 400.0, 300.0, 100.0, 40.0);
        assert!(physics.pointer_down(400.0, 300.0).is_some());
        physics.remove_body(&id("1"));
        assert_eq!(physics.grabbed(), None);
        physics.step();
    }

    #[test]
    fn teardown_releases_everything() {
        let mut physics = adapter();
        physics.initialize(800.0, 600.0);
        physics.add_body(&id("1"), 400.0, 300.0, 100.0, 40.0);
        physics.teardown();
        assert!(!physics.is_initialized());
        assert!(physics.positions().is_empty());
    }
}
