use crate::simulation::Simulation;
use nalgebra::{Point2, Vector2};
use rapier2d_f64::prelude::*;

const WALL_COLLISION_GROUP: Group = Group::GROUP_1;
const MOVER_COLLISION_GROUP: Group = Group::GROUP_2;
const PROJECTILE_COLLISION_GROUP: Group = Group::GROUP_3;
const TEAM_GROUPS: &[Group] = &[
    Group::GROUP_4,
    Group::GROUP_5,
    Group::GROUP_6,
    Group::GROUP_7,
    Group::GROUP_8,
    Group::GROUP_9,
    Group::GROUP_10,
    Group::GROUP_11,
];

fn team_group(team: i32) -> Group {
    TEAM_GROUPS[team.rem_euclid(TEAM_GROUPS.len() as i32) as usize]
}

fn all_team_groups() -> Group {
    let mut r = Group::empty();
    r.extend(TEAM_GROUPS.iter().cloned());
    r
}

/// Selects which colliders a ray cast may report.
#[derive(Clone, Copy, Debug)]
pub struct CollisionFilter {
    pub groups: InteractionGroups,
    pub exclude: Option<ColliderHandle>,
}

impl CollisionFilter {
    pub fn new(groups: InteractionGroups) -> Self {
        CollisionFilter {
            groups,
            exclude: None,
        }
    }

    pub fn excluding(self, collider: ColliderHandle) -> Self {
        CollisionFilter {
            exclude: Some(collider),
            ..self
        }
    }

    pub fn everything() -> Self {
        CollisionFilter::new(InteractionGroups::all())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f64,
    pub collider: Option<ColliderHandle>,
}

/// Nearest-hit ray query against scene geometry.
pub trait RayCaster {
    fn cast(
        &self,
        origin: Point2<f64>,
        direction: Vector2<f64>,
        max_distance: f64,
        filter: &CollisionFilter,
    ) -> Option<RayHit>;
}

/// Ray caster backed by the rapier query pipeline.
pub struct SceneQuery<'a> {
    pub bodies: &'a RigidBodySet,
    pub colliders: &'a ColliderSet,
    pub pipeline: &'a QueryPipeline,
}

impl<'a> SceneQuery<'a> {
    pub fn new(sim: &'a Simulation) -> Self {
        SceneQuery {
            bodies: &sim.bodies,
            colliders: &sim.colliders,
            pipeline: &sim.query_pipeline,
        }
    }
}

impl RayCaster for SceneQuery<'_> {
    fn cast(
        &self,
        origin: Point2<f64>,
        direction: Vector2<f64>,
        max_distance: f64,
        filter: &CollisionFilter,
    ) -> Option<RayHit> {
        let norm = direction.norm();
        if norm == 0.0 || max_distance < 0.0 {
            return None;
        }
        let ray = Ray::new(origin, direction / norm);
        let mut query_filter = QueryFilter::new().groups(filter.groups);
        if let Some(collider) = filter.exclude {
            query_filter = query_filter.exclude_collider(collider);
        }
        self.pipeline
            .cast_ray(
                self.bodies,
                self.colliders,
                &ray,
                max_distance,
                true,
                query_filter,
            )
            .map(|(collider, toi)| RayHit {
                distance: toi,
                collider: Some(collider),
            })
    }
}

pub fn wall_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(
        WALL_COLLISION_GROUP,
        MOVER_COLLISION_GROUP | PROJECTILE_COLLISION_GROUP,
    )
}

pub fn tank_interaction_groups(team: i32) -> InteractionGroups {
    InteractionGroups::new(
        team_group(team),
        MOVER_COLLISION_GROUP | PROJECTILE_COLLISION_GROUP,
    )
}

/// Filter for a tank's movement sweeps: walls and every tank but itself.
pub fn movement_filter(own_collider: ColliderHandle) -> CollisionFilter {
    CollisionFilter::new(InteractionGroups::new(
        MOVER_COLLISION_GROUP,
        WALL_COLLISION_GROUP | all_team_groups(),
    ))
    .excluding(own_collider)
}

/// Filter for projectiles fired by `team`: walls and tanks of other teams.
pub fn projectile_filter(team: i32) -> CollisionFilter {
    let other_teams = all_team_groups() ^ team_group(team);
    CollisionFilter::new(InteractionGroups::new(
        PROJECTILE_COLLISION_GROUP,
        WALL_COLLISION_GROUP | other_teams,
    ))
}

pub fn add_obstacle(
    sim: &mut Simulation,
    center: Vector2<f64>,
    half_extents: Vector2<f64>,
) -> ColliderHandle {
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
        .translation(center)
        .collision_groups(wall_interaction_groups())
        .build();
    let handle = sim.colliders.insert(collider);
    sim.query_pipeline.update(&sim.bodies, &sim.colliders);
    handle
}

pub fn add_walls(sim: &mut Simulation) {
    let world_size = sim.world_size();
    let edge_width = 1.0;
    let half_length = world_size / 2.0 + edge_width;
    let offset = (world_size + edge_width) / 2.0;
    add_obstacle(
        sim,
        vector![0.0, offset],
        vector![half_length, edge_width / 2.0],
    );
    add_obstacle(
        sim,
        vector![0.0, -offset],
        vector![half_length, edge_width / 2.0],
    );
    add_obstacle(
        sim,
        vector![offset, 0.0],
        vector![edge_width / 2.0, half_length],
    );
    add_obstacle(
        sim,
        vector![-offset, 0.0],
        vector![edge_width / 2.0, half_length],
    );
}
