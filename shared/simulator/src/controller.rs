//! Axis-separated swept movement for box-shaped actors.
//!
//! [`AxisSweepController`] takes the displacement an actor wants to make this
//! tick and shortens it so the actor does not pass through scene geometry.
//! Each axis is resolved independently by casting a fan of parallel rays from
//! the leading edge of the actor's padded bounding box. The horizontal axis is
//! resolved first, and the vertical rays are shifted by the already-resolved
//! horizontal displacement so diagonal moves cannot clip past a corner.

use crate::collision::{CollisionFilter, RayCaster};
use nalgebra::{point, vector, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Multiple of the skin width removed from each axis of the bounding box, and
/// added to every ray length.
pub const SKIN_FACTOR: f64 = 4.0;

pub const MIN_RAY_COUNT: usize = 2;

pub const DEFAULT_SKIN_WIDTH: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub mins: Point2<f64>,
    pub maxs: Point2<f64>,
}

impl BoundingBox {
    pub fn new(mins: Point2<f64>, maxs: Point2<f64>) -> Self {
        BoundingBox { mins, maxs }
    }

    pub fn from_center(center: Point2<f64>, half_extents: Vector2<f64>) -> Self {
        BoundingBox {
            mins: center - half_extents,
            maxs: center + half_extents,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    pub fn size(&self) -> Vector2<f64> {
        self.maxs - self.mins
    }

    /// Reduces the size on each axis by `amount`, split evenly between both
    /// sides. An axis smaller than `amount` collapses onto the center.
    pub fn shrink(&self, amount: f64) -> BoundingBox {
        let size = self.size();
        let inset = vector![
            (amount / 2.0).min(size.x / 2.0),
            (amount / 2.0).min(size.y / 2.0)
        ];
        BoundingBox {
            mins: self.mins + inset,
            maxs: self.maxs - inset,
        }
    }

    pub fn translated(&self, delta: Vector2<f64>) -> BoundingBox {
        BoundingBox {
            mins: self.mins + delta,
            maxs: self.maxs + delta,
        }
    }
}

/// Something the controller can measure and move.
pub trait Body {
    fn bounds(&self) -> BoundingBox;
    fn translate(&mut self, delta: Vector2<f64>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Point2<f64>,
    pub top_right: Point2<f64>,
    pub bottom_left: Point2<f64>,
    pub bottom_right: Point2<f64>,
}

impl RaycastOrigins {
    fn from_bounds(bounds: &BoundingBox) -> Self {
        RaycastOrigins {
            top_left: point![bounds.mins.x, bounds.maxs.y],
            top_right: bounds.maxs,
            bottom_left: bounds.mins,
            bottom_right: point![bounds.maxs.x, bounds.mins.y],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaySpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Contacts found during the most recent move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionState {
    pub fn reset(&mut self) {
        *self = CollisionState::default();
    }

    pub fn any(&self) -> bool {
        self.above || self.below || self.left || self.right
    }
}

/// A ray issued during the last move, kept for debug drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastRay {
    pub origin: Point2<f64>,
    pub direction: Vector2<f64>,
    pub length: f64,
    pub hit: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct ControllerConfig {
    pub filter: CollisionFilter,
    pub horizontal_ray_count: i32,
    pub vertical_ray_count: i32,
    pub skin_width: f64,
}

impl ControllerConfig {
    pub fn new(filter: CollisionFilter) -> Self {
        ControllerConfig {
            filter,
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            skin_width: DEFAULT_SKIN_WIDTH,
        }
    }
}

fn clamp_ray_count(count: i32) -> usize {
    count.max(MIN_RAY_COUNT as i32) as usize
}

#[derive(Clone, Debug)]
pub struct AxisSweepController {
    filter: CollisionFilter,
    horizontal_ray_count: usize,
    vertical_ray_count: usize,
    skin_width: f64,
    spacing: RaySpacing,
    origins: RaycastOrigins,
    collisions: CollisionState,
    rays: Vec<CastRay>,
}

impl AxisSweepController {
    pub fn new(config: ControllerConfig, bounds: BoundingBox) -> Self {
        let skin_width = if config.skin_width.is_finite() && config.skin_width > 0.0 {
            config.skin_width
        } else {
            log::warn!(
                "Invalid skin width {}, using {}",
                config.skin_width,
                DEFAULT_SKIN_WIDTH
            );
            DEFAULT_SKIN_WIDTH
        };
        let mut controller = AxisSweepController {
            filter: config.filter,
            horizontal_ray_count: clamp_ray_count(config.horizontal_ray_count),
            vertical_ray_count: clamp_ray_count(config.vertical_ray_count),
            skin_width,
            spacing: RaySpacing::default(),
            origins: RaycastOrigins::default(),
            collisions: CollisionState::default(),
            rays: Vec::new(),
        };
        controller.calculate_ray_spacing(&bounds);
        controller.update_raycast_origins(&bounds);
        controller
    }

    pub fn horizontal_ray_count(&self) -> usize {
        self.horizontal_ray_count
    }

    pub fn vertical_ray_count(&self) -> usize {
        self.vertical_ray_count
    }

    pub fn skin_width(&self) -> f64 {
        self.skin_width
    }

    /// Inward padding of the ray origins and extra length of every ray.
    pub fn padding(&self) -> f64 {
        self.skin_width * SKIN_FACTOR
    }

    pub fn filter(&self) -> &CollisionFilter {
        &self.filter
    }

    pub fn spacing(&self) -> RaySpacing {
        self.spacing
    }

    pub fn origins(&self) -> RaycastOrigins {
        self.origins
    }

    pub fn collisions(&self) -> CollisionState {
        self.collisions
    }

    pub fn rays(&self) -> &[CastRay] {
        &self.rays
    }

    /// Only needed if the actor's collider changes size.
    pub fn calculate_ray_spacing(&mut self, bounds: &BoundingBox) {
        let size = bounds.shrink(self.padding()).size();
        self.spacing = RaySpacing {
            horizontal: size.x / (self.horizontal_ray_count - 1) as f64,
            vertical: size.y / (self.vertical_ray_count - 1) as f64,
        };
    }

    fn update_raycast_origins(&mut self, bounds: &BoundingBox) {
        self.origins = RaycastOrigins::from_bounds(&bounds.shrink(self.padding()));
    }

    /// Moves `body` by `displacement`, shortened so it stops before any
    /// geometry selected by the filter. Returns the applied displacement.
    pub fn move_body<B, R>(
        &mut self,
        body: &mut B,
        caster: &R,
        displacement: Vector2<f64>,
    ) -> Vector2<f64>
    where
        B: Body + ?Sized,
        R: RayCaster + ?Sized,
    {
        let resolved = self.resolve(&body.bounds(), caster, displacement);
        body.translate(resolved);
        resolved
    }

    /// Computes the collision-safe displacement for an actor currently
    /// occupying `bounds` without moving anything.
    pub fn resolve<R>(
        &mut self,
        bounds: &BoundingBox,
        caster: &R,
        displacement: Vector2<f64>,
    ) -> Vector2<f64>
    where
        R: RayCaster + ?Sized,
    {
        self.update_raycast_origins(bounds);
        self.collisions.reset();
        self.rays.clear();

        let mut velocity = displacement;
        if velocity.x != 0.0 {
            self.horizontal_sweep(caster, &mut velocity);
        }
        if velocity.y != 0.0 {
            self.vertical_sweep(caster, &mut velocity);
        }
        velocity
    }

    fn horizontal_sweep<R: RayCaster + ?Sized>(&mut self, caster: &R, velocity: &mut Vector2<f64>) {
        let direction = velocity.x.signum();
        let padding = self.padding();
        let mut ray_length = velocity.x.abs() + padding;
        let ray_direction = vector![direction, 0.0];
        let start = if direction < 0.0 {
            self.origins.top_left
        } else {
            self.origins.top_right
        };

        for i in 0..self.vertical_ray_count {
            let origin = start - vector![0.0, self.spacing.vertical * i as f64];
            let hit = caster.cast(origin, ray_direction, ray_length, &self.filter);
            self.rays.push(CastRay {
                origin,
                direction: ray_direction,
                length: ray_length,
                hit: hit.is_some(),
            });

            if let Some(hit) = hit {
                // Never push the actor backwards out of an overlap.
                velocity.x = (hit.distance - padding).max(0.0) * direction;
                ray_length = hit.distance;
                if direction < 0.0 {
                    self.collisions.left = true;
                } else {
                    self.collisions.right = true;
                }
            }
        }
    }

    fn vertical_sweep<R: RayCaster + ?Sized>(&mut self, caster: &R, velocity: &mut Vector2<f64>) {
        let direction = velocity.y.signum();
        let padding = self.padding();
        let mut ray_length = velocity.y.abs() + padding;
        let ray_direction = vector![0.0, direction];
        let start = if direction < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.top_left
        };

        for i in 0..self.horizontal_ray_count {
            let origin = start + vector![self.spacing.horizontal * i as f64 + velocity.x, 0.0];
            let hit = caster.cast(origin, ray_direction, ray_length, &self.filter);
            self.rays.push(CastRay {
                origin,
                direction: ray_direction,
                length: ray_length,
                hit: hit.is_some(),
            });

            if let Some(hit) = hit {
                velocity.y = (hit.distance - padding).max(0.0) * direction;
                ray_length = hit.distance;
                if direction < 0.0 {
                    self.collisions.below = true;
                } else {
                    self.collisions.above = true;
                }
            }
        }
    }
}
