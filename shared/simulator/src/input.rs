use nalgebra::{point, vector, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Player commands for one step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Horizontal and vertical movement axes, each in [-1, 1].
    pub axes: Vector2<f64>,
    /// World-space point the turret should face.
    pub aim_point: Point2<f64>,
    pub fire: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Default::default()
    }

    pub fn clamped_axes(&self) -> Vector2<f64> {
        let clamp = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        vector![clamp(self.axes.x), clamp(self.axes.y)]
    }
}

/// Orthographic camera mapping screen pixels (origin top-left, y down) to
/// world coordinates (y up).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Point2<f64>,
    pub pixels_per_unit: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn screen_to_world(&self, screen: Point2<f64>) -> Point2<f64> {
        let dx = (screen.x - self.width / 2.0) / self.pixels_per_unit;
        let dy = (self.height / 2.0 - screen.y) / self.pixels_per_unit;
        point![self.center.x + dx, self.center.y + dy]
    }

    pub fn world_to_screen(&self, world: Point2<f64>) -> Point2<f64> {
        point![
            (world.x - self.center.x) * self.pixels_per_unit + self.width / 2.0,
            self.height / 2.0 - (world.y - self.center.y) * self.pixels_per_unit
        ]
    }
}
