use crate::simulation::Simulation;
use crate::tank::TankHandle;
use nalgebra::{vector, Point2, Vector4};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Line {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: Vector4<f32>,
}

/// Draws the rays from the tank's most recent controller sweep.
pub fn emit_sweep_rays(sim: &mut Simulation, handle: TankHandle) {
    let lines: Vec<Line> = match sim.tank(handle).controller() {
        Some(controller) => controller
            .rays()
            .iter()
            .map(|ray| Line {
                a: ray.origin,
                b: ray.origin + ray.direction * ray.length,
                color: if ray.hit {
                    vector![1.0, 0.0, 0.0, 1.0]
                } else {
                    vector![0.0, 1.0, 0.2, 1.0]
                },
            })
            .collect(),
        None => return,
    };
    if !lines.is_empty() {
        sim.emit_debug_lines(handle, lines);
    }
}

pub fn convert_color(c: u32) -> Vector4<f32> {
    let extract_color = |k: i64| -> f32 { ((c >> (k * 8)) & 0xff) as f32 / 255.0 };
    vector![extract_color(2), extract_color(1), extract_color(0), 1.0]
}
