use crate::ship::ShipHandle;
use crate::simulation::Simulation;
use nalgebra::{vector, Point2, Rotation2, Vector4};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Radius of the marker drawn around the pointer.
pub const POINTER_MARKER_RADIUS: f64 = 0.2;
const POINTER_MARKER_SEGMENTS: usize = 12;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Line {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: Vector4<f32>,
}

pub fn emit_ship(sim: &mut Simulation, handle: ShipHandle) {
    let ship = sim.ship(handle);
    if !ship.exists() {
        return;
    }
    let controller = ship.controller();
    let p: Point2<f64> = ship.position().into();
    let mut lines = Vec::with_capacity(4 + POINTER_MARKER_SEGMENTS);
    lines.push(Line {
        a: p,
        b: p + ship.velocity(),
        color: vector![0.0, 0.81, 1.0, 1.0],
    });
    lines.push(Line {
        a: p,
        b: p + controller.forward() * 2.0,
        color: vector![1.0, 0.2, 0.0, 1.0],
    });
    if controller.force() != vector![0.0, 0.0] {
        lines.push(Line {
            a: p,
            b: p + controller.force() / controller.config().thrust_force.max(1e-9),
            color: vector![0.0, 1.0, 0.2, 1.0],
        });
    }
    if controller.is_dashing() {
        let dash = controller.dash_state();
        let start: Point2<f64> = dash.start_position.into();
        lines.push(Line {
            a: start,
            b: start + dash.dash_vector,
            color: vector![1.0, 0.0, 1.0, 1.0],
        });
    }
    if let Some(pointer) = ship.input().pointer {
        let pointer: Point2<f64> = pointer.into();
        lines.push(Line {
            a: p,
            b: pointer,
            color: vector![1.0, 1.0, 1.0, 0.5],
        });
        lines.extend(circle(pointer, POINTER_MARKER_RADIUS, POINTER_MARKER_SEGMENTS));
    }
    sim.emit_debug_lines(handle, lines);
}

fn circle(center: Point2<f64>, radius: f64, segments: usize) -> Vec<Line> {
    let color = vector![1.0, 1.0, 1.0, 0.5];
    let point = |i: usize| center + Rotation2::new(TAU * i as f64 / segments as f64) * vector![radius, 0.0];
    (0..segments)
        .map(|i| Line {
            a: point(i),
            b: point(i + 1),
            color,
        })
        .collect()
}
