use crate::catalog::StarData;
use crate::visual::plugin::{ConstellationWave, drive_waves};
use bevy::color::Srgba;
use bevy::prelude::*;

const STAR_RADIUS: f32 = 0.6;
const LINE_COLOR: Color = Color::srgb(0.55, 0.7, 1.0);

/// Draws every constellation's stars as gizmo spheres and each edge from its start to its tip
pub struct ConstellationGizmosPlugin;

impl Plugin for ConstellationGizmosPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_constellations.after(drive_waves));
    }
}

fn draw_constellations(waves: Query<&ConstellationWave>, mut gizmos: Gizmos) {
    for wave in &waves {
        let scheduler = wave.scheduler();

        for node in scheduler.graph().nodes() {
            let (radius, color) = match wave.star(node.id()) {
                Some(star) => (STAR_RADIUS * star.magnitude.max(0.1), star_color(star)),
                None => (STAR_RADIUS, Color::WHITE),
            };
            gizmos.sphere(Isometry3d::from_translation(node.position()), radius, color);
        }

        // Retracted lines are hidden; an interrupted one keeps drawing to its frozen tip
        for line in scheduler.lines() {
            if line.progress() > 0.0 {
                gizmos.line(line.start(), line.tip(), LINE_COLOR);
            }
        }
    }
}

/// Parse a star's hex colour, falling back to white
pub fn star_color(star: &StarData) -> Color {
    match Srgba::hex(&star.color) {
        Ok(color) => Color::Srgba(color),
        Err(err) => {
            warn!("Star {} has bad colour {:?}: {:?}", star.id, star.color, err);
            Color::WHITE
        }
    }
}
