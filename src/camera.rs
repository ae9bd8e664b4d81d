use crate::catalog::Catalog;
use crate::visual::plugin::SkyCatalog;
use bevy::prelude::*;

/// Vertical field of view, wide enough for neighbouring constellations
const FOV_DEGREES: f32 = 80.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Direction the camera faces: the mean of the constellation centres
pub fn sky_focus(catalog: &Catalog) -> Vec3 {
    catalog
        .items()
        .iter()
        .map(|item| item.world_pos().normalize_or_zero())
        .sum::<Vec3>()
        .normalize_or(Vec3::X)
}

/// Perspective camera at the centre of the sky sphere
///
/// Coordinate System (right-handed, Y-up):
/// ```text
///        Y (celestial pole)
///        ↑
///        |
///   ----+---→ X (ra = 0h)
///       /
///      ↙ Z (ra = 6h)
/// ```
///
/// The camera faces the catalog's constellations with +Y kept up on screen
fn setup_camera(mut commands: Commands, sky: Res<SkyCatalog>) {
    let focus = sky_focus(&sky.0);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 0.0).looking_at(focus, Vec3::Y),
        MainCamera,
    ));

    info!("📷 Camera aimed at {:.2?}", focus);
}
