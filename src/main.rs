use bevy::prelude::*;
use bevy::window::WindowResolution;

use constellation_wave::camera::CameraPlugin;
use constellation_wave::catalog::Catalog;
use constellation_wave::input::InputPlugin;
use constellation_wave::visual::{
    ConstellationGizmosPlugin, SkyCatalog, WaveAction, WavePlugin, WaveRequest,
};

fn main() {
    let catalog = Catalog::bundled().expect("bundled catalog should be valid");
    let open_on_start = catalog.open_on_start;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Constellation Wave".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(SkyCatalog(catalog))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(WavePlugin)
    .add_plugins(ConstellationGizmosPlugin);

    if open_on_start {
        app.add_systems(Startup, open_on_start_system);
    }

    app.run();
}

fn open_on_start_system(sky: Res<SkyCatalog>, mut out: MessageWriter<WaveRequest>) {
    for index in 0..sky.0.items().len() {
        out.write(WaveRequest::new(index, WaveAction::Open));
    }
}
