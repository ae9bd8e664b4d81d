use crate::catalog::{Catalog, ConstellationData, StarData};
use crate::error::WaveError;
use crate::graph::NodeId;
use crate::wave::{WaveConfig, WaveEvent, WaveScheduler, WaveState};
use bevy::prelude::*;

/// The catalog the sky is built from
#[derive(Resource, Debug, Clone)]
pub struct SkyCatalog(pub Catalog);

/// One constellation and the scheduler that drives it
///
/// `index` is the constellation's position in the catalog; requests and
/// notices address constellations by it.
#[derive(Component, Debug)]
pub struct ConstellationWave {
    index: usize,
    data: ConstellationData,
    scheduler: WaveScheduler,
}

impl ConstellationWave {
    pub fn from_catalog(
        index: usize,
        data: &ConstellationData,
        config: WaveConfig,
    ) -> Result<Self, WaveError> {
        let graph = data.to_graph()?;
        let root = data.root(&graph);
        let scheduler = WaveScheduler::new(graph, root, config)?;

        Ok(Self {
            index,
            data: data.clone(),
            scheduler,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn star(&self, id: NodeId) -> Option<&StarData> {
        self.data.star(id)
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn state(&self) -> WaveState {
        self.scheduler.state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveAction {
    Open,
    Close,
    Toggle,
}

/// Ask one constellation to reveal, hide, or flip
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveRequest {
    pub constellation: usize,
    pub action: WaveAction,
}

impl WaveRequest {
    pub fn new(constellation: usize, action: WaveAction) -> Self {
        Self {
            constellation,
            action,
        }
    }
}

/// Scheduler events re-broadcast for other systems
#[derive(Message, Debug, Clone, PartialEq)]
pub struct WaveNotice {
    pub constellation: usize,
    pub event: WaveEvent,
}

pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WaveRequest>()
            .add_message::<WaveNotice>()
            .add_systems(Startup, spawn_constellations)
            .add_systems(Update, (apply_wave_requests, drive_waves).chain());
    }
}

/// One entity per catalog item; items that fail to form a graph are skipped
pub fn spawn_constellations(mut commands: Commands, sky: Res<SkyCatalog>) {
    for (index, data) in sky.0.items().iter().enumerate() {
        match ConstellationWave::from_catalog(index, data, sky.0.wave) {
            Ok(wave) => {
                info!(
                    "✨ {} ready: {} star(s), root {}",
                    wave.name(),
                    wave.scheduler().graph().node_count(),
                    wave.scheduler().root()
                );
                commands.spawn(wave);
            }
            Err(err) => warn!("Skipping constellation {}: {}", data.name, err),
        }
    }
}

pub fn apply_wave_requests(
    mut requests: MessageReader<WaveRequest>,
    mut waves: Query<&mut ConstellationWave>,
) {
    for request in requests.read() {
        let Some(mut wave) = waves
            .iter_mut()
            .find(|wave| wave.index == request.constellation)
        else {
            warn!("No constellation at index {}", request.constellation);
            continue;
        };

        let started = match request.action {
            WaveAction::Open => wave.scheduler.open(),
            WaveAction::Close => wave.scheduler.close(),
            WaveAction::Toggle => wave.scheduler.toggle(),
        };

        if !started {
            info!("{:?} on {} ignored while {:?}", request.action, wave.name(), wave.state());
        }
    }
}

/// Step every running animation by the frame time and forward what happened
pub fn drive_waves(
    time: Res<Time>,
    mut waves: Query<&mut ConstellationWave>,
    mut notices: MessageWriter<WaveNotice>,
) {
    let dt = time.delta_secs();

    for mut wave in &mut waves {
        wave.scheduler.advance(dt);

        for event in wave.scheduler.drain_events() {
            match &event {
                WaveEvent::Opened => info!("✨ {} revealed", wave.name()),
                WaveEvent::Closed => info!("🌑 {} hidden", wave.name()),
                WaveEvent::Stalled(err) => warn!("{}: {}", wave.name(), err),
                WaveEvent::LevelStarted { .. } => {}
            }
            notices.write(WaveNotice {
                constellation: wave.index,
                event,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Seen(Vec<WaveNotice>);

    fn collect_notices(mut notices: MessageReader<WaveNotice>, mut seen: ResMut<Seen>) {
        seen.0.extend(notices.read().cloned());
    }

    fn test_app() -> App {
        let mut catalog = Catalog::bundled().unwrap();
        catalog.wave = WaveConfig::with_duration(0.2);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .insert_resource(SkyCatalog(catalog))
            .init_resource::<Seen>()
            .add_plugins(WavePlugin)
            .add_systems(Update, collect_notices.after(drive_waves));
        app.update();
        app
    }

    fn inspect<R>(app: &mut App, index: usize, f: impl FnOnce(&ConstellationWave) -> R) -> R {
        let world = app.world_mut();
        let mut query = world.query::<&ConstellationWave>();
        let wave = query
            .iter(world)
            .find(|wave| wave.index() == index)
            .unwrap();
        f(wave)
    }

    fn run_until(app: &mut App, index: usize, state: WaveState) {
        for _ in 0..400 {
            app.update();
            if inspect(app, index, ConstellationWave::state) == state {
                return;
            }
        }
        panic!("Constellation {} never reached {:?}", index, state);
    }

    fn count(app: &App, constellation: usize, event: &WaveEvent) -> usize {
        app.world()
            .resource::<Seen>()
            .0
            .iter()
            .filter(|notice| notice.constellation == constellation && notice.event == *event)
            .count()
    }

    #[test]
    fn test_spawns_one_wave_per_constellation() {
        let mut app = test_app();

        assert_eq!(inspect(&mut app, 0, |wave| wave.name().to_string()), "Ursa Major");
        assert_eq!(inspect(&mut app, 1, |wave| wave.name().to_string()), "Ursa Minor");
        assert_eq!(inspect(&mut app, 0, |wave| wave.scheduler().root()), NodeId(2));
        assert_eq!(inspect(&mut app, 1, |wave| wave.scheduler().root()), NodeId(14));
        assert!(inspect(&mut app, 1, |wave| wave.star(NodeId(14)).is_some()));
    }

    #[test]
    fn test_requests_drive_the_wave() {
        let mut app = test_app();
        assert_eq!(inspect(&mut app, 0, ConstellationWave::state), WaveState::Closed);

        app.world_mut()
            .write_message(WaveRequest::new(0, WaveAction::Open));
        run_until(&mut app, 0, WaveState::Open);

        inspect(&mut app, 0, |wave| {
            assert_eq!(wave.scheduler().claims().len(), 9);
            assert!(wave.scheduler().lines().iter().all(|line| line.is_enabled()));
        });

        app.world_mut()
            .write_message(WaveRequest::new(0, WaveAction::Toggle));
        run_until(&mut app, 0, WaveState::Closed);

        inspect(&mut app, 0, |wave| {
            assert!(wave.scheduler().claims().is_empty());
            assert!(wave.scheduler().lines().iter().all(|line| !line.is_enabled()));
        });

        assert_eq!(count(&app, 0, &WaveEvent::Opened), 1);
        assert_eq!(count(&app, 0, &WaveEvent::Closed), 1);
        let seen = &app.world().resource::<Seen>().0;
        assert!(!seen.iter().any(|notice| matches!(notice.event, WaveEvent::Stalled(_))));
    }

    #[test]
    fn test_constellations_animate_independently() {
        let mut app = test_app();

        app.world_mut()
            .write_message(WaveRequest::new(1, WaveAction::Open));
        run_until(&mut app, 1, WaveState::Open);

        assert_eq!(inspect(&mut app, 0, ConstellationWave::state), WaveState::Closed);
        assert!(inspect(&mut app, 0, |wave| wave.scheduler().claims().is_empty()));
        assert_eq!(count(&app, 1, &WaveEvent::Opened), 1);
        assert_eq!(count(&app, 0, &WaveEvent::Opened), 0);

        // Both at once: one opens while the other closes
        app.world_mut()
            .write_message(WaveRequest::new(0, WaveAction::Toggle));
        app.world_mut()
            .write_message(WaveRequest::new(1, WaveAction::Toggle));
        app.update();
        assert_eq!(inspect(&mut app, 0, ConstellationWave::state), WaveState::Opening);
        assert_eq!(inspect(&mut app, 1, ConstellationWave::state), WaveState::Closing);

        run_until(&mut app, 1, WaveState::Closed);
        run_until(&mut app, 0, WaveState::Open);
    }

    #[test]
    fn test_repeated_open_is_ignored() {
        let mut app = test_app();

        app.world_mut()
            .write_message(WaveRequest::new(0, WaveAction::Open));
        app.world_mut()
            .write_message(WaveRequest::new(0, WaveAction::Open));
        run_until(&mut app, 0, WaveState::Open);

        assert_eq!(count(&app, 0, &WaveEvent::Opened), 1);
    }

    #[test]
    fn test_unknown_index_is_ignored() {
        let mut app = test_app();

        app.world_mut()
            .write_message(WaveRequest::new(7, WaveAction::Open));
        app.update();

        assert_eq!(inspect(&mut app, 0, ConstellationWave::state), WaveState::Closed);
        assert_eq!(inspect(&mut app, 1, ConstellationWave::state), WaveState::Closed);
    }
}
