use crate::visual::plugin::{ConstellationWave, WaveAction, WaveRequest, apply_wave_requests};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;

/// Digit keys, three per constellation: open, close, toggle
const CONSTELLATION_KEYS: [[KeyCode; 3]; 3] = [
    [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3],
    [KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6],
    [KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9],
];

const ACTIONS: [WaveAction; 3] = [WaveAction::Open, WaveAction::Close, WaveAction::Toggle];

/// Keyboard and pointer bindings for the waves
///
/// `1`/`2`/`3` open, close and toggle the first constellation, `4`/`5`/`6`
/// the second, `7`/`8`/`9` the third. `Space`, a left click or a tap
/// toggles every constellation.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_requests, pointer_requests).before(apply_wave_requests),
        );
    }
}

/// Requests for the keys pressed this frame, given which keys went down
pub fn requests_for_keys(just_pressed: impl Fn(KeyCode) -> bool) -> Vec<WaveRequest> {
    let mut requests = Vec::new();
    for (constellation, keys) in CONSTELLATION_KEYS.iter().enumerate() {
        for (key, action) in keys.iter().zip(ACTIONS) {
            if just_pressed(*key) {
                requests.push(WaveRequest::new(constellation, action));
            }
        }
    }
    requests
}

fn keyboard_requests(
    keys: Res<ButtonInput<KeyCode>>,
    waves: Query<&ConstellationWave>,
    mut out: MessageWriter<WaveRequest>,
) {
    for request in requests_for_keys(|key| keys.just_pressed(key)) {
        out.write(request);
    }

    if keys.just_pressed(KeyCode::Space) {
        toggle_all(&waves, &mut out);
    }
}

fn pointer_requests(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut touch_events: MessageReader<TouchInput>,
    waves: Query<&ConstellationWave>,
    mut out: MessageWriter<WaveRequest>,
) {
    let clicked = mouse_buttons.just_pressed(MouseButton::Left);
    // One toggle per touch, however many fingers land this frame
    let tapped = touch_events.read().any(|ev| ev.phase == TouchPhase::Started);

    if clicked || tapped {
        toggle_all(&waves, &mut out);
    }
}

fn toggle_all(waves: &Query<&ConstellationWave>, out: &mut MessageWriter<WaveRequest>) {
    for wave in waves {
        out.write(WaveRequest::new(wave.index(), WaveAction::Toggle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let requests = requests_for_keys(|key| key == KeyCode::Digit1);
        assert_eq!(requests, vec![WaveRequest::new(0, WaveAction::Open)]);

        let requests = requests_for_keys(|key| matches!(key, KeyCode::Digit5 | KeyCode::Digit9));
        assert_eq!(
            requests,
            vec![
                WaveRequest::new(1, WaveAction::Close),
                WaveRequest::new(2, WaveAction::Toggle),
            ]
        );

        assert!(requests_for_keys(|key| key == KeyCode::Space).is_empty());
    }
}
