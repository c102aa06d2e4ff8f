use raylib::prelude::*;

use crate::constants::SEEK_STEP;
use crate::video::SimulatedVideo;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    SeekBy(f64),
    Restart,
    ToggleSync,
}

const BINDINGS: [(KeyboardKey, Command); 5] = [
    (KeyboardKey::KEY_SPACE, Command::TogglePlay),
    (KeyboardKey::KEY_LEFT, Command::SeekBy(-SEEK_STEP)),
    (KeyboardKey::KEY_RIGHT, Command::SeekBy(SEEK_STEP)),
    (KeyboardKey::KEY_HOME, Command::Restart),
    (KeyboardKey::KEY_D, Command::ToggleSync),
];

pub fn command_for_key(key: KeyboardKey) -> Option<Command> {
    BINDINGS.iter().find(|(k, _)| *k == key).map(|(_, command)| *command)
}

/// Commands for every bound key pressed this frame.
pub fn pressed_commands(rl: &RaylibHandle) -> Vec<Command> {
    BINDINGS
        .iter()
        .filter(|(key, _)| rl.is_key_pressed(*key))
        .map(|(_, command)| *command)
        .collect()
}

/// Applies a playback command. `ToggleSync` is not a playback command and is ignored.
pub fn apply(video: &mut SimulatedVideo, command: Command) {
    match command {
        Command::TogglePlay => video.toggle(),
        Command::SeekBy(delta) => video.seek_by(delta),
        Command::Restart => {
            video.seek(0.0);
            video.play();
        }
        Command::ToggleSync => {}
    }
}
