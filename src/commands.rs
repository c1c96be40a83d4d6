//! Discrete controls: the command set, its keyboard table and the
//! transitions each command applies to the simulation state.

use std::collections::HashSet;

use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    PauseResume,
    CycleSpeed,
    ToggleAttraction,
    ToggleGravity,
    CycleCount,
    NavigateContribute,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::PauseResume,
        Command::CycleSpeed,
        Command::ToggleAttraction,
        Command::ToggleGravity,
        Command::CycleCount,
        Command::NavigateContribute,
    ];

    /// Keyboard shortcut for the command.
    pub fn key(self) -> char {
        match self {
            Command::PauseResume => 'p',
            Command::CycleSpeed => 's',
            Command::ToggleAttraction => 'a',
            Command::ToggleGravity => 'g',
            Command::CycleCount => 'b',
            Command::NavigateContribute => 'c',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|command| command.key() == key)
    }
}

/// Side effects a command asks of the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostAction {
    StopTicks,
    ResumeTicks,
    SetCursorVisible(bool),
    Navigate(String),
}

/// Suppresses key auto-repeat: a key fires once on its down-edge and not
/// again until it has been released.
#[derive(Debug, Default)]
pub struct KeyRepeatGuard {
    pressed: HashSet<char>,
}

impl KeyRepeatGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        if !self.pressed.insert(key) {
            return None;
        }
        Command::from_key(key)
    }

    pub fn release(&mut self, key: char) {
        self.pressed.remove(&key.to_ascii_lowercase());
    }

    pub fn is_down(&self, key: char) -> bool {
        self.pressed.contains(&key.to_ascii_lowercase())
    }
}

impl SimulationState {
    pub fn apply(&mut self, command: Command) -> Option<HostAction> {
        match command {
            Command::PauseResume => {
                self.paused = !self.paused;
                log::info!("simulation {}", if self.paused { "paused" } else { "resumed" });
                Some(if self.paused {
                    HostAction::StopTicks
                } else {
                    HostAction::ResumeTicks
                })
            }
            Command::CycleSpeed => {
                let speed = self.cycle_speed();
                log::info!("speed multiplier set to {speed}x");
                None
            }
            Command::ToggleAttraction => {
                self.attraction.enabled = !self.attraction.enabled;
                log::info!("pointer attraction {}", on_off(self.attraction.enabled));
                Some(HostAction::SetCursorVisible(!self.attraction.enabled))
            }
            Command::ToggleGravity => {
                self.gravity.enabled = !self.gravity.enabled;
                log::info!("gravity {}", on_off(self.gravity.enabled));
                None
            }
            Command::CycleCount => {
                let count = self.cycle_count();
                log::info!("target particle count set to {count}");
                None
            }
            Command::NavigateContribute => Some(HostAction::Navigate(self.contribute_url.clone())),
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use cgmath::vec2;

    fn state() -> SimulationState {
        SimulationState::from_config(&FieldConfig::default(), vec2(640.0, 480.0))
    }

    #[test]
    fn key_table() {
        assert_eq!(Command::from_key('p'), Some(Command::PauseResume));
        assert_eq!(Command::from_key('S'), Some(Command::CycleSpeed));
        assert_eq!(Command::from_key('a'), Some(Command::ToggleAttraction));
        assert_eq!(Command::from_key('g'), Some(Command::ToggleGravity));
        assert_eq!(Command::from_key('b'), Some(Command::CycleCount));
        assert_eq!(Command::from_key('c'), Some(Command::NavigateContribute));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn held_key_fires_once() {
        let mut guard = KeyRepeatGuard::new();
        let fired = (0..25).filter_map(|_| guard.press('g')).count();
        assert_eq!(fired, 1);
        assert!(guard.is_down('g'));
    }

    #[test]
    fn release_rearms_key() {
        let mut guard = KeyRepeatGuard::new();
        assert_eq!(guard.press('p'), Some(Command::PauseResume));
        assert_eq!(guard.press('p'), None);
        guard.release('P');
        assert!(!guard.is_down('p'));
        assert_eq!(guard.press('p'), Some(Command::PauseResume));
    }

    #[test]
    fn unbound_keys_are_still_tracked() {
        let mut guard = KeyRepeatGuard::new();
        assert_eq!(guard.press('z'), None);
        assert!(guard.is_down('z'));
    }

    #[test]
    fn pause_toggles_scheduling() {
        let mut state = state();
        assert_eq!(state.apply(Command::PauseResume), Some(HostAction::StopTicks));
        assert!(state.paused);
        assert_eq!(state.apply(Command::PauseResume), Some(HostAction::ResumeTicks));
        assert!(!state.paused);
    }

    #[test]
    fn attraction_hides_cursor() {
        let mut state = state();
        assert_eq!(
            state.apply(Command::ToggleAttraction),
            Some(HostAction::SetCursorVisible(false))
        );
        assert!(state.attraction.enabled);
        assert_eq!(
            state.apply(Command::ToggleAttraction),
            Some(HostAction::SetCursorVisible(true))
        );
    }

    #[test]
    fn gravity_toggle_has_no_host_effect() {
        let mut state = state();
        assert_eq!(state.apply(Command::ToggleGravity), None);
        assert!(state.gravity.enabled);
    }

    #[test]
    fn navigate_leaves_state_untouched() {
        let mut state = state();
        let before = state.clone();
        let action = state.apply(Command::NavigateContribute);
        assert_eq!(action, Some(HostAction::Navigate(before.contribute_url.clone())));
        assert_eq!(state, before);
    }
}
