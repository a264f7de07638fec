//! Level/round state machine
//!
//! Commands arrive between ticks and are applied immediately. A command that
//! fails leaves the state untouched: level files are loaded and preconditions
//! checked before anything is mutated.

use super::layout;
use super::state::{GameMode, GameState};
use crate::error::{GameError, InvalidTransition};
use crate::level::LevelSource;

/// Discrete player commands (keys/buttons decoded by the embedder)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayFixed,
    PlayRandom,
    /// Go on to the next fixed level after a win
    Continue,
    Restart,
    Menu,
    Quit,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::PlayFixed => "play fixed",
            Command::PlayRandom => "play random",
            Command::Continue => "continue",
            Command::Restart => "restart",
            Command::Menu => "menu",
            Command::Quit => "quit",
        }
    }
}

/// Mode change produced by a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Won,
    Lost,
    NextRound(u32),
}

/// Apply a command, reporting why it was refused if it was
pub fn apply_command(
    state: &mut GameState,
    levels: &dyn LevelSource,
    command: Command,
) -> Result<(), GameError> {
    let result = match command {
        Command::Menu => {
            enter_menu(state);
            Ok(())
        }
        Command::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
            Ok(())
        }
        Command::PlayFixed => {
            require_menu(state, command)?;
            let first = state.tuning.first_level.clone();
            load_fixed_level(state, levels, &first)?;
            state.history.push(first);
            Ok(())
        }
        Command::PlayRandom => {
            require_menu(state, command)?;
            start_round(state, 1);
            Ok(())
        }
        Command::Continue => continue_to_next(state, levels),
        Command::Restart => restart(state, levels),
    };

    if let Err(e) = &result {
        log::warn!("{} refused: {e}", command.name());
    }
    result
}

fn require_menu(state: &GameState, command: Command) -> Result<(), GameError> {
    if state.mode == GameMode::Menu {
        Ok(())
    } else {
        Err(not_available(state, command))
    }
}

fn not_available(state: &GameState, command: Command) -> GameError {
    InvalidTransition::NotAvailable {
        mode: state.mode.clone(),
        command: command.name(),
    }
    .into()
}

fn continue_to_next(state: &mut GameState, levels: &dyn LevelSource) -> Result<(), GameError> {
    if state.mode != GameMode::Win {
        return Err(not_available(state, Command::Continue));
    }
    let next = state
        .next_level
        .clone()
        .ok_or(InvalidTransition::NoNextLevel)?;
    load_fixed_level(state, levels, &next)?;
    state.history.push(next);
    Ok(())
}

/// Replay after a win or loss. Random play can only go back to round one.
fn restart(state: &mut GameState, levels: &dyn LevelSource) -> Result<(), GameError> {
    if !matches!(state.mode, GameMode::Win | GameMode::Lose) {
        return Err(not_available(state, Command::Restart));
    }

    if state.random_mode {
        if state.round != 1 {
            return Err(InvalidTransition::CannotRestartRound { round: state.round }.into());
        }
        start_round(state, 1);
        return Ok(());
    }

    let last = state
        .history
        .last()
        .cloned()
        .ok_or(InvalidTransition::NoLevelToRestart)?;
    load_fixed_level(state, levels, &last)
}

/// Load a fixed level and start playing it. History is left to the caller.
pub fn load_fixed_level(
    state: &mut GameState,
    levels: &dyn LevelSource,
    id: &str,
) -> Result<(), GameError> {
    let level = levels.load(id)?;

    level.populate(id, state);
    state.remaining_ducks = level.ducks;
    state.next_level = level.next_level;
    state.random_mode = false;
    state.reset_duck();
    state.mode = GameMode::FixedLevel(id.to_string());

    log::info!(
        "Level {}: {} targets, {} ducks",
        id,
        state.targets.len(),
        state.remaining_ducks
    );
    Ok(())
}

/// Generate, settle and start random round `round`
pub fn start_round(state: &mut GameState, round: u32) {
    layout::populate_round(state);
    state.round = round;
    state.remaining_ducks = state.tuning.round_ducks;
    state.next_level = None;
    state.random_mode = true;
    state.reset_duck();
    state.mode = GameMode::RandomRound(round);

    log::info!("Random round {}/{}", round, state.tuning.total_rounds);
}

/// Leave whatever is in progress and return to the menu
pub fn enter_menu(state: &mut GameState) {
    state.clear_field();
    state.round = 1;
    state.history.clear();
    state.next_level = None;
    state.random_mode = false;
    state.remaining_ducks = 0;
    state.reset_duck();
    state.mode = GameMode::Menu;

    log::info!("Back to menu");
}

/// Check win/lose after a tick's collisions
pub fn evaluate_outcome(state: &mut GameState) -> Option<Transition> {
    let round = match state.mode {
        GameMode::FixedLevel(_) => None,
        GameMode::RandomRound(round) => Some(round),
        _ => return None,
    };

    if state.targets.is_empty() {
        return Some(match round {
            Some(k) if k < state.tuning.total_rounds => {
                start_round(state, k + 1);
                Transition::NextRound(k + 1)
            }
            _ => {
                if round.is_some() {
                    state.next_level = None;
                }
                state.reset_duck();
                state.mode = GameMode::Win;
                log::info!("Win (next level: {:?})", state.next_level);
                Transition::Won
            }
        });
    }

    if state.remaining_ducks == 0 && !state.duck.in_flight {
        state.reset_duck();
        state.mode = GameMode::Lose;
        log::info!("Lose: {} targets left", state.targets.len());
        return Some(Transition::Lost);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadFailureReason;
    use crate::level::{BuiltinLevels, LevelFile, MemoryLevels, TargetSpec};
    use glam::Vec2;

    fn one_target_level(next: Option<&str>) -> LevelFile {
        LevelFile {
            obstacles: Vec::new(),
            targets: vec![TargetSpec { x: 400.0, y: 150.0, w: 46.0 }],
            ducks: 3,
            next_level: next.map(str::to_string),
            breakable: None,
        }
    }

    fn levels() -> MemoryLevels {
        MemoryLevels::new()
            .with("level1", one_target_level(Some("level2")))
            .with("level2", one_target_level(None))
    }

    #[test]
    fn test_play_fixed_loads_first_level() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayFixed).unwrap();

        assert_eq!(state.mode, GameMode::FixedLevel("level1".into()));
        assert_eq!(state.remaining_ducks, 3);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.history, vec!["level1".to_string()]);
        assert_eq!(state.next_level.as_deref(), Some("level2"));
    }

    #[test]
    fn test_load_failure_leaves_state_alone() {
        let mut state = GameState::new(1);
        let err = apply_command(&mut state, &MemoryLevels::new(), Command::PlayFixed).unwrap_err();

        assert!(matches!(
            err,
            GameError::LevelLoad { reason: LoadFailureReason::Missing, .. }
        ));
        assert_eq!(state.mode, GameMode::Menu);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_play_commands_only_from_menu() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayFixed).unwrap();
        let err = apply_command(&mut state, &levels(), Command::PlayRandom).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTransition(InvalidTransition::NotAvailable { .. })
        ));
        assert_eq!(state.mode, GameMode::FixedLevel("level1".into()));
    }

    #[test]
    fn test_win_continue_and_restart() {
        let levels = levels();
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels, Command::PlayFixed).unwrap();

        state.targets.clear();
        assert_eq!(evaluate_outcome(&mut state), Some(Transition::Won));
        assert_eq!(state.mode, GameMode::Win);
        assert_eq!(state.next_level.as_deref(), Some("level2"));

        apply_command(&mut state, &levels, Command::Continue).unwrap();
        assert_eq!(state.mode, GameMode::FixedLevel("level2".into()));
        assert_eq!(state.history.len(), 2);

        state.targets.clear();
        evaluate_outcome(&mut state);
        assert_eq!(state.mode, GameMode::Win);
        let err = apply_command(&mut state, &levels, Command::Continue).unwrap_err();
        assert_eq!(err, GameError::InvalidTransition(InvalidTransition::NoNextLevel));
        assert_eq!(state.mode, GameMode::Win);

        // Restart reloads the most recent level without growing history
        apply_command(&mut state, &levels, Command::Restart).unwrap();
        assert_eq!(state.mode, GameMode::FixedLevel("level2".into()));
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.remaining_ducks, 3);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_lose_when_ducks_run_out() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayFixed).unwrap();

        state.remaining_ducks = 0;
        state.duck.in_flight = true;
        assert_eq!(evaluate_outcome(&mut state), None, "last duck still flying");

        state.duck.in_flight = false;
        assert_eq!(evaluate_outcome(&mut state), Some(Transition::Lost));
        assert_eq!(state.mode, GameMode::Lose);

        apply_command(&mut state, &levels(), Command::Restart).unwrap();
        assert_eq!(state.mode, GameMode::FixedLevel("level1".into()));
        assert_eq!(state.remaining_ducks, 3);
    }

    #[test]
    fn test_random_rounds_advance_then_win() {
        let mut state = GameState::new(11);
        apply_command(&mut state, &BuiltinLevels, Command::PlayRandom).unwrap();
        assert_eq!(state.mode, GameMode::RandomRound(1));
        assert_eq!(state.remaining_ducks, 10);
        assert_eq!(state.targets.len(), 3);

        state.targets.clear();
        state.remaining_ducks = 4;
        assert_eq!(evaluate_outcome(&mut state), Some(Transition::NextRound(2)));
        assert_eq!(state.mode, GameMode::RandomRound(2));
        assert_eq!(state.remaining_ducks, 10);
        assert_eq!(state.targets.len(), 3);

        state.targets.clear();
        assert_eq!(evaluate_outcome(&mut state), Some(Transition::NextRound(3)));
        state.targets.clear();
        assert_eq!(evaluate_outcome(&mut state), Some(Transition::Won));
        assert_eq!(state.mode, GameMode::Win);
        assert_eq!(state.next_level, None);
    }

    #[test]
    fn test_random_restart_only_in_first_round() {
        let mut state = GameState::new(11);
        apply_command(&mut state, &BuiltinLevels, Command::PlayRandom).unwrap();
        state.remaining_ducks = 0;
        evaluate_outcome(&mut state);
        assert_eq!(state.mode, GameMode::Lose);

        apply_command(&mut state, &BuiltinLevels, Command::Restart).unwrap();
        assert_eq!(state.mode, GameMode::RandomRound(1));
        assert_eq!(state.remaining_ducks, 10);

        state.targets.clear();
        evaluate_outcome(&mut state);
        state.remaining_ducks = 0;
        evaluate_outcome(&mut state);
        assert_eq!(state.mode, GameMode::Lose);
        let targets_before = state.targets.len();

        let err = apply_command(&mut state, &BuiltinLevels, Command::Restart).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTransition(InvalidTransition::CannotRestartRound { round: 2 })
        );
        assert_eq!(state.mode, GameMode::Lose);
        assert_eq!(state.round, 2);
        assert_eq!(state.targets.len(), targets_before);
    }

    #[test]
    fn test_menu_clears_everything() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayFixed).unwrap();
        state.duck.in_flight = true;
        state.duck.pos = Vec2::new(200.0, 200.0);
        state.spent.push(Vec2::new(90.0, 85.0));

        apply_command(&mut state, &levels(), Command::Menu).unwrap();
        assert_eq!(state.mode, GameMode::Menu);
        assert!(state.targets.is_empty() && state.obstacles.is_empty() && state.planks.is_empty());
        assert!(state.history.is_empty() && state.spent.is_empty());
        assert_eq!(state.round, 1);
        assert!(!state.duck.in_flight);

        let err = apply_command(&mut state, &levels(), Command::Restart).unwrap_err();
        assert!(matches!(err, GameError::InvalidTransition(_)));
    }

    #[test]
    fn test_restart_refused_while_playing() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayFixed).unwrap();
        state.targets.clear();
        state.remaining_ducks = 1;

        let err = apply_command(&mut state, &levels(), Command::Restart).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTransition(InvalidTransition::NotAvailable { command: "restart", .. })
        ));
        assert_eq!(state.mode, GameMode::FixedLevel("level1".into()));
        assert!(state.targets.is_empty());
        assert_eq!(state.remaining_ducks, 1);

        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::PlayRandom).unwrap();
        assert!(apply_command(&mut state, &levels(), Command::Restart).is_err());
        assert_eq!(state.mode, GameMode::RandomRound(1));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut state = GameState::new(1);
        apply_command(&mut state, &levels(), Command::Quit).unwrap();
        assert!(state.quit_requested);
        assert_eq!(state.mode, GameMode::Menu);
    }
}
