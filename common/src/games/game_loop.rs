use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Start,
    Pause,
    Resume,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: Phase,
    pub action: LoopAction,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot {:?} while {}", self.action, self.from)
    }
}

impl std::error::Error for TransitionError {}

/// Lifecycle shared by every game session:
/// `Idle -> Running <-> Paused`, `Running -> Ended`, and `reset` back to `Idle`.
///
/// The generation changes on every `start` and `reset`; anything scheduled
/// against an older generation is stale.
#[derive(Debug, Clone)]
pub struct GameLoop {
    phase: Phase,
    generation: u64,
    ticks: u64,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticks counted while running since the last `start`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self) -> Result<u64, TransitionError> {
        match self.phase {
            Phase::Idle | Phase::Ended => {
                self.phase = Phase::Running;
                self.generation += 1;
                self.ticks = 0;
                Ok(self.generation)
            }
            from => Err(TransitionError { from, action: LoopAction::Start }),
        }
    }

    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.transition(Phase::Running, Phase::Paused, LoopAction::Pause)
    }

    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.transition(Phase::Paused, Phase::Running, LoopAction::Resume)
    }

    /// Succeeds only once per game, so end-of-game effects hang off its `Ok`.
    pub fn finish(&mut self) -> Result<(), TransitionError> {
        self.transition(Phase::Running, Phase::Ended, LoopAction::Finish)
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.generation += 1;
        self.ticks = 0;
    }

    /// Returns `false` without side effects unless running.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.ticks += 1;
        true
    }

    fn transition(&mut self, from: Phase, to: Phase, action: LoopAction) -> Result<(), TransitionError> {
        if self.phase != from {
            return Err(TransitionError { from: self.phase, action });
        }
        self.phase = to;
        Ok(())
    }
}

/// An action deferred by a number of running ticks, e.g. a bot reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled<T> {
    generation: u64,
    due_tick: u64,
    action: T,
}

impl<T> Scheduled<T> {
    pub fn new(game_loop: &GameLoop, delay_ticks: u64, action: T) -> Self {
        Self {
            generation: game_loop.generation(),
            due_tick: game_loop.ticks() + delay_ticks,
            action,
        }
    }

    pub fn is_stale(&self, game_loop: &GameLoop) -> bool {
        self.generation != game_loop.generation()
    }

    pub fn is_due(&self, game_loop: &GameLoop) -> bool {
        game_loop.is_running() && !self.is_stale(game_loop) && game_loop.ticks() >= self.due_tick
    }

    pub fn action(&self) -> &T {
        &self.action
    }

    pub fn into_action(self) -> T {
        self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loop_is_idle() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.phase(), Phase::Idle);
        assert_eq!(game_loop.generation(), 0);
    }

    #[test]
    fn test_start_pause_resume_finish() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.start(), Ok(1));
        assert!(game_loop.pause().is_ok());
        assert_eq!(game_loop.phase(), Phase::Paused);
        assert!(game_loop.resume().is_ok());
        assert!(game_loop.finish().is_ok());
        assert_eq!(game_loop.phase(), Phase::Ended);
    }

    #[test]
    fn test_finish_succeeds_only_once() {
        let mut game_loop = GameLoop::new();
        game_loop.start().unwrap();
        assert!(game_loop.finish().is_ok());
        assert_eq!(
            game_loop.finish(),
            Err(TransitionError { from: Phase::Ended, action: LoopAction::Finish })
        );
    }

    #[test]
    fn test_invalid_transitions_change_nothing() {
        let mut game_loop = GameLoop::new();
        assert!(game_loop.pause().is_err());
        assert!(game_loop.resume().is_err());
        assert!(game_loop.finish().is_err());
        assert_eq!(game_loop.phase(), Phase::Idle);

        game_loop.start().unwrap();
        assert!(game_loop.start().is_err());
        assert!(game_loop.resume().is_err());
        assert_eq!(game_loop.phase(), Phase::Running);

        game_loop.pause().unwrap();
        assert!(game_loop.start().is_err());
        assert!(game_loop.finish().is_err());
        assert_eq!(game_loop.phase(), Phase::Paused);
    }

    #[test]
    fn test_start_from_ended_begins_new_generation() {
        let mut game_loop = GameLoop::new();
        game_loop.start().unwrap();
        game_loop.finish().unwrap();
        assert_eq!(game_loop.start(), Ok(2));
        assert_eq!(game_loop.phase(), Phase::Running);
    }

    #[test]
    fn test_reset_from_any_phase_returns_to_idle() {
        let mut game_loop = GameLoop::new();
        game_loop.reset();
        assert_eq!(game_loop.phase(), Phase::Idle);

        game_loop.start().unwrap();
        game_loop.pause().unwrap();
        game_loop.reset();
        assert_eq!(game_loop.phase(), Phase::Idle);

        game_loop.start().unwrap();
        game_loop.finish().unwrap();
        game_loop.reset();
        assert_eq!(game_loop.phase(), Phase::Idle);
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let mut game_loop = GameLoop::new();
        assert!(!game_loop.tick());

        game_loop.start().unwrap();
        assert!(game_loop.tick());
        assert!(game_loop.tick());
        assert_eq!(game_loop.ticks(), 2);

        game_loop.pause().unwrap();
        assert!(!game_loop.tick());
        assert_eq!(game_loop.ticks(), 2);
    }

    #[test]
    fn test_scheduled_action_becomes_due_after_delay() {
        let mut game_loop = GameLoop::new();
        game_loop.start().unwrap();
        let scheduled = Scheduled::new(&game_loop, 2, "bot");

        game_loop.tick();
        assert!(!scheduled.is_due(&game_loop));
        game_loop.tick();
        assert!(scheduled.is_due(&game_loop));
        assert_eq!(*scheduled.action(), "bot");
    }

    #[test]
    fn test_scheduled_action_is_not_due_while_paused() {
        let mut game_loop = GameLoop::new();
        game_loop.start().unwrap();
        let scheduled = Scheduled::new(&game_loop, 0, ());
        assert!(scheduled.is_due(&game_loop));

        game_loop.pause().unwrap();
        assert!(!scheduled.is_due(&game_loop));
    }

    #[test]
    fn test_reset_makes_scheduled_action_stale() {
        let mut game_loop = GameLoop::new();
        game_loop.start().unwrap();
        let scheduled = Scheduled::new(&game_loop, 0, ());

        game_loop.reset();
        game_loop.start().unwrap();
        assert!(scheduled.is_stale(&game_loop));
        assert!(!scheduled.is_due(&game_loop));
    }
}
