//! GameSession - drives an engine from a wall clock

use std::time::Duration;

use crate::core::config::EngineConfig;
use crate::simulation::engine::SimulationEngine;
use crate::simulation::report::TurnReport;
use crate::simulation::timer::LogicTimer;

#[derive(Debug)]
pub struct GameSession {
    engine: SimulationEngine,
    timer: LogicTimer,
}

impl GameSession {
    /// Build and initialize an engine from `config`
    pub fn start(config: EngineConfig) -> Self {
        let timer = LogicTimer::from_millis(config.session.tick_interval_ms);
        let mut engine = SimulationEngine::new(config);
        engine.initialize();
        Self { engine, timer }
    }

    /// Wrap an already prepared engine
    pub fn with_engine(engine: SimulationEngine, timer: LogicTimer) -> Self {
        Self { engine, timer }
    }

    /// Advance the engine once per step the timer says is due.
    ///
    /// Returns the reports of the turns that ran, oldest first.
    pub fn update(&mut self, elapsed: Duration) -> Vec<TurnReport> {
        let due = self.timer.update(elapsed);
        (0..due).map(|_| self.engine.advance().clone()).collect()
    }

    pub fn pause(&mut self) {
        tracing::info!("Session paused at turn {}", self.engine.current_turn());
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        tracing::info!("Session resumed at turn {}", self.engine.current_turn());
        self.timer.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    /// Tear down the world and hand back the engine
    pub fn shutdown(mut self) -> SimulationEngine {
        self.engine.dispose();
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.session.tick_interval_ms = 50;
        config.session.bot_players = 0;
        config
    }

    #[test]
    fn test_update_runs_due_turns() {
        let mut session = GameSession::start(config());

        let reports = session.update(Duration::from_millis(120));
        let turns: Vec<_> = reports.iter().map(|r| r.turn).collect();
        assert_eq!(turns, vec![1, 2]);
        assert_eq!(session.engine().current_turn(), 2);
    }

    #[test]
    fn test_paused_session_holds_turn() {
        let mut session = GameSession::start(config());
        session.pause();
        assert!(session.update(Duration::from_secs(5)).is_empty());
        assert_eq!(session.engine().current_turn(), 0);

        session.resume();
        assert_eq!(session.update(Duration::from_millis(50)).len(), 1);
    }

    #[test]
    fn test_shutdown_disposes_engine() {
        let session = GameSession::start(config());
        let engine = session.shutdown();
        assert!(engine.players().is_empty());
        assert!(engine.cities().is_empty());
    }
}
