//! Game state and core simulation types
//!
//! Everything the frame loop and the input handlers mutate lives in one owned
//! `GameState`; both borrow it in turn, never concurrently.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::check_collision;
use super::piece::Piece;
use super::rules::{GameOverCheck, Rules};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Notable things that happened during a tick, drained by the front end
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The current piece came to rest at this distance
    Settled { distance: f32 },
    /// Completed rings were removed
    RingsCleared { rings: usize, points: u64 },
    /// A new current piece entered at the outer edge
    Spawned,
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Rule switches for this run
    pub rules: Rules,
    /// Settled pieces in placement order
    pub pieces: Vec<Piece>,
    /// Falling piece (None once the game is over)
    pub current: Option<Piece>,
    pub score: u64,
    /// Total rings cleared this run
    pub rings_cleared: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u64, rules: Rules) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            pieces: Vec::new(),
            current: None,
            score: 0,
            rings_cleared: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        };
        state.spawn_piece();
        state
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Replace the current piece with a fresh random one at the outer edge
    pub fn spawn_piece(&mut self) {
        let piece = Piece::spawn(&mut self.rng);
        log::debug!(
            "Spawned {:?} at angle {:.3}",
            piece.shape,
            piece.angle
        );
        self.current = Some(piece);
        self.events.push(GameEvent::Spawned);
    }

    /// Apply the game-over rule after `settled` came to rest and a new piece
    /// was spawned. Returns true if the game just ended.
    pub fn check_game_over(&mut self, settled: &Piece) -> bool {
        let over = match self.rules.game_over {
            GameOverCheck::SpawnPosition => self
                .current
                .as_ref()
                .is_some_and(|p| p.distance >= OUTER_LIMIT),
            GameOverCheck::SettledPiece => {
                settled.distance >= OUTER_LIMIT
                    || self
                        .current
                        .as_ref()
                        .is_some_and(|p| check_collision(p, &self.pieces).is_some())
            }
        };

        if over {
            self.phase = GamePhase::GameOver;
            self.current = None;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!(
                "Game over: score {}, {} pieces ({} blocks), {} rings",
                self.score,
                self.pieces.len(),
                self.settled_block_count(),
                self.rings_cleared
            );
        }
        over
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total number of settled blocks
    pub fn settled_block_count(&self) -> usize {
        self.pieces.iter().map(|p| p.blocks.len()).sum()
    }
}
