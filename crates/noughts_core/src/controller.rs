//! Turn controller: the game state machine.
//!
//! The controller owns the board and both players, and is the only code that
//! mutates the board. Human input arrives through [`TurnController::make_move`].
//! When the computer is to move, the controller hands back a [`ComputerTurn`]
//! ticket instead of playing at once; the caller waits out the thinking delay
//! and passes the ticket to [`TurnController::play_computer_move`].
//!
//! Every [`TurnController::initialize`] starts a new epoch. A ticket carries
//! the epoch it was issued in and is ignored once that epoch has passed, so a
//! computer move scheduled before a restart cannot land on the new board.

use crate::action::Move;
use crate::ai::{Difficulty, MoveSelector};
use crate::display::GameDisplay;
use crate::error::EngineError;
use crate::rules::{Outcome, WinPattern, evaluate};
use crate::types::{Board, Marker, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Name used for player 1 when none is given.
pub const DEFAULT_PLAYER1: &str = "Player 1";
/// Name used for a human player 2 when none is given.
pub const DEFAULT_PLAYER2: &str = "Player 2";
/// Name used for the computer when none is given.
pub const DEFAULT_COMPUTER: &str = "AI";
/// Status shown when a move arrives outside an active game.
pub const NOT_STARTED: &str = "Game hasn't started! Start a new game.";
/// Status shown when the board fills without a line.
pub const TIE_STATUS: &str = "Game ends in a tie!";

/// Configuration for a new game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    /// Name for player 1 (X). Blank means the default.
    pub player1: String,
    /// Name for player 2 (O). Blank means the default.
    pub player2: String,
    /// Whether player 2 is the computer.
    pub ai_enabled: bool,
    /// Computer strength.
    pub difficulty: Difficulty,
}

impl GameSetup {
    /// Creates a human-vs-human setup.
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            player1: player1.into(),
            player2: player2.into(),
            ai_enabled: false,
            difficulty: Difficulty::default(),
        }
    }

    /// Makes player 2 the computer at the given difficulty.
    pub fn against_computer(mut self, difficulty: Difficulty) -> Self {
        self.ai_enabled = true;
        self.difficulty = difficulty;
        self
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started.
    Idle,
    /// Moves are accepted.
    Active,
    /// A player completed a line.
    Won {
        /// The winning marker.
        marker: Marker,
        /// The completed line.
        pattern: WinPattern,
    },
    /// The board filled without a line.
    Tied,
}

impl Phase {
    /// Returns true if moves are accepted.
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Phase::Active)
    }
}

/// A computer move waiting to be played.
///
/// Only valid in the epoch it was issued in.
#[must_use = "a computer turn does nothing unless passed to play_computer_move"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputerTurn {
    epoch: u64,
}

impl ComputerTurn {
    /// Returns the epoch this turn was issued in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Game state machine for one board.
#[derive(Debug)]
pub struct TurnController<D, R> {
    board: Board,
    player1: Player,
    player2: Player,
    to_move: Marker,
    phase: Phase,
    ai_enabled: bool,
    difficulty: Difficulty,
    history: Vec<Move>,
    epoch: u64,
    selector: MoveSelector<R>,
    display: D,
}

impl<D: GameDisplay, R: Rng> TurnController<D, R> {
    /// Creates an idle controller.
    pub fn new(display: D, selector: MoveSelector<R>) -> Self {
        Self {
            board: Board::new(),
            player1: Player::new(DEFAULT_PLAYER1, Marker::X),
            player2: Player::new(DEFAULT_PLAYER2, Marker::O),
            to_move: Marker::X,
            phase: Phase::Idle,
            ai_enabled: false,
            difficulty: Difficulty::default(),
            history: Vec::new(),
            epoch: 0,
            selector,
            display,
        }
    }

    /// Starts a new game, abandoning any game in progress.
    ///
    /// Valid from every phase. Any outstanding [`ComputerTurn`] becomes stale.
    #[instrument(skip(self), fields(epoch = self.epoch + 1))]
    pub fn initialize(&mut self, setup: GameSetup) {
        self.epoch += 1;

        let player2_default = if setup.ai_enabled {
            DEFAULT_COMPUTER
        } else {
            DEFAULT_PLAYER2
        };
        self.player1 = Player::new(name_or(setup.player1, DEFAULT_PLAYER1), Marker::X);
        self.player2 = Player::new(name_or(setup.player2, player2_default), Marker::O);
        self.to_move = Marker::X;
        self.phase = Phase::Active;
        self.ai_enabled = setup.ai_enabled;
        self.difficulty = setup.difficulty;
        self.history.clear();
        self.board.reset();

        info!(
            player1 = %self.player1.name(),
            player2 = %self.player2.name(),
            ai_enabled = self.ai_enabled,
            difficulty = %self.difficulty,
            "Game initialized"
        );

        self.display.clear_highlights();
        self.display.render_board(self.board.cells());
        self.display.set_input_enabled(true);
        let status = self.turn_status();
        self.display.set_status(&status);
    }

    /// Handles a human move request.
    ///
    /// Outside an active game the display is told the game has not started.
    /// Requests during the computer's turn and illegal cells are ignored.
    /// Returns a [`ComputerTurn`] when the computer is to move next.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn make_move(&mut self, index: usize) -> Option<ComputerTurn> {
        if !self.phase.accepts_moves() {
            debug!(phase = ?self.phase, "Move requested while closed");
            self.display.set_status(NOT_STARTED);
            return None;
        }

        if self.is_computer_turn() {
            debug!("Ignoring human move during computer turn");
            return None;
        }

        self.apply(index)
    }

    /// Plays the computer's move for a ticket issued by this controller.
    ///
    /// Does nothing if the ticket is from an earlier epoch or it is no longer
    /// the computer's turn.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::NoLegalMoves`] from the selector, which an
    /// active game never produces.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn play_computer_move(
        &mut self,
        turn: ComputerTurn,
    ) -> Result<Option<ComputerTurn>, EngineError> {
        if turn.epoch != self.epoch {
            debug!(stale_epoch = turn.epoch, "Dropping stale computer move");
            return Ok(None);
        }

        if !self.phase.accepts_moves() || !self.is_computer_turn() {
            debug!(phase = ?self.phase, "Computer move no longer wanted");
            return Ok(None);
        }

        let snapshot = self.board.snapshot();
        let index = self
            .selector
            .select_move(&snapshot, self.difficulty, self.to_move)?;
        info!(index, difficulty = %self.difficulty, "Computer chose move");

        Ok(self.apply(index))
    }

    fn apply(&mut self, index: usize) -> Option<ComputerTurn> {
        let mover_is_computer = self.is_computer_turn();
        let marker = self.to_move;

        if !self.board.try_place(index, marker) {
            debug!(index, "Declined illegal move");
            return None;
        }

        let action = Move::new(marker, index);
        debug!(%action, "Move applied");
        self.history.push(action);
        self.display.render_board(self.board.cells());

        match evaluate(self.board.cells()) {
            Outcome::Win { marker, pattern } => {
                self.phase = Phase::Won { marker, pattern };
                let status = format!("{} wins!", self.player(marker).name());
                info!(%marker, ?pattern, "Game won");
                self.display.highlight_pattern(&pattern);
                self.display.set_status(&status);
                self.display.set_input_enabled(false);
                None
            }
            Outcome::Tie => {
                self.phase = Phase::Tied;
                info!("Game tied");
                self.display.set_status(TIE_STATUS);
                self.display.set_input_enabled(false);
                None
            }
            Outcome::InProgress => {
                self.to_move = marker.opponent();
                let status = self.turn_status();
                self.display.set_status(&status);

                if self.is_computer_turn() {
                    self.display.set_input_enabled(false);
                    Some(ComputerTurn { epoch: self.epoch })
                } else {
                    if mover_is_computer {
                        self.display.set_input_enabled(true);
                    }
                    None
                }
            }
        }
    }

    fn turn_status(&self) -> String {
        let player = self.current_player();
        format!("{}'s turn ({})", player.name(), player.marker())
    }
}

impl<D, R> TurnController<D, R> {
    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns player 1 (X).
    pub fn player1(&self) -> &Player {
        &self.player1
    }

    /// Returns player 2 (O).
    pub fn player2(&self) -> &Player {
        &self.player2
    }

    /// Returns the player holding `marker`.
    pub fn player(&self, marker: Marker) -> &Player {
        match marker {
            Marker::X => &self.player1,
            Marker::O => &self.player2,
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.to_move)
    }

    /// Returns true if player 2 is the computer and it is player 2's turn.
    pub fn is_computer_turn(&self) -> bool {
        self.ai_enabled && self.to_move == Marker::O
    }

    /// Returns whether player 2 is the computer.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Returns the computer's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the moves applied since the last initialize.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the display mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

fn name_or(name: String, default: &str) -> String {
    if name.trim().is_empty() {
        default.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, RecordingDisplay};
    use crate::types::Cell;
    use rand_chacha::ChaCha8Rng;

    type Controller = TurnController<RecordingDisplay, ChaCha8Rng>;

    fn controller() -> Controller {
        TurnController::new(RecordingDisplay::new(), MoveSelector::seeded(5))
    }

    fn versus_human() -> Controller {
        let mut game = controller();
        game.initialize(GameSetup::new("Ada", "Bob"));
        game.display_mut().take();
        game
    }

    fn versus_computer(difficulty: Difficulty) -> Controller {
        let mut game = controller();
        game.initialize(GameSetup::new("Ada", "").against_computer(difficulty));
        game.display_mut().take();
        game
    }

    fn play(game: &mut Controller, moves: &[usize]) {
        for &index in moves {
            assert_eq!(game.make_move(index), None);
        }
    }

    #[test]
    fn test_idle_rejects_moves() {
        let mut game = controller();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.make_move(4), None);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(
            game.display().events(),
            &[DisplayEvent::Status(NOT_STARTED.to_string())]
        );
    }

    #[test]
    fn test_initialize_notifies_display() {
        let mut game = controller();
        game.initialize(GameSetup::new("Ada", "Bob"));
        assert_eq!(
            game.display().events(),
            &[
                DisplayEvent::ClearHighlights,
                DisplayEvent::Board([Cell::Empty; 9]),
                DisplayEvent::InputEnabled(true),
                DisplayEvent::Status("Ada's turn (X)".to_string()),
            ]
        );
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.epoch(), 1);
    }

    #[test]
    fn test_default_names() {
        let mut game = controller();
        game.initialize(GameSetup::new("", "  "));
        assert_eq!(game.player1().name(), DEFAULT_PLAYER1);
        assert_eq!(game.player2().name(), DEFAULT_PLAYER2);

        game.initialize(GameSetup::default().against_computer(Difficulty::Easy));
        assert_eq!(game.player2().name(), DEFAULT_COMPUTER);
    }

    #[test]
    fn test_alternating_turns() {
        let mut game = versus_human();
        play(&mut game, &[4]);
        assert_eq!(game.current_player().name(), "Bob");
        assert_eq!(game.display().last_status(), Some("Bob's turn (O)"));
        play(&mut game, &[0]);
        assert_eq!(game.current_player().marker(), Marker::X);
        assert_eq!(
            game.history(),
            &[Move::new(Marker::X, 4), Move::new(Marker::O, 0)]
        );
    }

    #[test]
    fn test_illegal_move_is_silent() {
        let mut game = versus_human();
        play(&mut game, &[4]);
        game.display_mut().take();

        play(&mut game, &[4, 9]);
        assert!(game.display().events().is_empty());
        assert_eq!(game.current_player().marker(), Marker::O);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_win_closes_game() {
        let mut game = versus_human();
        play(&mut game, &[0, 3, 1, 4, 2]);

        assert_eq!(
            game.phase(),
            Phase::Won {
                marker: Marker::X,
                pattern: [0, 1, 2]
            }
        );
        let events = game.display_mut().take();
        assert!(events.contains(&DisplayEvent::Highlight([0, 1, 2])));
        assert_eq!(
            &events[events.len() - 2..],
            &[
                DisplayEvent::Status("Ada wins!".to_string()),
                DisplayEvent::InputEnabled(false),
            ]
        );

        let before = game.board().clone();
        assert_eq!(game.make_move(5), None);
        assert_eq!(game.board(), &before);
        assert_eq!(game.display().last_status(), Some(NOT_STARTED));
    }

    #[test]
    fn test_tie_closes_game() {
        let mut game = versus_human();
        play(&mut game, &[0, 4, 8, 1, 7, 6, 2, 5, 3]);
        assert_eq!(game.phase(), Phase::Tied);
        assert_eq!(game.display().last_status(), Some(TIE_STATUS));
        assert_eq!(game.display().input_enabled(), Some(false));
    }

    #[test]
    fn test_initialize_resets_finished_game() {
        let mut game = versus_human();
        play(&mut game, &[0, 3, 1, 4, 2]);
        game.initialize(GameSetup::new("Ada", "Bob"));

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.phase(), Phase::Active);
        assert_eq!(game.current_player().marker(), Marker::X);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_computer_turn_issued_and_played() {
        let mut game = versus_computer(Difficulty::Impossible);

        let turn = game.make_move(4).expect("computer should be next");
        assert_eq!(turn.epoch(), game.epoch());
        assert!(game.is_computer_turn());
        assert_eq!(game.display().input_enabled(), Some(false));
        assert_eq!(game.display().last_status(), Some("AI's turn (O)"));

        assert_eq!(game.play_computer_move(turn), Ok(None));
        assert_eq!(game.board().get(0), Some(Cell::Occupied(Marker::O)));
        assert!(!game.is_computer_turn());
        assert_eq!(game.display().input_enabled(), Some(true));
        assert_eq!(game.display().last_status(), Some("Ada's turn (X)"));
    }

    #[test]
    fn test_human_input_ignored_on_computer_turn() {
        let mut game = versus_computer(Difficulty::Easy);
        let _turn = game.make_move(4).expect("computer should be next");
        game.display_mut().take();

        assert_eq!(game.make_move(0), None);
        assert!(game.board().is_empty(0));
        assert!(game.display().events().is_empty());
    }

    #[test]
    fn test_stale_computer_turn_dropped() {
        let mut game = versus_computer(Difficulty::Easy);
        let stale = game.make_move(4).expect("computer should be next");

        game.initialize(GameSetup::new("Ada", "").against_computer(Difficulty::Easy));
        game.display_mut().take();

        assert_eq!(game.play_computer_move(stale), Ok(None));
        assert_eq!(game.board(), &Board::new());
        assert!(game.display().events().is_empty());
    }

    #[test]
    fn test_repeated_ticket_is_noop() {
        let mut game = versus_computer(Difficulty::Easy);
        let turn = game.make_move(4).expect("computer should be next");
        assert_eq!(game.play_computer_move(turn), Ok(None));
        let board = game.board().clone();
        assert_eq!(game.play_computer_move(turn), Ok(None));
        assert_eq!(game.board(), &board);
    }

    #[test]
    fn test_impossible_computer_survives_greedy_human() {
        let mut game = versus_computer(Difficulty::Impossible);
        while game.phase().accepts_moves() {
            let index = game.board().empty_cells()[0];
            if let Some(turn) = game.make_move(index) {
                assert_eq!(game.play_computer_move(turn), Ok(None));
            }
        }
        assert!(!matches!(
            game.phase(),
            Phase::Won {
                marker: Marker::X,
                ..
            }
        ));
    }
}
