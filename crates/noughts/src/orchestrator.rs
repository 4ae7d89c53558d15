//! Event loop that drives a game from player input and timed computer moves.

use crate::input::{HELP, InputError, PlayerCommand, parse_command};
use anyhow::Result;
use noughts_core::{ComputerTurn, GameDisplay, GameSetup, TurnController};
use rand::Rng;
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages delivered to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A parsed player command.
    Input(PlayerCommand),
    /// A line that did not parse, with the reason.
    Rejected(String),
    /// The thinking delay for a computer turn has elapsed.
    ComputerReady(ComputerTurn),
    /// Input reached end of file.
    Closed,
}

/// Sequences player commands and delayed computer moves for one controller.
///
/// Settings changed between games are held in a pending [`GameSetup`] and
/// take effect on the next `new`.
pub struct Orchestrator<D, R> {
    controller: TurnController<D, R>,
    setup: GameSetup,
    think_delay: Duration,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl<D: GameDisplay, R: Rng> Orchestrator<D, R> {
    /// Creates an orchestrator with the settings for the first game.
    pub fn new(controller: TurnController<D, R>, setup: GameSetup, think_delay: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            setup,
            think_delay,
            event_tx,
            event_rx,
        }
    }

    /// Returns a handle for feeding events into the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.event_tx.clone()
    }

    /// Returns the game controller.
    pub fn controller(&self) -> &TurnController<D, R> {
        &self.controller
    }

    /// Returns the settings the next game will use.
    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game orchestration");

        while let Some(event) = self.event_rx.recv().await {
            match event {
                Event::Input(PlayerCommand::Quit) | Event::Closed => {
                    info!("Input finished, leaving game loop");
                    break;
                }
                Event::Input(command) => self.handle_command(command),
                Event::Rejected(reason) => self.controller.display_mut().set_status(&reason),
                Event::ComputerReady(turn) => {
                    let next = self.controller.play_computer_move(turn)?;
                    self.schedule(next);
                }
            }
        }

        Ok(())
    }

    #[instrument(skip(self))]
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Cell(index) => {
                let turn = self.controller.make_move(index);
                self.schedule(turn);
            }
            PlayerCommand::NewGame => self.controller.initialize(self.setup.clone()),
            PlayerCommand::Mode(ai_enabled) => {
                self.setup.ai_enabled = ai_enabled;
                let mode = if ai_enabled {
                    "against the computer"
                } else {
                    "two players"
                };
                self.pending(&format!("Mode set to {}", mode));
            }
            PlayerCommand::Difficulty(difficulty) => {
                self.setup.difficulty = difficulty;
                self.pending(&format!("Difficulty set to {}", difficulty));
            }
            PlayerCommand::Name1(name) => {
                self.pending(&format!("Player 1 will be {:?}", name));
                self.setup.player1 = name;
            }
            PlayerCommand::Name2(name) => {
                self.pending(&format!("Player 2 will be {:?}", name));
                self.setup.player2 = name;
            }
            PlayerCommand::Help => self.controller.display_mut().set_status(HELP),
            PlayerCommand::Quit => {}
        }
    }

    fn pending(&mut self, change: &str) {
        debug!(setup = ?self.setup, "Pending setup changed");
        let status = format!("{}. Type `new` to start a game with it.", change);
        self.controller.display_mut().set_status(&status);
    }

    /// Posts the turn back to the loop once the thinking delay has passed.
    fn schedule(&self, turn: Option<ComputerTurn>) {
        let Some(turn) = turn else {
            return;
        };
        debug!(
            epoch = turn.epoch(),
            delay_ms = self.think_delay.as_millis() as u64,
            "Scheduling computer move"
        );
        let tx = self.event_tx.clone();
        let delay = self.think_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Event::ComputerReady(turn)).is_err() {
                debug!("Game loop gone before computer move");
            }
        });
    }
}

/// Reads lines from `reader` on a dedicated thread and forwards them as events.
///
/// Sends [`Event::Closed`] at end of input or on a read error. The thread is
/// never joined by the game loop: a read blocked on an open terminal must not
/// keep the program alive after `quit`.
pub fn spawn_input_reader<Rd>(reader: Rd, tx: mpsc::UnboundedSender<Event>) -> JoinHandle<()>
where
    Rd: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut lines = reader.lines();
        loop {
            let event = match lines.next() {
                Some(Ok(line)) => match parse_command(&line) {
                    Ok(command) => Event::Input(command),
                    Err(InputError::Empty) => continue,
                    Err(e) => Event::Rejected(e.to_string()),
                },
                None => Event::Closed,
                Some(Err(e)) => {
                    warn!(error = %e, "Failed to read input");
                    Event::Closed
                }
            };

            let closed = event == Event::Closed;
            if tx.send(event).is_err() {
                debug!("Game loop gone, stopping input reader");
                break;
            }
            if closed {
                break;
            }
        }
    })
}
