use alloc::string::{String, ToString};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Previewing,
    Playing,
    Won,
    TimedOut,
}

impl GamePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::TimedOut)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Idle,
    OneSelected(CardId),
    Resolving(CardId, CardId),
}

impl TurnState {
    pub const fn is_resolving(self) -> bool {
        matches!(self, Self::Resolving(..))
    }

    /// The first card of the current turn, if one is face up and waiting for a partner.
    pub const fn held(self) -> Option<CardId> {
        match self {
            Self::OneSelected(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    FirstSelected,
    Matched,
    Mismatched,
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Owns one round of the game: the board, the turn, score and countdown, and the timers that move
/// the round along. Every state change is reported to the observer.
pub struct GameController<S: Scheduler, O: Observer> {
    config: GameConfig,
    scheduler: S,
    observer: O,
    rng: SmallRng,
    phase: GamePhase,
    board: Board,
    turn: TurnState,
    score: Points,
    remaining_secs: Seconds,
    matched_pairs: PairCount,
    round: u32,
    preview_timer: Option<S::Handle>,
    countdown_timer: Option<S::Handle>,
    unflip_timer: Option<S::Handle>,
}

impl<S: Scheduler, O: Observer> GameController<S, O> {
    pub fn new(config: GameConfig, scheduler: S, observer: O, seed: u64) -> Self {
        Self {
            config,
            scheduler,
            observer,
            rng: SmallRng::seed_from_u64(seed),
            phase: GamePhase::default(),
            board: Board::empty(),
            turn: TurnState::default(),
            score: 0,
            remaining_secs: config.countdown_secs,
            matched_pairs: 0,
            round: 0,
            preview_timer: None,
            countdown_timer: None,
            unflip_timer: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn score(&self) -> Points {
        self.score
    }

    pub fn remaining_secs(&self) -> Seconds {
        self.remaining_secs
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Whether `select_card(id)` would currently be accepted.
    pub fn can_select(&self, id: CardId) -> bool {
        self.phase.is_playing()
            && !self.turn.is_resolving()
            && self.turn.held() != Some(id)
            && self.board.get(id).is_some_and(|card| !card.revealed)
    }

    /// Deals a fresh shuffled board and shows every face for the preview delay.
    pub fn start(&mut self) -> Result<()> {
        self.check_not_started()?;
        self.check_pair_count()?;
        let board = Board::shuffled(self.config.pairs, &mut self.rng);
        self.begin_preview(board);
        Ok(())
    }

    /// Same as [`Self::start`] with a predetermined layout.
    pub fn start_with_board(&mut self, board: Board) -> Result<()> {
        self.check_not_started()?;
        self.check_pair_count()?;
        if board.len() != self.config.total_cards() {
            return Err(GameError::BoardSizeMismatch);
        }
        self.begin_preview(board);
        Ok(())
    }

    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        if !self.can_select(id) {
            log::trace!("ignored selection of card {}", id);
            return SelectOutcome::Ignored;
        }

        self.board.set_revealed(id, true);
        log::trace!("card {} revealed: {:?}", id, self.board[id].face);
        self.notify_board();

        match self.turn {
            TurnState::Idle => {
                self.turn = TurnState::OneSelected(id);
                SelectOutcome::FirstSelected
            }
            TurnState::OneSelected(first) => {
                self.turn = TurnState::Resolving(first, id);
                self.resolve()
            }
            TurnState::Resolving(..) => SelectOutcome::Ignored,
        }
    }

    /// Delivers a fired timer. Tokens from an earlier round, or that no longer fit the current
    /// phase, are dropped. Returns whether anything changed.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if token.round != self.round {
            log::debug!(
                "stale {:?} timer from round {} (current {})",
                token.kind,
                token.round,
                self.round
            );
            return false;
        }

        match (token.kind, self.phase) {
            (TimerKind::Preview, GamePhase::Previewing) => {
                self.end_preview();
                true
            }
            (TimerKind::Countdown, GamePhase::Playing) => {
                self.tick();
                true
            }
            (TimerKind::Unflip, GamePhase::Playing) if self.turn.is_resolving() => {
                self.unflip();
                true
            }
            (kind, phase) => {
                log::debug!("{:?} timer ignored in phase {:?}", kind, phase);
                false
            }
        }
    }

    /// Cancels every timer and returns to the pre-game state. Does not deal a new board.
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.round = self.round.wrapping_add(1);
        log::debug!("reset to round {}", self.round);

        self.phase = GamePhase::NotStarted;
        self.board = Board::empty();
        self.turn = TurnState::Idle;
        self.score = 0;
        self.matched_pairs = 0;
        self.remaining_secs = self.config.countdown_secs;

        self.notify_board();
        self.observer.notify(Notification::ScoreChanged(self.score));
        self.observer
            .notify(Notification::TimeChanged(self.remaining_secs));
        self.observer.notify(Notification::StatusChanged(String::new()));
    }

    fn begin_preview(&mut self, mut board: Board) {
        board.set_all_revealed(true);
        self.board = board;
        self.phase = GamePhase::Previewing;
        self.turn = TurnState::Idle;
        log::debug!(
            "previewing {} cards for {:?}",
            self.board.len(),
            self.config.preview_delay
        );

        let token = self.token(TimerKind::Preview);
        self.preview_timer.take();
        self.preview_timer = Some(self.scheduler.once(token, self.config.preview_delay));
        self.notify_board();
    }

    fn end_preview(&mut self) {
        self.preview_timer = None;
        self.board.set_all_revealed(false);
        self.phase = GamePhase::Playing;
        self.remaining_secs = self.config.countdown_secs;
        log::debug!("playing, {}s on the clock", self.remaining_secs);

        let token = self.token(TimerKind::Countdown);
        self.countdown_timer.take();
        self.countdown_timer = Some(self.scheduler.every(token, TICK_PERIOD));

        self.notify_board();
        self.observer
            .notify(Notification::TimeChanged(self.remaining_secs));
    }

    fn tick(&mut self) {
        match self.remaining_secs.checked_sub(1) {
            Some(remaining) => {
                self.remaining_secs = remaining;
                self.observer.notify(Notification::TimeChanged(remaining));
            }
            None => self.finish(GamePhase::TimedOut, STATUS_TIMED_OUT),
        }
    }

    fn resolve(&mut self) -> SelectOutcome {
        let TurnState::Resolving(first, second) = self.turn else {
            debug_assert!(false, "resolve entered in {:?}", self.turn);
            log::error!("resolve entered without two held cards: {:?}", self.turn);
            return SelectOutcome::Ignored;
        };

        if self.board[first].matches(&self.board[second]) {
            self.matched_pairs += 1;
            self.score = self.score.saturating_add(self.config.match_reward);
            self.turn = TurnState::Idle;
            log::debug!(
                "cards {} and {} match, {}/{} pairs",
                first,
                second,
                self.matched_pairs,
                self.config.pairs
            );
            self.observer.notify(Notification::ScoreChanged(self.score));

            if self.matched_pairs == self.config.pairs {
                self.finish(GamePhase::Won, STATUS_WON);
                SelectOutcome::Won
            } else {
                SelectOutcome::Matched
            }
        } else {
            self.score = self.score.saturating_sub(self.config.mismatch_penalty);
            log::debug!("cards {} and {} differ", first, second);
            self.observer.notify(Notification::ScoreChanged(self.score));

            let token = self.token(TimerKind::Unflip);
            self.unflip_timer.take();
            self.unflip_timer = Some(self.scheduler.once(token, self.config.unflip_delay));
            SelectOutcome::Mismatched
        }
    }

    fn unflip(&mut self) {
        self.unflip_timer = None;
        if let TurnState::Resolving(first, second) = self.turn {
            self.board.set_revealed(first, false);
            self.board.set_revealed(second, false);
        }
        self.turn = TurnState::Idle;
        self.notify_board();
    }

    fn finish(&mut self, phase: GamePhase, status: &str) {
        debug_assert!(phase.is_finished());
        if self.phase.is_finished() {
            return;
        }

        self.cancel_timers();
        self.phase = phase;
        log::info!("round {} over: {:?}, score {}", self.round, phase, self.score);

        self.observer
            .notify(Notification::StatusChanged(status.to_string()));
        self.observer.notify(Notification::GameOver);
    }

    fn cancel_timers(&mut self) {
        self.preview_timer = None;
        self.countdown_timer = None;
        self.unflip_timer = None;
    }

    fn check_not_started(&self) -> Result<()> {
        if matches!(self.phase, GamePhase::NotStarted) {
            Ok(())
        } else {
            Err(GameError::AlreadyStarted)
        }
    }

    fn check_pair_count(&self) -> Result<()> {
        if (1..=MAX_PAIRS).contains(&self.config.pairs) {
            Ok(())
        } else {
            Err(GameError::InvalidPairCount)
        }
    }

    fn token(&self, kind: TimerKind) -> TimerToken {
        TimerToken::new(kind, self.round)
    }

    fn notify_board(&mut self) {
        self.observer
            .notify(Notification::BoardRendered(self.board.views()));
    }
}
