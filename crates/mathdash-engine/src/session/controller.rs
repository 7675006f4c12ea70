//! The session controller: owns the live round, resolves submissions, and
//! paces rounds with cancellable timers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::Utc;
use mathdash_common::{
    ConnectionId, EventBus, GameEvent, PublicQuestion, RoundInfo, SubmissionResult, WinnerInfo,
};
use mathdash_config::MathdashConfig;
use mathdash_ledger::ScoreLedger;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::gate::WinnerGate;
use super::lock;
use super::round::{Round, RoundSnapshot, Winner};
use super::settings::SessionSettings;
use crate::presence::{Participant, PresenceTracker};
use crate::question::{Question, QuestionGenerator};

/// Aggregate counters for the stats endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub connected_count: usize,
    pub is_active: bool,
    pub current_winner: Option<WinnerInfo>,
    pub rounds_started: u64,
    pub rounds_won: u64,
}

struct PendingAdvance {
    id: u64,
    handle: JoinHandle<()>,
}

pub struct SessionController {
    pub(super) settings: SessionSettings,
    pub(super) round: Mutex<Round>,
    pub(super) gate: WinnerGate,
    pub(super) presence: Mutex<PresenceTracker>,
    generator: Mutex<QuestionGenerator>,
    ledger: Arc<dyn ScoreLedger>,
    events: Arc<EventBus>,
    pending_advance: Mutex<Option<PendingAdvance>>,
    next_advance_id: AtomicU64,
    rounds_started: AtomicU64,
    rounds_won: AtomicU64,
    this: Weak<SessionController>,
}

impl SessionController {
    pub fn new(
        settings: SessionSettings,
        generator: QuestionGenerator,
        ledger: Arc<dyn ScoreLedger>,
        events: Arc<EventBus>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            settings,
            round: Mutex::new(Round::empty()),
            gate: WinnerGate::new(),
            presence: Mutex::new(PresenceTracker::new()),
            generator: Mutex::new(generator),
            ledger,
            events,
            pending_advance: Mutex::new(None),
            next_advance_id: AtomicU64::new(0),
            rounds_started: AtomicU64::new(0),
            rounds_won: AtomicU64::new(0),
            this: this.clone(),
        })
    }

    pub fn from_config(
        config: &MathdashConfig,
        ledger: Arc<dyn ScoreLedger>,
        events: Arc<EventBus>,
    ) -> Arc<Self> {
        Self::new(
            SessionSettings::from_config(&config.game),
            QuestionGenerator::new(&config.generator),
            ledger,
            events,
        )
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Resolve one answer submission against the live round.
    ///
    /// Exactly one correct submission per round comes back with
    /// `is_winner = true`. Everything after the winner is decided (ledger
    /// write, broadcast, next-round timer) is best-effort and cannot change
    /// the result.
    pub fn submit_answer(&self, user_id: &str, username: &str, answer: f64) -> SubmissionResult {
        let submission_time = Utc::now();

        let (question_id, truth, difficulty, started) = {
            let round = lock(&self.round);
            match round.judged_question() {
                Some(q) => (q.id.clone(), q.answer, q.difficulty, round.started),
                None => return SubmissionResult::no_round(),
            }
        };

        let elapsed = started.elapsed();
        let is_correct = within_tolerance(answer, truth, self.settings.answer_tolerance);
        let result = |is_winner| SubmissionResult {
            is_correct,
            is_winner,
            submission_time,
            time_taken: elapsed.as_millis() as u64,
        };

        if !is_correct {
            return result(false);
        }
        if lock(&self.round).winner.is_some() {
            return result(false);
        }

        let _guard = self.gate.acquire();

        let winner = {
            let mut round = lock(&self.round);
            let same_question = round.live_question().is_some_and(|q| q.id == question_id);
            if !same_question || round.winner.is_some() {
                debug!(user_id, question_id = %question_id, "Correct submission lost the gate race");
                return result(false);
            }
            let winner = Winner {
                user_id: user_id.to_string(),
                username: username.to_string(),
                submitted_at: submission_time,
                time_taken: elapsed,
            };
            round.winner = Some(winner.clone());
            round.active = false;
            winner
        };
        self.rounds_won.fetch_add(1, Ordering::Relaxed);

        info!(
            question_id = %question_id,
            user_id,
            username,
            time_taken_ms = elapsed.as_millis() as u64,
            "Round won"
        );

        self.record_win(username, self.settings.points.for_difficulty(difficulty));
        self.events.publish(GameEvent::WinnerAnnounced {
            winner: winner.to_info(),
            correct_answer: truth,
        });
        self.schedule_advance(self.settings.advance_delay);

        result(true)
    }

    /// Generate a question for the current participant count and start a
    /// fresh round with it.
    pub fn start_new_question(&self) -> Question {
        let count = lock(&self.presence).count();
        let difficulty = self.settings.ladder.select(count);
        let question = lock(&self.generator).generate(difficulty);
        self.start_round_with(question)
    }

    /// Replace the round with a fresh active one for `question` and announce it.
    pub(crate) fn start_round_with(&self, question: Question) -> Question {
        let (participants, count) = {
            let presence = lock(&self.presence);
            (presence.participant_ids(), presence.count())
        };
        let public = question.to_public();

        *lock(&self.round) = Round::start(question.clone(), participants);
        self.rounds_started.fetch_add(1, Ordering::Relaxed);

        info!(
            question_id = %question.id,
            difficulty = %question.difficulty,
            archetype = %question.archetype,
            participants = count,
            "New round started"
        );
        self.events.publish(GameEvent::NewQuestion {
            question: public,
            round: RoundInfo {
                is_active: true,
                participant_count: count,
                winner: None,
            },
        });
        question
    }

    /// Start a round immediately, dropping any scheduled advance.
    pub fn force_start(&self) -> Question {
        self.cancel_pending_advance();
        self.start_new_question()
    }

    /// Register a participant and announce them. The first participant, or
    /// a join while nothing is running or scheduled, arms a round start
    /// after the join debounce.
    pub fn add_user(&self, connection: ConnectionId, user_id: &str, username: &str) {
        let (previous, count) = {
            let mut presence = lock(&self.presence);
            let previous = presence.add(connection.clone(), user_id, username);
            (previous, presence.count())
        };
        info!(connection = %connection, user_id, username, participants = count, "User joined");

        self.events.publish(GameEvent::UserJoined {
            username: username.to_string(),
            participant_count: count,
        });

        let first = previous.is_none() && count == 1;
        let round_active = lock(&self.round).active;
        if first || (!round_active && !self.has_pending_advance()) {
            self.schedule_advance(self.settings.join_debounce);
        }
    }

    /// Unregister the participant on `connection`, if any. When the room
    /// empties any scheduled advance is dropped.
    pub fn remove_user(&self, connection: &ConnectionId) -> Option<Participant> {
        let (removed, count) = {
            let mut presence = lock(&self.presence);
            (presence.remove(connection), presence.count())
        };
        let participant = removed?;
        info!(connection = %connection, username = %participant.username, participants = count, "User left");

        self.events.publish(GameEvent::UserLeft {
            username: participant.username.clone(),
            participant_count: count,
        });

        if count == 0 {
            self.cancel_pending_advance();
        }
        Some(participant)
    }

    /// Close the current round without a winner. If anyone is still
    /// connected a new round is armed after the advance delay.
    pub fn reset(&self) {
        self.cancel_pending_advance();
        lock(&self.round).active = false;

        let count = lock(&self.presence).count();
        warn!(participants = count, "Round reset");
        if count > 0 {
            self.schedule_advance(self.settings.advance_delay);
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        lock(&self.round).snapshot()
    }

    pub fn round_info(&self) -> RoundInfo {
        let count = lock(&self.presence).count();
        lock(&self.round).info(count)
    }

    /// The most recent question, answer withheld, whether or not it is still open.
    pub fn current_question(&self) -> Option<PublicQuestion> {
        lock(&self.round).question.as_ref().map(Question::to_public)
    }

    pub fn participant_count(&self) -> usize {
        lock(&self.presence).count()
    }

    pub fn participants(&self) -> Vec<Participant> {
        lock(&self.presence).participants()
    }

    pub fn stats(&self) -> SessionStats {
        let connected_count = self.participant_count();
        let round = lock(&self.round);
        SessionStats {
            connected_count,
            is_active: round.active,
            current_winner: round.winner.as_ref().map(Winner::to_info),
            rounds_started: self.rounds_started.load(Ordering::Relaxed),
            rounds_won: self.rounds_won.load(Ordering::Relaxed),
        }
    }

    pub fn has_pending_advance(&self) -> bool {
        lock(&self.pending_advance)
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    pub fn cancel_pending_advance(&self) {
        if let Some(pending) = lock(&self.pending_advance).take() {
            pending.handle.abort();
            debug!(advance = pending.id, "Cancelled pending round advance");
        }
    }

    /// Start a new round after `delay`, replacing any advance already armed.
    pub fn schedule_advance(&self, delay: Duration) {
        let id = self.next_advance_id.fetch_add(1, Ordering::Relaxed);
        let this = self.this.clone();

        // Held across the spawn so the task cannot look for its slot before it exists.
        let mut pending = lock(&self.pending_advance);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(controller) = this.upgrade() else {
                return;
            };
            controller.run_advance(id);
        });

        let previous = pending.replace(PendingAdvance { id, handle });
        drop(pending);
        if let Some(previous) = previous {
            previous.handle.abort();
        }
        debug!(advance = id, delay_ms = delay.as_millis() as u64, "Round advance scheduled");
    }

    /// Start the round for advance `id` if it still owns the pending slot.
    ///
    /// The slot stays locked until the round is in place, so a concurrent
    /// `reset` or `force_start` either cancels this advance first or closes
    /// the round it started.
    pub(super) fn run_advance(&self, id: u64) -> bool {
        let mut pending = lock(&self.pending_advance);
        if !pending.as_ref().is_some_and(|p| p.id == id) {
            debug!(advance = id, "Stale round advance skipped");
            return false;
        }
        self.start_new_question();
        *pending = None;
        true
    }

    /// Id of the advance currently armed, if any.
    pub(super) fn pending_advance_id(&self) -> Option<u64> {
        lock(&self.pending_advance).as_ref().map(|p| p.id)
    }

    fn record_win(&self, username: &str, points: u32) {
        let ledger = Arc::clone(&self.ledger);
        let username = username.to_string();
        tokio::spawn(async move {
            match ledger.record_win(&username, points).await {
                Ok(record) => debug!(
                    username = %record.username,
                    high_score = record.high_score,
                    wins = record.wins,
                    "Win recorded"
                ),
                Err(e) => warn!(username = %username, error = %e, "Failed to record win"),
            }
        });
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.pending_advance).take() {
            pending.handle.abort();
        }
    }
}

/// `|answer - truth| < tolerance`, with the difference rounded to 1e-9 so
/// that binary representation error cannot pull a boundary value inside.
pub(super) fn within_tolerance(answer: f64, truth: f64, tolerance: f64) -> bool {
    let diff = ((answer - truth).abs() * 1e9).round() / 1e9;
    diff < tolerance
}
