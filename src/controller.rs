//! Session controller: walks the plan one step at a time, owns the single
//! countdown and publishes everything the host draws or plays.

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::countdown::{format_countdown, should_blink, Countdown};
use crate::cues::{Cue, CueSink};
use crate::error::{Result, TabataError};
use crate::locale::{Locale, Strings};
use crate::plan::{build_plan_in, Plan, Step, StepKind, StepMeta};
use crate::session::{Cursor, Session, SessionState};

/// What the start control currently offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Start,
    Restart,
    Hidden,
}

/// Observable display model, rewritten by every controller operation
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub state: SessionState,
    pub stage: String,
    pub current: String,
    pub next: String,
    pub countdown: String,
    pub blink: bool,
    /// Elapsed share of the current step: 0.0 is a full ring, 1.0 an empty one
    pub ring_progress: f64,
    /// Elapsed share of the whole plan, 1.0 only once complete
    pub overall_progress: f64,
    pub affordance: Affordance,
}

impl Panel {
    fn initial(s: &Strings) -> Self {
        Self {
            state: SessionState::Initial,
            stage: s.initial_stage.to_string(),
            current: s.initial_current.to_string(),
            next: String::new(),
            countdown: format_countdown(0),
            blink: false,
            ring_progress: 0.0,
            overall_progress: 0.0,
            affordance: Affordance::Start,
        }
    }

    pub fn overall_percent(&self) -> u16 {
        (self.overall_progress * 100.0).floor() as u16
    }

    fn set_texts(&mut self, stage: impl Into<String>, current: impl Into<String>, next: String) {
        self.stage = stage.into();
        self.current = current.into();
        self.next = next;
    }
}

pub struct Controller<C: Clock, S: CueSink> {
    plan: Plan,
    strings: &'static Strings,
    clock: C,
    cues: S,
    session: Session,
    panel: Panel,
}

impl<C: Clock, S: CueSink> Controller<C, S> {
    /// Plan labels and panel wording both come from `locale`
    pub fn new(locale: Locale, clock: C, cues: S) -> Self {
        let strings = locale.strings();
        Self {
            plan: build_plan_in(locale),
            strings,
            clock,
            cues,
            session: Session::default(),
            panel: Panel::initial(strings),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn cues(&self) -> &S {
        &self.cues
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.session.cursor.index().and_then(|i| self.plan.get(i))
    }

    /// Begin a workout. Only allowed from Initial or Complete.
    pub fn start(&mut self) -> Result<()> {
        let state = self.session.state;
        if !state.can_start() {
            warn!(%state, "start rejected, workout in progress");
            return Err(TabataError::AlreadyRunning(state));
        }
        self.begin();
        Ok(())
    }

    /// Reset then start, from any state
    pub fn restart(&mut self) {
        self.reset();
        self.begin();
    }

    fn begin(&mut self) {
        let now = self.clock.now_ms();
        self.session.started_at_ms = Some(now);
        self.session.cursor = Cursor::Idle;
        info!(steps = self.plan.len(), total_ms = self.plan.total_duration_ms(), "workout started");
        self.advance();
    }

    /// Cancel any countdown and return to the Initial state
    pub fn reset(&mut self) {
        self.session = Session::default();
        self.panel = Panel::initial(self.strings);
        debug!("session reset");
    }

    /// Move to the next step, or to Complete past the last one.
    /// Once complete, further calls do nothing.
    pub fn advance(&mut self) {
        let Some(idx) = self.session.cursor.next_index() else {
            return;
        };
        let Some(step) = self.plan.get(idx).copied() else {
            self.complete();
            return;
        };

        self.session.cursor = Cursor::Step(idx);
        self.session.state = step.kind.into();
        self.panel.state = self.session.state;
        self.panel.affordance = Affordance::Hidden;
        self.panel.overall_progress = self.plan.elapsed_fraction_at(idx);

        let s = self.strings;
        let (stage, current, next, cue) = match step.kind {
            StepKind::Prepare => (
                s.prepare.to_string(),
                s.prepare.to_string(),
                self.next_preview(idx),
                Some(Cue::PhaseStart),
            ),
            StepKind::Work => {
                let current = match step.meta {
                    StepMeta::Work { set, of } => s.work_current_text(step.label, set, of),
                    _ => step.label.to_string(),
                };
                (
                    s.work_stage_text(step.label),
                    current,
                    self.upcoming_rest_preview(idx),
                    Some(Cue::PhaseStart),
                )
            }
            StepKind::Rest => {
                let long = step.is_long_rest();
                (
                    s.rest.to_string(),
                    (if long { s.long_rest } else { s.short_rest }).to_string(),
                    self.next_preview(idx),
                    // cool-down rests start silently
                    (!long).then_some(Cue::ShortRestStart),
                )
            }
        };
        self.panel.set_texts(stage, current, next);
        if let Some(cue) = cue {
            self.cues.play(cue);
        }

        debug!(
            index = idx,
            kind = %step.kind,
            duration_ms = step.duration_ms,
            "step entered"
        );
        self.open_countdown(step.duration_ms);
    }

    /// Periodic tick: recompute remaining time from the anchored end time
    /// and advance once when it reaches zero
    pub fn on_tick(&mut self) {
        let Some(countdown) = self.session.countdown else {
            return;
        };
        let remaining = countdown.remaining_ms(self.clock.now_ms());
        self.show_remaining(&countdown, remaining);

        if remaining == 0 {
            self.session.countdown = None;
            debug!(index = ?self.session.cursor.index(), "countdown elapsed");
            self.cues.play(Cue::PhaseElapsed);
            self.advance();
        }
    }

    /// The host became visible again after being suspended or backgrounded
    pub fn on_visible(&mut self) {
        if self.session.countdown.is_some() {
            debug!("visibility restored, resyncing countdown");
            self.on_tick();
        }
    }

    /// Replaces (and so cancels) any countdown already running
    fn open_countdown(&mut self, duration_ms: u64) {
        let countdown = Countdown::start(self.clock.now_ms(), duration_ms);
        self.session.countdown = Some(countdown);
        self.show_remaining(&countdown, duration_ms);
    }

    fn show_remaining(&mut self, countdown: &Countdown, remaining_ms: u64) {
        self.panel.countdown = format_countdown(remaining_ms);
        self.panel.blink = should_blink(remaining_ms);
        self.panel.ring_progress = countdown.ring_progress(remaining_ms);
    }

    fn complete(&mut self) {
        self.session.countdown = None;
        self.session.cursor = Cursor::Finished;
        self.session.state = SessionState::Complete;

        let s = self.strings;
        self.panel.state = SessionState::Complete;
        self.panel.countdown = format_countdown(0);
        self.panel.blink = false;
        self.panel.ring_progress = 1.0;
        self.panel.overall_progress = 1.0;
        self.panel
            .set_texts(s.finish, s.complete_current, s.complete_next.to_string());
        self.panel.affordance = Affordance::Restart;

        self.cues.play(Cue::WorkoutComplete);
        info!("workout complete");
    }

    fn next_preview(&self, idx: usize) -> String {
        let s = self.strings;
        match self.plan.get(idx + 1) {
            Some(next) => match next.kind {
                StepKind::Work => s.next_work_text(next.label),
                StepKind::Rest => s.next_rest.to_string(),
                StepKind::Prepare => s.next_prepare.to_string(),
            },
            None => String::new(),
        }
    }

    fn upcoming_rest_preview(&self, idx: usize) -> String {
        let s = self.strings;
        match self.plan.get(idx + 1) {
            Some(next) if next.kind == StepKind::Rest => {
                if next.is_long_rest() {
                    s.after_long_rest.to_string()
                } else {
                    s.after_short_rest.to_string()
                }
            }
            _ => self.next_preview(idx),
        }
    }
}
