use std::time::{Duration, Instant};

use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::animation::{CounterTask, ExitIntent, HeroCounters};
use crate::scoring::QuestionKind;
use crate::session::QuizSession;
use crate::tui::event::Event;
use crate::tui::theme::ThemeColors;

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EmailInput,
    Help,
    ScoreBreakdown,
    ExitIntent,
}

/// Hero counters running for the lifetime of the view
pub struct LiveCounters {
    pub execution: CounterTask,
    pub industry: CounterTask,
    pub roi: CounterTask,
}

impl LiveCounters {
    pub fn start(counters: HeroCounters) -> Self {
        Self {
            execution: CounterTask::spawn(counters.execution),
            industry: CounterTask::spawn(counters.industry),
            roi: CounterTask::spawn(counters.roi),
        }
    }

    pub fn cancel(&self) {
        self.execution.cancel();
        self.industry.cancel();
        self.roi.cancel();
    }
}

pub struct App {
    pub session: QuizSession,
    pub theme: ThemeColors,
    pub input_mode: InputMode,
    pub option_state: ListState,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub counters: Option<LiveCounters>,
    pub exit_intent: Option<ExitIntent<Event>>,
    pub hero_counters: HeroCounters,
    pub exit_intent_delay: Duration,
}

impl App {
    pub fn new(
        session: QuizSession,
        theme: ThemeColors,
        hero_counters: HeroCounters,
        exit_intent_delay: Duration,
    ) -> Self {
        let mut option_state = ListState::default();
        option_state.select(Some(0));

        Self {
            session,
            theme,
            input_mode: InputMode::Normal,
            option_state,
            flash_message: None,
            should_quit: false,
            counters: None,
            exit_intent: None,
            hero_counters,
            exit_intent_delay,
        }
    }

    /// Start counters and the exit-intent watcher. Needs a tokio runtime.
    pub fn mount(&mut self, events: mpsc::UnboundedSender<Event>) {
        self.counters = Some(LiveCounters::start(self.hero_counters));
        self.exit_intent = Some(ExitIntent::new(self.exit_intent_delay, events, Event::ExitIntent));
    }

    /// Cancel everything started by `mount`.
    pub fn unmount(&mut self) {
        if let Some(counters) = self.counters.take() {
            counters.cancel();
        }
        self.exit_intent = None;
    }

    /// Current hero counter values: execution, industry, ROI
    pub fn counter_values(&self) -> (u64, u64, u64) {
        match &self.counters {
            Some(c) => (c.execution.value(), c.industry.value(), c.roi.value()),
            None => (
                self.hero_counters.execution.end,
                self.hero_counters.industry.end,
                self.hero_counters.roi.end,
            ),
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map(|q| q.options().len())
            .unwrap_or(0)
    }

    fn current_is_slider(&self) -> bool {
        self.session
            .current_question()
            .is_some_and(|q| matches!(q.kind, QuestionKind::PercentageSlider { .. }))
    }

    pub fn next_option(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        let i = match self.option_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.option_state.select(Some(i));
    }

    pub fn previous_option(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        let i = match self.option_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.option_state.select(Some(i));
    }

    /// Left/right: move the slider on percentage questions
    pub fn adjust_slider(&mut self, increase: bool) {
        if !self.current_is_slider() {
            return;
        }
        if increase {
            self.session.slider_increase();
        } else {
            self.session.slider_decrease();
        }
    }

    /// Enter on the quiz panel: answer the current question
    pub fn confirm(&mut self) {
        if self.session.show_results {
            self.start_email_input();
            return;
        }

        self.session.start_quiz();
        let answered = if self.current_is_slider() {
            self.session.submit_slider()
        } else {
            let index = self.option_state.selected().unwrap_or(0);
            self.session.choose_option(index)
        };

        if answered {
            self.option_state.select(Some(0));
            if self.session.show_results {
                self.show_flash("Analysis complete".to_string());
            }
        }
    }

    /// Answer by number key (1-based)
    pub fn choose_numbered(&mut self, n: usize) {
        if n == 0 || n > self.option_count() {
            return;
        }
        self.option_state.select(Some(n - 1));
        self.confirm();
    }

    pub fn reveal_results(&mut self) {
        self.session.reveal_results();
    }

    pub fn restart(&mut self) {
        self.session.reset();
        self.option_state.select(Some(0));
        self.show_flash("Quiz restarted".to_string());
    }

    pub fn start_email_input(&mut self) {
        self.input_mode = InputMode::EmailInput;
    }

    pub fn confirm_email_input(&mut self) {
        let msg = match self.session.submit_email() {
            Ok(lead) => format!("Saved: {} (score {})", lead.email, lead.score),
            Err(e) => format!("Error: {}", e),
        };
        self.show_flash(msg);
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_email_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn focus_lost(&mut self) {
        if let Some(intent) = self.exit_intent.as_mut() {
            intent.pointer_left();
        }
    }

    pub fn focus_gained(&mut self) {
        if let Some(intent) = self.exit_intent.as_mut() {
            intent.pointer_entered();
        }
    }

    /// Exit-intent timer fired
    pub fn exit_intent_fired(&mut self) {
        if self.input_mode == InputMode::Normal && self.session.trigger_exit_intent() {
            self.input_mode = InputMode::ExitIntent;
        }
    }

    pub fn accept_exit_intent(&mut self) {
        self.session.accept_exit_intent();
        self.input_mode = InputMode::Normal;
    }

    pub fn dismiss_exit_intent(&mut self) {
        self.session.dismiss_exit_intent();
        self.input_mode = InputMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_score_breakdown(&mut self) {
        if !self.session.result().breakdown.is_empty() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
