//! The game state machine.
//!
//! [`GameController::tick`] runs one step of the current state. Most steps
//! return after a single input sample; the en garde step runs its whole
//! randomized wait before returning, and discrete events end with short
//! settle pauses. All waiting goes through [`Clock::sleep_ms`].

use crate::config::Config;
use crate::hw::{Button, Clock, Display, Inputs, Outputs, RandomSource, Target};
use crate::menu::{Deflection, InputTracker, MenuOption, NavDebounce, Snapshot};
use crate::scoring::RoundOutcome;
use crate::screen;
use crate::session::Session;
use crate::tones::{self, Tone};

// --- Game states ---
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Menu,
    /// En garde: random wait with false start detection.
    Prepare,
    /// Target lit, waiting for the first press.
    Await,
    Result,
    GameOver,
    HighScore,
}

/// How the en garde wait ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum WaitOutcome {
    Elapsed,
    FalseStart,
    Cancelled,
}

pub struct GameController<D, I, O, C, R> {
    display: D,
    inputs: I,
    outputs: O,
    clock: C,
    rng: R,
    config: Config,

    session: Session,
    state: State,
    menu_option: MenuOption,
    menu_dirty: bool,
    nav: NavDebounce,
    tracker: InputTracker,

    current_target: Target,
    round_start_ms: u64,
    reaction_ms: u32,
    round_score: i32,
}

impl<D, I, O, C, R> GameController<D, I, O, C, R>
where
    D: Display,
    I: Inputs,
    O: Outputs,
    C: Clock,
    R: RandomSource,
{
    pub fn new(display: D, inputs: I, outputs: O, clock: C, rng: R, config: Config) -> Self {
        let session = Session::new(&config);
        Self {
            display,
            inputs,
            outputs,
            clock,
            rng,
            config,
            session,
            state: State::Menu,
            menu_option: MenuOption::Start,
            menu_dirty: true,
            nav: NavDebounce::default(),
            tracker: InputTracker::default(),
            current_target: Target::Left,
            round_start_ms: 0,
            reaction_ms: 0,
            round_score: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu_option(&self) -> MenuOption {
        self.menu_option
    }

    pub fn current_target(&self) -> Target {
        self.current_target
    }

    /// Reaction time of the last completed round.
    pub fn reaction_ms(&self) -> u32 {
        self.reaction_ms
    }

    /// Score of the last completed round.
    pub fn round_score(&self) -> i32 {
        self.round_score
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Title screen and jingle, then the menu.
    pub async fn boot(&mut self) {
        self.outputs.all_leds_off();
        screen::splash(&mut self.display);
        self.play_sequence(&tones::BOOT).await;
        self.clock.sleep_ms(self.config.splash_ms).await;
        self.redraw_menu();
        self.state = State::Menu;
        log::info!("Ready, {} rounds per game", self.session.total_rounds());
    }

    /// Advances the state machine by one step.
    pub async fn tick(&mut self) {
        match self.state {
            State::Menu => self.menu_step().await,
            State::Prepare => self.prepare_step().await,
            State::Await => self.await_step().await,
            State::Result => self.result_step().await,
            State::GameOver | State::HighScore => self.terminal_step().await,
        }
    }

    /// Resets round and score and enters en garde.
    pub fn start_new_game(&mut self) {
        self.session.start_new_game();
        self.state = State::Prepare;
        log::info!("Game start: {} rounds", self.session.total_rounds());
    }

    pub fn show_high_score(&mut self) {
        screen::high_score(&mut self.display, self.session.high_score());
        self.state = State::HighScore;
        log::info!("High score: {}", self.session.high_score());
    }

    // ==================== MENU ====================

    fn redraw_menu(&mut self) {
        screen::menu(&mut self.display, self.menu_option, self.session.total_rounds());
        self.menu_dirty = false;
    }

    async fn menu_step(&mut self) {
        if self.menu_dirty {
            self.redraw_menu();
        }

        let snap = self.tracker.sample(&mut self.inputs, &self.config);
        let now = self.clock.now_ms();

        if self.nav.ready(now, &self.config) {
            let moved = match snap.vertical {
                Deflection::Low => self.menu_option.up(),
                Deflection::High => self.menu_option.down(),
                Deflection::Neutral => None,
            };

            if let Some(next) = moved {
                self.menu_option = next;
                self.outputs.play_tone(tones::NAV.0, tones::NAV.1);
                self.redraw_menu();
                self.nav.accept(now);
            } else if self.menu_option == MenuOption::Rounds {
                let (delta, tone) = match snap.horizontal {
                    Deflection::High => (1, tones::ROUNDS_UP),
                    Deflection::Low => (-1, tones::ROUNDS_DOWN),
                    Deflection::Neutral => (0, tones::NAV),
                };
                if delta != 0 && self.session.adjust_rounds(delta, &self.config) {
                    self.outputs.play_tone(tone.0, tone.1);
                    self.redraw_menu();
                    self.nav.accept(now);
                }
            }
        }

        if snap.just_pressed(Button::Select) {
            self.play_sequence(&tones::CONFIRM).await;
            log::info!("Menu select: {:?}", self.menu_option);
            match self.menu_option {
                MenuOption::Start | MenuOption::Rounds => self.start_new_game(),
                MenuOption::HighScore => self.show_high_score(),
            }
            self.settle().await;
        }
    }

    // ==================== EN GARDE ====================

    async fn prepare_step(&mut self) {
        screen::en_garde(
            &mut self.display,
            self.session.current_round(),
            self.session.total_rounds(),
            self.session.total_score(),
        );
        self.outputs.all_leds_off();

        self.wait_all_released().await;

        let delay_ms = self
            .rng
            .range_inclusive(self.config.delay_min_ms, self.config.delay_max_ms);
        log::debug!("En garde for {} ms", delay_ms);

        match self.en_garde_wait(delay_ms).await {
            WaitOutcome::Elapsed => self.light_target(),
            WaitOutcome::FalseStart => self.false_start().await,
            WaitOutcome::Cancelled => self.cancel().await,
        }
    }

    /// Safety gate: blocks until no target button is held.
    async fn wait_all_released(&mut self) {
        loop {
            let snap = self.tracker.sample(&mut self.inputs, &self.config);
            if !any_target_pressed(&snap) {
                return;
            }
            self.clock.sleep_ms(self.config.gate_poll_ms).await;
        }
    }

    /// Waits `delay_ms`, checking for a false start or a cancel on every poll.
    async fn en_garde_wait(&mut self, delay_ms: u32) -> WaitOutcome {
        let start = self.clock.now_ms();
        loop {
            let snap = self.tracker.sample(&mut self.inputs, &self.config);
            if any_target_pressed(&snap) {
                return WaitOutcome::FalseStart;
            }
            if snap.just_pressed(Button::Select) {
                return WaitOutcome::Cancelled;
            }
            if self.clock.now_ms().saturating_sub(start) >= delay_ms as u64 {
                return WaitOutcome::Elapsed;
            }
            self.clock.sleep_ms(self.config.wait_poll_ms).await;
        }
    }

    fn light_target(&mut self) {
        let index = self.rng.range_inclusive(0, 2);
        let target = Target::from_index(index).unwrap_or(Target::Center);
        log::debug!("Target {}", target.name());

        screen::target(&mut self.display, target);
        self.outputs.set_led(target, true);
        self.outputs.play_tone(tones::GO.0, tones::GO.1);
        self.current_target = target;
        self.round_start_ms = self.clock.now_ms();
        self.state = State::Await;
    }

    /// Penalty, then the same round starts over.
    async fn false_start(&mut self) {
        self.session.apply_false_start(&self.config);
        self.outputs.play_tone(tones::ERROR.0, tones::ERROR.1);
        screen::false_start(&mut self.display, self.config.false_start_penalty);
        log::info!(
            "False start in round {}, total {}",
            self.session.current_round(),
            self.session.total_score()
        );
        self.clock.sleep_ms(self.config.penalty_pause_ms).await;
        self.state = State::Prepare;
    }

    /// Abandons the whole game.
    async fn cancel(&mut self) {
        self.outputs.all_leds_off();
        screen::cancelled(&mut self.display);
        self.outputs.play_tone(tones::CANCEL.0, tones::CANCEL.1);
        log::info!("Game cancelled in round {}", self.session.current_round());
        self.clock.sleep_ms(self.config.cancel_pause_ms).await;
        self.redraw_menu();
        self.state = State::Menu;
    }

    // ==================== AWAIT ====================

    async fn await_step(&mut self) {
        let snap = self.tracker.sample(&mut self.inputs, &self.config);
        let Some(pressed) = Target::ALL
            .into_iter()
            .find(|t| snap.pressed(Button::Target(*t)))
        else {
            return;
        };

        let elapsed = self.clock.now_ms().saturating_sub(self.round_start_ms);
        self.reaction_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.outputs.set_led(self.current_target, false);

        let outcome = if pressed == self.current_target {
            RoundOutcome::Hit {
                reaction_ms: self.reaction_ms,
            }
        } else {
            RoundOutcome::Miss {
                reaction_ms: self.reaction_ms,
            }
        };
        self.round_score = self.session.record_round(outcome, &self.config);
        let total = self.session.total_score();

        match outcome {
            RoundOutcome::Hit { reaction_ms } => {
                let celebrated = outcome.is_celebrated(&self.config);
                screen::hit(&mut self.display, reaction_ms, celebrated, total);
                if celebrated {
                    self.play_sequence(&tones::CELEBRATE).await;
                } else {
                    self.outputs.play_tone(tones::HIT.0, tones::HIT.1);
                }
                log::info!(
                    "Round {}: hit {} in {} ms, +{}",
                    self.session.current_round(),
                    pressed.name(),
                    reaction_ms,
                    self.round_score
                );
            }
            RoundOutcome::Miss { .. } => {
                screen::miss(&mut self.display, self.config.wrong_button_penalty, total);
                self.outputs.play_tone(tones::ERROR.0, tones::ERROR.1);
                log::info!(
                    "Round {}: pressed {} instead of {}, {}",
                    self.session.current_round(),
                    pressed.name(),
                    self.current_target.name(),
                    self.round_score
                );
            }
        }

        self.state = State::Result;
    }

    // ==================== RESULT ====================

    async fn result_step(&mut self) {
        self.clock.sleep_ms(self.config.result_pause_ms).await;
        self.outputs.all_leds_off();

        if self.session.advance_round() {
            self.state = State::Prepare;
        } else {
            self.finish_game().await;
        }
    }

    async fn finish_game(&mut self) {
        let total = self.session.total_score();
        if self.session.finalize() {
            screen::new_record(&mut self.display, total);
            self.play_sequence(&tones::FANFARE).await;
            log::info!("New high score: {}", total);
        } else {
            screen::game_over(&mut self.display, total);
            self.outputs.play_tone(tones::CLOSING.0, tones::CLOSING.1);
            log::info!("Game over: {} (best {})", total, self.session.high_score());
        }

        let stats = self.session.stats();
        log::info!(
            "Summary: {} hits, {} misses, {} false starts, best {:?} ms",
            stats.hits,
            stats.misses,
            stats.false_starts,
            stats.best_reaction_ms
        );
        self.state = State::GameOver;
    }

    // ==================== GAME OVER / HIGH SCORE ====================

    async fn terminal_step(&mut self) {
        let snap = self.tracker.sample(&mut self.inputs, &self.config);
        if snap.just_pressed(Button::Select) || snap.just_pressed(Button::Target(Target::Center)) {
            self.outputs.play_tone(tones::CONFIRM[0].0, tones::CONFIRM[0].1);
            self.menu_option = MenuOption::Start;
            self.redraw_menu();
            self.state = State::Menu;
            self.settle().await;
        }
    }

    // ==================== HELPERS ====================

    /// Short pause after a discrete action so it does not retrigger.
    async fn settle(&mut self) {
        self.clock.sleep_ms(self.config.settle_ms).await;
    }

    async fn play_sequence(&mut self, notes: &[Tone]) {
        for &(freq, dur) in notes {
            self.outputs.play_tone(freq, dur);
            self.clock.sleep_ms(dur as u32 + tones::NOTE_GAP_MS).await;
        }
    }
}

fn any_target_pressed(snap: &Snapshot) -> bool {
    Target::ALL.iter().any(|t| snap.pressed(Button::Target(*t)))
}
