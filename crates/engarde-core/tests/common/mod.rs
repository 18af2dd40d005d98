//! Simulated board: virtual clock, scripted inputs, recorded outputs.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_futures::block_on;
use engarde::{
    Axis, Button, Clock, Config, GameController, Inputs, Outputs, RandomSource, State, Target,
    TextGrid,
};

pub type Game = GameController<TextGrid, SimInputs, RecordingOutputs, SimClock, ScriptedRng>;

pub struct SimClock {
    now: Rc<Cell<u64>>,
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    async fn sleep_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + ms as u64);
    }
}

/// Input activity as half-open time windows `[from, to)`.
#[derive(Default)]
pub struct Script {
    presses: Vec<(Button, u64, u64)>,
    axes: Vec<(Axis, u16, u64, u64)>,
}

pub struct SimInputs {
    now: Rc<Cell<u64>>,
    script: Rc<RefCell<Script>>,
}

impl Inputs for SimInputs {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        let now = self.now.get();
        self.script
            .borrow()
            .axes
            .iter()
            .rev()
            .find(|(a, _, from, to)| *a == axis && (*from..*to).contains(&now))
            .map(|(_, value, _, _)| *value)
            .unwrap_or(512)
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        let now = self.now.get();
        self.script
            .borrow()
            .presses
            .iter()
            .any(|(b, from, to)| *b == button && (*from..*to).contains(&now))
    }
}

#[derive(Default)]
pub struct OutputLog {
    pub leds: [bool; 3],
    /// (time, frequency, duration)
    pub tones: Vec<(u64, u16, u16)>,
    pub max_lit: usize,
}

impl OutputLog {
    pub fn lit(&self) -> usize {
        self.leds.iter().filter(|on| **on).count()
    }

    pub fn tones_since(&self, t: u64) -> Vec<(u16, u16)> {
        self.tones
            .iter()
            .filter(|(at, _, _)| *at >= t)
            .map(|(_, f, d)| (*f, *d))
            .collect()
    }
}

pub struct RecordingOutputs {
    now: Rc<Cell<u64>>,
    log: Rc<RefCell<OutputLog>>,
}

impl Outputs for RecordingOutputs {
    fn set_led(&mut self, target: Target, on: bool) {
        let mut log = self.log.borrow_mut();
        log.leds[target.index()] = on;
        let lit = log.lit();
        log.max_lit = log.max_lit.max(lit);
    }

    fn play_tone(&mut self, freq_hz: u16, duration_ms: u16) {
        self.log
            .borrow_mut()
            .tones
            .push((self.now.get(), freq_hz, duration_ms));
    }
}

/// Hands out queued values, clamped into the requested range.
pub struct ScriptedRng {
    queue: Rc<RefCell<VecDeque<u32>>>,
    asked: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.asked.borrow_mut().push((lo, hi));
        self.queue
            .borrow_mut()
            .pop_front()
            .map(|v| v.clamp(lo, hi))
            .unwrap_or(lo)
    }
}

/// Test-side handles into the simulated board.
pub struct Rig {
    time: Rc<Cell<u64>>,
    script: Rc<RefCell<Script>>,
    pub out: Rc<RefCell<OutputLog>>,
    random: Rc<RefCell<VecDeque<u32>>>,
    /// Every (lo, hi) range the game asked for.
    pub asked: Rc<RefCell<Vec<(u32, u32)>>>,
}

pub fn rig() -> (Game, Rig) {
    rig_with(Config::DEFAULT)
}

pub fn rig_with(config: Config) -> (Game, Rig) {
    let time = Rc::new(Cell::new(10_000));
    let script = Rc::new(RefCell::new(Script::default()));
    let out = Rc::new(RefCell::new(OutputLog::default()));
    let random = Rc::new(RefCell::new(VecDeque::new()));
    let asked = Rc::new(RefCell::new(Vec::new()));

    let game = GameController::new(
        TextGrid::new(),
        SimInputs {
            now: time.clone(),
            script: script.clone(),
        },
        RecordingOutputs {
            now: time.clone(),
            log: out.clone(),
        },
        SimClock { now: time.clone() },
        ScriptedRng {
            queue: random.clone(),
            asked: asked.clone(),
        },
        config,
    );

    (
        game,
        Rig {
            time,
            script,
            out,
            random,
            asked,
        },
    )
}

impl Rig {
    pub fn now(&self) -> u64 {
        self.time.get()
    }

    pub fn advance(&self, ms: u64) {
        self.time.set(self.time.get() + ms);
    }

    /// Holds `button` from `at` for `duration` ms.
    pub fn press_at(&self, button: Button, at: u64, duration: u64) {
        self.script
            .borrow_mut()
            .presses
            .push((button, at, at + duration));
    }

    /// Holds `button` starting `delay` ms from now.
    pub fn press_in(&self, button: Button, delay: u64, duration: u64) {
        self.press_at(button, self.now() + delay, duration);
    }

    pub fn hold_axis(&self, axis: Axis, value: u16, duration: u64) {
        let now = self.now();
        self.script
            .borrow_mut()
            .axes
            .push((axis, value, now, now + duration));
    }

    pub fn release_axes(&self) {
        let now = self.now();
        for (_, _, _, to) in self.script.borrow_mut().axes.iter_mut() {
            *to = (*to).min(now);
        }
    }

    /// Queues values for the next random draws (delay, then target).
    pub fn queue_random(&self, values: &[u32]) {
        self.random.borrow_mut().extend(values.iter().copied());
    }

    pub fn lit(&self) -> usize {
        self.out.borrow().lit()
    }
}

pub fn tick(game: &mut Game, rig: &Rig) {
    block_on(game.tick());
    let out = rig.out.borrow();
    assert!(out.max_lit <= 1, "more than one target LED lit");
    if game.state() != State::Await {
        assert_eq!(out.lit(), 0, "LED lit outside Await ({:?})", game.state());
    }
}

/// Ticks until `state` is reached, advancing time by `step` ms whenever a
/// tick leaves the state unchanged. Returns the number of ticks taken.
pub fn run_until(game: &mut Game, rig: &Rig, state: State, step: u64) -> usize {
    for n in 1..=10_000 {
        let before = game.state();
        tick(game, rig);
        if game.state() == state {
            return n;
        }
        if game.state() == before {
            rig.advance(step);
        }
    }
    panic!("never reached {:?}, stuck in {:?}", state, game.state());
}

/// Presses select long enough for one menu tick to see it.
pub fn select(game: &mut Game, rig: &Rig) {
    rig.press_in(Button::Select, 0, 50);
    tick(game, rig);
}

/// Selects the Rounds row and steps it to `rounds`.
pub fn set_rounds(game: &mut Game, rig: &Rig, rounds: u8) {
    let debounce = game.config().nav_debounce_ms;
    rig.hold_axis(Axis::Vertical, 1023, 10);
    tick(game, rig);
    rig.release_axes();
    rig.advance(debounce);

    while game.session().total_rounds() != rounds {
        let value = if game.session().total_rounds() > rounds { 0 } else { 1023 };
        rig.hold_axis(Axis::Horizontal, value, 10);
        tick(game, rig);
        rig.release_axes();
        rig.advance(debounce);
    }
}

/// Starts a game from the menu; the next tick runs en garde.
pub fn start_game(game: &mut Game, rig: &Rig) {
    tick(game, rig);
    select(game, rig);
    assert_eq!(game.state(), State::Prepare);
}

/// Runs en garde with the given delay and target; ends in Await.
pub fn en_garde(game: &mut Game, rig: &Rig, delay: u32, target: Target) {
    rig.queue_random(&[delay, target.index() as u32]);
    tick(game, rig);
    assert_eq!(game.state(), State::Await);
    assert_eq!(game.current_target(), target);
}

/// Presses `button` `reaction` ms after the target lit; ends in Result.
pub fn react(game: &mut Game, rig: &Rig, button: Target, reaction: u64) {
    rig.press_in(Button::Target(button), reaction, 100);
    run_until(game, rig, State::Result, 1);
}

/// Plays one full round and moves past its result.
pub fn play_round(game: &mut Game, rig: &Rig, target: Target, pressed: Target, reaction: u64) {
    en_garde(game, rig, 1000, target);
    react(game, rig, pressed, reaction);
    tick(game, rig);
}
