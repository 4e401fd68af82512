use std::fmt;

/// The three fixed timer presets.
///
/// The preset mapping is exhaustive over the enum, so an unmapped mode
/// cannot exist at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Starting minute count for this mode.
    pub fn preset_minutes(&self) -> u16 {
        match self {
            Mode::Focus => 25,
            Mode::ShortBreak => 5,
            Mode::LongBreak => 15,
        }
    }

    /// Human-readable label for the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// All modes in selector order.
    pub fn all() -> [Mode; 3] {
        [Mode::Focus, Mode::ShortBreak, Mode::LongBreak]
    }

    /// The mode after this one in selector order, wrapping around.
    pub fn next(&self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak => Mode::LongBreak,
            Mode::LongBreak => Mode::Focus,
        }
    }
}

/// The countdown being displayed to the user.
///
/// All mutation goes through `toggle`, `switch_mode`, `reset` and `tick`;
/// every one of them is total, so there is nothing to return but `()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub mode: Mode,
    pub minutes: u16,
    pub seconds: u16,
    pub running: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            mode: Mode::Focus,
            minutes: Mode::Focus.preset_minutes(),
            seconds: 0,
            running: false,
        }
    }

    /// Flips between running and paused. No other field changes; starting
    /// at 0:00 is allowed and the next tick performs the rollover.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stops the countdown and loads the preset for `mode`.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.running = false;
        self.mode = mode;
        self.minutes = mode.preset_minutes();
        self.seconds = 0;
    }

    /// Stops the countdown and reloads the current mode's preset.
    pub fn reset(&mut self) {
        self.running = false;
        self.minutes = self.mode.preset_minutes();
        self.seconds = 0;
    }

    /// Advances the countdown by one second. Called by the event loop on
    /// each tick while running; a no-op while paused so a stray tick from
    /// a just-disarmed driver cannot decrement a paused clock.
    ///
    /// On reaching 0:00 the timer stops and rearms to the current mode's
    /// preset. No alarm is raised; expiry is a silent state change.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.running = false;
            self.minutes = self.mode.preset_minutes();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl fmt::Display for Timer {
    /// Renders the remaining time as two zero-padded fields, `MM:SS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
