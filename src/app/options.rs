use std::time::Duration;

use crate::form::ChoiceLimits;

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    pub limits: ChoiceLimits,
    pub keep_rejected_input: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            confirm_exit: true,
            show_help: true,
            limits: ChoiceLimits::default(),
            keep_rejected_input: false,
        }
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_limits(mut self, limits: ChoiceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_choices(mut self, max_choices: usize) -> Self {
        self.limits.max_choices = max_choices;
        self
    }

    pub fn with_max_choice_length(mut self, max_length: usize) -> Self {
        self.limits.max_length = max_length;
        self
    }

    pub fn with_keep_rejected_input(mut self, keep: bool) -> Self {
        self.keep_rejected_input = keep;
        self
    }
}
