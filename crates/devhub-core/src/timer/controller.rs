//! Routes user commands to the timer and timer events to the sinks.

use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::duration::Hms;
use super::engine::{CountdownTimer, TimerState};
use crate::events::Event;
use crate::sinks::{DisplaySink, InputSource, NotificationSink, Severity};

pub const MSG_NO_DURATION: &str = "Please set a time first!";
pub const MSG_COMPLETED: &str = "Timer completed!";

/// A discrete user action or the periodic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Start from Idle or resume from Paused.
    Start,
    Pause,
    Reset,
    Tick,
}

/// Owns one countdown timer plus the collaborators it reports to.
pub struct TimerController<I, D, N, C: Clock = SystemClock> {
    timer: CountdownTimer<C>,
    input: I,
    display: D,
    notifier: N,
}

impl<I, D, N, C> TimerController<I, D, N, C>
where
    I: InputSource,
    D: DisplaySink,
    N: NotificationSink,
    C: Clock,
{
    /// Wraps `timer` and paints the initial display.
    pub fn new(timer: CountdownTimer<C>, input: I, display: D, notifier: N) -> Self {
        let mut controller = Self {
            timer,
            input,
            display,
            notifier,
        };
        controller.refresh();
        controller
    }

    pub fn timer(&self) -> &CountdownTimer<C> {
        &self.timer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    /// True while the periodic tick should be armed.
    pub fn wants_ticks(&self) -> bool {
        self.timer.is_running()
    }

    pub fn handle(&mut self, command: Command) -> Option<Event> {
        let event = match command {
            Command::Start => {
                let input = &self.input;
                self.timer.start(|| input.requested_duration())
            }
            Command::Pause => self.timer.pause(),
            Command::Reset => Some(self.timer.reset()),
            Command::Tick => self.timer.tick(),
        };
        if let Some(ref e) = event {
            self.apply(e);
        }
        event
    }

    /// Repaint the display from the current timer state.
    pub fn refresh(&mut self) {
        self.render_remaining();
        self.display.set_status(self.timer.state().label());
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::StartRejected { .. } => {
                self.notifier.notify(MSG_NO_DURATION, Severity::Warning);
            }
            Event::TimerTicked { .. } => self.render_remaining(),
            Event::TimerCompleted { .. } => {
                self.refresh();
                self.notifier.notify(MSG_COMPLETED, Severity::Success);
                self.notifier.play_cue();
            }
            Event::TimerStarted { .. }
            | Event::TimerResumed { .. }
            | Event::TimerPaused { .. }
            | Event::TimerReset { .. }
            | Event::StateSnapshot { .. } => self.refresh(),
        }
    }

    fn render_remaining(&mut self) {
        let Hms {
            hours,
            minutes,
            seconds,
        } = self.timer.remaining_hms();
        self.display.render(hours, minutes, seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;
    use crate::timer::RequestedDuration;

    #[derive(Default)]
    struct Screen {
        frames: Vec<String>,
        status: String,
    }

    impl DisplaySink for Screen {
        fn render(&mut self, hours: u64, minutes: u64, seconds: u64) {
            self.frames.push(format!("{hours:02}:{minutes:02}:{seconds:02}"));
        }

        fn set_status(&mut self, label: &str) {
            self.status = label.to_string();
        }
    }

    #[derive(Default)]
    struct Inbox {
        messages: Vec<(String, Severity)>,
        cues: usize,
    }

    impl NotificationSink for Inbox {
        fn notify(&mut self, message: &str, severity: Severity) {
            self.messages.push((message.to_string(), severity));
        }

        fn play_cue(&mut self) {
            self.cues += 1;
        }
    }

    fn controller(
        requested: RequestedDuration,
    ) -> (TimerController<RequestedDuration, Screen, Inbox, ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let timer = CountdownTimer::with_clock(clock.clone());
        (
            TimerController::new(timer, requested, Screen::default(), Inbox::default()),
            clock,
        )
    }

    #[test]
    fn initial_display_is_zero_and_ready() {
        let (c, _) = controller(RequestedDuration::new(0, 0, 5));
        assert_eq!(c.display().frames, vec!["00:00:00"]);
        assert_eq!(c.display().status, "Ready");
    }

    #[test]
    fn zero_start_warns_once_without_repaint() {
        let (mut c, _) = controller(RequestedDuration::default());
        c.handle(Command::Start);
        assert_eq!(c.state(), TimerState::Idle);
        assert_eq!(
            c.notifier().messages,
            vec![(MSG_NO_DURATION.to_string(), Severity::Warning)]
        );
        assert_eq!(c.display().frames.len(), 1);
    }

    #[test]
    fn start_renders_full_duration() {
        let (mut c, _) = controller(RequestedDuration::new(1, 2, 3));
        c.handle(Command::Start);
        assert_eq!(c.display().frames.last().unwrap(), "01:02:03");
        assert_eq!(c.display().status, "Running");
        assert!(c.wants_ticks());
    }

    #[test]
    fn pause_and_reset_update_status() {
        let (mut c, clock) = controller(RequestedDuration::new(0, 0, 30));
        c.handle(Command::Start);
        clock.advance_secs(10);
        c.handle(Command::Pause);
        assert_eq!(c.display().status, "Paused");
        assert_eq!(c.display().frames.last().unwrap(), "00:00:20");
        assert!(!c.wants_ticks());

        c.handle(Command::Reset);
        assert_eq!(c.display().status, "Ready");
        assert_eq!(c.display().frames.last().unwrap(), "00:00:00");
    }

    #[test]
    fn completion_notifies_success_and_plays_cue() {
        let (mut c, clock) = controller(RequestedDuration::new(0, 0, 5));
        c.handle(Command::Start);
        clock.advance_secs(3);
        c.handle(Command::Tick);
        assert_eq!(c.display().frames.last().unwrap(), "00:00:02");
        clock.advance_secs(2);
        assert!(matches!(c.handle(Command::Tick), Some(Event::TimerCompleted { .. })));
        assert_eq!(c.state(), TimerState::Idle);
        assert_eq!(c.display().status, "Ready");
        assert_eq!(c.display().frames.last().unwrap(), "00:00:00");
        assert_eq!(
            c.notifier().messages,
            vec![(MSG_COMPLETED.to_string(), Severity::Success)]
        );
        assert_eq!(c.notifier().cues, 1);
    }

    #[test]
    fn tick_while_idle_touches_nothing() {
        let (mut c, _) = controller(RequestedDuration::new(0, 0, 5));
        assert!(c.handle(Command::Tick).is_none());
        assert_eq!(c.display().frames.len(), 1);
    }
}
