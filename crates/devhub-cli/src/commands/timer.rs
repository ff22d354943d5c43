use clap::Subcommand;
use devhub_core::{
    Command, Config, CountdownTimer, Event, Preset, RequestedDuration, Store, StoredInputs,
    TimerController,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Split};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::terminal::{TerminalDisplay, TerminalNotifier};

const HELP: &str = "keys: s = start/resume, p = pause, r = reset, set H M S, q = quit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown interactively (commands on stdin)
    Run {
        /// Print events as JSON lines instead of drawing the display
        #[arg(long)]
        json: bool,
    },
    /// Save the requested duration
    Set {
        #[arg(long, default_value = "0")]
        hours: u32,
        #[arg(long, default_value = "0")]
        minutes: u32,
        #[arg(long, default_value = "0")]
        seconds: u32,
    },
    /// Apply a preset duration in minutes and save it
    Preset {
        minutes: u32,
    },
    /// List configured presets
    Presets,
    /// Print the saved duration as JSON
    Show,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { json } => {
            let config = Config::load_or_default();
            let store = Store::open()?;
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(run_loop(&store, &config, json))?;
        }
        TimerAction::Set {
            hours,
            minutes,
            seconds,
        } => {
            let store = Store::open()?;
            let inputs = RequestedDuration::new(hours, minutes, seconds);
            store.save_timer_inputs(&inputs)?;
            println!("{}", serde_json::to_string_pretty(&inputs)?);
        }
        TimerAction::Preset { minutes } => {
            let store = Store::open()?;
            let inputs = Preset::from_minutes(minutes).duration();
            store.save_timer_inputs(&inputs)?;
            println!("{}", serde_json::to_string_pretty(&inputs)?);
        }
        TimerAction::Presets => {
            let config = Config::load_or_default();
            for preset in &config.timer.presets {
                let d = preset.duration();
                println!("{:>4} min  ({}h {:02}m)", preset.minutes, d.hours, d.minutes);
            }
        }
        TimerAction::Show => {
            let store = Store::open()?;
            let inputs = store.load_timer_inputs()?;
            println!("{}", serde_json::to_string_pretty(&inputs)?);
        }
    }
    Ok(())
}

/// One line typed by the user.
#[derive(Debug, PartialEq, Eq)]
enum LineCommand {
    Timer(Command),
    Set(RequestedDuration),
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Option<LineCommand> {
    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let cmd = match head.as_str() {
        "s" | "start" | "resume" => LineCommand::Timer(Command::Start),
        "p" | "pause" => LineCommand::Timer(Command::Pause),
        "r" | "reset" => LineCommand::Timer(Command::Reset),
        "q" | "quit" | "exit" => LineCommand::Quit,
        "h" | "help" | "?" => LineCommand::Help,
        "set" => {
            // Unparseable fields count as zero.
            let mut field = || words.next().and_then(|w| w.parse::<u32>().ok()).unwrap_or(0);
            let (h, m, s) = (field(), field(), field());
            LineCommand::Set(RequestedDuration::new(h, m, s))
        }
        other => LineCommand::Unknown(other.to_string()),
    };
    Some(cmd)
}

enum Input {
    Tick,
    Line(Option<String>),
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Next stdin line. Bytes that are not UTF-8 are replaced rather than
/// failing the read, so stray input cannot stop a running countdown.
async fn next_line<R>(lines: &mut Split<R>, open: bool) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    if !open {
        return std::future::pending().await;
    }
    Ok(lines.next_segment().await?.map(decode_line))
}

fn decode_line(bytes: Vec<u8>) -> String {
    let line = String::from_utf8_lossy(&bytes);
    line.strip_suffix('\r').unwrap_or(&line[..]).to_string()
}

fn emit(event: &Event, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

/// Single-threaded event loop: stdin commands and the one-second tick.
///
/// Once stdin closes the loop keeps ticking until the timer stops running,
/// so `echo s | devhub timer run` counts down to completion.
async fn run_loop(
    store: &Store,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = config.tick_interval();
    if !json {
        eprintln!("{HELP}");
    }
    let mut controller = TimerController::new(
        CountdownTimer::new(),
        StoredInputs::new(store),
        TerminalDisplay::new(json),
        TerminalNotifier::new(&config.notifications),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut stdin_open = true;
    let mut ticker: Option<Interval> = None;

    loop {
        let input = tokio::select! {
            _ = next_tick(&mut ticker) => Input::Tick,
            line = next_line(&mut lines, stdin_open) => Input::Line(line?),
        };

        let event = match input {
            Input::Tick => controller.handle(Command::Tick),
            Input::Line(None) => {
                debug!("stdin closed");
                stdin_open = false;
                None
            }
            Input::Line(Some(line)) => match parse_line(&line) {
                None => None,
                Some(LineCommand::Timer(cmd)) => controller.handle(cmd),
                Some(LineCommand::Set(inputs)) => {
                    controller.input().set(&inputs)?;
                    debug!(?inputs, "timer inputs saved");
                    None
                }
                Some(LineCommand::Help) => {
                    eprintln!("\n{HELP}");
                    None
                }
                Some(LineCommand::Quit) => break,
                Some(LineCommand::Unknown(word)) => {
                    eprintln!("\nunknown command: {word} ({HELP})");
                    None
                }
            },
        };

        if let Some(ref e) = event {
            emit(e, json)?;
        }

        match (controller.wants_ticks(), ticker.is_some()) {
            (true, false) => {
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker = Some(interval);
            }
            (false, true) => ticker = None,
            _ => {}
        }

        if !stdin_open && !controller.wants_ticks() {
            break;
        }
    }

    controller.display().finish();
    Ok(())
}
