use std::io::Write;

use clap::Subcommand;
use focustimer_core::{
    Clock, Config, Event, LogNotifier, Notifier, NotifyError, PersistenceSink, SessionKind,
    SessionOrchestrator, SystemClock, Ticker,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{load_history, print_json, CliResult};

const HELP: &str = "commands: g start/resume · p pause · r resume · s skip · x reset · q quit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground, reading commands from stdin
    Run {
        /// Start with a break instead of work
        #[arg(long = "break")]
        start_break: bool,
        /// Exit after the first finished session
        #[arg(long)]
        once: bool,
    },
    /// Print current durations and today's progress as JSON
    Status,
}

/// Completion message on stderr, optionally with the terminal bell.
struct TerminalNotifier {
    enabled: bool,
    bell: bool,
}

impl TerminalNotifier {
    fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.notifications.enabled,
            bell: config.notifications.bell,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify_completion(&mut self, kind: SessionKind) -> Result<(), NotifyError> {
        if !self.enabled {
            return Ok(());
        }
        let mut err = std::io::stderr().lock();
        writeln!(err, "\n{kind} finished, {} is next (g to start)", kind.opposite())?;
        if self.bell {
            write!(err, "\x07")?;
        }
        err.flush()?;
        Ok(())
    }
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(action: TimerAction, config: &Config) -> CliResult {
    match action {
        TimerAction::Run { start_break, once } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let result = runtime.block_on(run_loop(config, start_break, once));
            // A pending stdin read would otherwise hold shutdown until the next line.
            runtime.shutdown_background();
            result
        }
        TimerAction::Status => {
            let (store, policy, log) = load_history(config)?;
            let orch =
                SessionOrchestrator::with_state(policy, log, store, LogNotifier, SystemClock);
            print_json(&orch.status())
        }
    }
}

async fn run_loop(config: &Config, start_break: bool, once: bool) -> CliResult {
    // Refuse to start on a store that would be overwritten by the first record.
    let (store, policy, log) = load_history(config)?;
    let notifier = TerminalNotifier::from_config(config);
    let mut orch = SessionOrchestrator::with_state(policy, log, store, notifier, SystemClock);

    let mut label = "idle";
    orch.subscribe(move |event| match event {
        Event::ModeChanged { to, .. } => label = to.label(),
        Event::Tick { remaining_secs } => {
            eprint!("\r{label:<6} {}", format_remaining(*remaining_secs));
        }
        _ => {}
    });

    if start_break {
        orch.start_break()?;
    } else {
        orch.start_or_resume()?;
    }
    eprintln!("{HELP}");

    let mut ticker = Ticker::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let recorded = orch.log().len();
        tokio::select! {
            _ = ticker.tick() => orch.tick()?,
            line = lines.next_line(), if stdin_open => match line? {
                Some(command) => {
                    if let Flow::Quit = apply(&mut orch, command.trim())? {
                        break;
                    }
                }
                None => {
                    debug!("stdin closed");
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }

        if orch.log().len() > recorded {
            print_json(&orch.status())?;
            if once {
                break;
            }
        }
        if !stdin_open && !orch.is_ticking() && !orch.mode().is_paused() {
            break;
        }
    }

    eprintln!();
    Ok(())
}

fn apply<S, N, C>(
    orch: &mut SessionOrchestrator<S, N, C>,
    command: &str,
) -> Result<Flow, Box<dyn std::error::Error>>
where
    S: PersistenceSink,
    N: Notifier,
    C: Clock,
{
    debug!(command, "stdin command");
    match command {
        "g" => orch.start_or_resume()?,
        "p" => {
            if !orch.pause() {
                eprintln!("nothing running");
            }
        }
        "r" => {
            if !orch.resume() {
                eprintln!("not paused");
            }
        }
        "s" => orch.skip()?,
        "x" => {
            orch.reset();
            eprintln!("reset");
        }
        "q" => return Ok(Flow::Quit),
        "" => {}
        "h" | "?" => eprintln!("{HELP}"),
        other => eprintln!("unknown command '{other}'\n{HELP}"),
    }
    Ok(Flow::Continue)
}

fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
