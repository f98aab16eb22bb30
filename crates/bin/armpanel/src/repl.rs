//! Terminal surface — one line per operator action.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use armpanel_adapter_console::Console;
use armpanel_app::ports::{Confirm, Transport};
use armpanel_app::services::dispatcher::CommandDispatcher;
use armpanel_domain::command::{JogDirection, PowerState};
use armpanel_domain::error::ParseError;
use armpanel_domain::step::StepSize;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::Mutex;

pub const HELP: &str = "\
commands:
  step <n>               select jog step size (degrees)
  jog <dir>              up | down | left | right | z_up | z_down
  target <b> <y> <z>     fill the target inputs
  move [<b> <y> <z>]     move to the target inputs (optionally filling them first)
  goto <b> <y> <z>       move to a preset position
  open | close           gripper
  force <v> | speed <v>  gripper force / speed in percent
  power on|off           motor power
  home | reset           return to home position
  estop                  emergency stop (asks for confirmation)
  pick | calibrate | test  run a sequence
  save                   remember the current readouts
  status                 read the device status now
  connect [port] | disconnect  serial bridge link
  help | quit";

/// A parsed terminal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Step(StepSize),
    Jog(JogDirection),
    Target([String; 3]),
    Move(Option<[String; 3]>),
    Goto([i64; 3]),
    Open,
    Close,
    Force(String),
    Speed(String),
    Power(PowerState),
    Home,
    Reset,
    EmergencyStop,
    Pick,
    Calibrate,
    Test,
    Save,
    Status,
    Connect(Option<String>),
    Disconnect,
    Help,
    Quit,
}

/// Why a line could not be turned into an [`Action`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0:?} is not a whole number")]
    NotANumber(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ActionError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();
        let name = name.to_ascii_lowercase();

        let action = match (name.as_str(), args.as_slice()) {
            ("step", [n]) => Self::Step(n.parse()?),
            ("step", _) => return Err(ActionError::Usage("step <n>")),
            ("jog", [dir]) => Self::Jog(dir.parse()?),
            ("jog", _) => return Err(ActionError::Usage("jog <dir>")),
            ("target", [b, y, z]) => Self::Target(owned([b, y, z])),
            ("target", _) => return Err(ActionError::Usage("target <b> <y> <z>")),
            ("move", []) => Self::Move(None),
            ("move", [b, y, z]) => Self::Move(Some(owned([b, y, z]))),
            ("move", _) => return Err(ActionError::Usage("move [<b> <y> <z>]")),
            ("goto", [b, y, z]) => Self::Goto([whole(b)?, whole(y)?, whole(z)?]),
            ("goto", _) => return Err(ActionError::Usage("goto <b> <y> <z>")),
            ("open", []) => Self::Open,
            ("close", []) => Self::Close,
            ("force", [v]) => Self::Force((*v).to_string()),
            ("force", _) => return Err(ActionError::Usage("force <v>")),
            ("speed", [v]) => Self::Speed((*v).to_string()),
            ("speed", _) => return Err(ActionError::Usage("speed <v>")),
            ("power", [state]) => Self::Power(state.parse()?),
            ("power", _) => return Err(ActionError::Usage("power on|off")),
            ("home", []) => Self::Home,
            ("reset", []) => Self::Reset,
            ("estop", []) => Self::EmergencyStop,
            ("pick", []) => Self::Pick,
            ("calibrate", []) => Self::Calibrate,
            ("test", []) => Self::Test,
            ("save", []) => Self::Save,
            ("status", []) => Self::Status,
            ("connect", []) => Self::Connect(None),
            ("connect", [port]) => Self::Connect(Some((*port).to_string())),
            ("connect", _) => return Err(ActionError::Usage("connect [port]")),
            ("disconnect", []) => Self::Disconnect,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(ActionError::Unknown(line.trim().to_string())),
        };
        Ok(action)
    }
}

fn owned(words: [&&str; 3]) -> [String; 3] {
    words.map(|w| (*w).to_string())
}

fn whole(raw: &str) -> Result<i64, ActionError> {
    raw.parse()
        .map_err(|_| ActionError::NotANumber(raw.to_string()))
}

/// Whether the loop keeps reading after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Carry out one action against the device.
pub async fn run<T, C>(
    dispatcher: &mut CommandDispatcher<T, C>,
    action: Action,
    console: &Console,
) -> Flow
where
    T: Transport,
    C: Confirm,
{
    match action {
        Action::Step(step) => {
            dispatcher.set_step_size(step).await;
        }
        Action::Jog(direction) => {
            dispatcher.jog(direction).await;
        }
        Action::Target([b, y, z]) => dispatcher.enter_targets(&b, &y, &z),
        Action::Move(targets) => {
            if let Some([b, y, z]) = targets {
                dispatcher.enter_targets(&b, &y, &z);
            }
            dispatcher.move_to_position().await;
        }
        Action::Goto([b, y, z]) => {
            dispatcher.go_to_position(b, y, z).await;
        }
        Action::Open => {
            dispatcher.gripper_open().await;
        }
        Action::Close => {
            dispatcher.gripper_close().await;
        }
        Action::Force(raw) => {
            dispatcher.update_gripper_force(&raw).await;
        }
        Action::Speed(raw) => {
            dispatcher.update_speed(&raw).await;
        }
        Action::Power(PowerState::On) => {
            dispatcher.power_on().await;
        }
        Action::Power(PowerState::Off) => {
            dispatcher.power_off().await;
        }
        Action::Home => {
            dispatcher.home_position().await;
        }
        Action::Reset => {
            dispatcher.reset_position().await;
        }
        Action::EmergencyStop => {
            dispatcher.emergency_stop().await;
        }
        Action::Pick => {
            dispatcher.pick_and_place().await;
        }
        Action::Calibrate => {
            dispatcher.calibrate().await;
        }
        Action::Test => {
            dispatcher.test_sequence().await;
        }
        Action::Save => {
            dispatcher.save_current_position();
        }
        Action::Status => {
            if let Some(payload) = dispatcher.refresh_status().await {
                let status = payload.status();
                console.println(&format!(
                    "connected: {}, powered: {}",
                    status.connected, status.powered
                ));
            }
        }
        Action::Connect(port) => {
            dispatcher.connect(port).await;
        }
        Action::Disconnect => {
            dispatcher.disconnect().await;
        }
        Action::Help => console.println(HELP),
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Read and carry out commands until `quit`, end of input or `shutdown`.
///
/// `shutdown` is raced against the read and against the action in flight,
/// so it also interrupts a request or a pending confirmation.
///
/// # Errors
///
/// Returns the underlying I/O error if reading a command fails.
pub async fn drive<R, T, C>(
    lines: &Mutex<Lines<R>>,
    dispatcher: &mut CommandDispatcher<T, C>,
    console: &Console,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    T: Transport,
    C: Confirm,
{
    tokio::pin!(shutdown);
    loop {
        let line = tokio::select! {
            line = next_line(lines) => line?,
            () = &mut shutdown => {
                tracing::info!("interrupted");
                return Ok(());
            }
        };
        let Some(line) = line else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                console.println(&format!("{err} (type `help` for commands)"));
                continue;
            }
        };
        let flow = tokio::select! {
            flow = run(dispatcher, action, console) => flow,
            () = &mut shutdown => {
                tracing::info!("interrupted");
                return Ok(());
            }
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

/// Input lines shared by the command loop and the confirmation prompt.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

/// Read the next line, or `None` at end of input.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub async fn next_line<R>(lines: &Mutex<Lines<R>>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    lines.lock().await.next_line().await
}

/// Asks yes/no questions on the console and reads the answer from the next
/// input line.
pub struct LinePrompt<R> {
    lines: SharedLines<R>,
    console: Console,
}

impl<R> LinePrompt<R> {
    pub fn new(lines: SharedLines<R>, console: Console) -> Self {
        Self { lines, console }
    }
}

impl<R> Confirm for LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, prompt: &str) -> bool {
        self.console.println(&format!("{prompt} [y/N]"));
        match next_line(&*self.lines).await {
            Ok(Some(answer)) => {
                matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}
