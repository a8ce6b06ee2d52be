//! Line-oriented console commands and their text rendering.
//!
//! Each stdin line is one command. Parsing is pure so it can be tested
//! without a runtime; `main` owns the I/O and the session handle.

use dreamstory_core::actions::InteractionOutcome;
use dreamstory_core::catalog::{ObjectView, Usability};
use dreamstory_core::clock::format_clock;
use dreamstory_core::config::SpeedConfig;
use dreamstory_core::session::{Intent, IntentOutcome};
use dreamstory_types::{GameState, NeedLevel, ObjectId, Room};

use crate::error::CommandError;

/// Shown for `help`.
pub const HELP: &str = "\
commands:
  interact <id>   use an object (see `objects`)
  room <room>     go to bedroom, living, kitchen, gym or bathroom
  play            start or pause the clock
  speed <x>       set the speed multiplier
  reset           start over
  volume <x>      set music volume (0..1)
  mute            toggle music
  style           toggle the room drawing style
  status          show needs, clock and history
  objects         list objects in the current room
  quit            stop the session";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// `interact <id>`
    Interact(ObjectId),
    /// `room <room>`
    Room(Room),
    /// `play`
    Play,
    /// `speed <x>`
    Speed(f64),
    /// `reset`
    Reset,
    /// `volume <x>`
    Volume(f64),
    /// `mute`
    Mute,
    /// `style`
    Style,
    /// `status`
    Status,
    /// `objects`
    Objects,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl ConsoleCommand {
    /// The intent this command sends to the session, if any.
    ///
    /// Speeds are clamped and snapped to the configured range here, before
    /// they reach the session.
    pub fn into_intent(self, speed: &SpeedConfig) -> Option<Intent> {
        match self {
            Self::Interact(id) => Some(Intent::Interact(id)),
            Self::Room(room) => Some(Intent::SetRoom(room)),
            Self::Play => Some(Intent::TogglePlaying),
            Self::Speed(value) => Some(Intent::SetSpeed(speed.clamp(value))),
            Self::Reset => Some(Intent::Reset),
            Self::Volume(value) => Some(Intent::SetVolume(value)),
            Self::Mute => Some(Intent::ToggleMute),
            Self::Style => Some(Intent::ToggleViewStyle),
            Self::Status | Self::Objects | Self::Help | Self::Quit => None,
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what was wrong with the line.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match name.to_ascii_lowercase().as_str() {
        "interact" | "use" => {
            ConsoleCommand::Interact(ObjectId::from(required(arg, "interact", "an object id")?))
        }
        "room" | "go" => ConsoleCommand::Room(required(arg, "room", "a room name")?.parse()?),
        "play" | "pause" => ConsoleCommand::Play,
        "speed" => ConsoleCommand::Speed(number(required(arg, "speed", "a multiplier")?)?),
        "reset" => ConsoleCommand::Reset,
        "volume" => ConsoleCommand::Volume(number(required(arg, "volume", "a level")?)?),
        "mute" => ConsoleCommand::Mute,
        "style" => ConsoleCommand::Style,
        "status" => ConsoleCommand::Status,
        "objects" | "ls" => ConsoleCommand::Objects,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => {
            return Err(CommandError::Unknown {
                name: name.to_owned(),
            });
        }
    };
    Ok(Some(command))
}

fn required<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, expected })
}

fn number(value: &str) -> Result<f64, CommandError> {
    value.parse().map_err(|_err| CommandError::InvalidNumber {
        value: value.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const fn level_tag(level: NeedLevel) -> &'static str {
    match level {
        NeedLevel::Good => "good",
        NeedLevel::Fair => "fair",
        NeedLevel::Critical => "CRITICAL",
    }
}

/// Clock, room, needs and both histories.
pub fn render_status(state: &GameState) -> String {
    let mut lines = vec![format!(
        "day {} {} | {} | {} | speed {}x",
        state.day,
        format_clock(state.time),
        state.current_room,
        if state.is_playing { "playing" } else { "paused" },
        state.game_speed,
    )];
    lines.extend(state.needs.levels().into_iter().map(|(need, level)| {
        format!(
            "  {:<12}{:>6.1}  {}",
            need.as_str(),
            state.needs.get(need),
            level_tag(level)
        )
    }));
    if !state.history.last_actions.is_empty() {
        lines.push(format!(
            "recent: {}",
            state.history.last_actions.join(", ")
        ));
    }
    lines.extend(
        state
            .history
            .special_events
            .iter()
            .map(|event| format!("  * {event}")),
    );
    lines.join("\n")
}

/// One line per object in the room.
pub fn render_objects(views: &[ObjectView]) -> String {
    if views.is_empty() {
        return "nothing to use here".to_owned();
    }
    views
        .iter()
        .map(|view| {
            let usability = match view.usability {
                Usability::Usable => "usable".to_owned(),
                Usability::Unavailable => "unavailable".to_owned(),
                Usability::CoolingDown { remaining_hours } => {
                    format!("cooling down, {remaining_hours:.1}h left")
                }
            };
            format!(
                "  {:<12}{} ({}) - {usability}",
                view.id.as_str(),
                view.display_name,
                view.action_kind
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short reply to an applied intent.
pub fn render_outcome(outcome: &IntentOutcome) -> String {
    match outcome {
        IntentOutcome::Interaction(InteractionOutcome::Applied {
            label, days_rolled, ..
        }) => match *days_rolled {
            0 => format!("done: {label}"),
            1 => format!("done: {label}, a new day begins"),
            days => format!("done: {label}, {days} days went by"),
        },
        IntentOutcome::Interaction(InteractionOutcome::Unavailable { object }) => {
            format!("{object} can't be used right now")
        }
        IntentOutcome::Interaction(InteractionOutcome::CoolingDown {
            object,
            remaining_hours,
        }) => format!("{object} is cooling down ({remaining_hours:.1}h left)"),
        IntentOutcome::UnknownObject(id) => format!("there is no `{id}` here"),
        IntentOutcome::Updated => "ok".to_owned(),
    }
}
