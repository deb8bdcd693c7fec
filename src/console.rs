//! Line-oriented presentation of the scheduler: renders the reservation table,
//! the error banner and the form, and turns typed commands into intents.

use crate::backend::ReservationApi;
use crate::scheduler::Scheduler;
use crate::types::Reservation;
use std::fmt::Write as _;
use std::ops::ControlFlow;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

pub const HELP: &str = "\
Commands:
  list | refresh     reload reservations
  edit N             edit reservation N
  remove N           remove reservation N
  room TEXT          set the room of the form
  at TEXT            set date and time of the form (e.g. 2024-01-01T10:00)
  submit             schedule or update
  cancel             clear the form
  help               show this help
  quit | exit        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Refresh,
    Edit(usize),
    Remove(usize),
    Room(String),
    ScheduledAt(String),
    Submit,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("unknown command `{0}`, type `help` for a list of commands")]
    UnknownCommand(String),
    #[error("`{command}` expects a reservation number, got `{argument}`")]
    InvalidNumber { command: String, argument: String },
    #[error("there is no reservation number {0}")]
    NoSuchReservation(usize),
}

impl FromStr for Intent {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        let number = |argument: &str| {
            argument
                .parse::<usize>()
                .map_err(|_| ConsoleError::InvalidNumber {
                    command: command.into(),
                    argument: argument.into(),
                })
        };

        match command.to_lowercase().as_str() {
            "list" | "refresh" => Ok(Intent::Refresh),
            "edit" => Ok(Intent::Edit(number(argument)?)),
            "remove" => Ok(Intent::Remove(number(argument)?)),
            "room" => Ok(Intent::Room(argument.into())),
            "at" => Ok(Intent::ScheduledAt(argument.into())),
            "submit" => Ok(Intent::Submit),
            "cancel" => Ok(Intent::Cancel),
            "help" => Ok(Intent::Help),
            "quit" | "exit" => Ok(Intent::Quit),
            _ => Err(ConsoleError::UnknownCommand(command.into())),
        }
    }
}

pub fn render<A: ReservationApi>(title: &str, scheduler: &Scheduler<A>) -> String {
    let mut screen = String::new();
    let _ = writeln!(screen, "== {title} ==");

    if let Some(err) = scheduler.store().error() {
        let _ = writeln!(screen, "! {err}");
    }

    let reservations = scheduler.store().reservations();
    if reservations.is_empty() {
        let _ = writeln!(screen, "  (no reservations)");
    }
    for (index, reservation) in reservations.iter().enumerate() {
        let scheduled_at = reservation
            .scheduled_at_local()
            .map(|datetime| datetime.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| reservation.scheduled_at.clone());
        let _ = writeln!(
            screen,
            "  {:>2}. {:<24} {}",
            index + 1,
            reservation.room,
            scheduled_at
        );
    }

    let form = scheduler.form();
    let _ = writeln!(screen, "-- Schedule/Edit reservation --");
    let _ = writeln!(screen, "  room:          {}", form.draft().room);
    let _ = writeln!(screen, "  date and time: {}", form.draft().scheduled_at);
    let _ = writeln!(screen, "  [{}]  [Cancel]", form.mode().submit_label());
    screen
}

/// Executes one intent. Failed service calls end up in the banner, only
/// problems with the command itself are returned.
pub async fn dispatch<A: ReservationApi>(
    scheduler: &mut Scheduler<A>,
    intent: Intent,
) -> Result<ControlFlow<()>, ConsoleError> {
    debug!(?intent, "Dispatching");
    match intent {
        Intent::Refresh => {
            let _ = scheduler.load().await;
        }
        Intent::Edit(number) => {
            let reservation = row(scheduler, number)?.clone();
            scheduler.select(&reservation);
        }
        Intent::Remove(number) => {
            let id = row(scheduler, number)?.id.clone();
            let _ = scheduler.remove(&id).await;
        }
        Intent::Room(room) => scheduler.set_room(room),
        Intent::ScheduledAt(scheduled_at) => scheduler.set_scheduled_at(scheduled_at),
        Intent::Submit => {
            let _ = scheduler.submit().await;
        }
        Intent::Cancel => scheduler.clear_selection(),
        Intent::Help => {}
        Intent::Quit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}

fn row<A: ReservationApi>(
    scheduler: &Scheduler<A>,
    number: usize,
) -> Result<&Reservation, ConsoleError> {
    number
        .checked_sub(1)
        .and_then(|index| scheduler.store().reservations().get(index))
        .ok_or(ConsoleError::NoSuchReservation(number))
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<A: ReservationApi>(scheduler: &mut Scheduler<A>, title: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout.write_all(render(title, scheduler).as_bytes()).await?;
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let mut output = String::new();
        match line.parse::<Intent>() {
            Ok(Intent::Help) => output.push_str(HELP),
            Ok(intent) => match dispatch(scheduler, intent).await {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(())) => output.push_str(&render(title, scheduler)),
                Err(err) => output.push_str(&err.to_string()),
            },
            Err(err) => output.push_str(&err.to_string()),
        }
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("> ");

        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Leaving");
    Ok(())
}
