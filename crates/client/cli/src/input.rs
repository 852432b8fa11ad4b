//! Reads player commands from stdin.

use async_trait::async_trait;
use combat_core::{SessionPhase, SessionSnapshot};
use combat_runtime::{CommandProvider, PlayerCommand};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::render;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("type a command, or 'help'")]
    Empty,
    #[error("no attack number {0}")]
    NoSuchAttack(usize),
    #[error("'{0}' needs an item id")]
    MissingItem(&'static str),
    #[error("help requested")]
    Help,
}

/// Turns one input line into a command, given what the player sees.
///
/// In a fight a bare number or attack name attacks. In the shop a blank
/// line leaves for the next region.
pub fn parse(line: &str, view: &SessionSnapshot) -> Result<PlayerCommand, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let in_shop = view.phase == SessionPhase::AdvancingRegion;

    match verb.to_ascii_lowercase().as_str() {
        "" if in_shop => Ok(PlayerCommand::Continue),
        "" => Err(ParseError::Empty),
        "help" | "?" => Err(ParseError::Help),
        "quit" | "abandon" | "q" => Ok(PlayerCommand::Abandon),
        "continue" | "next" | "c" => Ok(PlayerCommand::Continue),
        "buy" | "b" if rest.is_empty() => Err(ParseError::MissingItem("buy")),
        "buy" | "b" => Ok(PlayerCommand::Buy(rest.to_owned())),
        "use" | "u" if rest.is_empty() => Err(ParseError::MissingItem("use")),
        "use" | "u" => Ok(PlayerCommand::Use(rest.to_owned())),
        "attack" | "a" if rest.is_empty() => Err(ParseError::Empty),
        "attack" | "a" => attack(rest, view),
        _ => attack(line, view),
    }
}

fn attack(choice: &str, view: &SessionSnapshot) -> Result<PlayerCommand, ParseError> {
    let attacks = &view.player.attacks;
    if let Ok(number) = choice.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| attacks.get(index))
            .map(|attack| PlayerCommand::Attack(attack.name.clone()))
            .ok_or(ParseError::NoSuchAttack(number));
    }

    let name = attacks
        .iter()
        .find(|attack| attack.name.eq_ignore_ascii_case(choice))
        .map_or_else(|| choice.to_owned(), |attack| attack.name.clone());
    // Unknown names still go to the engine, which reports them.
    Ok(PlayerCommand::Attack(name))
}

/// Prompts on stdout and reads commands from stdin.
pub struct StdinCommands {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinCommands {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Next raw line, `None` on end of input.
    pub async fn read_line(&self) -> Option<String> {
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "failed to read stdin");
                None
            }
        }
    }
}

#[async_trait]
impl CommandProvider for StdinCommands {
    async fn next_command(&self, view: &SessionSnapshot) -> combat_runtime::Result<PlayerCommand> {
        loop {
            render::prompt(view);
            // End of input gives up the run.
            let Some(line) = self.read_line().await else {
                return Ok(PlayerCommand::Abandon);
            };
            match parse(&line, view) {
                Ok(command) => return Ok(command),
                Err(ParseError::Help) => render::help(view),
                Err(error) => println!("  {error}"),
            }
        }
    }
}
