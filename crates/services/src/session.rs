//! The interactive prompt loop: command dispatch, sub-flows, shutdown.

use std::io;
use std::path::PathBuf;

use cram_core::model::{Card, Deck};
use storage::deck_file::{self, DeckFileError};
use storage::transcript;

use crate::console::{Console, ConsoleError};
use crate::error::SessionError;
use crate::quiz::{QuizPlan, Verdict, grade_answer};

const ACTION_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

/// Paths resolved from the command line before the session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub import_path: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Log,
    HardestCard,
    ResetStats,
}

impl Command {
    /// Parse a top-level input line. Matching is exact, with no trimming;
    /// an unrecognized line yields `None` and the loop re-prompts without
    /// comment. The exit line never reaches this point, the console
    /// intercepts it on read.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        match line {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "import" => Some(Self::Import),
            "export" => Some(Self::Export),
            "ask" => Some(Self::Ask),
            "log" => Some(Self::Log),
            "hardest card" => Some(Self::HardestCard),
            "reset stats" => Some(Self::ResetStats),
            _ => None,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One interactive session over a deck.
///
/// The session owns its deck and console for its whole lifetime; the binary
/// wires real stdio in, tests wire a script in.
pub struct Session {
    deck: Deck,
    console: Console,
    config: SessionConfig,
}

impl Session {
    #[must_use]
    pub fn new(console: Console, config: SessionConfig) -> Self {
        Self {
            deck: Deck::new(),
            console,
            config,
        }
    }

    /// The deck as the session left it.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Everything written and read so far, in order.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        self.console.transcript()
    }

    /// Run the session to completion.
    ///
    /// Completion is the user typing the exit line at any prompt; the
    /// pending command is abandoned, the farewell is printed, and the deck
    /// is exported if an export path was configured.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for the fatal paths: a failed startup import,
    /// an unparsable question count or error-count field, input exhaustion,
    /// and I/O failures other than a missing file named at the interactive
    /// import prompt.
    pub fn run(&mut self) -> Result<(), SessionError> {
        if let Some(path) = &self.config.import_path {
            let loaded = deck_file::load(path, &mut self.deck)?;
            self.console
                .write_line(&format!("{loaded} cards have been loaded."))?;
        }

        loop {
            match self.command_cycle() {
                Ok(()) => {}
                Err(SessionError::Console(ConsoleError::Exit)) => return self.finish(),
                Err(err) => return Err(err),
            }
        }
    }

    fn command_cycle(&mut self) -> Result<(), SessionError> {
        self.console.write_line(ACTION_PROMPT)?;
        let line = self.console.read_line()?;
        if let Some(command) = Command::from_line(&line) {
            self.dispatch(command)?;
        }
        // one blank line per cycle, unrecognized commands included
        self.console.write_line("")?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<(), SessionError> {
        match command {
            Command::Add => self.add(),
            Command::Remove => self.remove(),
            Command::Import => self.import(),
            Command::Export => self.export(),
            Command::Ask => self.ask(),
            Command::Log => self.log(),
            Command::HardestCard => self.hardest_card(),
            Command::ResetStats => self.reset_stats(),
        }
    }

    fn finish(&mut self) -> Result<(), SessionError> {
        self.console.write_line("Bye bye!")?;
        if let Some(path) = &self.config.export_path {
            let saved = deck_file::save(path, &self.deck)?;
            self.console
                .write_line(&format!("{saved} cards have been saved."))?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), SessionError> {
        self.console.write_line("The card:")?;
        let term = self.console.read_line()?;
        if self.deck.find_by_term(&term).is_some() {
            self.console
                .write_line(&format!("The card \"{term}\" already exists."))?;
            return Ok(());
        }

        self.console.write_line("The definition of the card:")?;
        let definition = self.console.read_line()?;
        match self.deck.add(Card::new(&term, &definition)) {
            Ok(()) => {
                self.console.write_line(&format!(
                    "The pair (\"{term}\":\"{definition}\") has been added."
                ))?;
            }
            Err(_) => {
                // the term was new a moment ago, so only the definition can collide
                self.console
                    .write_line(&format!("The definition \"{definition}\" already exists."))?;
            }
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SessionError> {
        self.console.write_line("The card:")?;
        let term = self.console.read_line()?;
        if self.deck.remove(&term).is_ok() {
            self.console.write_line("The card has been removed.")?;
        } else {
            self.console
                .write_line(&format!("Can't remove \"{term}\": there is no such card."))?;
        }
        Ok(())
    }

    fn import(&mut self) -> Result<(), SessionError> {
        self.console.write_line("File name:")?;
        let path = self.console.read_line()?;
        match deck_file::load(&path, &mut self.deck) {
            Ok(loaded) => {
                self.console
                    .write_line(&format!("{loaded} cards have been loaded."))?;
            }
            Err(DeckFileError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                self.console.write_line("File not found.")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn export(&mut self) -> Result<(), SessionError> {
        self.console.write_line("File name:")?;
        let path = self.console.read_line()?;
        let saved = deck_file::save(&path, &self.deck)?;
        self.console
            .write_line(&format!("{saved} cards have been saved."))?;
        Ok(())
    }

    fn log(&mut self) -> Result<(), SessionError> {
        self.console.write_line("File name:")?;
        let path = self.console.read_line()?;
        // the saved file ends at the path entry; the confirmation below only
        // makes it into later saves
        transcript::save(&path, self.console.transcript())?;
        self.console.write_line("The log has been saved.")?;
        Ok(())
    }

    fn ask(&mut self) -> Result<(), SessionError> {
        self.console.write_line("How many times to ask?")?;
        let count_line = self.console.read_line()?;
        let total = count_line
            .parse::<usize>()
            .map_err(|_| SessionError::InvalidCount(count_line.clone()))?;

        if self.deck.is_empty() {
            self.console.write_line("Create a card first")?;
            return Ok(());
        }

        let plan = QuizPlan::build(&self.deck, total);
        for card in plan.questions() {
            self.console
                .write_line(&format!("Print the definition of \"{}\":", card.term()))?;
            let answer = self.console.read_line()?;
            match grade_answer(&self.deck, card, &answer) {
                Verdict::Correct => {
                    self.console.write_line("Correct answer.")?;
                }
                Verdict::Wrong => {
                    self.deck.record_error(card.term());
                    self.console.write_line(&format!(
                        "Wrong answer. The correct one is \"{}\".",
                        card.definition()
                    ))?;
                }
                Verdict::Confused { term } => {
                    self.deck.record_error(card.term());
                    self.console.write_line(&format!(
                        "Wrong answer. The correct one is \"{}\", you've just written the definition of \"{term}\".",
                        card.definition()
                    ))?;
                }
            }
        }
        Ok(())
    }

    fn hardest_card(&mut self) -> Result<(), SessionError> {
        let hardest = self.deck.hardest();
        match hardest.terms.as_slice() {
            [] => {
                self.console.write_line("There are no cards with errors.")?;
            }
            [term] => {
                self.console.write_line(&format!(
                    "The hardest card is \"{term}\". You have {} errors answering it.",
                    hardest.errors
                ))?;
            }
            terms => {
                let list = terms
                    .iter()
                    .map(|term| format!("\"{term}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.console.write_line(&format!(
                    "The hardest cards are {list}. You have {} errors answering them.",
                    hardest.errors
                ))?;
            }
        }
        Ok(())
    }

    fn reset_stats(&mut self) -> Result<(), SessionError> {
        self.deck.reset_stats();
        self.console.write_line("Card statistics has been reset.")?;
        Ok(())
    }
}
