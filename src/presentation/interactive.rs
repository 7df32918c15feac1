use super::{render_cuisine_options, render_listing, render_restaurant};
use crate::catalog::{source_from_location, Catalog};
use crate::error::Result;
use crate::selector::PickerSession;
use crate::types::FilterKey;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

const HELP: &str = "\
Commands:
  cuisine <name|all>  choose the cuisine filter (alias: c)
  random-cuisine      let fate choose the cuisine (alias: r)
  pick                pick a restaurant for the current filter (alias: p)
  list                show or hide every restaurant by cuisine (alias: l)
  cuisines            show the available cuisines
  reload              reload the restaurant list
  help                show this help
  quit                leave (alias: q)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFilter(FilterKey),
    RandomCuisine,
    Pick,
    ToggleListing,
    Cuisines,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "cuisine" | "c" if !rest.is_empty() => Command::SetFilter(FilterKey::from(rest)),
            "random-cuisine" | "random" | "r" => Command::RandomCuisine,
            "pick" | "p" => Command::Pick,
            "list" | "l" => Command::ToggleListing,
            "cuisines" => Command::Cuisines,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// What the terminal should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Show(String),
    Notice(String),
    Reload,
    Quit,
}

/// Terminal stand-in for the picker page: a current cuisine filter, a pick
/// button and a listing that can be toggled on and off.
pub struct InteractiveSession {
    session: PickerSession,
    filter: FilterKey,
    listing_visible: bool,
    catalog_location: Option<String>,
}

impl InteractiveSession {
    pub fn new(session: PickerSession) -> Self {
        Self {
            session,
            filter: FilterKey::All,
            listing_visible: false,
            catalog_location: None,
        }
    }

    /// Where `reload` fetches the catalog from
    pub fn with_catalog_location(mut self, location: impl Into<String>) -> Self {
        self.catalog_location = Some(location.into());
        self
    }

    pub fn filter(&self) -> &FilterKey {
        &self.filter
    }

    pub fn listing_visible(&self) -> bool {
        self.listing_visible
    }

    pub fn session(&self) -> &PickerSession {
        &self.session
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::SetFilter(filter) => {
                self.filter = filter;
                Outcome::Show(format!("Cuisine filter: {}", self.filter))
            }
            Command::RandomCuisine => match self.session.pick_random_cuisine() {
                Ok(cuisine) => {
                    self.filter = FilterKey::Cuisine(cuisine);
                    Outcome::Show(format!("🎲 Cuisine filter: {}", self.filter))
                }
                Err(e) => Outcome::Notice(e.to_string()),
            },
            Command::Pick => match self.session.pick(&self.filter) {
                Ok(record) => Outcome::Show(render_restaurant(&record)),
                Err(e) => Outcome::Notice(e.to_string()),
            },
            Command::ToggleListing => {
                self.listing_visible = !self.listing_visible;
                if self.listing_visible {
                    Outcome::Show(render_listing(self.session.catalog()))
                } else {
                    Outcome::Show("Listing hidden".to_string())
                }
            }
            Command::Cuisines => Outcome::Show(render_cuisine_options(self.session.cuisines())),
            Command::Reload => Outcome::Reload,
            Command::Help => Outcome::Show(HELP.to_string()),
            Command::Quit => Outcome::Quit,
            Command::Unknown(input) => {
                Outcome::Notice(format!("Unknown command '{}'. Type 'help' for commands.", input))
            }
        }
    }

    /// Refetch the catalog. A failed reload keeps the current catalog.
    pub async fn reload(&mut self) -> Outcome {
        let Some(location) = self.catalog_location.clone() else {
            return Outcome::Notice("No catalog location to reload from".to_string());
        };

        let source = source_from_location(&location);
        match Catalog::load(source.as_ref()).await {
            Ok(catalog) => {
                let count = catalog.len();
                self.session.reload(catalog);
                self.listing_visible = false;
                Outcome::Show(format!("Reloaded {} restaurants", count))
            }
            Err(e) => {
                error!("Reload failed: {}", e);
                Outcome::Notice(format!("{} (keeping the current list)", e))
            }
        }
    }

    /// Read commands line by line until `quit` or end of input
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Interactive session started");
        writeln!(output, "Type 'help' for commands.")?;
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            let outcome = match self.handle(command) {
                Outcome::Reload => self.reload().await,
                other => other,
            };

            match outcome {
                Outcome::Show(text) => writeln!(output, "{}", text.trim_end())?,
                Outcome::Notice(text) => writeln!(output, "⚠️  {}", text)?,
                Outcome::Quit => break,
                Outcome::Reload => {}
            }
            output.flush()?;
        }

        info!("Interactive session ended");
        Ok(())
    }
}
