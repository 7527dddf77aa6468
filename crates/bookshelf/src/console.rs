//! Line-oriented console front end
//!
//! Reads one command per line, turns it into actions and prints state
//! changes as the selectors report them.

use crate::actions::{Action, AuthAction, Credentials, LayoutAction};
use crate::guard::AuthGuard;
use crate::selectors;
use crate::services::Navigator;
use bookshelf_store::{Selector, Store};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

pub const HELP: &str = "\
Commands:
  open                      open the sidenav
  close                     close the sidenav
  login <user> <password>   log in
  logout                    log out
  visit <path>              navigate to a page that needs a login
  state                     print the state tree
  help                      show this help
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenSidenav,
    CloseSidenav,
    Login(Credentials),
    Logout,
    Visit(String),
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            ("open", []) => Ok(Command::OpenSidenav),
            ("close", []) => Ok(Command::CloseSidenav),
            ("login", [username, password]) => {
                Ok(Command::Login(Credentials::new(*username, *password)))
            }
            ("login", _) => Err(ParseCommandError::Usage("login <user> <password>")),
            ("logout", []) => Ok(Command::Logout),
            ("visit", [path]) => Ok(Command::Visit(path.to_string())),
            ("visit", _) => Err(ParseCommandError::Usage("visit <path>")),
            ("state", []) => Ok(Command::State),
            ("help", []) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            _ => Err(ParseCommandError::Unknown(line.trim().to_string())),
        }
    }
}

/// Whether the console keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    store: Store<Action>,
    guard: AuthGuard,
    navigator: Arc<dyn Navigator>,
}

impl Console {
    pub fn new(store: Store<Action>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            guard: AuthGuard::new(store.clone()),
            store,
            navigator,
        }
    }

    /// Execute one command
    pub fn execute(&self, command: Command) -> Flow {
        log::debug!("Console: executing {:?}", command);
        match command {
            Command::OpenSidenav => self.store.dispatch(LayoutAction::OpenSidenav.into()),
            Command::CloseSidenav => self.store.dispatch(LayoutAction::CloseSidenav.into()),
            Command::Login(credentials) => {
                self.store.dispatch(AuthAction::Login(credentials).into())
            }
            Command::Logout => self.store.dispatch(AuthAction::Logout.into()),
            Command::Visit(path) => {
                if self.guard.can_activate(&path) {
                    self.navigator.navigate(&path);
                } else {
                    println!("{} needs a login", path);
                }
            }
            Command::State => println!("{:#?}", self.store.state()),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

fn watch<S, F>(store: &Store<Action>, selector: S, render: F) -> JoinHandle<()>
where
    S: Selector + 'static,
    F: Fn(S::Output) -> Option<String> + Send + 'static,
{
    let mut selection = store.select(selector);
    tokio::spawn(async move {
        // The first value is the initial state
        if selection.next().await.is_none() {
            return;
        }
        while let Some(value) = selection.next().await {
            if let Some(line) = render(value) {
                println!("{}", line);
            }
        }
    })
}

fn show(label: &str, value: impl Display) -> Option<String> {
    Some(format!("[{}] {}", label, value))
}

/// Print sidenav, login page and user changes as they happen
pub fn spawn_watchers(store: &Store<Action>) -> Vec<JoinHandle<()>> {
    vec![
        watch(store, selectors::show_sidenav(), |open| {
            show("sidenav", if open { "open" } else { "closed" })
        }),
        watch(store, selectors::login_pending(), |pending| {
            pending.then(|| "[login] pending...".to_string())
        }),
        watch(store, selectors::login_error(), |error| {
            error.map(|error| format!("[login] error: {}", error))
        }),
        watch(store, selectors::user(), |user| match user {
            Some(user) => show("user", &user.name),
            None => show("user", "logged out"),
        }),
    ]
}
