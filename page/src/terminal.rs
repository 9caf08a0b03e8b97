//! Dialogs and navigation on a terminal.

use std::cell::RefCell;
use std::io::{self, Write};

use todo_core::{Navigator, Ui};

pub struct TerminalUi;

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Records where the page was sent; the session ends once it is set.
#[derive(Default)]
pub struct TerminalNavigator {
    location: RefCell<Option<String>>,
}

impl TerminalNavigator {
    pub fn location(&self) -> Option<String> {
        self.location.borrow().clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: &str) {
        *self.location.borrow_mut() = Some(location.to_string());
    }
}
