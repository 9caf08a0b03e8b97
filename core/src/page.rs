//! The view controller: routes page events to handlers that talk to the API
//! and keep the rendered list in sync.
//!
//! # Design
//! Events name the todo they concern, so the controller looks items up by id
//! on every event and nothing needs rebinding after a re-render. Every
//! handler takes `&mut self`; one event's round-trip finishes before the next
//! event is handled.

use tracing::{error, info};

use crate::api::Api;
use crate::credential::CredentialProvider;
use crate::transport::{Navigator, Transport};
use crate::types::{CreateTodo, UpdateTodo};
use crate::view::TodoListView;

pub const MSG_EMPTY_TITLE: &str = "Please enter a todo title";
pub const MSG_CREATE_FAILED: &str = "Failed to create todo. Please try again.";
pub const MSG_UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete todo. Please try again.";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this todo?";

/// Blocking user dialogs.
pub trait Ui {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

impl<U: Ui + ?Sized> Ui for &U {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Contents of the creation form's two inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
}

impl TodoForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The creation form was submitted.
    Submit,
    /// A todo's checkbox changed to `checked`.
    Toggle { id: i64, checked: bool },
    /// A todo's delete control was clicked.
    Delete { id: i64 },
}

pub struct TodoPage<T, C, N, U> {
    api: Api<T, C, N>,
    ui: U,
    view: TodoListView,
    form: TodoForm,
}

impl<T, C, N, U> TodoPage<T, C, N, U>
where
    T: Transport,
    C: CredentialProvider,
    N: Navigator,
    U: Ui,
{
    pub fn new(api: Api<T, C, N>, ui: U) -> Self {
        Self {
            api,
            ui,
            view: TodoListView::new(),
            form: TodoForm::default(),
        }
    }

    pub fn view(&self) -> &TodoListView {
        &self.view
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TodoForm {
        &mut self.form
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::Submit => self.handle_create(),
            PageEvent::Toggle { id, checked } => self.handle_toggle(id, checked),
            PageEvent::Delete { id } => self.handle_delete(id),
        }
    }

    /// Fetch the full collection and re-render. Failures are logged only and
    /// leave the current rendering in place.
    pub fn load(&mut self) {
        match self.api.list_todos() {
            Ok(Some(todos)) => {
                info!(count = todos.len(), "rendering todos");
                self.view.render(&todos);
            }
            Ok(None) => {}
            Err(err) => error!("Error loading todos: {err}"),
        }
    }

    pub fn handle_create(&mut self) {
        let title = self.form.title.trim();
        let description = self.form.description.trim();
        if title.is_empty() {
            self.ui.alert(MSG_EMPTY_TITLE);
            return;
        }

        let input = CreateTodo {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };
        match self.api.create_todo(&input) {
            Ok(Some(created)) => {
                info!(id = created.id, "created todo");
                self.form.clear();
                self.load();
            }
            Ok(None) => {}
            Err(err) => {
                error!("Error creating todo: {err}");
                self.ui.alert(MSG_CREATE_FAILED);
            }
        }
    }

    /// The checkbox already shows `checked` when this runs; the styling only
    /// follows once the server confirms.
    pub fn handle_toggle(&mut self, id: i64, checked: bool) {
        let previous = self.view.item_mut(id).map(|item| {
            let previous = item.checked;
            item.checked = checked;
            previous
        });

        match self.api.update_todo(id, &UpdateTodo::completed(checked)) {
            Ok(Some(_)) => {
                if let Some(item) = self.view.item_mut(id) {
                    item.set_completed_style(checked);
                }
            }
            Ok(None) => {}
            Err(err) => {
                error!("Error updating todo: {err}");
                if let (Some(item), Some(previous)) = (self.view.item_mut(id), previous) {
                    item.checked = previous;
                }
                self.ui.alert(MSG_UPDATE_FAILED);
            }
        }
    }

    pub fn handle_delete(&mut self, id: i64) {
        if !self.ui.confirm(MSG_CONFIRM_DELETE) {
            return;
        }

        match self.api.delete_todo(id) {
            Ok(Some(())) => {
                self.view.remove(id);
            }
            Ok(None) => {}
            Err(err) => {
                error!("Error deleting todo: {err}");
                self.ui.alert(MSG_DELETE_FAILED);
            }
        }
    }
}
