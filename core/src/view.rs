//! Rendered state of the todo list.
//!
//! # Design
//! `TodoListView` is the in-memory stand-in for the list container: a flat
//! sequence of items addressed by todo id. `render` rebuilds it wholesale from
//! a fetch; the handlers patch single items. `to_html` produces the markup the
//! page shows, with every user-supplied string escaped.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::Todo;

const COMPLETED_CLASS: &str = "completed";

/// One rendered todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// State of the completion checkbox.
    pub checked: bool,
    /// Whether the title carries the `completed` class.
    pub title_completed: bool,
    /// Whether the description carries the `completed` class.
    pub description_completed: bool,
    pub date_label: String,
}

impl TodoItem {
    fn from_todo(todo: &Todo) -> Self {
        let description = todo
            .description
            .as_ref()
            .filter(|text| !text.is_empty())
            .cloned();
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description,
            checked: todo.completed,
            title_completed: todo.completed,
            description_completed: todo.completed,
            date_label: format_date(&todo.created_at),
        }
    }

    /// Apply the `completed` styling to the title and, if present, the
    /// description.
    pub fn set_completed_style(&mut self, completed: bool) {
        self.title_completed = completed;
        if self.description.is_some() {
            self.description_completed = completed;
        }
    }

    pub fn to_html(&self) -> String {
        let id = self.id;
        let checked = if self.checked { " checked" } else { "" };
        let mut html = format!(
            concat!(
                "<div class=\"todo-item\" data-id=\"{id}\">",
                "<div class=\"todo-header\">",
                "<input type=\"checkbox\" class=\"todo-checkbox\"{checked} data-id=\"{id}\">",
                "<h3 class=\"{title_class}\">{title}</h3>",
                "<button class=\"delete-btn\" data-id=\"{id}\">Delete</button>",
                "</div>",
            ),
            id = id,
            checked = checked,
            title_class = class_list("todo-title", self.title_completed),
            title = escape_html(&self.title),
        );
        if let Some(description) = &self.description {
            html.push_str(&format!(
                "<p class=\"{}\">{}</p>",
                class_list("todo-description", self.description_completed),
                escape_html(description)
            ));
        }
        html.push_str(&format!(
            "<small class=\"todo-date\">{}</small></div>",
            escape_html(&self.date_label)
        ));
        html
    }
}

/// The list container.
#[derive(Debug, Clone, Default)]
pub struct TodoListView {
    items: Vec<TodoItem>,
}

impl TodoListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every item with a fresh projection of `todos`, in order.
    pub fn render(&mut self, todos: &[Todo]) {
        self.items = todos.iter().map(TodoItem::from_todo).collect();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item(&self, id: i64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: i64) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Remove the item for `id`; returns whether it was present.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Inner HTML of the list container. Empty list, empty string.
    pub fn to_html(&self) -> String {
        self.items.iter().map(TodoItem::to_html).collect()
    }
}

fn class_list(base: &str, completed: bool) -> String {
    if completed {
        format!("{base} {COMPLETED_CLASS}")
    } else {
        base.to_string()
    }
}

/// Escape text for use as element content or a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a server timestamp as `MM/DD/YYYY, hh:mm AM`.
///
/// Offset-aware timestamps are shown in UTC; naive ones are shown as sent.
/// Anything unparseable becomes `Invalid Date`.
pub fn format_date(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(naive) => naive.format("%m/%d/%Y, %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.trim();
    if let Ok(aware) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(aware.with_timezone(&Utc).naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, title: &str, description: Option<&str>, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
            created_at: "2024-01-15T14:30:00".to_string(),
        }
    }

    #[test]
    fn render_produces_one_item_per_todo() {
        let mut view = TodoListView::new();
        for n in 0..5 {
            let todos: Vec<Todo> = (0..n).map(|i| todo(i, "t", None, i % 2 == 0)).collect();
            view.render(&todos);
            assert_eq!(view.len(), todos.len());
            assert_eq!(view.to_html().matches("class=\"todo-item\"").count(), todos.len());
        }
    }

    #[test]
    fn render_replaces_previous_items() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "a", None, false), todo(2, "b", None, false)]);
        view.render(&[todo(3, "c", None, true)]);
        assert_eq!(view.len(), 1);
        assert!(view.item(1).is_none());
        assert!(view.item(3).unwrap().checked);
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "a", None, false)]);
        view.render(&[]);
        assert!(view.is_empty());
        assert_eq!(view.to_html(), "");
    }

    #[test]
    fn script_in_title_is_inert() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "<script>alert('x')</script>", Some("<b>&</b>"), false)]);
        let html = view.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn every_control_carries_the_id() {
        let mut view = TodoListView::new();
        view.render(&[todo(42, "answer", None, false)]);
        assert_eq!(view.to_html().matches("data-id=\"42\"").count(), 3);
    }

    #[test]
    fn completed_todo_renders_checked_and_styled() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "done", Some("really"), true)]);
        let html = view.to_html();
        assert!(html.contains("class=\"todo-checkbox\" checked"));
        assert!(html.contains("<h3 class=\"todo-title completed\">done</h3>"));
        assert!(html.contains("<p class=\"todo-description completed\">really</p>"));
    }

    #[test]
    fn empty_description_is_omitted() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "a", Some(""), false), todo(2, "b", None, false)]);
        assert!(!view.to_html().contains("todo-description"));
    }

    #[test]
    fn completed_style_skips_missing_description() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "a", None, false)]);
        let item = view.item_mut(1).unwrap();
        item.set_completed_style(true);
        assert!(item.title_completed);
        assert!(!item.description_completed);
    }

    #[test]
    fn remove_reports_presence() {
        let mut view = TodoListView::new();
        view.render(&[todo(1, "a", None, false), todo(2, "b", None, false)]);
        assert!(view.remove(1));
        assert!(!view.remove(1));
        assert_eq!(view.items()[0].id, 2);
    }

    #[test]
    fn dates_use_us_numeric_format() {
        assert_eq!(format_date("2024-01-15T14:30:00"), "01/15/2024, 02:30 PM");
        assert_eq!(format_date("2024-01-15T09:05:59.123456"), "01/15/2024, 09:05 AM");
        assert_eq!(format_date("2024-12-31 00:00:00"), "12/31/2024, 12:00 AM");
        assert_eq!(format_date("2024-01-15T14:30:00+02:00"), "01/15/2024, 12:30 PM");
        assert_eq!(format_date("yesterday"), "Invalid Date");
    }
}
