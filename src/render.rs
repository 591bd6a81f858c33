//! Terminal rendering of the journal

use std::fmt::Write;

use crate::journal::{Entry, JournalSnapshot};

pub const IMPORTANT_MARK: &str = "★ Important";
pub const UNMARKED: &str = "☆ Mark as Important";
pub const LOADING_MESSAGE: &str = "Loading entries...";

/// Render the full journal view
///
/// The loading placeholder replaces the list only while nothing has been
/// loaded yet.
pub fn render_journal(snapshot: &JournalSnapshot) -> String {
    let mut out = String::from("My Journal\n==========\n");
    let state = &snapshot.state;

    if state.form_visible {
        out.push_str(&render_form(snapshot));
    }

    if snapshot.loading && state.entries.is_empty() {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
        return out;
    }

    if state.entries.is_empty() {
        out.push_str("No entries.\n");
        return out;
    }

    for entry in &state.entries {
        out.push('\n');
        out.push_str(&render_entry(entry, state.important.contains(entry.id)));
    }
    out
}

/// Render one entry with its important marker
pub fn render_entry(entry: &Entry, important: bool) -> String {
    let mark = if important { IMPORTANT_MARK } else { UNMARKED };
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}  [{}]", entry.id, entry.title, mark);
    for line in entry.body.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    out
}

fn render_form(snapshot: &JournalSnapshot) -> String {
    let draft = &snapshot.state.draft;
    let submit = if snapshot.loading { "Submitting..." } else { "Submit" };
    format!(
        "--- New Entry ---\nTitle:   {}\nContent: {}\n[{}]\n-----------------\n",
        draft.title, draft.body, submit
    )
}
