//! Dashboard state and key handling, independent of the terminal.

use aria_core::{Plan, Task};
use crossterm::event::KeyCode;

/// One line of the task tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Module(usize),
    Task(usize, usize),
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Save,
    Quit,
}

#[derive(Debug)]
pub struct DashboardState {
    rows: Vec<Row>,
    selected: usize,
    /// The plan has changes that are not saved yet
    pub dirty: bool,
    /// Last status line message
    pub message: Option<String>,
}

impl DashboardState {
    pub fn new(plan: &Plan) -> Self {
        let rows = plan
            .modules
            .iter()
            .enumerate()
            .flat_map(|(m, module)| {
                let tasks = (0..module.tasks.len()).map(move |t| Row::Task(m, t));
                std::iter::once(Row::Module(m)).chain(tasks)
            })
            .collect();

        Self {
            rows,
            selected: 0,
            dirty: false,
            message: None,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows.get(self.selected).copied()
    }

    /// The task under the cursor, if the cursor is on a task.
    pub fn selected_task<'p>(&self, plan: &'p Plan) -> Option<&'p Task> {
        match self.selected_row()? {
            Row::Task(m, t) => plan.modules.get(m)?.tasks.get(t),
            Row::Module(_) => None,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Flip the status of the selected task. Returns false when the cursor
    /// is on a module.
    pub fn toggle_selected(&mut self, plan: &mut Plan) -> bool {
        let Some(Row::Task(m, t)) = self.selected_row() else {
            return false;
        };
        let Some(task) = plan.modules.get_mut(m).and_then(|module| module.tasks.get_mut(t)) else {
            return false;
        };

        task.status = task.status.toggled();
        self.message = Some(format!("{}: {}", task.title, task.status.with_icon()));
        self.dirty = true;
        true
    }

    pub fn handle_key(&mut self, code: KeyCode, plan: &mut Plan) -> Action {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle_selected(plan);
            }
            KeyCode::Char('s') => return Action::Save,
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            _ => {}
        }
        Action::Continue
    }

    pub fn mark_saved(&mut self, location: &str) {
        self.dirty = false;
        self.message = Some(format!("Saved to {location}"));
    }
}
