use chrono::NaiveDate;
use log::warn;

use crate::api::{NewTask, Task, TaskApi, TaskId};
use crate::error::ClientError;
use crate::export::{self, ExportOutcome};

const FAILED_LOAD: &str = "Failed to load tasks.";
const FAILED_CREATE: &str = "Failed to create task.";
const FAILED_UPDATE: &str = "Failed to update task.";
const FAILED_DELETE: &str = "Failed to delete task.";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub category: String,
    pub estimated_hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TaskId,
    pub title: String,
    pub due_date: String,
    pub category: String,
    pub estimated_hours: String,
}

/// Local validation, run before any service call. Returns one message per
/// failed rule; an empty estimated-hours input is acceptable (submitted as 0).
pub fn check_errors(title: &str, category: &str, estimated_hours: &str) -> Vec<String> {
    let mut failures = Vec::new();

    if title.trim().is_empty() {
        failures.push("Title is required.".to_string());
    }

    if category.trim().is_empty() {
        failures.push("Category is required.".to_string());
    }

    let hours = estimated_hours.trim();
    if !hours.is_empty() && hours.parse::<i64>().map_or(true, |h| h < 0) {
        failures.push("Estimated hours input is invalid.".to_string());
    }

    failures
}

fn parse_estimated_hours(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

fn parse_due_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT).ok()
}

fn canonical_sort(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.is_done, task.due_date.unwrap_or(NaiveDate::MAX)));
}

pub struct TaskController<A: TaskApi> {
    api: A,
    tasks: Vec<Task>,
    loading: bool,
    errors: Vec<String>,
    form: TaskForm,
    saving: bool,
    edit: Option<EditDraft>,
    updating: bool,
    toggle_busy_id: Option<TaskId>,
    delete_busy_id: Option<TaskId>,
}

impl<A: TaskApi> TaskController<A> {
    pub fn new(api: A) -> TaskController<A> {
        TaskController {
            api,
            tasks: Vec::new(),
            loading: false,
            errors: Vec::new(),
            form: TaskForm::default(),
            saving: false,
            edit: None,
            updating: false,
            toggle_busy_id: None,
            delete_busy_id: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub fn updating(&self) -> bool {
        self.updating
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.edit.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.edit.as_mut()
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.edit.as_ref().map(|draft| draft.id) == Some(id)
    }

    /// True while a toggle or delete for this row is in flight; the UI
    /// disables that row's controls.
    pub fn row_busy(&self, id: TaskId) -> bool {
        self.toggle_busy_id == Some(id) || self.delete_busy_id == Some(id)
    }

    /// Replaces the whole cache from the service; no merging. The cache is
    /// re-sorted with the canonical key so view order never depends on the
    /// transport.
    pub async fn load_tasks(&mut self) {
        self.errors.clear();
        self.loading = true;

        let result = self.api.get_tasks().await;
        self.loading = false;

        match result {
            Ok(mut tasks) => {
                canonical_sort(&mut tasks);
                self.tasks = tasks;
            }
            Err(e) => self.push_error(e, FAILED_LOAD),
        }
    }

    pub async fn add_task(&mut self) {
        self.errors.clear();

        let failures = check_errors(&self.form.title, &self.form.category, &self.form.estimated_hours);
        if !failures.is_empty() {
            self.errors = failures;
            return;
        }

        self.saving = true;
        let candidate = NewTask {
            title: self.form.title.trim().to_string(),
            is_done: false,
            due_date: parse_due_date(&self.form.due_date),
            category: self.form.category.trim().to_string(),
            estimated_hours: parse_estimated_hours(&self.form.estimated_hours),
        };

        let result = self.api.create_task(candidate).await;
        match result {
            Ok(_) => {
                self.form = TaskForm::default();
                self.load_tasks().await;
            }
            Err(e) => self.push_error(e, FAILED_CREATE),
        }
        self.saving = false;
    }

    /// Full-entity update with only `is_done` flipped; the service contract
    /// is full-replace, never a partial patch.
    pub async fn toggle_done(&mut self, id: TaskId) {
        if self.row_busy(id) || self.is_editing(id) {
            return;
        }

        self.errors.clear();

        let task = match self.tasks.iter().find(|task| task.id == id) {
            Some(task) => task.clone(),
            None => {
                self.errors.push(FAILED_UPDATE.to_string());
                return;
            }
        };

        self.toggle_busy_id = Some(id);
        let mut flipped = task;
        flipped.is_done = !flipped.is_done;

        let result = self.api.update_task(id, flipped).await;
        match result {
            Ok(()) => self.load_tasks().await,
            Err(e) => self.push_error(e, FAILED_UPDATE),
        }
        self.toggle_busy_id = None;
    }

    /// Snapshots the row's fields into string drafts; at most one row is in
    /// edit mode at a time.
    pub fn start_edit(&mut self, id: TaskId) {
        if self.row_busy(id) {
            return;
        }

        if let Some(task) = self.tasks.iter().find(|task| task.id == id) {
            self.edit = Some(EditDraft {
                id: task.id,
                title: task.title.clone(),
                due_date: task
                    .due_date
                    .map(|date| date.format(DATE_INPUT_FORMAT).to_string())
                    .unwrap_or_default(),
                category: task.category.clone(),
                estimated_hours: task.estimated_hours.to_string(),
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Validates the drafts, merges them over the original (id and done
    /// state carry over unchanged) and submits the full replacement entity.
    pub async fn save_edit(&mut self) {
        let draft = match self.edit.clone() {
            Some(draft) => draft,
            None => return,
        };

        self.errors.clear();

        let failures = check_errors(&draft.title, &draft.category, &draft.estimated_hours);
        if !failures.is_empty() {
            self.errors = failures;
            return;
        }

        let original = match self.tasks.iter().find(|task| task.id == draft.id) {
            Some(task) => task.clone(),
            None => {
                self.errors.push(FAILED_UPDATE.to_string());
                return;
            }
        };

        self.updating = true;
        let payload = Task {
            id: original.id,
            title: draft.title.trim().to_string(),
            is_done: original.is_done,
            due_date: parse_due_date(&draft.due_date),
            category: draft.category.trim().to_string(),
            estimated_hours: parse_estimated_hours(&draft.estimated_hours),
        };

        let result = self.api.update_task(original.id, payload).await;
        match result {
            Ok(()) => {
                self.edit = None;
                self.load_tasks().await;
            }
            Err(e) => self.push_error(e, FAILED_UPDATE),
        }
        self.updating = false;
    }

    pub async fn remove(&mut self, id: TaskId) {
        if self.row_busy(id) || self.is_editing(id) {
            return;
        }

        self.errors.clear();
        self.delete_busy_id = Some(id);

        let result = self.api.delete_task(id).await;
        match result {
            Ok(()) => self.load_tasks().await,
            Err(e) => self.push_error(e, FAILED_DELETE),
        }
        self.delete_busy_id = None;
    }

    /// Pure transform of the current cache; `Empty` carries the
    /// "nothing to export" notice and produces no file.
    pub fn export_tasks(&self) -> ExportOutcome {
        export::build_sheet(&self.tasks)
    }

    fn push_error(&mut self, e: ClientError, fallback: &str) {
        warn!("task service call failed: {e}");

        match e {
            // Server validation bodies carry one message per line.
            ClientError::Validation(body) => {
                for line in body.lines().filter(|line| !line.trim().is_empty()) {
                    self.errors.push(line.to_string());
                }
            }
            ClientError::NotFound => self.errors.push(ClientError::NotFound.to_string()),
            ClientError::Transport(_) => self.errors.push(fallback.to_string()),
        }
    }
}
