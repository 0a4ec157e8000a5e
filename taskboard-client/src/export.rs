use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::api::Task;

pub const EXPORT_FILE_NAME: &str = "Tasks.csv";
pub const EMPTY_EXPORT_NOTICE: &str = "No tasks available to export.";

pub const COLUMN_LABELS: [&str; 6] = [
    "ID",
    "Title",
    "Done",
    "Due Date",
    "Category",
    "Estimated Hours",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Sheet(TaskSheet),
    /// Nothing to export; a notice, not a failure.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSheet {
    pub rows: Vec<[String; 6]>,
    /// Per-column width hint: the longest stringified value, label included.
    pub column_widths: [usize; 6],
}

pub fn build_sheet(tasks: &[Task]) -> ExportOutcome {
    if tasks.is_empty() {
        return ExportOutcome::Empty;
    }

    let rows: Vec<[String; 6]> = tasks.iter().map(task_row).collect();

    let mut column_widths = COLUMN_LABELS.map(str::len);
    for row in &rows {
        for (width, cell) in column_widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    ExportOutcome::Sheet(TaskSheet {
        rows,
        column_widths,
    })
}

fn task_row(task: &Task) -> [String; 6] {
    [
        task.id.to_string(),
        task.title.clone(),
        task.is_done.to_string(),
        task.due_date.map(|date| date.to_string()).unwrap_or_default(),
        task.category.clone(),
        task.estimated_hours.to_string(),
    ]
}

impl TaskSheet {
    pub fn file_name(&self) -> &'static str {
        EXPORT_FILE_NAME
    }

    pub fn to_csv(&self) -> String {
        let mut csv = COLUMN_LABELS.join(",");
        csv.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }

        csv
    }

    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, self.to_csv())?;
        Ok(path)
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
