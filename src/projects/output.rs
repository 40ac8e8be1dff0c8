// Markdown body for iteration_<date>/output.md

use chrono::NaiveDate;

use super::state::ProjectState;
use crate::config::constants::DATE_FORMAT;

/// Render the artifact for the iteration on `date`, numbered `number`.
pub fn render_output(
    state: &ProjectState,
    date: NaiveDate,
    number: usize,
    notes: Option<&str>,
) -> String {
    let mut out = format!(
        "# {title}\n\n\
         - Project: `{slug}`\n\
         - Iteration: {number} ({date})\n\
         - Started: {started}\n\
         - Source idea: #{id}\n\n\
         ## Previous iterations\n\n",
        title = state.source_idea.title,
        slug = state.project_slug,
        date = date.format(DATE_FORMAT),
        started = state.created_date.format(DATE_FORMAT),
        id = state.source_idea.id,
    );

    let previous: Vec<_> = state.iterations.iter().filter(|e| e.date != date).collect();
    if previous.is_empty() {
        out.push_str("_None yet._\n");
    }
    for entry in previous {
        out.push_str(&format!(
            "- {} ({})\n",
            entry.date.format(DATE_FORMAT),
            entry.output_path
        ));
    }

    out.push_str("\n## Notes\n\n");
    match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => out.push_str(notes),
        None => out.push_str("_No notes recorded for this iteration._"),
    }
    out.push('\n');

    out
}
