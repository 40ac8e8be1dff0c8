// Subcommand handlers
//
// Each handler does the work through the library and returns the text to
// print, so formatting is testable without capturing stdout.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use super::args::Command;
use crate::config::Config;
use crate::ideas::{self, AddOptions, Idea};
use crate::projects::{BatchSummary, Discrepancy, IterationOutcome, ProjectIterator, ProjectState};

pub fn handle_command(command: Command, config: &Config) -> Result<String> {
    let today = Local::now().date_naive();

    match command {
        Command::Idea { text, force, date } => {
            let text = text.join(" ");
            let idea = ideas::add_idea(
                config,
                &text,
                date.unwrap_or(today),
                &AddOptions { force },
            )
            .with_context(|| {
                format!("Failed to add idea to {}", config.ideas_path().display())
            })?;
            Ok(format_idea_added(&idea))
        }
        Command::Ideas { json } => {
            let ideas = ideas::list_ideas(config).with_context(|| {
                format!("Failed to read ideas from {}", config.ideas_path().display())
            })?;
            if json {
                serde_json::to_string_pretty(&ideas).context("Failed to serialize ideas")
            } else {
                Ok(format_idea_list(&ideas))
            }
        }
        Command::Iterate {
            slug,
            all,
            date,
            notes,
        } => {
            let date = date.unwrap_or(today);
            let iterator = ProjectIterator::new(config);
            if all {
                let summary = iterator
                    .iterate_all(date, notes.as_deref())
                    .context("Batch iteration aborted")?;
                return Ok(format_batch(&summary));
            }
            let Some(slug) = slug else {
                bail!("A project slug is required unless --all is given");
            };
            let outcome = iterator
                .iterate(&slug, date, notes.as_deref())
                .with_context(|| format!("Failed to iterate project '{}'", slug))?;
            Ok(format_outcome(&outcome))
        }
        Command::Status { slug } => {
            let iterator = ProjectIterator::new(config);
            let state = iterator
                .load_state(&slug)
                .with_context(|| format!("Failed to read state for '{}'", slug))?
                .with_context(|| format!("Project '{}' has not been started", slug))?;
            let problems = iterator.check(&slug)?;
            let report = format_status(&state, &problems);
            if problems.is_empty() {
                Ok(report)
            } else {
                bail!("{}\nProject '{}' is inconsistent with its folders", report, slug)
            }
        }
    }
}

fn format_idea_added(idea: &Idea) -> String {
    format!("Added idea #{}: {}\nSlug: {}", idea.id, idea.title, idea.project_slug)
}

fn format_idea_list(ideas: &[Idea]) -> String {
    if ideas.is_empty() {
        return "No ideas recorded yet.".to_string();
    }

    let mut output = format!("Ideas ({}):\n", ideas.len());
    for idea in ideas {
        output.push_str(&format!(
            "  {:>3}. {} [{}] {}\n",
            idea.id,
            idea.created_date,
            idea.project_slug,
            idea.title
        ));
    }
    output.trim_end().to_string()
}

fn format_outcome(outcome: &IterationOutcome) -> String {
    let mut output = String::new();
    if outcome.created_project {
        output.push_str(&format!("Created project '{}'\n", outcome.slug));
    }
    let verb = if outcome.new_entry { "Wrote" } else { "Rewrote" };
    output.push_str(&format!(
        "{} iteration {} ({}) -> {}",
        verb,
        outcome.number,
        outcome.date,
        outcome.output_path.display()
    ));
    output
}

fn format_batch(summary: &BatchSummary) -> String {
    if summary.written.is_empty() && summary.skipped.is_empty() {
        return "No projects found.".to_string();
    }

    let mut output = String::new();
    for outcome in &summary.written {
        output.push_str(&format!(
            "{}: iteration {} -> {}\n",
            outcome.slug,
            outcome.number,
            outcome.output_path.display()
        ));
    }
    for skipped in &summary.skipped {
        output.push_str(&format!("Skipping {}: {}\n", skipped.slug, skipped.reason));
    }
    output.push_str(&format!(
        "{} written, {} skipped",
        summary.written.len(),
        summary.skipped.len()
    ));
    output
}

fn format_status(state: &ProjectState, problems: &[Discrepancy]) -> String {
    let mut output = format!(
        "Project: {}\nIdea: #{} {}\nStarted: {}\nIterations: {}\n",
        state.project_slug,
        state.source_idea.id,
        state.source_idea.title,
        state.created_date,
        state.iterations.len()
    );
    for (i, entry) in state.iterations.iter().enumerate() {
        output.push_str(&format!("  {}. {} {}\n", i + 1, entry.date, entry.output_path));
    }
    if let Some(last) = last_iteration(state) {
        output.push_str(&format!("Last iteration: {}\n", last));
    }

    if problems.is_empty() {
        output.push_str("State matches folders on disk.");
    } else {
        output.push_str("Problems:\n");
        for problem in problems {
            output.push_str(&format!("  - {}\n", problem));
        }
    }
    output.trim_end().to_string()
}

/// Latest iteration date; entries are append-only, not sorted
fn last_iteration(state: &ProjectState) -> Option<NaiveDate> {
    state.iterations.iter().map(|e| e.date).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::SourceIdea;
    use std::path::PathBuf;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup() -> (Config, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (Config::new(dir.path()), dir)
    }

    #[test]
    fn test_idea_then_iterate_then_status() {
        let (config, _dir) = setup();

        let added = handle_command(
            Command::Idea {
                text: vec!["My".into(), "Cool".into(), "Idea".into()],
                force: false,
                date: Some(d("2024-01-01")),
            },
            &config,
        )
        .unwrap();
        assert!(added.ends_with("Slug: my-cool-idea"));

        let iterated = handle_command(
            Command::Iterate {
                slug: Some("my-cool-idea".into()),
                all: false,
                date: Some(d("2024-01-01")),
                notes: None,
            },
            &config,
        )
        .unwrap();
        assert!(iterated.starts_with("Created project 'my-cool-idea'"));

        let status = handle_command(
            Command::Status {
                slug: "my-cool-idea".into(),
            },
            &config,
        )
        .unwrap();
        assert!(status.contains("Iterations: 1"));
        assert!(status.ends_with("State matches folders on disk."));
    }

    #[test]
    fn test_errors_carry_context() {
        let (config, _dir) = setup();
        let err = handle_command(
            Command::Iterate {
                slug: Some("ghost".into()),
                all: false,
                date: None,
                notes: None,
            },
            &config,
        )
        .unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to iterate project 'ghost'"));
        assert!(chain.contains("No idea or project found"));
    }

    #[test]
    fn test_empty_listings() {
        let (config, _dir) = setup();
        let listing = handle_command(Command::Ideas { json: false }, &config).unwrap();
        assert_eq!(listing, "No ideas recorded yet.");
        let json = handle_command(Command::Ideas { json: true }, &config).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_format_outcome_rewrite() {
        let outcome = IterationOutcome {
            slug: "x".into(),
            date: d("2024-01-01"),
            number: 3,
            output_path: PathBuf::from("/p/x/iteration_2024-01-01/output.md"),
            created_project: false,
            new_entry: false,
        };
        assert_eq!(
            format_outcome(&outcome),
            "Rewrote iteration 3 (2024-01-01) -> /p/x/iteration_2024-01-01/output.md"
        );
    }

    #[test]
    fn test_last_iteration_uses_latest_date() {
        let mut state = ProjectState {
            project_slug: "x".into(),
            created_date: d("2024-01-01"),
            source_idea: SourceIdea {
                id: 1,
                title: "X".into(),
            },
            iterations: Vec::new(),
        };
        assert_eq!(last_iteration(&state), None);
        state.record_iteration(d("2024-03-01"));
        state.record_iteration(d("2024-02-01"));
        assert_eq!(last_iteration(&state), Some(d("2024-03-01")));
    }
}
