// Integration tests for the idea generator
//
// Exercises add_idea against a real ideas.json in a temp root: slug
// derivation, collision suffixes, admission rules and the no-partial-write
// guarantee on a corrupt store.

use anyhow::Result;
use chrono::NaiveDate;
use idealoop::config::Config;
use idealoop::ideas::{add_idea, list_ideas, slugify, AddOptions};
use idealoop::Error;
use std::fs;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn temp_config() -> (Config, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    (Config::new(dir.path()), dir)
}

#[test]
fn test_add_idea_creates_store_file() -> Result<()> {
    let (config, _dir) = temp_config();
    assert!(!config.ideas_path().exists());

    let idea = add_idea(&config, "My Cool Idea", date("2024-01-01"), &AddOptions::default())?;
    assert_eq!(idea.project_slug, "my-cool-idea");
    assert!(config.ideas_path().exists(), "ideas.json should be created");

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(config.ideas_path())?)?;
    let array = raw.as_array().expect("store is a JSON array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["id"], 1);
    assert_eq!(array[0]["title"], "My Cool Idea");
    assert_eq!(array[0]["project_slug"], "my-cool-idea");
    assert_eq!(array[0]["created_date"], "2024-01-01");
    Ok(())
}

#[test]
fn test_ideas_accumulate_in_order() -> Result<()> {
    let (config, _dir) = temp_config();
    for text in ["Freight quote aggregator", "Lab equipment resale", "Shared GPU credits"] {
        add_idea(&config, text, date("2024-01-01"), &AddOptions { force: true })?;
    }

    let ideas = list_ideas(&config)?;
    let slugs: Vec<_> = ideas.iter().map(|i| i.project_slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec!["freight-quote-aggregator", "lab-equipment-resale", "shared-gpu-credits"]
    );
    let ids: Vec<_> = ideas.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_slug_collision_across_invocations() -> Result<()> {
    let (config, _dir) = temp_config();
    add_idea(&config, "Pet-sitting swaps", date("2024-01-01"), &AddOptions::default())?;
    let second = add_idea(&config, "Pet sitting: swaps!", date("2024-01-02"), &AddOptions::default())?;
    assert_eq!(second.project_slug, "pet-sitting-swaps-2");
    Ok(())
}

#[test]
fn test_slugify_is_stable_for_identical_titles() {
    let a = slugify("Spare parts exchange for e-bikes", 60);
    let b = slugify("Spare parts exchange for e-bikes", 60);
    assert_eq!(a, b);
    assert_eq!(a, "spare-parts-exchange-for-e-bikes");
}

#[test]
fn test_duplicate_leaves_store_unchanged() -> Result<()> {
    let (config, _dir) = temp_config();
    add_idea(&config, "My Cool Idea", date("2024-01-01"), &AddOptions::default())?;
    let before = fs::read(config.ideas_path())?;

    let err = add_idea(&config, "my cool   idea", date("2024-01-05"), &AddOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Duplicate { .. }));
    assert_eq!(fs::read(config.ideas_path())?, before);
    Ok(())
}

#[test]
fn test_blacklisted_idea_is_rejected_unless_forced() -> Result<()> {
    let (config, _dir) = temp_config();

    let err = add_idea(&config, "AI chatbot for dentists", date("2024-01-01"), &AddOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Rejected { ref keyword } if keyword == "chatbot"));
    assert!(!config.ideas_path().exists(), "rejected idea must not create the store");

    let forced = add_idea(
        &config,
        "AI chatbot for dentists",
        date("2024-01-01"),
        &AddOptions { force: true },
    )?;
    assert_eq!(forced.project_slug, "ai-chatbot-for-dentists");
    Ok(())
}

#[test]
fn test_custom_blacklist_from_config() -> Result<()> {
    let (mut config, _dir) = temp_config();
    config.blacklist = vec!["crypto".to_string()];

    add_idea(&config, "Weather alerts for farmers", date("2024-01-01"), &AddOptions::default())?;
    let err = add_idea(&config, "Crypto tax helper", date("2024-01-01"), &AddOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Rejected { .. }));
    Ok(())
}

#[test]
fn test_corrupt_store_aborts_without_writing() -> Result<()> {
    let (config, _dir) = temp_config();
    fs::write(config.ideas_path(), "[{\"id\": 1, \"title\": ")?;

    let err = add_idea(&config, "Anything", date("2024-01-01"), &AddOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::CorruptStore { .. }));
    assert_eq!(fs::read_to_string(config.ideas_path())?, "[{\"id\": 1, \"title\": ");
    assert!(list_ideas(&config).is_err());
    Ok(())
}

#[test]
fn test_long_titles_are_capped() -> Result<()> {
    let (mut config, _dir) = temp_config();
    config.max_slug_len = 20;
    let idea = add_idea(
        &config,
        "A very long description of an idea that keeps going",
        date("2024-01-01"),
        &AddOptions::default(),
    )?;
    assert_eq!(idea.project_slug, "a-very-long");
    assert!(idea.project_slug.chars().count() <= 20);
    Ok(())
}
