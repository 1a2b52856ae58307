//! Key lifecycle across repeated scan-and-reconcile cycles.

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::TestProject;

#[test]
fn test_new_string_creates_one_key() -> Result<()> {
    let project = TestProject::with_file(
        "src/app.tsx",
        r#"export const greeting = t("Hello", { context: "greeting" });"#,
    )?;

    let outcome = project.sync()?;

    assert_eq!(outcome.stats.created, 1);
    assert_eq!(outcome.snapshot.keys.len(), 1);
    let key = &outcome.snapshot.keys[0];
    assert_eq!(key.text, "Hello");
    assert_eq!(key.context, Some("greeting".to_string()));
    assert_eq!(key.unused_since, None);

    Ok(())
}

#[test]
fn test_rescan_without_changes_is_idempotent() -> Result<()> {
    let project = TestProject::with_file(
        "src/app.tsx",
        r#"t("Hello"); t("World", { context: "globe" });"#,
    )?;

    let first = project.sync()?;
    let second = project.sync()?;

    assert_eq!(second.stats.created, 0);
    assert_eq!(second.stats.revived, 0);
    assert_eq!(second.stats.marked_unused, 0);
    // Identical catalog, including the commit counter: no empty commits
    assert_eq!(second.snapshot, first.snapshot);

    Ok(())
}

#[test]
fn test_removed_string_is_marked_unused_not_deleted() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Ephemeral");"#)?;
    let first = project.sync()?;
    let id = first.snapshot.keys[0].id.clone();

    project.write_file("src/app.tsx", "export {};")?;
    let second = project.sync()?;

    assert_eq!(second.stats.marked_unused, 1);
    assert_eq!(second.snapshot.keys.len(), 1);
    let key = &second.snapshot.keys[0];
    assert_eq!(key.id, id);
    assert!(key.unused_since.is_some());

    Ok(())
}

#[test]
fn test_staleness_timestamp_is_first_seen_stale() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Going away");"#)?;
    project.sync()?;

    project.write_file("src/app.tsx", "export {};")?;
    let second = project.sync()?;
    let stamped = second.snapshot.keys[0].unused_since;

    // Still absent on the next scan: the original timestamp is kept
    let third = project.sync()?;
    assert_eq!(third.snapshot.keys[0].unused_since, stamped);
    assert_eq!(third.stats.marked_unused, 0);

    Ok(())
}

#[test]
fn test_returning_string_revives_same_key() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Comeback");"#)?;
    let first = project.sync()?;
    let id = first.snapshot.keys[0].id.clone();

    project.write_file("src/app.tsx", "export {};")?;
    project.sync()?;

    project.write_file("src/app.tsx", r#"t("Comeback");"#)?;
    let third = project.sync()?;

    assert_eq!(third.stats.revived, 1);
    assert_eq!(third.stats.created, 0);
    assert_eq!(third.snapshot.keys.len(), 1);
    let key = &third.snapshot.keys[0];
    assert_eq!(key.id, id);
    assert_eq!(key.unused_since, None);

    Ok(())
}

#[test]
fn test_identical_text_in_different_contexts_tracked_independently() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("src/menu.tsx", r#"t("Open", { context: "menu" });"#)?;
    project.write_file("src/door.tsx", r#"t("Open", { context: "door" });"#)?;

    let first = project.sync()?;
    assert_eq!(first.stats.created, 2);

    // Drop one context; only that key goes stale
    project.remove_file("src/door.tsx")?;
    let second = project.sync()?;

    assert_eq!(second.stats.marked_unused, 1);
    let menu_key = second
        .snapshot
        .keys
        .iter()
        .find(|k| k.context.as_deref() == Some("menu"))
        .unwrap();
    let door_key = second
        .snapshot
        .keys
        .iter()
        .find(|k| k.context.as_deref() == Some("door"))
        .unwrap();
    assert_eq!(menu_key.unused_since, None);
    assert!(door_key.unused_since.is_some());

    Ok(())
}

#[test]
fn test_same_pair_in_two_files_is_one_key() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("src/a.tsx", r#"t("Shared");"#)?;
    project.write_file("src/b.tsx", r#"t("Shared");"#)?;

    let outcome = project.sync()?;

    assert_eq!(outcome.snapshot.keys.len(), 1);
    let key = &outcome.snapshot.keys[0];
    assert_eq!(key.sources.len(), 2);
    assert_eq!(key.sources[0].file, "src/a.tsx");
    assert_eq!(key.sources[1].file, "src/b.tsx");

    // Removing one occurrence keeps the key alive
    project.remove_file("src/b.tsx")?;
    let second = project.sync()?;
    assert_eq!(second.stats.marked_unused, 0);
    assert_eq!(second.snapshot.keys[0].unused_since, None);

    Ok(())
}

#[test]
fn test_text_drift_creates_new_key_and_ages_old_one() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Sign in");"#)?;
    let first = project.sync()?;
    let old_id = first.snapshot.keys[0].id.clone();

    project.write_file("src/app.tsx", r#"t("Log in");"#)?;
    let second = project.sync()?;

    assert_eq!(second.stats.created, 1);
    assert_eq!(second.stats.marked_unused, 1);
    assert_eq!(second.snapshot.keys.len(), 2);
    let old = second.snapshot.key_by_id(&old_id).unwrap();
    assert!(old.unused_since.is_some());

    Ok(())
}

#[test]
fn test_tagged_template_convention() -> Result<()> {
    let project = TestProject::with_file("src/app.ts", "export const s = t`Plain tagged`;\n")?;

    let outcome = project.sync()?;

    assert_eq!(outcome.snapshot.keys.len(), 1);
    assert_eq!(outcome.snapshot.keys[0].text, "Plain tagged");
    assert_eq!(outcome.snapshot.keys[0].context, None);

    Ok(())
}

#[test]
fn test_unparsable_file_does_not_abort_scan() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("src/good.tsx", r#"t("Fine");"#)?;
    project.write_file("src/bad.ts", "const x = = 1;")?;

    let outcome = project.sync()?;

    assert_eq!(outcome.snapshot.keys.len(), 1);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics[0].file.ends_with("bad.ts"));

    Ok(())
}

#[test]
fn test_purge_is_explicit_and_respects_cutoff() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Doomed");"#)?;
    project.sync()?;

    project.write_file("src/app.tsx", "export {};")?;
    project.sync()?;

    let gateway = project.gateway()?;

    // Cutoff in the past: the freshly-stale key survives
    let past = chrono::Utc::now() - chrono::Duration::days(30);
    let kept = gateway.store().purge_keys(past)?;
    assert!(kept.purged_keys.is_empty());

    // Cutoff in the future: now it goes, along with nothing else
    let future = chrono::Utc::now() + chrono::Duration::days(1);
    let purged = gateway.store().purge_keys(future)?;
    assert_eq!(purged.purged_keys.len(), 1);
    assert_eq!(purged.purged_keys[0].text, "Doomed");
    assert!(gateway.store().snapshot().keys.is_empty());

    Ok(())
}
