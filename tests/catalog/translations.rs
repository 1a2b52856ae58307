//! Translations survive every scan-cycle outcome.

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::TestProject;

#[test]
fn test_translations_survive_staleness_and_revival() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Welcome");"#)?;
    let first = project.sync()?;
    let id = first.snapshot.keys[0].id.clone();

    {
        let gateway = project.gateway()?;
        gateway.store().upsert_translation(&id, "fr-FR", "Bienvenue")?;
        gateway.store().upsert_translation(&id, "de-DE", "Willkommen")?;
    }

    // Key disappears, then comes back; the translations ride along untouched
    project.write_file("src/app.tsx", "export {};")?;
    let stale = project.sync()?;
    assert_eq!(stale.snapshot.translations.len(), 2);

    project.write_file("src/app.tsx", r#"t("Welcome");"#)?;
    let revived = project.sync()?;

    assert_eq!(revived.snapshot.translations.len(), 2);
    let fr = revived.snapshot.live_translation(&id, "fr-FR").unwrap();
    assert_eq!(fr.text, "Bienvenue");

    Ok(())
}

#[test]
fn test_scan_never_creates_translations() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Hello"); t("World");"#)?;
    let outcome = project.sync()?;

    assert_eq!(outcome.snapshot.keys.len(), 2);
    assert!(outcome.snapshot.translations.is_empty());

    Ok(())
}

#[test]
fn test_soft_deleted_translation_stays_in_catalog() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Hello");"#)?;
    let first = project.sync()?;
    let id = first.snapshot.keys[0].id.clone();

    let gateway = project.gateway()?;
    gateway.store().upsert_translation(&id, "fr-FR", "Bonjour")?;
    assert!(gateway.store().soft_delete_translation(&id, "fr-FR")?);

    let snapshot = gateway.store().snapshot();
    assert_eq!(snapshot.translations.len(), 1);
    assert!(snapshot.translations[0].is_deleted);
    assert!(snapshot.live_translation(&id, "fr-FR").is_none());

    // Another scan leaves the tombstone alone
    let rescanned = project.sync()?;
    assert_eq!(rescanned.snapshot.translations.len(), 1);
    assert!(rescanned.snapshot.translations[0].is_deleted);

    Ok(())
}

#[test]
fn test_purge_removes_owned_translations_only() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("src/keep.tsx", r#"t("Keep");"#)?;
    project.write_file("src/drop.tsx", r#"t("Drop");"#)?;
    let first = project.sync()?;

    let keep_id = first
        .snapshot
        .keys
        .iter()
        .find(|k| k.text == "Keep")
        .unwrap()
        .id
        .clone();
    let drop_id = first
        .snapshot
        .keys
        .iter()
        .find(|k| k.text == "Drop")
        .unwrap()
        .id
        .clone();

    {
        let gateway = project.gateway()?;
        gateway.store().upsert_translation(&keep_id, "fr-FR", "Garde")?;
        gateway.store().upsert_translation(&drop_id, "fr-FR", "Jette")?;
    }

    project.remove_file("src/drop.tsx")?;
    project.sync()?;

    let gateway = project.gateway()?;
    let future = chrono::Utc::now() + chrono::Duration::days(1);
    let outcome = gateway.store().purge_keys(future)?;

    assert_eq!(outcome.purged_keys.len(), 1);
    assert_eq!(outcome.removed_translations, 1);

    let snapshot = gateway.store().snapshot();
    assert_eq!(snapshot.keys.len(), 1);
    assert_eq!(snapshot.translations.len(), 1);
    assert_eq!(snapshot.translations[0].key_id, keep_id);

    Ok(())
}

#[test]
fn test_snapshot_view_shape() -> Result<()> {
    let project = TestProject::with_file("src/app.tsx", r#"t("Hello");"#)?;
    let first = project.sync()?;
    let id = first.snapshot.keys[0].id.clone();

    let gateway = project.gateway()?;
    gateway.store().upsert_translation(&id, "fr-FR", "Bonjour")?;

    let view = gateway.snapshot();
    assert_eq!(view.config.langs, vec!["fr-FR", "de-DE"]);
    assert_eq!(view.keys.len(), 1);
    assert_eq!(view.keys[0].translations.len(), 1);
    assert_eq!(view.keys[0].translations[0].lang, "fr-FR");
    assert_eq!(view.keys[0].translations[0].text, "Bonjour");
    assert!(!view.keys[0].translations[0].is_deleted);

    Ok(())
}
