use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const BASE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">WG Tunnel</string>
    <string name="ok">OK</string>
    <string name="cancel">Cancel</string>
</resources>
"#;

const GERMAN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">WG Tunnel</string>
    <string name="ok">OK</string>
    <string name="legacy_button">Alte Taste</string>
</resources>
"#;

fn setup_base(test: &CliTest) -> Result<()> {
    test.write_res("values/strings.xml", BASE)
}

#[test]
fn test_prune_removes_orphaned_key() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removing unused key: legacy_button"));
    assert!(output.stdout.contains("Cleaned:"));
    assert_snapshot!(test.read_res("values-de/strings.xml")?, @r#"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
        <string name="app_name">WG Tunnel</string>
        <string name="ok">OK</string>
    </resources>
    "#);
    Ok(())
}

#[test]
fn test_prune_second_run_is_noop() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    run(test.command())?;
    let after_first = test.read_res("values-de/strings.xml")?;
    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("No unused keys in:"));
    assert!(output.stdout.contains("no unused keys found"));
    assert_eq!(test.read_res("values-de/strings.xml")?, after_first);
    Ok(())
}

#[test]
fn test_prune_keeps_subset_byte_for_byte() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    let french = "<resources>\n  <!-- keep me -->\n  <string name=\"ok\">D'accord</string>\n</resources>";
    test.write_res("values-fr/strings.xml", french)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert_eq!(test.read_res("values-fr/strings.xml")?, french);
    Ok(())
}

#[test]
fn test_prune_aborts_without_base_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("warning: Strings file not found"));
    assert!(output.stderr.contains("No source keys found. Aborting."));
    assert!(!output.stdout.contains("Checking:"));
    assert_eq!(test.read_res("values-de/strings.xml")?, GERMAN);
    Ok(())
}

#[test]
fn test_prune_aborts_on_base_without_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_res("values/strings.xml", "<resources>\n</resources>\n")?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("No source keys found. Aborting."));
    assert_eq!(test.read_res("values-de/strings.xml")?, GERMAN);
    Ok(())
}

#[test]
fn test_prune_continues_after_malformed_translation() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    let broken = "<resources>\n    <string name=\"legacy\">x</strin>\n</resources>\n";
    test.write_res("values-de/strings.xml", broken)?;
    test.write_res("values-es/strings.xml", GERMAN)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("error: Failed to parse"));
    assert!(output.stdout.contains("1 file(s) could not be processed"));
    assert_eq!(test.read_res("values-de/strings.xml")?, broken);
    assert!(
        !test
            .read_res("values-es/strings.xml")?
            .contains("legacy_button")
    );
    Ok(())
}

#[test]
fn test_prune_skips_dirs_without_strings() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-night/colors.xml", "<resources/>")?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let mut cmd = test.command();
    cmd.arg("--verbose");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Skipping"));
    assert!(!output.stdout.contains("values-night/strings.xml"));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn test_prune_never_cleans_base_dir() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_file(".strprunerc.json", r#"{ "localePattern": "values*" }"#)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("Checking:"));
    assert_eq!(test.read_res("values/strings.xml")?, BASE);
    Ok(())
}

#[test]
fn test_prune_passes_through_other_resources() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res(
        "values-it/strings.xml",
        r#"<resources>
    <string name="gone">Via</string>
    <plurals name="gone_count">
        <item quantity="one">%d tunnel</item>
    </plurals>
    <string name="cancel">Annulla</string>
</resources>
"#,
    )?;

    run(test.command())?;

    assert_snapshot!(test.read_res("values-it/strings.xml")?, @r#"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
        <plurals name="gone_count">
            <item quantity="one">%d tunnel</item>
        </plurals>
        <string name="cancel">Annulla</string>
    </resources>
    "#);
    Ok(())
}

#[test]
fn test_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let mut cmd = test.command();
    cmd.arg("--dry-run");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Unused key: legacy_button"));
    assert!(output.stdout.contains("Would remove 1 key(s) from 1 file(s)."));
    assert_eq!(test.read_res("values-de/strings.xml")?, GERMAN);
    Ok(())
}

#[test]
fn test_check_fails_on_orphans() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-de/strings.xml", GERMAN)?;

    let mut cmd = test.command();
    cmd.arg("--check");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert_eq!(test.read_res("values-de/strings.xml")?, GERMAN);
    Ok(())
}

#[test]
fn test_check_passes_on_clean_tree() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res("values-de/strings.xml", BASE)?;

    let mut cmd = test.command();
    cmd.arg("--check");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    Ok(())
}

#[test]
fn test_res_dir_and_file_name_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("res/values/app_strings.xml", BASE)?;
    test.write_file("res/values-de/app_strings.xml", GERMAN)?;

    let mut cmd = test.command();
    cmd.args(["--res-dir", "res", "--file-name", "app_strings.xml"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(
        !test
            .read_file("res/values-de/app_strings.xml")?
            .contains("legacy_button")
    );
    Ok(())
}

#[test]
fn test_config_res_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".strprunerc.json", r#"{ "resRoot": "lib/res" }"#)?;
    test.write_file("lib/res/values/strings.xml", BASE)?;
    test.write_file("lib/res/values-de/strings.xml", GERMAN)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(
        !test
            .read_file("lib/res/values-de/strings.xml")?
            .contains("legacy_button")
    );
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".strprunerc.json", r#"{ "localePattern": "values-[" }"#)?;
    setup_base(&test)?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error:"));
    assert!(output.stderr.contains("localePattern"));
    Ok(())
}

#[test]
fn test_base_with_internal_entities() -> Result<()> {
    let test = CliTest::new()?;
    test.write_res(
        "values/strings.xml",
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE resources [
<!ENTITY app "WG Tunnel">
]>
<resources>
    <string name="title">&app; settings</string>
    <string name="ok">OK</string>
</resources>
"#,
    )?;
    test.write_res(
        "values-de/strings.xml",
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE resources [
<!ENTITY app "WG Tunnel">
]>
<resources>
    <string name="title">&app; Einstellungen</string>
    <string name="legacy_button">Alte Taste</string>
    <string name="ok">OK</string>
</resources>
"#,
    )?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stderr.is_empty());
    assert_snapshot!(test.read_res("values-de/strings.xml")?, @r#"
    <?xml version="1.0" encoding="utf-8"?>
    <!DOCTYPE resources [
    <!ENTITY app "WG Tunnel">
    ]>
    <resources>
        <string name="title">&app; Einstellungen</string>
        <string name="ok">OK</string>
    </resources>
    "#);
    Ok(())
}

#[test]
fn test_verbose_reports_locale_and_config_source() -> Result<()> {
    let test = CliTest::new()?;
    setup_base(&test)?;
    test.write_res(
        "values-pt-rBR/strings.xml",
        "<resources>\n    <string name=\"ok\">OK</string>\n    <string name=\"old\">Velho</string>\n</resources>\n",
    )?;

    let mut cmd = test.command();
    cmd.arg("--verbose");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("Config: defaults (no config file found)")
    );
    assert!(output.stdout.contains("[pt-rBR]"));
    assert!(output.stdout.contains("  added XML declaration"));
    Ok(())
}
