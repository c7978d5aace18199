use crate::*;
use batchren::error::Result;
use predicates::prelude::*;

register_behavior_tests!(
    test_settings_show_defaults,
    test_settings_set_persists,
    test_settings_clear_resets,
    test_settings_reject_bad_padding,
    test_settings_reject_bad_search_pattern,
);

fn test_settings_show_defaults() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[rename]")
                .and(predicate::str::contains("base_name = \"Object\""))
                .and(predicate::str::contains("not written yet")),
        );
    assert!(!env.settings_path().exists());
    Ok(())
}

fn test_settings_set_persists() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["settings", "set", "--prefix", "SM_", "--padding", "3"])
        .args(["--number-position", "prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    env.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("prefix = \"SM_\"")
                .and(predicate::str::contains("padding = 3"))
                .and(predicate::str::contains("number_position = \"prefix\"")),
        );

    // Stored settings apply to later commands
    env.cmd()
        .args(["generate", "Rock"])
        .assert()
        .success()
        .stdout("001_SM_Rock\n");
    Ok(())
}

fn test_settings_clear_resets() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["settings", "set", "--suffix", "_LOD0", "--add-numbers=false"])
        .assert()
        .success();

    env.cmd()
        .args(["settings", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings cleared."));

    env.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("suffix = \"\"")
                .and(predicate::str::contains("base_name = \"\""))
                .and(predicate::str::contains("add_numbers = true")),
        );
    Ok(())
}

fn test_settings_reject_bad_padding() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["settings", "set", "--padding", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid setting 'padding'"));
    assert!(!env.settings_path().exists());
    Ok(())
}

fn test_settings_reject_bad_search_pattern() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["settings", "set", "--search", "("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search pattern"));
    assert!(!env.settings_path().exists());

    env.cmd()
        .args(["generate", "Rock"])
        .assert()
        .success()
        .stdout("Rock_01\n");
    Ok(())
}
