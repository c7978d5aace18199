use crate::*;
use batchren::error::Result;
use predicates::prelude::*;

register_behavior_tests!(
    test_generate_sorted_suffix_numbers,
    test_generate_prefix_number_before_prefix_text,
    test_generate_regex_replace,
    test_generate_group_number_needs_braces,
    test_generate_invalid_regex_fails,
    test_generate_reads_stdin,
    test_generate_json_output,
    test_generate_is_not_idempotent,
);

fn test_generate_sorted_suffix_numbers() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "Torus", "Cube", "Sphere"])
        .args(["--add-numbers", "--number-position", "suffix", "--separator", "_"])
        .args(["--start", "1", "--padding", "2", "--sort-by-name"])
        .assert()
        .success()
        .stdout("Cube_01\nSphere_02\nTorus_03\n");
    Ok(())
}

fn test_generate_prefix_number_before_prefix_text() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "Prop", "--prefix", "X_", "--add-numbers"])
        .args(["--number-position", "prefix", "--separator", "-"])
        .args(["--start", "5", "--padding", "3"])
        .assert()
        .success()
        .stdout("005-X_Prop\n");
    Ok(())
}

fn test_generate_regex_replace() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "Leg_A", "--add-numbers=false"])
        .args(["--search", "_A$", "--replace", "_Left"])
        .assert()
        .success()
        .stdout("Leg_Left\n");
    Ok(())
}

fn test_generate_group_number_needs_braces() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "Leg_A", "--add-numbers=false"])
        .args(["--search", r"^(\w+)_A$", "--replace", "$1_Left"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no group '1_Left'"));

    env.cmd()
        .args(["generate", "Leg_A", "--add-numbers=false"])
        .args(["--search", r"^(\w+)_A$", "--replace", "${1}_Left"])
        .assert()
        .success()
        .stdout("Leg_Left\n");
    Ok(())
}

fn test_generate_invalid_regex_fails() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "Cube", "--search", "("])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid search pattern"));
    Ok(())
}

fn test_generate_reads_stdin() -> Result<()> {
    let env = TestEnv::new();
    env.cmd()
        .args(["generate", "--remove-trailing-number", "--add-numbers=false"])
        .write_stdin("Cube.001\nCube.002.003\n\nSphere\n")
        .assert()
        .success()
        .stdout("Cube\nCube.002\nSphere\n");
    Ok(())
}

fn test_generate_json_output() -> Result<()> {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["generate", "--json", "Rock", "--prefix", "SM_"])
        .output()?;
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(rows[0]["original"], "Rock");
    assert_eq!(rows[0]["new"], "SM_Rock_01");
    Ok(())
}

fn test_generate_is_not_idempotent() -> Result<()> {
    let env = TestEnv::new();
    let first = env.cmd().args(["generate", "Cube", "Sphere"]).output()?;
    let first = String::from_utf8_lossy(&first.stdout).into_owned();
    assert_eq!(first, "Cube_01\nSphere_02\n");

    env.cmd()
        .arg("generate")
        .write_stdin(first)
        .assert()
        .success()
        .stdout("Cube_01_01\nSphere_02_02\n");
    Ok(())
}
