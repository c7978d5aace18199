use crate::*;
use batchren::error::Result;
use predicates::prelude::*;

register_behavior_tests!(
    test_undo_restores_last_rename,
    test_undo_brings_objects_back_from_group,
    test_undo_restores_swapped_names,
    test_undo_refuses_taken_paths,
    test_undo_other_storage_is_rejected,
    test_undo_without_rename,
);

fn test_undo_restores_last_rename() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/Cube.001", "scene/Cube.002"])?;

    env.cmd()
        .args(["rename", "scene/", "--yes", "--remove-trailing-number"])
        .assert()
        .success();
    assert_eq!(env.files_in("scene")?, ["Cube_01", "Cube_02"]);
    assert!(env.journal_path().exists());

    env.cmd()
        .args(["undo", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 2 objects"));
    assert_eq!(env.files_in("scene")?, ["Cube.001", "Cube.002"]);
    assert_eq!(env.read("scene/Cube.001")?, "scene/Cube.001");
    assert!(!env.journal_path().exists());

    // Only the last rename is kept
    env.cmd()
        .args(["undo", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to undo"));
    Ok(())
}

fn test_undo_brings_objects_back_from_group() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/Chair", "scene/Table"])?;

    env.cmd()
        .args(["rename", "scene", "--yes", "--group", "Furniture"])
        .assert()
        .success();
    assert_eq!(env.files_in("Furniture")?, ["Chair_01", "Table_02"]);

    env.cmd().args(["undo", "--yes"]).assert().success();
    assert_eq!(env.files_in("scene")?, ["Chair", "Table"]);
    assert!(env.files_in("Furniture")?.is_empty());
    Ok(())
}

fn test_undo_restores_swapped_names() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["x_1", "x_2"])?;

    // Unsorted numbering on the reversed selection swaps the two names
    env.cmd()
        .args(["rename", "x_2", "x_1", "--yes", "--sort-by-name=false"])
        .args(["--use-base-name", "--base-name", "x", "--padding", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 objects"));
    assert_eq!(env.read("x_1")?, "x_2");
    assert_eq!(env.read("x_2")?, "x_1");

    env.cmd().args(["undo", "--yes"]).assert().success();
    assert_eq!(env.files_in(".")?, ["x_1", "x_2"]);
    assert_eq!(env.read("x_1")?, "x_1");
    assert_eq!(env.read("x_2")?, "x_2");
    Ok(())
}

fn test_undo_refuses_taken_paths() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["props/Crate"])?;

    env.cmd()
        .args(["rename", "props/", "--yes", "--prefix", "SM_"])
        .assert()
        .success();
    env.seed(&["props/Crate"])?;

    env.cmd()
        .args(["undo", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(env.files_in("props")?, ["Crate", "SM_Crate_01"]);
    assert!(env.journal_path().exists());
    Ok(())
}

fn test_undo_other_storage_is_rejected() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube"])?;
    env.mkdir("elsewhere")?;

    env.cmd().args(["rename", "Cube", "--yes"]).assert().success();

    let elsewhere = env.root().join("elsewhere");
    env.cmd()
        .arg("--root")
        .arg(&elsewhere)
        .args(["undo", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the last rename was applied to"));
    assert_eq!(env.files_in(".")?, ["Cube_01"]);
    Ok(())
}

fn test_undo_without_rename() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube", "Cube.001"])?;

    // A rejected rename records nothing
    env.cmd()
        .args(["rename", "./", "--yes", "--add-numbers=false"])
        .args(["--use-base-name", "--base-name", "Chair"])
        .assert()
        .failure();

    env.cmd()
        .args(["undo", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to undo"));
    assert_eq!(env.files_in(".")?, ["Cube", "Cube.001"]);
    Ok(())
}
