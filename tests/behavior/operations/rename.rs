use crate::*;
use batchren::error::Result;
use predicates::prelude::*;

register_behavior_tests!(
    test_rename_directory_with_numbers,
    test_rename_into_group,
    test_rename_keep_extension,
    test_rename_keep_extension_strips_numbers,
    test_rename_conflict_changes_nothing,
    test_rename_existing_target_changes_nothing,
    test_rename_empty_selection,
    test_rename_missing_path,
    test_rename_requires_confirmation,
    test_rename_invalid_regex_changes_nothing,
);

fn test_rename_directory_with_numbers() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/Sphere", "scene/Cube.002", "scene/Cube.001"])?;

    env.cmd()
        .args(["rename", "scene/", "--yes", "--remove-trailing-number"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 3 objects"));

    assert_eq!(env.files_in("scene")?, ["Cube_01", "Cube_02", "Sphere_03"]);
    // Numbering follows the sorted original names
    assert_eq!(env.read("scene/Cube_01")?, "scene/Cube.001");
    assert_eq!(env.read("scene/Cube_02")?, "scene/Cube.002");
    Ok(())
}

fn test_rename_into_group() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/Chair", "scene/Table", "scene/Lamp"])?;

    env.cmd()
        .args(["rename", "scene/Chair", "scene/Table", "--yes"])
        .args(["--group", "Furniture", "--prefix", "SM_"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 objects"));

    assert_eq!(env.files_in("Furniture")?, ["SM_Chair_01", "SM_Table_02"]);
    assert_eq!(env.files_in("scene")?, ["Lamp"]);
    Ok(())
}

fn test_rename_keep_extension() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["textures/rock.png", "textures/moss.png"])?;

    env.cmd()
        .args(["rename", "textures", "--yes", "--keep-extension"])
        .args(["--use-base-name", "--base-name", "Tex"])
        .assert()
        .success();

    assert_eq!(env.files_in("textures")?, ["Tex_01.png", "Tex_02.png"]);
    assert_eq!(env.read("textures/Tex_01.png")?, "textures/moss.png");
    Ok(())
}

fn test_rename_keep_extension_strips_numbers() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/Cube.001", "scene/rock.002.png"])?;

    env.cmd()
        .args(["rename", "scene/", "--yes", "-k", "--remove-trailing-number"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 objects"));

    assert_eq!(env.files_in("scene")?, ["Cube_01", "rock_02.png"]);
    Ok(())
}

fn test_rename_conflict_changes_nothing() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube", "Cube.001"])?;

    env.cmd()
        .args(["rename", "./", "--yes", "--add-numbers=false"])
        .args(["--use-base-name", "--base-name", "Chair"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name conflict"));

    assert_eq!(env.files_in(".")?, ["Cube", "Cube.001"]);
    Ok(())
}

fn test_rename_existing_target_changes_nothing() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["props/Barrel", "props/Crate", "props/Crate_02"])?;

    env.cmd()
        .args(["rename", "props/Barrel", "props/Crate", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(env.files_in("props")?, ["Barrel", "Crate", "Crate_02"]);
    Ok(())
}

fn test_rename_empty_selection() -> Result<()> {
    let env = TestEnv::new();
    env.mkdir("empty")?;

    env.cmd()
        .args(["rename", "empty/", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No objects selected"));
    Ok(())
}

fn test_rename_missing_path() -> Result<()> {
    let env = TestEnv::new();

    env.cmd()
        .args(["rename", "ghost", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
    Ok(())
}

fn test_rename_requires_confirmation() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube"])?;

    env.cmd()
        .args(["--non-interactive", "rename", "Cube"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires interactive input"));

    assert_eq!(env.files_in(".")?, ["Cube"]);
    Ok(())
}

fn test_rename_invalid_regex_changes_nothing() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube", "Sphere"])?;

    env.cmd()
        .args(["rename", "./", "--yes", "--search", "(", "--replace", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search pattern"));

    assert_eq!(env.files_in(".")?, ["Cube", "Sphere"]);
    Ok(())
}
