use crate::*;
use batchren::error::Result;
use predicates::prelude::*;

register_behavior_tests!(
    test_preview_lists_first_three,
    test_preview_name_filter,
    test_preview_empty_directory,
);

fn test_preview_lists_first_three() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["scene/d", "scene/c", "scene/b", "scene/a"])?;

    env.cmd()
        .args(["preview", "scene"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Selected objects: 4")
                .and(predicate::str::contains("a → a_01"))
                .and(predicate::str::contains("c → c_03"))
                .and(predicate::str::contains("d → d_04").not())
                .and(predicate::str::contains("... and 1 more")),
        );

    // Preview never touches storage
    assert_eq!(env.files_in("scene")?, ["a", "b", "c", "d"]);
    Ok(())
}

fn test_preview_name_filter() -> Result<()> {
    let env = TestEnv::new();
    env.seed(&["Cube.001", "Cube.002", "Lamp"])?;

    env.cmd()
        .args(["preview", "./", "--name", "Cube.*", "--limit", "0"])
        .args(["--remove-trailing-number", "--prefix", "SM_"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Selected objects: 2")
                .and(predicate::str::contains("Cube.001 → SM_Cube_01"))
                .and(predicate::str::contains("Cube.002 → SM_Cube_02"))
                .and(predicate::str::contains("Lamp").not()),
        );
    Ok(())
}

fn test_preview_empty_directory() -> Result<()> {
    let env = TestEnv::new();
    env.mkdir("empty")?;

    env.cmd()
        .args(["preview", "empty/"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Selected objects: 0")
                .and(predicate::str::contains("Select objects to rename")),
        );
    Ok(())
}
