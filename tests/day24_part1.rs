use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("day24_part1").unwrap();
    cmd.arg("tests/inputs/day24_sample.txt");

    cmd.assert().success().stdout("18\n");
}

#[test]
fn part1_waits_for_blizzard_in_corridor() {
    let mut cmd = Command::cargo_bin("day24_part1").unwrap();
    cmd.arg("tests/inputs/day24_corridor.txt");

    cmd.assert().success().stdout("6\n");
}

#[test]
fn part1_fails_on_sealed_exit() {
    let mut cmd = Command::cargo_bin("day24_part1").unwrap();
    cmd.arg("tests/inputs/day24_sealed.txt");

    cmd.assert()
        .failure()
        .stdout("")
        .stderr(str::contains("There's no way through blizzards"));
}
