use assert_cmd::Command;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day12_part2").unwrap();
    cmd.arg("tests/inputs/day12_sample.txt");

    cmd.assert().success().stdout("29\n");
}

#[test]
fn part2_exhaustive_output_right_answer() {
    let mut cmd = Command::cargo_bin("day12_part2").unwrap();
    cmd.arg("tests/inputs/day12_sample.txt").arg("--exhaustive");

    cmd.assert().success().stdout("29\n");
}
