use assert_cmd::Command;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day24_part2").unwrap();
    cmd.arg("tests/inputs/day24_sample.txt");

    cmd.assert().success().stdout("54\n");
}
