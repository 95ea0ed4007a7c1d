use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "hotseat";

#[test]
fn plays_a_game() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("f2f3\ne7e5\ng2g4\nd8h4\nstatus\n")
            .assert()
            .success()
            .stdout(
                contains("f2f3\n")
                    .and(contains("e7e5 double_pawn_push"))
                    .and(contains("d8h4 check"))
                    .and(contains("checkmate, Black wins")),
            ),
    );
}

#[test]
fn rejects_illegal_input() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("e2e5\nposition fen 8/8/8/8/8/8/8/8 w - - 0 1\nmoves e2\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("error: illegal move e2e5")
                    .and(contains("error:").count(2))
                    .and(contains("e3 e4")),
            ),
    );
}

#[test]
fn board_dump() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1\nd\nmoves e1\n")
            .assert()
            .success()
            .stdout(
                contains("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
                    .and(contains("Castling rights: KQkq"))
                    .and(contains("c1 d1 d2 e2 f1 f2 g1")),
            ),
    );
}
