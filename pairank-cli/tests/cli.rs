mod common;

use common::{names, ratings, TestEnv};
use predicates::str::contains;

#[test]
fn rank_two_votes_then_finish() {
    let env = TestEnv::new();
    let out = env.run_json(
        &["rank", "--item", "A", "--item", "B", "--item", "C", "--rounds", "2", "--seed", "7"],
        "1\n1\n",
    );

    assert_eq!(out["total_comparisons"], 2);
    assert_eq!(out["total_rounds"], 2);

    let mut listed = names(&out);
    listed.sort();
    assert_eq!(listed, vec!["A", "B", "C"]);

    let r = ratings(&out);
    assert!(r.windows(2).all(|w| w[0] >= w[1]), "ratings not descending: {r:?}");
    // Two zero-sum updates leave the total untouched.
    assert!((r.iter().sum::<f64>() - 3000.0).abs() < 1e-9);
}

#[test]
fn quit_before_first_vote() {
    let env = TestEnv::new();
    let out = env.run_json(&["rank", "--item", "x", "--item", "y"], "q\n");

    assert_eq!(out["total_comparisons"], 0);
    assert_eq!(names(&out), vec!["x", "y"]);
    assert!(ratings(&out).iter().all(|&r| r == 1000.0));
}

#[test]
fn eof_ends_the_session() {
    let env = TestEnv::new();
    let out = env.run_json(&["rank", "--item", "x", "--item", "y", "--rounds", "5"], "2\n");
    assert_eq!(out["total_comparisons"], 1);
}

#[test]
fn unrecognized_answer_is_asked_again() {
    let env = TestEnv::new();
    env.cmd()
        .args(["rank", "--item", "left", "--item", "right", "--rounds", "1"])
        .write_stdin("maybe\n2\n")
        .assert()
        .success()
        .stderr(contains("Type 1 for"))
        .stdout(contains("after 1 of 1 comparisons"));
}

#[test]
fn items_file_and_config_rounds() {
    let env = TestEnv::new();
    env.write_config("rounds = 1\nk_factor = 10.0\n");
    let items = env.write_items("first\nsecond\nthird\n");

    let out = env.run_json(&["rank", "--items", items.to_str().expect("utf8 path")], "1\n1\n1\n");

    assert_eq!(out["total_comparisons"], 1);
    assert_eq!(out["config"]["k_factor"], 10.0);
    assert_eq!(ratings(&out)[0], 1005.0);
}

#[test]
fn too_few_items_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["rank", "--item", "lonely"])
        .assert()
        .failure()
        .stderr(contains("Need at least 2 items"));
}

#[test]
fn duplicate_items_fail() {
    let env = TestEnv::new();
    env.cmd()
        .args(["rank", "--item", "same", "--item", "same"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(contains("duplicate item"));
}

#[test]
fn invalid_k_factor_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["rank", "--item", "a", "--item", "b", "--k-factor=-3"])
        .assert()
        .failure()
        .stderr(contains("k_factor must be a positive number"));
}

#[test]
fn init_creates_config_once() {
    let env = TestEnv::new();
    env.cmd().arg("init").assert().success().stdout(contains("Created config"));
    assert!(env.config_path().exists());

    env.cmd().arg("init").assert().failure().stderr(contains("already exists"));
}

#[test]
fn simulate_reads_items_from_stdin() {
    let env = TestEnv::new();
    let out = env.run_json(
        &["simulate", "--rounds", "15", "--accuracy", "1.0", "--seed", "3"],
        "gold\nsilver\nbronze\ntin\n",
    );

    assert_eq!(out["total_comparisons"], 15);
    assert_eq!(names(&out).len(), 4);
    assert!(out["kendall_tau"].as_f64().expect("tau") > 0.0);
}

#[test]
fn simulate_rejects_bad_accuracy() {
    let env = TestEnv::new();
    env.cmd()
        .args(["simulate", "--item", "a", "--item", "b", "--accuracy", "1.5"])
        .assert()
        .failure()
        .stderr(contains("--accuracy must be between"));
}
