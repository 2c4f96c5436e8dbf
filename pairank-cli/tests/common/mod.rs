use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated HOME so tests never read or write the real config file.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self { _tmp: tmp, home }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("pairank");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(".config/pairank/config.toml")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().expect("config dir")).expect("create config dir");
        fs::write(path, content).expect("write config");
    }

    pub fn write_items(&self, content: &str) -> PathBuf {
        let path = self.home.join("items.txt");
        fs::write(&path, content).expect("write items file");
        path
    }

    /// Run `pairank <args> --json` with `stdin`, expect success, parse stdout.
    pub fn run_json(&self, args: &[&str], stdin: &str) -> Value {
        let out = self
            .cmd()
            .args(args)
            .arg("--json")
            .write_stdin(stdin)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub fn names(output: &Value) -> Vec<String> {
    output["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["name"].as_str().expect("item name").to_string())
        .collect()
}

pub fn ratings(output: &Value) -> Vec<f64> {
    output["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["rating"].as_f64().expect("item rating"))
        .collect()
}
