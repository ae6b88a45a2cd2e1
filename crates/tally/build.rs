use std::process::Command;

use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");

    let version = env!("CARGO_PKG_VERSION");
    let tagged = git(&["tag", "--points-at", "HEAD"])
        .is_some_and(|tags| tags.lines().any(|tag| tag.trim() == format!("tally@v{version}")));

    let version_string = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(_) if tagged => version.to_owned(),
        Some(hash) => format!("{version}+{}.{}", hash.trim(), build_date()),
        None => format!("{version}+unknown.{}", build_date()),
    };

    println!("cargo:rustc-env=TALLY_VERSION={version_string}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

fn build_date() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
