use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=FETCH_GIT_COMMIT");

    // An explicit value from the environment wins over git.
    if std::env::var_os("FETCH_GIT_COMMIT").is_some() {
        return;
    }

    let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    else {
        return;
    };
    if !output.status.success() {
        return;
    }

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if !commit.is_empty() {
        println!("cargo:rustc-env=FETCH_GIT_COMMIT={commit}");
    }
}
