fn main() {
    // Release builds set TASKDECK_VERSION; local builds fall back to the git hash.
    if let Ok(version) = std::env::var("TASKDECK_VERSION") {
        println!("cargo:rustc-env=TASKDECK_VERSION={version}");
        return;
    }

    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let version = if hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}+{hash}", env!("CARGO_PKG_VERSION"))
    };
    println!("cargo:rustc-env=TASKDECK_VERSION={version}");
    println!("cargo:rerun-if-env-changed=TASKDECK_VERSION");
}
