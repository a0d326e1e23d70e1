use crate::color::paint;

pub const NEXT_STEP_COMMAND: &str = "docker compose run dev";

pub fn completion_banner_lines() -> [String; 4] {
    [
        String::new(),
        "[✓] Setup complete".to_string(),
        "Next step:".to_string(),
        format!("  {NEXT_STEP_COMMAND}"),
    ]
}

pub fn print_completion_banner(use_color: bool) {
    let [blank, done, next, cmd] = completion_banner_lines();
    println!("{blank}");
    println!("{}", paint(use_color, "\x1b[32;1m", &done));
    println!("{next}");
    println!("{}", paint(use_color, "\x1b[1m", &cmd));
}

/// One-line build identity for `--verbose` runs.
pub fn build_identity() -> String {
    format!(
        "docker-setup v{} ({}; built {})",
        env!("CARGO_PKG_VERSION"),
        env!("DOCKER_SETUP_BUILD_TARGET"),
        env!("DOCKER_SETUP_BUILD_DATE")
    )
}
