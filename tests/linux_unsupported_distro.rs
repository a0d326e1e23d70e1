#![cfg(target_os = "linux")]
mod support;

#[test]
fn test_unsupported_distro_exits_one_without_running_commands() {
    let td = tempfile::tempdir().expect("tmpdir");
    let rel = support::os_release(td.path(), Some("ID=arch"));
    let out = support::run(support::setup_cmd().env("DOCKER_SETUP_OS_RELEASE", &rel));

    assert_eq!(out.code, Some(1), "stdout:\n{}", out.stdout);
    assert!(out.stdout.starts_with("[+] Detected OS: linux\n"), "{}", out.stdout);
    assert!(
        out.stdout.contains("[-] Unsupported Linux distro: arch"),
        "{}",
        out.stdout
    );
    assert!(!out.stdout.contains("Running:"), "{}", out.stdout);
    assert!(!out.stdout.contains("Setup complete"), "{}", out.stdout);
}

#[test]
fn test_missing_release_metadata_is_unknown() {
    let td = tempfile::tempdir().expect("tmpdir");
    let out = support::run(
        support::setup_cmd().env("DOCKER_SETUP_OS_RELEASE", td.path().join("absent")),
    );
    assert_eq!(out.code, Some(1));
    assert!(
        out.stdout.contains("[-] Unsupported Linux distro: unknown"),
        "{}",
        out.stdout
    );
}

#[test]
fn test_release_without_id_is_generic_linux() {
    let td = tempfile::tempdir().expect("tmpdir");
    let rel = support::os_release(td.path(), None);
    let out = support::run(support::setup_cmd().env("DOCKER_SETUP_OS_RELEASE", &rel));
    assert_eq!(out.code, Some(1));
    assert!(
        out.stdout.contains("[-] Unsupported Linux distro: linux"),
        "{}",
        out.stdout
    );
}
