//! Docker Engine + Compose plugin on apt-based distributions.
//!
//! Kali gets a hand-built repository definition pinned to the Debian
//! `bookworm` suite; Ubuntu and Debian go through the vendor convenience
//! script. Both then enable the service and add the invoking user to the
//! `docker` group.

use crate::color::{log_note_stdout, log_step_stdout};
use crate::errors::SetupError;
use crate::platform::Host;
use crate::runner::{Runner, Shell, Step};

/// Debian suite the Kali repository is pinned to. Kali's own codename is
/// unknown to download.docker.com; revisit when Debian's stable moves on.
pub const KALI_PINNED_SUITE: &str = "bookworm";

pub const DOCKER_APT_KEYRING: &str = "/etc/apt/keyrings/docker.asc";
pub const DOCKER_APT_SOURCES: &str = "/etc/apt/sources.list.d/docker.sources";
pub const LEGACY_DOCKER_APT_LIST: &str = "/etc/apt/sources.list.d/docker.list";
pub const CONVENIENCE_SCRIPT_URL: &str = "https://get.docker.com";
pub const DOCKER_GROUP: &str = "docker";

const APT_UPDATE: &str = "apt-get update";
const APT_PREREQUISITES: &str = "apt-get install -y ca-certificates curl gnupg lsb-release";

/// deb822 stanza for the Docker repository.
pub fn kali_sources_stanza() -> String {
    format!(
        "Types: deb\n\
         URIs: https://download.docker.com/linux/debian\n\
         Suites: {KALI_PINNED_SUITE}\n\
         Components: stable\n\
         Signed-By: {DOCKER_APT_KEYRING}"
    )
}

pub fn kali_steps() -> Vec<Step> {
    vec![
        Step::tolerant("apt-get purge -y docker-buildx docker-compose-v2 docker-compose"),
        Step::tolerant("apt-get autoremove -y"),
        Step::new(format!("rm -f {LEGACY_DOCKER_APT_LIST}")),
        Step::new(APT_UPDATE),
        Step::new(APT_PREREQUISITES),
        Step::new("install -m 0755 -d /etc/apt/keyrings"),
        Step::new(format!(
            "curl -fsSL https://download.docker.com/linux/debian/gpg -o {DOCKER_APT_KEYRING}"
        )),
        Step::new(format!("chmod a+r {DOCKER_APT_KEYRING}")),
        Step::new(format!(
            "tee {DOCKER_APT_SOURCES} <<EOF\n{}\nEOF",
            kali_sources_stanza()
        )),
        Step::new(APT_UPDATE),
        Step::new(
            "apt-get install -y docker-ce docker-ce-cli containerd.io docker-buildx-plugin docker-compose-plugin",
        ),
    ]
}

pub fn convenience_script_steps() -> Vec<Step> {
    vec![
        Step::new(APT_UPDATE),
        Step::new(APT_PREREQUISITES),
        Step::new(format!("curl -fsSL {CONVENIENCE_SCRIPT_URL} | sh")),
        Step::new("apt-get install -y docker-compose-plugin"),
    ]
}

pub fn service_steps() -> Vec<Step> {
    vec![
        Step::new("systemctl enable docker"),
        Step::new("systemctl start docker"),
    ]
}

/// `SUDO_USER` wins over `USER`; empty values count as unset.
pub fn resolve_invoking_user(sudo_user: Option<String>, user: Option<String>) -> Option<String> {
    sudo_user
        .filter(|u| !u.is_empty())
        .or_else(|| user.filter(|u| !u.is_empty()))
}

pub fn group_step(user: &str) -> Step {
    Step::new(format!("usermod -aG {DOCKER_GROUP} {user}"))
}

pub fn install_docker_linux<H: Host, S: Shell>(
    host: &H,
    runner: &mut Runner<S>,
    distro: &str,
) -> Result<(), SetupError> {
    let use_color = runner.use_color();

    // Root is required for any run that executes; dry run only previews.
    if !host.is_privileged() {
        if !runner.dry_run() {
            return Err(SetupError::NotPrivileged);
        }
        log_note_stdout(use_color, "Not running as root; continuing because of --dry-run.");
    }

    let plan = if distro == "kali" {
        log_step_stdout(use_color, "Kali Linux detected - Cleaning up potential conflicts");
        kali_steps()
    } else {
        log_step_stdout(use_color, "Installing Docker using official Docker script...");
        convenience_script_steps()
    };
    tracing::info!(distro, steps = plan.len(), "linux install plan selected");
    runner.run_all(&plan)?;
    runner.run_all(&service_steps())?;

    let user = resolve_invoking_user(host.env_var("SUDO_USER"), host.env_var("USER"));
    match user {
        Some(user) => {
            log_step_stdout(use_color, &format!("Adding {user} to {DOCKER_GROUP} group..."));
            runner.run(&group_step(&user))?;
            log_note_stdout(
                use_color,
                "Log out and log back in for docker group changes to take effect.",
            );
        }
        None => tracing::warn!("no invoking user found; skipping docker group membership"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingShell;
    use crate::setup::testing::FakeHost;

    fn commands(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.command.as_str()).collect()
    }

    #[test]
    fn test_kali_plan_shape() {
        let steps = kali_steps();
        assert_eq!(steps.len(), 11);
        assert!(steps[0].ignore_errors && steps[1].ignore_errors);
        assert!(steps[2..].iter().all(|s| !s.ignore_errors));
        assert_eq!(steps[2].command, "rm -f /etc/apt/sources.list.d/docker.list");
        assert!(steps
            .last()
            .unwrap()
            .command
            .ends_with("docker-buildx-plugin docker-compose-plugin"));
    }

    #[test]
    fn test_kali_repository_is_pinned_to_bookworm() {
        let stanza = kali_sources_stanza();
        assert!(stanza.contains("Suites: bookworm"));
        assert!(stanza.contains("Signed-By: /etc/apt/keyrings/docker.asc"));
        let tee = &kali_steps()[8].command;
        assert!(tee.starts_with("tee /etc/apt/sources.list.d/docker.sources <<EOF\nTypes: deb\n"));
        assert!(tee.ends_with("\nEOF"));
    }

    #[test]
    fn test_convenience_plan_pipes_vendor_script() {
        assert_eq!(
            commands(&convenience_script_steps()),
            vec![
                "apt-get update",
                "apt-get install -y ca-certificates curl gnupg lsb-release",
                "curl -fsSL https://get.docker.com | sh",
                "apt-get install -y docker-compose-plugin",
            ]
        );
    }

    #[test]
    fn test_resolve_invoking_user_prefers_sudo_user() {
        assert_eq!(
            resolve_invoking_user(Some("alice".into()), Some("root".into())).as_deref(),
            Some("alice")
        );
        assert_eq!(
            resolve_invoking_user(Some(String::new()), Some("bob".into())).as_deref(),
            Some("bob")
        );
        assert_eq!(resolve_invoking_user(None, None), None);
    }

    #[test]
    fn test_requires_root() {
        let host = FakeHost::linux("ubuntu").unprivileged();
        let mut runner = Runner::new(RecordingShell::default(), false, false);
        let err = install_docker_linux(&host, &mut runner, "ubuntu").unwrap_err();
        assert!(matches!(err, SetupError::NotPrivileged));
        assert!(runner.shell().executed.is_empty());
    }

    #[test]
    fn test_kali_full_sequence_with_group_grant() {
        let host = FakeHost::linux("kali").with_env("SUDO_USER", "kali");
        let mut runner = Runner::new(RecordingShell::default(), false, false);
        install_docker_linux(&host, &mut runner, "kali").unwrap();
        let executed = &runner.shell().executed;
        assert_eq!(executed.len(), 11 + 2 + 1);
        assert_eq!(executed[11], "systemctl enable docker");
        assert_eq!(executed[12], "systemctl start docker");
        assert_eq!(executed[13], "usermod -aG docker kali");
    }

    #[test]
    fn test_tolerated_purge_failure_does_not_halt() {
        let host = FakeHost::linux("kali");
        let shell = RecordingShell::default().failing(
            "apt-get purge -y docker-buildx docker-compose-v2 docker-compose",
            100,
        );
        let mut runner = Runner::new(shell, false, false);
        install_docker_linux(&host, &mut runner, "kali").unwrap();
        assert_eq!(runner.shell().executed.len(), 13);
    }

    #[test]
    fn test_fatal_step_halts_before_service_steps() {
        let host = FakeHost::linux("debian").with_env("USER", "dev");
        let shell = RecordingShell::default().failing("curl -fsSL https://get.docker.com | sh", 1);
        let mut runner = Runner::new(shell, false, false);
        let err = install_docker_linux(&host, &mut runner, "debian").unwrap_err();
        assert!(matches!(err, SetupError::CommandFailed { .. }));
        assert_eq!(
            runner.shell().executed.last().map(String::as_str),
            Some("curl -fsSL https://get.docker.com | sh")
        );
        assert!(!runner
            .shell()
            .executed
            .iter()
            .any(|c| c.starts_with("systemctl")));
    }

    #[test]
    fn test_dry_run_without_root_previews_plan() {
        let host = FakeHost::linux("ubuntu").unprivileged();
        let mut runner = Runner::new(RecordingShell::default(), true, false);
        install_docker_linux(&host, &mut runner, "ubuntu").unwrap();
        assert!(runner.shell().executed.is_empty());
    }
}
