mod common;
mod utils;

use anyhow::Result;
use common::TestEnvironment;

#[test]
fn test_install_with_detected_family() -> Result<()> {
    let env = TestEnvironment::new()?;
    let os_release = env.write_os_release("NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n")?;

    let output = utils::run_pkgcmd_command(
        &env,
        &[
            "--os-release",
            os_release.to_str().unwrap(),
            "install",
            "htop",
            "curl",
        ],
    )?;

    assert_eq!(output.exit_code, 0, "install failed: {}", output.stderr);
    assert_eq!(output.stdout.trim(), "sudo apt install -y htop curl");
    Ok(())
}

#[test]
fn test_family_flag_skips_detection() -> Result<()> {
    let env = TestEnvironment::new()?;
    let missing = env.missing_os_release();

    let output = utils::run_pkgcmd_command(
        &env,
        &[
            "--family",
            "pacman",
            "--os-release",
            missing.to_str().unwrap(),
            "update",
        ],
    )?;

    assert_eq!(output.exit_code, 0, "update failed: {}", output.stderr);
    assert_eq!(output.stdout.trim(), "sudo pacman -Sy");
    Ok(())
}

#[test]
fn test_family_from_config_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config("family = \"apk\"\n")?;

    let output = utils::run_pkgcmd_command(&env, &["remove", "vim"])?;

    assert_eq!(output.exit_code, 0, "remove failed: {}", output.stderr);
    assert_eq!(output.stdout.trim(), "sudo apk del vim");
    Ok(())
}

#[test]
fn test_injection_is_rejected() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output =
        utils::run_pkgcmd_command(&env, &["--family", "apt", "install", "htop; rm -rf /"])?;

    assert_eq!(output.exit_code, 1);
    assert!(output.stdout.is_empty(), "unexpected output: {}", output.stdout);
    assert!(output.stderr.contains("htop; rm -rf /"), "stderr: {}", output.stderr);
    Ok(())
}

#[test]
fn test_unsupported_family() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_pkgcmd_command(&env, &["--family", "brew", "update"])?;

    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("brew"), "stderr: {}", output.stderr);
    Ok(())
}

#[test]
fn test_version_prints_both_commands() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_pkgcmd_command(&env, &["--family", "dnf", "version", "htop"])?;

    assert_eq!(output.exit_code, 0, "version failed: {}", output.stderr);
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "dnf info htop | grep Version",
            "dnf --showduplicates list htop | grep -v Installed | awk '{print $2}'",
        ]
    );
    Ok(())
}

#[test]
fn test_detect_reports_distro() -> Result<()> {
    let env = TestEnvironment::new()?;
    let os_release = env.write_os_release("PRETTY_NAME=\"Alpine Linux v3.19\"\nID=alpine\n")?;

    let output = utils::run_pkgcmd_command(
        &env,
        &["--os-release", os_release.to_str().unwrap(), "detect"],
    )?;

    assert_eq!(output.exit_code, 0, "detect failed: {}", output.stderr);
    assert_eq!(output.stdout.trim(), "apk (Alpine Linux v3.19)");
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_pkgcmd_command(
        &env,
        &["--json", "--family", "zypper", "installed", "vim"],
    )?;

    assert_eq!(output.exit_code, 0, "installed failed: {}", output.stderr);
    let event: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
    assert_eq!(event["level"], "info");
    assert_eq!(event["code"], "pkgcmd.installed");
    assert_eq!(event["data"]["family"], "zypper");
    assert_eq!(event["data"]["command"], "zypper se -i vim");
    Ok(())
}

#[test]
fn test_families_lists_all() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_pkgcmd_command(&env, &["families"])?;

    assert_eq!(output.exit_code, 0);
    let families: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(
        families,
        ["apt", "apk", "dnf", "yum", "pacman", "zypper", "emerge"]
    );
    Ok(())
}
