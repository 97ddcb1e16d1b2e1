//! Integration tests for refswitch

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn refswitch() -> Command {
        cargo_bin_cmd!("refswitch")
    }

    /// Command isolated from the user's config and stores
    fn isolated(temp: &TempDir) -> Command {
        let config = temp.path().join("config.toml");
        std::fs::write(
            &config,
            format!(
                "[general]\naudit_log = false\n\n[storage]\ncache_dir = {:?}\nbackup_dir = {:?}\n",
                temp.path().join("cache"),
                temp.path().join("backups"),
            ),
        )
        .unwrap();

        let mut cmd = refswitch();
        cmd.env("REFSWITCH_CONFIG", &config).current_dir(temp.path());
        cmd
    }

    #[test]
    fn help_displays() {
        refswitch()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("package references"));
    }

    #[test]
    fn version_displays() {
        refswitch()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("refswitch"));
    }

    #[test]
    fn switch_missing_solution() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["switch", "Missing.sln", "-f", "."])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing.sln doesn't exist"));
    }

    #[test]
    fn switch_without_folders() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("App.sln"), "").unwrap();

        isolated(&temp)
            .args(["switch", "App.sln"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Empty projects folders list"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn switch_lists_every_missing_folder() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("App.sln"), "").unwrap();

        isolated(&temp)
            .args(["switch", "App.sln", "-f", "one", "-f", ".", "-f", "two"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("don't exist: one, two"));
    }

    #[test]
    fn restore_without_backup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("App.csproj"), "<Project />").unwrap();

        isolated(&temp)
            .args(["restore", "App.csproj"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No backup found"));
    }

    #[test]
    fn config_path() {
        refswitch()
            .args(["config", "path"])
            .env_remove("REFSWITCH_CONFIG")
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[switch]"))
            .stdout(predicate::str::contains("solution_folder = \"external\""));
    }

    #[test]
    fn config_set_rejects_unknown_key() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "set", "switch.unknown", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn config_set_persists() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "set", "switch.solution_folder", "local"])
            .assert()
            .success();

        let saved = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
        assert!(saved.contains("solution_folder = \"local\""));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("broken.toml");
        std::fs::write(&config, "[switch\n").unwrap();

        refswitch()
            .env("REFSWITCH_CONFIG", &config)
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn cache_path_uses_configured_dirs() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cache"))
            .stdout(predicate::str::contains("backups"));
    }

    #[test]
    fn completions_bash() {
        refswitch()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("refswitch"));
    }
}

/// End-to-end runs against a scripted stand-in for the dotnet CLI
#[cfg(unix)]
mod switch_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Keeps tool state in files next to each project:
    /// `<project>.packages`, `<project>.refs` and `<solution>.projects`.
    /// A `<project>.fail-add` file makes `add reference` fail.
    const FAKE_DOTNET: &str = r##"#!/bin/sh
case "$1" in
  --version)
    echo "8.0.100"
    ;;
  restore)
    ;;
  sln)
    if [ "$3" = "list" ]; then
      echo "Project(s)"
      echo "----------"
      cat "$2.projects"
    else
      sln="$2"
      shift 5
      for p in "$@"; do
        echo "$p" >> "$sln.added"
        echo "# $p" >> "$sln"
      done
    fi
    ;;
  list)
    if [ "$3" = "package" ]; then
      echo "Project '$2' has the following package references"
      if [ -f "$2.packages" ]; then
        while read -r id; do
          if [ -n "$id" ]; then echo "   > $id   1.0.0   1.0.0"; fi
        done < "$2.packages"
      fi
    else
      echo "Project reference(s)"
      echo "--------------------"
      if [ -f "$2.refs" ]; then cat "$2.refs"; fi
    fi
    ;;
  remove)
    grep -vx "$4" "$2.packages" > "$2.packages.tmp"
    mv "$2.packages.tmp" "$2.packages"
    echo "<!-- removed $4 -->" >> "$2"
    ;;
  add)
    if [ -f "$2.fail-add" ]; then
      echo "error: cannot add reference" >&2
      exit 1
    fi
    echo "$4" >> "$2.refs"
    echo "<!-- reference $4 -->" >> "$2"
    ;;
  *)
    echo "unknown command: $*" >&2
    exit 1
    ;;
esac
"##;

    struct Workspace {
        temp: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();

            let dotnet = temp.path().join("fake-dotnet");
            std::fs::write(&dotnet, FAKE_DOTNET).unwrap();
            std::fs::set_permissions(&dotnet, std::fs::Permissions::from_mode(0o755)).unwrap();

            std::fs::write(
                temp.path().join("config.toml"),
                format!(
                    "[general]\naudit_log = false\n\n[dotnet]\nexecutable = {:?}\n\n[storage]\ncache_dir = {:?}\nbackup_dir = {:?}\n",
                    dotnet,
                    temp.path().join("cache"),
                    temp.path().join("backups"),
                ),
            )
            .unwrap();

            let ws = Self { temp };
            std::fs::create_dir_all(ws.path("app")).unwrap();
            std::fs::write(ws.path("app/App.sln"), "Microsoft Visual Studio Solution File\n")
                .unwrap();
            ws
        }

        fn path(&self, rel: &str) -> PathBuf {
            std::fs::canonicalize(self.temp.path()).unwrap().join(rel)
        }

        fn project(&self, rel: &str, packages: &[&str]) -> PathBuf {
            let path = self.path(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(
                &path,
                "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n  </PropertyGroup>\n</Project>\n",
            )
            .unwrap();
            std::fs::write(sidecar(&path, "packages"), format!("{}\n", packages.join("\n")))
                .unwrap();
            path
        }

        fn solution_lists(&self, projects: &[&str]) {
            std::fs::write(
                self.path("app/App.sln.projects"),
                format!("{}\n", projects.join("\n")),
            )
            .unwrap();
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("refswitch");
            cmd.env("REFSWITCH_CONFIG", self.path("config.toml"))
                .current_dir(self.temp.path());
            cmd
        }
    }

    fn sidecar(project: &Path, ext: &str) -> PathBuf {
        let mut name = project.as_os_str().to_os_string();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn switch_replaces_and_attaches() {
        let ws = Workspace::new();
        let app = ws.project("app/App/App.csproj", &["Lib", "Serilog"]);
        let lib = ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["App/App.csproj"]);

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Lib"));

        assert_eq!(read(&sidecar(&app, "packages")).trim(), "Serilog");
        assert_eq!(read(&sidecar(&app, "refs")).trim(), lib.display().to_string());
        assert_eq!(
            read(&ws.path("app/App.sln.added")).trim(),
            lib.display().to_string()
        );
    }

    #[test]
    fn second_switch_has_nothing_to_add() {
        let ws = Workspace::new();
        ws.project("app/App/App.csproj", &["Lib"]);
        ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["App/App.csproj"]);

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs"])
            .assert()
            .success();
        let solution = read(&ws.path("app/App.sln"));

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Nothing to add"));
        assert_eq!(read(&ws.path("app/App.sln")), solution);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let ws = Workspace::new();
        let app = ws.project("app/App/App.csproj", &["Lib"]);
        ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["App/App.csproj"]);
        let before = read(&app);

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs", "--dry-run"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Would attach 1 project(s)"));

        assert_eq!(read(&app), before);
        assert!(!ws.path("app/App.sln.added").exists());
        assert!(!ws.path("backups").exists());
    }

    #[test]
    fn switch_json_reports_replacements() {
        let ws = Workspace::new();
        let app = ws.project("app/App/App.csproj", &["Lib"]);
        let lib = ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["App/App.csproj"]);

        let output = ws
            .cmd()
            .args(["switch", "app/App.sln", "-f", "libs", "--dry-run", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["dryRun"], true);
        assert_eq!(report["replacements"][0]["package"], "Lib");
        assert_eq!(report["replacements"][0]["project"], app.display().to_string());
        assert_eq!(report["attached"][0], lib.display().to_string());
    }

    #[test]
    fn failed_switch_restores_projects() {
        let ws = Workspace::new();
        let first = ws.project("app/First/First.csproj", &["Lib"]);
        let second = ws.project("app/Second/Second.csproj", &["Lib"]);
        ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["First/First.csproj", "Second/Second.csproj"]);
        std::fs::write(sidecar(&second, "fail-add"), "").unwrap();

        let first_before = std::fs::read(&first).unwrap();
        let second_before = std::fs::read(&second).unwrap();

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Switch aborted"))
            .stderr(predicate::str::contains("cannot add reference"));

        assert_eq!(std::fs::read(&first).unwrap(), first_before);
        assert_eq!(std::fs::read(&second).unwrap(), second_before);
        assert!(!ws.path("app/App.sln.added").exists());
    }

    #[test]
    fn restore_command_recovers_backup() {
        let ws = Workspace::new();
        let app = ws.project("app/App/App.csproj", &["Lib"]);
        ws.project("libs/Lib/Lib.csproj", &[]);
        ws.solution_lists(&["App/App.csproj"]);
        let before = read(&app);

        ws.cmd()
            .args(["switch", "app/App.sln", "-f", "libs"])
            .assert()
            .success();
        assert_ne!(read(&app), before);

        ws.cmd()
            .args(["restore", "app/App/App.csproj"])
            .assert()
            .success();
        assert_eq!(read(&app), before);
    }

    #[test]
    fn index_lists_local_projects() {
        let ws = Workspace::new();
        let lib = ws.project("libs/Lib/Lib.csproj", &[]);
        ws.project("libs/Lib/obj/Generated.csproj", &[]);

        ws.cmd()
            .args(["index", "-f", "libs", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains(lib.display().to_string()))
            .stdout(predicate::str::contains("Generated").not());
    }

    #[test]
    fn index_json_is_parseable() {
        let ws = Workspace::new();
        ws.project("libs/Lib/Lib.csproj", &["Newtonsoft.Json"]);

        let output = ws
            .cmd()
            .args(["index", "-f", "libs", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["name"], "Lib");
        assert_eq!(json[0]["packages"][0], "Newtonsoft.Json");
    }

    #[test]
    fn status_reports_sdk_version() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("8.0.100"));
    }
}
