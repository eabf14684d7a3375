//! Integration tests for the sftp-loader binary
//!
//! The tests at the top drive the binary with scripted stdin and never reach
//! a server. The `server` module needs a running SFTP server:
//!
//! ```bash
//! docker run -d --name sftp -p 2222:22 atmoz/sftp tester:secret:::upload
//!
//! TEST_SFTP_HOST=127.0.0.1 TEST_SFTP_PORT=2222 \
//! TEST_SFTP_USER=tester TEST_SFTP_PASSWORD=secret TEST_SFTP_DIR=/upload \
//!     cargo test --features integration
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Get the path to the sftp-loader binary
fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sftp-loader"))
}

/// Isolated working and config directories for one run
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { dir }
    }

    fn with_config(config: &str) -> Self {
        let env = Self::new();
        std::fs::write(env.config_dir().join("config.toml"), config)
            .expect("Failed to write config");
        env
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config_dir(&self) -> PathBuf {
        let dir = self.path().join("config");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        dir
    }

    /// Run sftp-loader feeding `stdin` as the operator's answers
    fn run(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = Command::new(binary())
            .args(args)
            .current_dir(self.path())
            .env("SFTP_LOADER_CONFIG_DIR", self.config_dir())
            .env("LOG_LEVEL", "info")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start sftp-loader");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for sftp-loader")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_exit_at_first_prompt() {
    let env = TestEnv::new();
    let output = env.run(&[], "exit\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("Host: "));
    assert!(stderr(&output).contains("Goodbye!"));
}

#[test]
fn test_exit_token_is_case_insensitive_at_any_prompt() {
    let env = TestEnv::new();
    let output = env.run(&["--quiet"], "example.invalid\ntester\nsecret\nview\n/home\nEXIT\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Remote directory to list: "));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let env = TestEnv::new();
    let output = env.run(&[], "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_invalid_command_exits_with_failure() {
    let env = TestEnv::new();
    let output = env.run(&["--quiet"], "example.invalid\ntester\nsecret\nbogus\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid choice"));
}

#[test]
fn test_invalid_command_reprompts_when_configured() {
    let env = TestEnv::with_config("schema_version = 1\n\n[defaults]\ninvalid_input = \"reprompt\"\n");
    let output = env.run(&["--quiet"], "example.invalid\ntester\nsecret\nbogus\nexit\n");

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert_eq!(out.matches("Type 'upload' to send a file").count(), 2);
}

#[test]
fn test_missing_local_file_fails_before_connecting() {
    let env = TestEnv::new();
    let output = env.run(
        &["--quiet"],
        "example.invalid\ntester\nsecret\nupload\n./does-not-exist.txt\n/home\n",
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not found or not a file"));
}

#[test]
fn test_log_file_written_to_configured_dir() {
    let env = TestEnv::with_config("schema_version = 1\n\n[defaults]\nlog_dir = \"run-logs\"\n");
    let output = env.run(&["--quiet"], "exit\n");
    assert_eq!(output.status.code(), Some(0));

    let logs: Vec<PathBuf> = std::fs::read_dir(env.path().join("run-logs"))
        .expect("log dir exists")
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(content.contains("Goodbye!"));
    assert!(!content.contains("\x1b["));
}

#[test]
fn test_banner_and_version() {
    let env = TestEnv::new();
    let output = env.run(&[], "exit\n");
    assert!(stdout(&output).contains("Type 'exit' at any prompt to quit."));

    let output = env.run(&["--version"], "");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("sftp-loader "));
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let env = TestEnv::with_config("this is [not toml");
    let output = env.run(&[], "exit\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_init_config_writes_defaults() {
    let env = TestEnv::new();
    let output = env.run(&["--init-config"], "");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Configuration written to"));
    assert!(!stdout(&output).contains("Host: "));
    let content = std::fs::read_to_string(env.config_dir().join("config.toml")).unwrap();
    assert!(content.contains("schema_version = 1"));
    assert!(content.contains("port = 22"));
}

#[test]
fn test_init_config_keeps_existing_settings() {
    let env = TestEnv::with_config("schema_version = 1\n\n[defaults]\nport = 2222\n");
    let output = env.run(&["--init-config"], "");

    assert_eq!(output.status.code(), Some(0));
    let content = std::fs::read_to_string(env.config_dir().join("config.toml")).unwrap();
    assert!(content.contains("port = 2222"));
    assert!(content.contains("timeout_ms"));
}

#[test]
fn test_init_config_leaves_unreadable_file_alone() {
    let env = TestEnv::with_config("this is [not toml");
    let output = env.run(&["--init-config"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Refusing to overwrite"));
    let content = std::fs::read_to_string(env.config_dir().join("config.toml")).unwrap();
    assert_eq!(content, "this is [not toml");
}

#[cfg(feature = "integration")]
mod server {
    use super::*;

    struct ServerConfig {
        host: String,
        port: String,
        user: String,
        password: String,
        dir: String,
    }

    /// Get SFTP test configuration from environment
    fn server_config() -> Option<ServerConfig> {
        Some(ServerConfig {
            host: std::env::var("TEST_SFTP_HOST").ok()?,
            port: std::env::var("TEST_SFTP_PORT").unwrap_or_else(|_| "22".to_string()),
            user: std::env::var("TEST_SFTP_USER").ok()?,
            password: std::env::var("TEST_SFTP_PASSWORD").ok()?,
            dir: std::env::var("TEST_SFTP_DIR").unwrap_or_else(|_| "/tmp".to_string()),
        })
    }

    fn env_for(server: &ServerConfig) -> TestEnv {
        TestEnv::with_config(&format!(
            "schema_version = 1\n\n[defaults]\nport = {}\ntimeout_ms = 10000\n",
            server.port
        ))
    }

    fn login(server: &ServerConfig) -> String {
        format!("{}\n{}\n{}\n", server.host, server.user, server.password)
    }

    fn unique(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn test_upload_list_and_delete() {
        let Some(server) = server_config() else {
            eprintln!("Skipping: TEST_SFTP_* not set");
            return;
        };
        let env = env_for(&server);

        let name = format!("{}.txt", unique("upload"));
        let local = env.path().join(&name);
        std::fs::write(&local, "integration payload").unwrap();

        let script = format!(
            "{login}upload\n{}\n{dir}\nyes\nyes\nview\n{dir}\nlist\nyes\nyes\ndelete\nfile\n{dir}/{name}\nno\n",
            local.display(),
            login = login(&server),
            dir = server.dir,
        );
        let output = env.run(&["--quiet", "--no-progress"], &script);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains(&name));
    }

    #[test]
    fn test_folder_tree_and_csv() {
        let Some(server) = server_config() else {
            eprintln!("Skipping: TEST_SFTP_* not set");
            return;
        };
        let env = env_for(&server);
        let folder = format!("{}/{}", server.dir, unique("folder"));
        let csv = env.path().join("out").join("listing.csv");

        let script = format!(
            "{login}folder\n{folder}\nyes\nyes\nview\n{dir}\ntree\nyes\nyes\nview\n{dir}\ncsv\n{}\nyes\nyes\ndelete\nfolder\n{folder}\nno\n",
            csv.display(),
            login = login(&server),
            dir = server.dir,
        );
        let output = env.run(&["--quiet"], &script);

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        let folder_name = folder.rsplit('/').next().unwrap();
        assert!(stdout(&output).contains(&format!("{folder_name}/")));
        let content = std::fs::read_to_string(&csv).unwrap();
        assert!(content.starts_with("File,Last Modified\r\n"));
        assert!(content.contains(folder_name));
    }

    #[test]
    fn test_wrong_password_exits_with_failure() {
        let Some(server) = server_config() else {
            eprintln!("Skipping: TEST_SFTP_* not set");
            return;
        };
        let env = env_for(&server);
        let script = format!(
            "{}\n{}\nwrong-{}\nview\n{}\nlist\n",
            server.host, server.user, server.password, server.dir
        );
        let output = env.run(&["--quiet"], &script);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("AuthenticationError"));
    }
}
