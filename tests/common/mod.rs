//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary directory holding Maven sources, WildFly roots, a
/// home directory, and a `config.yaml` pointing at them.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Workspace root with symlinks resolved
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to resolve temp directory")
    }

    /// Absolute path of a workspace entry
    pub fn join(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Create a file in the test workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test workspace
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.join(name)).expect("Failed to create directory");
    }

    /// Check if a file exists in the test workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }

    /// Read a file from the test workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.join(name)).expect("Failed to read file")
    }

    /// Write `config.yaml` at the workspace root, substituting `{root}`
    pub fn write_config(&self, template: &str) -> PathBuf {
        let content = template.replace("{root}", &self.path().display().to_string());
        self.create_file("config.yaml", &content);
        self.join("config.yaml")
    }

    /// Lay out the `shop` reactor with a WAR module and a global EJB module
    pub fn create_shop_sources(&self) {
        self.create_file("src/shop/pom.xml", REACTOR_POM);
        self.create_file("src/shop/ShopWeb/pom.xml", MODULE_POM);
        self.create_file("src/shop/ShopWeb/src/main/webapp/index.html", "<html/>");
        self.create_file("src/shop/ShopWeb/target/ShopWeb.war", "war bytes");
        self.create_file("src/shop/EJBCore/pom.xml", MODULE_POM);
        self.create_file("src/shop/EJBCore/target/EJBCore.jar", "jar bytes");
    }

    /// Lay out the domain-mode `ledger` project
    pub fn create_ledger_sources(&self) {
        self.create_file("src/ledger/LedgerWeb/pom.xml", MODULE_POM);
        self.create_file("src/ledger/LedgerWeb/target/LedgerWeb.war", "ledger war");
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run jmw in `cwd` with an isolated home and config directory
pub fn run_jmw(project: &TestProject, cwd: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    run_jmw_env(project, cwd, args, stdin, &[])
}

/// Run jmw with extra environment variables
pub fn run_jmw_env(
    project: &TestProject,
    cwd: &Path,
    args: &[&str],
    stdin: Option<&str>,
    envs: &[(&str, String)],
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jmw"));
    cmd.current_dir(cwd)
        .args(args)
        .env("JMW_HOME", project.join("home"))
        .env("JMW_CONFIG_DIR", project.join("home/.config/jmw"))
        .env_remove("JMW_CONFIG")
        .env_remove("RUST_LOG")
        .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

    let mut child = cmd.spawn().expect("Failed to execute jmw");
    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
    }
    child.wait_with_output().expect("Failed to wait for jmw")
}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Aggregator pom
pub const REACTOR_POM: &str = r"<project>
  <artifactId>shop</artifactId>
  <packaging>pom</packaging>
  <modules>
    <module>ShopWeb</module>
    <module>EJBCore</module>
  </modules>
</project>
";

/// Plain module pom
pub const MODULE_POM: &str = r"<project>
  <artifactId>module</artifactId>
</project>
";

/// Standalone and domain projects under `{root}`
pub const SAMPLE_CONFIG: &str = r#"
projects:
  shop:
    source_root: "{root}/src/shop"
    wildfly_root: "{root}/wildfly"
    restart_alias: shop-wildfly
    global_modules:
      - name: EJBCore
        path: modules/com/acme/core/main
    clients:
      acme:
        host: acme.example.org
        user: deploy
        wildfly_path: /opt/wildfly
        restart_cmd: sudo systemctl restart wildfly
  ledger:
    source_root: "{root}/src/ledger"
    wildfly_root: "{root}/wildfly-domain"
    mode: domain
    server_group: main-server-group
    clients:
      north:
        host: north.example.org
        user: ops
        wildfly_path: /srv/wildfly
        restart_cmd: service wildfly restart
      south:
        host: south.example.org
        user: ops
        wildfly_path: /srv/wildfly
        restart_cmd: service wildfly restart
"#;
