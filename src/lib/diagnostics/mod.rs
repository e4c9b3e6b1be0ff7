//! The `--info` environment report: operating system, CPU, the Node tooling, the
//! installed browsers and the state of the packages a generated project relies on.
//!
//! Everything here is read-only. Probing never writes to the file system

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};
use regex::Regex;
use serde::Deserialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::cli::output::commands::{CommandLine, OutputMode};
use crate::cli::output::executors::CommandRunner;
use crate::utils::constants::{
    dir_names, error_messages, CREATE_PIKA_APP, INSPECTED_PACKAGES, MANIFEST_FILE_NAME, NOT_FOUND,
};

/// One titled block of the report, e.g. `System` or `Binaries`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: &'static str,
    pub entries: Vec<(String, String)>,
}

impl ReportSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            entries: Vec::new(),
        }
    }

    fn push<K: Into<String>>(&mut self, key: K, value: String) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub sections: Vec<ReportSection>,
}

impl EnvironmentReport {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl Display for EnvironmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "  {}:", section.title)?;
            for (key, value) in &section.entries {
                writeln!(f, "    {key}: {value}")?;
            }
        }
        Ok(())
    }
}

/// The bits of a `package.json` the report cares about
#[derive(Deserialize, Debug, Default)]
struct PackageJson {
    version: Option<String>,
    #[serde(default)]
    dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, String>,
}

const BROWSERS: [&str; 5] = ["Chrome", "Edge", "Internet Explorer", "Firefox", "Safari"];

/// The executables that may provide `browser` on the current platform
fn browser_executables(browser: &str) -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        match browser {
            "Chrome" => &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"],
            "Edge" => &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"],
            "Firefox" => &["/Applications/Firefox.app/Contents/MacOS/firefox"],
            "Safari" => &["/Applications/Safari.app/Contents/MacOS/Safari"],
            _ => &[],
        }
    } else if cfg!(windows) {
        match browser {
            "Chrome" => &["chrome"],
            "Edge" => &["msedge"],
            "Internet Explorer" => &["iexplore"],
            "Firefox" => &["firefox"],
            _ => &[],
        }
    } else {
        match browser {
            "Chrome" => &["google-chrome", "google-chrome-stable", "chromium"],
            "Edge" => &["microsoft-edge", "microsoft-edge-stable"],
            "Firefox" => &["firefox"],
            _ => &[],
        }
    }
}

/// Gathers an [`EnvironmentReport`], running the version probes through a
/// [`CommandRunner`]
pub struct EnvironmentProbe<'a> {
    runner: &'a dyn CommandRunner,
    cwd: PathBuf,
    version: Regex,
}

impl<'a> EnvironmentProbe<'a> {
    pub fn new(runner: &'a dyn CommandRunner, cwd: &Path) -> Result<Self> {
        Ok(Self {
            runner,
            cwd: cwd.to_path_buf(),
            version: Regex::new(r"\d+\.\d+(?:\.\d+)*")
                .with_context(|| error_messages::FAILURE_GATHERING_ENV_INFO)?,
        })
    }

    pub fn collect(&self) -> EnvironmentReport {
        EnvironmentReport {
            sections: vec![
                self.system(),
                self.binaries(),
                self.browsers(),
                self.npm_packages(),
                self.npm_global_packages(),
            ],
        }
    }

    fn system(&self) -> ReportSection {
        let mut section = ReportSection::new("System");
        let arch = std::env::consts::ARCH;

        let os = match System::long_os_version().or_else(System::os_version) {
            Some(version) => format!("{} {arch} ({version})", std::env::consts::OS),
            None => format!("{} {arch}", std::env::consts::OS),
        };
        section.push("OS", os);

        let cpus = cpu_snapshot();
        let model = cpus
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim())
            .filter(|brand| !brand.is_empty());
        let cpu = match model {
            Some(model) => format!("({}) {arch} {model}", cpus.cpus().len()),
            None => format!("({}) {arch}", cpus.cpus().len()),
        };
        section.push("CPU", cpu);

        section
    }

    fn binaries(&self) -> ReportSection {
        let mut section = ReportSection::new("Binaries");
        for (name, program) in [("Node", "node"), ("npm", "npm")] {
            let value = match which::which(program) {
                Ok(path) => match self.probe_version(program) {
                    Some(version) => format!("{version} - {}", path.display()),
                    None => path.display().to_string(),
                },
                Err(_) => NOT_FOUND.to_owned(),
            };
            section.push(name, value);
        }
        section
    }

    fn browsers(&self) -> ReportSection {
        let mut section = ReportSection::new("Browsers");
        for browser in BROWSERS {
            let version = browser_executables(browser)
                .iter()
                .filter(|exe| which::which(exe).is_ok() || Path::new(exe).is_file())
                .find_map(|exe| self.probe_version(exe));
            section.push(browser, version.unwrap_or_else(|| NOT_FOUND.to_owned()));
        }
        section
    }

    fn npm_packages(&self) -> ReportSection {
        let mut section = ReportSection::new("npmPackages");
        let project: PackageJson = read_package_json(&self.cwd.join(MANIFEST_FILE_NAME)).unwrap_or_default();
        let modules = self.cwd.join(dir_names::NODE_MODULES);

        for package in INSPECTED_PACKAGES {
            let wanted = project
                .dependencies
                .get(package)
                .or_else(|| project.dev_dependencies.get(package));
            let installed = installed_version(&modules, package);

            let value = match (wanted, installed) {
                (Some(wanted), Some(installed)) => format!("{wanted} => {installed}"),
                (None, Some(installed)) => installed,
                (Some(wanted), None) => format!("{wanted} => {NOT_FOUND}"),
                (None, None) => NOT_FOUND.to_owned(),
            };
            section.push(package, value);
        }
        section
    }

    fn npm_global_packages(&self) -> ReportSection {
        let mut section = ReportSection::new("npmGlobalPackages");
        let root = CommandLine::new("npm")
            .args(["root", "-g"])
            .output(OutputMode::Capture);

        let version = self
            .runner
            .run(&root)
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| installed_version(Path::new(out.stdout.trim()), CREATE_PIKA_APP));
        section.push(CREATE_PIKA_APP, version.unwrap_or_else(|| NOT_FOUND.to_owned()));
        section
    }

    /// Runs `<program> --version` and extracts the first version looking token
    fn probe_version(&self, program: &str) -> Option<String> {
        let cmd = CommandLine::new(program)
            .arg("--version")
            .output(OutputMode::Capture);
        let output = self.runner.run(&cmd).ok()?;
        if !output.status.success() {
            log::debug!("{cmd} {}", output.status);
            return None;
        }
        self.extract_version(&output.stdout)
    }

    fn extract_version(&self, raw: &str) -> Option<String> {
        self.version.find(raw).map(|m| m.as_str().to_owned())
    }
}

fn read_package_json(path: &Path) -> Option<PackageJson> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn installed_version(node_modules: &Path, package: &str) -> Option<String> {
    read_package_json(&node_modules.join(package).join(MANIFEST_FILE_NAME))?.version
}

fn cpu_snapshot() -> System {
    System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()))
}

/// Gathers and prints the report to stdout
pub fn print_environment_info(runner: &dyn CommandRunner, cwd: &Path) -> Result<EnvironmentReport> {
    let report = EnvironmentProbe::new(runner, cwd)?.collect();
    println!("\nEnvironment Info:");
    println!("{report}");
    Ok(report)
}
