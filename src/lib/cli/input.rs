use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::project_model::package_manager::PackageManager;

const AFTER_HELP: &str = "    Only <project-directory> is required.

    If you have any problems, do not hesitate to file an issue:
      https://github.com/ndom91/create-pika-app/issues/new
";

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use create_pika_app::cli::input::CliArgs;
/// use create_pika_app::project_model::package_manager::PackageManager;
///
/// let parser = CliArgs::parse_from(["", "my-app", "--verbose"]);
/// assert_eq!(parser.project_directory.as_deref(), Some("my-app"));
/// assert_eq!(1, parser.verbose);
/// assert_eq!(parser.package_manager, PackageManager::Npm);
///
/// let parser = CliArgs::parse_from(["", "--info"]);
/// assert!(parser.info);
/// assert!(parser.project_directory.is_none());
/// ```
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "create-pika-app")]
#[command(author = "ndom91")]
#[command(version = "1.0.0")]
#[command(override_usage = "create-pika-app <project-directory> [options]")]
#[command(
    about = "Creates a new Preact + TypeScript application powered by @pika/web",
    after_help = AFTER_HELP
)]
pub struct CliArgs {
    /// The name of (or the absolute path to) the new project
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Extra positional values. Accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    #[arg(short, long, action = ArgAction::Count, help = "print additional logs")]
    pub verbose: u8,

    #[arg(long, help = "print environment debug info")]
    pub info: bool,

    #[arg(long, value_enum, default_value_t = PackageManager::Npm, help = "Which package manager drives the project")]
    pub package_manager: PackageManager,

    #[arg(long, value_name = "DIR", help = "Use the template tree at DIR instead of the bundled one")]
    pub template: Option<PathBuf>,

    #[arg(long, help = "Do not install the project dependencies")]
    pub skip_install: bool,
}

impl CliArgs {
    /// Parses the given arguments, silently dropping the flags that aren't known
    /// by create-pika-app instead of rejecting them
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        CliArgs::parse_from(retain_known_flags(args))
    }
}

/// Filters out of the raw argument vector every dash prefixed token that doesn't name a
/// declared flag. The first element (the binary name) and everything after `--` are kept.
///
/// An unknown flag written without `=` swallows the token right after it when that
/// token isn't dash prefixed, so `--use-npm yes app` still names the project `app`.
/// Short clusters keep their known letters: `-vx` becomes `-v`
pub fn retain_known_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cmd = CliArgs::command();
    let longs: Vec<&str> = cmd
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .chain(["help", "version"])
        .collect();
    let shorts: Vec<char> = cmd
        .get_arguments()
        .filter_map(|arg| arg.get_short())
        .chain(['h', 'V'])
        .collect();

    let mut raw = args.into_iter().map(Into::into).peekable();
    let mut retained: Vec<OsString> = raw.next().into_iter().collect();
    let mut only_positionals = false;

    while let Some(arg) = raw.next() {
        let Some(token) = arg.to_str().map(str::to_owned) else {
            retained.push(arg);
            continue;
        };

        if only_positionals || token == "-" || !token.starts_with('-') {
            retained.push(arg);
            continue;
        }

        let swallows_value = if token == "--" {
            only_positionals = true;
            retained.push(arg);
            false
        } else if let Some(long) = token.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            if longs.contains(&name) {
                retained.push(arg);
                false
            } else {
                log::debug!("Ignoring the unknown flag `{token}`");
                !inline_value
            }
        } else {
            let cluster = &token[1..];
            let known: String = cluster.chars().filter(|c| shorts.contains(c)).collect();
            if known.chars().count() < cluster.chars().count() {
                log::debug!("Ignoring the unknown letters of `{token}`");
            }
            if !known.is_empty() {
                retained.push(OsString::from(format!("-{known}")));
            }
            cluster.chars().last().is_some_and(|c| !shorts.contains(&c))
        };

        if swallows_value {
            if let Some(value) = raw.next_if(|next| !next.to_string_lossy().starts_with('-')) {
                log::debug!("Ignoring {value:?}, taken as the value of `{token}`");
            }
        }
    }

    retained
}
