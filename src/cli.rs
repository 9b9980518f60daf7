//! Command-line interface

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ArgMatches, Command,
};

/// Values taken from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Location to open instead of the configured start route
    pub route: Option<String>,
    pub api_url: Option<String>,
    /// Persist the effective settings to the config file
    pub save_config: bool,
}

impl From<&ArgMatches> for CliArgs {
    fn from(matches: &ArgMatches) -> Self {
        Self {
            route: matches.get_one::<String>("route").cloned(),
            api_url: matches.get_one::<String>("api-url").cloned(),
            save_config: matches.get_flag("save-config"),
        }
    }
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("portal-tui")
        .about("Terminal shell for the portal auth flows")
        .version(env!("CARGO_PKG_VERSION"))
        .color(clap::ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("route")
                .help("Location to open, e.g. /auth/reset-password?token=abc")
                .value_name("ROUTE"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Gateway base URL, example: http://localhost:8080/api/v1")
                .env("PORTAL_API_URL"),
        )
        .arg(
            Arg::new("save-config")
                .long("save-config")
                .help("Write the effective settings to the config file before starting")
                .action(ArgAction::SetTrue),
        )
}

/// Parse the process arguments
pub fn parse() -> CliArgs {
    CliArgs::from(&new().get_matches())
}
