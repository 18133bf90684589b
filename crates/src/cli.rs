use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments accepted by the `tpconn` binary.
#[derive(Parser, Debug)]
#[command(
    name = "tpconn",
    version,
    about = "Export 1Password database items as an encrypted TablePlus connection file"
)]
pub struct CliArgs {
    #[arg(
        value_name = "ACCOUNT",
        env = "OP_ACCOUNT",
        help = "1Password account (sign-in address or user id)"
    )]
    pub account: String,
    #[arg(
        short,
        long,
        value_name = "NAME",
        default_value = "export",
        help = "Output filename, without the .tableplusconnection extension"
    )]
    pub output: String,
    #[arg(
        short,
        long,
        value_name = "PASSWORD",
        default_value = "password",
        env = "TPCONN_PASSWORD",
        hide_env_values = true,
        help = "Export password"
    )]
    pub password: String,
    #[arg(long, help = "Export all connections, without interactive input")]
    pub all: bool,
    #[arg(long, help = "Open the export immediately")]
    pub open: bool,
    #[arg(
        long,
        value_name = "APP",
        default_value = "TablePlus",
        help = "Application used by --open"
    )]
    pub app: String,
    #[arg(
        long,
        value_name = "FILE",
        env = "TPCONN_LOG_FILE",
        help = "Write logs here instead of the default data directory"
    )]
    pub log_file: Option<PathBuf>,
}

pub fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = CliArgs::try_parse_from(["tpconn", "my.1password.com"]).unwrap();
        assert_eq!(cli.account, "my.1password.com");
        assert_eq!(cli.output, "export");
        assert!(!cli.all);
        assert!(!cli.open);
        assert_eq!(cli.app, "TablePlus");
    }

    #[test]
    fn short_and_long_forms() {
        let cli = CliArgs::try_parse_from([
            "tpconn", "acct", "-o", "prod", "-p", "s3cret", "--all", "--open",
        ])
        .unwrap();
        assert_eq!(cli.output, "prod");
        assert_eq!(cli.password, "s3cret");
        assert!(cli.all && cli.open);

        let cli = CliArgs::try_parse_from(["tpconn", "acct", "--output", "x", "--password", "y"]).unwrap();
        assert_eq!((cli.output.as_str(), cli.password.as_str()), ("x", "y"));
    }

    #[test]
    fn verify_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
