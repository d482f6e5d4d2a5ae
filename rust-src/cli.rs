//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::commands;
use crate::config::{load_settings, Settings};
use crate::dashboard::{RenderOptions, Variant};
use crate::visualization::ExportFormat;


/// Hospital DB Insights - dashboard of database optimization results
#[derive(Parser)]
#[command(name = "hdbi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard {
        /// Dashboard configuration to render
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },

    /// Print the dashboard once to stdout
    Show {
        /// Dashboard configuration to render
        #[arg(long, value_enum)]
        variant: Option<Variant>,

        /// Render with the atomicity chart hidden
        #[arg(long)]
        hide_atomicity: bool,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Export the dashboard as SVG, PNG, HTML or the datasets as JSON
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Png)]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Dashboard configuration to render
        #[arg(long, value_enum)]
        variant: Option<Variant>,

        /// Render with the atomicity chart hidden
        #[arg(long)]
        hide_atomicity: bool,
    },

    /// Print the contact link for the data team
    Contact {
        /// Open the link in the default mail client
        #[arg(long)]
        open: bool,
    },
}


/// Settings file values, falling back to defaults when unreadable.
fn settings() -> Settings {
    load_settings().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable settings");
        Settings::default()
    })
}


fn render_options(settings: &Settings, variant: Option<Variant>) -> RenderOptions {
    RenderOptions {
        variant: variant.unwrap_or(settings.variant),
        embed_url: settings.embed_url.clone(),
    }
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = settings();

    match cli.command {
        None => commands::dashboard::run(render_options(&settings, None))?,
        Some(Commands::Dashboard { variant }) => {
            commands::dashboard::run(render_options(&settings, variant))?;
        }
        Some(Commands::Show { variant, hide_atomicity, no_color }) => {
            commands::show::run(render_options(&settings, variant), hide_atomicity, no_color)?;
        }
        Some(Commands::Export { format, output, open, variant, hide_atomicity }) => {
            commands::export::run(
                &settings,
                render_options(&settings, variant),
                hide_atomicity,
                format,
                output,
                open,
            )?;
        }
        Some(Commands::Contact { open }) => commands::contact::run(open)?,
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_overrides_settings_variant() {
        let settings = Settings {
            variant: Variant::Embed,
            embed_url: Some("https://bi.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(render_options(&settings, None).variant, Variant::Embed);
        assert_eq!(render_options(&settings, Some(Variant::Full)).variant, Variant::Full);
        assert_eq!(render_options(&settings, None).embed_url.as_deref(), Some("https://bi.example.com"));
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["hdbi", "export", "--format", "svg", "--hide-atomicity"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Export { format: ExportFormat::Svg, hide_atomicity: true, .. })
        ));
    }
}
