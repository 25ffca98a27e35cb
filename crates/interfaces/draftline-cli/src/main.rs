use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use draftline_cli::commands::{self, FinalizeInputs};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a generated component with custom markup and styles, then export
    Finalize {
        #[arg(long, help = "Generated component source")]
        generated: Utf8PathBuf,
        #[arg(long)]
        user_markup: Option<Utf8PathBuf>,
        #[arg(long)]
        base_style: Option<Utf8PathBuf>,
        #[arg(long)]
        extra_style: Option<Utf8PathBuf>,
        #[arg(long, help = "Document bundle JSON used for the metadata header")]
        bundle: Option<Utf8PathBuf>,
        #[arg(short, long, env = "DRAFTLINE_EXPORT_DIR", default_value = "export")]
        out: Utf8PathBuf,
    },
    /// Print the combined stylesheet
    Styles {
        #[arg(long)]
        base: Option<Utf8PathBuf>,
        #[arg(long)]
        extra: Option<Utf8PathBuf>,
    },
    #[command(name = "check-markup")]
    CheckMarkup { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    draftline_cli::setup_logging(cli.verbose);

    match cli.command {
        Commands::Finalize {
            generated,
            user_markup,
            base_style,
            extra_style,
            bundle,
            out,
        } => {
            commands::cmd_finalize(&FinalizeInputs {
                generated,
                user_markup,
                base_style,
                extra_style,
                bundle,
                out_dir: out,
            })?;
        }
        Commands::Styles { base, extra } => {
            print!("{}", commands::cmd_styles(base, extra)?);
        }
        Commands::CheckMarkup { path } => {
            if !commands::cmd_check_markup(&path)? {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
