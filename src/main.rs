use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use assetlore::catalog::{BuilderOptions, Catalog, CatalogBuilder, NameSource};
use assetlore::config::{AppConfig, LoadedConfig};
use assetlore::core::logging::{self, print_error, print_info, print_panel, print_success, print_warning};
use assetlore::extract::{EmailExtractor, ExtractReport, Extractor, ShopExtractor};

#[derive(Parser)]
#[command(name = "assetlore", version, about = "Game asset catalog and wiki extraction")]
struct Cli {
    /// Config file; defaults to ./assetlore.toml or the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the asset dump and write the catalog.
    Build {
        /// Directory of assets and their .meta companions.
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Item localization table.
        #[arg(long)]
        localization_file: Option<PathBuf>,
        /// Where to write the catalog JSON.
        #[arg(long)]
        output_catalog: Option<PathBuf>,
    },
    /// Answer one catalog lookup.
    Lookup {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(value_enum)]
        axis: LookupAxis,
        key: String,
    },
    /// Write wiki price lists for every store catalog.
    Shops {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        input_dir: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write wiki mail blocks for every email asset.
    Emails {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Email localization table.
        #[arg(long)]
        localization_file: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

impl Command {
    fn log_name(&self) -> &'static str {
        match self {
            Self::Build { .. } => "build",
            Self::Lookup { .. } => "lookup",
            Self::Shops { .. } => "shop",
            Self::Emails { .. } => "email",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LookupAxis {
    /// identifier -> display name
    Name,
    /// identifier -> file reference
    FileReference,
    /// identifier -> save key
    SemanticKey,
    /// save key -> display name
    NameBySemanticKey,
    /// save key -> file reference
    FileReferenceBySemanticKey,
    /// file reference -> display name
    NameByFileReference,
    /// file reference -> identifier
    IdentifierByFileReference,
}

impl LookupAxis {
    fn resolve<'a>(self, catalog: &'a Catalog, key: &str) -> &'a str {
        match self {
            Self::Name => catalog.resolve_name(key),
            Self::FileReference => catalog.resolve_file_reference(key),
            Self::SemanticKey => catalog.resolve_semantic_key(key),
            Self::NameBySemanticKey => catalog.resolve_name_by_semantic_key(key),
            Self::FileReferenceBySemanticKey => catalog.resolve_file_reference_by_semantic_key(key),
            Self::NameByFileReference => catalog.resolve_name_by_file_reference(key),
            Self::IdentifierByFileReference => catalog.resolve_identifier_by_file_reference(key),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let LoadedConfig { config, fallback } = match AppConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let log_file = logging::log_file_path(&config.paths.log_dir, cli.command.log_name());
    let _log_guard = match logging::init(&log_file, &config.logging.level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            print_warning(&format!("Diagnostic logging disabled: {e}"));
            None
        }
    };
    log::info!("{} v{} starting {}", assetlore::NAME, assetlore::VERSION, cli.command.log_name());
    if let Some(e) = fallback {
        log::warn!("{e}; using default settings");
        print_warning(&format!("{e}; using default settings"));
    }

    // Lookup output is meant to be piped
    let quiet = matches!(cli.command, Command::Lookup { .. });

    match run(cli.command, &config) {
        Ok(()) => {
            if !quiet {
                print_success(&format!("Debug information has been written to {}", log_file.display()));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            print_error(&format!("{e:#}"));
            print_error(&format!("See {} for details", log_file.display()));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    let paths = &config.paths;

    match command {
        Command::Build {
            input_dir,
            localization_file,
            output_catalog,
        } => {
            let input_dir = input_dir.unwrap_or_else(|| paths.input_dir.clone());
            let localization_file = localization_file.unwrap_or_else(|| paths.localization_file.clone());
            let output_catalog = output_catalog.unwrap_or_else(|| paths.catalog.clone());

            let builder = CatalogBuilder::new(BuilderOptions::from(&config.catalog));
            let output = builder
                .build(&input_dir, &localization_file)
                .context("Catalog build failed")?;
            output
                .catalog
                .save(&output_catalog)
                .context("Cannot persist catalog")?;

            let report = &output.report;
            print_panel(
                "Catalog",
                &format!(
                    "Entries:            {}\n\
                     Metadata files:     {}\n\
                     Asset files:        {}\n\
                     Skipped files:      {}\n\
                     Duplicate ids:      {}\n\
                     Localized names:    {}\n\
                     File-name fallback: {}\n\
                     Written to:         {}",
                    output.catalog.len(),
                    report.meta_files,
                    report.asset_files,
                    report.skipped_files,
                    report.duplicate_identifiers,
                    report.names_from(NameSource::Localized),
                    report.names_from(NameSource::FileReference),
                    output_catalog.display()
                ),
            );
        }

        Command::Lookup { catalog, axis, key } => {
            let catalog = load_catalog(catalog.as_deref().unwrap_or(paths.catalog.as_path()))?;
            println!("{}", axis.resolve(&catalog, &key));
        }

        Command::Shops {
            catalog,
            input_dir,
            output_dir,
        } => {
            let catalog = load_catalog(catalog.as_deref().unwrap_or(paths.catalog.as_path()))?;
            let extractor = ShopExtractor::new(
                input_dir.unwrap_or_else(|| paths.input_dir.clone()),
                &config.catalog.asset_extension,
                output_dir.unwrap_or_else(|| paths.output_dir.clone()),
            );
            run_extractor(&extractor, &catalog)?;
        }

        Command::Emails {
            catalog,
            input_dir,
            localization_file,
            output_dir,
        } => {
            let catalog = load_catalog(catalog.as_deref().unwrap_or(paths.catalog.as_path()))?;
            let extractor = EmailExtractor::new(
                input_dir.unwrap_or_else(|| paths.input_dir.clone()),
                &config.catalog.asset_extension,
                localization_file.unwrap_or_else(|| paths.email_localization_file.clone()),
                output_dir.unwrap_or_else(|| paths.output_dir.clone()),
            );
            run_extractor(&extractor, &catalog)?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Run `assetlore build` first to create {}", path.display()))
}

fn run_extractor(extractor: &dyn Extractor, catalog: &Catalog) -> Result<ExtractReport> {
    let report = extractor
        .run(catalog)
        .with_context(|| format!("{} extractor failed", extractor.name()))?;

    let outputs: Vec<String> = report
        .outputs
        .iter()
        .map(|path| format!("  {}", path.display()))
        .collect();
    print_panel(
        extractor.name(),
        &format!(
            "Written: {}\nSkipped: {}\nOutputs:\n{}",
            report.written,
            report.skipped,
            outputs.join("\n")
        ),
    );
    if report.outputs.is_empty() {
        print_info("Nothing to write");
    }
    if report.skipped > 0 {
        print_warning(&format!("{} records skipped", report.skipped));
    }

    Ok(report)
}
