use std::path::PathBuf;

use alu_types::Standard;
use anyhow::Result;
use aluframe_cli::{
    list_profiles, load_catalog, load_config, parse_point, run_bom, run_generate,
    GenerateRequest,
};
use clap::{Parser, Subcommand};
use profile_catalog::CatalogFilter;
use profile_ops::KernelBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aluframe")]
#[command(about = "AluFrame: parametric T-slot aluminum profile generator")]
struct Cli {
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Generator config JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog profiles
    List {
        /// Only this standard (GB or EN)
        #[arg(long)]
        standard: Option<Standard>,

        /// Only this series, e.g. 40
        #[arg(long)]
        series: Option<String>,

        /// Substring of the id or name
        #[arg(long)]
        search: Option<String>,
    },

    /// Generate one profile segment
    Generate {
        /// Catalog id, e.g. GB-4040
        id: String,

        /// Placement as x,y,z in working units
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Option<[f64; 3]>,

        /// Segment length in millimeters
        #[arg(long)]
        length: Option<f64>,

        /// Geometry kernel: cell or truck
        #[arg(long)]
        backend: Option<KernelBackend>,

        /// Write the mesh to this STL file
        #[arg(long)]
        stl: Option<PathBuf>,

        /// Write ASCII instead of binary STL
        #[arg(long, requires = "stl")]
        ascii: bool,
    },

    /// Bill of materials for a list of `id` or `id:length_mm` items
    Bom {
        #[arg(required = true)]
        items: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::List {
            standard,
            series,
            search,
        } => {
            let filter = CatalogFilter {
                standard,
                series,
                search,
            };
            print!("{}", list_profiles(&catalog, &filter));
        }

        Commands::Generate {
            id,
            at,
            length,
            backend,
            stl,
            ascii,
        } => {
            let request = GenerateRequest {
                id,
                at: at.unwrap_or([0.0; 3]),
                length_mm: length,
                backend,
                config: cli.config,
                stl,
                ascii,
            };
            print!("{}", run_generate(&catalog, &request)?);
        }

        Commands::Bom { items } => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", run_bom(&catalog, &items, &config)?);
        }
    }

    Ok(())
}
