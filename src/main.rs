use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use md_tiles::{
    config::OutputPaths,
    convert::{convert_file, decode_files, run_batch, Extras},
};

#[derive(Parser, Debug)]
#[command(about = "Convert images into palette, pattern and name-table data")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a single PNG
    Encode {
        input: PathBuf,
        #[arg(long)]
        palette: PathBuf,
        #[arg(long)]
        patterns: PathBuf,
        #[arg(long)]
        name_table: PathBuf,
        /// Write the image as the display would show it
        #[arg(long)]
        preview: Option<PathBuf>,
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Run the jobs listed in a JSON config file
    Batch { config: PathBuf },
    /// Render existing artifacts back into a PNG
    Decode {
        #[arg(long)]
        palette: PathBuf,
        #[arg(long)]
        patterns: PathBuf,
        #[arg(long)]
        name_table: PathBuf,
        #[arg(long)]
        width_tiles: u32,
        #[arg(long)]
        out: PathBuf,
    },
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match args.command {
        Command::Encode {
            input,
            palette,
            patterns,
            name_table,
            preview,
            manifest,
        } => {
            let outputs = OutputPaths {
                palette,
                patterns,
                name_table,
            };
            convert_file(&input, &outputs, &Extras { preview, manifest })?;
        }
        Command::Batch { config } => {
            run_batch(&config)?;
        }
        Command::Decode {
            palette,
            patterns,
            name_table,
            width_tiles,
            out,
        } => {
            let inputs = OutputPaths {
                palette,
                patterns,
                name_table,
            };
            decode_files(&inputs, width_tiles, &out)?;
        }
    }
    Ok(())
}
