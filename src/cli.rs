use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify reads from every sorted BAM under the root directory and
    /// write one outcome summary CSV per sample
    Classify {
        /// Root directory containing per-sample subfolders with sorted BAMs
        #[arg(default_value = ".")]
        root: String,
    },

    /// Concatenate previously written per-sample summaries into a single
    /// combined CSV at the root
    Merge {
        /// Root directory containing per-sample subfolders with summary CSVs
        #[arg(default_value = ".")]
        root: String,
    },
}
