use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use posethom::pipeline::{Config, InputFormat};

#[derive(Parser)]
#[command(name = "posethom")]
#[command(author, version, about = "Homology and Whitney class of a finite poset over Z/2")]
pub struct Cli {
    /// Input file: one arrow {a,b} per line, or one maximal simplex per line
    pub input:      PathBuf,

    /// How to read the input file
    #[arg(long, value_enum, default_value_t = Format::Poset)]
    pub format:     Format,

    /// Skip the Whitney class
    #[arg(long)]
    pub no_whitney: bool,

    /// Check the boundary matrix factorization
    #[arg(long)]
    pub verify:     bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json:       bool,

    /// Show progress bars
    #[arg(long)]
    pub progress:   bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Covering arrows of a poset
    Poset,
    /// Maximal simplices of a simplicial complex
    Simplices,
}

impl Cli {

    pub fn config( &self ) -> Config {
        let format = match self.format {
            Format::Poset       =>  InputFormat::Poset,
            Format::Simplices   =>  InputFormat::MaximalSimplices,
        };
        Config{
            format,
            whitney:        ! self.no_whitney,
            verify:         self.verify,
            show_progress:  self.progress,
        }
    }
}
