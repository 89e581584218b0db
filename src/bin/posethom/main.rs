use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;

use cli::Cli;

fn main() {
    tracing_subscriber::registry()
        .with( fmt::layer().with_writer( std::io::stderr ) )
        .with( EnvFilter::from_default_env().add_directive( tracing::Level::INFO.into() ) )
        .init();

    let cli = Cli::parse();
    if let Err( e ) = run( cli ) {
        eprintln!( "Error: {:#}", e );
        process::exit( 1 );
    }
}

fn run( cli: Cli ) -> Result< () > {
    let config = cli.config();
    tracing::debug!( ?config, "starting" );

    let report = posethom::pipeline::run_file( &cli.input, &config )
        .with_context( || format!( "failed to process {}", cli.input.display() ) )?;

    if cli.json {
        println!( "{}", serde_json::to_string_pretty( &report )? );
    } else {
        print!( "{}", report );
    }
    Ok( () )
}
