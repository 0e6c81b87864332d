pub mod init;
pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogly")]
#[command(version)]
#[command(about = "A small blog of users, posts and tags", long_about = None)]
pub struct Cli {
    #[arg(short, long, env = "BLOGLY_CONFIG", default_value = "blogly.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default blogly.toml
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Apply migrations and start the web server
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create or upgrade the database schema
    Migrate,
    /// Insert the sample users
    Seed {
        /// Drop every table before seeding
        #[arg(long)]
        reset: bool,
    },
}
