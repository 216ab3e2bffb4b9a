use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::pipeline::Command;

#[derive(Parser, Debug)]
#[command(name = "labels")]
#[command(version)]
#[command(about = "List or set Microsoft sensitivity labels in Office documents", long_about = None)]
#[command(after_help = "Examples:\n  \
  labels --recursive --labeled get ./shared        list labeled documents below ./shared\n  \
  labels --summary set report.docx LABEL TENANT    apply a label to report.docx\n  \
  labels --dry-run set ./drafts LABEL TENANT       show what set would apply")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only show files with labels
    #[arg(long, global = true)]
    pub labeled: bool,

    /// Show a summary of results
    #[arg(long, global = true)]
    pub summary: bool,

    /// Recurse through subdirectories
    #[arg(long, global = true)]
    pub recursive: bool,

    /// Show the results of set without applying them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Directory for file extraction (default: system temp dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub tmp_dir: Option<PathBuf>,

    /// Keep extracted files after processing
    #[arg(long, global = true)]
    pub keep_tmp: bool,

    /// JSON file mapping label and tenant IDs to names (get only)
    #[arg(long, global = true, value_name = "FILE")]
    pub resolve: Option<PathBuf>,

    /// Fail on malformed label documents instead of reporting no labels
    #[arg(long, global = true)]
    pub strict: bool,

    /// File extension to process, repeatable (default: .docx .xlsx .pptx)
    #[arg(long = "ext", global = true, value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Show diagnostic output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List sensitivity labels for a file or directory
    Get {
        /// Path to the file or directory
        path: PathBuf,
    },
    /// Apply a sensitivity label to a file or directory
    Set {
        /// Path to the file or directory
        path: PathBuf,
        /// Sensitivity label ID to apply
        label_id: String,
        /// Microsoft tenant ID to apply
        tenant_id: String,
    },
}

impl Cli {
    pub fn path(&self) -> &Path {
        match &self.command {
            Commands::Get { path } | Commands::Set { path, .. } => path,
        }
    }

    pub fn pipeline_command(&self) -> Command {
        match &self.command {
            Commands::Get { .. } => Command::Get,
            Commands::Set {
                label_id,
                tenant_id,
                ..
            } => Command::Set {
                label_id: label_id.clone(),
                tenant_id: tenant_id.clone(),
            },
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config {
            recursive: self.recursive,
            dry_run: self.dry_run,
            keep_tmp: self.keep_tmp,
            strict: self.strict,
            ..Config::default()
        };
        if let Some(dir) = &self.tmp_dir {
            config.tmp_dir = dir.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        config
    }
}
