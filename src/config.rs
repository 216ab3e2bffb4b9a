use std::path::PathBuf;

/// Extensions processed when the caller does not choose any.
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".docx", ".xlsx", ".pptx"];

/// Options for one run, passed explicitly to every pipeline stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory under which each archive gets its own working directory.
    pub tmp_dir: PathBuf,
    /// Accepted file extensions, with or without the leading dot.
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub dry_run: bool,
    /// Leave working directories behind for inspection.
    pub keep_tmp: bool,
    /// Fail on unreadable label documents instead of reporting no labels.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmp_dir: std::env::temp_dir(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
            dry_run: false,
            keep_tmp: false,
            strict: false,
        }
    }
}
