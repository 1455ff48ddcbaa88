/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "monodiff";
pub const APP_NAME: &str = "MonoDiff";

/// Filenames for the last-used input snapshots inside the data directory
pub const LAST_INPUT_BASE: &str = "last_base.txt";
pub const LAST_INPUT_TARGET: &str = "last_target.txt";
