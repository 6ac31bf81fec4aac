/// Result alias used across pullwatch; errors are carried as `anyhow::Error`
/// so that adapters can attach context while domain errors stay typed.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
