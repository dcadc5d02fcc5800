//! Provider name constants

/// Together AI provider
pub const TOGETHER: &str = "together";
