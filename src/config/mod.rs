pub mod traits;
pub mod evolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, MAX_DEPTH_BUDGET};
pub use traits::ConfigSection;
