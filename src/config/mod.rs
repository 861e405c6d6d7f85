mod settings;

pub use settings::{RegistryConfig, RenderConfig, Settings, StoreConfig};
