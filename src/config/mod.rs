mod settings;

pub use settings::{API_KEY_ENV, Config, Settings, env_api_key};
