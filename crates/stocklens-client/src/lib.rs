pub mod client_ext;
pub mod config;
pub mod error;
pub mod input;
pub mod lens;
pub mod render;
pub mod schema;
pub mod secret;

pub mod prelude {
    pub use crate::client_ext::ClientExt as Finnhub;
    pub use crate::config::{Config, Endpoints};
    pub use crate::error::{FetchError, Field};
    pub use crate::input::FormInput;
    pub use crate::lens::Action;
    pub use crate::render::Markup;
    pub use crate::secret::ApiKey;
    #[allow(unused_imports)]
    pub use reqwest::Client;

    pub fn build_client(config: &Config) -> anyhow::Result<Client> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
