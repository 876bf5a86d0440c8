pub mod alt;
pub mod client;
pub mod types;

pub use alt::OpenAiAltTextClient;
