pub mod ai;
pub mod config;
pub mod corpus;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod feed;
pub mod nlp;
pub mod outcome;
pub mod pipeline;
pub mod services;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use outcome::Outcome;
