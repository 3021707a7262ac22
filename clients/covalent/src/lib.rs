mod chains;
mod config;
mod portfolio;
mod types;

pub use chains::Chain;
pub use config::CovalentClientConfig;
pub use portfolio::{CovalentClient, COVALENT_API_BASE};
pub use types::{Holding, HoldingQuote, TokenPortfolio};
