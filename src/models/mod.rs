mod chain;
mod market;
mod token;

pub use chain::{supported_keys, validate_address, ChainSpec};
pub use market::{MarketData, PriceWindows};
pub use token::{HolderNode, TokenData};

pub use chain::all as all_chains;
pub use chain::get as get_chain;
