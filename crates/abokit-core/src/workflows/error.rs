use crate::core::io::error::AboError;
use crate::core::topology::bonding::BondingLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Container(#[from] AboError),

    #[error("Failed to load bonding rules: {source}")]
    BondingRules {
        #[from]
        source: BondingLoadError,
    },
}
