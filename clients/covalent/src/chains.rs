use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};

/// Networks supported by the portfolio endpoint, identified by their
/// canonical Covalent chain slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    EthMainnet,
    BaseMainnet,
    AvalancheMainnet,
    ArbitrumMainnet,
    ZksyncMainnet,
    GnosisMainnet,
    MaticMainnet,
    PolygonZkevmMainnet,
    OptimismMainnet,
    LineaMainnet,
}

impl Chain {
    /// The chain slug used in API paths, e.g. "eth-mainnet".
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::EthMainnet => "eth-mainnet",
            Chain::BaseMainnet => "base-mainnet",
            Chain::AvalancheMainnet => "avalanche-mainnet",
            Chain::ArbitrumMainnet => "arbitrum-mainnet",
            Chain::ZksyncMainnet => "zksync-mainnet",
            Chain::GnosisMainnet => "gnosis-mainnet",
            Chain::MaticMainnet => "matic-mainnet",
            Chain::PolygonZkevmMainnet => "polygon-zkevm-mainnet",
            Chain::OptimismMainnet => "optimism-mainnet",
            Chain::LineaMainnet => "linea-mainnet",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chain = match s.trim() {
            "eth-mainnet" => Chain::EthMainnet,
            "base-mainnet" => Chain::BaseMainnet,
            "avalanche-mainnet" => Chain::AvalancheMainnet,
            "arbitrum-mainnet" => Chain::ArbitrumMainnet,
            "zksync-mainnet" => Chain::ZksyncMainnet,
            "gnosis-mainnet" => Chain::GnosisMainnet,
            "matic-mainnet" => Chain::MaticMainnet,
            "polygon-zkevm-mainnet" => Chain::PolygonZkevmMainnet,
            "optimism-mainnet" => Chain::OptimismMainnet,
            "linea-mainnet" => Chain::LineaMainnet,
            other => bail!("unknown chain: {}", other),
        };
        Ok(chain)
    }
}
