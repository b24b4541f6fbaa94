//! Built-in workflows.
//!
//! Each preset is one parameterization of the pipeline: which schema it
//! builds, which space it targets, and whether it may submit on-chain.

pub mod camera;
pub mod image;

use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;

use crate::calldata::Network;
use crate::config::{PipelineConfig, SpaceConfig};
use crate::schema::{Edit, EditBuilder, SchemaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Camera ownership schema on the testnet space (calldata only).
    Camera,
    /// Timestamped image entity on the mainnet space.
    Image,
}

impl Preset {
    /// Build this preset's edit.
    pub fn build(self, builder: EditBuilder) -> SchemaResult<Edit> {
        match self {
            Preset::Camera => camera::build(builder),
            Preset::Image => {
                let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                image::build(builder, &timestamp)
            }
        }
    }

    /// Whether a configured signing key may be used with this preset.
    pub fn submits(self) -> bool {
        match self {
            Preset::Camera => false,
            Preset::Image => true,
        }
    }

    /// Why a run of this preset will not submit, or `None` if it will.
    pub fn skip_reason(self, key_present: bool) -> Option<&'static str> {
        if !self.submits() {
            Some("preset does not submit transactions")
        } else if !key_present {
            Some("PRIVATE_KEY not found in environment variables")
        } else {
            None
        }
    }

    /// Base configuration, before any config file is layered over it.
    pub fn config(self) -> PipelineConfig {
        let space = match self {
            Preset::Camera => SpaceConfig {
                space_id: camera::SPACE_ID.to_string(),
                network: Network::Testnet,
            },
            Preset::Image => SpaceConfig {
                space_id: image::SPACE_ID.to_string(),
                network: Network::Mainnet,
            },
        };

        PipelineConfig {
            space,
            ..PipelineConfig::default()
        }
    }
}
