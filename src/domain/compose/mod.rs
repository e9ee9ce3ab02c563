//! Manifest composer: merges descriptors into proxy, manifest, recipe, and ini data.

mod composer;
mod manifest;
mod proxy;
mod recipe;

pub use composer::{Composition, compose, image_recipe, runtime_config};
pub use manifest::{
    BACKEND_SERVICE, BuildContext, ComposeManifest, Network, PortMapping, Service, VolumeMount,
    WEBSERVER_SERVICE,
};
pub use proxy::{ProxyConfig, ServerBlock};
pub use recipe::{ImageRecipe, IniEntry, RuntimeConfig};
