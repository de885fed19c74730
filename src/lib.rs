//! # hue_lights_rs
//!
//! An async Rust library for controlling Philips Hue smart lights through a bridge.
//!
//! This crate models the bridge's REST-like device API: it reconciles the
//! bridge's partial, inconsistently-shaped device payloads into typed state
//! snapshots, and drives bulk commands and continuous effects over many
//! lights at once.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_lights_rs::{Bridge, NamedColor};
//!
//! async fn evening_lights() -> Result<(), Box<dyn std::error::Error>> {
//!     // The address and paired credential come from the usual bridge
//!     // pairing flow, which is outside this crate.
//!     let mut bridge = Bridge::connect("192.168.1.2", "my-credential")?;
//!     bridge.discover().await?.into_result()?;
//!
//!     // Work on every reachable light except the porch.
//!     let mut lights = bridge.collection().await?;
//!     lights.drop_by_name("Porch").await?;
//!
//!     lights.turn_on_all().await.into_result()?;
//!     for light in lights.iter() {
//!         light.set_color(NamedColor::WarmWhite).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed state**: every device payload is merged into a [`LightState`]
//!   snapshot, never clobbering fields a response didn't mention
//! - **Sparse commands**: build a [`Command`] naming only the attributes to
//!   change; the local snapshot is updated optimistically on success
//! - **Registry**: a [`Bridge`] owns one [`Light`] handle per discovered
//!   device and tolerates per-device discovery failures
//! - **Bulk control**: filter a [`LightCollection`] by reachability or
//!   name, then turn on/off/toggle or set up every light with a
//!   per-device [`BatchReport`]
//! - **Effects**: the [`EffectScheduler`] runs cancellable warm color
//!   drifts and strobes over a collection
//! - **Named colors**: known-good hue and white commands via [`NamedColor`]
//!
//! ## Communication
//!
//! All traffic goes through the [`transport::Transport`] boundary; the
//! bundled [`HttpTransport`] speaks the bridge's HTTP API rooted at
//! `http://{address}/api/{credential}/`. Pairing (obtaining the
//! credential) and bridge discovery on the local network are outside this
//! crate; hand it an address and credential and it takes over from there.
//!
//! ## Staleness
//!
//! Commands update handle state optimistically instead of re-fetching.
//! When a device only partially honors a command, the local view diverges
//! until the next explicit [`Light::refresh`] or a registry-level
//! [`Bridge::update_all`]. Keeping the re-fetch explicit keeps bulk
//! operations at one round trip per light.

mod batch;
mod bridge;
mod collection;
mod command;
mod effects;
mod errors;
mod gateway;
mod light;
mod scene;
mod state;
pub mod transport;
mod types;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use batch::{BatchReport, DeviceFailure};
pub use bridge::Bridge;
pub use collection::{LightCollection, Setup};
pub use command::Command;
pub use effects::EffectScheduler;
pub use errors::Error;
pub use gateway::Gateway;
pub use light::Light;
pub use scene::Scene;
pub use state::{LightId, LightState};
pub use transport::{HttpTransport, Transport};
pub use types::{Alert, ColorMode, Effect, NamedColor, Saturation, random_color, random_white};
