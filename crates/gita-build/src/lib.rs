//! Container recipes, release workflow and image naming for the gita server.
//!
//! # Release pipeline
//!
//! ```text
//! GitHub release published
//!   1. Checkout    ── actions/checkout
//!   2. Emulation   ── docker/setup-qemu-action + docker/setup-buildx-action
//!   3. Login       ── docker/login-action (registry secrets, fails if unset)
//!   4. Tag         ── ${GITHUB_REF#refs/tags/}  (release::tag_from_ref)
//!   5. Build+push  ── docker/build-push-action → <user>/gita-server-<tag>:latest
//! ```
//!
//! # Recipes
//!
//! Both recipes build the `gita` binary with cargo-chef layer caching and
//! launch `gita serve` with `cert.pem` / `key.pem` from `/app`:
//! - **Toolchain**: installs the OS compiler toolchain before compiling
//! - **Slim**: skips that step and relies on what the builder image ships

pub mod dockerfile;
pub mod eject;
pub mod release;
pub mod workflow;

pub use dockerfile::{DockerfileGenerator, RecipeVariant};
pub use eject::EjectError;
pub use release::{ImageRef, tag_from_ref};
pub use workflow::render_release_workflow;
