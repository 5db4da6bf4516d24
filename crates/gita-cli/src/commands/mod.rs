mod artifacts;
mod maintenance;
mod serve;

pub use artifacts::{dockerfile, eject, image, workflow};
pub use maintenance::{cleanup, enhance, populate};
pub use serve::{ServeArgs, serve};
