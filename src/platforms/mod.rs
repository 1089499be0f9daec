//! Bundled platforms.
//!
//! `resolve` looks a platform up by any of its aliases, which are the same
//! names used to title its column in the formats table.

pub mod android;
pub mod flutter;
pub mod ios;
pub mod json;
pub mod mock;

pub use android::Android;
pub use flutter::Flutter;
pub use ios::Ios;
pub use json::Json;
pub use mock::MockPlatform;

use crate::error::{Error, Result};
use crate::platform::Platform;

/// All bundled platforms, test mock excluded.
pub fn all() -> Vec<Box<dyn Platform>> {
    vec![
        Box::new(Android),
        Box::new(Ios),
        Box::new(Json),
        Box::new(Flutter),
    ]
}

/// Find a bundled platform by name or alias.
pub fn resolve(name: &str) -> Result<Box<dyn Platform>> {
    all()
        .into_iter()
        .find(|platform| platform.name() == name || platform.names().contains(&name))
        .ok_or_else(|| Error::UnknownPlatform {
            name: name.to_owned(),
        })
}
