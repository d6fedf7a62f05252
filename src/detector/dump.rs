//! Optional on-disk dump of positive windows.
//!
//! Each positive patch is written as `L{level}_{x}x{y}.png` under the
//! configured directory. Write failures are logged and never abort a run.
use crate::image::{save_grayscale_u8, ImageU8};
use crate::types::Origin;
use log::warn;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct PatchDump {
    dir: PathBuf,
}

impl PatchDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, level: usize, origin: Origin) -> PathBuf {
        self.dir
            .join(format!("L{level}_{}x{}.png", origin.x, origin.y))
    }

    pub fn write(&self, level: usize, origin: Origin, patch: &ImageU8<'_>) {
        let path = self.path_for(level, origin);
        if let Err(err) = save_grayscale_u8(patch, &path) {
            warn!("patch dump skipped: {err}");
        }
    }
}
