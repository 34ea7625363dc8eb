//! Test fixtures: PNG sources and job files in a temporary directory.

use std::path::{Path, PathBuf};

use halftone::rendering::encode_png;
use tempfile::TempDir;

/// A scratch directory that is removed on drop.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an RGBA PNG.
    pub fn write_png(&self, name: &str, width: u32, height: u32, rgba: &[u8]) -> PathBuf {
        let path = self.join(name);
        let bytes = encode_png(width, height, rgba).expect("encode fixture");
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    /// Write a single-color opaque PNG.
    pub fn write_solid(&self, name: &str, width: u32, height: u32, gray: u8) -> PathBuf {
        let rgba = solid_rgba(width, height, gray);
        self.write_png(name, width, height, &rgba)
    }

    /// Write a job file and return its path.
    pub fn write_job(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, yaml).expect("write job");
        path
    }
}

pub fn solid_rgba(width: u32, height: u32, gray: u8) -> Vec<u8> {
    [gray, gray, gray, 255].repeat((width * height) as usize)
}

/// Left-to-right ramp from black to white.
pub fn horizontal_ramp(width: u32, height: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
    }
    rgba
}

/// Job YAML for a square variable-size screen at angle 0.
pub fn variable_job(input: &str, output: &str, cell_size: u32) -> String {
    format!(
        "input: {input}\n\
         output: {output}\n\
         params:\n  \
           cell_size: {cell_size}\n  \
           pattern: variable\n  \
           shape: square\n  \
           angle: 0\n"
    )
}
