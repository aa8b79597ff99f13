pub mod esptool;
pub mod idf;

use std::path::{Path, PathBuf};

use crate::constants::{CHIP, ESPTOOL_BAUD, FLASH_ARTIFACTS};

/// Everything one direct flashing-utility invocation needs: the chip, the
/// port, and the flash addresses bound to binary files.
#[derive(Debug)]
pub struct FlashTarget {
    pub chip: &'static str,
    pub port: String,
    pub artifacts: Vec<(String, PathBuf)>,
}

impl FlashTarget {
    /// Collect the conventional build artifacts under `build_dir`. Artifacts
    /// that are not on disk are returned by name rather than failing the run.
    pub fn from_build_dir(port: &str, build_dir: &Path) -> (Self, Vec<&'static str>) {
        let mut artifacts = Vec::new();
        let mut missing = Vec::new();

        for (address, relative) in FLASH_ARTIFACTS {
            let path = build_dir.join(relative);
            if path.is_file() {
                artifacts.push((address.to_string(), path));
            } else {
                missing.push(relative);
            }
        }

        let target = FlashTarget {
            chip: CHIP,
            port: port.to_string(),
            artifacts,
        };
        (target, missing)
    }

    /// Argument vector for one `esptool write_flash` invocation, without the
    /// interpreter prefix.
    pub fn esptool_args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "--chip",
            self.chip,
            "--port",
            self.port.as_str(),
            "--baud",
            ESPTOOL_BAUD,
            "--before",
            "default_reset",
            "--after",
            "hard_reset",
            "write_flash",
            "-z",
            "--flash_mode",
            "dio",
            "--flash_freq",
            "80m",
            "--flash_size",
            "detect",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        for (address, path) in &self.artifacts {
            args.push(address.clone());
            args.push(path.display().to_string());
        }

        args
    }
}
