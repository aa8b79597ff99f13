pub(crate) const CHIP: &str = "esp32c6";

/// Descriptor substrings of common USB-to-serial bridge chips, lowercase.
pub(crate) const USB_BRIDGE_KEYWORDS: [&str; 4] = ["cp210", "ch340", "ftdi", "esp32"];

/// CP210x, CH340, FTDI vendor IDs.
pub(crate) const USB_BRIDGE_VIDS: [u16; 3] = [0x10C4, 0x1A86, 0x0403];

pub(crate) const ESPTOOL_BAUD: &str = "460800";

/// Flash address to build artifact, following the ESP-IDF build output layout.
pub(crate) const FLASH_ARTIFACTS: [(&str, &str); 3] = [
    ("0x0", "bootloader/bootloader.bin"),
    ("0x8000", "partition_table/partition-table.bin"),
    ("0x10000", "firmware.bin"),
];

pub(crate) const IDF_PATH_VAR: &str = "IDF_PATH";
pub(crate) const EXPORT_SCRIPT: &str = "export.sh";

#[cfg(windows)]
pub(crate) const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub(crate) const PATH_LIST_SEPARATOR: &str = ":";
