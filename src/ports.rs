use tracing::debug;

use crate::constants::{USB_BRIDGE_KEYWORDS, USB_BRIDGE_VIDS};
use crate::error::{EspError, EspResult};

/// One enumerated serial device, reduced to the fields port filtering needs.
#[derive(Debug, Clone)]
pub struct DetectedPort {
    pub name: String,
    pub description: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
}

impl From<serialport::SerialPortInfo> for DetectedPort {
    fn from(info: serialport::SerialPortInfo) -> Self {
        match info.port_type {
            serialport::SerialPortType::UsbPort(usb) => DetectedPort {
                name: info.port_name,
                description: usb.product.or(usb.manufacturer).unwrap_or_default(),
                vid: Some(usb.vid),
                pid: Some(usb.pid),
            },
            _ => DetectedPort {
                name: info.port_name,
                description: String::new(),
                vid: None,
                pid: None,
            },
        }
    }
}

/// Keep ports whose descriptor names a known USB-UART bridge chip or whose
/// vendor ID matches one, deduplicated by device name in first-seen order.
pub fn qualify(ports: &[DetectedPort]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();

    for port in ports {
        let description = port.description.to_lowercase();
        let keyword_match = USB_BRIDGE_KEYWORDS.iter().any(|k| description.contains(k));
        let vid_match = port.vid.is_some_and(|vid| USB_BRIDGE_VIDS.contains(&vid));

        if (keyword_match || vid_match) && !selected.contains(&port.name) {
            selected.push(port.name.clone());
        }
    }

    selected
}

/// Enumerate system serial ports and keep the likely ESP32 candidates.
pub fn detect_ports() -> EspResult<Vec<String>> {
    let ports = serialport::available_ports()
        .map_err(|e| EspError::Unexpected(format!("Could not enumerate serial ports: {e}")))?;

    let candidates: Vec<DetectedPort> = ports.into_iter().map(DetectedPort::from).collect();
    debug!("Enumerated {} serial ports", candidates.len());

    Ok(qualify(&candidates))
}
