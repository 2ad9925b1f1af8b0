use crate::constants::{SENSOR_BRIDGE_PID, SENSOR_BRIDGE_VID};
use crate::error::RPLidarError;
use serialport::SerialPortType;

/// `true` for the USB to UART bridge the sensors are shipped with.
pub fn is_sensor_bridge(vid: u16, pid: u16) -> bool {
    vid == SENSOR_BRIDGE_VID && pid == SENSOR_BRIDGE_PID
}

/// Names of the serial ports that look like a connected sensor.
pub fn candidate_ports() -> Result<Vec<String>, RPLidarError> {
    let ports = serialport::available_ports()?;
    log::debug!("Found {} serial ports", ports.len());
    Ok(ports
        .into_iter()
        .filter(|port| match &port.port_type {
            SerialPortType::UsbPort(usb) => is_sensor_bridge(usb.vid, usb.pid),
            _ => false,
        })
        .map(|port| port.port_name)
        .collect())
}
