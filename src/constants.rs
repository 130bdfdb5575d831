pub const DOMAIN: &str = "vconnex";
pub const DOMAIN_NAME: &str = "Vconnex";
pub const PROJECT_CODE: &str = "HASS";

pub const DEFAULT_ENDPOINT: &str = "https://hass-api.vconnex.vn";

/// Vendor command names accepted by the cloud side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    SetData,
    GetData,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::SetData => "CmdSetData",
            CommandName::GetData => "CmdGetData",
        }
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message name under which the vendor reports derived/accumulated values
/// (daily consumption counters etc.) next to the regular data report.
pub const EXTENDED_DATA_MESSAGE: &str = "ExtendedDeviceData";

/// Message name of the regular device data report.
pub const DEVICE_DATA_MESSAGE: &str = "CmdGetData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Switch,
    Sensor,
    BinarySensor,
    Cover,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Switch => "switch",
            Platform::Sensor => "sensor",
            Platform::BinarySensor => "binary_sensor",
            Platform::Cover => "cover",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PLATFORMS: [Platform; 4] = [
    Platform::Switch,
    Platform::Sensor,
    Platform::BinarySensor,
    Platform::Cover,
];
