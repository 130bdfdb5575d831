use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Declared type of a device parameter as reported by the vendor cloud.
/// The vendor enum is closed; unknown codes are a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    None,
    OnOff,
    OpenClose,
    YesNo,
    Alert,
    MoveNoMove,
    RawValue,
}

impl ParamType {
    pub fn code(&self) -> u8 {
        match self {
            ParamType::None => 0,
            ParamType::OnOff => 1,
            ParamType::OpenClose => 2,
            ParamType::YesNo => 3,
            ParamType::Alert => 4,
            ParamType::MoveNoMove => 5,
            ParamType::RawValue => 6,
        }
    }
}

impl TryFrom<u8> for ParamType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ParamType::None),
            1 => Ok(ParamType::OnOff),
            2 => Ok(ParamType::OpenClose),
            3 => Ok(ParamType::YesNo),
            4 => Ok(ParamType::Alert),
            5 => Ok(ParamType::MoveNoMove),
            6 => Ok(ParamType::RawValue),
            other => Err(other),
        }
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        ParamType::try_from(code)
            .map_err(|c| de::Error::custom(format!("Invalid ParamType code: {}", c)))
    }
}

impl Serialize for ParamType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

/// One parameter descriptor from a device's declared parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDesc {
    #[serde(rename = "paramKey")]
    pub key: String,
    #[serde(rename = "paramType")]
    pub param_type: ParamType,
    #[serde(rename = "paramName", default)]
    pub name: Option<String>,
    #[serde(rename = "paramUnit", default)]
    pub unit: Option<String>,
}

impl ParamDesc {
    pub fn new(key: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            key: key.into(),
            param_type,
            name: None,
            unit: None,
        }
    }
}

/// A device as announced by the vendor cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VconnexDevice {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "deviceTypeCode")]
    pub device_type_code: u32,
    #[serde(rename = "version", default)]
    pub version: Option<String>,
    #[serde(rename = "params", default)]
    pub params: Vec<ParamDesc>,
}

impl VconnexDevice {
    pub fn new(device_id: impl Into<String>, device_type_code: u32) -> Self {
        Self {
            device_id: device_id.into(),
            name: None,
            device_type_code,
            version: None,
            params: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, param_type: ParamType) -> Self {
        self.params.push(ParamDesc::new(key, param_type));
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.device_id)
    }
}
