use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{
    value_as_i64, CommandError, CommandName, Platform, ValueConverter, VconnexDevice,
    VconnexDeviceManager, DEVICE_DATA_MESSAGE, DOMAIN,
};

/// Identity and manager access shared by every entity type. Property reads
/// go against the manager's cached reports, commands against the dispatcher
/// seam. No state is kept here beyond the identity snapshot.
#[derive(Clone)]
pub struct EntityContext {
    device_id: String,
    device_type_code: u32,
    unique_id: String,
    name: String,
    manager: Arc<VconnexDeviceManager>,
}

impl EntityContext {
    pub fn new(device: &VconnexDevice, manager: Arc<VconnexDeviceManager>, key: &str) -> Self {
        Self {
            device_id: device.device_id.clone(),
            device_type_code: device.device_type_code,
            unique_id: format!("{}.{}.{}", DOMAIN, device.device_id, key),
            name: device.display_name().to_owned(),
            manager,
        }
    }

    /// Multi-channel entities carry their channel index in the display name.
    pub fn with_name_suffix(mut self, suffix: impl std::fmt::Display) -> Self {
        self.name = format!("{} {}", self.name, suffix);
        self
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_type_code(&self) -> u32 {
        self.device_type_code
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest cached value of a param from the regular data report.
    pub fn param_value(&self, param: &str) -> Option<Value> {
        self.manager
            .param_value(&self.device_id, DEVICE_DATA_MESSAGE, param)
    }

    pub fn converted(&self, param: &str, converter: Option<ValueConverter>) -> Option<Value> {
        let value = self.param_value(param)?;
        match converter {
            Some(converter) => converter.convert(&value),
            None => Some(value),
        }
    }

    /// `true` when the param's cached value is non-zero, `None` when the
    /// param was never reported.
    pub fn bool_value(&self, param: &str) -> Option<bool> {
        self.param_value(param)
            .as_ref()
            .and_then(value_as_i64)
            .map(|v| v != 0)
    }

    pub fn int_value(&self, param: &str) -> Option<i64> {
        self.param_value(param).as_ref().and_then(value_as_i64)
    }

    /// Reads a param from the extended data report. Absent data yields
    /// `None` rather than an error.
    pub fn extended_value(&self, param: &str, converter: Option<ValueConverter>) -> Option<Value> {
        let value = self.manager.extended_param_value(&self.device_id, param)?;
        match converter {
            Some(converter) => converter.convert(&value),
            None => Some(value),
        }
    }

    /// Dispatches a `CmdSetData` command with a single-key payload.
    pub async fn send_set_data(
        &self,
        param: &str,
        value: impl Into<Value>,
    ) -> Result<(), CommandError> {
        let mut params = Map::new();
        params.insert(param.to_owned(), value.into());
        self.manager
            .send_command(&self.device_id, CommandName::SetData, params)
            .await
    }
}

pub trait VconnexEntity {
    fn platform(&self) -> Platform;
    fn unique_id(&self) -> &str;
    fn name(&self) -> &str;
    fn device_id(&self) -> &str;
}
