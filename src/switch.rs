use std::sync::Arc;

use crate::{
    AddEntities, CommandError, DescriptionListResolver, DeviceTypeFilter, EntityContext,
    EntityDescription, ParamDesc, ParamResolver, ParamType, Platform, PlatformHandle,
    VconnexDevice, VconnexDeviceManager, VconnexEntity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDeviceClass {
    Switch,
    Outlet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchDescription {
    pub key: String,
    pub name: Option<String>,
    pub device_class: Option<SwitchDeviceClass>,
}

impl SwitchDescription {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            device_class: None,
        }
    }

    pub fn device_class(mut self, device_class: SwitchDeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }
}

impl EntityDescription for SwitchDescription {
    fn from_param(param: &ParamDesc) -> Self {
        Self {
            key: param.key.clone(),
            name: param.name.clone(),
            device_class: None,
        }
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn merge(&mut self, overrides: &Self) {
        if overrides.name.is_some() {
            self.name = overrides.name.clone();
        }
        if overrides.device_class.is_some() {
            self.device_class = overrides.device_class;
        }
    }
}

/// Every declared on/off param becomes a switch, regardless of device type.
pub fn switch_resolvers() -> Vec<Box<dyn DescriptionListResolver<SwitchDescription>>> {
    vec![Box::new(ParamResolver::new(
        DeviceTypeFilter::Any,
        [ParamType::OnOff],
    ))]
}

pub struct VconnexSwitchEntity {
    context: EntityContext,
    description: SwitchDescription,
}

impl VconnexSwitchEntity {
    pub fn new(
        device: &VconnexDevice,
        manager: Arc<VconnexDeviceManager>,
        description: SwitchDescription,
    ) -> Self {
        Self {
            context: EntityContext::new(device, manager, &description.key),
            description,
        }
    }

    pub fn description(&self) -> &SwitchDescription {
        &self.description
    }

    pub fn is_on(&self) -> Option<bool> {
        self.context.bool_value(&self.description.key)
    }

    pub async fn turn_on(&self) -> Result<(), CommandError> {
        self.context.send_set_data(&self.description.key, 1).await
    }

    pub async fn turn_off(&self) -> Result<(), CommandError> {
        self.context.send_set_data(&self.description.key, 0).await
    }
}

impl VconnexEntity for VconnexSwitchEntity {
    fn platform(&self) -> Platform {
        Platform::Switch
    }

    fn unique_id(&self) -> &str {
        self.context.unique_id()
    }

    fn name(&self) -> &str {
        self.context.name()
    }

    fn device_id(&self) -> &str {
        self.context.device_id()
    }
}

pub fn spawn_switch_platform(
    manager: Arc<VconnexDeviceManager>,
    add_entities: AddEntities<VconnexSwitchEntity>,
) -> PlatformHandle {
    crate::spawn_platform(
        Platform::Switch,
        manager,
        switch_resolvers(),
        VconnexSwitchEntity::new,
        add_entities,
    )
}
