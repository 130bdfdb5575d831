use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    AddEntities, DescriptionListResolver, DeviceTypeFilter, EntityContext, EntityDescription,
    OverrideTable, ParamDesc, ParamResolver, Platform, PlatformHandle, VconnexDevice,
    VconnexDeviceManager, VconnexEntity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySensorDeviceClass {
    Safety,
    Moving,
    Problem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinarySensorDescription {
    pub key: String,
    pub name: Option<String>,
    pub device_class: Option<BinarySensorDeviceClass>,
}

impl BinarySensorDescription {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            device_class: None,
        }
    }

    pub fn device_class(mut self, device_class: BinarySensorDeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }
}

impl EntityDescription for BinarySensorDescription {
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

/// Electric leak detection on the leak-guard switch models.
pub fn binary_sensor_overrides() -> OverrideTable<BinarySensorDescription> {
    let eleak = || {
        [(
            "eleak",
            BinarySensorDescription::new("eleak").device_class(BinarySensorDeviceClass::Safety),
        )]
        .into_iter()
        .collect()
    };

    let mut overrides: OverrideTable<BinarySensorDescription> = HashMap::new();
    overrides.insert(3043, eleak());
    overrides.insert(3052, eleak());
    overrides
}

/// Binary sensors are override-only: no declared param type qualifies on
/// its own.
pub fn binary_sensor_resolvers() -> Vec<Box<dyn DescriptionListResolver<BinarySensorDescription>>> {
    let overrides = binary_sensor_overrides();
    let device_types = DeviceTypeFilter::of(overrides.keys().copied().collect::<Vec<_>>());
    vec![Box::new(
        ParamResolver::new(device_types, [])
            .with_overrides(overrides)
            .require_override(),
    )]
}

pub struct VconnexBinarySensorEntity {
    context: EntityContext,
    description: BinarySensorDescription,
}

impl VconnexBinarySensorEntity {
    pub fn new(
        device: &VconnexDevice,
        manager: Arc<VconnexDeviceManager>,
        description: BinarySensorDescription,
    ) -> Self {
        Self {
            context: EntityContext::new(device, manager, &description.key),
            description,
        }
    }

    pub fn description(&self) -> &BinarySensorDescription {
        &self.description
    }

    /// Non-zero cached value means on; `None` until the param is reported.
    pub fn is_on(&self) -> Option<bool> {
        self.context.bool_value(&self.description.key)
    }
}

impl VconnexEntity for VconnexBinarySensorEntity {
    fn platform(&self) -> Platform {
        Platform::BinarySensor
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

pub fn spawn_binary_sensor_platform(
    manager: Arc<VconnexDeviceManager>,
    add_entities: AddEntities<VconnexBinarySensorEntity>,
) -> PlatformHandle {
    crate::spawn_platform(
        Platform::BinarySensor,
        manager,
        binary_sensor_resolvers(),
        VconnexBinarySensorEntity::new,
        add_entities,
    )
}
