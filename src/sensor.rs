use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    AddEntities, DescriptionListResolver, DeviceTypeFilter, EntityContext, EntityDescription,
    OverrideTable, ParamDesc, ParamResolver, ParamType, Platform, PlatformHandle, ValueConverter,
    VconnexDevice, VconnexDeviceManager, VconnexEntity,
};

pub const UNIT_AMPERE: &str = "A";
pub const UNIT_VOLT: &str = "V";
pub const UNIT_WATT: &str = "W";
pub const UNIT_KILOWATT_HOUR: &str = "kWh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDeviceClass {
    Current,
    Voltage,
    Power,
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStateClass {
    Measurement,
    TotalIncreasing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorDescription {
    pub key: String,
    pub name: Option<String>,
    pub device_class: Option<SensorDeviceClass>,
    pub state_class: Option<SensorStateClass>,
    pub unit: Option<String>,
    /// Value comes from the extended data report instead of the regular one.
    pub extended_param: bool,
    pub converter: Option<ValueConverter>,
}

impl SensorDescription {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            device_class: None,
            state_class: None,
            unit: None,
            extended_param: false,
            converter: None,
        }
    }

    pub fn device_class(mut self, device_class: SensorDeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }

    pub fn state_class(mut self, state_class: SensorStateClass) -> Self {
        self.state_class = Some(state_class);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn extended(mut self) -> Self {
        self.extended_param = true;
        self
    }

    pub fn converter(mut self, converter: ValueConverter) -> Self {
        self.converter = Some(converter);
        self
    }
}

impl EntityDescription for SensorDescription {
    fn from_param(param: &ParamDesc) -> Self {
        Self {
            key: param.key.clone(),
            name: param.name.clone(),
            device_class: None,
            state_class: None,
            unit: param.unit.clone(),
            extended_param: false,
            converter: None,
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
        if overrides.state_class.is_some() {
            self.state_class = overrides.state_class;
        }
        if overrides.unit.is_some() {
            self.unit = overrides.unit.clone();
        }
        if overrides.converter.is_some() {
            self.converter = overrides.converter;
        }
        self.extended_param |= overrides.extended_param;
    }
}

/// Electric meter (3009). The regular report carries live readings and
/// accumulating counters, the extended report the billing-period values.
pub fn sensor_overrides() -> OverrideTable<SensorDescription> {
    let electric_meter = [
        (
            "Current",
            SensorDescription::new("Current")
                .device_class(SensorDeviceClass::Current)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_AMPERE),
        ),
        (
            "Voltage",
            SensorDescription::new("Voltage")
                .device_class(SensorDeviceClass::Voltage)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_VOLT),
        ),
        (
            "Power",
            SensorDescription::new("Power")
                .device_class(SensorDeviceClass::Power)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_WATT),
        ),
        (
            "EnergyCount",
            SensorDescription::new("EnergyCount")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::TotalIncreasing)
                .unit(UNIT_KILOWATT_HOUR),
        ),
        (
            "ExportEnergyCount",
            SensorDescription::new("ExportEnergyCount")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::TotalIncreasing)
                .unit(UNIT_KILOWATT_HOUR),
        ),
        (
            "ConsumptionCountToday",
            SensorDescription::new("ConsumptionCountToday")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_KILOWATT_HOUR)
                .extended(),
        ),
        (
            "ConsumptionCountThisMonth",
            SensorDescription::new("ConsumptionCountThisMonth")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_KILOWATT_HOUR)
                .extended(),
        ),
        (
            "ConsumptionCostThisMonth",
            SensorDescription::new("ConsumptionCostThisMonth")
                .state_class(SensorStateClass::Measurement)
                .extended(),
        ),
        (
            "ExportCountToday",
            SensorDescription::new("ExportCountToday")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_KILOWATT_HOUR)
                .extended(),
        ),
        (
            "ExportCountThisMonth",
            SensorDescription::new("ExportCountThisMonth")
                .device_class(SensorDeviceClass::Energy)
                .state_class(SensorStateClass::Measurement)
                .unit(UNIT_KILOWATT_HOUR)
                .extended(),
        ),
        (
            "ExportCostThisMonth",
            SensorDescription::new("ExportCostThisMonth")
                .state_class(SensorStateClass::Measurement)
                .extended(),
        ),
    ];

    let mut overrides: OverrideTable<SensorDescription> = HashMap::new();
    overrides.insert(3009, electric_meter.into_iter().collect());
    overrides
}

pub fn sensor_resolvers() -> Vec<Box<dyn DescriptionListResolver<SensorDescription>>> {
    let overrides = sensor_overrides();
    let device_types = DeviceTypeFilter::of(overrides.keys().copied().collect::<Vec<_>>());
    vec![Box::new(
        ParamResolver::new(device_types, [ParamType::RawValue]).with_overrides(overrides),
    )]
}

pub struct VconnexSensorEntity {
    context: EntityContext,
    description: SensorDescription,
}

impl VconnexSensorEntity {
    pub fn new(
        device: &VconnexDevice,
        manager: Arc<VconnexDeviceManager>,
        description: SensorDescription,
    ) -> Self {
        Self {
            context: EntityContext::new(device, manager, &description.key),
            description,
        }
    }

    pub fn description(&self) -> &SensorDescription {
        &self.description
    }

    pub fn native_value(&self) -> Option<Value> {
        if self.description.extended_param {
            self.context
                .extended_value(&self.description.key, self.description.converter)
        } else {
            self.context
                .converted(&self.description.key, self.description.converter)
        }
    }
}

impl VconnexEntity for VconnexSensorEntity {
    fn platform(&self) -> Platform {
        Platform::Sensor
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

pub fn spawn_sensor_platform(
    manager: Arc<VconnexDeviceManager>,
    add_entities: AddEntities<VconnexSensorEntity>,
) -> PlatformHandle {
    crate::spawn_platform(
        Platform::Sensor,
        manager,
        sensor_resolvers(),
        VconnexSensorEntity::new,
        add_entities,
    )
}
