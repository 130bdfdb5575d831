use std::collections::{HashMap, HashSet};

use crate::{ParamDesc, ParamType, VconnexDevice};

/// Platform-specific entity metadata that can be built from a raw param
/// descriptor and enriched from a static override table.
pub trait EntityDescription: Clone {
    fn from_param(param: &ParamDesc) -> Self;
    fn key(&self) -> &str;
    /// Overwrites every field the override explicitly sets, leaving the
    /// generated fields untouched otherwise.
    fn merge(&mut self, overrides: &Self);
}

#[derive(Debug, Clone)]
pub enum DeviceTypeFilter {
    Any,
    Set(HashSet<u32>),
}

impl DeviceTypeFilter {
    pub fn of(device_types: impl IntoIterator<Item = u32>) -> Self {
        Self::Set(device_types.into_iter().collect())
    }

    pub fn matches(&self, device_type_code: u32) -> bool {
        match self {
            DeviceTypeFilter::Any => true,
            DeviceTypeFilter::Set(set) => set.contains(&device_type_code),
        }
    }
}

/// Resolves entity descriptions for a device. Platforms hold a list of these
/// and concatenate the results.
pub trait DescriptionListResolver<D>: Send + Sync {
    fn descriptions_for(&self, device: &VconnexDevice) -> Vec<D>;
}

pub type OverrideTable<D> = HashMap<u32, HashMap<&'static str, D>>;

/// Param-driven resolver: walks the device's declared params and produces a
/// description for each accepted one. An override for (device type, key)
/// qualifies the param regardless of its declared type; without an override
/// the param qualifies only by declared type (and not at all when the
/// resolver requires overrides).
pub struct ParamResolver<D> {
    device_types: DeviceTypeFilter,
    param_types: HashSet<ParamType>,
    overrides: OverrideTable<D>,
    require_override: bool,
}

impl<D: EntityDescription> ParamResolver<D> {
    pub fn new(
        device_types: DeviceTypeFilter,
        param_types: impl IntoIterator<Item = ParamType>,
    ) -> Self {
        Self {
            device_types,
            param_types: param_types.into_iter().collect(),
            overrides: HashMap::new(),
            require_override: false,
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideTable<D>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Only params with an explicit override entry produce entities.
    pub fn require_override(mut self) -> Self {
        self.require_override = true;
        self
    }

    pub fn resolve_param(&self, device: &VconnexDevice, param: &ParamDesc) -> Option<D> {
        if !self.device_types.matches(device.device_type_code) {
            return None;
        }
        let entry = self
            .overrides
            .get(&device.device_type_code)
            .and_then(|table| table.get(param.key.as_str()));
        match entry {
            Some(overrides) => {
                let mut desc = D::from_param(param);
                desc.merge(overrides);
                Some(desc)
            }
            None if !self.require_override && self.param_types.contains(&param.param_type) => {
                Some(D::from_param(param))
            }
            None => None,
        }
    }
}

impl<D: EntityDescription + Send + Sync> DescriptionListResolver<D> for ParamResolver<D> {
    fn descriptions_for(&self, device: &VconnexDevice) -> Vec<D> {
        device
            .params
            .iter()
            .filter_map(|param| self.resolve_param(device, param))
            .collect()
    }
}

/// Table-driven resolver: the device type alone decides the entity list, the
/// declared params are ignored. Unmatched device types yield nothing.
pub struct FixedResolver<D> {
    entries: HashMap<u32, Vec<D>>,
}

impl<D: Clone> FixedResolver<D> {
    pub fn new(entries: HashMap<u32, Vec<D>>) -> Self {
        Self { entries }
    }

    pub fn device_types(&self) -> impl Iterator<Item = &u32> {
        self.entries.keys()
    }
}

impl<D: Clone + Send + Sync> DescriptionListResolver<D> for FixedResolver<D> {
    fn descriptions_for(&self, device: &VconnexDevice) -> Vec<D> {
        self.entries
            .get(&device.device_type_code)
            .cloned()
            .unwrap_or_default()
    }
}
