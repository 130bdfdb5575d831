use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    AddEntities, CommandError, DescriptionListResolver, EntityContext, FixedResolver, Platform,
    PlatformHandle, VconnexDevice, VconnexDeviceManager, VconnexEntity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverDeviceClass {
    Curtain,
    Shutter,
    Garage,
}

const DEFAULT_OPEN_PARAM: &str = "curtain_open";
const DEFAULT_CLOSE_PARAM: &str = "curtain_close";
const DEFAULT_STOP_PARAM: &str = "curtain_stop";
const DEFAULT_POSITION_PARAM: &str = "open_level";

/// Cover metadata. Multi-channel devices address each channel by rewriting
/// the command param names with the channel index.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverDescription {
    pub key: String,
    pub index: u8,
    pub device_class: Option<CoverDeviceClass>,
    pub open_param: String,
    pub close_param: String,
    pub stop_param: String,
    pub position_param: String,
}

impl CoverDescription {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: 0,
            device_class: None,
            open_param: DEFAULT_OPEN_PARAM.to_owned(),
            close_param: DEFAULT_CLOSE_PARAM.to_owned(),
            stop_param: DEFAULT_STOP_PARAM.to_owned(),
            position_param: DEFAULT_POSITION_PARAM.to_owned(),
        }
    }

    pub fn device_class(mut self, device_class: CoverDeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }

    /// Channel index 0 keeps the plain param names; any other index inserts
    /// itself as the second underscore segment of every command param
    /// (`curtain_open`, 2 -> `curtain_2_open`).
    pub fn with_index(mut self, index: u8) -> Self {
        self.index = index;
        if index != 0 {
            self.open_param = param_with_index(&self.open_param, index);
            self.close_param = param_with_index(&self.close_param, index);
            self.stop_param = param_with_index(&self.stop_param, index);
            self.position_param = param_with_index(&self.position_param, index);
        }
        self
    }
}

fn param_with_index(param: &str, index: u8) -> String {
    let mut segments = param.split('_');
    let head = segments.next().unwrap_or(param);
    let tail = segments.next().unwrap_or("");
    format!("{}_{}_{}", head, index, tail)
}

/// Cover device types. The declared param list is ignored; only these types
/// produce cover entities.
pub fn cover_device_entity_map() -> HashMap<u32, Vec<CoverDescription>> {
    let mut entries = HashMap::new();
    entries.insert(
        3040,
        vec![CoverDescription::new("cover").device_class(CoverDeviceClass::Curtain)],
    );
    entries.insert(
        3041,
        vec![
            CoverDescription::new("cover_1").device_class(CoverDeviceClass::Curtain),
            CoverDescription::new("cover_2")
                .device_class(CoverDeviceClass::Curtain)
                .with_index(2),
        ],
    );
    entries.insert(
        3042,
        vec![CoverDescription::new("curtain_motor").device_class(CoverDeviceClass::Curtain)],
    );
    entries
}

pub fn cover_resolvers() -> Vec<Box<dyn DescriptionListResolver<CoverDescription>>> {
    vec![Box::new(FixedResolver::new(cover_device_entity_map()))]
}

pub struct VconnexCoverEntity {
    context: EntityContext,
    description: CoverDescription,
}

impl VconnexCoverEntity {
    pub fn new(
        device: &VconnexDevice,
        manager: Arc<VconnexDeviceManager>,
        description: CoverDescription,
    ) -> Self {
        let mut context = EntityContext::new(device, manager, &description.key);
        if description.index != 0 {
            context = context.with_name_suffix(description.index);
        }
        Self {
            context,
            description,
        }
    }

    pub fn description(&self) -> &CoverDescription {
        &self.description
    }

    pub fn current_position(&self) -> Option<i64> {
        self.context.int_value(&self.description.position_param)
    }

    pub fn is_opening(&self) -> Option<bool> {
        self.context.bool_value(&self.description.open_param)
    }

    pub fn is_closing(&self) -> Option<bool> {
        self.context.bool_value(&self.description.close_param)
    }

    /// Closed when the position reads 0; unknown until a position was
    /// reported.
    pub fn is_closed(&self) -> Option<bool> {
        self.current_position().map(|position| position == 0)
    }

    pub async fn open_cover(&self) -> Result<(), CommandError> {
        self.context
            .send_set_data(&self.description.open_param, 1)
            .await
    }

    pub async fn close_cover(&self) -> Result<(), CommandError> {
        self.context
            .send_set_data(&self.description.close_param, 1)
            .await
    }

    pub async fn stop_cover(&self) -> Result<(), CommandError> {
        self.context
            .send_set_data(&self.description.stop_param, 1)
            .await
    }

    pub async fn set_cover_position(&self, position: u8) -> Result<(), CommandError> {
        self.context
            .send_set_data(&self.description.position_param, position)
            .await
    }
}

impl VconnexEntity for VconnexCoverEntity {
    fn platform(&self) -> Platform {
        Platform::Cover
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

pub fn spawn_cover_platform(
    manager: Arc<VconnexDeviceManager>,
    add_entities: AddEntities<VconnexCoverEntity>,
) -> PlatformHandle {
    crate::spawn_platform(
        Platform::Cover,
        manager,
        cover_resolvers(),
        VconnexCoverEntity::new,
        add_entities,
    )
}
