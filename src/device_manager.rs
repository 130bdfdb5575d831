use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::{
    CommandName, DataMessage, DataUpdate, DeviceRemove, DeviceStore, DeviceUpdate, VconnexDevice,
    EXTENDED_DATA_MESSAGE,
};

const EVENT_CHANNEL_SIZE: usize = 64;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command channel to the vendor cloud is closed")]
    ChannelClosed,
    #[error("Command rejected: {0}")]
    Rejected(String),
}

/// Seam to the vendor transport. Commands are fire-and-forget: no ack,
/// retry or timeout handling happens on this side of the trait.
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    async fn send_command(
        &self,
        device_id: &str,
        command: CommandName,
        params: Map<String, Value>,
    ) -> Result<(), CommandError>;
}

/// Device lifecycle signals, each carrying the affected device ids.
#[derive(Debug, Clone)]
pub enum DeviceManagerEvent {
    DeviceAdded(Vec<String>),
    DeviceUpdated(Vec<String>),
    DeviceRemoved(Vec<String>),
}

/// Owns the device store and fans device lifecycle signals out to the
/// platform tasks. Reads are synchronous against the cached store; commands
/// go through the dispatcher seam.
pub struct VconnexDeviceManager {
    store: RwLock<DeviceStore>,
    dispatcher: Arc<dyn CommandDispatcher>,
    events: broadcast::Sender<DeviceManagerEvent>,
}

impl VconnexDeviceManager {
    pub fn new(dispatcher: Arc<dyn CommandDispatcher>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            store: RwLock::new(DeviceStore::new()),
            dispatcher,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeviceManagerEvent> {
        self.events.subscribe()
    }

    /// Stores the announced devices and emits `DeviceAdded` for the new ones
    /// and `DeviceUpdated` for re-announcements that changed the record.
    pub fn add_devices(&self, devices: Vec<VconnexDevice>) {
        let mut added = Vec::new();
        let mut updated = Vec::new();
        {
            let Ok(mut store) = self.store.write() else {
                log::error!("Device store lock poisoned, dropping device announcement");
                return;
            };
            for device in &devices {
                match store.add(device) {
                    DeviceUpdate::Added(id) => added.push(id.to_owned()),
                    DeviceUpdate::Replaced { device_id, .. } => {
                        updated.push(device_id.to_owned())
                    }
                    DeviceUpdate::NoChange => {}
                }
            }
        }
        if !added.is_empty() {
            self.emit(DeviceManagerEvent::DeviceAdded(added));
        }
        if !updated.is_empty() {
            self.emit(DeviceManagerEvent::DeviceUpdated(updated));
        }
    }

    pub fn remove_devices(&self, device_ids: &[String]) {
        let mut removed = Vec::new();
        {
            let Ok(mut store) = self.store.write() else {
                log::error!("Device store lock poisoned, dropping device removal");
                return;
            };
            for device_id in device_ids {
                if let DeviceRemove::Removed(_) = store.remove(device_id) {
                    removed.push(device_id.clone());
                }
            }
        }
        if !removed.is_empty() {
            self.emit(DeviceManagerEvent::DeviceRemoved(removed));
        }
    }

    /// Caches an incoming data report and emits `DeviceUpdated` when the
    /// payload actually changed.
    pub fn handle_data_message(&self, device_id: &str, message: DataMessage) {
        let update = {
            let Ok(mut store) = self.store.write() else {
                log::error!("Device store lock poisoned, dropping data message");
                return;
            };
            store.store_message(device_id, message)
        };
        match update {
            DataUpdate::Changed { .. } => {
                self.emit(DeviceManagerEvent::DeviceUpdated(vec![device_id.to_owned()]));
            }
            DataUpdate::Equal => {}
            DataUpdate::UnknownDevice => {
                log::debug!("Data message for unknown device [{}]", device_id);
            }
        }
    }

    pub fn device(&self, device_id: &str) -> Option<VconnexDevice> {
        self.store
            .read()
            .ok()
            .and_then(|store| store.get_device(device_id).cloned())
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.store
            .read()
            .map(|store| store.device_ids().cloned().collect())
            .unwrap_or_default()
    }

    pub fn devices(&self) -> Vec<VconnexDevice> {
        self.store
            .read()
            .map(|store| store.iter().map(|(_, entry)| entry.device.clone()).collect())
            .unwrap_or_default()
    }

    pub fn device_count(&self) -> usize {
        self.store.read().map(|store| store.count()).unwrap_or(0)
    }

    /// Reads a param out of the named cached report.
    pub fn param_value(&self, device_id: &str, message: &str, param: &str) -> Option<Value> {
        self.store
            .read()
            .ok()
            .and_then(|store| store.param_value(device_id, message, param).cloned())
    }

    /// Reads a param out of the extended data report. A missing report or a
    /// report without the param yields `None`, never an error.
    pub fn extended_param_value(&self, device_id: &str, param: &str) -> Option<Value> {
        let Ok(store) = self.store.read() else {
            log::error!("Device store lock poisoned reading extended data");
            return None;
        };
        store
            .get(device_id)
            .and_then(|entry| entry.message(EXTENDED_DATA_MESSAGE))
            .and_then(|msg| msg.param_value(param))
            .cloned()
    }

    pub async fn send_command(
        &self,
        device_id: &str,
        command: CommandName,
        params: Map<String, Value>,
    ) -> Result<(), CommandError> {
        log::debug!("[{}] {} {:?}", device_id, command, params);
        self.dispatcher.send_command(device_id, command, params).await
    }

    fn emit(&self, event: DeviceManagerEvent) {
        // A send error only means nobody is subscribed yet.
        if self.events.send(event).is_err() {
            log::trace!("No subscribers for device manager event");
        }
    }
}
