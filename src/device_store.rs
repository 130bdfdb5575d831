use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{hash_map::Keys, HashMap};

use crate::{DataMessage, VconnexDevice};

pub enum DeviceUpdate<'a> {
    Added(&'a str),
    Replaced {
        device_id: &'a str,
        from: Box<VconnexDevice>,
    },
    NoChange,
}

pub enum DeviceRemove {
    Removed(DeviceEntry),
    NotFound,
}

pub enum DataUpdate {
    Changed {
        message: String,
        old: Option<DataMessage>,
    },
    Equal,
    UnknownDevice,
}

/// Latest cached report for one message name, with receive bookkeeping.
#[derive(Debug, Clone)]
pub struct DataEntry {
    pub message: DataMessage,
    pub last_received: DateTime<Utc>,
    pub last_changed: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DeviceEntry {
    pub device: VconnexDevice,
    pub data: HashMap<String, DataEntry>,
}

impl DeviceEntry {
    pub fn new(device: VconnexDevice) -> Self {
        Self {
            device,
            data: HashMap::new(),
        }
    }

    pub fn message(&self, name: &str) -> Option<&DataMessage> {
        self.data.get(name).map(|entry| &entry.message)
    }

    pub fn param_value(&self, message: &str, param: &str) -> Option<&Value> {
        self.message(message).and_then(|msg| msg.param_value(param))
    }
}

/// In-memory map of all known devices and their latest cached data reports.
#[derive(Default, Clone)]
pub struct DeviceStore(HashMap<String, DeviceEntry>);

impl DeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a device. An announcement carrying an identical
    /// device record is a no-op; a changed record replaces the device but
    /// keeps its cached data.
    pub fn add<'a>(&mut self, device: &'a VconnexDevice) -> DeviceUpdate<'a> {
        if let Some(entry) = self.0.get_mut(&device.device_id) {
            if entry.device == *device {
                DeviceUpdate::NoChange
            } else {
                let old = std::mem::replace(&mut entry.device, device.clone());
                DeviceUpdate::Replaced {
                    device_id: &device.device_id,
                    from: Box::new(old),
                }
            }
        } else {
            self.0
                .insert(device.device_id.clone(), DeviceEntry::new(device.clone()));
            DeviceUpdate::Added(&device.device_id)
        }
    }

    pub fn remove(&mut self, device_id: &str) -> DeviceRemove {
        match self.0.remove(device_id) {
            Some(entry) => DeviceRemove::Removed(entry),
            None => DeviceRemove::NotFound,
        }
    }

    /// Caches a data report under its message name and reports whether the
    /// payload differs from the previously cached one.
    pub fn store_message(&mut self, device_id: &str, message: DataMessage) -> DataUpdate {
        let Some(device_entry) = self.0.get_mut(device_id) else {
            return DataUpdate::UnknownDevice;
        };
        let now = Utc::now();
        if let Some(entry) = device_entry.data.get_mut(&message.name) {
            entry.last_received = now;
            if entry.message == message {
                DataUpdate::Equal
            } else {
                let old = std::mem::replace(&mut entry.message, message);
                entry.last_changed = now;
                DataUpdate::Changed {
                    message: entry.message.name.clone(),
                    old: Some(old),
                }
            }
        } else {
            let name = message.name.clone();
            device_entry.data.insert(
                name.clone(),
                DataEntry {
                    message,
                    last_received: now,
                    last_changed: now,
                },
            );
            DataUpdate::Changed { message: name, old: None }
        }
    }

    pub fn get(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.0.get(device_id)
    }

    pub fn get_device(&self, device_id: &str) -> Option<&VconnexDevice> {
        self.0.get(device_id).map(|entry| &entry.device)
    }

    pub fn param_value(&self, device_id: &str, message: &str, param: &str) -> Option<&Value> {
        self.0
            .get(device_id)
            .and_then(|entry| entry.param_value(message, param))
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.0.contains_key(device_id)
    }

    pub fn device_ids(&self) -> Keys<String, DeviceEntry> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DeviceEntry)> {
        self.0.iter()
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing all devices!");
        self.0.clear();
    }
}
