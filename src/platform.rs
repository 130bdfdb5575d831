use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio::task::JoinError;

use crate::{
    DescriptionListResolver, DeviceManagerEvent, Platform, VconnexDevice, VconnexDeviceManager,
    VconnexEntity,
};

/// Registration seam of the host platform: receives each resolved entity
/// batch.
pub type AddEntities<E> = Box<dyn FnMut(Vec<E>) + Send>;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Error waiting for platform task to complete: {0}")]
    Join(#[from] JoinError),
}

pub struct PlatformHandle {
    stop_sender: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<()>,
}

impl PlatformHandle {
    /// Stops the platform task.
    pub async fn stop(self) -> Result<(), PlatformError> {
        let _ = self.stop_sender.send(true);
        self.handle.await?;
        Ok(())
    }
}

/// Runs one entity platform: registers entities for the devices already
/// known to the manager, then keeps registering as `DeviceAdded` signals
/// come in. One entity is built per resolved description; entities whose
/// unique id was already registered are dropped.
pub fn spawn_platform<D, E, B>(
    platform: Platform,
    manager: Arc<VconnexDeviceManager>,
    resolvers: Vec<Box<dyn DescriptionListResolver<D>>>,
    build: B,
    mut add_entities: AddEntities<E>,
) -> PlatformHandle
where
    D: Send + 'static,
    E: VconnexEntity + Send + 'static,
    B: Fn(&VconnexDevice, Arc<VconnexDeviceManager>, D) -> E + Send + 'static,
{
    let (stop_sender, mut stop_receiver) = watch::channel(false);
    let mut events = manager.subscribe();

    let handle = tokio::task::spawn(async move {
        let mut registered: HashSet<String> = HashSet::new();

        let initial = manager.device_ids();
        register_entities(
            platform,
            &manager,
            &resolvers,
            &build,
            &mut add_entities,
            &mut registered,
            &initial,
        );

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(DeviceManagerEvent::DeviceAdded(device_ids)) => {
                        register_entities(
                            platform,
                            &manager,
                            &resolvers,
                            &build,
                            &mut add_entities,
                            &mut registered,
                            &device_ids,
                        );
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        log::warn!("[{}] dropped {} device manager events", platform, missed);
                    }
                    Err(RecvError::Closed) => break,
                },
                _exit = stop_receiver.changed() => {
                    if *stop_receiver.borrow() {
                        log::trace!("[{}] received stop signal. Exiting...", platform);
                        break;
                    }
                }
            }
        }
    });

    PlatformHandle {
        stop_sender,
        handle,
    }
}

fn register_entities<D, E, B>(
    platform: Platform,
    manager: &Arc<VconnexDeviceManager>,
    resolvers: &[Box<dyn DescriptionListResolver<D>>],
    build: &B,
    add_entities: &mut AddEntities<E>,
    registered: &mut HashSet<String>,
    device_ids: &[String],
) where
    E: VconnexEntity,
    B: Fn(&VconnexDevice, Arc<VconnexDeviceManager>, D) -> E,
{
    let mut entities = Vec::new();
    for device_id in device_ids {
        let Some(device) = manager.device(device_id) else {
            log::debug!("[{}] announced device [{}] not in store", platform, device_id);
            continue;
        };
        for resolver in resolvers {
            for description in resolver.descriptions_for(&device) {
                let entity = build(&device, Arc::clone(manager), description);
                if !registered.insert(entity.unique_id().to_owned()) {
                    log::debug!(
                        "[{}] entity [{}] already registered, skipping",
                        platform,
                        entity.unique_id()
                    );
                    continue;
                }
                entities.push(entity);
            }
        }
    }
    if !entities.is_empty() {
        log::debug!("[{}] registering {} entities", platform, entities.len());
        add_entities(entities);
    }
}
