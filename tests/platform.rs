#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use vconnex_entities::*;

    struct NullDispatcher;

    #[async_trait]
    impl CommandDispatcher for NullDispatcher {
        async fn send_command(
            &self,
            _device_id: &str,
            _command: CommandName,
            _params: Map<String, Value>,
        ) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn meter(id: &str) -> VconnexDevice {
        VconnexDevice::new(id, 3009)
            .name("Meter")
            .param("Power", ParamType::RawValue)
            .param("Voltage", ParamType::RawValue)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn registers_existing_and_announced_devices_in_batches() {
        let manager = Arc::new(VconnexDeviceManager::new(Arc::new(NullDispatcher)));
        manager.add_devices(vec![meter("meter-1")]);

        let batches: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&batches);
        let handle = spawn_sensor_platform(
            Arc::clone(&manager),
            Box::new(move |entities| {
                sink.lock().unwrap().push(
                    entities
                        .iter()
                        .map(|e| e.unique_id().to_owned())
                        .collect(),
                );
            }),
        );
        settle().await;

        {
            let batches = batches.lock().unwrap();
            // one batch for the device known before the platform came up
            assert_eq!(batches.len(), 1);
            assert_eq!(batches[0].len(), 2);
            assert!(batches[0].contains(&"vconnex.meter-1.Power".to_owned()));
            assert!(batches[0].contains(&"vconnex.meter-1.Voltage".to_owned()));
        }

        manager.add_devices(vec![meter("meter-2")]);
        settle().await;

        {
            let batches = batches.lock().unwrap();
            assert_eq!(batches.len(), 2);
            assert_eq!(batches[1].len(), 2);
            assert!(batches[1].contains(&"vconnex.meter-2.Power".to_owned()));
        }

        handle.stop().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_announcement_does_not_duplicate_entities() {
        let manager = Arc::new(VconnexDeviceManager::new(Arc::new(NullDispatcher)));

        let batches: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&batches);
        let handle = spawn_sensor_platform(
            Arc::clone(&manager),
            Box::new(move |entities| {
                sink.lock().unwrap().push(
                    entities
                        .iter()
                        .map(|e| e.unique_id().to_owned())
                        .collect(),
                );
            }),
        );
        settle().await;

        manager.add_devices(vec![meter("meter-1")]);
        settle().await;
        assert_eq!(batches.lock().unwrap().len(), 1);

        // remove and re-announce: a second DeviceAdded for the same ids
        manager.remove_devices(&["meter-1".to_owned()]);
        manager.add_devices(vec![meter("meter-1")]);
        settle().await;

        // the re-announcement resolved only already-registered unique ids
        assert_eq!(batches.lock().unwrap().len(), 1);

        handle.stop().await.unwrap();
    }

    #[tokio::test]
    async fn devices_without_matching_type_register_nothing() {
        let manager = Arc::new(VconnexDeviceManager::new(Arc::new(NullDispatcher)));
        manager.add_devices(vec![
            VconnexDevice::new("stranger", 9999).param("Power", ParamType::RawValue)
        ]);

        let batches: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&batches);
        let handle = spawn_sensor_platform(
            Arc::clone(&manager),
            Box::new(move |entities| {
                sink.lock().unwrap().push(
                    entities
                        .iter()
                        .map(|e| e.unique_id().to_owned())
                        .collect(),
                );
            }),
        );
        settle().await;

        assert!(batches.lock().unwrap().is_empty());
        handle.stop().await.unwrap();
    }
}
