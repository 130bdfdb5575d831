#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::{Arc, Mutex};
    use vconnex_entities::*;

    #[derive(Default)]
    struct RecordingDispatcher {
        commands: Mutex<Vec<(String, CommandName, Map<String, Value>)>>,
    }

    impl RecordingDispatcher {
        fn commands(&self) -> Vec<(String, CommandName, Map<String, Value>)> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandDispatcher for RecordingDispatcher {
        async fn send_command(
            &self,
            device_id: &str,
            command: CommandName,
            params: Map<String, Value>,
        ) -> Result<(), CommandError> {
            self.commands
                .lock()
                .unwrap()
                .push((device_id.to_owned(), command, params));
            Ok(())
        }
    }

    fn setup(device_type: u32) -> (Arc<RecordingDispatcher>, Arc<VconnexDeviceManager>) {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let manager = Arc::new(VconnexDeviceManager::new(dispatcher.clone()));
        manager.add_devices(vec![
            VconnexDevice::new("curtain-1", device_type).name("Curtain")
        ]);
        (dispatcher, manager)
    }

    fn cover_entity(manager: &Arc<VconnexDeviceManager>, key: &str) -> VconnexCoverEntity {
        let device = manager.device("curtain-1").unwrap();
        let description = cover_device_entity_map()
            .remove(&device.device_type_code)
            .unwrap()
            .into_iter()
            .find(|d| d.key == key)
            .unwrap();
        VconnexCoverEntity::new(&device, Arc::clone(manager), description)
    }

    #[test]
    fn is_closed_follows_position() {
        let (_, manager) = setup(3040);
        let entity = cover_entity(&manager, "cover");

        // no position reported yet
        assert_eq!(entity.current_position(), None);
        assert_eq!(entity.is_closed(), None);

        manager.handle_data_message(
            "curtain-1",
            DataMessage::new(DEVICE_DATA_MESSAGE).with_value("open_level", 0),
        );
        assert_eq!(entity.current_position(), Some(0));
        assert_eq!(entity.is_closed(), Some(true));

        manager.handle_data_message(
            "curtain-1",
            DataMessage::new(DEVICE_DATA_MESSAGE).with_value("open_level", 70),
        );
        assert_eq!(entity.current_position(), Some(70));
        assert_eq!(entity.is_closed(), Some(false));
    }

    #[test]
    fn opening_closing_derived_from_command_params() {
        let (_, manager) = setup(3040);
        let entity = cover_entity(&manager, "cover");

        assert_eq!(entity.is_opening(), None);

        manager.handle_data_message(
            "curtain-1",
            DataMessage::new(DEVICE_DATA_MESSAGE)
                .with_value("curtain_open", 1)
                .with_value("curtain_close", 0),
        );
        assert_eq!(entity.is_opening(), Some(true));
        assert_eq!(entity.is_closing(), Some(false));
    }

    #[tokio::test]
    async fn open_close_stop_issue_exactly_one_command() {
        let (dispatcher, manager) = setup(3040);
        let entity = cover_entity(&manager, "cover");

        entity.open_cover().await.unwrap();
        entity.close_cover().await.unwrap();
        entity.stop_cover().await.unwrap();
        entity.set_cover_position(40).await.unwrap();

        let commands = dispatcher.commands();
        assert_eq!(commands.len(), 4);
        for (device_id, command, _) in &commands {
            assert_eq!(device_id, "curtain-1");
            assert_eq!(*command, CommandName::SetData);
        }

        let expect_single = |idx: usize, key: &str, value: i64| {
            let params = &commands[idx].2;
            assert_eq!(params.len(), 1);
            assert_eq!(params.get(key).and_then(Value::as_i64), Some(value));
        };
        expect_single(0, "curtain_open", 1);
        expect_single(1, "curtain_close", 1);
        expect_single(2, "curtain_stop", 1);
        expect_single(3, "open_level", 40);
    }

    #[tokio::test]
    async fn second_channel_uses_indexed_params() {
        let (dispatcher, manager) = setup(3041);
        let entity = cover_entity(&manager, "cover_2");

        assert_eq!(entity.name(), "Curtain 2");
        assert_eq!(entity.unique_id(), "vconnex.curtain-1.cover_2");

        entity.open_cover().await.unwrap();
        let commands = dispatcher.commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].2.contains_key("curtain_2_open"));

        manager.handle_data_message(
            "curtain-1",
            DataMessage::new(DEVICE_DATA_MESSAGE).with_value("open_2_level", 0),
        );
        assert_eq!(entity.is_closed(), Some(true));
    }
}
