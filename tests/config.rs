#[cfg(test)]
mod tests {
    use vconnex_entities::*;

    #[test]
    fn config_from_yaml_with_defaults() {
        let yaml = r#"
client_id: abc123
client_secret: s3cret
project_name: Home
"#;
        let config: VconnexConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.client_secret, "s3cret");
        assert_eq!(config.project_name.as_deref(), Some("Home"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.country, None);
    }

    #[test]
    fn config_builder() {
        let config = VconnexConfig::new("abc123", "s3cret")
            .endpoint("https://staging.example")
            .country("VN");
        assert_eq!(config.endpoint, "https://staging.example");
        assert_eq!(config.country.as_deref(), Some("VN"));
    }

    #[test]
    fn device_from_vendor_json() {
        let json = r#"{
            "deviceId": "dev-1",
            "name": "Leak Guard",
            "deviceTypeCode": 3043,
            "version": "1.0.4",
            "params": [
                { "paramKey": "eleak", "paramType": 4 },
                { "paramKey": "switch_1", "paramType": 1, "paramName": "Switch 1" }
            ]
        }"#;
        let device: VconnexDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.device_type_code, 3043);
        assert_eq!(device.params.len(), 2);
        assert_eq!(device.params[0].param_type, ParamType::Alert);
        assert_eq!(device.params[1].name.as_deref(), Some("Switch 1"));
    }

    #[test]
    fn unknown_param_type_code_is_rejected() {
        let json = r#"{ "paramKey": "x", "paramType": 7 }"#;
        assert!(serde_json::from_str::<ParamDesc>(json).is_err());
    }
}
