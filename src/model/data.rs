use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single `param`/`value` pair inside a vendor data report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    pub param: String,
    pub value: Value,
}

/// A named data report received for a device. The regular report carries the
/// current value of every declared param, the extended report carries derived
/// counters (daily/monthly consumption and cost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMessage {
    pub name: String,
    #[serde(rename = "devV", default)]
    pub dev_v: Vec<ParamValue>,
    #[serde(rename = "devT", default)]
    pub dev_t: Option<i64>,
}

impl DataMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dev_v: Vec::new(),
            dev_t: None,
        }
    }

    pub fn with_value(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.dev_v.push(ParamValue {
            param: param.into(),
            value: value.into(),
        });
        self
    }

    pub fn param_value(&self, param: &str) -> Option<&Value> {
        self.dev_v
            .iter()
            .find(|entry| entry.param == param)
            .map(|entry| &entry.value)
    }
}
