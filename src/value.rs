use serde_json::Value;

/// Coerces a raw report value into an integer. The vendor cloud is loose
/// about types and occasionally reports numbers as strings.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse::<i64>().ok().or_else(|| {
            s.parse::<f64>().ok().map(|f| f as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

/// Pure conversion applied to a cached param value before it is exposed as
/// an entity state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueConverter {
    /// Any non-zero numeric value maps to `true`.
    NonZeroBool,
    Int,
    Float,
    Scale(f64),
}

impl ValueConverter {
    pub fn convert(&self, value: &Value) -> Option<Value> {
        match self {
            ValueConverter::NonZeroBool => value_as_i64(value).map(|v| Value::from(v != 0)),
            ValueConverter::Int => value_as_i64(value).map(Value::from),
            ValueConverter::Float => value_as_f64(value).map(Value::from),
            ValueConverter::Scale(factor) => {
                value_as_f64(value).map(|v| Value::from(v * factor))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numeric_strings() {
        assert_eq!(value_as_i64(&json!("42")), Some(42));
        assert_eq!(value_as_i64(&json!("3.7")), Some(3));
        assert_eq!(value_as_f64(&json!("3.7")), Some(3.7));
        assert_eq!(value_as_i64(&json!(null)), None);
        assert_eq!(value_as_i64(&json!("n/a")), None);
    }

    #[test]
    fn non_zero_bool_converter() {
        let conv = ValueConverter::NonZeroBool;
        assert_eq!(conv.convert(&json!(0)), Some(json!(false)));
        assert_eq!(conv.convert(&json!(1)), Some(json!(true)));
        assert_eq!(conv.convert(&json!(255)), Some(json!(true)));
        assert_eq!(conv.convert(&json!([])), None);
    }

    #[test]
    fn scale_converter() {
        let conv = ValueConverter::Scale(0.1);
        assert_eq!(conv.convert(&json!(230)), Some(json!(23.0)));
    }
}
