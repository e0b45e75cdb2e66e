use serde_json::Value;

/// True if `s` starts (after leading whitespace) with a `{`.
pub fn looks_like_json_string(s: &str) -> bool {
    s.trim_start().starts_with('{')
}

/// Structural JSON equality: both inputs must parse, and object key order and
/// formatting are ignored. Numbers compare as `f64`, so `1` equals `1.0`.
/// Any parse failure compares unequal.
pub fn json_bytes_equal(a: &[u8], b: &[u8]) -> bool {
    let Ok(va) = serde_json::from_slice::<Value>(a) else {
        return false;
    };
    let Ok(vb) = serde_json::from_slice::<Value>(b) else {
        return false;
    };
    values_equal(&va, &vb)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
