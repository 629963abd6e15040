use serde::Serialize;

pub struct Masked;

pub trait MaskPolicy {
    fn mask(value: &str) -> String;
}

impl MaskPolicy for Masked {
    fn mask(value: &str) -> String {
        let len = value.chars().count();
        if len > 4 {
            let tail: String = value.chars().skip(len - 4).collect();
            "*".repeat(len - 4) + &tail
        } else {
            "****".to_string()
        }
    }
}

/// Return true if a key name holds a request or response signature.
fn is_signature_key(key: &str) -> bool {
    let k = key.to_lowercase();
    matches!(k.as_str(), "skey" | "signature" | "vrfkey")
}

/// Return true if a key name holds shared key material.
fn is_secret_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("secret") || k.contains("verifykey") || k.contains("verify_key")
}

pub fn secure_serializable(v: impl Serialize) -> serde_json::Value {
    match serde_json::to_value(v) {
        Ok(value) => secure_value(&value),
        Err(_) => serde_json::Value::Null,
    }
}

pub fn secure_value(v: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let new_val = match val {
                    Value::String(_) if is_secret_key(k) => Value::String("***".to_string()),
                    Value::String(s) if is_signature_key(k) => Value::String(Masked::mask(s)),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}

/// Masks signature values inside the colon-delimited lookup replies
pub fn secure_lines(text: &str) -> String {
    text.lines()
        .map(|line| match line.split_once(':') {
            Some((key, value)) if is_signature_key(key.trim()) => {
                format!("{key}: {}", Masked::mask(value.trim()))
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
