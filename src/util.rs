use uuid::Uuid;

/// Fresh UUIDv4 in the uppercase hyphenated form the legacy client emits.
pub(crate) fn uppercase_uuid() -> String {
    format!("{}", Uuid::new_v4()).to_ascii_uppercase()
}

/// `X-B3-TraceId` value: first 16 hex digits of md5 over the epoch seconds.
pub(crate) fn trace_id(epoch: i64) -> String {
    let digest = md5::compute(epoch.to_string().as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_uuid() {
        let id = uppercase_uuid();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_ascii_uppercase());
        assert_eq!(id.matches('-').count(), 4);
    }

    #[test]
    fn test_trace_id() {
        // md5("0") = cfcd208495d565ef66e7dff9f98764da
        assert_eq!(trace_id(0), "cfcd208495d565ef");
        assert_eq!(trace_id(1_318_622_958).len(), 16);
    }
}
