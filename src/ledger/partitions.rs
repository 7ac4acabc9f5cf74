/// Key layout and encoding utilities for the ledger partitions
///
/// Partition structure:
/// - `jobs`: job:{job_id} -> JobRecord (JSON)

/// Encode a job key: job:{job_id}
pub fn encode_job_key(job_id: &str) -> Vec<u8> {
    format!("job:{}", job_id).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_key_encoding() {
        assert_eq!(encode_job_key("job_123"), b"job:job_123");
        assert_eq!(encode_job_key(""), b"job:");
    }
}
