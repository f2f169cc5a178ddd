use crate::application::ports::BlobStoreError;

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Parsed Azure Storage account connection string.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConnectionString {
    pub protocol: String,
    pub account_name: String,
    pub account_key: String,
    pub endpoint_suffix: String,
    pub blob_endpoint_override: Option<String>,
}

impl StorageConnectionString {
    pub fn parse(raw: &str) -> Result<Self, BlobStoreError> {
        let mut protocol = None;
        let mut account_name = None;
        let mut account_key = None;
        let mut endpoint_suffix = None;
        let mut blob_endpoint = None;

        for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // account keys are base64 and may themselves contain '='
            let Some((key, value)) = pair.split_once('=') else {
                return Err(BlobStoreError::ConnectionFailed(
                    "malformed connection string segment".into(),
                ));
            };
            match key {
                "DefaultEndpointsProtocol" => protocol = Some(value.to_string()),
                "AccountName" => account_name = Some(value.to_string()),
                "AccountKey" => account_key = Some(value.to_string()),
                "EndpointSuffix" => endpoint_suffix = Some(value.to_string()),
                "BlobEndpoint" => blob_endpoint = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Self {
            protocol: protocol.unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            account_name: account_name.ok_or_else(|| {
                BlobStoreError::ConnectionFailed("connection string missing AccountName".into())
            })?,
            account_key: account_key.ok_or_else(|| {
                BlobStoreError::ConnectionFailed("connection string missing AccountKey".into())
            })?,
            endpoint_suffix: endpoint_suffix.unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string()),
            blob_endpoint_override: blob_endpoint,
        })
    }

    pub fn blob_endpoint(&self) -> String {
        match &self.blob_endpoint_override {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!(
                "{}://{}.blob.{}",
                self.protocol, self.account_name, self.endpoint_suffix
            ),
        }
    }
}

impl std::fmt::Debug for StorageConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConnectionString")
            .field("protocol", &self.protocol)
            .field("account_name", &self.account_name)
            .field("account_key", &"[REDACTED]")
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("blob_endpoint_override", &self.blob_endpoint_override)
            .finish()
    }
}
