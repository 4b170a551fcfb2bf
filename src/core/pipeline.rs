use crate::core::xml;
use crate::core::{ConfigProvider, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

/// Fixed output file name, written at the storage root.
pub const OUTPUT_FILE: &str = "data.json";

pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        tracing::debug!("Reading source file: {}", self.config.source_path());
        let bytes = self.storage.read_file(self.config.source_path()).await?;
        let text = String::from_utf8(bytes)?;
        tracing::debug!("Read {} bytes of XML", text.len());
        Ok(text)
    }

    async fn transform(&self, xml_text: String) -> Result<TransformResult> {
        let value = xml::xml_to_value(&xml_text)?;

        let json_output = if self.config.pretty() {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        tracing::debug!("Serialized {} bytes of JSON", json_output.len());

        Ok(TransformResult { value, json_output })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::debug!(
            "Writing {} bytes to {}",
            result.json_output.len(),
            OUTPUT_FILE
        );
        self.storage
            .write_file(OUTPUT_FILE, result.json_output.as_bytes())
            .await?;

        tracing::debug!("Output file saved successfully");
        Ok(OUTPUT_FILE.to_string())
    }
}
