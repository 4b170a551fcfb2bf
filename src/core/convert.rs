use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs the three pipeline stages in order and propagates the first
/// error. Parsing always completes before any output is written, so a
/// failed run never leaves a partial output file behind.
pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting conversion");

        let xml = self.pipeline.extract().await?;
        tracing::info!("Read {} bytes from source", xml.len());

        let result = self.pipeline.transform(xml).await?;
        tracing::info!("Converted document to {} bytes of JSON", result.json_output.len());

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
