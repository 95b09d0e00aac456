use bytes::Bytes;

use crate::{Error, GenerationRequest};

/// Default output format for the known providers.
pub const PNG_MIME_TYPE: &str = "image/png";

/// An adapter for one text-to-image provider.
///
/// Adapters only know their own wire format: how to build a request body
/// and how to turn a successful response body into image bytes. Sending the
/// request and classifying failures is the gateway's job.
pub trait ImageProvider: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Full URL the generation request is posted to.
    fn endpoint(&self) -> String;

    /// Value of the `Accept` header sent with the request.
    fn accept(&self) -> &'static str;

    /// Build the JSON body for a generation request.
    fn build_body(&self, request: &GenerationRequest) -> Result<serde_json::Value, Error>;

    /// Decode a successful response body into raw image bytes.
    fn decode(&self, content_type: Option<&str>, body: Bytes) -> Result<Vec<u8>, Error>;

    /// Mime type of the images this provider returns.
    fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }
}
