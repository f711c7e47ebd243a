//! JSON codec.

use crate::{CodecError, OutputFormat};

/// Called by `Codec::decode` with a deserializer over the file bytes.
pub type DecodeVisitor<'a, 'de> =
    dyn FnMut(&mut dyn erased_serde::Deserializer<'de>) -> Result<(), erased_serde::Error> + 'a;

/// Turns typed values into file bytes and back.
///
/// Values cross the codec type-erased, so the codec writes straight from the
/// caller's `Serialize` impl and reads straight into the caller's type. No
/// intermediate tree limits what can round-trip (128-bit integers, say).
pub trait Codec: Send + Sync {
    fn encode(
        &self,
        value: &dyn erased_serde::Serialize,
        output: OutputFormat,
    ) -> Result<Vec<u8>, CodecError>;

    /// Hand `visit` a deserializer over `bytes`. The whole input must be
    /// consumed.
    fn decode<'de>(
        &self,
        bytes: &'de [u8],
        visit: &mut DecodeVisitor<'_, 'de>,
    ) -> Result<(), CodecError>;
}

/// UTF-8 JSON text via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(
        &self,
        value: &dyn erased_serde::Serialize,
        output: OutputFormat,
    ) -> Result<Vec<u8>, CodecError> {
        let bytes = match output {
            OutputFormat::Compact => serde_json::to_vec(value)?,
            OutputFormat::Pretty => serde_json::to_vec_pretty(value)?,
        };
        Ok(bytes)
    }

    fn decode<'de>(
        &self,
        bytes: &'de [u8],
        visit: &mut DecodeVisitor<'_, 'de>,
    ) -> Result<(), CodecError> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        visit(&mut <dyn erased_serde::Deserializer>::erase(&mut de))?;
        de.end()?;
        Ok(())
    }
}
