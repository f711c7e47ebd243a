/// Errors from decoding or encoding a `JsonValue`.
#[derive(thiserror::Error, Debug)]
pub enum JsonValueError {
    /// The input is not a JSON document any variant can hold.
    #[error("unrepresentable JSON value: {message}")]
    UnrepresentableValue { message: String },

    /// The value has no JSON representation (e.g. a NaN double).
    #[error("unencodable value: {message}")]
    UnencodableValue { message: String },
}
