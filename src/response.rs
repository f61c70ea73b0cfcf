use serde_json::Value;

/// Uniform envelope every API call resolves to.
///
/// The upstream API reports failures through an `error` field in the body
/// rather than through HTTP status codes alone; the request layer folds
/// both styles into this one shape so call sites branch on the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse<T> {
    /// The call completed. Action endpoints return no payload.
    Success(Option<T>),
    /// The upstream reported an error, or the exchange could not be
    /// completed after exhausting retries. The message may be absent; the
    /// error indicator, not the message text, is the discriminant.
    Failure(Option<String>),
}

impl<T> ApiResponse<T> {
    /// Returns `true` for the [`ApiResponse::Success`] variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrows the payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => data.as_ref(),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the envelope and returns the payload, if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => data,
            Self::Failure(_) => None,
        }
    }

    /// Borrows the error message, if one was reported.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => message.as_deref(),
        }
    }
}

/// Normalizes a raw upstream body into the envelope.
///
/// A body carrying a truthy `error` field becomes a failure with the
/// sibling `message` field as its text; anything else is passed through as
/// the success payload, whatever the HTTP status was.
pub(crate) fn normalize(raw: Value) -> ApiResponse<Value> {
    match raw.get("error") {
        Some(indicator) if is_truthy(indicator) => {
            ApiResponse::Failure(raw.get("message").and_then(message_text))
        }
        _ => ApiResponse::Success(Some(raw)),
    }
}

// The upstream contract predates this client and marks errors with any
// truthy value, so `false`, `0`, `""` and `null` must not count.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
