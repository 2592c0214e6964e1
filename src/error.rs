//! Boot-time error type. Everything past boot is non-fatal and never surfaces
//! an `AppError`; see the individual handlers for their fallbacks.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("dom error: {0}")]
    Dom(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(AppError::NoWindow.to_string(), "no window");
        assert_eq!(
            AppError::Config("padding must be positive".into()).to_string(),
            "invalid config: padding must be positive"
        );
    }
}
