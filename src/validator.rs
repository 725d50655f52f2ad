use crate::config_types::AllowListed;
use crate::error::{ChatError, ChatResult};

/// Resolves `value` against the allow-list of `T`.
///
/// Matching is exact and case-sensitive. The error lists the allowed
/// values in declaration order.
pub fn check<T: AllowListed>(value: &str) -> ChatResult<T> {
    if let Some((_, item)) = T::VALUES.iter().find(|(name, _)| *name == value) {
        return Ok(*item);
    }

    tracing::warn!(target: "smartsupp", field = T::LABEL, value, "rejected option value");
    Err(ChatError::InvalidValue {
        label: T::LABEL.to_string(),
        prefix: T::MESSAGE_PREFIX.to_string(),
        value: value.to_string(),
        allowed: allowed_values::<T>(),
    })
}

pub fn allowed_values<T: AllowListed>() -> String {
    T::VALUES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
