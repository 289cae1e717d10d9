//! Error macros for hades

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::HadesError::invalid_value($context, $value))
    };
}

/// Macro for creating missing configuration field errors
#[macro_export]
macro_rules! bail_missing {
    ($field:expr, $origin:expr) => {
        return Err($crate::error::HadesError::missing_field($field, $origin))
    };
}

