use chrono::NaiveDate;
use std::fmt;

/// Value attached to a visitor variable.
///
/// The widget only ever sees the stringified form, see [`VariableValue::to_string`].
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    Int(i64),
    Dec(f64),
    Str(String),
    Bool(bool),
    Date(NaiveDate),
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Int(v) => write!(f, "{v}"),
            VariableValue::Dec(v) => write!(f, "{v}"),
            VariableValue::Str(v) => f.write_str(v),
            VariableValue::Bool(v) => write!(f, "{v}"),
            VariableValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for VariableValue {
            fn from(v: $ty) -> Self {
                VariableValue::Int(i64::from(v))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values past `i64::MAX` keep their exact decimal text.
macro_rules! from_wide_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for VariableValue {
            fn from(v: $ty) -> Self {
                match i64::try_from(v) {
                    Ok(i) => VariableValue::Int(i),
                    Err(_) => VariableValue::Str(v.to_string()),
                }
            }
        })*
    };
}

from_wide_int!(u64, usize, i128, u128, isize);

impl From<f32> for VariableValue {
    fn from(v: f32) -> Self {
        VariableValue::Dec(f64::from(v))
    }
}

impl From<f64> for VariableValue {
    fn from(v: f64) -> Self {
        VariableValue::Dec(v)
    }
}

impl From<bool> for VariableValue {
    fn from(v: bool) -> Self {
        VariableValue::Bool(v)
    }
}

impl From<&str> for VariableValue {
    fn from(v: &str) -> Self {
        VariableValue::Str(v.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(v: String) -> Self {
        VariableValue::Str(v)
    }
}

impl From<NaiveDate> for VariableValue {
    fn from(v: NaiveDate) -> Self {
        VariableValue::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringification() {
        assert_eq!(VariableValue::from(150).to_string(), "150");
        assert_eq!(VariableValue::from(-3i64).to_string(), "-3");
        assert_eq!(VariableValue::from(12.5).to_string(), "12.5");
        assert_eq!(VariableValue::from("128 000").to_string(), "128 000");
        assert_eq!(VariableValue::from(true).to_string(), "true");
    }

    #[test]
    fn wide_integers() {
        assert_eq!(VariableValue::from(3usize), VariableValue::Int(3));
        assert_eq!(VariableValue::from(-7isize), VariableValue::Int(-7));
        assert_eq!(
            VariableValue::from(u64::MAX),
            VariableValue::Str("18446744073709551615".to_string())
        );
        assert_eq!(VariableValue::from(i128::MIN).to_string(), i128::MIN.to_string());
    }

    #[test]
    fn dates_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2015, 7, 9).unwrap();
        assert_eq!(VariableValue::from(date).to_string(), "2015-07-09");
    }
}
