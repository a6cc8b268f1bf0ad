//! String serialization of field values.
//!
//! Every persisted value is stored as a string. [`FieldValue`] converts between
//! the typed value and that representation; lists join their elements with a tab.

use std::fmt;

/// A value that can live in a [`Field`](super::Field).
pub trait FieldValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Serializes the value to its stored representation.
    fn to_raw(&self) -> String;

    /// Parses a stored representation. `None` means the text is malformed.
    fn from_raw(raw: &str) -> Option<Self>;

    /// Rejects values whose representation would not read back unchanged.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Marker for values allowed as list elements.
pub trait ListElement: FieldValue {}

const LIST_SEPARATOR: char = '\t';

macro_rules! parsed_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_raw(&self) -> String {
                    self.to_string()
                }

                fn from_raw(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }

            impl ListElement for $ty {}
        )*
    };
}

parsed_field_value!(i32, u32, i64, f64, bool);

impl FieldValue for String {
    fn to_raw(&self) -> String {
        self.clone()
    }

    fn from_raw(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ListElement for String {}

impl<T: ListElement> FieldValue for Vec<T> {
    fn to_raw(&self) -> String {
        self.iter()
            .map(FieldValue::to_raw)
            .collect::<Vec<_>>()
            .join(&LIST_SEPARATOR.to_string())
    }

    fn from_raw(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(Vec::new());
        }
        raw.split(LIST_SEPARATOR).map(T::from_raw).collect()
    }

    fn check(&self) -> Result<(), String> {
        for element in self {
            element.check()?;
            let raw = element.to_raw();
            if raw.is_empty() {
                return Err(format!("list element {element:?} has an empty representation"));
            }
            if raw.contains(LIST_SEPARATOR) {
                return Err(format!("list element {element:?} contains a tab"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Color
// ============================================================================

/// RGBA color with 8-bit components, stored as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl FieldValue for Color {
    fn to_raw(&self) -> String {
        self.to_string()
    }

    /// Accepts `#RRGGBB` (opaque) and `#RRGGBBAA`.
    fn from_raw(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let component = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
        let alpha = if hex.len() == 8 { component(6)? } else { 255 };
        Some(Self::rgba(component(0)?, component(2)?, component(4)?, alpha))
    }
}

impl ListElement for Color {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_list_round_trip_keeps_element_type() {
        let values: Vec<i32> = vec![1, 2, 3];
        let raw = values.to_raw();
        assert_eq!(raw, "1\t2\t3");
        assert_eq!(Vec::<i32>::from_raw(&raw), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_empty_list_round_trip() {
        let values: Vec<String> = Vec::new();
        assert_eq!(values.to_raw(), "");
        assert_eq!(Vec::<String>::from_raw(""), Some(Vec::new()));
    }

    #[test]
    fn test_list_with_wrong_element_type_is_rejected() {
        assert_eq!(Vec::<i32>::from_raw("1\ttwo\t3"), None);
    }

    #[test]
    fn test_list_check_rejects_tabs_and_empty_elements() {
        assert!(vec!["a\tb".to_string()].check().is_err());
        assert!(vec![String::new()].check().is_err());
        assert!(vec!["a".to_string(), "b".to_string()].check().is_ok());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(
            Color::from_raw("#FF800040"),
            Some(Color::rgba(255, 128, 0, 64))
        );
        assert_eq!(Color::from_raw("#00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_raw("00ff00"), None);
        assert_eq!(Color::from_raw("#12345"), None);
        assert_eq!(Color::rgba(1, 2, 3, 4).to_raw(), "#01020304");
    }

    #[test]
    fn test_float_and_bool_parsing() {
        assert_eq!(f64::from_raw("0.25"), Some(0.25));
        assert_eq!(bool::from_raw("true"), Some(true));
        assert_eq!(bool::from_raw("yes"), None);
        assert_eq!(u32::from_raw("-1"), None);
    }
}
