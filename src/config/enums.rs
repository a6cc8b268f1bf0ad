//! Enumerated setting types.

use std::fmt;

/// Enumeration with a fixed, named set of variants.
///
/// The stable `name` is what gets persisted; `pretty_name` is meant for display.
pub trait EnumValue: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Persisted identifier of the variant.
    fn name(&self) -> &'static str;

    /// Human readable label of the variant.
    fn pretty_name(&self) -> &'static str;

    /// Finds the variant with the given persisted name (case-insensitive).
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
    }
}

/// Implements [`FieldValue`](super::FieldValue) and [`ListElement`](super::ListElement)
/// for types implementing [`EnumValue`].
#[macro_export]
macro_rules! enum_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::config::FieldValue for $ty {
                fn to_raw(&self) -> String {
                    $crate::config::EnumValue::name(self).to_string()
                }

                fn from_raw(raw: &str) -> Option<Self> {
                    <$ty as $crate::config::EnumValue>::from_name(raw)
                }
            }

            impl $crate::config::ListElement for $ty {}
        )*
    };
}

/// What a pie menu does when the key is released inside its deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeadzoneStrategy {
    /// Leave the value untouched.
    #[default]
    DoNothing,
    /// Activate the first label of the pie.
    PickTop,
    /// Activate the label picked last time, if it is still in the pie.
    PickPrevious,
}

impl EnumValue for DeadzoneStrategy {
    const ALL: &'static [Self] = &[Self::DoNothing, Self::PickTop, Self::PickPrevious];

    fn name(&self) -> &'static str {
        match self {
            Self::DoNothing => "DO_NOTHING",
            Self::PickTop => "PICK_TOP",
            Self::PickPrevious => "PICK_PREVIOUS",
        }
    }

    fn pretty_name(&self) -> &'static str {
        match self {
            Self::DoNothing => "Do nothing",
            Self::PickTop => "Pick top",
            Self::PickPrevious => "Pick previous",
        }
    }
}

/// What a rotation selector does when the pointer ends up inside its deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationDeadzoneStrategy {
    /// Keep whatever value was applied last.
    #[default]
    KeepChange,
    /// Restore the value from before the key press.
    DiscardChange,
    /// Set the value to zero.
    SetToZero,
}

impl EnumValue for RotationDeadzoneStrategy {
    const ALL: &'static [Self] = &[Self::KeepChange, Self::DiscardChange, Self::SetToZero];

    fn name(&self) -> &'static str {
        match self {
            Self::KeepChange => "KEEP_CHANGE",
            Self::DiscardChange => "DISCARD_CHANGE",
            Self::SetToZero => "SET_TO_ZERO",
        }
    }

    fn pretty_name(&self) -> &'static str {
        match self {
            Self::KeepChange => "Keep change",
            Self::DiscardChange => "Discard change",
            Self::SetToZero => "Set to zero",
        }
    }
}

crate::enum_field_value!(DeadzoneStrategy, RotationDeadzoneStrategy);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldValue;

    #[test]
    fn test_strategy_round_trip_by_name() {
        for strategy in DeadzoneStrategy::ALL {
            assert_eq!(
                DeadzoneStrategy::from_raw(&strategy.to_raw()),
                Some(*strategy)
            );
        }
        assert_eq!(
            RotationDeadzoneStrategy::from_raw("discard_change"),
            Some(RotationDeadzoneStrategy::DiscardChange)
        );
        assert_eq!(DeadzoneStrategy::from_raw("Pick top"), None);
    }
}
