use alloc::string::String;

/// Scroll direction, sampled from consecutive scroll offsets.
///
/// An offset that did not change since the previous sample reports [`ScrollDirection::Down`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Down,
    Up,
}

impl ScrollDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

/// Where the detection line sits inside the viewport.
///
/// The line is `scroll_y + offset + viewport_height * ratio`, so `Top` pins it to the
/// viewport's top edge and `Bottom` to its bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EnterAt {
    #[default]
    Top,
    Center,
    Bottom,
    /// An explicit ratio. Clamped to `[0, 1]`; non-finite values resolve to 0.
    Ratio(f64),
}

impl EnterAt {
    pub fn ratio(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
            Self::Ratio(v) if v.is_finite() => v.clamp(0.0, 1.0),
            Self::Ratio(_) => 0.0,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EnterAt {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Top => serializer.serialize_str("top"),
            Self::Center => serializer.serialize_str("center"),
            Self::Bottom => serializer.serialize_str("bottom"),
            Self::Ratio(v) => serializer.serialize_f64(*v),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EnterAt {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Ratio(f64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Ratio(v) => Ok(Self::Ratio(v)),
            Raw::Name(name) => match name.as_str() {
                "top" => Ok(Self::Top),
                "center" => Ok(Self::Center),
                "bottom" => Ok(Self::Bottom),
                other => Err(serde::de::Error::unknown_variant(
                    other,
                    &["top", "center", "bottom"],
                )),
            },
        }
    }
}

/// A class-toggle target: either a literal element handle, or a selector that is re-resolved
/// against the live document on every activation and deactivation.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassTarget<E> {
    Element(E),
    Selector(String),
}

/// One `(target, class)` pair toggled alongside a section's own enter class.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplyTo<E> {
    pub target: ClassTarget<E>,
    pub class: String,
}

impl<E> ApplyTo<E> {
    pub fn selector(selector: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            target: ClassTarget::Selector(selector.into()),
            class: class.into(),
        }
    }

    pub fn element(element: E, class: impl Into<String>) -> Self {
        Self {
            target: ClassTarget::Element(element),
            class: class.into(),
        }
    }
}

/// A read-only snapshot handed to section and engine callbacks.
///
/// `progress` is `(line - top) / max(1, bottom - top)` and is intentionally not clamped to
/// `[0, 1]`; callers may rely on slight overshoot near the extent edges.
#[derive(Clone, Debug)]
pub struct SectionContext<E> {
    pub target: E,
    pub id: Option<String>,
    pub direction: ScrollDirection,
    pub scroll_y: f64,
    pub line: f64,
    pub top: f64,
    pub bottom: f64,
    pub progress: f64,
}
