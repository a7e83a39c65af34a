use crate::Error;

/// Largest number of fractional digits folded into scaled integer arguments.
pub const MAX_FRACTIONAL_SCALE: u8 = 5;

/// How field words are normalized while parsing.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseNormalization {
    DoNotTouch,
    #[default]
    ToUppercase,
    ToLowercase,
}

impl CaseNormalization {
    /// Applies the normalization to a word letter. Anything but ASCII letters is returned as is.
    pub const fn apply(self, word: char) -> char {
        match self {
            Self::DoNotTouch => word,
            Self::ToUppercase => word.to_ascii_uppercase(),
            Self::ToLowercase => word.to_ascii_lowercase(),
        }
    }
}

/// Immutable parsing configuration, shared by every parse call.
///
/// The fractional scale controls scaled integer arguments: with a scale of `2`, `X12.345` has a
/// scaled integer argument of `1234`. Digits beyond the scale are truncated, never rounded.
///
/// With single-quote escaping enabled, `'` inside a string literal lower-cases the character that
/// follows it: `S"'A'L'E'X'''S PRINTER"` decodes to `alex's PRINTER`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSettings", into = "RawSettings")
)]
pub struct ParsingSettings {
    case_normalization: CaseNormalization,
    fractional_scale: u8,
    single_quote_escape: bool,
    scale_factor: i32,
    max_scalable_integral: i32,
}

impl Default for ParsingSettings {
    fn default() -> Self {
        Self::with_scale(CaseNormalization::ToUppercase, 0, false)
    }
}

impl ParsingSettings {
    pub const fn new(
        case_normalization: CaseNormalization,
        fractional_scale: u8,
        single_quote_escape: bool,
    ) -> Result<Self, Error> {
        if fractional_scale > MAX_FRACTIONAL_SCALE {
            return Err(Error::InvalidScale(fractional_scale));
        }
        Ok(Self::with_scale(
            case_normalization,
            fractional_scale,
            single_quote_escape,
        ))
    }

    const fn with_scale(
        case_normalization: CaseNormalization,
        fractional_scale: u8,
        single_quote_escape: bool,
    ) -> Self {
        let scale_factor = 10_i32.pow(fractional_scale as u32);
        Self {
            case_normalization,
            fractional_scale,
            single_quote_escape,
            scale_factor,
            max_scalable_integral: i32::MAX / scale_factor,
        }
    }

    pub const fn with_case_normalization(self, case_normalization: CaseNormalization) -> Self {
        Self::with_scale(
            case_normalization,
            self.fractional_scale,
            self.single_quote_escape,
        )
    }

    pub const fn with_fractional_scale(self, fractional_scale: u8) -> Result<Self, Error> {
        Self::new(
            self.case_normalization,
            fractional_scale,
            self.single_quote_escape,
        )
    }

    pub const fn with_single_quote_escape(self, single_quote_escape: bool) -> Self {
        Self::with_scale(
            self.case_normalization,
            self.fractional_scale,
            single_quote_escape,
        )
    }

    pub const fn case_normalization(&self) -> CaseNormalization {
        self.case_normalization
    }

    pub const fn fractional_scale(&self) -> u8 {
        self.fractional_scale
    }

    pub const fn single_quote_escape(&self) -> bool {
        self.single_quote_escape
    }

    /// `10^fractional_scale`
    pub const fn scale_factor(&self) -> i32 {
        self.scale_factor
    }

    /// Largest integral value whose scaled form still fits an `i32`.
    pub const fn max_scalable_integral(&self) -> i32 {
        self.max_scalable_integral
    }

    /// Scales an integral value that has no fractional digits. `None` on overflow.
    pub(crate) fn scale_integer(&self, integral: u32, negative: bool) -> Option<i32> {
        let value = i32::try_from(integral).ok()?;
        if value > self.max_scalable_integral {
            return None;
        }
        let scaled = value * self.scale_factor;
        Some(if negative { -scaled } else { scaled })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct RawSettings {
    case_normalization: CaseNormalization,
    fractional_scale: u8,
    single_quote_escape: bool,
}

#[cfg(feature = "serde")]
impl Default for RawSettings {
    fn default() -> Self {
        ParsingSettings::default().into()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawSettings> for ParsingSettings {
    type Error = Error;
    fn try_from(raw: RawSettings) -> Result<Self, Error> {
        Self::new(
            raw.case_normalization,
            raw.fractional_scale,
            raw.single_quote_escape,
        )
    }
}

#[cfg(feature = "serde")]
impl From<ParsingSettings> for RawSettings {
    fn from(settings: ParsingSettings) -> Self {
        Self {
            case_normalization: settings.case_normalization,
            fractional_scale: settings.fractional_scale,
            single_quote_escape: settings.single_quote_escape,
        }
    }
}
