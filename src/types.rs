use core::fmt;

/// A dispatchable command code: a word, a 16 bits number and an 8 bits subcode.
///
/// Packed as `[8 bits] word, [8 bits] subcode, [16 bits] number`, so codes compare and hash as
/// plain integers. The zero value is [`Code::INVALID`].
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Default)]
pub struct Code(u32);

impl Code {
    pub const INVALID: Code = Code(0);

    pub const G0_RAPID_MOVE: Code = Code::new('G', 0, 0);
    pub const G1_LINEAR_MOVE: Code = Code::new('G', 1, 0);
    pub const G2_CLOCKWISE_ARC_MOVE: Code = Code::new('G', 2, 0);
    pub const G3_COUNTER_CLOCKWISE_ARC_MOVE: Code = Code::new('G', 3, 0);
    pub const G4_DWELL: Code = Code::new('G', 4, 0);
    pub const G5_CUBIC_B_SPLINE_MOVE: Code = Code::new('G', 5, 0);
    pub const G6_DIRECT_STEPPER_MOVE: Code = Code::new('G', 6, 0);

    pub const G10_RETRACT: Code = Code::new('G', 10, 0);
    pub const G11_RECOVER: Code = Code::new('G', 11, 0);
    pub const G12_CLEAN_THE_NOZZLE: Code = Code::new('G', 12, 0);

    pub const G20_INCH_UNITS: Code = Code::new('G', 20, 0);
    pub const G21_MILLIMETER_UNITS: Code = Code::new('G', 21, 0);

    pub const G90_ABSOLUTE_POSITIONING: Code = Code::new('G', 90, 0);
    pub const G91_RELATIVE_POSITIONING: Code = Code::new('G', 91, 0);
    pub const G92_SET_POSITION: Code = Code::new('G', 92, 0);

    /// Packs a code. Words outside of ASCII (and `'\0'`) give [`Code::INVALID`].
    pub const fn new(word: char, number: u16, subcode: u8) -> Code {
        if !word.is_ascii() || word == '\0' {
            return Code::INVALID;
        }
        Code((word as u32) << 24 | (subcode as u32) << 16 | number as u32)
    }

    /// Returns `'G'` for `G1 X0 Y0`.
    pub const fn word(self) -> char {
        (self.0 >> 24) as u8 as char
    }

    /// Returns `1` for `G1 X0 Y0`.
    pub const fn number(self) -> u16 {
        self.0 as u16
    }

    /// Returns `42` for `M1.42 A0`.
    pub const fn subcode(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("<invalid>");
        }
        write!(f, "{}{}", self.word(), self.number())?;
        if self.subcode() > 0 {
            write!(f, ".{}", self.subcode())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// An exact decimal number: `mantissa * 10^-scale`.
///
/// Equality is structural, `1.2` and `1.20` are different values.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Decimal {
    mantissa: i64,
    scale: u8,
}

impl Decimal {
    pub const fn new(mantissa: i64, scale: u8) -> Self {
        Self { mantissa, scale }
    }

    pub const fn mantissa(self) -> i64 {
        self.mantissa
    }

    pub const fn scale(self) -> u8 {
        self.scale
    }

    pub fn to_f64(self) -> f64 {
        let mut divisor = 1.;
        for _ in 0..self.scale {
            divisor *= 10.;
        }
        self.mantissa as f64 / divisor
    }
}

impl From<i32> for Decimal {
    fn from(from: i32) -> Self {
        Self::new(from.into(), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.mantissa.unsigned_abs();
        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        if self.scale == 0 {
            return write!(f, "{}", magnitude);
        }
        let divisor = 10_u64.pow(u32::from(self.scale));
        write!(
            f,
            "{}.{:0width$}",
            magnitude / divisor,
            magnitude % divisor,
            width = usize::from(self.scale)
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Code, Decimal};

    #[test]
    fn code_fields_are_packed_and_unpacked() {
        let code = Code::new('M', 1, 42);
        assert!(code.is_valid());
        assert_eq!(code.word(), 'M');
        assert_eq!(code.number(), 1);
        assert_eq!(code.subcode(), 42);

        let code = Code::new('G', u16::MAX, u8::MAX);
        assert_eq!(code.number(), u16::MAX);
        assert_eq!(code.subcode(), u8::MAX);
        assert_eq!(code.word(), 'G');
    }

    #[test]
    fn invalid_code_is_the_default() {
        assert_eq!(Code::default(), Code::INVALID);
        assert!(!Code::INVALID.is_valid());
        assert_eq!(Code::new('\0', 1, 0), Code::INVALID);
        assert_eq!(Code::new('é', 1, 0), Code::INVALID);
    }

    #[test]
    fn well_known_codes() {
        assert_eq!(Code::G1_LINEAR_MOVE, Code::new('G', 1, 0));
        assert_ne!(Code::G1_LINEAR_MOVE, Code::new('M', 1, 0));
        assert_ne!(Code::G1_LINEAR_MOVE, Code::new('G', 1, 1));
        assert_eq!(Code::G92_SET_POSITION.number(), 92);
    }

    #[test]
    fn codes_are_displayed_canonically() {
        assert_eq!(Code::G0_RAPID_MOVE.to_string(), "G0");
        assert_eq!(Code::new('M', 1, 42).to_string(), "M1.42");
        assert_eq!(Code::INVALID.to_string(), "<invalid>");
        assert_eq!(format!("{:?}", Code::G21_MILLIMETER_UNITS), "Code(G21)");
    }

    #[test]
    fn decimals_are_displayed_exactly() {
        assert_eq!(Decimal::new(-1234, 2).to_string(), "-12.34");
        assert_eq!(Decimal::new(42, 3).to_string(), "0.042");
        assert_eq!(Decimal::new(-42, 0).to_string(), "-42");
        assert_eq!(Decimal::from(7).to_string(), "7");
    }

    #[test]
    fn decimals_convert_to_floats() {
        assert_eq!(Decimal::new(125, 2).to_f64(), 1.25);
        assert_eq!(Decimal::new(-5, 1).to_f64(), -0.5);
        assert_eq!(Decimal::from(i32::MIN + 1).to_f64(), -2147483647.);
    }
}
