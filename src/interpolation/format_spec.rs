//! printf-style directives: `[flags][width][.precision]conversion`.

use std::str::FromStr;

use serde_json::Value;

use super::InterpolationError;

/// Default precision of `e`, `f` and `g`.
const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Sign shown for non-negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Sign {
    /// Only `-` for negatives.
    #[default]
    OnlyNegative,
    /// `+`
    Always,
    /// ` `
    Space,
}

/// Side the padding goes on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Alignment {
    /// Pad on the left.
    #[default]
    Right,
    /// `-`
    Left,
}

/// The conversion character that ends a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    /// `b` / `B`
    Binary {
        /// Uppercase letters.
        upper: bool,
    },
    /// `d` / `i` / `u`
    Decimal,
    /// `o`
    Octal,
    /// `x` / `X`
    Hex {
        /// Uppercase letters.
        upper: bool,
    },
    /// `e` / `E`
    Exponent {
        /// Uppercase letters.
        upper: bool,
    },
    /// `f`
    Fixed,
    /// `g` / `G`
    General {
        /// Uppercase letters.
        upper: bool,
    },
    /// `c`
    Char,
    /// `p`
    Inspect,
    /// `s`
    Str,
}

impl Conversion {
    /// Maps a conversion character, or `None` when it is not one.
    const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'b' => Self::Binary { upper: false },
            'B' => Self::Binary { upper: true },
            'd' | 'i' | 'u' => Self::Decimal,
            'o' => Self::Octal,
            'x' => Self::Hex { upper: false },
            'X' => Self::Hex { upper: true },
            'e' => Self::Exponent { upper: false },
            'E' => Self::Exponent { upper: true },
            'f' => Self::Fixed,
            'g' => Self::General { upper: false },
            'G' => Self::General { upper: true },
            'c' => Self::Char,
            'p' => Self::Inspect,
            's' => Self::Str,
            _ => return None,
        })
    }

    /// Canonical character, used in error messages.
    const fn as_char(self) -> char {
        match self {
            Self::Binary { upper: false } => 'b',
            Self::Binary { upper: true } => 'B',
            Self::Decimal => 'd',
            Self::Octal => 'o',
            Self::Hex { upper: false } => 'x',
            Self::Hex { upper: true } => 'X',
            Self::Exponent { upper: false } => 'e',
            Self::Exponent { upper: true } => 'E',
            Self::Fixed => 'f',
            Self::General { upper: false } => 'g',
            Self::General { upper: true } => 'G',
            Self::Char => 'c',
            Self::Inspect => 'p',
            Self::Str => 's',
        }
    }
}

/// Returns true for characters that end a directive.
pub(super) fn is_conversion(c: char) -> bool {
    Conversion::from_char(c).is_some()
}

/// A parsed printf-style directive without its leading `%`:
/// `[flags][width][.precision]conversion`.
///
/// Flags are `-` (left-align), `+` (always show sign), space (pad sign),
/// `0` (zero-pad numbers) and `#` (alternate form).
///
/// Negative numbers in `b`, `o` and `x` are rendered as a minus sign
/// followed by the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// `+` / space
    sign: Sign,
    /// `-`
    alignment: Alignment,
    /// `0`
    zero_pad: bool,
    /// `#`
    alternate: bool,
    /// Minimum field width, at most `u16::MAX`.
    width: Option<usize>,
    /// Digits, significant digits or characters, at most `u16::MAX`.
    precision: Option<usize>,
    /// Trailing conversion character.
    conversion: Conversion,
}

impl FromStr for FormatSpec {
    type Err = InterpolationError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let malformed = || InterpolationError::InvalidFormat { spec: spec.to_string() };

        let mut sign = Sign::default();
        let mut alignment = Alignment::default();
        let mut zero_pad = false;
        let mut alternate = false;

        let mut rest = spec;
        while let Some(c) = rest.chars().next() {
            match c {
                '-' => alignment = Alignment::Left,
                '+' => sign = Sign::Always,
                ' ' if sign != Sign::Always => sign = Sign::Space,
                ' ' => {}
                '0' => zero_pad = true,
                '#' => alternate = true,
                _ => break,
            }
            rest = rest.split_at(c.len_utf8()).1;
        }

        let (width, rest) = take_number(rest).map_err(|()| malformed())?;
        let (precision, rest) = match rest.strip_prefix('.') {
            Some(after_dot) => {
                let (precision, rest) = take_number(after_dot).map_err(|()| malformed())?;
                (Some(precision.unwrap_or(0)), rest)
            }
            None => (None, rest),
        };

        let mut chars = rest.chars();
        let conversion = chars.next().and_then(Conversion::from_char).ok_or_else(malformed)?;
        if chars.next().is_some() {
            return Err(malformed());
        }

        Ok(Self { sign, alignment, zero_pad, alternate, width, precision, conversion })
    }
}

/// Splits leading ASCII digits off `input`.
///
/// Widths and precisions are capped at `u16::MAX`, the largest precision
/// std formatting accepts.
fn take_number(input: &str) -> Result<(Option<usize>, &str), ()> {
    let end = input.find(|c: char| !c.is_ascii_digit()).unwrap_or(input.len());
    let (digits, rest) = input.split_at(end);
    if digits.is_empty() {
        return Ok((None, rest));
    }
    digits.parse::<u16>().map(|n| (Some(usize::from(n)), rest)).map_err(|_| ())
}

impl FormatSpec {
    /// Renders `value` according to this directive.
    ///
    /// # Errors
    /// [`InterpolationError::InvalidArgument`] when `value` cannot be
    /// converted for the conversion, such as a non-numeric string for `d`.
    pub fn format(&self, value: &Value) -> Result<String, InterpolationError> {
        match self.conversion {
            Conversion::Str => {
                let text = value_text(value);
                Ok(self.pad("", "", &self.truncate(&text), false))
            }
            Conversion::Inspect => Ok(self.pad("", "", &self.truncate(&value.to_string()), false)),
            Conversion::Char => {
                let c = self.char_of(value)?;
                Ok(self.pad("", "", c.encode_utf8(&mut [0; 4]), false))
            }
            Conversion::Binary { .. }
            | Conversion::Decimal
            | Conversion::Octal
            | Conversion::Hex { .. } => {
                let n = self.integer_of(value)?;
                Ok(self.format_integer(n))
            }
            Conversion::Exponent { .. } | Conversion::Fixed | Conversion::General { .. } => {
                let f = self.float_of(value)?;
                Ok(self.format_float(f))
            }
        }
    }

    /// `b`, `d`, `o` and `x`. Precision is a minimum digit count.
    fn format_integer(&self, n: i128) -> String {
        let magnitude = n.unsigned_abs();
        let mut digits = match self.conversion {
            Conversion::Binary { .. } => format!("{magnitude:b}"),
            Conversion::Octal => format!("{magnitude:o}"),
            Conversion::Hex { upper: false } => format!("{magnitude:x}"),
            Conversion::Hex { upper: true } => format!("{magnitude:X}"),
            _ => magnitude.to_string(),
        };
        if let Some(precision) = self.precision
            && digits.len() < precision
        {
            digits.insert_str(0, &"0".repeat(precision - digits.len()));
        }

        let prefix = match self.conversion {
            _ if !self.alternate || magnitude == 0 => "",
            Conversion::Binary { upper: false } => "0b",
            Conversion::Binary { upper: true } => "0B",
            Conversion::Octal if !digits.starts_with('0') => "0",
            Conversion::Hex { upper: false } => "0x",
            Conversion::Hex { upper: true } => "0X",
            _ => "",
        };

        self.pad(self.sign_for(n < 0), prefix, &digits, self.precision.is_none())
    }

    /// `e`, `f` and `g`, with `Inf` / `NaN` for non-finite values.
    fn format_float(&self, f: f64) -> String {
        let sign = self.sign_for(f.is_sign_negative() && !f.is_nan());
        let magnitude = f.abs();

        if !magnitude.is_finite() {
            let body = if magnitude.is_nan() { "NaN" } else { "Inf" };
            return self.pad(sign, "", body, false);
        }

        let precision = self.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
        let body = match self.conversion {
            Conversion::Exponent { upper } => self.exponent_form(magnitude, precision, upper),
            Conversion::General { upper } => self.general_form(magnitude, precision, upper),
            _ => self.fixed_form(magnitude, precision),
        };

        self.pad(sign, "", &body, true)
    }

    /// `%f` body.
    fn fixed_form(&self, magnitude: f64, precision: usize) -> String {
        let mut body = format!("{magnitude:.precision$}");
        if self.alternate && precision == 0 {
            body.push('.');
        }
        body
    }

    /// `%e` body with an exponent of at least two digits.
    fn exponent_form(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let (mantissa, exponent) = scientific(magnitude, precision);
        let dot = if self.alternate && precision == 0 { "." } else { "" };
        let e = if upper { 'E' } else { 'e' };
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}{dot}{e}{exponent_sign}{:02}", exponent.unsigned_abs())
    }

    /// `%g`: fixed notation when the decimal exponent is in
    /// `-4..precision`, exponent notation otherwise. Trailing zeros are
    /// dropped unless `#` is given.
    fn general_form(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let significant = precision.max(1);
        let (_, exponent) = scientific(magnitude, significant - 1);
        let upper_bound = i64::try_from(significant).unwrap_or(i64::MAX);

        let body = if exponent < -4 || exponent >= upper_bound {
            self.exponent_form(magnitude, significant - 1, upper)
        } else {
            let decimals = usize::try_from(upper_bound - 1 - exponent).unwrap_or(0);
            self.fixed_form(magnitude, decimals)
        };

        if self.alternate { body } else { strip_trailing_zeros(&body) }
    }

    /// Applies `%s`/`%p` precision as a maximum character count.
    fn truncate(&self, text: &str) -> String {
        match self.precision {
            Some(precision) => text.chars().take(precision).collect(),
            None => text.to_string(),
        }
    }

    /// Sign prefix for a number.
    const fn sign_for(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Always) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::OnlyNegative) => "",
        }
    }

    /// Pads `sign + prefix + body` to the width. Zeros go between the
    /// prefix and the body, and only when `zero_allowed`.
    fn pad(&self, sign: &str, prefix: &str, body: &str, zero_allowed: bool) -> String {
        let len = sign.len() + prefix.len() + body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);

        match self.alignment {
            Alignment::Left => format!("{sign}{prefix}{body}{}", " ".repeat(fill)),
            Alignment::Right if self.zero_pad && zero_allowed => {
                format!("{sign}{prefix}{}{body}", "0".repeat(fill))
            }
            Alignment::Right => format!("{}{sign}{prefix}{body}", " ".repeat(fill)),
        }
    }

    /// Error for a value this conversion cannot render.
    fn invalid_argument(&self, value: &Value) -> InterpolationError {
        InterpolationError::InvalidArgument {
            conversion: self.conversion.as_char(),
            value: value.to_string(),
        }
    }

    /// Numbers are truncated toward zero; strings must hold an integer.
    fn integer_of(&self, value: &Value) -> Result<i128, InterpolationError> {
        let n = match value {
            Value::Number(number) => number
                .as_i64()
                .map(i128::from)
                .or_else(|| number.as_u64().map(i128::from))
                .or_else(|| number.as_f64().and_then(truncate_float)),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        n.ok_or_else(|| self.invalid_argument(value))
    }

    /// Numbers as is; strings must parse as a float.
    fn float_of(&self, value: &Value) -> Result<f64, InterpolationError> {
        let f = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        f.ok_or_else(|| self.invalid_argument(value))
    }

    /// A number is a code point; a string contributes its first character.
    fn char_of(&self, value: &Value) -> Result<char, InterpolationError> {
        let c = match value {
            Value::Number(_) => self
                .integer_of(value)
                .ok()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(char::from_u32),
            Value::String(text) => text.chars().next(),
            _ => None,
        };
        c.ok_or_else(|| self.invalid_argument(value))
    }
}

/// Text of a value as `%{name}` and `%s` show it.
pub(super) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Drops the fractional part; `None` for non-finite or out of range values.
fn truncate_float(f: f64) -> Option<i128> {
    if !f.is_finite() {
        return None;
    }
    format!("{:.0}", f.trunc()).parse().ok()
}

/// Mantissa and decimal exponent of `magnitude` in exponent notation with
/// `precision` fractional digits.
fn scientific(magnitude: f64, precision: usize) -> (String, i64) {
    let formatted = format!("{magnitude:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

/// Removes trailing fractional zeros (and a dangling `.`) from the mantissa.
fn strip_trailing_zeros(body: &str) -> String {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };
    if !mantissa.contains('.') {
        return body.to_string();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{mantissa}{exponent}")
}
