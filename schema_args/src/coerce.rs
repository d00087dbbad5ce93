//! Scalar coercion from command-line text to JSON values.
//!
//! Coercion happens at parse time inside clap through [`ScalarParser`], so a
//! bad value is reported as a clap usage error naming the flag.

use std::ffi::OsStr;

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use serde_json::{Number, Value};

use crate::schema::ScalarKind;

/// Parse `raw` as a value of `kind`.
///
/// # Errors
///
/// Returns a short reason when the text does not form a valid value.
///
/// # Examples
///
/// ```
/// use schema_args::{ScalarKind, parse_scalar};
/// use serde_json::json;
///
/// assert_eq!(parse_scalar(ScalarKind::INT, "-3"), Ok(json!(-3)));
/// assert_eq!(parse_scalar(ScalarKind::Bool, "yes"), Ok(json!(true)));
/// assert!(parse_scalar(ScalarKind::UINT, "-3").is_err());
/// assert!(parse_scalar(ScalarKind::unsigned(u16::BITS), "70000").is_err());
/// ```
pub fn parse_scalar(kind: ScalarKind, raw: &str) -> Result<Value, String> {
    match kind {
        ScalarKind::Str | ScalarKind::Path => Ok(Value::String(raw.to_owned())),
        ScalarKind::Int { min, max } => {
            let parsed = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("expected an integer: {e}"))?;
            if (min..=max).contains(&parsed) {
                Ok(Value::from(parsed))
            } else {
                Err(format!("expected an integer between {min} and {max}"))
            }
        }
        ScalarKind::UInt { max } => {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("expected a non-negative integer: {e}"))?;
            if parsed <= max {
                Ok(Value::from(parsed))
            } else {
                Err(format!("expected an integer between 0 and {max}"))
            }
        }
        ScalarKind::Float => {
            let parsed = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("expected a number: {e}"))?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| "expected a finite number".to_owned())
        }
        ScalarKind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::String(c.to_string())),
                _ => Err("expected a single character".to_owned()),
            }
        }
        ScalarKind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| "expected one of true, false, yes, no, 1, 0".to_owned()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Render a coerced value the way it would be typed on the command line.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// clap value parser coercing each value to a [`ScalarKind`] and checking it
/// against an optional set of permitted values.
#[derive(Clone, Debug)]
pub struct ScalarParser {
    kind: ScalarKind,
    choices: Option<Vec<Value>>,
}

impl ScalarParser {
    /// Parser for unrestricted values of `kind`.
    #[must_use]
    pub const fn new(kind: ScalarKind) -> Self {
        Self {
            kind,
            choices: None,
        }
    }

    /// Restrict accepted values to `choices` (already coerced).
    #[must_use]
    pub fn with_choices(mut self, choices: Option<Vec<Value>>) -> Self {
        self.choices = choices;
        self
    }

    fn invalid(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        raw: &str,
        reason: &str,
    ) -> clap::Error {
        let arg_name = arg.map_or_else(|| "...".to_owned(), ToString::to_string);
        tracing::debug!(arg = %arg_name, value = raw, reason, "rejected argument value");
        let mut err = clap::Error::new(ErrorKind::InvalidValue).with_cmd(cmd);
        err.insert(ContextKind::InvalidArg, ContextValue::String(arg_name));
        err.insert(ContextKind::InvalidValue, ContextValue::String(raw.to_owned()));
        if let Some(choices) = &self.choices {
            err.insert(
                ContextKind::ValidValue,
                ContextValue::Strings(choices.iter().map(display_value).collect()),
            );
        }
        err
    }
}

impl TypedValueParser for ScalarParser {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(raw) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };
        let parsed = parse_scalar(self.kind, raw)
            .map_err(|reason| self.invalid(cmd, arg, raw, &reason))?;
        match &self.choices {
            Some(choices) if !choices.contains(&parsed) => {
                Err(self.invalid(cmd, arg, raw, "not one of the permitted values"))
            }
            _ => Ok(parsed),
        }
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        self.choices.as_ref().map(|choices| {
            Box::new(
                choices
                    .iter()
                    .map(|choice| PossibleValue::new(display_value(choice))),
            ) as Box<dyn Iterator<Item = PossibleValue>>
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::text(ScalarKind::Str, "hello", json!("hello"))]
    #[case::path(ScalarKind::Path, "/tmp/x", json!("/tmp/x"))]
    #[case::negative(ScalarKind::INT, "-42", json!(-42))]
    #[case::unsigned(ScalarKind::UINT, "8080", json!(8080))]
    #[case::u16_upper_bound(ScalarKind::unsigned(u16::BITS), "65535", json!(65535))]
    #[case::i8_lower_bound(ScalarKind::signed(i8::BITS), "-128", json!(-128))]
    #[case::float(ScalarKind::Float, "0.5", json!(0.5))]
    #[case::float_from_int(ScalarKind::Float, "2", json!(2.0))]
    #[case::character(ScalarKind::Char, "x", json!("x"))]
    #[case::bool_word(ScalarKind::Bool, "False", json!(false))]
    fn coerces_valid_text(#[case] kind: ScalarKind, #[case] raw: &str, #[case] expected: Value) {
        assert_eq!(parse_scalar(kind, raw), Ok(expected));
    }

    #[rstest]
    #[case::int(ScalarKind::INT, "abc")]
    #[case::uint(ScalarKind::UINT, "-1")]
    #[case::u16_overflow(ScalarKind::unsigned(u16::BITS), "70000")]
    #[case::i8_underflow(ScalarKind::signed(i8::BITS), "-129")]
    #[case::i32_overflow(ScalarKind::signed(i32::BITS), "2147483648")]
    #[case::float(ScalarKind::Float, "NaN")]
    #[case::chars(ScalarKind::Char, "xy")]
    #[case::empty_char(ScalarKind::Char, "")]
    #[case::bool(ScalarKind::Bool, "maybe")]
    fn rejects_invalid_text(#[case] kind: ScalarKind, #[case] raw: &str) {
        assert!(parse_scalar(kind, raw).is_err());
    }

    fn command_with(parser: ScalarParser) -> clap::Command {
        clap::Command::new("t").arg(clap::Arg::new("v").long("v").value_parser(parser))
    }

    #[test]
    fn parser_reports_invalid_value_kind() {
        let err = command_with(ScalarParser::new(ScalarKind::INT))
            .try_get_matches_from(["t", "--v", "nope"])
            .expect_err("non-integer must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn parser_enforces_choices() {
        let parser =
            ScalarParser::new(ScalarKind::UINT).with_choices(Some(vec![json!(1), json!(2)]));
        let cmd = command_with(parser);
        let ok = cmd
            .clone()
            .try_get_matches_from(["t", "--v", "2"])
            .expect("2 is permitted");
        assert_eq!(ok.get_one::<Value>("v"), Some(&json!(2)));
        let err = cmd
            .try_get_matches_from(["t", "--v", "3"])
            .expect_err("3 is not permitted");
        assert!(err.to_string().contains("possible values"));
    }

    #[test]
    fn parser_rejects_values_wider_than_the_field() {
        let err = command_with(ScalarParser::new(ScalarKind::unsigned(u16::BITS)))
            .try_get_matches_from(["t", "--v", "70000"])
            .expect_err("70000 does not fit in 16 bits");
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[rstest]
    #[case::u8(ScalarKind::unsigned(u8::BITS), ScalarKind::UInt { max: 255 })]
    #[case::i16(ScalarKind::signed(i16::BITS), ScalarKind::Int { min: -32768, max: 32767 })]
    #[case::u128(ScalarKind::unsigned(u128::BITS), ScalarKind::UINT)]
    #[case::i64(ScalarKind::signed(i64::BITS), ScalarKind::INT)]
    fn widths_map_to_bounds(#[case] kind: ScalarKind, #[case] expected: ScalarKind) {
        assert_eq!(kind, expected);
    }
}
