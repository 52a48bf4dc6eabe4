//! [`Attribute`] implementations for the primitive value types.

use crate::ast::Str;

use super::Attribute;

/// Flatten-trim-parse conversion shared by the numeric attributes.
fn lexical<T: std::str::FromStr>(value: &Str) -> Result<T, String> {
    value
        .flatten()
        .trim()
        .parse()
        .map_err(|_| "lexical cast failed".to_owned())
}

impl Attribute for i64 {
    fn debug_name() -> String {
        "integer".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        *target = lexical(value)?;
        Ok(())
    }
}

impl Attribute for u64 {
    fn debug_name() -> String {
        "nonnegative integer".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        *target = lexical(value)?;
        Ok(())
    }
}

impl Attribute for f64 {
    fn debug_name() -> String {
        "decimal number".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        *target = lexical(value)?;
        Ok(())
    }
}

impl Attribute for String {
    fn debug_name() -> String {
        "string".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        *target = value.flatten();
        Ok(())
    }
}

impl Attribute for bool {
    fn debug_name() -> String {
        "boolean".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        let text = value.flatten();
        match text.trim() {
            "yes" | "on" => {
                *target = true;
                Ok(())
            }
            "no" | "off" => {
                *target = false;
                Ok(())
            }
            found => Err(format!(
                "Legal values are: 'yes', 'no', 'on', 'off'. Found '{}'.",
                found
            )),
        }
    }
}

impl Attribute for Vec<String> {
    fn debug_name() -> String {
        "comma separated list".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        let text = value.flatten();
        if text.trim().is_empty() {
            *target = Vec::new();
            return Ok(());
        }
        *target = text.split(',').map(|elem| elem.trim().to_owned()).collect();
        Ok(())
    }
}

impl Attribute for (i64, i64) {
    fn debug_name() -> String {
        "int pair".to_owned()
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        let mut elems = Vec::new();
        <Vec<String>>::coerce(&mut elems, value)?;
        if elems.len() != 2 {
            return Err(format!("Expected pair, found {} elements", elems.len()));
        }
        let first: i64 = elems[0]
            .parse()
            .map_err(|_| format!("Expected integer, found '{}' (first element)", elems[0]))?;
        let second: i64 = elems[1]
            .parse()
            .map_err(|_| format!("Expected integer, found '{}' (second element)", elems[1]))?;
        *target = (first, second);
        Ok(())
    }
}

/// Empty input yields `None`; anything else delegates to `A` and lifts.
impl<A: Attribute + Default> Attribute for Option<A> {
    fn debug_name() -> String {
        format!("optional {}", A::debug_name())
    }

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String> {
        if value.flatten().is_empty() {
            *target = None;
            return Ok(());
        }
        let mut temp = A::default();
        A::coerce(&mut temp, value)?;
        *target = Some(temp);
        Ok(())
    }
}
