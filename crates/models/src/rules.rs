//! Field rules shared by all entities. Each rule carries its own messages so
//! the first failing field is reported verbatim to the caller.

use crate::errors::ModelError;

/// Required (or optional) bounded text.
pub struct TextRule {
    pub max: usize,
    pub missing: &'static str,
    pub too_long: &'static str,
}

impl TextRule {
    /// Present, non-blank and within `max` characters; returns the trimmed value.
    pub fn check(&self, value: Option<&str>) -> Result<String, ModelError> {
        let v = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ModelError::validation(self.missing))?;
        self.bounded(v)
    }

    /// Blank counts as absent.
    pub fn check_optional(&self, value: Option<&str>) -> Result<Option<String>, ModelError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.bounded(v).map(Some),
            None => Ok(None),
        }
    }

    fn bounded(&self, v: &str) -> Result<String, ModelError> {
        if v.chars().count() > self.max {
            return Err(ModelError::validation(self.too_long));
        }
        Ok(v.to_string())
    }
}

/// Required number with a lower bound (0 for amounts, 1 for quantities).
pub struct AmountRule {
    pub min: i64,
    pub missing: &'static str,
    pub below_min: &'static str,
}

impl AmountRule {
    pub fn check(&self, value: Option<i64>) -> Result<i64, ModelError> {
        let v = value.ok_or_else(|| ModelError::validation(self.missing))?;
        if v < self.min {
            return Err(ModelError::validation(self.below_min));
        }
        Ok(v)
    }

    pub fn check_i32(&self, value: Option<i32>) -> Result<i32, ModelError> {
        self.check(value.map(i64::from)).map(|v| v as i32)
    }
}

/// A referenced id must be present.
pub fn required_id(value: Option<i32>, missing: &'static str) -> Result<i32, ModelError> {
    value.ok_or_else(|| ModelError::validation(missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: TextRule = TextRule { max: 5, missing: "falta", too_long: "largo" };
    const QTY: AmountRule = AmountRule { min: 1, missing: "sin cantidad", below_min: "mínimo 1" };

    fn msg(e: ModelError) -> String {
        let ModelError::Validation(m) = e;
        m
    }

    #[test]
    fn text_trims_and_rejects_blank() {
        assert_eq!(NAME.check(Some("  ab ")).unwrap(), "ab");
        assert_eq!(msg(NAME.check(Some("   ")).unwrap_err()), "falta");
        assert_eq!(msg(NAME.check(None).unwrap_err()), "falta");
    }

    #[test]
    fn text_counts_characters_not_bytes() {
        assert!(NAME.check(Some("ñandú")).is_ok());
        assert_eq!(msg(NAME.check(Some("ñandús")).unwrap_err()), "largo");
    }

    #[test]
    fn optional_text_treats_blank_as_none() {
        assert_eq!(NAME.check_optional(Some(" ")).unwrap(), None);
        assert_eq!(NAME.check_optional(Some("x")).unwrap(), Some("x".into()));
    }

    #[test]
    fn amount_enforces_lower_bound() {
        assert_eq!(QTY.check_i32(Some(2)).unwrap(), 2);
        assert_eq!(msg(QTY.check_i32(Some(0)).unwrap_err()), "mínimo 1");
        assert_eq!(msg(QTY.check(None).unwrap_err()), "sin cantidad");
    }
}
