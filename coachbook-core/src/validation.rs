//! Checkout form validation.
//!
//! Runs synchronously before any network call. A failed validation blocks
//! submission and reports one message per offending field.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Customer-entered checkout fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub challenges: String,
    pub goals: String,
}

impl CheckoutForm {
    /// Phone number with blank input treated as absent.
    pub fn phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Challenges,
    Goals,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Challenges => "challenges",
            FormField::Goals => "goals",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_owned());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate every field of `form`, collecting all failures.
pub fn validate_form(form: &CheckoutForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.insert(FormField::Name, "Name is required");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(FormField::Email, "Please enter a valid email address");
    }

    if let Some(phone) = form.phone() {
        if !is_valid_phone(phone) {
            errors.insert(FormField::Phone, "Please enter a valid phone number");
        }
    }

    if form.challenges.trim().is_empty() {
        errors.insert(FormField::Challenges, "Please describe your challenges");
    }

    if form.goals.trim().is_empty() {
        errors.insert(FormField::Goals, "Please describe your goals");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `local@domain.tld`: RFC-ish local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) || !validator::validate_email(email) {
        return false;
    }
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Digits with common separators, 7 to 15 digits in total.
pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' ');
    if !phone.chars().all(allowed) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            challenges: "Too many meetings".to_string(),
            goals: "Ship the engine".to_string(),
        }
    }

    #[test]
    fn test_email_syntax() {
        for bad in ["abc", "a@b", "a.com", "", "a b@c.com", "a@.com", "a@b."] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["a@b.com", "first.last+tag@sub.example.co"] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn test_filled_form_passes() {
        assert_eq!(validate_form(&filled()), Ok(()));
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let form = CheckoutForm {
            name: "   ".to_string(),
            email: String::new(),
            phone: Some(String::new()),
            challenges: "\n".to_string(),
            goals: String::new(),
        };
        let Err(errors) = validate_form(&form) else {
            panic!("empty form must not validate");
        };
        assert_eq!(errors.len(), 4);
        for field in [
            FormField::Name,
            FormField::Email,
            FormField::Challenges,
            FormField::Goals,
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains(FormField::Phone));
    }

    #[test]
    fn test_invalid_email_message_differs_from_missing() {
        let form = CheckoutForm {
            email: "a@b".to_string(),
            ..filled()
        };
        let Err(errors) = validate_form(&form) else {
            panic!("a@b must not validate");
        };
        assert_eq!(
            errors.get(FormField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_phone_is_optional_but_checked_when_present() {
        assert!(is_valid_phone("+234 (801) 234-5678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me"));

        let form = CheckoutForm {
            phone: Some("not a phone".to_string()),
            ..filled()
        };
        let Err(errors) = validate_form(&form) else {
            panic!("bad phone must not validate");
        };
        assert!(errors.contains(FormField::Phone));
        assert_eq!(errors.len(), 1);
    }
}
