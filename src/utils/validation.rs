// ============================================================================
// VALIDATION - Validaciones de formularios
// ============================================================================

use regex::Regex;

#[derive(Clone, PartialEq, Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(message.into()) }
    }
}

lazy_static::lazy_static! {
    static ref EMAIL_RE: Option<Regex> = Regex::new(r"\S+@\S+\.\S+").ok();
}

fn looks_like_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::fail("メールアドレスを入力してください");
    }
    if !looks_like_email(email) {
        return ValidationResult::fail("有効なメールアドレスを入力してください");
    }
    ValidationResult::ok()
}

pub fn validate_password(password: &str, min_length: usize) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::fail("パスワードを入力してください");
    }
    if password.chars().count() < min_length {
        return ValidationResult::fail(format!("パスワードは{}文字以上で入力してください", min_length));
    }
    ValidationResult::ok()
}

pub fn validate_name(name: &str) -> ValidationResult {
    if name.is_empty() {
        return ValidationResult::fail("名前を入力してください");
    }
    if name.chars().count() < 2 {
        return ValidationResult::fail("名前は2文字以上で入力してください");
    }
    ValidationResult::ok()
}

pub fn validate_required(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(format!("{}を入力してください", field_name));
    }
    ValidationResult::ok()
}

pub fn validate_password_confirmation(password: &str, confirm_password: &str) -> ValidationResult {
    if confirm_password.is_empty() {
        return ValidationResult::fail("確認用パスワードを入力してください");
    }
    if password != confirm_password {
        return ValidationResult::fail("パスワードが一致しません");
    }
    ValidationResult::ok()
}

/// El primer resultado inválido gana
pub fn combine_validation_results(results: &[ValidationResult]) -> ValidationResult {
    results
        .iter()
        .find(|r| !r.is_valid)
        .cloned()
        .unwrap_or_else(ValidationResult::ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("user@example.com").is_valid);
        assert!(validate_email("a@b.c").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("user@example").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("user@.com").is_valid);
        assert!(!validate_email("user@example.").is_valid);
        assert!(!validate_email("user @example.com").is_valid);
        assert!(validate_email("mail: user@example.com").is_valid);
        assert_eq!(
            validate_email("nope").error.as_deref(),
            Some("有効なメールアドレスを入力してください")
        );
    }

    #[test]
    fn password_length_counts_chars() {
        assert!(!validate_password("", 8).is_valid);
        assert!(!validate_password("short", 8).is_valid);
        assert!(validate_password("longenough", 8).is_valid);
        assert_eq!(
            validate_password("abc", 6).error.as_deref(),
            Some("パスワードは6文字以上で入力してください")
        );
    }

    #[test]
    fn required_and_confirmation() {
        assert_eq!(validate_required("  ", "温泉名").error.as_deref(), Some("温泉名を入力してください"));
        assert!(validate_required("草津", "温泉名").is_valid);
        assert!(!validate_password_confirmation("abcdefgh", "").is_valid);
        assert!(!validate_password_confirmation("abcdefgh", "abcdefgx").is_valid);
        assert!(validate_password_confirmation("abcdefgh", "abcdefgh").is_valid);
        assert!(!validate_name("a").is_valid);
        assert!(validate_name("ab").is_valid);
    }

    #[test]
    fn combine_returns_first_failure() {
        let combined = combine_validation_results(&[
            ValidationResult::ok(),
            validate_email("bad"),
            validate_password("", 8),
        ]);
        assert_eq!(combined.error.as_deref(), Some("有効なメールアドレスを入力してください"));
        assert!(combine_validation_results(&[ValidationResult::ok()]).is_valid);
    }
}
