//! Input validation functions
//!
//! This module provides validation utilities for registration and
//! profile input. Uses custom validators backed by `regex-lite`.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a person's display name
pub fn validate_full_name(name: &str) -> Result<(), String> {
    if name.trim().len() < 3 {
        return Err("Name must be at least 3 characters".to_string());
    }
    if name.len() > 255 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate a phone number (9-15 digits)
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let phone_regex = regex_lite::Regex::new(r"^[0-9]{9,15}$").unwrap();
    if !phone_regex.is_match(phone) {
        return Err("Phone number must be 9-15 digits".to_string());
    }
    Ok(())
}

/// Validate a birth date (not in the future, age at most 150 years)
pub fn validate_birth_date(birth_date: chrono::NaiveDate) -> Result<(), String> {
    let today = chrono::Utc::now().date_naive();

    if birth_date > today {
        return Err("Birth date cannot be in the future".to_string());
    }

    match today.years_since(birth_date) {
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        _ => Ok(()),
    }
}

/// Validate a birth place
pub fn validate_birth_place(place: &str) -> Result<(), String> {
    if place.trim().is_empty() {
        return Err("Birth place cannot be empty".to_string());
    }
    if place.len() > 255 {
        return Err("Birth place too long".to_string());
    }
    Ok(())
}
