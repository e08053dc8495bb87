// Common validation types and traits

/// Upper bound for category and task names.
pub const MAX_NAME_LENGTH: usize = 255;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Checks a user-supplied display name: present, not blank once trimmed,
    /// and within [`MAX_NAME_LENGTH`] characters.
    pub fn check_name(&mut self, field: &str, name: Option<&str>) {
        match name.map(str::trim) {
            None | Some("") => self.add_error(field, "Name is required"),
            Some(trimmed) if trimmed.chars().count() > MAX_NAME_LENGTH => {
                self.add_error(field, "Name must not exceed 255 characters")
            }
            Some(_) => {}
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}
