use super::models::{CreateCategoryRequest, RenameCategoryRequest, ReorderCategoriesRequest};
use crate::common::{ValidationResult, Validator};

pub struct CategoryValidator;

impl Validator<CreateCategoryRequest> for CategoryValidator {
    fn validate(&self, data: &CreateCategoryRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.check_name("name", data.name.as_deref());
        result
    }
}

impl Validator<RenameCategoryRequest> for CategoryValidator {
    fn validate(&self, data: &RenameCategoryRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.check_name("name", data.name.as_deref());
        result
    }
}

impl Validator<ReorderCategoriesRequest> for CategoryValidator {
    fn validate(&self, data: &ReorderCategoriesRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        if data.ordered_ids.is_none() {
            result.add_error("orderedIds", "orderedIds array is required");
        }
        result
    }
}
