use super::models::{CreateTaskRequest, RenameTaskRequest, ReorderTasksRequest};
use crate::common::{ValidationResult, Validator};

pub struct TaskValidator;

impl Validator<CreateTaskRequest> for TaskValidator {
    fn validate(&self, data: &CreateTaskRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.category_id.is_none() {
            result.add_error("categoryId", "categoryId is required");
        }
        result.check_name("name", data.name.as_deref());

        result
    }
}

impl Validator<RenameTaskRequest> for TaskValidator {
    fn validate(&self, data: &RenameTaskRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.check_name("name", data.name.as_deref());
        result
    }
}

impl Validator<ReorderTasksRequest> for TaskValidator {
    fn validate(&self, data: &ReorderTasksRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.category_id.is_none() {
            result.add_error("categoryId", "categoryId is required");
        }
        if data.ordered_ids.is_none() {
            result.add_error("orderedIds", "orderedIds array is required");
        }

        result
    }
}
