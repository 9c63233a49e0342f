//! # مدل درس

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::professor::replace_if_set;
use super::{normalize_field, FieldSet, Record, RecordKind};

/// درس
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Course {
    /// کد درس - پنج رقم
    #[validate(custom(function = "crate::validation::course_id"))]
    pub id: String,

    #[validate(custom(function = "crate::validation::course_name"))]
    pub name: String,

    /// تعداد واحد، عدد صحیح بین ۱ تا ۴
    #[validate(range(
        min = 1,
        max = 4,
        code = "invalid_range",
        message = "تعداد واحد عددی صحیح از بازه 1 تا 4 است"
    ))]
    pub credits: i64,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: String,
}

impl FieldSet for Course {
    const FIELDS: &'static [&'static str] = &["id", "name", "credits", "department"];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CoursePatch {
    #[validate(custom(function = "crate::validation::course_name"))]
    pub name: Option<String>,

    #[validate(range(
        min = 1,
        max = 4,
        code = "invalid_range",
        message = "تعداد واحد عددی صحیح از بازه 1 تا 4 است"
    ))]
    pub credits: Option<i64>,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: Option<String>,
}

impl FieldSet for CoursePatch {
    const FIELDS: &'static [&'static str] = &["name", "credits", "department"];
}

impl Record for Course {
    const KIND: RecordKind = RecordKind::Course;

    type Patch = CoursePatch;

    fn key(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: CoursePatch) {
        let CoursePatch {
            name,
            credits,
            department,
        } = patch;

        replace_if_set(&mut self.name, name);
        replace_if_set(&mut self.credits, credits);
        replace_if_set(&mut self.department, department);
    }

    fn normalize_digits(&mut self) {
        normalize_field(&mut self.id);
    }
}
