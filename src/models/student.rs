//! # مدل دانشجو

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::professor::replace_if_set;
use super::{normalize_field, FieldSet, Record, RecordKind};
use crate::validation::{self, FieldError};

// =====================================
// Student Entity
// =====================================
/// دانشجو
///
/// رشته باید در زیرفهرست دانشکده‌ی خود دانشجو باشه (سخت‌گیرانه‌تر از استاد).
/// کد ملی دانشجو یکتا بودنش چک نمیشه.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Student {
    /// شماره دانشجویی - ۱۱ رقم با پیشوند 403114150
    #[validate(custom(function = "crate::validation::student_id"))]
    pub id: String,

    #[validate(custom(function = "crate::validation::student_first_name"))]
    pub first_name: String,

    #[validate(custom(function = "crate::validation::student_last_name"))]
    pub last_name: String,

    #[validate(custom(function = "crate::validation::father_name"))]
    pub father_name: String,

    #[validate(custom(function = "crate::validation::birth_date"))]
    pub birth_date: String,

    // سریال شناسنامه: شش رقم + یک حرف + دو رقم
    #[validate(custom(function = "crate::validation::id_serial_number"))]
    pub id_serial_number: String,

    #[validate(custom(function = "crate::validation::id_serial_letter"))]
    pub id_serial_letter: String,

    #[validate(custom(function = "crate::validation::id_serial_code"))]
    pub id_serial_code: String,

    #[validate(custom(function = "crate::validation::born_city"))]
    pub born_city: String,

    #[validate(custom(function = "crate::validation::address"))]
    pub address: String,

    #[validate(custom(function = "crate::validation::postal_code"))]
    pub postal_code: String,

    #[validate(custom(function = "crate::validation::mobile_phone"))]
    pub mobile_phone: String,

    #[validate(custom(function = "crate::validation::landline_phone"))]
    pub landline_phone: String,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: String,

    #[validate(custom(function = "crate::validation::marital_status"))]
    pub marital_status: String,

    #[validate(custom(function = "crate::validation::national_id"))]
    pub national_id: String,

    #[validate(custom(function = "crate::validation::student_major"))]
    pub major: String,

    pub course_ids: String,

    pub lecturer_ids: String,
}

impl FieldSet for Student {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "father_name",
        "birth_date",
        "id_serial_number",
        "id_serial_letter",
        "id_serial_code",
        "born_city",
        "address",
        "postal_code",
        "mobile_phone",
        "landline_phone",
        "department",
        "marital_status",
        "national_id",
        "major",
        "course_ids",
        "lecturer_ids",
    ];
}

// =====================================
// Student Patch
// =====================================
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StudentPatch {
    #[validate(custom(function = "crate::validation::student_first_name"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "crate::validation::student_last_name"))]
    pub last_name: Option<String>,

    #[validate(custom(function = "crate::validation::father_name"))]
    pub father_name: Option<String>,

    #[validate(custom(function = "crate::validation::birth_date"))]
    pub birth_date: Option<String>,

    #[validate(custom(function = "crate::validation::id_serial_number"))]
    pub id_serial_number: Option<String>,

    #[validate(custom(function = "crate::validation::id_serial_letter"))]
    pub id_serial_letter: Option<String>,

    #[validate(custom(function = "crate::validation::id_serial_code"))]
    pub id_serial_code: Option<String>,

    #[validate(custom(function = "crate::validation::born_city"))]
    pub born_city: Option<String>,

    #[validate(custom(function = "crate::validation::address"))]
    pub address: Option<String>,

    #[validate(custom(function = "crate::validation::postal_code"))]
    pub postal_code: Option<String>,

    #[validate(custom(function = "crate::validation::mobile_phone"))]
    pub mobile_phone: Option<String>,

    #[validate(custom(function = "crate::validation::landline_phone"))]
    pub landline_phone: Option<String>,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: Option<String>,

    #[validate(custom(function = "crate::validation::marital_status"))]
    pub marital_status: Option<String>,

    #[validate(custom(function = "crate::validation::national_id"))]
    pub national_id: Option<String>,

    #[validate(custom(function = "crate::validation::student_major"))]
    pub major: Option<String>,

    pub course_ids: Option<String>,

    pub lecturer_ids: Option<String>,
}

impl FieldSet for StudentPatch {
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "father_name",
        "birth_date",
        "id_serial_number",
        "id_serial_letter",
        "id_serial_code",
        "born_city",
        "address",
        "postal_code",
        "mobile_phone",
        "landline_phone",
        "department",
        "marital_status",
        "national_id",
        "major",
        "course_ids",
        "lecturer_ids",
    ];
}

impl Record for Student {
    const KIND: RecordKind = RecordKind::Student;

    type Patch = StudentPatch;

    fn key(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: StudentPatch) {
        let StudentPatch {
            first_name,
            last_name,
            father_name,
            birth_date,
            id_serial_number,
            id_serial_letter,
            id_serial_code,
            born_city,
            address,
            postal_code,
            mobile_phone,
            landline_phone,
            department,
            marital_status,
            national_id,
            major,
            course_ids,
            lecturer_ids,
        } = patch;

        replace_if_set(&mut self.first_name, first_name);
        replace_if_set(&mut self.last_name, last_name);
        replace_if_set(&mut self.father_name, father_name);
        replace_if_set(&mut self.birth_date, birth_date);
        replace_if_set(&mut self.id_serial_number, id_serial_number);
        replace_if_set(&mut self.id_serial_letter, id_serial_letter);
        replace_if_set(&mut self.id_serial_code, id_serial_code);
        replace_if_set(&mut self.born_city, born_city);
        replace_if_set(&mut self.address, address);
        replace_if_set(&mut self.postal_code, postal_code);
        replace_if_set(&mut self.mobile_phone, mobile_phone);
        replace_if_set(&mut self.landline_phone, landline_phone);
        replace_if_set(&mut self.department, department);
        replace_if_set(&mut self.marital_status, marital_status);
        replace_if_set(&mut self.national_id, national_id);
        replace_if_set(&mut self.major, major);
        replace_if_set(&mut self.course_ids, course_ids);
        replace_if_set(&mut self.lecturer_ids, lecturer_ids);
    }

    fn normalize_digits(&mut self) {
        for field in [
            &mut self.id,
            &mut self.birth_date,
            &mut self.id_serial_number,
            &mut self.id_serial_code,
            &mut self.postal_code,
            &mut self.mobile_phone,
            &mut self.landline_phone,
            &mut self.national_id,
        ] {
            normalize_field(field);
        }
    }

    /// رشته باید در زیرفهرست دانشکده باشه
    ///
    /// اگه خود دانشکده یا رشته قبلا خطا گرفته باشن، این قانون اجرا نمیشه.
    fn cross_field_errors(&self, already_failed: &[FieldError]) -> Vec<FieldError> {
        let failed = |name: &str| already_failed.iter().any(|e| e.field() == name);
        if failed("department") || failed("major") {
            return Vec::new();
        }

        match validation::major_in_department(&self.department, &self.major) {
            Ok(()) => Vec::new(),
            Err(err) => vec![FieldError::from_violation("major", &err)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleKind;

    fn student(department: &str, major: &str) -> Student {
        Student {
            id: "40311415001".to_string(),
            first_name: "مریم".to_string(),
            last_name: "احمدی".to_string(),
            father_name: "حسن".to_string(),
            birth_date: "1/1/1380".to_string(),
            id_serial_number: "123456".to_string(),
            id_serial_letter: "ب".to_string(),
            id_serial_code: "12".to_string(),
            born_city: "شیراز".to_string(),
            address: "شیراز".to_string(),
            postal_code: "7134567890".to_string(),
            mobile_phone: "09171234567".to_string(),
            landline_phone: "07112345678".to_string(),
            department: department.to_string(),
            marital_status: "مجرد".to_string(),
            national_id: "0123456789".to_string(),
            major: major.to_string(),
            course_ids: String::new(),
            lecturer_ids: String::new(),
        }
    }

    #[test]
    fn test_major_must_belong_to_department() {
        assert!(student("اقتصاد", "حسابداری").cross_field_errors(&[]).is_empty());

        let errors = student("اقتصاد", "فیزیک").cross_field_errors(&[]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "major");
        assert_eq!(errors[0].kind, RuleKind::InvalidEnum);
    }

    #[test]
    fn test_cross_field_skipped_when_major_already_failed() {
        let failed = vec![FieldError::new("major", RuleKind::InvalidEnum, "x")];
        assert!(student("اقتصاد", "نجوم").cross_field_errors(&failed).is_empty());
    }
}
