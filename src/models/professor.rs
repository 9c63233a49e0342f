//! # مدل استاد

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{normalize_field, FieldSet, Record, RecordKind};

// =====================================
// Professor Entity
// =====================================
/// استاد
///
/// کد ملی بین استادها یکتاست (برخلاف دانشجوها). `course_ids` متن آزاده و
/// با جدول درس‌ها چک نمیشه.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Professor {
    /// کد استاد - شش رقم
    #[validate(custom(function = "crate::validation::professor_id"))]
    pub id: String,

    #[validate(custom(function = "crate::validation::professor_first_name"))]
    pub first_name: String,

    #[validate(custom(function = "crate::validation::professor_last_name"))]
    pub last_name: String,

    #[validate(custom(function = "crate::validation::national_id"))]
    pub national_id: String,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: String,

    /// رشته - با دانشکده تطبیق داده نمیشه
    #[validate(custom(function = "crate::validation::professor_major"))]
    pub major: String,

    /// تاریخ تولد شمسی به ترتیب روز/ماه/سال
    #[validate(custom(function = "crate::validation::birth_date"))]
    pub birth_date: String,

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

    pub course_ids: String,
}

impl FieldSet for Professor {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "national_id",
        "department",
        "major",
        "birth_date",
        "born_city",
        "address",
        "postal_code",
        "mobile_phone",
        "landline_phone",
        "course_ids",
    ];
}

// =====================================
// Professor Patch
// =====================================
/// ویرایش استاد - فقط فیلدهای موجود اعمال میشن
///
/// کلید اصلی اینجا نیست؛ اگه در بدنه بیاد به عنوان فیلد ناشناخته رد میشه.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfessorPatch {
    #[validate(custom(function = "crate::validation::professor_first_name"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "crate::validation::professor_last_name"))]
    pub last_name: Option<String>,

    #[validate(custom(function = "crate::validation::national_id"))]
    pub national_id: Option<String>,

    #[validate(custom(function = "crate::validation::department"))]
    pub department: Option<String>,

    #[validate(custom(function = "crate::validation::professor_major"))]
    pub major: Option<String>,

    #[validate(custom(function = "crate::validation::birth_date"))]
    pub birth_date: Option<String>,

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

    pub course_ids: Option<String>,
}

impl FieldSet for ProfessorPatch {
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "national_id",
        "department",
        "major",
        "birth_date",
        "born_city",
        "address",
        "postal_code",
        "mobile_phone",
        "landline_phone",
        "course_ids",
    ];
}

impl Record for Professor {
    const KIND: RecordKind = RecordKind::Professor;

    type Patch = ProfessorPatch;

    fn key(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: ProfessorPatch) {
        let ProfessorPatch {
            first_name,
            last_name,
            national_id,
            department,
            major,
            birth_date,
            born_city,
            address,
            postal_code,
            mobile_phone,
            landline_phone,
            course_ids,
        } = patch;

        replace_if_set(&mut self.first_name, first_name);
        replace_if_set(&mut self.last_name, last_name);
        replace_if_set(&mut self.national_id, national_id);
        replace_if_set(&mut self.department, department);
        replace_if_set(&mut self.major, major);
        replace_if_set(&mut self.birth_date, birth_date);
        replace_if_set(&mut self.born_city, born_city);
        replace_if_set(&mut self.address, address);
        replace_if_set(&mut self.postal_code, postal_code);
        replace_if_set(&mut self.mobile_phone, mobile_phone);
        replace_if_set(&mut self.landline_phone, landline_phone);
        replace_if_set(&mut self.course_ids, course_ids);
    }

    fn normalize_digits(&mut self) {
        for field in [
            &mut self.id,
            &mut self.national_id,
            &mut self.birth_date,
            &mut self.postal_code,
            &mut self.mobile_phone,
            &mut self.landline_phone,
        ] {
            normalize_field(field);
        }
    }
}

/// جایگزینی مقدار فقط وقتی patch اون فیلد رو داره
pub(crate) fn replace_if_set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_if_set() {
        let mut value = "قدیم".to_string();
        replace_if_set(&mut value, None);
        assert_eq!(value, "قدیم");
        replace_if_set(&mut value, Some("جدید".to_string()));
        assert_eq!(value, "جدید");
    }

    #[test]
    fn test_patch_fields_exclude_primary_key() {
        assert!(Professor::FIELDS.contains(&"id"));
        assert!(!ProfessorPatch::FIELDS.contains(&"id"));
        assert_eq!(Professor::FIELDS.len(), ProfessorPatch::FIELDS.len() + 1);
    }

    #[test]
    fn test_normalize_digits_only_touches_digits() {
        let mut professor = Professor {
            id: "۱۲۳۴۵۶".to_string(),
            first_name: "علی".to_string(),
            last_name: "رضایی".to_string(),
            national_id: "٠٠١٢٣٤٥٦٧٩".to_string(),
            department: "فنی مهندسی".to_string(),
            major: "مهندسی کامپیوتر".to_string(),
            birth_date: "۱۵/۶/۱۳۵۰".to_string(),
            born_city: "تهران".to_string(),
            address: "پلاک ۱۲".to_string(),
            postal_code: "1234567890".to_string(),
            mobile_phone: "09121234567".to_string(),
            landline_phone: "02112345678".to_string(),
            course_ids: String::new(),
        };
        professor.normalize_digits();

        assert_eq!(professor.id, "123456");
        assert_eq!(professor.national_id, "0012345679");
        assert_eq!(professor.birth_date, "15/6/1350");
        // آدرس متن آزاده
        assert_eq!(professor.address, "پلاک ۱۲");
    }
}
