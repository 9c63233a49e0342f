//! # جدول‌های مقادیر مجاز
//!
//! فهرست‌های ثابتی که قوانین اعتبارسنجی بهشون مراجعه میکنن:
//! دانشکده‌ها، رشته‌ها، مراکز استان، پیش‌شماره‌ها و حروف سریال شناسنامه.

/// دانشکده‌های مجاز (برای هر سه نوع رکورد)
pub const DEPARTMENTS: [&str; 3] = ["فنی مهندسی", "علوم پایه", "اقتصاد"];

/// رشته‌های مجاز استاد - فهرست تخت، بدون وابستگی به دانشکده
pub const PROFESSOR_MAJORS: [&str; 7] = [
    "مهندسی کامپیوتر",
    "مهندسی برق",
    "مهندسی مکانیک",
    "مهندسی معدن",
    "مهندسی عمران",
    "مهندسی شهرسازی",
    "مهندسی پلیمر",
];

/// رشته‌های دانشجویی به تفکیک دانشکده
///
/// ترتیب سطرها با [`DEPARTMENTS`] یکیه.
pub const STUDENT_MAJORS_BY_DEPARTMENT: [(&str, [&str; 3]); 3] = [
    ("فنی مهندسی", ["مهندسی کامپیوتر", "مهندسی برق", "مهندسی مکانیک"]),
    ("علوم پایه", ["ریاضی", "فیزیک", "شیمی"]),
    ("اقتصاد", ["اقتصاد", "مدیریت", "حسابداری"]),
];

/// مراکز استان‌ها - تنها شهرهای مجاز برای محل تولد
pub const BORN_CITIES: [&str; 31] = [
    "تهران", "مشهد", "اصفهان", "کرج", "شیراز", "تبریز", "قم", "اهواز", "کرمانشاه",
    "ارومیه", "رشت", "زاهدان", "همدان", "کرمان", "یزد", "اردبیل", "بندرعباس",
    "اراک", "اسلامشهر", "زنجان", "سنندج", "قزوین", "خرم‌آباد", "گرگان",
    "ساری", "بجنورد", "بوشهر", "بیرجند", "ایلام", "شهرکرد", "یاسوج",
];

/// وضعیت تأهل
pub const MARITAL_STATUSES: [&str; 2] = ["مجرد", "متاهل"];

/// حروف مجاز سریال شناسنامه (۳۳ حرف)
pub const ID_SERIAL_LETTERS: &str = "آابپتثجچحخدذرزژسشصضطظعغفقکگلمنوهی";

/// پیش‌شماره‌های مجاز تلفن ثابت
pub const LANDLINE_AREA_CODES: [&str; 53] = [
    "021", "031", "041", "042", "045", "051", "052", "053", "054", "055", "056",
    "057", "058", "059", "061", "062", "063", "064", "065", "066", "067", "068",
    "069", "070", "071", "072", "073", "074", "075", "076", "077", "078", "079",
    "080", "081", "082", "083", "084", "085", "086", "087", "088", "089", "090",
    "091", "092", "093", "094", "095", "096", "097", "098", "099",
];

/// پیشوند ثابت شماره دانشجویی
pub const STUDENT_ID_PREFIX: &str = "403114150";

/// پیشوند شماره همراه
pub const MOBILE_PREFIX: &str = "09";

/// بازه سال‌های مجاز تاریخ تولد (شمسی)
pub const BIRTH_YEAR_RANGE: std::ops::RangeInclusive<i64> = 1300..=1400;

/// سقف روزهای هر ماه شمسی (سال کبیسه در نظر گرفته نمیشه)
#[must_use]
pub fn days_in_month(month: i64) -> i64 {
    match month {
        1..=6 => 31,
        _ => 30,
    }
}

/// فهرست رشته‌های یک دانشکده برای دانشجو
#[must_use]
pub fn student_majors_of(department: &str) -> Option<&'static [&'static str; 3]> {
    STUDENT_MAJORS_BY_DEPARTMENT
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, majors)| majors)
}

/// آیا رشته در یکی از زیرفهرست‌های دانشجویی هست؟
#[must_use]
pub fn is_student_major(major: &str) -> bool {
    STUDENT_MAJORS_BY_DEPARTMENT
        .iter()
        .any(|(_, majors)| majors.contains(&major))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_letters_count() {
        assert_eq!(ID_SERIAL_LETTERS.chars().count(), 33);
    }

    #[test]
    fn test_student_majors_follow_departments() {
        for ((department, _), expected) in STUDENT_MAJORS_BY_DEPARTMENT.iter().zip(DEPARTMENTS) {
            assert_eq!(*department, expected);
        }
        assert_eq!(student_majors_of("علوم پایه").map(|m| m[0]), Some("ریاضی"));
        assert!(student_majors_of("هنر").is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(6), 31);
        assert_eq!(days_in_month(7), 30);
        assert_eq!(days_in_month(12), 30);
    }
}
