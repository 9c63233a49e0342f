//! # قوانین فیلدها
//!
//! هر تابع یک فیلد رو بررسی میکنه. طول‌ها بر اساس تعداد کاراکتر (نه بایت)
//! حساب میشن. «رقم» یعنی ارقام ASCII، فارسی (`۰` تا `۹`) یا عربی (`٠` تا `٩`)؛
//! مقایسه‌ی پیشوندها و محاسبه‌ها بعد از تبدیل به ASCII انجام میشه.

use std::borrow::Cow;
use std::num::IntErrorKind;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use super::catalog::{
    self, BIRTH_YEAR_RANGE, BORN_CITIES, DEPARTMENTS, ID_SERIAL_LETTERS, LANDLINE_AREA_CODES,
    MARITAL_STATUSES, MOBILE_PREFIX, PROFESSOR_MAJORS, STUDENT_ID_PREFIX,
};
use super::{violation, RuleKind};

type RuleResult = Result<(), ValidationError>;

/// فقط حروف بلوک عربی/فارسی یونیکد (U+0600 تا U+06FF) و فاصله
pub static PERSIAN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\u{0600}-\u{06FF}\s]+$").expect("Invalid regex pattern")
});

const PROFESSOR_NAME_MAX: usize = 10;
const COURSE_NAME_MAX: usize = 25;
const ADDRESS_MAX: usize = 100;

/// مقدار یک رقم ASCII، فارسی یا عربی
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '\u{06F0}'..='\u{06F9}' => Some(u32::from(c) - 0x06F0),
        '\u{0660}'..='\u{0669}' => Some(u32::from(c) - 0x0660),
        _ => None,
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| digit_value(c).is_some())
}

/// تبدیل ارقام فارسی و عربی به ASCII؛ بقیه کاراکترها دست نمیخورن
#[must_use]
pub fn normalize_digits(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }
    value
        .chars()
        .map(|c| digit_value(c).and_then(|d| char::from_digit(d, 10)).unwrap_or(c))
        .collect::<String>()
        .into()
}

// =====================================
// Persian Text
// =====================================
/// بررسی متن فارسی با سقف طول اختیاری
///
/// # Arguments
/// * `label` - نام فیلد برای پیام خطا (مثلا «نام»)
/// * `max_chars` - حداکثر تعداد کاراکتر، اگه `None` باشه سقفی نداره
pub fn persian_text(value: &str, label: &str, max_chars: Option<usize>) -> RuleResult {
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            return Err(violation(
                RuleKind::InvalidFormat,
                format!("حداکثر طول {label} باید {max} باشد"),
            ));
        }
    }

    if !PERSIAN_TEXT.is_match(value) {
        return Err(violation(
            RuleKind::InvalidFormat,
            format!("{label} باید فقط حاوی کاراکترهای فارسی باشد"),
        ));
    }

    Ok(())
}

pub fn professor_first_name(value: &str) -> RuleResult {
    persian_text(value, "نام", Some(PROFESSOR_NAME_MAX))
}

pub fn professor_last_name(value: &str) -> RuleResult {
    persian_text(value, "نام خانوادگی", Some(PROFESSOR_NAME_MAX))
}

pub fn student_first_name(value: &str) -> RuleResult {
    persian_text(value, "نام", None)
}

pub fn student_last_name(value: &str) -> RuleResult {
    persian_text(value, "نام خانوادگی", None)
}

pub fn father_name(value: &str) -> RuleResult {
    persian_text(value, "نام پدر", None)
}

pub fn course_name(value: &str) -> RuleResult {
    persian_text(value, "نام درس", Some(COURSE_NAME_MAX))
}

/// آدرس: بین ۱ تا ۱۰۰ کاراکتر، بدون محدودیت خط
pub fn address(value: &str) -> RuleResult {
    let len = value.chars().count();
    if len < 1 {
        return Err(violation(RuleKind::InvalidFormat, "آدرس نمیتواند خالی باشد"));
    }
    if len > ADDRESS_MAX {
        return Err(violation(
            RuleKind::InvalidFormat,
            "آدرس باید حداکثر دارای ۱۰۰ حرف باشد",
        ));
    }
    Ok(())
}

// =====================================
// Fixed-length Numeric Strings
// =====================================
/// رشته عددی با طول دقیق
pub fn fixed_digits(value: &str, len: usize, label: &str) -> RuleResult {
    if value.chars().count() != len {
        return Err(violation(
            RuleKind::InvalidFormat,
            format!("{label} باید {len} رقمی باشد"),
        ));
    }
    if !is_digits(value) {
        return Err(violation(
            RuleKind::InvalidFormat,
            format!("{label} تنها متشکل از اعداد است"),
        ));
    }
    Ok(())
}

pub fn professor_id(value: &str) -> RuleResult {
    fixed_digits(value, 6, "کد استاد")
}

pub fn course_id(value: &str) -> RuleResult {
    fixed_digits(value, 5, "کد درس")
}

pub fn postal_code(value: &str) -> RuleResult {
    fixed_digits(value, 10, "کد پستی")
}

pub fn id_serial_number(value: &str) -> RuleResult {
    fixed_digits(value, 6, "سریال شناسنامه")
}

pub fn id_serial_code(value: &str) -> RuleResult {
    fixed_digits(value, 2, "کد سریال شناسنامه")
}

/// شماره دانشجویی: ۱۱ رقم با پیشوند `403114150`
pub fn student_id(value: &str) -> RuleResult {
    if !is_digits(value) {
        return Err(violation(
            RuleKind::InvalidFormat,
            "شماره دانشجویی باید تنها متشکل از اعداد باشد",
        ));
    }
    let value = normalize_digits(value);
    if !value.starts_with(STUDENT_ID_PREFIX) {
        return Err(violation(
            RuleKind::InvalidFormat,
            "قالب شماره دانشجویی صحیح نیست ( شماره دانشجویی باید با 403114150 شروع بشود)",
        ));
    }
    if value.len() != 11 {
        return Err(violation(
            RuleKind::InvalidFormat,
            "شماره دانشجویی باید دارای 11 رقم باشد",
        ));
    }
    Ok(())
}

// =====================================
// Phones
// =====================================
/// تلفن همراه: ۱۱ رقم، شروع با `09`
pub fn mobile_phone(value: &str) -> RuleResult {
    fixed_digits(value, 11, "شماره تلفن همراه")?;
    if !normalize_digits(value).starts_with(MOBILE_PREFIX) {
        return Err(violation(
            RuleKind::InvalidFormat,
            "شماره تلفن همراه باید با 09 شروع شود",
        ));
    }
    Ok(())
}

/// تلفن ثابت: ۱۱ رقم با پیش‌شماره سه‌رقمی مجاز
pub fn landline_phone(value: &str) -> RuleResult {
    fixed_digits(value, 11, "شماره تلفن ثابت")?;

    // بعد از fixed_digits و تبدیل ارقام، همه کاراکترها ASCII هستن
    let value = normalize_digits(value);
    let area_code = &value[..3];
    if !LANDLINE_AREA_CODES.contains(&area_code) {
        return Err(violation(
            RuleKind::InvalidFormat,
            "پیش شماره تلفن ثابت نادرست است",
        ));
    }
    Ok(())
}

// =====================================
// Enumerations
// =====================================
fn one_of(value: &str, allowed: &[&str], message: &'static str) -> RuleResult {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(violation(RuleKind::InvalidEnum, message))
    }
}

pub fn department(value: &str) -> RuleResult {
    one_of(
        value,
        &DEPARTMENTS,
        "دانشکده باید یکی از دانشکده های مجاز یعنی فنی مهندسی، علوم پایه یا اقتصاد باشد",
    )
}

pub fn born_city(value: &str) -> RuleResult {
    one_of(
        value,
        &BORN_CITIES,
        "محل تولد باید یکی از مراکز استان ها در کشور باشد",
    )
}

pub fn marital_status(value: &str) -> RuleResult {
    one_of(value, &MARITAL_STATUSES, "وضعیت تأهل باید {مجرد یا متاهل} باشد")
}

/// رشته استاد: فهرست تخت هفت‌تایی، بدون توجه به دانشکده
pub fn professor_major(value: &str) -> RuleResult {
    one_of(
        value,
        &PROFESSOR_MAJORS,
        "رشته تحصیلی باید یکی از رشته های مجاز دانشکده باشد",
    )
}

/// رشته دانشجو: یکی از نه رشته‌ی زیرفهرست‌های دانشکده‌ها
///
/// تطابق با دانشکده‌ی خود رکورد جداگانه در [`major_in_department`] بررسی میشه.
pub fn student_major(value: &str) -> RuleResult {
    if catalog::is_student_major(value) {
        Ok(())
    } else {
        Err(violation(
            RuleKind::InvalidEnum,
            "رشته تحصیلی باید معتبر و مرتبط با دانشکده باشد",
        ))
    }
}

/// رشته باید در زیرفهرست همون دانشکده باشه (قانون دو سطحی دانشجو)
pub fn major_in_department(department: &str, major: &str) -> RuleResult {
    match catalog::student_majors_of(department) {
        Some(majors) if majors.contains(&major) => Ok(()),
        _ => Err(violation(
            RuleKind::InvalidEnum,
            format!("رشته «{major}» در دانشکده «{department}» ارائه نمیشود"),
        )),
    }
}

/// حرف سریال شناسنامه: دقیقا یک حرف از ۳۳ حرف فارسی
pub fn id_serial_letter(value: &str) -> RuleResult {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if ID_SERIAL_LETTERS.contains(letter) => Ok(()),
        _ => Err(violation(
            RuleKind::InvalidEnum,
            "حرف سریال شناسنامه باید یکی از حروف فارسی باشد",
        )),
    }
}

// =====================================
// Persian Calendar Date
// =====================================
/// تاریخ شمسی تجزیه‌شده
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersianDate {
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

/// تجزیه تاریخ تولد
///
/// برچسب فیلد «YYYY/MM/DD» هست ولی بخش‌ها به ترتیب `روز/ماه/سال` خونده
/// میشن؛ مثلا `"1370/01/01"` رد میشه چون ۱۳۷۰ به عنوان روز خونده میشه.
///
/// # Errors
/// - `invalid_format`: تعداد بخش‌ها ۳ نیست یا بخشی عدد صحیح نیست
/// - `invalid_range`: سال، ماه یا روز خارج از بازه
pub fn parse_birth_date(value: &str) -> Result<PersianDate, ValidationError> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 3 {
        return Err(violation(
            RuleKind::InvalidFormat,
            "فرمت تاریخ باید به صورت YYYY/MM/DD باشد",
        ));
    }

    let mut numbers = [0_i64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        // عدد خیلی بزرگ قالبش درسته؛ بعدا در بررسی بازه رد میشه
        *slot = match normalize_digits(part.trim()).parse::<i64>() {
            Ok(number) => number,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
            Err(_) => {
                return Err(violation(
                    RuleKind::InvalidFormat,
                    "تاریخ باید فقط شامل اعداد صحیح باشد (مثلاً ۱۳۷۵/۰۵/۲۳)",
                ))
            }
        };
    }
    let [day, month, year] = numbers;

    if !BIRTH_YEAR_RANGE.contains(&year) {
        return Err(violation(RuleKind::InvalidRange, "سال باید بین ۱۳۰۰ تا ۱۴۰۰ باشد"));
    }
    if !(1..=12).contains(&month) {
        return Err(violation(RuleKind::InvalidRange, "ماه باید بین ۱ تا ۱۲ باشد"));
    }
    if !(1..=31).contains(&day) {
        return Err(violation(RuleKind::InvalidRange, "روز باید بین ۱ تا ۳۱ باشد"));
    }

    let max_day = catalog::days_in_month(month);
    if day > max_day {
        let message = if month == 12 {
            "اسفندماه حداکثر ۳۰ روز دارد (بدون در نظر گرفتن سال کبیسه)".to_string()
        } else {
            format!("ماه {month} حداکثر {max_day} روز دارد")
        };
        return Err(violation(RuleKind::InvalidRange, message));
    }

    Ok(PersianDate { day, month, year })
}

pub fn birth_date(value: &str) -> RuleResult {
    parse_birth_date(value).map(|_| ())
}

// =====================================
// National ID
// =====================================
/// کد ملی ایران
///
/// `s = Σ digit[i]·(10−i)` برای نه رقم اول، به پیمانه ۱۱. رقم دهم (کنترل)
/// اگه `s < 2` باید برابر `s` باشه، وگرنه برابر `11 − s`. کدهایی که همه
/// ارقامشون یکیه رد میشن حتی اگه از نظر حسابی درست باشن.
pub fn national_id(value: &str) -> RuleResult {
    if !is_digits(value) {
        return Err(violation(
            RuleKind::InvalidFormat,
            "کد ملی تنها باید از ارقام تشکیل شده باشد.",
        ));
    }
    if value.chars().count() != 10 {
        return Err(violation(RuleKind::InvalidFormat, "کد ملی باید عددی ده‌رقمی باشد."));
    }

    let digits: Vec<u32> = value.chars().filter_map(digit_value).collect();
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(violation(
            RuleKind::InvalidChecksum,
            "کد ملی نمی‌تواند از ارقام تکراری تشکیل شده باشد.",
        ));
    }

    let sum: u32 = digits[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum::<u32>()
        % 11;
    let check = digits[9];
    let valid = if sum < 2 { check == sum } else { check == 11 - sum };

    if valid {
        Ok(())
    } else {
        Err(violation(RuleKind::InvalidChecksum, "کد ملی وارد شده نامعتبر است."))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(result: RuleResult) -> Option<RuleKind> {
        result.err().and_then(|e| RuleKind::from_code(&e.code))
    }

    #[test]
    fn test_persian_text() {
        assert!(professor_first_name("علی").is_ok());
        assert!(professor_first_name("محمد رضا").is_ok());
        assert_eq!(kind_of(professor_first_name("Ali")), Some(RuleKind::InvalidFormat));
        assert_eq!(kind_of(professor_first_name("")), Some(RuleKind::InvalidFormat));
        // ۱۱ کاراکتر
        assert!(professor_last_name("عبدالرحمانی").is_err());
        assert!(student_last_name("عبدالرحمانی").is_ok());
    }

    #[test]
    fn test_course_name_cap_counts_chars() {
        let name = "ر".repeat(25);
        assert!(course_name(&name).is_ok());
        assert!(course_name(&"ر".repeat(26)).is_err());
    }

    #[test]
    fn test_address_bounds() {
        assert!(address("تهران، خیابان آزادی").is_ok());
        assert!(address("Street 5").is_ok());
        assert!(address("").is_err());
        assert!(address(&"a".repeat(100)).is_ok());
        assert!(address(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_fixed_digits() {
        assert!(professor_id("123456").is_ok());
        assert!(professor_id("12345").is_err());
        assert!(professor_id("12a456").is_err());
        assert!(professor_id("۱۲۳۴۵۶").is_ok());
        assert!(postal_code("١٢٣٤٥٦٧٨٩٠").is_ok());
        assert!(id_serial_code("۷").is_err());
        assert!(course_id("40101").is_ok());
        assert!(postal_code("1234567890").is_ok());
        assert!(id_serial_code("7").is_err());
    }

    #[test]
    fn test_student_id() {
        assert!(student_id("40311415001").is_ok());
        assert!(student_id("40311415101").is_err());
        assert!(student_id("4031141500").is_err());
        assert!(student_id("403114150011").is_err());
        assert!(student_id("4031141500x").is_err());
    }

    #[test]
    fn test_phones() {
        assert!(mobile_phone("09121234567").is_ok());
        assert!(mobile_phone("08121234567").is_err());
        assert!(mobile_phone("0912123456").is_err());
        assert!(landline_phone("02112345678").is_ok());
        assert!(landline_phone("09912345678").is_ok());
        assert!(landline_phone("02212345678").is_err());
        assert!(landline_phone("021123456").is_err());
        assert!(landline_phone("021-2345678").is_err());
    }

    #[test]
    fn test_enums() {
        assert!(department("علوم پایه").is_ok());
        assert_eq!(kind_of(department("هنر")), Some(RuleKind::InvalidEnum));
        assert!(born_city("خرم‌آباد").is_ok());
        assert!(born_city("کاشان").is_err());
        assert!(marital_status("متاهل").is_ok());
        assert!(marital_status("مطلقه").is_err());
    }

    #[test]
    fn test_serial_letter_is_single_char() {
        assert!(id_serial_letter("ب").is_ok());
        assert!(id_serial_letter("آ").is_ok());
        assert!(id_serial_letter("").is_err());
        assert!(id_serial_letter("با").is_err());
        assert!(id_serial_letter("b").is_err());
    }

    #[test]
    fn test_majors() {
        assert!(professor_major("مهندسی پلیمر").is_ok());
        assert!(professor_major("ریاضی").is_err());
        assert!(student_major("ریاضی").is_ok());
        assert!(student_major("مهندسی پلیمر").is_err());
        assert!(major_in_department("علوم پایه", "ریاضی").is_ok());
        assert_eq!(
            kind_of(major_in_department("فنی مهندسی", "ریاضی")),
            Some(RuleKind::InvalidEnum)
        );
    }

    #[test]
    fn test_birth_date_order_is_day_month_year() {
        assert_eq!(
            parse_birth_date("23/05/1375").unwrap(),
            PersianDate { day: 23, month: 5, year: 1375 }
        );
        // ۱۳۷۰ به عنوان روز خونده میشه؛ سال (۱) خارج از بازه‌ست
        assert_eq!(kind_of(birth_date("1370/01/01")), Some(RuleKind::InvalidRange));
    }

    #[test]
    fn test_birth_date_errors() {
        assert_eq!(kind_of(birth_date("1/1")), Some(RuleKind::InvalidFormat));
        assert_eq!(kind_of(birth_date("a/1/1370")), Some(RuleKind::InvalidFormat));
        assert_eq!(kind_of(birth_date("1/1/1299")), Some(RuleKind::InvalidRange));
        assert_eq!(kind_of(birth_date("1/13/1370")), Some(RuleKind::InvalidRange));
        assert_eq!(kind_of(birth_date("32/1/1370")), Some(RuleKind::InvalidRange));
        assert!(birth_date("31/6/1370").is_ok());
        assert_eq!(kind_of(birth_date("31/7/1370")), Some(RuleKind::InvalidRange));
        assert!(birth_date("30/12/1400").is_ok());
        assert_eq!(kind_of(birth_date("31/12/1399")), Some(RuleKind::InvalidRange));
    }

    #[test]
    fn test_national_id() {
        assert!(national_id("0012345679").is_ok());
        assert!(national_id("1234567891").is_ok());
        assert!(national_id("2718281820").is_ok());
        assert_eq!(kind_of(national_id("0012345678")), Some(RuleKind::InvalidChecksum));
        assert_eq!(kind_of(national_id("001234567")), Some(RuleKind::InvalidFormat));
        assert_eq!(kind_of(national_id("00123456a9")), Some(RuleKind::InvalidFormat));
    }

    #[test]
    fn test_national_id_rejects_repeated_digits() {
        // از نظر حسابی معتبره ولی همه ارقام یکیه
        assert_eq!(kind_of(national_id("1111111111")), Some(RuleKind::InvalidChecksum));
        assert_eq!(kind_of(national_id("0000000000")), Some(RuleKind::InvalidChecksum));
    }

    #[test]
    fn test_persian_digits_are_digits() {
        assert_eq!(normalize_digits("۰۹۱۲"), "0912");
        assert_eq!(normalize_digits("٠٩a"), "09a");
        assert!(matches!(normalize_digits("123"), Cow::Borrowed(_)));

        assert!(national_id("۰۰۱۲۳۴۵۶۷۹").is_ok());
        assert_eq!(kind_of(national_id("۰۰۱۲۳۴۵۶۷۸")), Some(RuleKind::InvalidChecksum));
        assert!(student_id("۴۰۳۱۱۴۱۵۰۰۱").is_ok());
        assert!(mobile_phone("۰۹۱۲۱۲۳۴۵۶۷").is_ok());
        assert!(landline_phone("۰۲۱۱۲۳۴۵۶۷۸").is_ok());
        assert!(landline_phone("۰۲۲۱۲۳۴۵۶۷۸").is_err());
    }

    #[test]
    fn test_birth_date_accepts_persian_digits() {
        assert_eq!(
            parse_birth_date("۲۳/۰۵/۱۳۷۵").unwrap(),
            PersianDate { day: 23, month: 5, year: 1375 }
        );
    }

    #[test]
    fn test_birth_date_overflow_is_a_range_error() {
        assert_eq!(
            kind_of(birth_date("99999999999999999999/1/1370")),
            Some(RuleKind::InvalidRange)
        );
        assert_eq!(
            kind_of(birth_date("1/1/99999999999999999999")),
            Some(RuleKind::InvalidRange)
        );
        assert_eq!(
            kind_of(birth_date("1/-99999999999999999999/1370")),
            Some(RuleKind::InvalidRange)
        );
    }
}
