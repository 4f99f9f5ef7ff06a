use std::collections::{BTreeMap, BTreeSet};

use doorset_engine::input::{FeedbackSink, Field, FieldKind, InputProvider};
use tracing::info;

/// 门组表单的原始值，保留用户输入的文本。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: BTreeMap<Field, String>,
    checked: BTreeSet<Field>,
    notices: Vec<String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// 左开 FD30 单扇门，视窗底边与面板护板顶边齐平，
    /// 因此首次重算会修正护板高度。
    pub fn demo() -> Self {
        let mut form = Self::new();
        for (field, value) in [
            (Field::DoorWidthLeft, "926"),
            (Field::DoorWidthRight, ""),
            (Field::DoorHeight, "2000"),
            (Field::DoorThickness, "44"),
            (Field::FaceProtectionHeight, "1000"),
            (Field::FireRating, "FD30"),
            (Field::Handing, "LH"),
            (Field::VpTopMargin, "200"),
            (Field::VpSideMargin, "150"),
            (Field::VpApertureWidth, "200"),
            (Field::VpApertureHeight, "800"),
        ] {
            form.set(field, value);
        }
        form.set_checked(Field::LockEdgeProtection, true);
        form
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.entries.insert(field, value.into());
    }

    pub fn set_checked(&mut self, field: Field, checked: bool) {
        if checked {
            self.checked.insert(field);
        } else {
            self.checked.remove(&field);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn is_checked(&self, field: Field) -> bool {
        self.checked.contains(&field)
    }

    /// 引擎发出的提示，按时间先后排列。
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// 按表单顺序列出字段，开关显示为 `true`/`false`。
    pub fn iter(&self) -> impl Iterator<Item = (Field, FormEntry<'_>)> + '_ {
        Field::ALL.into_iter().filter_map(|field| match field.kind() {
            FieldKind::Flag => Some((field, FormEntry::Flag(self.is_checked(field)))),
            _ => self.get(field).map(|text| (field, FormEntry::Text(text))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormEntry<'a> {
    Text(&'a str),
    Flag(bool),
}

impl InputProvider for FormValues {
    fn value(&self, field: Field) -> f64 {
        self.get(field).map(parse_number).unwrap_or(f64::NAN)
    }

    fn text(&self, field: Field) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    fn flag(&self, field: Field) -> bool {
        self.is_checked(field)
    }
}

impl FeedbackSink for FormValues {
    fn report_adjustment(&mut self, field: Field, value: f64, notice: &str) {
        self.set(field, value.to_string());
        self.notices.push(notice.to_string());
        info!(field = field.id(), value, "form field updated");
    }
}

/// 读取 `text` 最长的数字前缀，忽略前导空白。
/// 没有数字前缀时返回 NaN。
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
