use doorset_core::model::{FireRating, STANDARD_THICKNESS_MM};
use doorset_engine::input::{Field, FieldKind, InputProvider};
use thiserror::Error;
use tracing::warn;

/// 绘图必需的字段。
const REQUIRED: [Field; 3] = [Field::DoorWidthLeft, Field::DoorHeight, Field::DoorThickness];

/// 具有已知合页间隙的门厚。
const SUPPORTED_THICKNESS_MM: [f64; 2] = [STANDARD_THICKNESS_MM, 54.0];

/// 表单中发现的问题。它们不会阻止重算，引擎会使用默认分支或 NaN 几何。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputIssue {
    #[error("{} is required", .0.id())]
    Missing(Field),
    #[error("{} is not a number: {raw:?}", .field.id())]
    NotANumber { field: Field, raw: String },
    #[error("{} must not be negative: {value}", .field.id())]
    Negative { field: Field, value: f64 },
    #[error("door thickness {0}mm is not a standard size; using the 54mm hinge clearance")]
    UnsupportedThickness(f64),
    #[error("fire rating {0:?} is not recognised; using the FD60 bead clearance")]
    UnrecognisedFireRating(String),
}

/// 检查 `provider` 的每个字段并记录发现的问题。
pub fn validate_inputs<P: InputProvider + ?Sized>(provider: &P) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    for field in Field::ALL {
        if field.kind() != FieldKind::Number {
            continue;
        }
        let raw = provider.text(field);
        if raw.trim().is_empty() {
            if REQUIRED.contains(&field) {
                issues.push(InputIssue::Missing(field));
            }
            continue;
        }
        let value = provider.value(field);
        if value.is_nan() {
            issues.push(InputIssue::NotANumber { field, raw });
        } else if value < 0.0 {
            issues.push(InputIssue::Negative { field, value });
        }
    }

    let thickness = provider.value(Field::DoorThickness);
    if thickness.is_finite() && !SUPPORTED_THICKNESS_MM.contains(&thickness) {
        issues.push(InputIssue::UnsupportedThickness(thickness));
    }

    let rating = FireRating::parse(&provider.text(Field::FireRating));
    if !rating.is_recognised() {
        issues.push(InputIssue::UnrecognisedFireRating(rating.to_string()));
    }

    for issue in &issues {
        warn!(%issue, "form input issue");
    }
    issues
}

#[cfg(test)]
mod tests {
    use crate::FormValues;

    use super::*;

    #[test]
    fn demo_form_is_clean() {
        assert!(validate_inputs(&FormValues::demo()).is_empty());
    }

    #[test]
    fn reports_missing_and_malformed_numbers() {
        let mut form = FormValues::demo();
        form.set(Field::DoorHeight, "");
        form.set(Field::VpTopMargin, "top");
        form.set(Field::VpSideMargin, "-5");
        let issues = validate_inputs(&form);
        assert_eq!(
            issues,
            vec![
                InputIssue::Missing(Field::DoorHeight),
                InputIssue::NotANumber {
                    field: Field::VpTopMargin,
                    raw: "top".to_string()
                },
                InputIssue::Negative {
                    field: Field::VpSideMargin,
                    value: -5.0
                },
            ]
        );
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let mut form = FormValues::demo();
        form.set(Field::VpApertureWidth, "");
        form.set(Field::FaceProtectionHeight, "");
        assert!(validate_inputs(&form).is_empty());
    }

    #[test]
    fn flags_default_branches() {
        let mut form = FormValues::demo();
        form.set(Field::DoorThickness, "50");
        form.set(Field::FireRating, "FD90");
        let issues = validate_inputs(&form);
        assert_eq!(
            issues,
            vec![
                InputIssue::UnsupportedThickness(50.0),
                InputIssue::UnrecognisedFireRating("FD90".to_string()),
            ]
        );
        assert!(issues[1].to_string().contains("FD90"));
    }

    #[test]
    fn fifty_four_mm_is_supported() {
        let mut form = FormValues::demo();
        form.set(Field::DoorThickness, "54");
        assert!(validate_inputs(&form).is_empty());
    }
}
