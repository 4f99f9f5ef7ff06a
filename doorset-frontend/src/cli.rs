use std::fmt::Write as _;
use std::path::Path;

use doorset_config::AppConfig;
use doorset_core::drawing::Primitive;
use doorset_engine::{Recompute, RecordingSurface, SurfaceSize, recompute, resize_surface};
use doorset_io::{FormSaver, InputIssue, TomlFormFacade, validate_inputs};
use tracing::info;

use crate::errors::FrontendError;
use crate::loader::{FormSource, load_form};
use crate::settings::{engine_settings, surface_size};

/// 命令行选项。
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions<'a> {
    pub form: Option<&'a Path>,
    /// 修正后表单的保存路径。
    pub save_to: Option<&'a Path>,
}

/// 加载表单，在记录表面上重算一次图形并打印摘要。
pub fn run(config: &AppConfig, options: RunOptions<'_>) -> Result<(), FrontendError> {
    let mut loaded = load_form(config, options.form)?;
    let settings = engine_settings(config);
    let issues = validate_inputs(&loaded.form);

    let mut surface = RecordingSurface::new();
    let backing = resize_surface(&mut surface, surface_size(config), config.surface.pixel_ratio);
    let snapshot = loaded.form.clone();
    let result = recompute(&snapshot, &mut loaded.form, &mut surface, &settings);
    info!(
        strokes = surface.stroke_count(),
        issues = issues.len(),
        "drawing rendered"
    );

    print!(
        "{}",
        format_report(&loaded.source, &result, &issues, loaded.form.notices(), backing)
    );

    if let Some(path) = options.save_to {
        TomlFormFacade::new().save(&loaded.form, path)?;
        info!(path = %path.display(), "form saved");
    }
    Ok(())
}

pub fn format_report(
    source: &FormSource,
    result: &Recompute,
    issues: &[InputIssue],
    notices: &[String],
    backing: SurfaceSize,
) -> String {
    let mut out = String::new();
    let doorset = &result.resolution.doorset;
    let vision_panel = &result.resolution.vision_panel;

    let _ = writeln!(out, "Doorset elevation");
    match source {
        FormSource::File(path) => {
            let _ = writeln!(out, "form: {}", path.display());
        }
        FormSource::Demo => {
            let _ = writeln!(out, "form: built-in demo");
        }
    }
    let _ = writeln!(
        out,
        "surface: {:.0} x {:.0} device px",
        backing.width, backing.height
    );
    let _ = writeln!(
        out,
        "{} leaf, {} {}, lock edge {:?}",
        if doorset.is_double() { "double" } else { "single" },
        doorset.fire_rating,
        doorset.handing,
        doorset.lock_side()
    );
    let _ = writeln!(
        out,
        "head {:.2} x leg {:.2}, face protection {:.2} x {:.2}, vision panel {}",
        doorset.head_width(),
        doorset.leg_height(),
        doorset.face_protection_width,
        doorset.face_protection_height,
        if vision_panel.exists() { "yes" } else { "no" }
    );

    if let Some(bounds) = result.drawing.bounds() {
        let _ = writeln!(
            out,
            "extent ({:.2}, {:.2}) {:.2} x {:.2}",
            bounds.min().x(),
            bounds.min().y(),
            bounds.width(),
            bounds.height()
        );
        if bounds.max().x() > backing.width || bounds.max().y() > backing.height {
            let _ = writeln!(out, "warning: drawing extends past the surface");
        }
    }

    for notice in notices {
        let _ = writeln!(out, "notice: {notice}");
    }
    for issue in issues {
        let _ = writeln!(out, "warning: {issue}");
    }

    let _ = writeln!(out, "primitives ({}):", result.drawing.len());
    for element in result.drawing.elements() {
        match element.primitive {
            Primitive::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let _ = writeln!(
                    out,
                    "  - {} rect ({x:.2}, {y:.2}) {width:.2} x {height:.2}",
                    element.part.label()
                );
            }
            Primitive::LineSegment { x1, y1, x2, y2 } => {
                let _ = writeln!(
                    out,
                    "  - {} line ({x1:.2}, {y1:.2}) -> ({x2:.2}, {y2:.2})",
                    element.part.label()
                );
            }
        }
    }
    out
}
