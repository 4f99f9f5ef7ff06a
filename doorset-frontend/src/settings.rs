use doorset_config::AppConfig;
use doorset_core::geometry::Point2;
use doorset_core::units::ViewScale;
use doorset_engine::{EngineSettings, LayoutSettings, ResolverSettings, SurfaceSize};

/// 由 `[drawing]` 与 `[surface]` 配置段生成引擎设置。
pub fn engine_settings(config: &AppConfig) -> EngineSettings {
    let drawing = &config.drawing;
    EngineSettings {
        resolver: ResolverSettings {
            scale: ViewScale::new(drawing.view_scaling),
            flush_tolerance_mm: drawing.flush_tolerance_mm,
        },
        layout: LayoutSettings {
            origin: Point2::new(drawing.origin_x, drawing.origin_y),
        },
        surface: surface_size(config),
    }
}

pub fn surface_size(config: &AppConfig) -> SurfaceSize {
    SurfaceSize {
        width: config.surface.width,
        height: config.surface.height,
    }
}
