use doorset_core::drawing::{Drawing, Primitive};
use serde::Serialize;
use tracing::{debug, trace};

/// 即时模式的描边目标，由宿主画布实现。
pub trait DrawingSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// 高 DPI 钩子，每次调整尺寸时调用一次，而不是每次渲染。
    fn set_pixel_ratio(&mut self, ratio: f64);
}

/// 表面的逻辑尺寸，单位类似 CSS 像素。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1000.0,
        }
    }
}

/// 按 `pixel_ratio` 设置后备缓冲尺寸并把比例应用到表面。
/// 返回以设备像素计的后备尺寸。
pub fn resize_surface<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    logical: SurfaceSize,
    pixel_ratio: f64,
) -> SurfaceSize {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    let backing = SurfaceSize {
        width: (logical.width * ratio).floor(),
        height: (logical.height * ratio).floor(),
    };
    surface.set_pixel_ratio(ratio);
    debug!(
        width = backing.width,
        height = backing.height,
        ratio,
        "surface resized"
    );
    backing
}

/// 清空表面后按生成顺序描绘全部图元。
pub fn render<S: DrawingSurface + ?Sized>(drawing: &Drawing, surface: &mut S, size: SurfaceSize) {
    surface.clear(size.width, size.height);
    for primitive in drawing.primitives() {
        match *primitive {
            Primitive::Rectangle {
                x,
                y,
                width,
                height,
            } => surface.stroke_rect(x, y, width, height),
            Primitive::LineSegment { x1, y1, x2, y2 } => surface.stroke_line(x1, y1, x2, y2),
        }
    }
    trace!(strokes = drawing.len(), "render pass complete");
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op")]
pub enum SurfaceCommand {
    Clear {
        width: f64,
        height: f64,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    PixelRatio {
        ratio: f64,
    },
}

/// 记录所有调用的表面，用于无界面运行与测试。
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// 最近一次清空之后的命令。
    pub fn current_frame(&self) -> &[SurfaceCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| matches!(command, SurfaceCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn stroke_count(&self) -> usize {
        self.current_frame()
            .iter()
            .filter(|command| {
                matches!(
                    command,
                    SurfaceCommand::StrokeRect { .. } | SurfaceCommand::StrokeLine { .. }
                )
            })
            .count()
    }

    pub fn pixel_ratio(&self) -> Option<f64> {
        self.commands.iter().rev().find_map(|command| match command {
            SurfaceCommand::PixelRatio { ratio } => Some(*ratio),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(SurfaceCommand::Clear { width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(SurfaceCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands
            .push(SurfaceCommand::StrokeLine { x1, y1, x2, y2 });
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.commands.push(SurfaceCommand::PixelRatio { ratio });
    }
}
