pub mod layout;
pub mod resolver;
pub mod surface;

pub mod input {
    use doorset_core::model::{FireRating, Handing, ProtectionOptions, RawInputs};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum FieldKind {
        Number,
        Text,
        Flag,
    }

    /// 引擎读取的表单字段。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum Field {
        DoorWidthLeft,
        DoorWidthRight,
        DoorHeight,
        DoorThickness,
        FaceProtectionHeight,
        FireRating,
        Handing,
        VpTopMargin,
        VpSideMargin,
        VpApertureWidth,
        VpApertureHeight,
        LockEdgeProtection,
        HingeEdgeProtection,
        FullHeightProtection,
    }

    impl Field {
        pub const ALL: [Field; 14] = [
            Field::DoorWidthLeft,
            Field::DoorWidthRight,
            Field::DoorHeight,
            Field::DoorThickness,
            Field::FaceProtectionHeight,
            Field::FireRating,
            Field::Handing,
            Field::VpTopMargin,
            Field::VpSideMargin,
            Field::VpApertureWidth,
            Field::VpApertureHeight,
            Field::LockEdgeProtection,
            Field::HingeEdgeProtection,
            Field::FullHeightProtection,
        ];

        pub fn id(self) -> &'static str {
            match self {
                Field::DoorWidthLeft => "door_width_left",
                Field::DoorWidthRight => "door_width_right",
                Field::DoorHeight => "door_height",
                Field::DoorThickness => "door_thickness",
                Field::FaceProtectionHeight => "face_protection_height",
                Field::FireRating => "fire_rating",
                Field::Handing => "handing",
                Field::VpTopMargin => "vp_top_margin",
                Field::VpSideMargin => "vp_side_margin",
                Field::VpApertureWidth => "vp_aperture_width",
                Field::VpApertureHeight => "vp_aperture_height",
                Field::LockEdgeProtection => "lock_edge_protection",
                Field::HingeEdgeProtection => "hinge_edge_protection",
                Field::FullHeightProtection => "full_height_protection",
            }
        }

        pub fn from_id(id: &str) -> Option<Field> {
            Field::ALL.into_iter().find(|field| field.id() == id)
        }

        pub fn kind(self) -> FieldKind {
            match self {
                Field::FireRating | Field::Handing => FieldKind::Text,
                Field::LockEdgeProtection
                | Field::HingeEdgeProtection
                | Field::FullHeightProtection => FieldKind::Flag,
                _ => FieldKind::Number,
            }
        }
    }

    /// 原始表单值的来源，无法解析的数值字段返回 NaN。
    pub trait InputProvider {
        fn value(&self, field: Field) -> f64;
        fn text(&self, field: Field) -> String;
        fn flag(&self, field: Field) -> bool;
    }

    /// 引擎修正数值时回写表单的通道。
    pub trait FeedbackSink {
        fn report_adjustment(&mut self, field: Field, value: f64, notice: &str);
    }

    /// 一次性读取全部字段的快照。
    pub fn read_inputs<P: InputProvider + ?Sized>(provider: &P) -> RawInputs {
        RawInputs {
            door_width_left: provider.value(Field::DoorWidthLeft),
            door_width_right: provider.value(Field::DoorWidthRight),
            door_height: provider.value(Field::DoorHeight),
            door_thickness: provider.value(Field::DoorThickness),
            face_protection_height: provider.value(Field::FaceProtectionHeight),
            fire_rating: FireRating::parse(&provider.text(Field::FireRating)),
            handing: Handing::parse(&provider.text(Field::Handing)),
            vp_top_margin: provider.value(Field::VpTopMargin),
            vp_side_margin: provider.value(Field::VpSideMargin),
            vp_aperture_width: provider.value(Field::VpApertureWidth),
            vp_aperture_height: provider.value(Field::VpApertureHeight),
            protection: ProtectionOptions {
                full_height: provider.flag(Field::FullHeightProtection),
                lock_edge: provider.flag(Field::LockEdgeProtection),
                hinge_edge: provider.flag(Field::HingeEdgeProtection),
            },
        }
    }
}

pub mod pipeline {
    use doorset_core::drawing::Drawing;
    use doorset_core::model::RawInputs;
    use tracing::info;

    use crate::input::{FeedbackSink, Field, InputProvider, read_inputs};
    use crate::layout::{LayoutSettings, layout};
    use crate::resolver::{Resolution, ResolverSettings, resolve};
    use crate::surface::{DrawingSurface, SurfaceSize, render};

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct EngineSettings {
        pub resolver: ResolverSettings,
        pub layout: LayoutSettings,
        pub surface: SurfaceSize,
    }

    /// 一次重算的输出：读取的输入、推导的尺寸以及绘制的图形。
    #[derive(Debug, Clone)]
    pub struct Recompute {
        pub inputs: RawInputs,
        pub resolution: Resolution,
        pub drawing: Drawing,
    }

    /// 解析并布局，不涉及任何绘图表面。
    pub fn compute(inputs: RawInputs, settings: &EngineSettings) -> Recompute {
        let resolution = resolve(&inputs, &settings.resolver);
        let drawing = layout(
            &resolution.doorset,
            &resolution.vision_panel,
            inputs.protection,
            &settings.layout,
        );
        Recompute {
            inputs,
            resolution,
            drawing,
        }
    }

    /// 在一次同步调用中读取表单、解析、布局并渲染。
    ///
    /// 面板护板高度的修正会在绘制表面之前通过 `feedback` 回报。
    pub fn recompute<P, F, S>(
        provider: &P,
        feedback: &mut F,
        surface: &mut S,
        settings: &EngineSettings,
    ) -> Recompute
    where
        P: InputProvider + ?Sized,
        F: FeedbackSink + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        let result = compute(read_inputs(provider), settings);
        if let Some(adjustment) = &result.resolution.adjustment {
            feedback.report_adjustment(
                Field::FaceProtectionHeight,
                adjustment.adjusted_mm,
                &adjustment.notice,
            );
        }
        render(&result.drawing, surface, settings.surface);
        info!(
            primitives = result.drawing.len(),
            double = result.inputs.is_double(),
            adjusted = result.resolution.adjustment.is_some(),
            "doorset recomputed"
        );
        result
    }
}

pub use input::{FeedbackSink, Field, FieldKind, InputProvider, read_inputs};
pub use layout::{FaceOutline, LayoutSettings, layout};
pub use pipeline::{EngineSettings, Recompute, compute, recompute};
pub use resolver::{FaceProtectionAdjustment, Resolution, ResolverSettings, resolve};
pub use surface::{
    DrawingSurface, RecordingSurface, SurfaceCommand, SurfaceSize, render, resize_surface,
};
