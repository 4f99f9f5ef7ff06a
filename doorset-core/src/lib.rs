pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 绘图表面上的点，内部使用 `glam::DVec2`。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    /// 图形的轴对齐包围盒。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds2D {
        min: Point2,
        max: Point2,
    }

    impl Bounds2D {
        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y()
        }

        #[inline]
        pub fn min(&self) -> Point2 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point2 {
            self.max
        }

        #[inline]
        pub fn width(&self) -> f64 {
            self.max.x() - self.min.x()
        }

        #[inline]
        pub fn height(&self) -> f64 {
            self.max.y() - self.min.y()
        }

        pub fn include_point(&mut self, point: Point2) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec2().min(point.as_vec2());
            let max_vec = self.max.as_vec2().max(point.as_vec2());
            self.min = Point2::from_vec(min_vec);
            self.max = Point2::from_vec(max_vec);
        }

        pub fn include_bounds(&mut self, other: &Bounds2D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }
    }
}

pub mod units {
    /// 将实际毫米换算为绘图单位的缩减系数。
    pub const VIEW_SCALING: f64 = 0.65;

    /// 线性视图缩放：`value - value * factor`。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ViewScale {
        factor: f64,
    }

    impl ViewScale {
        #[inline]
        pub const fn new(factor: f64) -> Self {
            Self { factor }
        }

        #[inline]
        pub fn factor(self) -> f64 {
            self.factor
        }

        #[inline]
        pub fn apply(self, value: f64) -> f64 {
            value - value * self.factor
        }
    }

    impl Default for ViewScale {
        fn default() -> Self {
            Self::new(VIEW_SCALING)
        }
    }

    /// 使用默认视图系数缩放毫米尺寸。
    #[inline]
    pub fn scale(value: f64) -> f64 {
        ViewScale::default().apply(value)
    }
}

pub mod model {
    use std::fmt;

    pub const FRAME_THICKNESS_MM: f64 = 32.0;
    pub const AIR_GAP_MM: f64 = 3.0;
    pub const UNDER_FLOOR_GAP_MM: f64 = 10.0;
    pub const STANDARD_THICKNESS_MM: f64 = 44.0;
    pub const HINGE_CLEARANCE_44MM: f64 = 4.0;
    pub const HINGE_CLEARANCE_54MM: f64 = 5.0;
    /// 11mm 压条加 1mm 间隙。
    pub const FD30_BEAD_CLEARANCE_MM: f64 = 11.0 + 1.0;
    /// 7mm 压条加 1mm 间隙。
    pub const FD60_BEAD_CLEARANCE_MM: f64 = 7.0 + 1.0;
    pub const EDGE_PROTECTION_SIZE_MM: f64 = 44.0;
    /// 面板护板伸入封边护板下方的距离。
    pub const EDGE_PROTECTION_OVERLAP_MM: f64 = 10.0;

    /// 门组的防火等级，无法识别的文本原样保留。
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub enum FireRating {
        #[default]
        Fd30,
        Fd60,
        Nfr,
        Other(String),
    }

    impl FireRating {
        pub fn parse(text: &str) -> Self {
            match text.trim() {
                "FD30" => FireRating::Fd30,
                "FD60" => FireRating::Fd60,
                "NFR" => FireRating::Nfr,
                other => FireRating::Other(other.to_string()),
            }
        }

        pub fn as_str(&self) -> &str {
            match self {
                FireRating::Fd30 => "FD30",
                FireRating::Fd60 => "FD60",
                FireRating::Nfr => "NFR",
                FireRating::Other(text) => text,
            }
        }

        /// FD30 与 NFR 使用较宽的压条，其余等级使用较窄的 FD60 压条。
        pub fn bead_clearance_mm(&self) -> f64 {
            match self {
                FireRating::Fd30 | FireRating::Nfr => FD30_BEAD_CLEARANCE_MM,
                FireRating::Fd60 | FireRating::Other(_) => FD60_BEAD_CLEARANCE_MM,
            }
        }

        #[inline]
        pub fn is_recognised(&self) -> bool {
            !matches!(self, FireRating::Other(_))
        }
    }

    impl fmt::Display for FireRating {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// 门扇的开启方向，只有字面值 `LH` 表示左开。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Handing {
        Lh,
        #[default]
        Rh,
    }

    impl Handing {
        pub fn parse(text: &str) -> Self {
            if text.trim() == "LH" {
                Handing::Lh
            } else {
                Handing::Rh
            }
        }

        pub fn as_str(self) -> &'static str {
            match self {
                Handing::Lh => "LH",
                Handing::Rh => "RH",
            }
        }
    }

    impl fmt::Display for Handing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// 输出坐标系中门扇的水平侧。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Side {
        Left,
        Right,
    }

    impl Side {
        #[inline]
        pub fn opposite(self) -> Self {
            match self {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            }
        }
    }

    /// 视窗定位所依据的左扇边缘：双扇门取对口边，
    /// 否则取合页对侧。
    #[inline]
    pub fn leading_edge(is_double: bool, handing: Handing) -> Side {
        if is_double || handing == Handing::Lh {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// 安装锁边护板的门梃，只由开启方向决定，与单双扇无关。
    #[inline]
    pub fn lock_side(handing: Handing) -> Side {
        match handing {
            Handing::Lh => Side::Right,
            Handing::Rh => Side::Left,
        }
    }

    #[inline]
    pub fn hinge_clearance_mm(door_thickness: f64) -> f64 {
        if door_thickness == STANDARD_THICKNESS_MM {
            HINGE_CLEARANCE_44MM
        } else {
            HINGE_CLEARANCE_54MM
        }
    }

    /// 护板开关，用于选择轮廓样式。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProtectionOptions {
        pub full_height: bool,
        pub lock_edge: bool,
        pub hinge_edge: bool,
    }

    impl ProtectionOptions {
        /// 根据锁边位置判断 `side` 一侧是否安装封边护板。
        pub fn edge_plate_on(&self, side: Side, lock_side: Side) -> bool {
            (self.lock_edge && side == lock_side) || (self.hinge_edge && side == lock_side.opposite())
        }
    }

    /// 用户输入的原始尺寸（未缩放，单位毫米）。
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct RawInputs {
        pub door_width_left: f64,
        pub door_width_right: f64,
        pub door_height: f64,
        pub door_thickness: f64,
        pub face_protection_height: f64,
        pub fire_rating: FireRating,
        pub handing: Handing,
        pub vp_top_margin: f64,
        pub vp_side_margin: f64,
        pub vp_aperture_width: f64,
        pub vp_aperture_height: f64,
        pub protection: ProtectionOptions,
    }

    impl RawInputs {
        #[inline]
        pub fn is_double(&self) -> bool {
            self.door_width_right > 0.0
        }

        #[inline]
        pub fn leading_edge(&self) -> Side {
            leading_edge(self.is_double(), self.handing)
        }

        #[inline]
        pub fn lock_side(&self) -> Side {
            lock_side(self.handing)
        }
    }

    /// 缩放后的门组尺寸，每个长度只缩放一次。
    #[derive(Debug, Clone, PartialEq)]
    pub struct DoorsetDimensions {
        pub door_width_left: f64,
        pub door_width_right: f64,
        pub door_height: f64,
        pub door_thickness: f64,
        pub frame_thickness: f64,
        pub air_gap: f64,
        pub under_floor_gap: f64,
        pub face_protection_height: f64,
        pub face_protection_width: f64,
        /// 左扇左边缘到面板护板的距离。
        pub face_protection_inset: f64,
        pub hinge_clearance: f64,
        pub edge_protection_size: f64,
        pub edge_protection_overlap: f64,
        pub fire_rating: FireRating,
        pub handing: Handing,
    }

    impl DoorsetDimensions {
        #[inline]
        pub fn is_double(&self) -> bool {
            self.door_width_right > 0.0
        }

        #[inline]
        pub fn leading_edge(&self) -> Side {
            leading_edge(self.is_double(), self.handing)
        }

        #[inline]
        pub fn lock_side(&self) -> Side {
            lock_side(self.handing)
        }

        pub fn head_width(&self) -> f64 {
            if self.is_double() {
                self.frame_thickness * 2.0
                    + self.air_gap * 3.0
                    + self.door_width_left
                    + self.door_width_right
            } else {
                self.frame_thickness * 2.0 + self.air_gap * 2.0 + self.door_width_left
            }
        }

        #[inline]
        pub fn leg_height(&self) -> f64 {
            self.air_gap + self.door_height + self.under_floor_gap
        }
    }

    /// 缩放后的视窗尺寸。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct VisionPanelDimensions {
        pub top_margin: f64,
        pub side_margin: f64,
        pub aperture_width: f64,
        pub aperture_height: f64,
        pub bead_offset: f64,
    }

    impl VisionPanelDimensions {
        /// 四个尺寸全部为正时才存在视窗。
        pub fn exists(&self) -> bool {
            self.top_margin > 0.0
                && self.side_margin > 0.0
                && self.aperture_width > 0.0
                && self.aperture_height > 0.0
        }

        /// 门扇顶边到视窗开口底边的距离。
        #[inline]
        pub fn bottom(&self) -> f64 {
            self.top_margin + self.aperture_height
        }
    }
}

pub mod drawing {
    use serde::Serialize;

    use crate::geometry::{Bounds2D, Point2};

    /// 绘图表面上描边的图元。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    #[serde(tag = "kind")]
    pub enum Primitive {
        Rectangle {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        },
        LineSegment {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        },
    }

    impl Primitive {
        #[inline]
        pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
            Primitive::Rectangle {
                x,
                y,
                width,
                height,
            }
        }

        #[inline]
        pub fn line(start: Point2, end: Point2) -> Self {
            Primitive::LineSegment {
                x1: start.x(),
                y1: start.y(),
                x2: end.x(),
                y2: end.y(),
            }
        }

        pub fn bounds(&self) -> Bounds2D {
            let mut bounds = Bounds2D::empty();
            match *self {
                Primitive::Rectangle {
                    x,
                    y,
                    width,
                    height,
                } => {
                    bounds.include_point(Point2::new(x, y));
                    bounds.include_point(Point2::new(x + width, y + height));
                }
                Primitive::LineSegment { x1, y1, x2, y2 } => {
                    bounds.include_point(Point2::new(x1, y1));
                    bounds.include_point(Point2::new(x2, y2));
                }
            }
            bounds
        }
    }

    /// 图元所属的门组部件。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub enum Part {
        Frame,
        Leaf,
        VisionPanel,
        FaceProtection,
        BeadRing,
        EdgeProtection,
    }

    impl Part {
        pub fn label(self) -> &'static str {
            match self {
                Part::Frame => "frame",
                Part::Leaf => "leaf",
                Part::VisionPanel => "vision panel",
                Part::FaceProtection => "face protection",
                Part::BeadRing => "bead ring",
                Part::EdgeProtection => "edge protection",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Element {
        pub part: Part,
        pub primitive: Primitive,
    }

    /// 一次渲染的图元列表，按生成顺序排列。
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Drawing {
        elements: Vec<Element>,
    }

    impl Drawing {
        pub fn new() -> Self {
            Self::default()
        }

        #[inline]
        pub fn push(&mut self, part: Part, primitive: Primitive) {
            self.elements.push(Element { part, primitive });
        }

        #[inline]
        pub fn elements(&self) -> &[Element] {
            &self.elements
        }

        pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
            self.elements.iter().map(|element| &element.primitive)
        }

        pub fn part(&self, part: Part) -> impl Iterator<Item = &Primitive> + '_ {
            self.elements
                .iter()
                .filter(move |element| element.part == part)
                .map(|element| &element.primitive)
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.elements.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.elements.is_empty()
        }

        pub fn bounds(&self) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            for primitive in self.primitives() {
                bounds.include_bounds(&primitive.bounds());
            }
            if bounds.is_empty() { None } else { Some(bounds) }
        }
    }
}
