//! 门组立面图的几何布局。
//!
//! 这里的函数只依赖解析后的尺寸：相同输入总是按相同顺序
//! 生成相同的图元（门框、门扇、视窗、面板护板、封边护板）。

use doorset_core::drawing::{Drawing, Part, Primitive};
use doorset_core::geometry::Point2;
use doorset_core::model::{DoorsetDimensions, ProtectionOptions, Side, VisionPanelDimensions};
use tracing::debug;

pub const DRAWING_ORIGIN_X: f64 = 100.0;
pub const DRAWING_ORIGIN_Y: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// 门框上槛在表面上的左上角。
    pub origin: Point2,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            origin: Point2::new(DRAWING_ORIGIN_X, DRAWING_ORIGIN_Y),
        }
    }
}

/// 表面坐标系中的轴对齐矩形，y 轴向下。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// 四边各向外扩展 `margin`。
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }

    #[inline]
    fn to_primitive(self) -> Primitive {
        Primitive::rect(self.left, self.top, self.width, self.height)
    }
}

/// 面板护板顶边的形状。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOutline {
    /// 护板覆盖整扇门，视窗四周绘制压条框。
    FullHeight,
    /// 视窗伸入护板，顶边绕开视窗。
    Notched,
    /// 顶边为一条直线。
    Straight,
}

impl FaceOutline {
    pub fn select(
        doorset: &DoorsetDimensions,
        vision_panel: &VisionPanelDimensions,
        options: ProtectionOptions,
    ) -> Self {
        if options.full_height {
            FaceOutline::FullHeight
        } else if vision_panel.exists()
            && vision_panel.bottom() > doorset.door_height - doorset.face_protection_height
        {
            FaceOutline::Notched
        } else {
            FaceOutline::Straight
        }
    }
}

/// 布局整个门组。
pub fn layout(
    doorset: &DoorsetDimensions,
    vision_panel: &VisionPanelDimensions,
    options: ProtectionOptions,
    settings: &LayoutSettings,
) -> Drawing {
    let mut drawing = Drawing::new();
    let origin = settings.origin;

    for rect in frame_members(doorset, origin) {
        drawing.push(Part::Frame, rect.to_primitive());
    }
    for rect in leaves(doorset, origin) {
        drawing.push(Part::Leaf, rect.to_primitive());
    }

    let leaf = left_leaf(doorset, origin);
    let panel = vision_panel_cutout(doorset, vision_panel, &leaf);
    if let Some(panel) = panel {
        drawing.push(Part::VisionPanel, panel.to_primitive());
    }

    if options.full_height || doorset.face_protection_height > 0.0 {
        let outline = FaceOutline::select(doorset, vision_panel, options);
        debug!(
            outline = ?outline,
            vision_panel = panel.is_some(),
            leading_edge = ?doorset.leading_edge(),
            lock_side = ?doorset.lock_side(),
            "face protection outline selected"
        );
        let plate = face_plate(doorset, &leaf, options);
        let bead = vision_panel.bead_offset;
        match (outline, panel) {
            (FaceOutline::Notched, Some(panel)) => {
                for segment in notched_outline(&plate, &panel.expand(bead)) {
                    drawing.push(Part::FaceProtection, segment);
                }
            }
            (FaceOutline::FullHeight, panel) => {
                for segment in straight_outline(&plate) {
                    drawing.push(Part::FaceProtection, segment);
                }
                if let Some(panel) = panel {
                    drawing.push(Part::BeadRing, panel.expand(bead).to_primitive());
                }
            }
            _ => {
                for segment in straight_outline(&plate) {
                    drawing.push(Part::FaceProtection, segment);
                }
            }
        }
    }

    for rect in edge_plates(doorset, &leaf, options) {
        drawing.push(Part::EdgeProtection, rect.to_primitive());
    }

    debug!(primitives = drawing.len(), "doorset laid out");
    drawing
}

/// 左立框、右立框和上槛。
pub fn frame_members(doorset: &DoorsetDimensions, origin: Point2) -> [Rect; 3] {
    let right_door_offset = if doorset.is_double() {
        doorset.door_width_right + doorset.air_gap
    } else {
        0.0
    };
    let leg_top = origin.y() + doorset.frame_thickness;

    let left_leg = Rect {
        left: origin.x(),
        top: leg_top,
        width: doorset.frame_thickness,
        height: doorset.leg_height(),
    };
    let right_leg = Rect {
        left: origin.x()
            + doorset.frame_thickness
            + doorset.air_gap * 2.0
            + doorset.door_width_left
            + right_door_offset,
        ..left_leg
    };
    let head = Rect {
        left: origin.x(),
        top: origin.y(),
        width: doorset.head_width(),
        height: doorset.frame_thickness,
    };
    [left_leg, right_leg, head]
}

pub fn left_leaf(doorset: &DoorsetDimensions, origin: Point2) -> Rect {
    Rect {
        left: origin.x() + doorset.frame_thickness + doorset.air_gap,
        top: origin.y() + doorset.frame_thickness + doorset.air_gap,
        width: doorset.door_width_left,
        height: doorset.door_height,
    }
}

/// 单扇门一个门扇，双扇门两个。
pub fn leaves(doorset: &DoorsetDimensions, origin: Point2) -> Vec<Rect> {
    let left = left_leaf(doorset, origin);
    let mut leaves = vec![left];
    if doorset.is_double() {
        leaves.push(Rect {
            left: left.right() + doorset.air_gap,
            width: doorset.door_width_right,
            ..left
        });
    }
    leaves
}

/// 视窗开口矩形，从左扇的定位边量起。
pub fn vision_panel_cutout(
    doorset: &DoorsetDimensions,
    vision_panel: &VisionPanelDimensions,
    leaf: &Rect,
) -> Option<Rect> {
    if !vision_panel.exists() {
        return None;
    }
    let left = match doorset.leading_edge() {
        Side::Right => leaf.right() - vision_panel.side_margin - vision_panel.aperture_width,
        Side::Left => leaf.left + vision_panel.side_margin,
    };
    Some(Rect {
        left,
        top: leaf.top + vision_panel.top_margin,
        width: vision_panel.aperture_width,
        height: vision_panel.aperture_height,
    })
}

/// 左扇上的面板护板矩形，底边与门扇底边对齐。
pub fn face_plate(doorset: &DoorsetDimensions, leaf: &Rect, options: ProtectionOptions) -> Rect {
    let height = if options.full_height {
        doorset.door_height
    } else {
        doorset.face_protection_height
    };
    Rect {
        left: leaf.left + doorset.face_protection_inset,
        top: leaf.bottom() - height,
        width: doorset.face_protection_width,
        height,
    }
}

fn plate_sides(plate: &Rect) -> [Primitive; 3] {
    let top_left = Point2::new(plate.left, plate.top);
    let bottom_left = Point2::new(plate.left, plate.bottom());
    let bottom_right = Point2::new(plate.right(), plate.bottom());
    let top_right = Point2::new(plate.right(), plate.top);
    [
        Primitive::line(top_left, bottom_left),
        Primitive::line(bottom_left, bottom_right),
        Primitive::line(bottom_right, top_right),
    ]
}

/// 依次绘制左边、底边、右边，最后从右向左画直线顶边。
pub fn straight_outline(plate: &Rect) -> Vec<Primitive> {
    let mut segments = plate_sides(plate).to_vec();
    segments.push(Primitive::line(
        Point2::new(plate.right(), plate.top),
        Point2::new(plate.left, plate.top),
    ));
    segments
}

/// 依次绘制左边、底边、右边，然后顶边绕开
/// `cutout`（含压条的视窗框）向下折让。
///
/// 路径从右上角横向走到缺口右边，向下到缺口底边，
/// 在视窗下方横穿后沿左边返回。
/// 最后一段从左上角补齐缺口。
pub fn notched_outline(plate: &Rect, cutout: &Rect) -> Vec<Primitive> {
    let top = plate.top;
    // 等于 `top + leftover + bead`，leftover 为视窗伸入护板的长度。
    let notch_bottom = cutout.bottom();
    let near = cutout.right();
    let far = cutout.left;

    let mut segments = plate_sides(plate).to_vec();
    segments.extend([
        Primitive::line(Point2::new(plate.right(), top), Point2::new(near, top)),
        Primitive::line(Point2::new(near, top), Point2::new(near, notch_bottom)),
        Primitive::line(Point2::new(near, notch_bottom), Point2::new(far, notch_bottom)),
        Primitive::line(Point2::new(far, notch_bottom), Point2::new(far, top)),
        Primitive::line(Point2::new(plate.left, top), Point2::new(far, top)),
    ]);
    segments
}

/// 先锁边后合页边的封边护板，高度与门扇相同。
pub fn edge_plates(
    doorset: &DoorsetDimensions,
    leaf: &Rect,
    options: ProtectionOptions,
) -> Vec<Rect> {
    let lock_side = doorset.lock_side();
    let mut sides = Vec::with_capacity(2);
    if options.lock_edge {
        sides.push(lock_side);
    }
    if options.hinge_edge {
        sides.push(lock_side.opposite());
    }
    sides
        .into_iter()
        .map(|side| Rect {
            left: match side {
                Side::Left => leaf.left,
                Side::Right => leaf.right() - doorset.edge_protection_size,
            },
            top: leaf.top,
            width: doorset.edge_protection_size,
            height: doorset.door_height,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use doorset_core::model::{FireRating, Handing};

    use super::*;

    fn doorset() -> DoorsetDimensions {
        DoorsetDimensions {
            door_width_left: 300.0,
            door_width_right: 0.0,
            door_height: 700.0,
            door_thickness: 15.4,
            frame_thickness: 11.0,
            air_gap: 1.0,
            under_floor_gap: 3.5,
            face_protection_height: 300.0,
            face_protection_width: 298.0,
            face_protection_inset: 1.0,
            hinge_clearance: 1.4,
            edge_protection_size: 15.0,
            edge_protection_overlap: 3.5,
            fire_rating: FireRating::Fd30,
            handing: Handing::Rh,
        }
    }

    fn panel() -> VisionPanelDimensions {
        VisionPanelDimensions {
            top_margin: 100.0,
            side_margin: 50.0,
            aperture_width: 80.0,
            aperture_height: 250.0,
            bead_offset: 4.0,
        }
    }

    fn origin() -> Point2 {
        Point2::new(DRAWING_ORIGIN_X, DRAWING_ORIGIN_Y)
    }

    #[test]
    fn single_frame_geometry() {
        let [left, right, head] = frame_members(&doorset(), origin());
        assert_eq!(head, Rect { left: 100.0, top: 100.0, width: 324.0, height: 11.0 });
        assert_eq!(left, Rect { left: 100.0, top: 111.0, width: 11.0, height: 704.5 });
        assert_eq!(right.left, 100.0 + 11.0 + 2.0 + 300.0);
        assert_eq!(right.right(), head.right());
    }

    #[test]
    fn double_frame_geometry() {
        let mut dims = doorset();
        dims.door_width_right = 200.0;
        let [_, right, head] = frame_members(&dims, origin());
        assert_eq!(head.width, 22.0 + 3.0 + 500.0);
        assert_eq!(right.left, 100.0 + 11.0 + 2.0 + 300.0 + 201.0);
        assert_eq!(right.right(), head.right());
    }

    #[test]
    fn leaves_are_separated_by_air_gap() {
        let mut dims = doorset();
        assert_eq!(leaves(&dims, origin()).len(), 1);

        dims.door_width_right = 200.0;
        let pair = leaves(&dims, origin());
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0], Rect { left: 112.0, top: 112.0, width: 300.0, height: 700.0 });
        assert_eq!(pair[1].left - pair[0].right(), 1.0);
        assert_eq!(pair[1].width, 200.0);
    }

    #[test]
    fn vision_panel_anchors_on_leading_edge() {
        let mut dims = doorset();
        let leaf = left_leaf(&dims, origin());

        let rh = vision_panel_cutout(&dims, &panel(), &leaf).expect("panel exists");
        assert_eq!(rh.left, leaf.left + 50.0);
        assert_eq!(rh.top, leaf.top + 100.0);

        dims.handing = Handing::Lh;
        let lh = vision_panel_cutout(&dims, &panel(), &leaf).expect("panel exists");
        assert_eq!(lh.right(), leaf.right() - 50.0);

        dims.handing = Handing::Rh;
        dims.door_width_right = 200.0;
        let pair = vision_panel_cutout(&dims, &panel(), &leaf).expect("panel exists");
        assert_eq!(pair.right(), leaf.right() - 50.0);
    }

    #[test]
    fn outline_selection() {
        let dims = doorset();
        let options = ProtectionOptions::default();
        // 视窗底边距扇顶 350，护板顶边距扇顶 400。
        assert_eq!(FaceOutline::select(&dims, &panel(), options), FaceOutline::Straight);

        let deep = VisionPanelDimensions {
            aperture_height: 350.0,
            ..panel()
        };
        assert_eq!(FaceOutline::select(&dims, &deep, options), FaceOutline::Notched);

        let full = ProtectionOptions {
            full_height: true,
            ..options
        };
        assert_eq!(FaceOutline::select(&dims, &deep, full), FaceOutline::FullHeight);

        let absent = VisionPanelDimensions {
            side_margin: 0.0,
            ..deep
        };
        assert_eq!(FaceOutline::select(&dims, &absent, options), FaceOutline::Straight);
    }

    #[test]
    fn notched_outline_steps_around_beaded_panel() {
        let plate = Rect { left: 10.0, top: 50.0, width: 100.0, height: 40.0 };
        let cutout = Rect { left: 30.0, top: 20.0, width: 20.0, height: 45.0 };
        let segments = notched_outline(&plate, &cutout);
        assert_eq!(segments.len(), 8);
        assert_eq!(
            segments[3],
            Primitive::line(Point2::new(110.0, 50.0), Point2::new(50.0, 50.0))
        );
        assert_eq!(
            segments[4],
            Primitive::line(Point2::new(50.0, 50.0), Point2::new(50.0, 65.0))
        );
        assert_eq!(
            segments[5],
            Primitive::line(Point2::new(50.0, 65.0), Point2::new(30.0, 65.0))
        );
        assert_eq!(
            segments[6],
            Primitive::line(Point2::new(30.0, 65.0), Point2::new(30.0, 50.0))
        );
        assert_eq!(
            segments[7],
            Primitive::line(Point2::new(10.0, 50.0), Point2::new(30.0, 50.0))
        );
    }

    #[test]
    fn notch_depth_is_leftover_plus_bead() {
        let dims = doorset();
        let deep = VisionPanelDimensions {
            aperture_height: 350.0,
            ..panel()
        };
        let drawing = layout(&dims, &deep, ProtectionOptions::default(), &LayoutSettings::default());
        let leaf = left_leaf(&dims, origin());
        let plate_top = leaf.bottom() - dims.face_protection_height;
        let leftover = dims.face_protection_height - (dims.door_height - deep.bottom());

        let down = drawing
            .part(Part::FaceProtection)
            .nth(4)
            .copied()
            .expect("notched outline has a descending segment");
        match down {
            Primitive::LineSegment { y1, y2, .. } => {
                assert_eq!(y1, plate_top);
                assert!((y2 - (plate_top + leftover + deep.bead_offset)).abs() < 1e-9);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    fn notched_top_edge(dims: &DoorsetDimensions) -> Vec<Primitive> {
        let deep = VisionPanelDimensions {
            aperture_height: 350.0,
            ..panel()
        };
        let drawing = layout(dims, &deep, ProtectionOptions::default(), &LayoutSettings::default());
        let segments: Vec<_> = drawing.part(Part::FaceProtection).copied().collect();
        assert_eq!(segments.len(), 8);
        segments
    }

    // 门扇 112..412，护板 113..411 顶边在 512，视窗距定位边 50、
    // 宽 80、底边在 562，压条 4。
    #[test]
    fn notch_measured_from_left_stile() {
        let segments = notched_top_edge(&doorset());
        let leaf = left_leaf(&doorset(), origin());
        let near = leaf.left + 50.0 + 80.0 + 4.0;
        let far = leaf.left + 50.0 - 4.0;
        assert_eq!(
            segments[3],
            Primitive::line(Point2::new(411.0, 512.0), Point2::new(near, 512.0))
        );
        assert_eq!(
            segments[5],
            Primitive::line(Point2::new(near, 566.0), Point2::new(far, 566.0))
        );
        assert_eq!(
            segments[7],
            Primitive::line(Point2::new(113.0, 512.0), Point2::new(158.0, 512.0))
        );
    }

    #[test]
    fn notch_measured_from_right_stile() {
        let mut dims = doorset();
        dims.handing = Handing::Lh;
        let leaf = left_leaf(&dims, origin());
        let near = leaf.right() - 50.0 + 4.0;
        let far = near - 80.0 - 8.0;

        let expected = [
            Primitive::line(Point2::new(411.0, 512.0), Point2::new(near, 512.0)),
            Primitive::line(Point2::new(near, 566.0), Point2::new(far, 566.0)),
            Primitive::line(
                Point2::new(113.0, 512.0),
                Point2::new(leaf.right() - 50.0 - 80.0 - 4.0, 512.0),
            ),
        ];
        let lh = notched_top_edge(&dims);
        assert_eq!([lh[3], lh[5], lh[7]], expected);
        assert_eq!(far, 278.0);

        // 右开双扇门同样以对口边定位。
        dims.handing = Handing::Rh;
        dims.door_width_right = 200.0;
        let pair = notched_top_edge(&dims);
        assert_eq!([pair[3], pair[5], pair[7]], expected);
    }

    #[test]
    fn full_height_plate_spans_leaf_and_draws_bead_ring() {
        let dims = doorset();
        let options = ProtectionOptions {
            full_height: true,
            ..ProtectionOptions::default()
        };
        let drawing = layout(&dims, &panel(), options, &LayoutSettings::default());
        let leaf = left_leaf(&dims, origin());

        let left_side = drawing.part(Part::FaceProtection).next().copied();
        assert_eq!(
            left_side,
            Some(Primitive::line(
                Point2::new(leaf.left + 1.0, leaf.top),
                Point2::new(leaf.left + 1.0, leaf.bottom())
            ))
        );
        assert_eq!(drawing.part(Part::FaceProtection).count(), 4);

        let ring: Vec<_> = drawing.part(Part::BeadRing).copied().collect();
        assert_eq!(
            ring,
            vec![Primitive::rect(leaf.left + 46.0, leaf.top + 96.0, 88.0, 258.0)]
        );
    }

    #[test]
    fn full_height_without_panel_has_no_bead_ring() {
        let options = ProtectionOptions {
            full_height: true,
            ..ProtectionOptions::default()
        };
        let absent = VisionPanelDimensions {
            top_margin: 0.0,
            ..panel()
        };
        let drawing = layout(&doorset(), &absent, options, &LayoutSettings::default());
        assert_eq!(drawing.part(Part::BeadRing).count(), 0);
        assert_eq!(drawing.part(Part::VisionPanel).count(), 0);
        assert_eq!(drawing.part(Part::FaceProtection).count(), 4);
    }

    #[test]
    fn zero_face_height_skips_face_protection() {
        let mut dims = doorset();
        dims.face_protection_height = 0.0;
        let drawing = layout(&dims, &panel(), ProtectionOptions::default(), &LayoutSettings::default());
        assert_eq!(drawing.part(Part::FaceProtection).count(), 0);
    }

    #[test]
    fn edge_plates_swap_with_handing() {
        let mut dims = doorset();
        let options = ProtectionOptions {
            lock_edge: true,
            ..ProtectionOptions::default()
        };
        let leaf = left_leaf(&dims, origin());

        let rh = edge_plates(&dims, &leaf, options);
        assert_eq!(rh.len(), 1);
        assert_eq!(rh[0].left, leaf.left);

        dims.handing = Handing::Lh;
        let lh = edge_plates(&dims, &leaf, options);
        assert_eq!(lh[0].right(), leaf.right());
        assert_eq!(lh[0].height, dims.door_height);
    }

    #[test]
    fn pair_lock_plate_follows_handing() {
        let mut dims = doorset();
        dims.door_width_right = 200.0;
        let options = ProtectionOptions {
            lock_edge: true,
            ..ProtectionOptions::default()
        };
        let leaf = left_leaf(&dims, origin());

        let rh = edge_plates(&dims, &leaf, options);
        assert_eq!(rh[0].left, leaf.left);

        dims.handing = Handing::Lh;
        let lh = edge_plates(&dims, &leaf, options);
        assert_eq!(lh[0].right(), leaf.right());
    }

    #[test]
    fn both_edge_plates_lock_first() {
        let dims = doorset();
        let options = ProtectionOptions {
            lock_edge: true,
            hinge_edge: true,
            ..ProtectionOptions::default()
        };
        let leaf = left_leaf(&dims, origin());
        let plates = edge_plates(&dims, &leaf, options);
        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].left, leaf.left);
        assert_eq!(plates[1].right(), leaf.right());
    }

    #[test]
    fn emission_order_is_stable() {
        let mut dims = doorset();
        dims.door_width_right = 200.0;
        let options = ProtectionOptions {
            lock_edge: true,
            ..ProtectionOptions::default()
        };
        let drawing = layout(&dims, &panel(), options, &LayoutSettings::default());
        let parts: Vec<Part> = drawing.elements().iter().map(|element| element.part).collect();
        let expected = [
            Part::Frame,
            Part::Frame,
            Part::Frame,
            Part::Leaf,
            Part::Leaf,
            Part::VisionPanel,
            Part::FaceProtection,
            Part::FaceProtection,
            Part::FaceProtection,
            Part::FaceProtection,
            Part::EdgeProtection,
        ];
        assert_eq!(parts, expected);
    }

    #[test]
    fn degenerate_inputs_are_not_rejected() {
        let mut dims = doorset();
        dims.door_width_left = -50.0;
        dims.door_height = f64::NAN;
        let drawing = layout(&dims, &panel(), ProtectionOptions::default(), &LayoutSettings::default());
        assert!(!drawing.is_empty());
        let leaf = drawing.part(Part::Leaf).next().copied();
        match leaf {
            Some(Primitive::Rectangle { width, height, .. }) => {
                assert_eq!(width, -50.0);
                assert!(height.is_nan());
            }
            other => panic!("unexpected leaf {other:?}"),
        }
    }
}
