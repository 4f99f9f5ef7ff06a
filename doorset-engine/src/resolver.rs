use doorset_core::model::{
    AIR_GAP_MM, DoorsetDimensions, EDGE_PROTECTION_OVERLAP_MM, EDGE_PROTECTION_SIZE_MM,
    FRAME_THICKNESS_MM, RawInputs, Side, UNDER_FLOOR_GAP_MM, VisionPanelDimensions,
    hinge_clearance_mm,
};
use doorset_core::units::ViewScale;
use tracing::{debug, info};

pub const ADJUSTMENT_NOTICE: &str = "Face protection height adjusted to suit vision panel.";

/// 视窗与面板护板齐平检查的容差，单位毫米。
/// 为 `0.0` 时要求严格相等。
pub const DEFAULT_FLUSH_TOLERANCE_MM: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    pub scale: ViewScale,
    pub flush_tolerance_mm: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            scale: ViewScale::default(),
            flush_tolerance_mm: DEFAULT_FLUSH_TOLERANCE_MM,
        }
    }
}

/// 对面板护板高度的修正，单位为未缩放的毫米。
#[derive(Debug, Clone, PartialEq)]
pub struct FaceProtectionAdjustment {
    pub previous_mm: f64,
    pub adjusted_mm: f64,
    pub notice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub doorset: DoorsetDimensions,
    pub vision_panel: VisionPanelDimensions,
    pub adjustment: Option<FaceProtectionAdjustment>,
}

/// 由原始输入推导缩放后的门组与视窗尺寸。
///
/// 视窗底边与面板护板顶边齐平时，护板下移一个压条偏移，
/// 修正结果与尺寸一并返回。
pub fn resolve(inputs: &RawInputs, settings: &ResolverSettings) -> Resolution {
    let scale = |value: f64| settings.scale.apply(value);

    let hinge_clearance = hinge_clearance_mm(inputs.door_thickness);
    let bead_offset = inputs.fire_rating.bead_clearance_mm();
    let (face_inset, face_width) = face_protection_extent(inputs);

    let mut face_height = inputs.face_protection_height;
    let adjustment = if vision_panel_flush_with_face(inputs, settings.flush_tolerance_mm) {
        let adjusted = face_height - bead_offset;
        info!(
            previous = face_height,
            adjusted,
            bead_offset,
            "face protection lowered below vision panel"
        );
        let adjustment = FaceProtectionAdjustment {
            previous_mm: face_height,
            adjusted_mm: adjusted,
            notice: ADJUSTMENT_NOTICE.to_string(),
        };
        face_height = adjusted;
        Some(adjustment)
    } else {
        None
    };

    debug!(
        view_factor = settings.scale.factor(),
        hinge_clearance,
        bead_offset,
        face_inset,
        face_width,
        fire_rating = %inputs.fire_rating,
        handing = %inputs.handing,
        "resolved derived clearances"
    );

    let doorset = DoorsetDimensions {
        door_width_left: scale(inputs.door_width_left),
        door_width_right: scale(inputs.door_width_right),
        door_height: scale(inputs.door_height),
        door_thickness: scale(inputs.door_thickness),
        frame_thickness: scale(FRAME_THICKNESS_MM),
        air_gap: scale(AIR_GAP_MM),
        under_floor_gap: scale(UNDER_FLOOR_GAP_MM),
        face_protection_height: scale(face_height),
        face_protection_width: scale(face_width),
        face_protection_inset: scale(face_inset),
        hinge_clearance: scale(hinge_clearance),
        edge_protection_size: scale(EDGE_PROTECTION_SIZE_MM),
        edge_protection_overlap: scale(EDGE_PROTECTION_OVERLAP_MM),
        fire_rating: inputs.fire_rating.clone(),
        handing: inputs.handing,
    };

    let vision_panel = VisionPanelDimensions {
        top_margin: scale(inputs.vp_top_margin),
        side_margin: scale(inputs.vp_side_margin),
        aperture_width: scale(inputs.vp_aperture_width),
        aperture_height: scale(inputs.vp_aperture_height),
        bead_offset: scale(bead_offset),
    };

    Resolution {
        doorset,
        vision_panel,
        adjustment,
    }
}

/// 左扇面板护板的左侧缩进与宽度（未缩放）。
///
/// 护板距两侧门梃各一个缝隙。装有封边护板的一侧，
/// 护板伸入封边护板下方，距门梃 `size - overlap`。
pub fn face_protection_extent(inputs: &RawInputs) -> (f64, f64) {
    let lock_side = inputs.lock_side();
    let inset = |side: Side| {
        if inputs.protection.edge_plate_on(side, lock_side) {
            EDGE_PROTECTION_SIZE_MM - EDGE_PROTECTION_OVERLAP_MM
        } else {
            AIR_GAP_MM
        }
    };
    let left = inset(Side::Left);
    let right = inset(Side::Right);
    (left, inputs.door_width_left - left - right)
}

fn vision_panel_flush_with_face(inputs: &RawInputs, tolerance: f64) -> bool {
    if !(inputs.vp_aperture_height > 0.0 && inputs.face_protection_height > 0.0) {
        return false;
    }
    let gap = inputs.door_height
        - (inputs.vp_top_margin + inputs.vp_aperture_height)
        - inputs.face_protection_height;
    gap.abs() <= tolerance
}
