//! Cityscapes segmentation.
//!
//! Ground truth lives under `gtFine/<subset>/<city>/` as
//! `*_gtFine_instanceIds.png` / `*_gtFine_labelIds.png` masks. Exports
//! without ground truth still carry `imgsFine/leftImg8bit/` images.

use crate::detection::{DetectResult, DetectionContext, FormatDetectionConfidence};

pub const NAME: &str = "cityscapes";

const GT_FINE_MASKS: &str = "gtFine/**/*_gtFine_{instanceIds,labelIds}.png";
const ORIGINAL_IMAGES: &str = "imgsFine/leftImg8bit/**/*_leftImg8bit.png";

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    context.require_any(|context| {
        context.alternative(|context| context.require_file(GT_FINE_MASKS, &[]))?;
        context.alternative(|context| context.require_file(ORIGINAL_IMAGES, &[]))?;
        Ok(())
    })?;

    Ok(None)
}
