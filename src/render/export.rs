//! Export of rendered frames to image files.

use std::path::Path;

use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

/// Convert a premultiplied frame into a straight-alpha RGBA image.
pub fn frame_to_image(frame: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(frame.width(), frame.height());
    for (i, px) in frame.pixels().iter().enumerate() {
        let c = px.demultiply();
        let x = i as u32 % frame.width();
        let y = i as u32 / frame.width();
        out.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
    out
}

/// Save `frame` as a PNG (format chosen from the extension by `image`).
pub fn save_png<P: AsRef<Path>>(frame: &Pixmap, path: P) -> image::ImageResult<()> {
    let path = path.as_ref();
    match frame_to_image(frame).save(path) {
        Ok(()) => {
            log::info!("saved frame to {path:?}");
            Ok(())
        }
        Err(e) => {
            log::warn!("failed to save frame to {path:?}: {e}");
            Err(e)
        }
    }
}

/// Default export filename, timestamped like the viewer's other saves.
pub fn default_export_name() -> String {
    format!("scatter_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}
